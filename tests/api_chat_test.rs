//! Integration tests for the chat API endpoints

mod test_utils;

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    use crate::test_utils::{body_to_string, test_app};

    async fn create_session(app: &axum::Router) -> String {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/chat/sessions")
                    .method("POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = body_to_string(response.into_body()).await;
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        json["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn it_creates_a_session_with_the_greeting() {
        let app = test_app("http://localhost:0");

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/chat/sessions")
                    .method("POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = body_to_string(response.into_body()).await;
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert!(!json["id"].as_str().unwrap().is_empty());
        assert_eq!(json["transcript"][0]["author"], "assistant");
        assert!(
            json["transcript"][0]["text"]
                .as_str()
                .unwrap()
                .starts_with("Hi! I'm Sprout")
        );
    }

    #[tokio::test]
    async fn it_lists_active_sessions() {
        let app = test_app("http://localhost:0");

        let id = create_session(&app).await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/chat/sessions")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = body_to_string(response.into_body()).await;
        assert!(body.contains(&id));
    }

    #[tokio::test]
    async fn it_returns_404_for_nonexistent_session() {
        let app = test_app("http://localhost:0");

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/chat/nonexistent-session-id")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn it_returns_404_for_chat_in_unknown_session() {
        let app = test_app("http://localhost:0");

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/chat")
                    .method("POST")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::json!({
                            "session_id": "nonexistent-session-id",
                            "message": "Hello"
                        })
                        .to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn it_rejects_an_empty_message() {
        let app = test_app("http://localhost:0");

        let id = create_session(&app).await;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/chat")
                    .method("POST")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::json!({
                            "session_id": &id,
                            "message": "   "
                        })
                        .to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // The rejected submission did not touch the transcript
        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/api/chat/{}", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = body_to_string(response.into_body()).await;
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["transcript"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn it_streams_a_reply_and_records_the_transcript() {
        let mut server = mockito::Server::new_async().await;

        let sse_response = r#"data: {"id":"chunk1","choices":[{"index":0,"delta":{"content":"Hello"},"finish_reason":null}]}

data: {"id":"chunk2","choices":[{"index":0,"delta":{"content":" world"},"finish_reason":null}]}

data: {"id":"chunk3","choices":[{"index":0,"delta":{},"finish_reason":"stop"}]}

data: [DONE]

"#;

        let mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "text/event-stream")
            .with_body(sse_response)
            .create();

        let app = test_app(&server.url());
        let id = create_session(&app).await;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/chat")
                    .method("POST")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::json!({
                            "session_id": &id,
                            "message": "Say hello"
                        })
                        .to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        // Reading the whole body waits for the stream to finish; the
        // fragments arrive as SSE data events in order
        let body = body_to_string(response.into_body()).await;
        mock.assert();
        assert!(body.contains("data: Hello"));
        assert!(body.contains("data:  world"));

        // The reply was folded into the session transcript
        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/api/chat/{}", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_to_string(response.into_body()).await;
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        let transcript = json["transcript"].as_array().unwrap();
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[1]["author"], "user");
        assert_eq!(transcript[1]["text"], "Say hello");
        assert_eq!(transcript[2]["author"], "assistant");
        assert_eq!(transcript[2]["text"], "Hello world");
    }

    #[tokio::test]
    async fn it_records_the_apology_when_the_backend_fails() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(500)
            .with_body("boom")
            .create();

        let app = test_app(&server.url());
        let id = create_session(&app).await;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/chat")
                    .method("POST")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::json!({
                            "session_id": &id,
                            "message": "Hello"
                        })
                        .to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        // The only event the client sees is the fixed apology
        let body = body_to_string(response.into_body()).await;
        mock.assert();
        assert!(body.contains("Oops! Something went wrong."));
        assert!(!body.contains("boom"));

        // The transcript holds the apology, not a partial reply
        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/api/chat/{}", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = body_to_string(response.into_body()).await;
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        let transcript = json["transcript"].as_array().unwrap();
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[2]["author"], "assistant");
        assert_eq!(
            transcript[2]["text"],
            "Oops! Something went wrong. Please try again."
        );
    }
}
