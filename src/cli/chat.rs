use std::io::Write;

use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;

use crate::assistant::{ChatSession, run_turn};
use crate::core::AppConfig;
use crate::openai::Client;

pub async fn run() -> Result<()> {
    let config = AppConfig::from_env()?;
    let client = Client::new(&config.api_hostname, &config.api_key);

    let session = ChatSession::shared();
    {
        let session = session.lock().expect("Chat session lock poisoned");
        println!("{}\n", session.messages()[0].text);
    }

    let mut rl = DefaultEditor::new()?;

    loop {
        let readline = rl.readline(">>> ");
        match readline {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }

                // Print fragments as they stream in
                let (tx, mut rx) = mpsc::unbounded_channel::<String>();
                let printer = tokio::spawn(async move {
                    while let Some(fragment) = rx.recv().await {
                        print!("{}", fragment);
                        let _ = std::io::stdout().flush();
                    }
                    println!();
                });

                if let Err(e) = run_turn(&session, &client, &config.chat_model, &line, Some(tx)).await
                {
                    println!("{}", e);
                }
                printer.await?;
            }
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}
