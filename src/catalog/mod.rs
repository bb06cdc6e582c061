//! Static product and expert catalog backing the storefront views.
use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: String,
    pub image_url: String,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Expert {
    pub id: String,
    pub name: String,
    pub specialty: String,
    pub rate: String,
    pub image_url: String,
}

fn product(id: &str, name: &str, category: &str, price: &str, image_seed: &str) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        price: price.to_string(),
        image_url: format!("https://picsum.photos/seed/{}/400/300", image_seed),
    }
}

fn expert(id: &str, name: &str, specialty: &str, rate: &str, image_seed: &str) -> Expert {
    Expert {
        id: id.to_string(),
        name: name.to_string(),
        specialty: specialty.to_string(),
        rate: rate.to_string(),
        image_url: format!("https://picsum.photos/seed/{}/200/200", image_seed),
    }
}

pub fn featured_products() -> Vec<Product> {
    vec![
        product(
            "p1",
            "Self-Watering Planter Box",
            "Planters",
            "$49.99",
            "planter",
        ),
        product(
            "p2",
            "Organic Potting Mix (20L)",
            "Soil & Compost",
            "$18.50",
            "soil",
        ),
        product(
            "p3",
            "Drip Irrigation Starter Kit",
            "Irrigation",
            "$34.00",
            "irrigation",
        ),
        product(
            "p4",
            "Heirloom Herb Seed Collection",
            "Seeds",
            "$12.99",
            "seeds",
        ),
    ]
}

pub fn experts() -> Vec<Expert> {
    vec![
        expert(
            "e1",
            "Priya Sharma",
            "Urban Vegetable Gardens",
            "$40/session",
            "priya",
        ),
        expert(
            "e2",
            "Marcus Lee",
            "Rooftop Landscaping",
            "$55/session",
            "marcus",
        ),
        expert(
            "e3",
            "Elena Petrova",
            "Container Herbs & Pollinators",
            "$35/session",
            "elena",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_populated() {
        assert_eq!(featured_products().len(), 4);
        assert_eq!(experts().len(), 3);
    }

    #[test]
    fn test_product_serialization() {
        let products = featured_products();
        let json = serde_json::to_value(&products[0]).unwrap();
        assert_eq!(json["id"], "p1");
        assert_eq!(json["category"], "Planters");
        assert!(json["image_url"].as_str().unwrap().starts_with("https://"));
    }
}
