//! Integration tests for the catalog read endpoints.
//!
//! These tests require:
//! - A running `PostgreSQL` database
//! - The storefront server running (cargo run -p comforty-storefront)
//! - Valid content store credentials in environment
//!
//! Run with: cargo test -p comforty-integration-tests -- --ignored

use comforty_integration_tests::{session_client, storefront_base_url};
use reqwest::StatusCode;
use serde_json::Value;

async fn list_products(client: &reqwest::Client) -> Vec<Value> {
    let base_url = storefront_base_url();
    client
        .get(format!("{base_url}/products"))
        .send()
        .await
        .expect("Failed to list products")
        .json::<Vec<Value>>()
        .await
        .expect("Failed to decode products")
}

#[tokio::test]
#[ignore = "Requires running storefront server and content store credentials"]
async fn test_products_expose_projected_fields() {
    let client = session_client();
    let products = list_products(&client).await;
    assert!(!products.is_empty(), "catalog has at least one product");

    let product = &products[0];
    assert!(product["_id"].is_string());
    assert!(product["title"].is_string());
    assert!(product["price"].is_string() || product["price"].is_number());
    assert!(product["image"].is_string());
}

#[tokio::test]
#[ignore = "Requires running storefront server and content store credentials"]
async fn test_featured_is_capped_at_four() {
    let client = session_client();
    let base_url = storefront_base_url();

    let featured: Vec<Value> = client
        .get(format!("{base_url}/products/featured"))
        .send()
        .await
        .expect("Failed to list featured")
        .json()
        .await
        .expect("Failed to decode featured");

    assert!(featured.len() <= 4);
}

#[tokio::test]
#[ignore = "Requires running storefront server and content store credentials"]
async fn test_unknown_product_is_404() {
    let client = session_client();
    let base_url = storefront_base_url();

    let resp = client
        .get(format!("{base_url}/products/no-such-product"))
        .send()
        .await
        .expect("Failed to fetch product");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running storefront server and content store credentials"]
async fn test_related_excludes_the_product_itself() {
    let client = session_client();
    let base_url = storefront_base_url();
    let products = list_products(&client).await;
    let product_id = products[0]["_id"].as_str().expect("a product id");

    let related: Vec<Value> = client
        .get(format!("{base_url}/products/{product_id}/related"))
        .send()
        .await
        .expect("Failed to list related")
        .json()
        .await
        .expect("Failed to decode related");

    assert!(related.len() <= 4);
    assert!(related.iter().all(|p| p["_id"] != product_id));
}

#[tokio::test]
#[ignore = "Requires running storefront server and content store credentials"]
async fn test_blank_search_term_returns_empty() {
    let client = session_client();
    let base_url = storefront_base_url();

    let results: Vec<Value> = client
        .get(format!("{base_url}/products/search?q=%20%20"))
        .send()
        .await
        .expect("Failed to search")
        .json()
        .await
        .expect("Failed to decode results");

    assert!(results.is_empty());
}

#[tokio::test]
#[ignore = "Requires running storefront server and content store credentials"]
async fn test_categories_expose_product_counts() {
    let client = session_client();
    let base_url = storefront_base_url();

    let categories: Vec<Value> = client
        .get(format!("{base_url}/categories"))
        .send()
        .await
        .expect("Failed to list categories")
        .json()
        .await
        .expect("Failed to decode categories");

    assert!(!categories.is_empty(), "catalog has at least one category");
    assert!(categories.iter().all(|c| c["products"].is_number()));

    // Detail view pairs the category with its products
    let category_id = categories[0]["_id"].as_str().expect("a category id");
    let detail: Value = client
        .get(format!("{base_url}/categories/{category_id}"))
        .send()
        .await
        .expect("Failed to fetch category")
        .json()
        .await
        .expect("Failed to decode category detail");

    assert_eq!(detail["category"]["_id"], category_id);
    assert!(detail["products"].is_array());
}
