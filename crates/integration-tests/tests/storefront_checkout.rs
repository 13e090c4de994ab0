//! Integration tests for the checkout flow and reviews.
//!
//! These tests require:
//! - A running `PostgreSQL` database
//! - The storefront server running (cargo run -p comforty-storefront)
//! - Content store credentials with write access (orders are created)
//!
//! Run with: cargo test -p comforty-integration-tests -- --ignored

use comforty_integration_tests::{session_client, storefront_base_url};
use reqwest::StatusCode;
use serde_json::{Value, json};

fn shipping_form() -> Value {
    json!({
        "firstName": "Test",
        "lastName": "Shopper",
        "email": "shopper@example.com",
        "phone": "0300-123-4567",
        "address": "1 Integration Lane",
        "city": "Testville",
        "state": "TS",
        "postalCode": "54000",
        "country": "PK"
    })
}

async fn add_any_product(client: &reqwest::Client) {
    let base_url = storefront_base_url();
    let products: Value = client
        .get(format!("{base_url}/products"))
        .send()
        .await
        .expect("Failed to list products")
        .json()
        .await
        .expect("Failed to decode products");
    let product_id = products[0]["_id"].as_str().expect("a product id");

    let resp = client
        .post(format!("{base_url}/cart/add"))
        .json(&json!({ "productId": product_id }))
        .send()
        .await
        .expect("Failed to add to cart");
    assert_eq!(resp.status(), StatusCode::CREATED);
}

// ============================================================================
// Checkout Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running storefront server and content store credentials"]
async fn test_empty_cart_checkout_redirects_to_cart() {
    let client = reqwest::Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client");
    let base_url = storefront_base_url();

    let resp = client
        .post(format!("{base_url}/checkout"))
        .json(&shipping_form())
        .send()
        .await
        .expect("Failed to call checkout");

    assert!(resp.status().is_redirection());
    assert_eq!(
        resp.headers()
            .get("location")
            .and_then(|v| v.to_str().ok()),
        Some("/cart")
    );
}

#[tokio::test]
#[ignore = "Requires running storefront server and content store credentials"]
async fn test_invalid_form_returns_every_field_error() {
    let client = session_client();
    let base_url = storefront_base_url();
    add_any_product(&client).await;

    let resp = client
        .post(format!("{base_url}/checkout"))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to call checkout");

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = resp.json().await.expect("Failed to decode errors");
    let errors = body["errors"].as_array().expect("errors array");
    assert!(errors.iter().any(|e| e == "Email is required."));
    assert!(errors.iter().any(|e| e == "First name is required."));

    // Validation failure must leave the cart intact
    let cart: Value = client
        .get(format!("{base_url}/cart"))
        .send()
        .await
        .expect("Failed to fetch cart")
        .json()
        .await
        .expect("Failed to decode cart");
    assert_eq!(cart["items"].as_array().expect("items array").len(), 1);
}

#[tokio::test]
#[ignore = "Requires running storefront server and content store write credentials"]
async fn test_successful_checkout_clears_cart() {
    let client = session_client();
    let base_url = storefront_base_url();
    add_any_product(&client).await;

    let resp = client
        .post(format!("{base_url}/checkout"))
        .json(&shipping_form())
        .send()
        .await
        .expect("Failed to call checkout");

    assert_eq!(resp.status(), StatusCode::CREATED);
    let receipt: Value = resp.json().await.expect("Failed to decode receipt");
    assert!(
        receipt["orderNumber"]
            .as_str()
            .expect("order number")
            .starts_with("CMF-")
    );

    let cart: Value = client
        .get(format!("{base_url}/cart"))
        .send()
        .await
        .expect("Failed to fetch cart")
        .json()
        .await
        .expect("Failed to decode cart");
    assert_eq!(cart["itemCount"], 0);
}

// ============================================================================
// Review Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running storefront server and content store credentials"]
async fn test_review_submit_and_aggregate() {
    let client = session_client();
    let base_url = storefront_base_url();

    let products: Value = client
        .get(format!("{base_url}/products"))
        .send()
        .await
        .expect("Failed to list products")
        .json()
        .await
        .expect("Failed to decode products");
    let product_id = products[0]["_id"].as_str().expect("a product id");

    for rating in [5, 4, 4] {
        let resp = client
            .post(format!("{base_url}/products/{product_id}/reviews"))
            .json(&json!({
                "rating": rating,
                "comment": "Comfortable and sturdy.",
                "userName": "Test Shopper"
            }))
            .send()
            .await
            .expect("Failed to submit review");
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let bundle: Value = client
        .get(format!("{base_url}/products/{product_id}/reviews"))
        .send()
        .await
        .expect("Failed to fetch reviews")
        .json()
        .await
        .expect("Failed to decode bundle");

    assert_eq!(bundle["totalReviews"], 3);
    assert_eq!(bundle["averageRating"], 4.3);
}

#[tokio::test]
#[ignore = "Requires running storefront server and content store credentials"]
async fn test_out_of_range_rating_rejected() {
    let client = session_client();
    let base_url = storefront_base_url();

    let resp = client
        .post(format!("{base_url}/products/any-product/reviews"))
        .json(&json!({
            "rating": 6,
            "comment": "Too good.",
            "userName": "Test Shopper"
        }))
        .send()
        .await
        .expect("Failed to submit review");

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
