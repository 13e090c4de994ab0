//! Content store client - the catalog access layer.
//!
//! Speaks the content store's HTTP API: GROQ reads on the query endpoint,
//! document mutations on the mutate endpoint. Catalog reads are cached with
//! `moka` (5-minute TTL); order creation is never cached.
//!
//! # Read contract
//!
//! Absence of data is not an error. List reads return `Ok` with an empty
//! `Vec`; by-id reads return `Ok(None)`, which callers must treat as "not
//! found". Only transport failures, non-success API responses, and decode
//! failures surface as [`ContentError`]. This is the typed rendering of a
//! `(data, error)` result pair: callers branch on the error slot, control
//! flow is never thrown through them.

pub mod queries;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{debug, instrument};
use uuid::Uuid;

use comforty_core::{Category, CategoryId, Order, OrderId, Product, ProductId};

use crate::checkout::OrderDraft;
use crate::config::ContentStoreConfig;

const CACHE_CAPACITY: u64 = 1000;
const CACHE_TTL: Duration = Duration::from_secs(300); // 5 minutes
const ERROR_BODY_PREVIEW: usize = 500;

/// Errors that can occur when talking to the content store.
#[derive(Debug, Error)]
pub enum ContentError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status.
    #[error("content store returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body could not be decoded.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Rate limited by the content store.
    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),
}

/// Query endpoint response envelope.
#[derive(Debug, Deserialize)]
struct QueryResponse<T> {
    result: T,
}

/// Mutate endpoint response envelope.
#[derive(Debug, Deserialize)]
struct MutateResponse {
    #[serde(default)]
    results: Vec<MutateResult>,
}

#[derive(Debug, Deserialize)]
struct MutateResult {
    id: String,
}

/// Cached catalog responses.
#[derive(Clone)]
enum CacheValue {
    Product(Box<Product>),
    Products(Vec<Product>),
    Category(Box<Category>),
    Categories(Vec<Category>),
}

/// Client for the content store API.
///
/// Cheaply cloneable via `Arc`; one instance is shared across all handlers.
#[derive(Clone)]
pub struct ContentClient {
    inner: Arc<ContentClientInner>,
}

struct ContentClientInner {
    client: reqwest::Client,
    query_endpoint: String,
    mutate_endpoint: String,
    api_token: String,
    cache: Cache<String, CacheValue>,
}

impl ContentClient {
    /// Create a new content store client.
    #[must_use]
    pub fn new(config: &ContentStoreConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(CACHE_TTL)
            .build();

        let base = format!(
            "https://{}.{}/v{}/data",
            config.project_id, config.api_host, config.api_version
        );

        Self {
            inner: Arc::new(ContentClientInner {
                client: reqwest::Client::new(),
                query_endpoint: format!("{base}/query/{}", config.dataset),
                mutate_endpoint: format!("{base}/mutate/{}", config.dataset),
                api_token: config.api_token.expose_secret().to_string(),
                cache,
            }),
        }
    }

    /// Execute a GROQ query and decode the `result` field.
    async fn query<T: DeserializeOwned>(&self, groq: &str) -> Result<T, ContentError> {
        let url = format!(
            "{}?query={}",
            self.inner.query_endpoint,
            urlencoding::encode(groq)
        );

        let response = self
            .inner
            .client
            .get(&url)
            .bearer_auth(&self.inner.api_token)
            .send()
            .await?;

        let body = Self::check_response(response).await?;
        let envelope: QueryResponse<T> = serde_json::from_str(&body)?;
        Ok(envelope.result)
    }

    /// Shared status handling: rate limits, non-success statuses, body read.
    async fn check_response(response: reqwest::Response) -> Result<String, ContentError> {
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(ContentError::RateLimited(retry_after));
        }

        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(ERROR_BODY_PREVIEW).collect::<String>(),
                "content store returned non-success status"
            );
            return Err(ContentError::Api {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        Ok(body)
    }

    // =========================================================================
    // Product Reads
    // =========================================================================

    /// List all products.
    ///
    /// # Errors
    ///
    /// Returns an error only for transport or API failures; an empty catalog
    /// is `Ok(vec![])`.
    #[instrument(skip(self))]
    pub async fn products(&self) -> Result<Vec<Product>, ContentError> {
        let cache_key = "products:all".to_string();
        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let products: Vec<Product> = self.query(&queries::products()).await?;
        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(products.clone()))
            .await;
        Ok(products)
    }

    /// Products tagged `featured`, capped at [`queries::FEATURED_LIMIT`].
    ///
    /// # Errors
    ///
    /// Returns an error only for transport or API failures.
    #[instrument(skip(self))]
    pub async fn featured_products(&self) -> Result<Vec<Product>, ContentError> {
        let cache_key = "products:featured".to_string();
        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for featured products");
            return Ok(products);
        }

        let products: Vec<Product> = self.query(&queries::featured_products()).await?;
        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(products.clone()))
            .await;
        Ok(products)
    }

    /// A product by ID. `Ok(None)` means the document does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error only for transport or API failures - a missing
    /// product is a normal outcome, not an error.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn product_by_id(&self, id: &ProductId) -> Result<Option<Product>, ContentError> {
        let cache_key = format!("product:{id}");
        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(Some(*product));
        }

        let product: Option<Product> = self.query(&queries::product_by_id(id)).await?;
        if let Some(ref product) = product {
            self.inner
                .cache
                .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
                .await;
        }
        Ok(product)
    }

    /// Products belonging to the given category.
    ///
    /// # Errors
    ///
    /// Returns an error only for transport or API failures; an unknown
    /// category simply yields an empty list.
    #[instrument(skip(self), fields(category_id = %category_id))]
    pub async fn products_by_category(
        &self,
        category_id: &CategoryId,
    ) -> Result<Vec<Product>, ContentError> {
        let cache_key = format!("products:category:{category_id}");
        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for category products");
            return Ok(products);
        }

        let products: Vec<Product> = self.query(&queries::products_by_category(category_id)).await?;
        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(products.clone()))
            .await;
        Ok(products)
    }

    /// Products related to the given one (everything else, capped), with the
    /// product itself excluded by the query.
    ///
    /// # Errors
    ///
    /// Returns an error only for transport or API failures.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn related_products(
        &self,
        product_id: &ProductId,
    ) -> Result<Vec<Product>, ContentError> {
        let cache_key = format!("products:related:{product_id}");
        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for related products");
            return Ok(products);
        }

        let products: Vec<Product> = self.query(&queries::related_products(product_id)).await?;
        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(products.clone()))
            .await;
        Ok(products)
    }

    /// Free-text search over title and description. Never cached.
    ///
    /// # Errors
    ///
    /// Returns an error only for transport or API failures; no matches is
    /// `Ok(vec![])`.
    #[instrument(skip(self))]
    pub async fn search_products(&self, term: &str) -> Result<Vec<Product>, ContentError> {
        self.query(&queries::search_products(term)).await
    }

    // =========================================================================
    // Category Reads
    // =========================================================================

    /// List all categories with their product counts.
    ///
    /// # Errors
    ///
    /// Returns an error only for transport or API failures.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<Category>, ContentError> {
        let cache_key = "categories:all".to_string();
        if let Some(CacheValue::Categories(categories)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for categories");
            return Ok(categories);
        }

        let categories: Vec<Category> = self.query(&queries::categories()).await?;
        self.inner
            .cache
            .insert(cache_key, CacheValue::Categories(categories.clone()))
            .await;
        Ok(categories)
    }

    /// A category by ID. `Ok(None)` means the document does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error only for transport or API failures.
    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn category_by_id(&self, id: &CategoryId) -> Result<Option<Category>, ContentError> {
        let cache_key = format!("category:{id}");
        if let Some(CacheValue::Category(category)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for category");
            return Ok(Some(*category));
        }

        let category: Option<Category> = self.query(&queries::category_by_id(id)).await?;
        if let Some(ref category) = category {
            self.inner
                .cache
                .insert(cache_key, CacheValue::Category(Box::new(category.clone())))
                .await;
        }
        Ok(category)
    }

    // =========================================================================
    // Orders (never cached - mutable state)
    // =========================================================================

    /// An order by ID, for the confirmation view. `Ok(None)` means the
    /// document does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error only for transport or API failures.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn order_by_id(&self, id: &OrderId) -> Result<Option<Order>, ContentError> {
        self.query(&queries::order_by_id(id)).await
    }

    /// Persist an assembled order, returning the ID the store assigned.
    ///
    /// # Errors
    ///
    /// Returns an error if the mutation fails or the store does not return
    /// a created document ID. The caller keeps the cart on failure.
    #[instrument(skip(self, draft), fields(order_number = %draft.order_number))]
    pub async fn create_order(&self, draft: &OrderDraft) -> Result<OrderId, ContentError> {
        let body = json!({
            "mutations": [{ "create": Self::order_document(draft) }]
        });

        let response = self
            .inner
            .client
            .post(format!("{}?returnIds=true", self.inner.mutate_endpoint))
            .bearer_auth(&self.inner.api_token)
            .json(&body)
            .send()
            .await?;

        let body = Self::check_response(response).await?;
        let envelope: MutateResponse = serde_json::from_str(&body)?;

        envelope
            .results
            .into_iter()
            .next()
            .map(|result| OrderId::new(result.id))
            .ok_or_else(|| ContentError::Api {
                status: 200,
                message: "mutation response contained no created document".to_string(),
            })
    }

    /// Build the order document in the content store's schema.
    fn order_document(draft: &OrderDraft) -> Value {
        let items: Vec<Value> = draft
            .items
            .iter()
            .map(|item| {
                json!({
                    "_type": "orderItem",
                    "_key": Uuid::new_v4().to_string(),
                    "product": { "_type": "reference", "_ref": item.product_id },
                    "quantity": item.quantity,
                    "price": item.price,
                })
            })
            .collect();

        let mut doc = json!({
            "_type": "order",
            "orderNumber": draft.order_number,
            "items": items,
            "total": draft.total,
            "status": draft.status,
            "shippingAddress": draft.shipping_address,
            "createdAt": draft.created_at,
        });

        if let Some(ref user) = draft.user_ref
            && let Some(map) = doc.as_object_mut()
        {
            map.insert(
                "user".to_string(),
                json!({ "_type": "reference", "_ref": user }),
            );
        }

        doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use comforty_core::{OrderItem, OrderStatus, ShippingAddress, UserId};
    use rust_decimal::Decimal;

    fn draft(user_ref: Option<UserId>) -> OrderDraft {
        OrderDraft {
            order_number: "CMF-TEST0001".to_string(),
            items: vec![OrderItem {
                product_id: ProductId::new("prod-1"),
                quantity: 2,
                price: Decimal::from(20),
            }],
            total: Decimal::from(40),
            status: OrderStatus::Processing,
            shipping_address: ShippingAddress {
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                phone: "03001234567".to_string(),
                address: "12 Analytical Way".to_string(),
                city: "London".to_string(),
                state: "LDN".to_string(),
                postal_code: "54000".to_string(),
                country: "UK".to_string(),
            },
            created_at: Utc::now(),
            user_ref,
        }
    }

    #[test]
    fn test_order_document_shape() {
        let doc = ContentClient::order_document(&draft(None));
        assert_eq!(doc["_type"], "order");
        assert_eq!(doc["status"], "processing");
        assert_eq!(doc["items"][0]["product"]["_ref"], "prod-1");
        assert_eq!(doc["items"][0]["quantity"], 2);
        assert_eq!(doc["shippingAddress"]["firstName"], "Ada");
        assert!(doc.get("user").is_none());
    }

    #[test]
    fn test_order_document_includes_user_reference() {
        let doc = ContentClient::order_document(&draft(Some(UserId::new("user-7"))));
        assert_eq!(doc["user"]["_type"], "reference");
        assert_eq!(doc["user"]["_ref"], "user-7");
    }

    #[test]
    fn test_mutate_response_decodes() {
        let body = r#"{"transactionId":"tx-1","results":[{"id":"order-abc","operation":"create"}]}"#;
        let envelope: MutateResponse = serde_json::from_str(body).expect("decode");
        assert_eq!(envelope.results[0].id, "order-abc");
    }

    #[test]
    fn test_query_response_null_result_is_none() {
        let body = r#"{"ms":3,"query":"...","result":null}"#;
        let envelope: QueryResponse<Option<Product>> =
            serde_json::from_str(body).expect("decode");
        assert!(envelope.result.is_none());
    }
}
