//! GROQ query builders for the content store.
//!
//! Every product query shares one projection so list and detail responses
//! deserialize into the same [`comforty_core::Product`] shape. User input is
//! escaped before interpolation - GROQ has no bound parameters on the query
//! endpoint we use, so these builders are the only place raw strings enter a
//! query.

use comforty_core::{CategoryId, OrderId, ProductId};

/// Featured products shown on the home page.
pub const FEATURED_LIMIT: usize = 4;

/// Related products shown under a product detail.
pub const RELATED_LIMIT: usize = 4;

const PRODUCT_PROJECTION: &str = r#"{
  _id,
  title,
  price,
  "oldPrice": priceWithoutDiscount,
  "image": image.asset->url,
  description,
  "status": badge,
  inventory,
  tags,
  category->{
    _id,
    title
  }
}"#;

const CATEGORY_PROJECTION: &str = r#"{
  _id,
  title,
  "image": image.asset->url,
  "products": count(*[_type == "products" && references(^._id)])
}"#;

/// Escape a string for interpolation inside a double-quoted GROQ literal.
fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// All products.
#[must_use]
pub fn products() -> String {
    format!(r#"*[_type == "products"]{PRODUCT_PROJECTION}"#)
}

/// Products tagged `featured`, capped at [`FEATURED_LIMIT`].
#[must_use]
pub fn featured_products() -> String {
    format!(r#"*[_type == "products" && "featured" in tags]{PRODUCT_PROJECTION}[0...{FEATURED_LIMIT}]"#)
}

/// A single product by document ID, or null.
#[must_use]
pub fn product_by_id(id: &ProductId) -> String {
    format!(
        r#"*[_type == "products" && _id == "{}"][0]{PRODUCT_PROJECTION}"#,
        escape(id.as_str())
    )
}

/// Products referencing the given category.
#[must_use]
pub fn products_by_category(category_id: &CategoryId) -> String {
    format!(
        r#"*[_type == "products" && category._ref == "{}"]{PRODUCT_PROJECTION}"#,
        escape(category_id.as_str())
    )
}

/// Products other than the given one, capped at [`RELATED_LIMIT`].
#[must_use]
pub fn related_products(product_id: &ProductId) -> String {
    format!(
        r#"*[_type == "products" && _id != "{}"]{PRODUCT_PROJECTION}[0...{RELATED_LIMIT}]"#,
        escape(product_id.as_str())
    )
}

/// Case-insensitive substring match over title and description.
#[must_use]
pub fn search_products(term: &str) -> String {
    let term = escape(term);
    format!(
        r#"*[_type == "products" && (title match "*{term}*" || description match "*{term}*")]{PRODUCT_PROJECTION}"#
    )
}

/// All categories, with referencing-product counts.
#[must_use]
pub fn categories() -> String {
    format!(r#"*[_type == "categories"]{CATEGORY_PROJECTION}"#)
}

/// A single category by document ID, or null.
#[must_use]
pub fn category_by_id(id: &CategoryId) -> String {
    format!(
        r#"*[_type == "categories" && _id == "{}"][0]{CATEGORY_PROJECTION}"#,
        escape(id.as_str())
    )
}

const ORDER_PROJECTION: &str = r#"{
  _id,
  orderNumber,
  "items": items[]{
    "productId": product._ref,
    quantity,
    price
  },
  total,
  status,
  shippingAddress,
  createdAt,
  "userRef": user._ref
}"#;

/// A single order by document ID, or null.
#[must_use]
pub fn order_by_id(id: &OrderId) -> String {
    format!(
        r#"*[_type == "order" && _id == "{}"][0]{ORDER_PROJECTION}"#,
        escape(id.as_str())
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_by_id_interpolates() {
        let query = product_by_id(&ProductId::new("prod-1"));
        assert!(query.contains(r#"_id == "prod-1""#));
        assert!(query.contains("[0]"));
    }

    #[test]
    fn test_featured_is_capped() {
        let query = featured_products();
        assert!(query.contains(r#""featured" in tags"#));
        assert!(query.ends_with("[0...4]"));
    }

    #[test]
    fn test_related_excludes_self() {
        let query = related_products(&ProductId::new("prod-9"));
        assert!(query.contains(r#"_id != "prod-9""#));
        assert!(query.ends_with("[0...4]"));
    }

    #[test]
    fn test_search_escapes_quotes() {
        let query = search_products(r#"chair" || _type == "user"#);
        // The quote must not terminate the GROQ string literal.
        assert!(query.contains(r#"*chair\" || _type == \"user*"#));
    }

    #[test]
    fn test_order_by_id_dereferences_items() {
        let query = order_by_id(&OrderId::new("order-1"));
        assert!(query.contains(r#"_type == "order""#));
        assert!(query.contains(r#""productId": product._ref"#));
    }

    #[test]
    fn test_search_escapes_backslashes() {
        let query = search_products(r"back\slash");
        assert!(query.contains(r"back\\slash"));
    }
}
