//! Product catalog records and listing filters.
//!
//! The catalog itself is fetched by the embedding application; this module
//! only understands the payload shape (`{ "products": [...] }`) and
//! implements the listing rules applied on top of it:
//!
//! - [`filter_products`] - case-insensitive search over title and category
//! - [`top_rated`] - products rated 4.0 or better, best first

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tote_core::{Price, ProductId};

/// Minimum rating for a product to appear in the top-rated listing.
pub const TOP_RATED_MIN_RATING: f64 = 4.0;

/// Errors that can occur when decoding a catalog payload.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog file could not be read.
    #[error("failed to read catalog {path}: {source}")]
    Read {
        /// File being read.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Payload is not valid JSON or a record has the wrong shape.
    #[error("invalid catalog payload: {0}")]
    Parse(#[from] serde_json::Error),

    /// Payload is an object without a `products` array.
    #[error("catalog payload has no `products` field")]
    MissingProducts,

    /// Payload is neither an object nor an array.
    #[error("catalog payload must be an object or an array")]
    UnexpectedShape,
}

/// A product record as served by the catalog API.
///
/// Only `id` is required. Fields this type does not model are kept in
/// [`Product::extra`] so a record stored inside a cart line survives a
/// save/load cycle unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    /// Unmodelled fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    /// Create a product with only an id, title and price set.
    #[must_use]
    pub fn new(id: ProductId, title: impl Into<String>, price: Option<Price>) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            category: String::new(),
            price,
            discount_percentage: None,
            rating: None,
            stock: None,
            tags: Vec::new(),
            brand: None,
            thumbnail: None,
            images: Vec::new(),
            extra: Map::new(),
        }
    }

    /// The image shown for this product: the first gallery image, falling
    /// back to the thumbnail.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images
            .first()
            .map(String::as_str)
            .or(self.thumbnail.as_deref())
    }

    /// Whether `query` matches this product's title or category,
    /// ignoring case. The empty query matches every product.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let needle = query.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.category.to_lowercase().contains(&needle)
    }
}

/// Decode a catalog payload.
///
/// Accepts the API envelope `{ "products": [...] }` or a bare array of
/// product records.
///
/// # Errors
///
/// Returns a [`CatalogError`] if the payload is not JSON, has no product
/// list, or contains a malformed record.
pub fn decode_products(json: &str) -> Result<Vec<Product>, CatalogError> {
    let value: Value = serde_json::from_str(json)?;
    let list = match value {
        Value::Object(mut envelope) => envelope
            .remove("products")
            .ok_or(CatalogError::MissingProducts)?,
        array @ Value::Array(_) => array,
        _ => return Err(CatalogError::UnexpectedShape),
    };
    Ok(serde_json::from_value(list)?)
}

/// Read and decode a catalog payload from a file.
///
/// # Errors
///
/// Returns [`CatalogError::Read`] if the file cannot be read, or any error
/// from [`decode_products`].
pub fn load_products(path: &Path) -> Result<Vec<Product>, CatalogError> {
    let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.display().to_string(),
        source,
    })?;
    decode_products(&json)
}

/// Find a product by id.
#[must_use]
pub fn find_product(products: &[Product], id: ProductId) -> Option<&Product> {
    products.iter().find(|p| p.id == id)
}

/// Products whose title or category contains `query`, case-insensitively,
/// in catalog order.
#[must_use]
pub fn filter_products<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    products.iter().filter(|p| p.matches(query)).collect()
}

/// Products rated at least [`TOP_RATED_MIN_RATING`], highest rating first.
///
/// Ties keep catalog order. Unrated products are excluded.
#[must_use]
pub fn top_rated(products: &[Product]) -> Vec<&Product> {
    let mut rated: Vec<&Product> = products
        .iter()
        .filter(|p| p.rating.is_some_and(|r| r >= TOP_RATED_MIN_RATING))
        .collect();
    rated.sort_by(|a, b| {
        b.rating
            .unwrap_or_default()
            .total_cmp(&a.rating.unwrap_or_default())
    });
    rated
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{
        "products": [
            {"id": 1, "title": "Essence Mascara Lash Princess", "category": "beauty",
             "price": 9.99, "rating": 4.94, "stock": 5, "tags": ["beauty", "mascara"],
             "images": ["https://cdn.example.com/1/1.png"],
             "thumbnail": "https://cdn.example.com/1/thumb.png",
             "discountPercentage": 7.17, "sku": "RCH45Q1A"},
            {"id": "2", "title": "Eyeshadow Palette", "category": "beauty",
             "price": 19.99, "rating": 3.28,
             "thumbnail": "https://cdn.example.com/2/thumb.png"},
            {"id": 3, "title": "Wooden Bathroom Sink", "category": "furniture",
             "price": 799.99, "rating": 4.94},
            {"id": 4, "title": "Apple", "category": "groceries", "price": 1.99}
        ],
        "total": 4, "skip": 0, "limit": 30
    }"#;

    #[test]
    fn test_decode_envelope() {
        let products = decode_products(PAYLOAD).unwrap();
        assert_eq!(products.len(), 4);
        assert_eq!(products[1].id, ProductId::new(2));
        assert_eq!(products[0].discount_percentage, Some(7.17));
        assert_eq!(
            products[0].extra.get("sku"),
            Some(&Value::String("RCH45Q1A".to_string()))
        );
    }

    #[test]
    fn test_decode_bare_array() {
        let products = decode_products(r#"[{"id": 5}]"#).unwrap();
        assert_eq!(products[0].id, ProductId::new(5));
        assert!(products[0].title.is_empty());
        assert!(products[0].price.is_none());
    }

    #[test]
    fn test_decode_errors() {
        assert!(matches!(
            decode_products(r#"{"items": []}"#),
            Err(CatalogError::MissingProducts)
        ));
        assert!(matches!(
            decode_products("42"),
            Err(CatalogError::UnexpectedShape)
        ));
        assert!(matches!(
            decode_products("{not json"),
            Err(CatalogError::Parse(_))
        ));
        assert!(matches!(
            decode_products(r#"[{"title": "no id"}]"#),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_record_round_trip_keeps_unknown_fields() {
        let products = decode_products(PAYLOAD).unwrap();
        let json = serde_json::to_string(&products[0]).unwrap();
        let back: Product = serde_json::from_str(&json).unwrap();
        assert_eq!(back, products[0]);
        assert!(json.contains("\"sku\":\"RCH45Q1A\""));
        assert!(json.contains("\"discountPercentage\""));
    }

    #[test]
    fn test_primary_image_falls_back_to_thumbnail() {
        let products = decode_products(PAYLOAD).unwrap();
        assert_eq!(
            products[0].primary_image(),
            Some("https://cdn.example.com/1/1.png")
        );
        assert_eq!(
            products[1].primary_image(),
            Some("https://cdn.example.com/2/thumb.png")
        );
        assert_eq!(products[2].primary_image(), None);
    }

    #[test]
    fn test_filter_matches_title_or_category_case_insensitive() {
        let products = decode_products(PAYLOAD).unwrap();

        let by_title = filter_products(&products, "MASCARA");
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].id, ProductId::new(1));

        let by_category = filter_products(&products, "Furn");
        assert_eq!(by_category.len(), 1);
        assert_eq!(by_category[0].id, ProductId::new(3));

        assert!(filter_products(&products, "laptop").is_empty());
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let products = decode_products(PAYLOAD).unwrap();
        assert_eq!(filter_products(&products, "").len(), products.len());
    }

    #[test]
    fn test_untrimmed_query_is_not_trimmed() {
        let products = decode_products(PAYLOAD).unwrap();
        assert!(filter_products(&products, " apple ").is_empty());
    }

    #[test]
    fn test_top_rated_sorted_and_stable() {
        let products = decode_products(PAYLOAD).unwrap();
        let ids: Vec<u64> = top_rated(&products).iter().map(|p| p.id.as_u64()).collect();
        // 1 and 3 tie at 4.94 and keep catalog order; 2 (3.28) and 4 (unrated) drop out
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_find_product() {
        let products = decode_products(PAYLOAD).unwrap();
        assert!(find_product(&products, ProductId::new(3)).is_some());
        assert!(find_product(&products, ProductId::new(99)).is_none());
    }
}
