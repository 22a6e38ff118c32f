//! Product domain model

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;

/// A catalog product, either decoded from the remote API or stored locally
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub title: String,
    #[serde(serialize_with = "serialize_price", deserialize_with = "deserialize_price")]
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Image URL (remote records only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Review summary returned by the remote API; kept so saved records round-trip
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    #[serde(serialize_with = "serialize_price", deserialize_with = "deserialize_price")]
    pub rate: Decimal,
    pub count: u32,
}

/// Product payload without an id, used for creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub title: String,
    #[serde(serialize_with = "serialize_price", deserialize_with = "deserialize_price")]
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Partial product fields for updates; absent fields are not sent
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_optional_price"
    )]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Product {
    /// Build a product from a draft and an assigned id
    pub fn from_draft(id: i64, draft: ProductDraft) -> Self {
        Self {
            id,
            title: draft.title,
            price: draft.price,
            description: draft.description,
            image: draft.image,
            category: draft.category,
            rating: None,
        }
    }
}

impl ProductDraft {
    pub fn new(title: impl Into<String>, price: Decimal) -> Self {
        Self {
            title: title.into(),
            price,
            description: None,
            image: None,
            category: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Validate draft data
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty() {
            return Err("product title cannot be empty");
        }
        if self.price.is_sign_negative() {
            return Err("product price cannot be negative");
        }
        Ok(())
    }
}

impl ProductPatch {
    /// True when no field would be sent
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.price.is_none()
            && self.description.is_none()
            && self.image.is_none()
            && self.category.is_none()
    }
}

/// Deserialize a price that can be a JSON number or a numeric string
fn deserialize_price<'de, D>(deserializer: D) -> std::result::Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let value: JsonValue = Deserialize::deserialize(deserializer)?;
    let text = match value {
        JsonValue::Number(n) => n.to_string(),
        JsonValue::String(s) => s,
        _ => return Err(D::Error::custom("expected number or string for price")),
    };
    parse_decimal(text.trim()).map_err(D::Error::custom)
}

fn parse_decimal(text: &str) -> std::result::Result<Decimal, String> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|e| format!("invalid decimal '{}': {}", text, e))
}

/// Prices are written as plain JSON numbers, like the remote API sends them
///
/// Fractional values go through `f64`, so only about 15 significant digits
/// survive a save/load cycle. Catalog prices are far below that.
fn serialize_price<S>(price: &Decimal, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    use serde::ser::Error;
    let normalized = price.normalize();
    if normalized.scale() == 0 {
        if let Some(whole) = normalized.to_i64() {
            return serializer.serialize_i64(whole);
        }
    }
    let value = normalized
        .to_f64()
        .ok_or_else(|| S::Error::custom(format!("price {} out of range", price)))?;
    serializer.serialize_f64(value)
}

fn serialize_optional_price<S>(
    price: &Option<Decimal>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match price {
        Some(p) => serialize_price(p, serializer),
        None => serializer.serialize_none(),
    }
}
