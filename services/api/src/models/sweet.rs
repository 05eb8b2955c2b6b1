//! Sweet inventory models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sweet entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sweet {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
}

/// New sweet creation payload
#[derive(Debug, Clone, Deserialize)]
pub struct NewSweet {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub quantity: i32,
}

/// Partial update payload; fields left out of the request are untouched
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SweetPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i32>,
}

impl SweetPatch {
    /// True when no field is supplied at all
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.price.is_none()
            && self.quantity.is_none()
    }
}

/// Query parameters for inventory search
///
/// All filters are optional and compose with logical AND; absent filters
/// are no-ops.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SweetSearch {
    pub name: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "minPrice")]
    pub min_price: Option<f64>,
    #[serde(rename = "maxPrice")]
    pub max_price: Option<f64>,
}

/// Request body for restocking a sweet
#[derive(Debug, Deserialize)]
pub struct RestockRequest {
    pub quantity: i32,
}
