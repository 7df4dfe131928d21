use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user review of a bootcamp. `rating` is 1–10 and feeds the parent's
/// `averageRating` aggregate; range enforcement belongs to the inbound
/// validation layer, not this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Store-assigned document id; `None` until first persisted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub text: String,
    pub rating: f64,
    pub created_at: DateTime<Utc>,
    pub bootcamp: String,
    pub user: String,
}

impl Review {
    pub fn new(title: String, text: String, rating: f64, bootcamp: String, user: String) -> Self {
        Self {
            id: None,
            title,
            text,
            rating,
            created_at: Utc::now(),
            bootcamp,
            user,
        }
    }
}
