use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A bootcamp: the parent entity of the directory.
///
/// `average_cost` and `average_rating` are derived fields, never supplied by
/// a client, owned by the aggregate engine for the document's lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bootcamp {
    /// Store-assigned document id; `None` until first persisted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub careers: Vec<Career>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<BootcampLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_cost: Option<f64>,
    #[serde(default = "default_photo")]
    pub photo: String,
    #[serde(default)]
    pub housing: bool,
    #[serde(default)]
    pub job_assistance: bool,
    #[serde(default)]
    pub job_guarantee: bool,
    #[serde(default)]
    pub accept_gi: bool,
    pub created_at: DateTime<Utc>,
}

fn default_photo() -> String {
    "no-photo.jpg".to_string()
}

impl Bootcamp {
    pub fn new(name: String, description: String) -> Self {
        Self {
            id: None,
            name,
            description,
            website: None,
            phone: None,
            email: None,
            careers: Vec::new(),
            location: None,
            average_rating: None,
            average_cost: None,
            photo: default_photo(),
            housing: false,
            job_assistance: false,
            job_guarantee: false,
            accept_gi: false,
            created_at: Utc::now(),
        }
    }
}

/// The closed set of career tracks a bootcamp may list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Career {
    #[serde(rename = "Web Development")]
    WebDevelopment,
    #[serde(rename = "Mobile Development")]
    MobileDevelopment,
    #[serde(rename = "UI/UX")]
    UiUx,
    #[serde(rename = "Data Science")]
    DataScience,
    Business,
    Other,
}

/// GeoJSON-style point produced by the (external) geocoding collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BootcampLocation {
    #[serde(rename = "type")]
    pub location_type: String,
    pub coordinates: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zipcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}
