use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A course offered by a bootcamp. `bootcamp` holds the parent document id;
/// `tuition` feeds the parent's `averageCost` aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Store-assigned document id; `None` until first persisted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub weeks: String,
    pub tuition: f64,
    #[serde(default)]
    pub minimum_skill: CourseSkillLevel,
    #[serde(default)]
    pub scholarship_available: bool,
    pub created_at: DateTime<Utc>,
    pub bootcamp: String,
}

impl Course {
    pub fn new(
        title: String,
        description: String,
        weeks: String,
        tuition: f64,
        bootcamp: String,
    ) -> Self {
        Self {
            id: None,
            title,
            description,
            weeks,
            tuition,
            minimum_skill: CourseSkillLevel::default(),
            scholarship_available: false,
            created_at: Utc::now(),
            bootcamp,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseSkillLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}
