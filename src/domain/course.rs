use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A course in the learning catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    pub duration: String,
    /// Completion percentage, 0 to 100.
    #[serde(default)]
    pub progress: u32,
    pub lessons: u32,
    #[serde(default)]
    pub completed_lessons: u32,
    pub instructor: String,
    pub price: f64,
    pub is_published: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a new course.
#[derive(Debug, Clone)]
pub struct CourseCreate {
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    pub duration: String,
    pub lessons: u32,
    pub instructor: String,
    pub price: f64,
}

/// Fields to merge into an existing course. `None` leaves a field as is.
#[derive(Debug, Clone, Default)]
pub struct CoursePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub duration: Option<String>,
    pub lessons: Option<u32>,
    pub instructor: Option<String>,
    pub price: Option<f64>,
    pub is_published: Option<bool>,
    pub is_active: Option<bool>,
}

impl Course {
    /// Visible in the catalog: published and not deactivated.
    pub fn is_listed(&self) -> bool {
        self.is_published && self.is_active
    }
}
