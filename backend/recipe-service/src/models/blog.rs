use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{count_to_u64, RankedContent};

/// Per-serving nutrition facts
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbohydrates: Option<f64>,
    pub fats: Option<f64>,
}

impl Nutrition {
    pub fn is_empty(&self) -> bool {
        self.calories.is_none()
            && self.protein.is_none()
            && self.carbohydrates.is_none()
            && self.fats.is_none()
    }
}

/// A recipe blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub description: String,
    pub image: String,
    pub category: String,
    /// Minutes
    pub prep_time: i32,
    /// Minutes
    pub cooking_time: i32,
    pub servings: Option<i32>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<Nutrition>,
    pub views: i64,
    pub likes: Vec<Uuid>,
    pub dislikes: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewBlog {
    pub author_id: Uuid,
    pub title: String,
    pub description: String,
    pub image: String,
    pub category: String,
    pub prep_time: i32,
    pub cooking_time: i32,
    pub servings: Option<i32>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub nutrition: Option<Nutrition>,
}

/// Partial update; `None` leaves the stored value untouched
#[derive(Debug, Clone, Default)]
pub struct BlogUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub prep_time: Option<i32>,
    pub cooking_time: Option<i32>,
    pub servings: Option<i32>,
    pub ingredients: Option<Vec<String>>,
    pub instructions: Option<Vec<String>>,
    pub nutrition: Option<Nutrition>,
}

impl RankedContent for Blog {
    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn like_count(&self) -> u64 {
        self.likes.len() as u64
    }

    fn view_count(&self) -> u64 {
        count_to_u64(self.views)
    }

    fn category(&self) -> &str {
        &self.category
    }
}
