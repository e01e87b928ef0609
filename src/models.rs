// src/models.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single question/answer pair in the knowledge base.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub id: String,
    pub category_id: String,
    pub question: String,
    pub answer: String,
    pub views: u64,
}

impl FaqEntry {
    /// Creates a fresh entry with a generated id and zero views.
    pub fn new(
        category_id: impl Into<String>,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        FaqEntry {
            id: Uuid::new_v4().to_string(),
            category_id: category_id.into(),
            question: question.into(),
            answer: answer.into(),
            views: 0,
        }
    }

    /// Builds a seed entry with a fixed id and a carried-over view count.
    pub fn seeded(
        id: &str,
        category_id: &str,
        question: &str,
        answer: &str,
        views: u64,
    ) -> Self {
        FaqEntry {
            id: id.to_string(),
            category_id: category_id.to_string(),
            question: question.to_string(),
            answer: answer.to_string(),
            views,
        }
    }
}

/// Category grouping for FAQ entries. No CRUD surface exists for these.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl Category {
    pub fn new(id: &str, name: &str, description: &str) -> Self {
        Category {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Admin,
}

/// An authenticated session identity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageAuthor {
    User,
    Bot,
}

/// Logs details of each API call.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiCallLog {
    pub timestamp: DateTime<Utc>,
    pub endpoint: String,
    pub request_summary: String,
    pub response_status: u16,
    pub response_time_ms: u128,
}
