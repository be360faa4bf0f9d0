use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{errors::AppError, repositories::record_store::StoredDocument};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub tech_stack: Vec<String>,
    #[serde(rename = "imageURL")]
    pub image_url: String,
    #[serde(rename = "githubURL")]
    pub github_url: String,
    #[serde(rename = "liveDemoURL")]
    pub live_demo_url: String,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    pub fn from_document(doc: StoredDocument) -> Result<Self, AppError> {
        let payload: NewProject = serde_json::from_value(doc.data)
            .map_err(|e| AppError::InternalError(format!("Corrupt project record {}: {}", doc.id, e)))?;

        Ok(Project {
            id: doc.id,
            title: payload.title,
            description: payload.description,
            tech_stack: payload.tech_stack,
            image_url: payload.image_url,
            github_url: payload.github_url,
            live_demo_url: payload.live_demo_url,
            featured: payload.featured,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    #[validate(length(min = 1, max = 200, message = "Title cannot be empty"))]
    pub title: String,

    #[validate(length(min = 1, max = 5000, message = "Description cannot be empty"))]
    pub description: String,

    #[validate(length(min = 1, message = "Tech stack must have at least one tag"))]
    pub tech_stack: Vec<String>,

    #[serde(rename = "imageURL")]
    #[validate(url(message = "imageURL must be a valid URL"))]
    pub image_url: String,

    #[serde(rename = "githubURL")]
    #[validate(url(message = "githubURL must be a valid URL"))]
    pub github_url: String,

    #[serde(rename = "liveDemoURL")]
    #[validate(url(message = "liveDemoURL must be a valid URL"))]
    pub live_demo_url: String,

    #[serde(default)]
    pub featured: bool,
}

/// Partial update. `None` means "leave unchanged"; a present value is
/// written even when it is empty or false, so a field can deliberately
/// be cleared.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tech_stack: Option<Vec<String>>,

    #[serde(rename = "imageURL", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(rename = "githubURL", skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,

    #[serde(rename = "liveDemoURL", skip_serializing_if = "Option::is_none")]
    pub live_demo_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}
