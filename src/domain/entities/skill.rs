use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{errors::AppError, repositories::record_store::StoredDocument};

/// A named group of skill tags, e.g. "Languages" → ["Rust", "TypeScript"].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillCategory {
    pub id: String,
    pub category: String,
    pub skills: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl SkillCategory {
    pub fn from_document(doc: StoredDocument) -> Result<Self, AppError> {
        let payload: NewSkillCategory = serde_json::from_value(doc.data)
            .map_err(|e| AppError::InternalError(format!("Corrupt skill record {}: {}", doc.id, e)))?;

        Ok(SkillCategory {
            id: doc.id,
            category: payload.category,
            skills: payload.skills,
            created_at: doc.created_at,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct NewSkillCategory {
    #[validate(length(min = 1, max = 100, message = "Category cannot be empty"))]
    pub category: String,

    #[validate(length(min = 1, message = "Skills must have at least one entry"))]
    pub skills: Vec<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SkillCategoryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
}
