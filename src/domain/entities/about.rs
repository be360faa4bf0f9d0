use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{errors::AppError, repositories::record_store::StoredDocument};

/// The singleton about-profile record, built up by merge-updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutProfile {
    pub bio: String,
    pub experience: Vec<ExperienceEntry>,
    #[serde(rename = "profileImageURL")]
    pub profile_image_url: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub period: String,
    pub description: String,
}

/// Field shape of the stored profile document. Every field defaults so a
/// profile that has only ever seen a partial merge still deserializes.
#[derive(Debug, Default, Deserialize)]
struct AboutContent {
    #[serde(default)]
    bio: String,
    #[serde(default)]
    experience: Vec<ExperienceEntry>,
    #[serde(default, rename = "profileImageURL")]
    profile_image_url: String,
}

impl AboutProfile {
    pub fn from_document(doc: StoredDocument) -> Result<Self, AppError> {
        let payload: AboutContent = serde_json::from_value(doc.data)
            .map_err(|e| AppError::InternalError(format!("Corrupt about profile: {}", e)))?;

        Ok(AboutProfile {
            bio: payload.bio,
            experience: payload.experience,
            profile_image_url: payload.profile_image_url,
            updated_at: doc.updated_at,
        })
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AboutPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<Vec<ExperienceEntry>>,

    #[serde(rename = "profileImageURL", skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
}
