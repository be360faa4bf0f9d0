use std::sync::Arc;

use crate::{
    constants::ABOUT_PROFILE_ID,
    entities::about::{AboutPatch, AboutProfile},
    errors::AppError,
    repositories::record_store::{Collection, RecordStore},
};

pub struct AboutHandler {
    store: Arc<dyn RecordStore>,
}

impl AboutHandler {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        AboutHandler { store }
    }

    /// Retrieves the singleton profile. Fails with `NotFound` until the
    /// first merge-update has created it.
    pub async fn get_profile(&self) -> Result<AboutProfile, AppError> {
        let doc = self
            .store
            .get(Collection::About, ABOUT_PROFILE_ID)
            .await
            .map_err(|e| match e {
                AppError::NotFound(_) => AppError::NotFound("About profile not found".to_string()),
                _ => e,
            })?;

        AboutProfile::from_document(doc)
    }

    /// Merge-updates the profile: fields absent from the patch stay
    /// untouched; the record is created on first write.
    pub async fn update_profile(&self, patch: &AboutPatch) -> Result<(), AppError> {
        let patch_value = serde_json::to_value(patch)?;

        self.store
            .merge_set(Collection::About, ABOUT_PROFILE_ID, patch_value)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::about::ExperienceEntry;
    use crate::repositories::local::LocalStore;
    use tempfile::TempDir;

    fn handler() -> (TempDir, AboutHandler) {
        let dir = TempDir::new().expect("temp dir");
        let store = Arc::new(LocalStore::new(dir.path()).expect("local store"));
        (dir, AboutHandler::new(store))
    }

    #[tokio::test]
    async fn profile_is_absent_until_first_update() {
        let (_dir, handler) = handler();

        let err = handler.get_profile().await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn merge_updates_leave_missing_fields_untouched() {
        let (_dir, handler) = handler();

        handler
            .update_profile(&AboutPatch {
                bio: Some("hello".into()),
                experience: Some(vec![ExperienceEntry {
                    title: "Engineer".into(),
                    company: "Acme".into(),
                    period: "2020-2023".into(),
                    description: "Built things".into(),
                }]),
                profile_image_url: None,
            })
            .await
            .unwrap();

        handler
            .update_profile(&AboutPatch {
                bio: None,
                experience: None,
                profile_image_url: Some("http://img".into()),
            })
            .await
            .unwrap();

        let profile = handler.get_profile().await.unwrap();
        assert_eq!(profile.bio, "hello");
        assert_eq!(profile.experience.len(), 1);
        assert_eq!(profile.experience[0].company, "Acme");
        assert_eq!(profile.profile_image_url, "http://img");
    }
}
