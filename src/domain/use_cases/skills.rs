use std::sync::Arc;

use validator::Validate;

use crate::{
    entities::skill::{NewSkillCategory, SkillCategory, SkillCategoryPatch},
    errors::AppError,
    repositories::record_store::{Collection, RecordStore},
};

pub struct SkillsHandler {
    store: Arc<dyn RecordStore>,
}

impl SkillsHandler {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        SkillsHandler { store }
    }

    /// Lists skill categories in insertion order.
    pub async fn list_skills(&self) -> Result<Vec<SkillCategory>, AppError> {
        let docs = self.store.list(Collection::Skills).await?;
        docs.into_iter().map(SkillCategory::from_document).collect()
    }

    pub async fn create_skill_category(
        &self,
        request: NewSkillCategory,
    ) -> Result<SkillCategory, AppError> {
        request.validate()?;

        let data = serde_json::to_value(&request)?;
        let doc = self.store.insert(Collection::Skills, data).await?;

        SkillCategory::from_document(doc)
    }

    pub async fn update_skill_category(
        &self,
        id: &str,
        patch: &SkillCategoryPatch,
    ) -> Result<(), AppError> {
        let patch_value = serde_json::to_value(patch)?;

        self.store
            .patch(Collection::Skills, id, patch_value)
            .await
            .map_err(skill_category_not_found)
    }

    pub async fn delete_skill_category(&self, id: &str) -> Result<(), AppError> {
        self.store.delete(Collection::Skills, id).await
    }
}

fn skill_category_not_found(e: AppError) -> AppError {
    match e {
        AppError::NotFound(_) => AppError::NotFound("Skill category not found".to_string()),
        _ => e,
    }
}
