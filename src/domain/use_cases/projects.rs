use std::sync::Arc;

use validator::Validate;

use crate::{
    entities::project::{NewProject, Project, ProjectPatch},
    errors::AppError,
    repositories::record_store::{Collection, RecordStore},
};

pub struct ProjectsHandler {
    store: Arc<dyn RecordStore>,
}

impl ProjectsHandler {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        ProjectsHandler { store }
    }

    /// Lists every project, newest first.
    pub async fn list_projects(&self) -> Result<Vec<Project>, AppError> {
        let docs = self.store.list(Collection::Projects).await?;
        docs.into_iter().map(Project::from_document).collect()
    }

    pub async fn get_project(&self, id: &str) -> Result<Project, AppError> {
        let doc = self
            .store
            .get(Collection::Projects, id)
            .await
            .map_err(project_not_found)?;

        Project::from_document(doc)
    }

    /// Validates and persists a new project, returning the stored record
    /// including its assigned id and timestamps.
    pub async fn create_project(&self, request: NewProject) -> Result<Project, AppError> {
        request.validate()?;

        let data = serde_json::to_value(&request)?;
        let doc = self.store.insert(Collection::Projects, data).await?;

        Project::from_document(doc)
    }

    /// Merges only the provided fields into an existing project.
    pub async fn update_project(&self, id: &str, patch: &ProjectPatch) -> Result<(), AppError> {
        let patch_value = serde_json::to_value(patch)?;

        self.store
            .patch(Collection::Projects, id, patch_value)
            .await
            .map_err(project_not_found)
    }

    pub async fn delete_project(&self, id: &str) -> Result<(), AppError> {
        self.store.delete(Collection::Projects, id).await
    }
}

fn project_not_found(e: AppError) -> AppError {
    match e {
        AppError::NotFound(_) => AppError::NotFound("Project not found".to_string()),
        _ => e,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::local::LocalStore;
    use tempfile::TempDir;

    fn handler() -> (TempDir, ProjectsHandler) {
        let dir = TempDir::new().expect("temp dir");
        let store = Arc::new(LocalStore::new(dir.path()).expect("local store"));
        (dir, ProjectsHandler::new(store))
    }

    fn valid_project() -> NewProject {
        NewProject {
            title: "X".into(),
            description: "Y".into(),
            tech_stack: vec!["A".into()],
            image_url: "http://i".into(),
            github_url: "http://g".into(),
            live_demo_url: "http://l".into(),
            featured: false,
        }
    }

    #[tokio::test]
    async fn created_project_round_trips_through_get_by_id() {
        let (_dir, handler) = handler();

        let created = handler.create_project(valid_project()).await.unwrap();
        let fetched = handler.get_project(&created.id).await.unwrap();

        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.title, "X");
        assert_eq!(fetched.tech_stack, vec!["A".to_string()]);
        assert_eq!(fetched.live_demo_url, "http://l");
        assert!(!fetched.featured);
    }

    #[tokio::test]
    async fn create_with_missing_field_persists_nothing() {
        let (_dir, handler) = handler();

        let mut request = valid_project();
        request.title = String::new();

        let err = handler.create_project(request).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));

        let mut request = valid_project();
        request.tech_stack = Vec::new();

        let err = handler.create_project(request).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));

        assert!(handler.list_projects().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_changes_only_the_given_field() {
        let (_dir, handler) = handler();
        let created = handler.create_project(valid_project()).await.unwrap();

        let patch = ProjectPatch {
            title: Some("New".into()),
            ..Default::default()
        };
        handler.update_project(&created.id, &patch).await.unwrap();

        let updated = handler.get_project(&created.id).await.unwrap();
        assert_eq!(updated.title, "New");
        assert_eq!(updated.description, created.description);
        assert_eq!(updated.tech_stack, created.tech_stack);
        assert_eq!(updated.image_url, created.image_url);
        assert_eq!(updated.featured, created.featured);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn update_of_unknown_id_fails_with_not_found() {
        let (_dir, handler) = handler();

        let patch = ProjectPatch {
            title: Some("Z".into()),
            ..Default::default()
        };
        let err = handler.update_project("nonexistent-id", &patch).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn deleted_project_is_gone() {
        let (_dir, handler) = handler();
        let created = handler.create_project(valid_project()).await.unwrap();

        handler.delete_project(&created.id).await.unwrap();

        let err = handler.get_project(&created.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn list_returns_exactly_the_created_record() {
        let (_dir, handler) = handler();
        let created = handler.create_project(valid_project()).await.unwrap();

        let all = handler.list_projects().await.unwrap();

        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, created.id);
        assert_eq!(all[0].title, "X");
        assert_eq!(all[0].description, "Y");
    }
}
