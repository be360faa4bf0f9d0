use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::project::{NewProject, ProjectPatch},
    errors::AppError,
    use_cases::extractors::AdminClaims,
    AppState,
};

#[instrument(skip(state))]
pub async fn get_all_projects(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let projects = state.projects_handler.list_projects().await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "data": projects
    })))
}

#[instrument(skip(state, project_id))]
pub async fn get_project_by_id(
    project_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let project = state.projects_handler.get_project(&project_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "data": project
    })))
}

#[instrument(skip(_claims, state, data))]
pub async fn create_project(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    data: web::Json<NewProject>,
) -> Result<impl Responder, AppError> {
    let project = state.projects_handler.create_project(data.into_inner()).await?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "success": true,
        "message": "Project created successfully",
        "data": project
    })))
}

#[instrument(skip(_claims, project_id, state, data))]
pub async fn update_project(
    _claims: AdminClaims,
    project_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<ProjectPatch>,
) -> Result<impl Responder, AppError> {
    state
        .projects_handler
        .update_project(&project_id, &data.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Project updated successfully"
    })))
}

#[instrument(skip(_claims, project_id, state))]
pub async fn delete_project(
    _claims: AdminClaims,
    project_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.projects_handler.delete_project(&project_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Project deleted successfully"
    })))
}
