use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::skill::{NewSkillCategory, SkillCategoryPatch},
    errors::AppError,
    use_cases::extractors::AdminClaims,
    AppState,
};

#[instrument(skip(state))]
pub async fn get_all_skills(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let skills = state.skills_handler.list_skills().await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "data": skills
    })))
}

#[instrument(skip(_claims, state, data))]
pub async fn create_skill_category(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    data: web::Json<NewSkillCategory>,
) -> Result<impl Responder, AppError> {
    let category = state
        .skills_handler
        .create_skill_category(data.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "success": true,
        "message": "Skill category created successfully",
        "data": category
    })))
}

#[instrument(skip(_claims, category_id, state, data))]
pub async fn update_skill_category(
    _claims: AdminClaims,
    category_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<SkillCategoryPatch>,
) -> Result<impl Responder, AppError> {
    state
        .skills_handler
        .update_skill_category(&category_id, &data.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Skill category updated successfully"
    })))
}

#[instrument(skip(_claims, category_id, state))]
pub async fn delete_skill_category(
    _claims: AdminClaims,
    category_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.skills_handler.delete_skill_category(&category_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Skill category deleted successfully"
    })))
}
