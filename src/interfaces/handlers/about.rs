use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::about::AboutPatch,
    errors::AppError,
    use_cases::extractors::AdminClaims,
    AppState,
};

#[instrument(skip(state))]
pub async fn get_about(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let profile = state.about_handler.get_profile().await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "data": profile
    })))
}

#[instrument(skip(_claims, state, data))]
pub async fn update_about(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    data: web::Json<AboutPatch>,
) -> Result<impl Responder, AppError> {
    state.about_handler.update_profile(&data.into_inner()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "About profile updated successfully"
    })))
}
