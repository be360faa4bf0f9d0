use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::message::NewMessage,
    errors::AppError,
    use_cases::extractors::AdminClaims,
    AppState,
};

/// Public endpoint: any visitor may leave a message.
#[instrument(skip(state, data))]
pub async fn create_message(
    state: web::Data<AppState>,
    data: web::Json<NewMessage>,
) -> Result<impl Responder, AppError> {
    let receipt = state.messages_handler.create_message(data.into_inner()).await?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "success": true,
        "message": receipt.message,
        "data": { "id": receipt.id }
    })))
}

#[instrument(skip(_claims, state))]
pub async fn get_all_messages(
    _claims: AdminClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let messages = state.messages_handler.list_messages().await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "data": messages
    })))
}

#[instrument(skip(_claims, message_id, state))]
pub async fn mark_message_read(
    _claims: AdminClaims,
    message_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let message = state.messages_handler.mark_as_read(&message_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Message marked as read",
        "data": message
    })))
}

#[instrument(skip(_claims, message_id, state))]
pub async fn delete_message(
    _claims: AdminClaims,
    message_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.messages_handler.delete_message(&message_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Message deleted successfully"
    })))
}
