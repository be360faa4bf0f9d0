use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::{entities::token::Claims, errors::AuthError, settings::StorageMode, AppState};

/// Extractor for admin claims, gating every mutating handler.
/// Returns 401 if no valid bearer token is presented, 403 if the verified
/// identity lacks the admin claim. In demo mode the gate is bypassed with a
/// synthetic admin identity, so the product can be demoed without live
/// credentials.
#[derive(Debug)]
pub struct AdminClaims(pub Claims);

impl FromRequest for AdminClaims {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(admin_claims(req).map(AdminClaims))
    }
}

fn admin_claims(req: &HttpRequest) -> Result<Claims, actix_web::Error> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| {
            tracing::error!("AppState missing in AdminClaims extractor");
            AuthError::MissingJwtService
        })?;

    if state.mode == StorageMode::Demo {
        return Ok(Claims::demo_admin());
    }

    let token = extract_bearer(req).ok_or_else(|| {
        tracing::warn!("Missing or malformed Authorization header");
        AuthError::MissingCredentials
    })?;

    let claims = state.jwt_service.decode_token(&token)?.claims;

    if !claims.admin {
        tracing::warn!("Admin access denied for {}", claims.email);
        return Err(AuthError::Forbidden("Admin access required".into()).into());
    }

    Ok(claims)
}

fn extract_bearer(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .and_then(|header| {
            let parts: Vec<&str> = header.split_whitespace().collect();
            if parts.len() == 2 && parts[0].eq_ignore_ascii_case("bearer") {
                Some(parts[1].to_string())
            } else {
                None
            }
        })
}
