use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::services::users::{LoginRequest, RegisterRequest};
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct RegisterResponse {
    message: &'static str,
    id: String,
}

#[derive(Debug, Serialize)]
struct LoginResponse {
    message: &'static str,
    token: String,
}

async fn register(
    req: ValidatedJson<RegisterRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = app_state.users.register(req.into_inner()).await?;
    Ok(HttpResponse::Created().json(RegisterResponse {
        message: "success",
        id,
    }))
}

async fn login(
    req: ValidatedJson<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let token = app_state.users.login(req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(LoginResponse {
        message: "success",
        token,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/register", web::post().to(register))
        .route("/login", web::post().to(login));
}
