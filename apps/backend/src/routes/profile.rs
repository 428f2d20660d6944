use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::services::users::Profile;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct ProfileResponse {
    message: &'static str,
    user: Profile,
}

async fn get_profile(
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user = app_state.users.get_profile(&current_user.sub).await?;
    Ok(HttpResponse::Ok().json(ProfileResponse {
        message: "success",
        user,
    }))
}

/// Mounted under the `RequireAuth` gate.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(get_profile));
}
