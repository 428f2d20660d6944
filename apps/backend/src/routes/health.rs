use actix_web::{web, HttpResponse};

/// Liveness check; never touches storage.
async fn healthz() -> HttpResponse {
    HttpResponse::Ok().finish()
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/healthz", web::get().to(healthz));
}
