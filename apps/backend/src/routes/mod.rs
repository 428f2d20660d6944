use actix_web::web;

use crate::auth::jwt::TokenService;
use crate::middleware::auth_gate::RequireAuth;

pub mod auth;
pub mod health;
pub mod profile;

/// Register every route. Scopes under `/profile` sit behind the
/// authorization gate; everything else is public.
pub fn configure(cfg: &mut web::ServiceConfig, tokens: TokenService) {
    cfg.configure(health::configure_routes);

    cfg.service(web::scope("/auth").configure(auth::configure_routes));

    cfg.service(
        web::scope("/profile")
            .wrap(RequireAuth::new(tokens))
            .configure(profile::configure_routes),
    );
}
