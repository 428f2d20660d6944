use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use identity::infra::state::build_state;
use identity::middleware::{RequestTrace, StructuredLogger, TraceSpan};
use identity::routes;
use identity::state::app_state::AppState;

use super::keys;

/// In-memory state signed with the primary fixture keys. bcrypt runs at its
/// minimum cost to keep tests fast.
pub async fn test_state() -> AppState {
    build_state(keys::security_config())
        .with_bcrypt_cost(4)
        .build()
        .await
        .expect("in-memory state should build")
}

/// The production middleware stack and routes over `state`.
pub async fn create_test_app(
    state: AppState,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error> {
    let tokens = state.tokens.clone();
    let data = web::Data::new(state);

    test::init_service(
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data)
            .configure(|cfg| routes::configure(cfg, tokens)),
    )
    .await
}
