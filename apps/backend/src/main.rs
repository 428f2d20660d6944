use actix_web::{web, App, HttpServer};
use identity::config::db::DbProfile;
use identity::config::{AppConfig, UsersStore};
use identity::infra::state::build_state;
use identity::middleware::{RequestTrace, StructuredLogger, TraceSpan};
use identity::routes;
use identity::state::security_config::SecurityConfig;
use tracing::{error, info};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    // (docker env_file, or `set -a; . ./.env; set +a` locally).
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let security = match SecurityConfig::from_env() {
        Ok(security) => security,
        Err(e) => {
            error!(error = %e, "signing keys unavailable");
            std::process::exit(1);
        }
    };

    let builder = build_state(security).with_bcrypt_cost(config.bcrypt_cost);
    let builder = match config.users_store {
        UsersStore::Postgres => builder.with_db(DbProfile::Prod),
        UsersStore::Memory => builder,
    };
    let app_state = match builder.build().await {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };

    info!(
        host = %config.host,
        port = config.port,
        store = ?config.users_store,
        issuer = %app_state.security.issuer,
        "starting identity service"
    );

    let tokens = app_state.tokens.clone();
    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        let tokens = tokens.clone();
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(|cfg| routes::configure(cfg, tokens))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
