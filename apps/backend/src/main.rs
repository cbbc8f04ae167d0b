use actix_web::{web, App, HttpServer};
use taskboard::auth::policy::AuthorizationPolicy;
use taskboard::infra::db::connect_db;
use taskboard::middleware::{cors_middleware, AuthResolve, RequestTrace, RouteGuard};
use taskboard::routes;
use taskboard::state::app_state::AppState;
use taskboard::state::security_config::SecurityConfig;
use taskboard::telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: via compose env_file or docker run --env-file
    // - Local dev: source an env file manually (set -a; . ./.env; set +a)
    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("BACKEND_PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse::<u16>()
        .unwrap_or_else(|_| {
            eprintln!("BACKEND_PORT must be a valid port number");
            std::process::exit(1);
        });

    let jwt = match std::env::var("BACKEND_JWT_SECRET") {
        Ok(jwt) => jwt,
        Err(_) => {
            eprintln!("BACKEND_JWT_SECRET must be set");
            std::process::exit(1);
        }
    };
    let admin_key = std::env::var("ADMIN_SECRET_KEY").unwrap_or_default();
    let security_config = SecurityConfig::new(jwt.as_bytes()).with_admin_key(admin_key);

    let db = match connect_db().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Failed to connect to database: {e}");
            std::process::exit(1);
        }
    };
    tracing::info!(host = %host, port, "starting taskboard backend");

    let data = web::Data::new(AppState::new(db, security_config));

    // Middleware wrapped later runs earlier, so this registration order
    // executes as: CORS -> RequestTrace -> AuthResolve -> RouteGuard.
    HttpServer::new(move || {
        App::new()
            .wrap(RouteGuard::new(AuthorizationPolicy::default_matrix()))
            .wrap(AuthResolve)
            .wrap(RequestTrace)
            .wrap(cors_middleware())
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
