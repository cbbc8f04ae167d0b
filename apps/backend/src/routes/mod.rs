use actix_web::web;

pub mod admin;
pub mod health;
pub mod tasks;
pub mod users;

/// Register all application routes.
///
/// `main.rs` wraps the whole App with the auth pipeline (resolve +
/// guard), so the same registrations serve production and the
/// integration tests, which build the identical chain.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/user").configure(users::configure_routes));
    cfg.service(web::scope("/api/tasks").configure(tasks::configure_routes));
    cfg.service(web::scope("/api/admin").configure(admin::configure_routes));
    cfg.configure(health::configure_routes);
}
