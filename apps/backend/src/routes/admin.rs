use actix_web::{web, HttpRequest, HttpResponse, Result};
use serde::Deserialize;

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::services::{tasks as tasks_service, users as users_service};
use crate::state::app_state::AppState;

const ADMIN_KEY_HEADER: &str = "X-Admin-Key";

#[derive(Debug, Deserialize)]
pub struct RegisterAdminRequest {
    pub email: String,
}

/// POST /api/admin/create-admin
///
/// Double-gated: the route matrix admits any authenticated user, then
/// the shared admin key decides. Both a missing and a wrong key map to
/// the same 403 so the header's presence leaks nothing.
async fn create_admin(
    http_req: HttpRequest,
    req: web::Json<RegisterAdminRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let presented = http_req
        .headers()
        .get(ADMIN_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if app_state.security.admin_key.is_empty() || presented != app_state.security.admin_key {
        return Err(AppError::forbidden_with(
            ErrorCode::InvalidAdminKey,
            "Invalid admin key.",
        ));
    }

    let db = app_state.require_db()?;
    users_service::promote_to_admin(db, &req.email).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Admin role granted" })))
}

/// GET /api/admin/users (admin only via the route guard)
async fn list_users(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = app_state.require_db()?;
    let users = users_service::list_users(db).await?;
    Ok(HttpResponse::Ok().json(users))
}

/// GET /api/admin/tasks (admin only via the route guard)
async fn list_tasks(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = app_state.require_db()?;
    let tasks = tasks_service::list_all(db).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/create-admin", web::post().to(create_admin))
        .route("/users", web::get().to(list_users))
        .route("/tasks", web::get().to(list_tasks));
}
