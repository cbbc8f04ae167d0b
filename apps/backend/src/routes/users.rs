use actix_web::{web, HttpResponse, Result};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::extractors::CurrentIdentity;
use crate::services::{tasks as tasks_service, users as users_service};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// POST /api/user/register (public)
async fn register(
    req: web::Json<RegisterRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = app_state.require_db()?;
    let response =
        users_service::register_user(db, &req.name, &req.last_name, &req.email, &req.password)
            .await?;
    Ok(HttpResponse::Created().json(response))
}

/// POST /api/user/login (public) — returns a fresh access token.
async fn login(
    req: web::Json<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = app_state.require_db()?;
    let token =
        users_service::login_user(db, &app_state.security, &req.email, &req.password).await?;
    Ok(HttpResponse::Ok().json(LoginResponse { token }))
}

/// GET /api/user/tasks — tasks the current principal executes.
async fn my_tasks(
    identity: CurrentIdentity,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = app_state.require_db()?;
    let tasks = tasks_service::list_by_executor(db, &identity.0.email).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/register", web::post().to(register))
        .route("/login", web::post().to(login))
        .route("/tasks", web::get().to(my_tasks));
}
