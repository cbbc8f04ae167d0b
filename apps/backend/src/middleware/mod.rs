pub mod auth_resolve;
pub mod cors;
pub mod request_trace;
pub mod route_guard;

pub use auth_resolve::AuthResolve;
pub use cors::cors_middleware;
pub use request_trace::RequestTrace;
pub use route_guard::RouteGuard;
