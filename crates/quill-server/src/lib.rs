#![forbid(unsafe_code)]
//! Quill HTTP service: public blog pages plus a password-guarded admin area
//! over the flat-file document store. State is loaded from disk per request
//! and written back whole on mutation; concurrent admin writes race and the
//! last save wins, which is the documented contract for a single operator.

use axum::http::StatusCode;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use quill_store::{DocumentStore, StoreError};
use std::sync::Arc;
use thiserror::Error;
use tracing::error;

mod config;
mod cookies;
mod flash;
mod http;
mod middleware;
mod session;

pub use config::{validate_startup_config, AppConfig};
pub use session::SessionStore;

pub const CRATE_NAME: &str = "quill-server";

/// Store write failures are the one error category that surfaces to the
/// client; everything else in the store self-heals.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("request failed: {self}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(http::render::error_page()),
        )
            .into_response()
    }
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DocumentStore>,
    pub config: Arc<AppConfig>,
    pub(crate) sessions: SessionStore,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self::with_config(store, AppConfig::default())
    }

    #[must_use]
    pub fn with_config(store: Arc<DocumentStore>, config: AppConfig) -> Self {
        let sessions = SessionStore::new(config.session_ttl);
        Self {
            store,
            config: Arc::new(config),
            sessions,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let admin = Router::new()
        .route("/logout", get(http::handlers::logout_handler))
        .route("/admin", get(http::handlers::dashboard_handler))
        .route(
            "/admin/new_post",
            get(http::handlers::new_post_form_handler).post(http::handlers::new_post_submit_handler),
        )
        .route(
            "/admin/edit_post/:post_id",
            get(http::handlers::edit_post_form_handler)
                .post(http::handlers::edit_post_submit_handler),
        )
        .route(
            "/admin/delete_post/:post_id",
            get(http::handlers::delete_post_handler),
        )
        .route(
            "/admin/ads",
            get(http::handlers::ads_handler).post(http::handlers::add_ad_handler),
        )
        .route(
            "/admin/delete_ad/:ad_id",
            get(http::handlers::delete_ad_handler),
        )
        .route(
            "/admin/settings",
            get(http::handlers::settings_form_handler)
                .post(http::handlers::settings_submit_handler),
        )
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware::auth::require_login,
        ));

    Router::new()
        .route("/", get(http::handlers::index_handler))
        .route("/post/:post_id", get(http::handlers::post_view_handler))
        .route(
            "/login",
            get(http::handlers::login_form_handler).post(http::handlers::login_submit_handler),
        )
        .merge(admin)
        .layer(from_fn(middleware::request_log::request_log_middleware))
        .with_state(state)
}
