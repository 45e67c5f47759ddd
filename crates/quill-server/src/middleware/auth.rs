// SPDX-License-Identifier: Apache-2.0

use crate::flash::Flash;
use crate::http::handlers::redirect_with_flash;
use crate::AppState;
use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Gate in front of every admin route: requests without a live session are
/// bounced to the login page before the wrapped handler runs at all.
pub(crate) async fn require_login(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if state.sessions.authenticated(request.headers()).await {
        next.run(request).await
    } else {
        redirect_with_flash("/login", &Flash::error("Please log in first"))
    }
}
