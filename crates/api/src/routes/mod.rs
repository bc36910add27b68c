pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /login                     POST   credential check (session-less)
///
/// /{resource}                GET    list in documented order
///                            POST   create (201, returns the row)
/// /{resource}/{id}           GET    fetch one (404 when absent)
///                            PUT    full replace (405 for gallery, messages)
///                            DELETE idempotent delete (204)
/// ```
///
/// `{resource}` is resolved against the static registry; unknown slugs
/// answer 404. The static `/login` segment wins over the `{resource}`
/// capture.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::auth::login))
        .route(
            "/{resource}",
            get(handlers::content::list).post(handlers::content::create),
        )
        .route(
            "/{resource}/{id}",
            get(handlers::content::get)
                .put(handlers::content::update)
                .delete(handlers::content::remove),
        )
}

/// Mount the upload-serving route (intended for root level, NOT under `/api`).
pub fn upload_routes() -> Router<AppState> {
    Router::new().route(
        "/uploads/{category}/{filename}",
        get(handlers::uploads::serve),
    )
}
