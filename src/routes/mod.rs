//! # Route layer
//!
//! The axum router. Handlers stay thin: guards establish identity, the
//! story repository applies the ownership rules, and each success path
//! produces the render-context shape the presentation layer expects
//! (`{user, stories}`, `{story, owner, can_edit}`, ...). Auth flows answer
//! with redirects, the way a browser app expects.

pub mod auth;
pub mod pages;
pub mod stories;

use axum::routing::get;
use axum::Router;

use crate::store::Datastore;
use crate::AppState;

/// Build the application router. The caller attaches the session layer and
/// the state.
pub fn router<S: Datastore>() -> Router<AppState<S>> {
    Router::new()
        .route("/", get(pages::login::<S>))
        .route("/dashboard", get(pages::dashboard::<S>))
        .route("/auth/google", get(auth::google_login::<S>))
        .route("/auth/google/callback", get(auth::google_callback::<S>))
        .route("/auth/logout", get(auth::logout))
        .route(
            "/stories",
            get(stories::index::<S>).post(stories::create::<S>),
        )
        .route(
            "/stories/{id}",
            get(stories::show::<S>)
                .put(stories::update::<S>)
                .delete(stories::destroy::<S>),
        )
        .route("/stories/{id}/edit", get(stories::edit::<S>))
        .route("/stories/user/{user_id}", get(stories::by_user::<S>))
}
