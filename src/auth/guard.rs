//! # Route guards
//!
//! Two extractors evaluated before a handler body runs. Both only resolve
//! the current session and branch; neither reads or writes any resource
//! state. A missing identity on a guarded route is a routing decision
//! (redirect to the login entry), never an error; the inverse guard sends
//! signed-in users to their dashboard. Storage failures while resolving do
//! surface as errors rather than being treated as anonymous access.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use tower_sessions::Session;

use crate::auth::session::resolve;
use crate::models::User;
use crate::store::Datastore;
use crate::AppState;

/// Requires a signed-in user; rejects with a redirect to the login entry.
pub struct CurrentUser(pub User);

impl<S: Datastore> FromRequestParts<AppState<S>> for CurrentUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<S>,
    ) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        match resolve(&session, &state.store).await {
            Ok(Some(user)) => Ok(CurrentUser(user)),
            Ok(None) => Err(Redirect::to("/").into_response()),
            Err(err) => Err(err.into_response()),
        }
    }
}

/// Requires the absence of an identity; signed-in users are redirected to
/// their dashboard.
pub struct Guest;

impl<S: Datastore> FromRequestParts<AppState<S>> for Guest {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<S>,
    ) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        match resolve(&session, &state.store).await {
            Ok(None) => Ok(Guest),
            Ok(Some(_)) => Err(Redirect::to("/dashboard").into_response()),
            Err(err) => Err(err.into_response()),
        }
    }
}
