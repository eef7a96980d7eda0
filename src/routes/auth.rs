use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::response::Redirect;
use tower_sessions::Session;

use crate::auth::session::{bind, terminate};
use crate::store::Datastore;
use crate::AppState;

/// Kick off the Google sign-in flow.
pub async fn google_login<S: Datastore>(State(state): State<AppState<S>>) -> Redirect {
    match state.oauth.authorize_url(&state.store).await {
        Ok(url) => Redirect::to(&url),
        Err(err) => {
            tracing::error!("failed to start google login: {err}");
            Redirect::to("/?error=login_unavailable")
        }
    }
}

/// Finish the Google sign-in flow: consume the pending state, exchange the
/// code, find-or-create the user, bind the session. No user record is
/// created and no session is bound on any failure path.
pub async fn google_callback<S: Datastore>(
    State(state): State<AppState<S>>,
    Query(params): Query<HashMap<String, String>>,
    session: Session,
) -> Redirect {
    let Some(code) = params.get("code") else {
        tracing::error!("google callback missing code");
        return Redirect::to("/?error=missing_code");
    };
    let Some(csrf_state) = params.get("state") else {
        tracing::error!("google callback missing state");
        return Redirect::to("/?error=missing_state");
    };

    let identity = match state
        .oauth
        .exchange_code(&state.store, code, csrf_state)
        .await
    {
        Ok(identity) => identity,
        Err(err) => {
            tracing::error!("google oauth exchange failed: {err}");
            return Redirect::to("/?error=oauth_error");
        }
    };

    let user = match state
        .store
        .upsert_user(&identity.external_id, &identity.profile)
        .await
    {
        Ok(user) => user,
        Err(err) => {
            tracing::error!("failed to persist user on login: {err}");
            return Redirect::to("/?error=login_failed");
        }
    };

    if let Err(err) = bind(&session, &user).await {
        tracing::error!("failed to bind session: {err}");
        return Redirect::to("/?error=session_error");
    }

    Redirect::to("/dashboard")
}

/// Log out and return to the landing page.
pub async fn logout(session: Session) -> Redirect {
    if let Err(err) = terminate(&session).await {
        tracing::error!("failed to terminate session: {err}");
    }
    Redirect::to("/")
}
