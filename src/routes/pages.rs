use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

use crate::auth::guard::{CurrentUser, Guest};
use crate::error::Error;
use crate::models::{Story, UserInfo};
use crate::stories::Stories;
use crate::store::Datastore;
use crate::AppState;

/// Render context for the dashboard view.
#[derive(Debug, Serialize)]
pub struct DashboardContext {
    pub user: UserInfo,
    pub stories: Vec<Story>,
}

/// Login landing page. Signed-in visitors never reach this handler; the
/// guard sends them to the dashboard.
pub async fn login<S: Datastore>(_: Guest) -> Json<Value> {
    Json(json!({ "login": "/auth/google" }))
}

/// The requester's own stories, public and private alike.
pub async fn dashboard<S: Datastore>(
    State(state): State<AppState<S>>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<DashboardContext>, Error> {
    let stories = Stories::new(state.store.clone()).list_own(&user).await?;
    Ok(Json(DashboardContext {
        user: user.to_info(),
        stories,
    }))
}
