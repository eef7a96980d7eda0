use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::auth::guard::CurrentUser;
use crate::error::Error;
use crate::models::{Story, StoryDraft, UserInfo};
use crate::stories::{can_modify, Stories};
use crate::store::Datastore;
use crate::AppState;

/// Render context for story listings.
#[derive(Debug, Serialize)]
pub struct StoriesContext {
    pub stories: Vec<Story>,
}

/// Render context for a single story. `can_edit` is the ownership hint the
/// presentation layer uses to show edit/delete affordances.
#[derive(Debug, Serialize)]
pub struct StoryContext {
    pub story: Story,
    pub owner: Option<UserInfo>,
    pub can_edit: bool,
}

/// Render context for the edit form.
#[derive(Debug, Serialize)]
pub struct EditContext {
    pub story: Story,
}

/// All public stories, newest first.
pub async fn index<S: Datastore>(
    State(state): State<AppState<S>>,
    _: CurrentUser,
) -> Result<Json<StoriesContext>, Error> {
    let stories = Stories::new(state.store.clone()).list_public().await?;
    Ok(Json(StoriesContext { stories }))
}

pub async fn create<S: Datastore>(
    State(state): State<AppState<S>>,
    CurrentUser(user): CurrentUser,
    Json(draft): Json<StoryDraft>,
) -> Result<(StatusCode, Json<Story>), Error> {
    let story = Stories::new(state.store.clone()).create(&user, &draft).await?;
    Ok((StatusCode::CREATED, Json(story)))
}

pub async fn show<S: Datastore>(
    State(state): State<AppState<S>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<StoryContext>, Error> {
    let story = Stories::new(state.store.clone()).get_one(&user, id).await?;
    let owner = state.store.user(story.owner_id).await?;
    let can_edit = can_modify(&user, &story);
    Ok(Json(StoryContext {
        story,
        owner: owner.map(|o| o.to_info()),
        can_edit,
    }))
}

/// Edit-form context, owner only.
pub async fn edit<S: Datastore>(
    State(state): State<AppState<S>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<EditContext>, Error> {
    let story = Stories::new(state.store.clone()).get_one(&user, id).await?;
    if !can_modify(&user, &story) {
        return Err(Error::Forbidden);
    }
    Ok(Json(EditContext { story }))
}

pub async fn update<S: Datastore>(
    State(state): State<AppState<S>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(draft): Json<StoryDraft>,
) -> Result<Json<Story>, Error> {
    let story = Stories::new(state.store.clone())
        .update(&user, id, &draft)
        .await?;
    Ok(Json(story))
}

pub async fn destroy<S: Datastore>(
    State(state): State<AppState<S>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, Error> {
    Stories::new(state.store.clone()).delete(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// One author's public stories.
pub async fn by_user<S: Datastore>(
    State(state): State<AppState<S>>,
    _: CurrentUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<StoriesContext>, Error> {
    let stories = Stories::new(state.store.clone())
        .list_public_by_owner(user_id)
        .await?;
    Ok(Json(StoriesContext { stories }))
}
