//! # Durable-store seam
//!
//! [`Datastore`] is the single boundary between the service and its durable
//! state. All reads and writes for users, stories and pending OAuth login
//! state go through this trait, so the same logic runs against PostgreSQL in
//! production ([`PgStore`]) and against an in-memory backend in the test
//! suite ([`MemoryStore`]).
//!
//! Each method is a single atomic operation on one record; there are no
//! multi-record transactions. Concurrent writes to the same record serialize
//! in the backend and the last committed write wins. Session records are not
//! handled here: they live in the session store behind
//! `tower-sessions-sqlx-store`.

mod memory;
mod postgres;

use std::future::Future;

use chrono::Duration;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{Profile, Story, StoryDraft, User};

pub use memory::MemoryStore;
pub use postgres::PgStore;

pub trait Datastore: Clone + Send + Sync + 'static {
    /// Find the user with this external identifier, overwriting the profile
    /// fields, or create a fresh record. Durable before returning.
    fn upsert_user(
        &self,
        external_id: &str,
        profile: &Profile,
    ) -> impl Future<Output = Result<User, StoreError>> + Send;

    fn user(&self, id: Uuid) -> impl Future<Output = Result<Option<User>, StoreError>> + Send;

    fn insert_story(
        &self,
        owner_id: Uuid,
        draft: &StoryDraft,
    ) -> impl Future<Output = Result<Story, StoreError>> + Send;

    fn story(&self, id: Uuid) -> impl Future<Output = Result<Option<Story>, StoreError>> + Send;

    /// All stories owned by this user, newest first.
    fn stories_by_owner(
        &self,
        owner_id: Uuid,
    ) -> impl Future<Output = Result<Vec<Story>, StoreError>> + Send;

    /// All public stories, newest first.
    fn public_stories(&self) -> impl Future<Output = Result<Vec<Story>, StoreError>> + Send;

    /// Public stories of one author, newest first.
    fn public_stories_by_owner(
        &self,
        owner_id: Uuid,
    ) -> impl Future<Output = Result<Vec<Story>, StoreError>> + Send;

    /// Overwrite title, body and status. Owner and creation time are never
    /// touched. Returns `None` when the story no longer exists.
    fn update_story(
        &self,
        id: Uuid,
        draft: &StoryDraft,
    ) -> impl Future<Output = Result<Option<Story>, StoreError>> + Send;

    /// Returns `false` when the story was already gone.
    fn delete_story(&self, id: Uuid) -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// Persist a pending OAuth login state (CSRF state + PKCE verifier).
    fn save_login_state(
        &self,
        state: &str,
        verifier: &str,
        ttl: Duration,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Atomically consume a pending login state, returning its verifier.
    /// Unknown or expired states yield `None`.
    fn take_login_state(
        &self,
        state: &str,
    ) -> impl Future<Output = Result<Option<String>, StoreError>> + Send;
}
