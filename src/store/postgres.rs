//! PostgreSQL implementation of [`Datastore`].
//!
//! Every method is one SQL statement, so per-record atomicity comes straight
//! from Postgres. `upsert_user` is the find-or-create contract: the
//! `ON CONFLICT` upsert either inserts a fresh row or refreshes the profile
//! fields of the existing one, and `RETURNING *` hands back whichever row
//! won.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{Profile, Story, StoryDraft, User};

use super::Datastore;

#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl Datastore for PgStore {
    async fn upsert_user(
        &self,
        external_id: &str,
        profile: &Profile,
    ) -> Result<User, StoreError> {
        let user: User = sqlx::query_as(
            r#"
            INSERT INTO users (external_id, display_name, first_name, image)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (external_id)
            DO UPDATE SET
                display_name = EXCLUDED.display_name,
                first_name = EXCLUDED.first_name,
                image = EXCLUDED.image,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(external_id)
        .bind(&profile.display_name)
        .bind(&profile.first_name)
        .bind(&profile.image)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn insert_story(
        &self,
        owner_id: Uuid,
        draft: &StoryDraft,
    ) -> Result<Story, StoreError> {
        let story: Story = sqlx::query_as(
            r#"
            INSERT INTO stories (title, body, status, owner_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&draft.title)
        .bind(&draft.body)
        .bind(draft.status.as_str())
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(story)
    }

    async fn story(&self, id: Uuid) -> Result<Option<Story>, StoreError> {
        let story: Option<Story> = sqlx::query_as("SELECT * FROM stories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(story)
    }

    async fn stories_by_owner(&self, owner_id: Uuid) -> Result<Vec<Story>, StoreError> {
        let stories: Vec<Story> = sqlx::query_as(
            "SELECT * FROM stories WHERE owner_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(stories)
    }

    async fn public_stories(&self) -> Result<Vec<Story>, StoreError> {
        let stories: Vec<Story> = sqlx::query_as(
            "SELECT * FROM stories WHERE status = 'public' ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(stories)
    }

    async fn public_stories_by_owner(&self, owner_id: Uuid) -> Result<Vec<Story>, StoreError> {
        let stories: Vec<Story> = sqlx::query_as(
            r#"
            SELECT * FROM stories
            WHERE status = 'public' AND owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(stories)
    }

    async fn update_story(
        &self,
        id: Uuid,
        draft: &StoryDraft,
    ) -> Result<Option<Story>, StoreError> {
        let story: Option<Story> = sqlx::query_as(
            r#"
            UPDATE stories
            SET title = $2, body = $3, status = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&draft.title)
        .bind(&draft.body)
        .bind(draft.status.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(story)
    }

    async fn delete_story(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM stories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn save_login_state(
        &self,
        state: &str,
        verifier: &str,
        ttl: Duration,
    ) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO oauth_states (state, pkce_verifier, expires_at) VALUES ($1, $2, $3)",
        )
        .bind(state)
        .bind(verifier)
        .bind(Utc::now() + ttl)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn take_login_state(&self, state: &str) -> Result<Option<String>, StoreError> {
        let row: Option<(String,)> = sqlx::query_as(
            r#"
            DELETE FROM oauth_states
            WHERE state = $1 AND expires_at > NOW()
            RETURNING pkce_verifier
            "#,
        )
        .bind(state)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(verifier,)| verifier))
    }
}
