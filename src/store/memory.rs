//! In-memory [`Datastore`] for testing.
//!
//! Mirrors the Postgres backend's per-call atomicity with a mutex around
//! each table. Stories are kept in creation order, so the newest-first
//! listings just walk the vector backwards.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{Profile, Story, StoryDraft, StoryStatus, User};

use super::Datastore;

#[derive(Debug)]
struct LoginState {
    verifier: String,
    expires_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    users: Arc<Mutex<Vec<User>>>,
    stories: Arc<Mutex<Vec<Story>>>,
    login_states: Arc<Mutex<HashMap<String, LoginState>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Datastore for MemoryStore {
    async fn upsert_user(
        &self,
        external_id: &str,
        profile: &Profile,
    ) -> Result<User, StoreError> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.external_id == external_id) {
            user.display_name = profile.display_name.clone();
            user.first_name = profile.first_name.clone();
            user.image = profile.image.clone();
            user.updated_at = Utc::now();
            return Ok(user.clone());
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            external_id: external_id.to_string(),
            display_name: profile.display_name.clone(),
            first_name: profile.first_name.clone(),
            image: profile.image.clone(),
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn insert_story(
        &self,
        owner_id: Uuid,
        draft: &StoryDraft,
    ) -> Result<Story, StoreError> {
        let story = Story {
            id: Uuid::new_v4(),
            title: draft.title.clone(),
            body: draft.body.clone(),
            status: draft.status,
            owner_id,
            created_at: Utc::now(),
        };
        self.stories.lock().unwrap().push(story.clone());
        Ok(story)
    }

    async fn story(&self, id: Uuid) -> Result<Option<Story>, StoreError> {
        let stories = self.stories.lock().unwrap();
        Ok(stories.iter().find(|s| s.id == id).cloned())
    }

    async fn stories_by_owner(&self, owner_id: Uuid) -> Result<Vec<Story>, StoreError> {
        let stories = self.stories.lock().unwrap();
        Ok(stories
            .iter()
            .rev()
            .filter(|s| s.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn public_stories(&self) -> Result<Vec<Story>, StoreError> {
        let stories = self.stories.lock().unwrap();
        Ok(stories
            .iter()
            .rev()
            .filter(|s| s.status == StoryStatus::Public)
            .cloned()
            .collect())
    }

    async fn public_stories_by_owner(&self, owner_id: Uuid) -> Result<Vec<Story>, StoreError> {
        let stories = self.stories.lock().unwrap();
        Ok(stories
            .iter()
            .rev()
            .filter(|s| s.owner_id == owner_id && s.status == StoryStatus::Public)
            .cloned()
            .collect())
    }

    async fn update_story(
        &self,
        id: Uuid,
        draft: &StoryDraft,
    ) -> Result<Option<Story>, StoreError> {
        let mut stories = self.stories.lock().unwrap();
        Ok(stories.iter_mut().find(|s| s.id == id).map(|story| {
            story.title = draft.title.clone();
            story.body = draft.body.clone();
            story.status = draft.status;
            story.clone()
        }))
    }

    async fn delete_story(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut stories = self.stories.lock().unwrap();
        let before = stories.len();
        stories.retain(|s| s.id != id);
        Ok(stories.len() < before)
    }

    async fn save_login_state(
        &self,
        state: &str,
        verifier: &str,
        ttl: Duration,
    ) -> Result<(), StoreError> {
        self.login_states.lock().unwrap().insert(
            state.to_string(),
            LoginState {
                verifier: verifier.to_string(),
                expires_at: Utc::now() + ttl,
            },
        );
        Ok(())
    }

    async fn take_login_state(&self, state: &str) -> Result<Option<String>, StoreError> {
        let taken = self.login_states.lock().unwrap().remove(state);
        Ok(taken
            .filter(|s| s.expires_at > Utc::now())
            .map(|s| s.verifier))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: &str) -> Profile {
        Profile {
            display_name: name.to_string(),
            first_name: name.split(' ').next().unwrap_or(name).to_string(),
            image: None,
        }
    }

    #[tokio::test]
    async fn upsert_is_find_or_create() {
        let store = MemoryStore::new();

        let first = store.upsert_user("ext-1", &profile("Ada Lovelace")).await.unwrap();
        let second = store
            .upsert_user(
                "ext-1",
                &Profile {
                    display_name: "Ada L.".into(),
                    first_name: "Ada".into(),
                    image: Some("https://example.com/ada.png".into()),
                },
            )
            .await
            .unwrap();

        // Same identity, refreshed profile
        assert_eq!(first.id, second.id);
        assert_eq!(second.display_name, "Ada L.");
        assert_eq!(second.image.as_deref(), Some("https://example.com/ada.png"));

        let other = store.upsert_user("ext-2", &profile("Grace Hopper")).await.unwrap();
        assert_ne!(other.id, first.id);
    }

    #[tokio::test]
    async fn upsert_preserves_created_at() {
        let store = MemoryStore::new();
        let first = store.upsert_user("ext-1", &profile("Ada")).await.unwrap();
        let second = store.upsert_user("ext-1", &profile("Ada")).await.unwrap();
        assert_eq!(first.created_at, second.created_at);
    }

    #[tokio::test]
    async fn login_state_is_consumed_once() {
        let store = MemoryStore::new();
        store
            .save_login_state("csrf-1", "verifier-1", Duration::minutes(10))
            .await
            .unwrap();

        assert_eq!(
            store.take_login_state("csrf-1").await.unwrap().as_deref(),
            Some("verifier-1")
        );
        assert!(store.take_login_state("csrf-1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn expired_login_state_is_gone() {
        let store = MemoryStore::new();
        store
            .save_login_state("csrf-2", "verifier-2", Duration::minutes(-1))
            .await
            .unwrap();

        assert!(store.take_login_state("csrf-2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unknown_login_state_is_none() {
        let store = MemoryStore::new();
        assert!(store.take_login_state("nope").await.unwrap().is_none());
    }
}
