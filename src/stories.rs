//! # Story repository
//!
//! [`Stories`] wraps a [`Datastore`] and applies the ownership and
//! visibility rules to every operation. All callers arrive here already
//! authenticated (the guards run first); the `requester` argument is what
//! the rules are evaluated against.
//!
//! [`can_modify`] is the one ownership decision in the codebase. The
//! repository consults it for update and delete, and the handlers consult it
//! to compute the `can_edit` hint for the presentation layer, so enforcement
//! and UI hinting cannot drift apart.

use uuid::Uuid;

use crate::error::Error;
use crate::models::{Story, StoryDraft, StoryStatus, User};
use crate::store::Datastore;

/// True when the requester owns the story. The single source of truth for
/// modification rights.
pub fn can_modify(requester: &User, story: &Story) -> bool {
    story.owner_id == requester.id
}

/// Ownership-scoped story operations over a durable store.
pub struct Stories<S> {
    store: S,
}

impl<S: Datastore> Stories<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The requester's own stories, newest first. Empty is not an error.
    pub async fn list_own(&self, requester: &User) -> Result<Vec<Story>, Error> {
        Ok(self.store.stories_by_owner(requester.id).await?)
    }

    /// Every public story, newest first.
    pub async fn list_public(&self) -> Result<Vec<Story>, Error> {
        Ok(self.store.public_stories().await?)
    }

    /// One author's public stories, newest first.
    pub async fn list_public_by_owner(&self, owner_id: Uuid) -> Result<Vec<Story>, Error> {
        Ok(self.store.public_stories_by_owner(owner_id).await?)
    }

    /// Fetch one story, enforcing visibility: private stories are only
    /// readable by their owner.
    pub async fn get_one(&self, requester: &User, id: Uuid) -> Result<Story, Error> {
        let story = self.store.story(id).await?.ok_or(Error::NotFound)?;
        if story.status == StoryStatus::Private && !can_modify(requester, &story) {
            return Err(Error::Forbidden);
        }
        Ok(story)
    }

    /// Create a story owned by the requester.
    pub async fn create(&self, requester: &User, draft: &StoryDraft) -> Result<Story, Error> {
        draft.validate()?;
        Ok(self.store.insert_story(requester.id, draft).await?)
    }

    /// Overwrite the mutable fields of an owned story.
    pub async fn update(
        &self,
        requester: &User,
        id: Uuid,
        draft: &StoryDraft,
    ) -> Result<Story, Error> {
        draft.validate()?;
        let story = self.store.story(id).await?.ok_or(Error::NotFound)?;
        if !can_modify(requester, &story) {
            return Err(Error::Forbidden);
        }
        // The store can race a concurrent delete; report it as gone.
        self.store.update_story(id, draft).await?.ok_or(Error::NotFound)
    }

    /// Remove an owned story. Deleting twice reports `NotFound` the second
    /// time.
    pub async fn delete(&self, requester: &User, id: Uuid) -> Result<(), Error> {
        let story = self.store.story(id).await?.ok_or(Error::NotFound)?;
        if !can_modify(requester, &story) {
            return Err(Error::Forbidden);
        }
        if !self.store.delete_story(id).await? {
            return Err(Error::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    async fn user(store: &MemoryStore, ext: &str, name: &str) -> User {
        store
            .upsert_user(
                ext,
                &crate::models::Profile {
                    display_name: name.to_string(),
                    first_name: name.to_string(),
                    image: None,
                },
            )
            .await
            .unwrap()
    }

    fn draft(title: &str, body: &str, status: StoryStatus) -> StoryDraft {
        StoryDraft {
            title: title.into(),
            body: body.into(),
            status,
        }
    }

    #[tokio::test]
    async fn create_assigns_owner_and_defaults() {
        let store = MemoryStore::new();
        let stories = Stories::new(store.clone());
        let ada = user(&store, "ext-1", "Ada").await;

        let story = stories
            .create(&ada, &draft("T1", "B1", StoryStatus::Public))
            .await
            .unwrap();

        assert_eq!(story.owner_id, ada.id);
        assert_eq!(story.status, StoryStatus::Public);
        assert!(can_modify(&ada, &story));
    }

    #[tokio::test]
    async fn create_rejects_blank_input_without_persisting() {
        let store = MemoryStore::new();
        let stories = Stories::new(store.clone());
        let ada = user(&store, "ext-1", "Ada").await;

        let err = stories
            .create(&ada, &draft("", "B1", StoryStatus::Public))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(stories.list_own(&ada).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_own_is_scoped_and_newest_first() {
        let store = MemoryStore::new();
        let stories = Stories::new(store.clone());
        let ada = user(&store, "ext-1", "Ada").await;
        let grace = user(&store, "ext-2", "Grace").await;

        let s1 = stories
            .create(&ada, &draft("first", "b", StoryStatus::Public))
            .await
            .unwrap();
        let s2 = stories
            .create(&ada, &draft("second", "b", StoryStatus::Private))
            .await
            .unwrap();
        stories
            .create(&grace, &draft("other", "b", StoryStatus::Public))
            .await
            .unwrap();

        let own = stories.list_own(&ada).await.unwrap();
        assert_eq!(
            own.iter().map(|s| s.id).collect::<Vec<_>>(),
            vec![s2.id, s1.id]
        );
        assert!(stories.list_own(&grace).await.unwrap().len() == 1);
    }

    #[tokio::test]
    async fn list_public_excludes_private() {
        let store = MemoryStore::new();
        let stories = Stories::new(store.clone());
        let ada = user(&store, "ext-1", "Ada").await;

        let public = stories
            .create(&ada, &draft("pub", "b", StoryStatus::Public))
            .await
            .unwrap();
        stories
            .create(&ada, &draft("priv", "b", StoryStatus::Private))
            .await
            .unwrap();

        let listed = stories.list_public().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, public.id);

        let by_owner = stories.list_public_by_owner(ada.id).await.unwrap();
        assert_eq!(by_owner.len(), 1);
        assert_eq!(by_owner[0].id, public.id);
    }

    #[tokio::test]
    async fn private_story_is_owner_only() {
        let store = MemoryStore::new();
        let stories = Stories::new(store.clone());
        let ada = user(&store, "ext-1", "Ada").await;
        let grace = user(&store, "ext-2", "Grace").await;

        let secret = stories
            .create(&ada, &draft("secret", "b", StoryStatus::Private))
            .await
            .unwrap();

        assert!(stories.get_one(&ada, secret.id).await.is_ok());
        assert!(matches!(
            stories.get_one(&grace, secret.id).await,
            Err(Error::Forbidden)
        ));
        assert!(!can_modify(&grace, &secret));
    }

    #[tokio::test]
    async fn public_story_is_readable_but_not_writable_by_others() {
        let store = MemoryStore::new();
        let stories = Stories::new(store.clone());
        let ada = user(&store, "ext-1", "Ada").await;
        let grace = user(&store, "ext-2", "Grace").await;

        let story = stories
            .create(&ada, &draft("T1", "B1", StoryStatus::Public))
            .await
            .unwrap();

        assert!(stories.get_one(&grace, story.id).await.is_ok());
        assert!(matches!(
            stories
                .update(&grace, story.id, &draft("X", "Y", StoryStatus::Public))
                .await,
            Err(Error::Forbidden)
        ));
        assert!(matches!(
            stories.delete(&grace, story.id).await,
            Err(Error::Forbidden)
        ));
    }

    #[tokio::test]
    async fn update_touches_only_mutable_fields() {
        let store = MemoryStore::new();
        let stories = Stories::new(store.clone());
        let ada = user(&store, "ext-1", "Ada").await;

        let story = stories
            .create(&ada, &draft("T1", "B1", StoryStatus::Public))
            .await
            .unwrap();
        let updated = stories
            .update(&ada, story.id, &draft("T2", "B2", StoryStatus::Private))
            .await
            .unwrap();

        assert_eq!(updated.title, "T2");
        assert_eq!(updated.status, StoryStatus::Private);
        assert_eq!(updated.owner_id, story.owner_id);
        assert_eq!(updated.created_at, story.created_at);
    }

    #[tokio::test]
    async fn update_missing_story_is_not_found() {
        let store = MemoryStore::new();
        let stories = Stories::new(store.clone());
        let ada = user(&store, "ext-1", "Ada").await;

        assert!(matches!(
            stories
                .update(&ada, Uuid::new_v4(), &draft("T", "B", StoryStatus::Public))
                .await,
            Err(Error::NotFound)
        ));
    }

    #[tokio::test]
    async fn double_delete_reports_not_found() {
        let store = MemoryStore::new();
        let stories = Stories::new(store.clone());
        let ada = user(&store, "ext-1", "Ada").await;

        let story = stories
            .create(&ada, &draft("T1", "B1", StoryStatus::Public))
            .await
            .unwrap();

        assert!(stories.delete(&ada, story.id).await.is_ok());
        assert!(matches!(
            stories.delete(&ada, story.id).await,
            Err(Error::NotFound)
        ));
    }
}
