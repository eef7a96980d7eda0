//! # Story model
//!
//! [`Story`] is the database row. Ownership is carried by `owner_id` and is
//! assigned once, at creation; updates may touch `title`, `body` and
//! `status` only. Visibility is the binary [`StoryStatus`]: `public` stories
//! are readable by any signed-in user, `private` ones only by their owner.
//!
//! [`StoryDraft`] is the declared input shape for create and update. The
//! request layer deserializes exactly these three fields and nothing else;
//! [`StoryDraft::validate`] rejects empty titles and bodies before anything
//! is persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use uuid::Uuid;

use crate::error::Error;

/// Visibility of a story. Stored as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoryStatus {
    #[default]
    Public,
    Private,
}

impl StoryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoryStatus::Public => "public",
            StoryStatus::Private => "private",
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown story status: {0}")]
pub struct ParseStatusError(String);

impl TryFrom<String> for StoryStatus {
    type Error = ParseStatusError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "public" => Ok(StoryStatus::Public),
            "private" => Ok(StoryStatus::Private),
            _ => Err(ParseStatusError(value)),
        }
    }
}

/// Full story record from the database.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Story {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    #[sqlx(try_from = "String")]
    pub status: StoryStatus,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Input shape for creating or updating a story.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryDraft {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub status: StoryStatus,
}

impl StoryDraft {
    /// Reject empty required fields before any persistence attempt.
    pub fn validate(&self) -> Result<(), Error> {
        if self.title.trim().is_empty() {
            return Err(Error::Validation("title is required"));
        }
        if self.body.trim().is_empty() {
            return Err(Error::Validation("body is required"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_text() {
        assert_eq!(
            StoryStatus::try_from("public".to_string()).unwrap(),
            StoryStatus::Public
        );
        assert_eq!(
            StoryStatus::try_from("private".to_string()).unwrap(),
            StoryStatus::Private
        );
        assert!(StoryStatus::try_from("unlisted".to_string()).is_err());
        assert_eq!(StoryStatus::Private.as_str(), "private");
    }

    #[test]
    fn draft_status_defaults_to_public() {
        let draft: StoryDraft =
            serde_json::from_str(r#"{"title": "T", "body": "B"}"#).unwrap();
        assert_eq!(draft.status, StoryStatus::Public);
    }

    #[test]
    fn draft_rejects_blank_fields() {
        let draft = StoryDraft {
            title: "  ".into(),
            body: "B".into(),
            status: StoryStatus::Public,
        };
        assert!(matches!(
            draft.validate(),
            Err(Error::Validation("title is required"))
        ));

        let draft = StoryDraft {
            title: "T".into(),
            body: "".into(),
            status: StoryStatus::Public,
        };
        assert!(matches!(
            draft.validate(),
            Err(Error::Validation("body is required"))
        ));
    }
}
