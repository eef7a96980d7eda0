//! # User model
//!
//! Two representations of a StoryDeck user:
//!
//! - [`User`] is the full database row from the `users` table. `external_id`
//!   is the subject identifier Google reports for the account and is the
//!   find-or-create key on every login; the profile fields are overwritten
//!   with whatever the provider currently reports.
//! - [`UserInfo`] is the client-safe projection used in render contexts. It
//!   omits the external identifier and the audit timestamps and carries the
//!   id as a plain string.
//!
//! [`Profile`] is the input half: the fields the identity provider hands us
//! on a successful login.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Full user record from the database.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub external_id: String,
    pub display_name: String,
    pub first_name: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Convert to UserInfo for render contexts.
    pub fn to_info(&self) -> UserInfo {
        UserInfo {
            id: self.id.to_string(),
            display_name: self.display_name.clone(),
            first_name: self.first_name.clone(),
            image: self.image.clone(),
        }
    }
}

/// Profile fields reported by the identity provider on login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub display_name: String,
    pub first_name: String,
    pub image: Option<String>,
}

/// User information safe to send to the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserInfo {
    pub id: String,
    pub display_name: String,
    pub first_name: String,
    pub image: Option<String>,
}
