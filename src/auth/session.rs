//! # Session binding
//!
//! The session lifecycle lives in the durable session store behind
//! `tower-sessions`; a record is lazily created and its opaque id handed to
//! the browser the first time anything is written. This module owns the one
//! piece of session data the service cares about: the binding between a
//! session and a signed-in user.
//!
//! Nothing here is cached in process state. Every request resolves the
//! browser's token against the durable store, so any instance can answer
//! for any session.

use tower_sessions::Session;
use uuid::Uuid;

use crate::error::Error;
use crate::models::User;
use crate::store::Datastore;

/// Key for storing the bound user id in the session.
pub const SESSION_USER_ID_KEY: &str = "user_id";

/// Bind the session to a signed-in user and persist the record immediately.
/// The inactivity expiry restarts from now.
pub async fn bind(session: &Session, user: &User) -> Result<(), Error> {
    session.insert(SESSION_USER_ID_KEY, user.id).await?;
    session.save().await?;
    Ok(())
}

/// Resolve the session back to a user. An unbound, expired or unknown
/// binding is "no identity", not an error; only store failures surface.
/// Resolving never issues a fresh token.
pub async fn resolve<S: Datastore>(session: &Session, store: &S) -> Result<Option<User>, Error> {
    let user_id: Option<Uuid> = session.get(SESSION_USER_ID_KEY).await?;
    let Some(user_id) = user_id else {
        return Ok(None);
    };
    Ok(store.user(user_id).await?)
}

/// Log the session out by removing the durable record. Terminating an
/// already-absent session is fine.
pub async fn terminate(session: &Session) -> Result<(), Error> {
    session.flush().await?;
    Ok(())
}
