//! # StoryDeck
//!
//! A small story-sharing service. Users sign in with Google, and every story
//! belongs to exactly one user. Public stories are readable by any signed-in
//! user; private stories only by their owner.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | Google OAuth handshake, session binding, route guards |
//! | [`db`] | PostgreSQL connection pool |
//! | [`error`] | Error taxonomy shared by every layer |
//! | [`models`] | `User` and `Story` records plus their input/output shapes |
//! | [`routes`] | The axum router and its handlers |
//! | [`settings`] | Layered configuration (defaults, `config.toml`, environment) |
//! | [`store`] | The durable-store seam: `Datastore` trait, Postgres and in-memory backends |
//! | [`stories`] | Ownership-scoped story repository and the `can_modify` policy |

pub mod auth;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod settings;
pub mod store;
pub mod stories;

use auth::google::GoogleOAuth;
use store::Datastore;

/// Shared state handed to every route handler.
#[derive(Clone)]
pub struct AppState<S: Datastore> {
    pub store: S,
    pub oauth: GoogleOAuth,
}
