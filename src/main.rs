use anyhow::Context as _;
use time::Duration;
use tower_http::trace::TraceLayer;
use tower_sessions::cookie::SameSite;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;
use tracing_subscriber::EnvFilter;

use storydeck::auth::google::GoogleOAuth;
use storydeck::settings::Settings;
use storydeck::store::PgStore;
use storydeck::{db, routes, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("storydeck=debug,tower_http=info")),
        )
        .init();

    let settings = Settings::new().unwrap_or_default();

    let pool = db::connect(&settings.database)
        .await
        .context("failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("failed to run migrations")?;

    // Sessions live in their own durable table so any instance can resolve
    // any browser's token.
    let session_store = PostgresStore::new(pool.clone());
    session_store
        .migrate()
        .await
        .context("failed to migrate session store")?;

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::days(settings.session.days)));

    let state = AppState {
        store: PgStore::new(pool),
        oauth: GoogleOAuth::new(&settings).context("invalid oauth configuration")?,
    };

    let app = routes::router()
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = settings.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("server listening on {addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
