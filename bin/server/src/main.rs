use milestone_board_platform_access::IdentityProvider;
use milestone_board_server::{
    auth::{AppState, RestIdentityProvider},
    config::ServerConfig,
    db::{PgMilestoneStore, PgPrivilegeStore, PrivilegeStore},
    edge::RouteSet,
    milestones::MilestoneService,
    routes,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = ServerConfig::from_env().expect("failed to load configuration");
    tracing::info!("Loaded configuration");

    // Create database connection pool
    let db_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("failed to run migrations");

    // Build the identity provider client, or disable the edge layer when the
    // provider is not configured. This is a documented development-mode
    // policy: unauthenticated pass-through at the edge, fail-closed gate.
    let provider: Option<Arc<dyn IdentityProvider>> = match &config.provider {
        Some(provider_config) => {
            let client = RestIdentityProvider::new(provider_config)
                .expect("failed to build identity provider client");
            tracing::info!(url = %provider_config.url, "Identity provider configured");
            Some(Arc::new(client))
        }
        None => {
            tracing::warn!(
                "Identity provider not configured; edge protection is DISABLED \
                 and admin pages will reject all requests"
            );
            None
        }
    };

    // Create application state
    let service = MilestoneService::new(Arc::new(PgMilestoneStore::new(db_pool.clone())));
    let privileges: Arc<dyn PrivilegeStore> = Arc::new(PgPrivilegeStore::new(db_pool));
    let state = Arc::new(AppState::new(
        service,
        privileges,
        provider,
        RouteSet::default(),
        config.cookies.clone(),
    ));

    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .expect("failed to bind to address");

    tracing::info!("listening on http://{}", config.listen_addr);

    axum::serve(listener, app.into_make_service())
        .await
        .expect("server error");
}
