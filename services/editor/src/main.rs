use anyhow::Result;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use common::cache::{RedisConfig, RedisPool};
use common::database;

use editor::repositories::{ProjectRepository, UserRepository};
use editor::session::SessionManager;
use editor::{routes, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting editor service");

    // Initialize database connection pool
    let db_config = database::DatabaseConfig::from_env()?;
    let pool = database::init_pool(&db_config).await?;

    if database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    sqlx::migrate!("./migrations").run(&pool).await?;

    // Initialize the Redis-backed session store
    let redis_config = RedisConfig::from_env()?;
    let redis_pool = RedisPool::new(&redis_config).await?;
    let sessions = SessionManager::new(redis_pool, SessionManager::ttl_from_env());

    let app_state = AppState {
        users: UserRepository::new(pool.clone()),
        projects: ProjectRepository::new(pool),
        sessions,
    };

    info!("Editor service initialized successfully");

    // Start the web server
    let app = routes::create_router(app_state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(3002);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Editor service listening on 0.0.0.0:{}", port);

    axum::serve(listener, app).await?;

    Ok(())
}
