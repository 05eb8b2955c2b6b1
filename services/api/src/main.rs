use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use api::{
    jwt::{JwtConfig, JwtService},
    repositories::{SweetRepository, UserRepository},
    routes,
    state::AppState,
};
use common::database::{DatabaseConfig, health_check, init_pool_with_retry, run_migrations};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting Sweet Shop API service");

    // Initialize database connection pool, retrying at startup only
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool_with_retry(&db_config).await?;

    if health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    run_migrations(&pool).await?;

    // Initialize JWT service
    let jwt_config = JwtConfig::from_env()?;
    let jwt_service = JwtService::new(&jwt_config);

    let user_repository = UserRepository::new(pool.clone());
    let sweet_repository = SweetRepository::new(pool.clone());

    let app_state = AppState {
        db_pool: pool,
        user_repository,
        sweet_repository,
        jwt_service,
    };

    // Start the web server
    let app = routes::create_router(app_state);

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "5000".to_string())
        .parse()
        .unwrap_or(5000);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Sweet Shop API listening on 0.0.0.0:{}", port);

    axum::serve(listener, app).await?;

    Ok(())
}
