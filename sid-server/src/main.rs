use sid_auth::{RateLimitConfig, SessionTokenService};
use sid_crypto::AtRestCipher;
use sid_server::identity::IdentityService;
use sid_server::{logger, routes::build_router, state::AppState};

use std::error::Error;
use std::sync::Arc;

use log::{error, info};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Pick up SID_* variables from a local .env in development
    dotenvy::dotenv().ok();

    // Load and validate configuration
    let config = sid_config::Config::load()?;
    config.validate()?;

    // Construct log file path if configured
    let log_file_path: Option<std::path::PathBuf> = if let Some(ref filename) = config.logging.file
    {
        let config_dir = sid_config::Config::config_dir()?;
        let log_dir = config_dir.join(&config.logging.dir);

        // Ensure log directory exists
        std::fs::create_dir_all(&log_dir)?;

        Some(log_dir.join(filename))
    } else {
        None
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting sid-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    // Initialize database pool and run migrations
    let database_path = config.database_path()?;
    info!("Connecting to database: {}", database_path.display());

    let pool = sid_db::connect(&database_path, config.server.max_db_connections).await?;
    info!("Database ready");

    // validate() guarantees both secrets are present and distinct
    let Some(ref token_secret) = config.auth.token_secret else {
        unreachable!("validate() ensures auth.token_secret is set")
    };
    let Some(ref master_secret) = config.crypto.master_secret else {
        unreachable!("validate() ensures crypto.master_secret is set")
    };

    let tokens = Arc::new(SessionTokenService::with_hs256(
        token_secret.as_bytes(),
        config.auth.token_ttl_secs,
    ));

    let cipher = AtRestCipher::new(master_secret, config.crypto.kdf_iterations)?;
    info!("At-rest cipher initialized");

    let identity = IdentityService::new(
        pool.clone(),
        cipher,
        Arc::clone(&tokens),
        RateLimitConfig {
            max_attempts: config.rate_limit.max_attempts,
            window_secs: config.rate_limit.window_secs,
        },
    )?;

    // Build application state and router
    let app_state = AppState {
        pool,
        identity: Arc::new(identity),
        tokens,
    };
    // Housekeeping: the login limiter keeps one entry per email attempted,
    // so idle keys are swept out once their window has fully replenished.
    let limiter_owner = Arc::clone(&app_state.identity);
    let sweep_period =
        std::time::Duration::from_secs(config.rate_limit.window_secs.max(60));
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(sweep_period);
        loop {
            interval.tick().await;
            limiter_owner.prune_rate_limiter();
        }
    });

    let app = build_router(app_state);

    // Create TCP listener
    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;

    // Get actual bound address (important when port is 0 / auto-assigned)
    let actual_addr = listener.local_addr()?;
    info!("Server listening on {}", actual_addr);

    // Start server with graceful shutdown on SIGINT
    info!("Server ready to accept connections");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Received SIGINT (Ctrl+C), shutting down"),
                Err(e) => error!("Failed to listen for SIGINT: {}", e),
            }
        })
        .await?;

    info!("Shutdown complete");

    Ok(())
}
