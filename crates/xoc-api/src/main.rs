use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use xoc_api::{create_router, ApiState};
use xoc_core::{constants::SERVER_STEP_DELAY, env, session_from_env, DemoOptions};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "xoc_api=debug,xoc_core=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Without a session the server still starts; agent routes answer 503
    let session = match session_from_env() {
        Ok(session) => Some(session),
        Err(e) => {
            error!("❌ Failed to initialize agent session: {:#}", e);
            None
        }
    };

    let demo_options =
        DemoOptions::default().with_step_delay(env::demo::step_delay(SERVER_STEP_DELAY));
    let state = ApiState::new(session)
        .with_demo_options(demo_options)
        .with_cors_origin(env::server::cors_origin());
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", env::server::port());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("🚀 API server listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
