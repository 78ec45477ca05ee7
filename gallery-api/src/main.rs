use gallery_app::infrastructure::config::Config;
use gallery_app::AppContext;
use std::net::SocketAddr;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let app_context = match AppContext::from_config(&config).await {
        Ok(ctx) => ctx,
        Err(e) => {
            tracing::error!("Failed to initialize: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(id) = app_context.photo_target_user_id {
        tracing::info!("Photos without an explicit user id go to user {}", id);
    }

    let app = gallery_api::router(app_context);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");
    tracing::info!("Server started on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(gallery_api::shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Server stopped");
}
