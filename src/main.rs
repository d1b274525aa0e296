use rectangle_api::config::ServerConfig;
use rectangle_api::services::rectangle::RectangleFile;
use rectangle_api::{routes, state};

#[tokio::main]
async fn main() {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("ignoring unreadable .env: {e}");
        }
    }
    tracing_subscriber::fmt::init();

    let config = ServerConfig::from_env();
    tracing::info!(
        store = %config.store_path.display(),
        validate_delay = ?config.validate_delay,
        "rectangle store configured"
    );

    let state = state::AppState::new(RectangleFile::new(config.store_path.clone()), config.validate_delay);
    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, "rectangle-api listening");
    axum::serve(listener, app).await.expect("server failed");
}
