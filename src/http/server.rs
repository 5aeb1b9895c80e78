use actix_web::{App, HttpServer};

use super::{configure, AppState};

/// Serve the customer API, /metrics and /health until shutdown
pub async fn run_server(state: AppState, host: &str, port: u16) -> std::io::Result<()> {
    tracing::info!("🌐 Starting customer API on http://{}:{}", host, port);

    HttpServer::new(move || App::new().configure(configure(state.clone())))
        .bind((host, port))?
        .run()
        .await
}
