use std::net::SocketAddr;
use std::sync::Arc;

use svgsmith_core::generation::Generator;
use svgsmith_gemini::{GeminiApi, GeminiConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use svgsmith_api::config::ServerConfig;
use svgsmith_api::router::build_app_router;
use svgsmith_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "svgsmith_api=debug,svgsmith_core=debug,svgsmith_gemini=debug,tower_http=debug"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    let gemini_config = GeminiConfig::from_env();
    tracing::info!(
        model = %gemini_config.model,
        api_url = %gemini_config.api_url,
        "Loaded Gemini configuration",
    );

    if config.request_timeout_secs <= gemini_config.timeout_secs {
        tracing::warn!(
            request_timeout_secs = config.request_timeout_secs,
            model_timeout_secs = gemini_config.timeout_secs,
            "REQUEST_TIMEOUT_SECS should exceed GEMINI_TIMEOUT_SECS; slow generations will end in a bare 408",
        );
    }

    // --- Generation pipeline ---
    let (top_p, top_k) = (gemini_config.top_p, gemini_config.top_k);
    let gemini = GeminiApi::new(gemini_config).expect("Failed to build Gemini HTTP client");
    let generator = Generator::new(Arc::new(gemini)).with_sampling(top_p, top_k);

    // --- App state ---
    let state = AppState::new(config.clone(), generator);

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
