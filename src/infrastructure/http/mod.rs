pub mod request_id;

use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    controllers::{health, page::PageController, speech::SpeechController},
    domain::speech::{SpeechService, SpeechServiceApi},
    infrastructure::{
        config::{Config, CredentialError},
        repositories::OpenAiSpeechRepository,
        session::{session_middleware, SessionStore},
    },
};

pub use request_id::{request_id_middleware, RequestId, X_REQUEST_ID};

/// Wire the speech service from configuration.
///
/// Fails with the credential error when no API key is configured; callers keep
/// serving and report the error instead of exiting.
pub fn speech_service_from_config(
    config: &Config,
) -> Result<Arc<dyn SpeechServiceApi>, CredentialError> {
    let api_key = config.openai_api_key.clone()?;

    let speech_repo = Arc::new(OpenAiSpeechRepository::new(
        api_key,
        config.openai_base_url.clone(),
        config.tts_model.clone(),
        Duration::from_secs(config.request_timeout_secs),
    ));

    Ok(Arc::new(SpeechService::new(speech_repo, config.audio_format)))
}

/// Build the application router
pub fn create_app(
    config: Arc<Config>,
    speech_service: Result<Arc<dyn SpeechServiceApi>, CredentialError>,
) -> Router {
    let sessions = Arc::new(SessionStore::new(
        config.session_max_sessions,
        Duration::from_secs(config.session_idle_minutes * 60),
    ));

    let page_controller = Arc::new(PageController::new(
        speech_service.clone(),
        config.audio_format,
        config.long_text_warning_chars,
    ));
    let speech_controller = Arc::new(SpeechController::new(speech_service));

    // Page routes (session cookie)
    let page_routes = Router::new()
        .route("/", get(PageController::show).post(PageController::submit))
        .route("/audio", get(PageController::audio))
        .route("/download", get(PageController::download))
        .with_state(page_controller)
        .layer(middleware::from_fn_with_state(sessions, session_middleware));

    // Stateless API routes
    let api_routes = Router::new()
        .route("/api/speech", axum::routing::post(SpeechController::synthesize))
        .with_state(speech_controller)
        .layer(CorsLayer::permissive());

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(config)
        .merge(page_routes)
        .merge(api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(request_id_middleware)),
        )
}

/// Start the HTTP server
pub async fn start_http_server(
    config: Arc<Config>,
    app: Router,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
