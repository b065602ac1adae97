use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tts_studio::infrastructure::config::{Config, LogFormat};
use tts_studio::infrastructure::http::{create_app, speech_service_from_config, start_http_server};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting TTS Studio on {}:{}",
        config.host,
        config.port
    );

    tracing::info!(
        model = %config.tts_model,
        base_url = %config.openai_base_url,
        audio_format = config.audio_format.extension(),
        timeout_secs = config.request_timeout_secs,
        "OpenAI speech configuration loaded"
    );

    // A missing key halts the page, not the process, so health checks still answer
    let speech_service = speech_service_from_config(&config);
    match &speech_service {
        Ok(_) => tracing::info!("OpenAI speech client initialized"),
        Err(e) => tracing::error!(error = %e, "Speech synthesis disabled"),
    }

    let config = Arc::new(config);
    let app = create_app(config.clone(), speech_service);

    start_http_server(config, app).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| config.default_log_filter().into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| config.default_log_filter().into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
