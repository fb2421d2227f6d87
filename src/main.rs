use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use voice_estimate::application::ports::StagingStore;
use voice_estimate::application::services::AnalysisService;
use voice_estimate::infrastructure::audio::OpenAiWhisperEngine;
use voice_estimate::infrastructure::llm::OpenAiClient;
use voice_estimate::infrastructure::observability::init_tracing;
use voice_estimate::infrastructure::storage::LocalStagingStore;
use voice_estimate::presentation::{
    AppState, Environment, Settings, UploadLimits, create_router,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(&settings.tracing_config(environment), settings.server.port);

    let staging_store: Arc<dyn StagingStore> = Arc::new(
        LocalStagingStore::new(settings.uploads.dir.clone())
            .context("Failed to prepare uploads directory")?,
    );

    let transcription_engine = Arc::new(OpenAiWhisperEngine::new(
        settings.openai.api_key.clone(),
        Some(settings.openai.base_url.clone()),
        Some(settings.openai.transcription_model.clone()),
    ));

    let llm_client = Arc::new(
        OpenAiClient::new(
            settings.openai.api_key.clone(),
            Some(settings.openai.base_url.clone()),
            Some(settings.openai.chat_model.clone()),
        )
        .with_max_tokens(settings.openai.max_tokens),
    );

    let analysis_service = Arc::new(AnalysisService::new(
        staging_store,
        transcription_engine,
        llm_client,
        settings.analysis_timeouts(),
    ));

    let state = AppState {
        analysis_service,
        upload_limits: UploadLimits::from(&settings.uploads),
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server host or port")?;
    tracing::info!(
        uploads_dir = %settings.uploads.dir.display(),
        "Listening on {}",
        addr
    );

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
