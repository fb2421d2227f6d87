use std::io;

use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use futures::{StreamExt, TryStreamExt};
use serde::Serialize;

use crate::application::ports::{LlmClient, StagingStoreError, TranscriptionEngine};
use crate::application::services::{AnalysisError, AnalysisReport, StagedUpload};
use crate::domain::{Catalog, ProcessingTime, TaskRecord};
use crate::presentation::state::AppState;

pub const AUDIO_FIELD: &str = "audio";
pub const CATALOG_FIELD: &str = "tasks";
pub const NO_AUDIO_MESSAGE: &str = "No audio file provided";

const FALLBACK_FILENAME: &str = "audio";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscribeResponse {
    pub success: bool,
    pub transcription: String,
    pub processing_time: ProcessingTime,
    pub tasks: Vec<TaskRecord>,
}

impl From<AnalysisReport> for TranscribeResponse {
    fn from(report: AnalysisReport) -> Self {
        Self {
            success: true,
            transcription: report.transcription,
            processing_time: report.processing_time,
            tasks: report.tasks,
        }
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize)]
pub struct FailureResponse {
    pub success: bool,
    pub error: String,
}

#[derive(Default)]
struct UploadForm {
    staged: Option<StagedUpload>,
    catalog: Catalog,
}

#[tracing::instrument(skip_all)]
pub async fn transcribe_handler<T, L>(
    State(state): State<AppState<T, L>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response
where
    T: TranscriptionEngine + 'static + ?Sized,
    L: LlmClient + 'static + ?Sized,
{
    let multipart = match multipart {
        Ok(m) => m,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Transcribe request without multipart body");
            return error_response(AnalysisError::InvalidRequest(NO_AUDIO_MESSAGE.to_string()));
        }
    };

    match process(&state, multipart).await {
        Ok(report) => (StatusCode::OK, Json(TranscribeResponse::from(report))).into_response(),
        Err(e) => error_response(e),
    }
}

async fn process<T, L>(
    state: &AppState<T, L>,
    multipart: Multipart,
) -> Result<AnalysisReport, AnalysisError>
where
    T: TranscriptionEngine + 'static + ?Sized,
    L: LlmClient + 'static + ?Sized,
{
    let mut form = UploadForm::default();

    if let Err(e) = read_form(state, multipart, &mut form).await {
        if let Some(staged) = form.staged.take() {
            let _ = staged.release().await;
        }
        return Err(e);
    }

    let Some(staged) = form.staged else {
        tracing::warn!("Transcribe request with no audio file");
        return Err(AnalysisError::InvalidRequest(NO_AUDIO_MESSAGE.to_string()));
    };

    state.analysis_service.analyze(staged, &form.catalog).await
}

async fn read_form<T, L>(
    state: &AppState<T, L>,
    mut multipart: Multipart,
    form: &mut UploadForm,
) -> Result<(), AnalysisError>
where
    T: TranscriptionEngine + 'static + ?Sized,
    L: LlmClient + 'static + ?Sized,
{
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to read multipart");
        AnalysisError::InvalidRequest(format!("Failed to read multipart: {}", e))
    })? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(AUDIO_FIELD) if field.file_name().is_none() => {
                tracing::warn!("Ignoring audio field without a filename");
            }
            Some(AUDIO_FIELD) if form.staged.is_none() => {
                let filename = field
                    .file_name()
                    .filter(|name| !name.is_empty())
                    .unwrap_or(FALLBACK_FILENAME)
                    .to_string();
                let content_type = field.content_type().map(str::to_string);

                tracing::debug!(filename = %filename, content_type = ?content_type, "Receiving audio upload");

                let stream = field.map_err(io::Error::other).boxed();
                let staged = state
                    .analysis_service
                    .stage(filename, content_type, stream)
                    .await
                    .map_err(|e| match e {
                        // Stream errors come from the client body, not from the disk.
                        AnalysisError::Storage(StagingStoreError::Io(e)) => {
                            tracing::warn!(error = %e, "Failed to read audio field");
                            AnalysisError::InvalidRequest(format!("Failed to read multipart: {}", e))
                        }
                        other => other,
                    })?;
                form.staged = Some(staged);
            }
            Some(AUDIO_FIELD) => {
                tracing::warn!("Ignoring additional audio field");
            }
            Some(CATALOG_FIELD) => {
                let raw = field.text().await.map_err(|e| {
                    AnalysisError::InvalidRequest(format!("Failed to read tasks field: {}", e))
                })?;
                form.catalog = Catalog::parse(&raw, state.upload_limits.max_catalog_bytes)
                    .map_err(|e| AnalysisError::InvalidRequest(e.to_string()))?;
            }
            other => {
                tracing::debug!(field = ?other, "Ignoring unknown form field");
            }
        }
    }

    Ok(())
}

fn error_response(error: AnalysisError) -> Response {
    if error.is_client_error() {
        tracing::warn!(error = %error, "Rejected transcribe request");
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: error.to_string(),
            }),
        )
            .into_response();
    }

    tracing::error!(error = %error, details = ?error, "Transcribe request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(FailureResponse {
            success: false,
            error: error.to_string(),
        }),
    )
        .into_response()
}
