use axum::{Extension, extract::Query, response::Html};
use serde::Deserialize;
use tracing::{info, warn};

use crate::{
    error::AppError,
    render,
    server::AppState,
    types::{AnalysisOutcome, TimeRange, TrackQuery, TrackSourceKind},
    utils,
};

#[derive(Debug, Deserialize)]
pub struct AnalyzeParams {
    pub session_id: Option<String>,
    pub instrument: Option<String>,
    pub time_range: Option<TimeRange>,
    pub source: Option<TrackSourceKind>,
}

/// Runs the whole pipeline for one session: tracks, classification, page.
///
/// A missing or unknown session is rejected before any outbound call. A
/// failing track listing aborts the request; a failing model call does not,
/// its message is shown in place of the results.
pub async fn analyze(
    Query(params): Query<AnalyzeParams>,
    Extension(state): Extension<AppState>,
) -> Result<Html<String>, AppError> {
    let session_id = params.session_id.as_deref().unwrap_or_default();
    let Some(access_token) = state.sessions.get(session_id).await else {
        return Err(AppError::Unauthenticated);
    };

    let instrument = utils::normalize_instrument(params.instrument.as_deref());
    let query = TrackQuery {
        source: params.source.unwrap_or_default(),
        limit: state.track_limit,
        time_range: params.time_range.unwrap_or_default(),
    };

    let summaries = state.tracks.fetch_tracks(&access_token, &query).await?;

    let outcome = match state.classifier.classify(&summaries, &instrument).await {
        Ok(classification) => {
            info!(
                instrument = %instrument,
                tracks = summaries.len(),
                classified = classification.len(),
                "analysis complete"
            );
            AnalysisOutcome::Classified(classification)
        }
        Err(e) => {
            warn!(error = %e, "classification failed");
            AnalysisOutcome::Failed(format!("Error analyzing songs: {}", e))
        }
    };

    Ok(Html(render::render_analysis(
        &outcome,
        &instrument,
        Some(session_id),
    )))
}
