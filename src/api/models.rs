use axum::{Extension, http::StatusCode, response::Json};
use serde_json::{Value, json};

use crate::server::AppState;

const GENERATE_CONTENT: &str = "generateContent";

/// Lists the provider's models that can serve `generateContent`.
pub async fn list_models(
    Extension(state): Extension<AppState>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match state.llm.list_models().await {
        Ok(models) => {
            let models: Vec<_> = models
                .into_iter()
                .filter(|m| m.supported_methods.iter().any(|s| s == GENERATE_CONTENT))
                .collect();
            Ok(Json(json!({
                "provider": state.llm.name(),
                "configured_model": state.llm.model(),
                "models": models,
            })))
        }
        Err(e) => Err((
            StatusCode::BAD_GATEWAY,
            Json(json!({ "error": e.to_string() })),
        )),
    }
}
