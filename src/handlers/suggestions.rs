use crate::schemas::{api_error, database_error, ApiError, ApiResponse, AppState, ErrorResponse};
use axum::{extract::State, http::StatusCode, response::Json};
use common::SuggestionSet;
use compute::suggestions::{build_prompt, parse_suggestions};
use compute::Snapshot;
use tracing::{debug, error, info, instrument, trace};

/// Generate operational suggestions from the current menu, stock and orders
///
/// Suggestions are regenerated on every call. A reply that cannot be parsed
/// still yields 200 with empty categories and a fallback key action.
#[utoipa::path(
    get,
    path = "/api/v1/suggestions",
    tag = "suggestions",
    responses(
        (status = 200, description = "Suggestions generated", body = ApiResponse<SuggestionSet>),
        (status = 502, description = "Text generation service unavailable", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_suggestions(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<SuggestionSet>>, ApiError> {
    trace!("Entering get_suggestions function");

    let snapshot = match Snapshot::load(&state.db).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!("Failed to load rows for suggestions: {}", e);
            return Err(database_error("Failed to load suggestion data"));
        }
    };

    let prompt = match build_prompt(&snapshot.menu, &snapshot.ingredients, &snapshot.orders) {
        Ok(prompt) => prompt,
        Err(e) => {
            error!("Failed to build suggestion prompt: {}", e);
            return Err(api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "PROMPT_ERROR",
                "Failed to build suggestion prompt",
            ));
        }
    };
    debug!("Built suggestion prompt of {} characters", prompt.len());

    let reply = match state.text.generate(&prompt).await {
        Ok(reply) => reply,
        Err(e) => {
            error!("Failed to generate suggestions: {}", e);
            return Err(api_error(
                StatusCode::BAD_GATEWAY,
                "SUGGESTION_SERVICE_UNAVAILABLE",
                "Suggestion service unavailable",
            ));
        }
    };
    trace!("Raw suggestion reply: {}", reply);

    let suggestions = parse_suggestions(&reply);
    info!(
        "Generated suggestions: {} key actions, {} waste tips, {} menu tips, {} operational tips",
        suggestions.key_actions.len(),
        suggestions.waste_reduction.len(),
        suggestions.next_day_menu.len(),
        suggestions.operational_tips.len()
    );
    Ok(Json(ApiResponse::ok(suggestions, "Suggestions generated successfully")))
}
