use crate::schemas::{api_error, ApiError, AppState, ErrorResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
};
use common::{ChangeEvent, Table};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;
use tracing::{info, instrument, warn};

/// Stream change events of one table as server-sent events
///
/// Each event is named after the change kind (`insert`, `update`, `delete`)
/// and carries the `ChangeEvent` as JSON. Events missed by a slow client are
/// skipped.
#[utoipa::path(
    get,
    path = "/api/v1/realtime/{table}",
    tag = "realtime",
    params(
        ("table" = String, Path, description = "Table name: Orders, Menu, Ingredients, Menu_ingredients or Student"),
    ),
    responses(
        (status = 200, description = "Event stream", content_type = "text/event-stream", body = ChangeEvent),
        (status = 404, description = "Unknown table", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn stream_changes(
    Path(name): Path<String>,
    State(state): State<AppState>,
) -> Result<Sse<impl futures::Stream<Item = Result<Event, axum::Error>>>, ApiError> {
    let Some(table) = Table::from_name(&name) else {
        warn!("Realtime subscription for unknown table '{}'", name);
        return Err(api_error(
            StatusCode::NOT_FOUND,
            "UNKNOWN_TABLE",
            format!("No change feed for table '{}'", name),
        ));
    };
    info!("Opening change stream for {}", table);

    let stream = BroadcastStream::new(state.changes.subscribe(table))
        .filter_map(|received| received.ok())
        .map(|change| {
            Event::default().event(change.kind.as_str()).json_data(&change)
        });

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
