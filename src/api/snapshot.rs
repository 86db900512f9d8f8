//! Snapshot endpoints: current catalog/job pair and its change stream

use std::{convert::Infallible, sync::Arc};

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use tokio::sync::watch;
use tokio_stream::{wrappers::WatchStream, Stream, StreamExt};

use crate::models::snapshot::Snapshot;

/// Current snapshot of equipment and jobs
#[utoipa::path(
    get,
    path = "/snapshot",
    tag = "snapshot",
    responses(
        (status = 200, description = "Equipment and jobs", body = Snapshot)
    )
)]
pub async fn get_snapshot(State(state): State<crate::AppState>) -> Json<Snapshot> {
    Json(state.services.feed.current().as_ref().clone())
}

/// Server-sent events: one `snapshot` event now and after every change
#[utoipa::path(
    get,
    path = "/snapshot/stream",
    tag = "snapshot",
    responses(
        (status = 200, description = "Stream of snapshots", content_type = "text/event-stream", body = Snapshot)
    )
)]
pub async fn stream_snapshot(
    State(state): State<crate::AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    Sse::new(snapshot_events(state.services.feed.subscribe())).keep_alive(KeepAlive::default())
}

/// The receiver's current snapshot, then one event per published change
fn snapshot_events(
    receiver: watch::Receiver<Arc<Snapshot>>,
) -> impl Stream<Item = Result<Event, Infallible>> {
    WatchStream::new(receiver).filter_map(|snapshot| {
        match Event::default().event("snapshot").json_data(snapshot.as_ref()) {
            Ok(event) => Some(Ok::<_, Infallible>(event)),
            Err(e) => {
                tracing::error!("Failed to encode snapshot event: {}", e);
                None
            }
        }
    })
}
