use std::sync::Arc;
use std::time::Instant;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::routing::put;
use axum::{Json, Router};
use bevy::prelude::{ResMut, Resource};
use tokio::sync::mpsc;

use retarget_api::{ApiError, DetectionResult, SetDetectionRequest};

use crate::tracking::LatestDetection;

/// Detection results can carry a full face mesh per frame.
const MAX_REQUEST_BYTES: usize = 8 * 1024 * 1024;

pub enum Command {
    SetDetection(DetectionResult, Instant),
    ClearDetection,
}

pub struct ApiState {
    tx: mpsc::UnboundedSender<Command>,
}

impl ApiState {
    pub fn new() -> (Arc<Self>, ApiResource) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Arc::new(Self {
            tx,
        }), ApiResource {
            rx
        })
    }

    fn send(&self, command: Command) -> Result<(), ApiError> {
        self.tx.send(command).map_err(|_| ApiError::unavailable())
    }

    pub fn set_detection(&self, result: DetectionResult) -> Result<(), ApiError> {
        self.send(Command::SetDetection(result, Instant::now()))
    }

    pub fn clear_detection(&self) -> Result<(), ApiError> {
        self.send(Command::ClearDetection)
    }
}

async fn put_detection(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<SetDetectionRequest>,
) -> Result<StatusCode, ApiError> {
    state.set_detection(request.result)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_detection(State(state): State<Arc<ApiState>>) -> Result<StatusCode, ApiError> {
    state.clear_detection()?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn new_api() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/v1/detection", put(put_detection).delete(delete_detection))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES))
}

#[derive(Resource)]
pub struct ApiResource {
    rx: mpsc::UnboundedReceiver<Command>,
}

pub fn update_api(
    mut api: ResMut<ApiResource>,
    mut latest: ResMut<LatestDetection>,
) {
    while let Ok(command) = api.rx.try_recv() {
        match command {
            Command::SetDetection(result, received) => latest.set(result, received),
            Command::ClearDetection => latest.clear(),
        }
    }
}
