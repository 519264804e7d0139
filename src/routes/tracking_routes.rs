use axum::{
    extract::{ws::WebSocketUpgrade, Path, State},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::location_socket_controller::handle_socket;
use crate::controllers::tracking_controller::TrackingController;
use crate::dto::tracking_dto::{
    LocationUpdateRequest, LocationUpdateResponse, ToggleTrackingResponse,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_tracking_router() -> Router<AppState> {
    Router::new()
        .route("/update-location", post(update_location))
        .route("/vans/:id/toggle-tracking", post(toggle_tracking))
        .route("/vans/toggle-tracking/:id", post(toggle_tracking))
        .route("/ws/location", get(location_socket))
}

async fn update_location(
    State(state): State<AppState>,
    Json(request): Json<LocationUpdateRequest>,
) -> Result<Json<LocationUpdateResponse>, AppError> {
    let controller = TrackingController::new(state.store.as_ref(), &state.tracking_hub);
    let response = controller.update_location(request).await?;
    Ok(Json(response))
}

async fn toggle_tracking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ToggleTrackingResponse>, AppError> {
    let controller = TrackingController::new(state.store.as_ref(), &state.tracking_hub);
    let response = controller.toggle_tracking(id).await?;
    Ok(Json(response))
}

async fn location_socket(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    let hub = state.tracking_hub.clone();
    ws.on_upgrade(move |socket| handle_socket(socket, hub))
}
