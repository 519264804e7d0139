use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::route_controller::RouteController;
use crate::dto::route_dto::{CreateRouteRequest, RouteResponse};
use crate::dto::ApiResponse;
use crate::models::RouteFilters;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_route_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_routes))
        .route("/create", post(create_route))
        .route("/:id", delete(delete_route))
        // Ruta usada por los dashboards existentes
        .route("/delete/:id", delete(delete_route))
}

async fn create_route(
    State(state): State<AppState>,
    Json(request): Json<CreateRouteRequest>,
) -> Result<Json<ApiResponse<RouteResponse>>, AppError> {
    let controller = RouteController::new(state.store.as_ref());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn list_routes(
    State(state): State<AppState>,
    Query(filters): Query<RouteFilters>,
) -> Result<Json<Vec<RouteResponse>>, AppError> {
    let controller = RouteController::new(state.store.as_ref());
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn delete_route(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = RouteController::new(state.store.as_ref());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Route deleted"
    })))
}
