use uuid::Uuid;
use validator::Validate;

use crate::dto::route_dto::{CreateRouteRequest, RouteResponse};
use crate::dto::ApiResponse;
use crate::models::RouteFilters;
use crate::repositories::TransportStore;
use crate::services::RouteBuilder;
use crate::utils::errors::{not_found_error, AppResult};

pub struct RouteController<'a> {
    store: &'a dyn TransportStore,
}

impl<'a> RouteController<'a> {
    pub fn new(store: &'a dyn TransportStore) -> Self {
        Self { store }
    }

    pub async fn create(
        &self,
        request: CreateRouteRequest,
    ) -> AppResult<ApiResponse<RouteResponse>> {
        request.validate()?;

        log::info!(
            "🗺️ Creando ruta '{}' para el van {} con {} estudiantes",
            request.trip_type,
            request.van_id,
            request.student_ids.len()
        );

        let route = RouteBuilder::new(self.store)
            .build_route(request.into())
            .await?;

        Ok(ApiResponse::success_with_message(
            route.into(),
            "Route Created Successfully".to_string(),
        ))
    }

    pub async fn list(&self, filters: RouteFilters) -> AppResult<Vec<RouteResponse>> {
        let routes = self.store.list_routes(&filters).await?;
        Ok(routes.into_iter().map(RouteResponse::from).collect())
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.store.delete_route(id).await? {
            return Err(not_found_error("Route", &id.to_string()));
        }
        log::info!("🗑️ Ruta {} eliminada", id);
        Ok(())
    }
}
