use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{Route, Stop};
use crate::services::BuildRouteCommand;

// Request para crear una ruta
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateRouteRequest {
    pub agency_id: Uuid,
    pub van_id: Uuid,

    #[validate(length(min = 1, max = 32))]
    pub trip_type: String,

    // Una lista vacía la rechaza el constructor de rutas
    #[serde(default)]
    pub student_ids: Vec<Uuid>,
}

impl From<CreateRouteRequest> for BuildRouteCommand {
    fn from(request: CreateRouteRequest) -> Self {
        Self {
            agency_id: request.agency_id,
            van_id: request.van_id,
            trip_type: request.trip_type,
            student_ids: request.student_ids,
        }
    }
}

// Response de ruta
#[derive(Debug, Serialize, Deserialize)]
pub struct RouteResponse {
    pub id: Uuid,
    pub agency_id: Uuid,
    pub van_id: Uuid,
    pub driver_id: Option<Uuid>,
    pub trip_type: String,
    pub stops: Vec<Stop>,
    pub student_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<Route> for RouteResponse {
    fn from(route: Route) -> Self {
        Self {
            id: route.id,
            agency_id: route.agency_id,
            van_id: route.van_id,
            driver_id: route.driver_id,
            trip_type: route.trip_type,
            stops: route.stops,
            student_ids: route.student_ids,
            created_at: route.created_at,
        }
    }
}
