//! Modelo de Route
//!
//! Una ruta es inmutable una vez creada: contiene la secuencia ordenada de
//! paradas (depósito → estudiantes → escuela) y los estudiantes incluidos.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::GeoPoint;

/// Tipo de parada dentro de la secuencia
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StopKind {
    Depot,
    Student,
    School,
}

/// Parada de la ruta (objeto valor, pertenece a la ruta)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    #[serde(rename = "type")]
    pub kind: StopKind,
    pub name: String,
    #[serde(flatten)]
    pub position: GeoPoint,
    /// Estudiante asociado; solo presente en paradas de tipo `student`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<Uuid>,
}

impl Stop {
    pub fn depot(position: GeoPoint) -> Self {
        Self {
            kind: StopKind::Depot,
            name: "START (DEPOT)".to_string(),
            position,
            student_id: None,
        }
    }

    pub fn student(student_id: Uuid, name: impl Into<String>, position: GeoPoint) -> Self {
        Self {
            kind: StopKind::Student,
            name: name.into(),
            position,
            student_id: Some(student_id),
        }
    }

    pub fn school(position: GeoPoint) -> Self {
        Self {
            kind: StopKind::School,
            name: "SCHOOL".to_string(),
            position,
            student_id: None,
        }
    }
}

/// Ruta persistida
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    pub id: Uuid,
    pub agency_id: Uuid,
    pub van_id: Uuid,
    /// Copia del conductor asignado al van en el momento de crear la ruta
    pub driver_id: Option<Uuid>,
    pub trip_type: String,
    pub stops: Vec<Stop>,
    pub student_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Ruta construida, todavía sin identificador asignado por el store
#[derive(Debug, Clone)]
pub struct NewRoute {
    pub agency_id: Uuid,
    pub van_id: Uuid,
    pub driver_id: Option<Uuid>,
    pub trip_type: String,
    pub stops: Vec<Stop>,
    pub student_ids: Vec<Uuid>,
}

/// Filtros para listar rutas
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteFilters {
    pub agency_id: Option<Uuid>,
    pub driver_id: Option<Uuid>,
}

impl RouteFilters {
    pub fn matches(&self, route: &Route) -> bool {
        self.agency_id.map_or(true, |agency| route.agency_id == agency)
            && self.driver_id.map_or(true, |driver| route.driver_id == Some(driver))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stop_serializes_flat() {
        let stop = Stop::depot(GeoPoint::new(18.5204, 73.8567));
        let value = serde_json::to_value(&stop).unwrap();
        assert_eq!(
            value,
            json!({ "type": "depot", "name": "START (DEPOT)", "lat": 18.5204, "lng": 73.8567 })
        );
    }

    #[test]
    fn test_route_filters() {
        let agency = Uuid::new_v4();
        let driver = Uuid::new_v4();
        let route = Route {
            id: Uuid::new_v4(),
            agency_id: agency,
            van_id: Uuid::new_v4(),
            driver_id: Some(driver),
            trip_type: "pickup".to_string(),
            stops: vec![],
            student_ids: vec![],
            created_at: Utc::now(),
        };

        assert!(RouteFilters::default().matches(&route));
        assert!(RouteFilters { agency_id: Some(agency), driver_id: Some(driver) }.matches(&route));
        assert!(!RouteFilters { agency_id: Some(Uuid::new_v4()), driver_id: None }.matches(&route));
        assert!(!RouteFilters { agency_id: None, driver_id: Some(Uuid::new_v4()) }.matches(&route));
    }
}
