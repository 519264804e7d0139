use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::GeoPoint;

/// Estudiante registrado por una agencia
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: Uuid,
    pub name: String,
    pub home: GeoPoint,
    pub school: GeoPoint,
    pub agency_id: Uuid,
    pub assigned_van_id: Option<Uuid>,
    pub schedule: String,
    pub status: String,
}
