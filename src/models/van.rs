//! Modelo de Van
//!
//! Vehículo de una agencia con capacidad, conductor asignado y posición en vivo.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::GeoPoint;

/// Estado de aprobación del van
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VanStatus {
    Pending,
    Approved,
}

impl VanStatus {
    /// Cualquier valor distinto de "approved" cuenta como pendiente
    pub fn from_db(value: &str) -> Self {
        if value == "approved" {
            VanStatus::Approved
        } else {
            VanStatus::Pending
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Van {
    pub id: Uuid,
    pub van_number: String,
    pub capacity: u32,
    pub agency_id: Uuid,
    pub assigned_driver_id: Option<Uuid>,
    pub status: VanStatus,
    pub track_always: bool,
    pub current_position: GeoPoint,
    /// Posición del depósito desde donde arranca cada ruta
    pub start_position: GeoPoint,
}

impl Van {
    pub fn is_approved(&self) -> bool {
        self.status == VanStatus::Approved
    }
}
