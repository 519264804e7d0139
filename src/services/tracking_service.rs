//! Reportes de ubicación y bandera de seguimiento de los vans

use uuid::Uuid;

use crate::models::LocationBroadcast;
use crate::repositories::TransportStore;
use crate::services::tracking_hub::{BroadcastReport, TrackingHub};
use crate::utils::errors::{not_found_error, AppError};

pub struct TrackingService<'a> {
    store: &'a dyn TransportStore,
    hub: &'a TrackingHub,
}

impl<'a> TrackingService<'a> {
    pub fn new(store: &'a dyn TransportStore, hub: &'a TrackingHub) -> Self {
        Self { store, hub }
    }

    /// Guarda la última posición del van y la difunde a los suscriptores.
    ///
    /// Un van inexistente (o un id que no es UUID) no es un error: se omite
    /// la persistencia y el evento se difunde igual. Un fallo del store
    /// tampoco detiene la difusión. El `status` no se guarda en el van.
    pub async fn report_location(
        &self,
        van_id: &str,
        lat: f64,
        lng: f64,
        status: &str,
    ) -> BroadcastReport {
        let persisted = match Uuid::parse_str(van_id) {
            Ok(id) => match self.store.update_van_position(id, lat, lng).await {
                Ok(found) => found,
                Err(e) => {
                    log::error!("❌ Error guardando la posición del van {}: {}", van_id, e);
                    false
                }
            },
            Err(_) => false,
        };
        if !persisted {
            log::debug!("Van {} desconocido, posición no persistida", van_id);
        }

        let event = LocationBroadcast {
            van_id: van_id.to_string(),
            lat,
            lng,
            status: status.to_string(),
        };
        let report = self.hub.broadcast_location(&event).await;

        log::info!(
            "📍 Van {} en ({}, {}) [{}] -> {}/{} suscriptores",
            van_id,
            lat,
            lng,
            status,
            report.delivered,
            report.attempted
        );
        report
    }

    /// Invierte `track_always`; solo es estado informativo, no filtra difusiones
    pub async fn toggle_tracking(&self, van_id: Uuid) -> Result<bool, AppError> {
        let van = self
            .store
            .get_van(van_id)
            .await?
            .ok_or_else(|| not_found_error("Van", &van_id.to_string()))?;

        let new_value = !van.track_always;
        if !self.store.update_van_tracking_flag(van_id, new_value).await? {
            return Err(not_found_error("Van", &van_id.to_string()));
        }

        log::info!("🛰️ Seguimiento del van {} -> {}", van_id, new_value);
        Ok(new_value)
    }
}
