use serde::{Deserialize, Serialize};

/// Evento efímero de posición que se envía a cada suscriptor conectado.
///
/// Se serializa tal cual: `{"van_id", "lat", "lng", "status"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationBroadcast {
    pub van_id: String,
    pub lat: f64,
    pub lng: f64,
    pub status: String,
}
