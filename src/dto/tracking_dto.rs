use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

// Reporte de posición enviado por la app del conductor
#[derive(Debug, Deserialize, Serialize)]
pub struct LocationUpdateRequest {
    pub van_id: String,
    pub lat: f64,
    pub lng: f64,
    pub status: String,
}

impl Validate for LocationUpdateRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.van_id.trim().is_empty() {
            errors.add("van_id", ValidationError::new("length"));
        }
        if !(-90.0..=90.0).contains(&self.lat) {
            errors.add("lat", ValidationError::new("latitude_out_of_range"));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            errors.add("lng", ValidationError::new("longitude_out_of_range"));
        }
        if self.status.trim().is_empty() {
            errors.add("status", ValidationError::new("length"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LocationUpdateResponse {
    pub message: String,
    pub delivered: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ToggleTrackingResponse {
    pub message: String,
    pub track_always: bool,
}
