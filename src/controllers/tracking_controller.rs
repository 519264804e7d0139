use uuid::Uuid;
use validator::Validate;

use crate::dto::tracking_dto::{
    LocationUpdateRequest, LocationUpdateResponse, ToggleTrackingResponse,
};
use crate::repositories::TransportStore;
use crate::services::{TrackingHub, TrackingService};
use crate::utils::errors::AppResult;

pub struct TrackingController<'a> {
    service: TrackingService<'a>,
}

impl<'a> TrackingController<'a> {
    pub fn new(store: &'a dyn TransportStore, hub: &'a TrackingHub) -> Self {
        Self {
            service: TrackingService::new(store, hub),
        }
    }

    pub async fn update_location(
        &self,
        request: LocationUpdateRequest,
    ) -> AppResult<LocationUpdateResponse> {
        request.validate()?;

        let report = self
            .service
            .report_location(&request.van_id, request.lat, request.lng, &request.status)
            .await;

        Ok(LocationUpdateResponse {
            message: "Location updated".to_string(),
            delivered: report.delivered,
        })
    }

    pub async fn toggle_tracking(&self, van_id: Uuid) -> AppResult<ToggleTrackingResponse> {
        let track_always = self.service.toggle_tracking(van_id).await?;
        Ok(ToggleTrackingResponse {
            message: "Tracking Toggled".to_string(),
            track_always,
        })
    }
}
