//! Public booking endpoints.

use shared_types::{
    AppointmentConfirmation, AvailabilityPayload, BusinessProfile, CreateAppointmentRequest,
};

use super::client::ApiClient;
use super::error::ApiError;
use crate::booking::AvailabilityKey;

impl ApiClient {
    pub async fn get_business_profile(&self, username: &str) -> Result<BusinessProfile, ApiError> {
        tracing::debug!(username, "fetching business profile");
        let url = self.endpoint(&["public", username]);
        self.send(self.get(&url)).await
    }

    pub async fn get_availability(&self, key: &AvailabilityKey) -> Result<Vec<String>, ApiError> {
        tracing::debug!(?key, "fetching availability");
        let url = self.endpoint(&["public", &key.username, "availability"]);

        let mut query = vec![
            ("date", key.date_param()),
            ("serviceId", key.service_id.to_string()),
            ("professionalId", key.professional_id.clone()),
        ];
        if let Some(unit_id) = &key.unit_id {
            query.push(("unitId", unit_id.clone()));
        }

        let payload: AvailabilityPayload = self.send(self.get(&url).query(&query)).await?;
        Ok(payload.into_slots())
    }

    pub async fn create_public_appointment(
        &self,
        username: &str,
        request: &CreateAppointmentRequest,
    ) -> Result<AppointmentConfirmation, ApiError> {
        tracing::debug!(username, service_id = request.service_id, "creating appointment");
        let url = self.endpoint(&["public", username, "appointments"]);
        self.send(self.post(&url).json(request)).await
    }
}
