use serde::{Deserialize, Serialize};

/// A bookable service offered by a business.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: i64,
    pub name: String,
    /// Duration in minutes.
    pub duration: u32,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Professional {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
}

/// A physical location where appointments take place.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BusinessOwner {
    pub name: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl BusinessOwner {
    pub fn display_name(&self) -> &str {
        self.business_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.name)
    }
}

/// Public profile returned for `/public/{username}`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BusinessProfile {
    pub owner: BusinessOwner,
    #[serde(default)]
    pub professionals: Vec<Professional>,
    #[serde(default)]
    pub units: Vec<Unit>,
    #[serde(default)]
    pub services: Vec<Service>,
}

impl BusinessProfile {
    pub fn professional(&self, id: &str) -> Option<&Professional> {
        self.professionals.iter().find(|p| p.id == id)
    }

    pub fn unit(&self, id: &str) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id)
    }

    pub fn service(&self, id: i64) -> Option<&Service> {
        self.services.iter().find(|s| s.id == id)
    }
}

/// Availability comes back either as a bare array or wrapped in an object.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum AvailabilityPayload {
    Slots(Vec<String>),
    Wrapped {
        #[serde(alias = "availableSlots")]
        slots: Vec<String>,
    },
}

impl AvailabilityPayload {
    pub fn into_slots(self) -> Vec<String> {
        match self {
            AvailabilityPayload::Slots(slots) => slots,
            AvailabilityPayload::Wrapped { slots } => slots,
        }
    }
}

/// Body of `POST /public/{username}/appointments`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentRequest {
    pub service_id: i64,
    pub professional_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_id: Option<String>,
    /// `YYYY-MM-DD`
    pub date: String,
    pub time: String,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentConfirmation {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

/// Error envelope the backend uses for non-2xx responses.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiErrorBody {
    pub fn text(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or(self.error.as_deref())
            .filter(|text| !text.trim().is_empty())
    }
}
