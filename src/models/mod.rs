use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// District used when a picked address has no comma-separated district part
pub const DEFAULT_DISTRICT: &str = "Centro";

/// Kind of service being booked
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ServiceType {
    Hourly,
    TechVisit,
    Emergency,
}

impl ServiceType {
    /// Human-readable option label including the professional's rate
    pub fn label(&self, rates: &Rates) -> String {
        match self {
            ServiceType::Hourly => format!("Hourly work (${}/h)", rates.hourly),
            ServiceType::TechVisit => format!("Technical visit (${})", rates.tech_visit),
            ServiceType::Emergency => format!("Emergency (${})", rates.emergency),
        }
    }
}

/// Rates a professional charges per service type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rates {
    pub hourly: i64,
    pub tech_visit: i64,
    pub emergency: i64,
}

/// A service professional as listed in the marketplace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Professional {
    pub id: String,
    pub owner_name: String,
    pub trade: String,
    pub rates: Rates,
}

impl Professional {
    /// Option labels for the service-type selector, in form order
    pub fn service_type_labels(&self) -> Vec<String> {
        [
            ServiceType::Hourly,
            ServiceType::TechVisit,
            ServiceType::Emergency,
        ]
        .iter()
        .map(|service_type| service_type.label(&self.rates))
        .collect()
    }
}

/// Street-level address within a district
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Address {
    pub street: String,
    pub district: String,
}

impl Address {
    /// Empty address, as the reservation form starts out
    pub fn empty() -> Self {
        Self {
            street: String::new(),
            district: String::new(),
        }
    }

    /// Derive street/district from a geocoded display address.
    ///
    /// Splits on the first comma: the part before it is the street, the
    /// remainder is the district. With no comma the whole string is the
    /// street and the district falls back to [`DEFAULT_DISTRICT`].
    ///
    /// With more than one comma the whole remainder becomes the district
    /// ("A, B, C" -> district "B, C"); earlier pickers kept only the
    /// second segment, but everything after the first comma is the
    /// contracted behavior here.
    pub fn from_display_address(display: &str) -> Self {
        match display.split_once(',') {
            Some((street, district)) => {
                let district = district.trim();
                Self {
                    street: street.trim().to_string(),
                    district: if district.is_empty() {
                        DEFAULT_DISTRICT.to_string()
                    } else {
                        district.to_string()
                    },
                }
            }
            None => Self {
                street: display.trim().to_string(),
                district: if display.trim().is_empty() {
                    String::new()
                } else {
                    DEFAULT_DISTRICT.to_string()
                },
            },
        }
    }

    /// True when both street and district carry non-whitespace content
    pub fn is_complete(&self) -> bool {
        !self.street.trim().is_empty() && !self.district.trim().is_empty()
    }
}

/// Position picked in the location selector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub display_address: String,
}

/// In-progress reservation request, mutated only by user input
#[derive(Debug, Clone)]
pub struct ReservationDraft {
    pub work_description: String,
    pub address: Address,
    pub service_type: ServiceType,
    pub resolved_location: Option<ResolvedLocation>,
    pub opened_at: DateTime<Utc>,
}

impl ReservationDraft {
    /// Fresh draft, created when the reservation flow opens
    pub fn new() -> Self {
        Self {
            work_description: String::new(),
            address: Address::empty(),
            service_type: ServiceType::Hourly,
            resolved_location: None,
            opened_at: Utc::now(),
        }
    }

    /// True when the picked location has a usable display address
    pub fn has_location(&self) -> bool {
        self.resolved_location
            .as_ref()
            .map(|loc| !loc.display_address.trim().is_empty())
            .unwrap_or(false)
    }
}

impl Default for ReservationDraft {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a completed coverage validation.
///
/// Fully replaced or cleared on each validation, never patched field by
/// field. `details` is an opaque display payload passed through from the
/// backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoverageOutcome {
    pub within_coverage: bool,
    pub details: serde_json::Value,
}

/// Identifies which inputs an in-flight or completed validation belongs to.
///
/// A response is applied only while its key still equals the current one;
/// stale responses for abandoned keys are discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationRequestKey {
    pub professional_id: String,
    pub street: String,
    pub district: String,
    pub service_type: ServiceType,
}

impl ValidationRequestKey {
    pub fn new(professional_id: &str, address: &Address, service_type: ServiceType) -> Self {
        Self {
            professional_id: professional_id.to_string(),
            street: address.street.trim().to_string(),
            district: address.district.trim().to_string(),
            service_type,
        }
    }
}

/// Structured event handed to the notification collaborator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationEvent {
    pub category: String,
    pub title: String,
    pub message: String,
    pub icon: String,
    pub link: String,
    pub actions: Vec<NotificationAction>,
}

/// Action button attached to a notification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationAction {
    pub action: String,
    pub title: String,
}
