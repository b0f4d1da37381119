use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::doctor::DoctorProfile;

/// One reserved slot under a doctor's date key. Every field is optional on the
/// wire; malformed entries are carried as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppointmentEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue: Option<String>,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// A doctor's fields paired with exactly one date and one entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlattenedAppointment {
    #[serde(flatten)]
    pub profile: DoctorProfile,
    pub appointments: BTreeMap<String, AppointmentEntry>,
}

impl FlattenedAppointment {
    pub fn new(profile: DoctorProfile, date: String, entry: AppointmentEntry) -> Self {
        Self {
            profile,
            appointments: BTreeMap::from([(date, entry)]),
        }
    }

    /// The single (date, entry) pair this record holds.
    pub fn occurrence(&self) -> Option<(&str, &AppointmentEntry)> {
        self.appointments
            .iter()
            .next()
            .map(|(date, entry)| (date.as_str(), entry))
    }
}

/// Body of `POST /doctors/{doctorId}/appointments` on the remote API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewAppointment {
    pub date: String,
    pub time: String,
    pub issue: String,
    pub status: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionStatus {
    Completed,
    Upcoming,
}

/// Row of the appointments listing.
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentListing {
    #[serde(flatten)]
    pub appointment: FlattenedAppointment,
    pub date: String,
    pub time: Option<String>,
    pub issue: Option<String>,
    pub status: CompletionStatus,
}
