use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::appointment::AppointmentEntry;

/// Date key (`YYYY-MM-DD`) to the entries booked on that date.
pub type AppointmentMap = BTreeMap<String, Vec<AppointmentEntry>>;

/// Fields of a doctor that every flattened appointment carries along.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorProfile {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
    #[serde(default)]
    pub doc_id: String,
    #[serde(default)]
    pub doc_name: String,
    #[serde(default)]
    pub speciality: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub image: String,
    #[serde(rename = "__v", default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
}

/// A doctor as served by `GET /doctors`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    #[serde(flatten)]
    pub profile: DoctorProfile,
    #[serde(default)]
    pub appointments: AppointmentMap,
}

impl Doctor {
    pub fn id(&self) -> &str {
        &self.profile.doc_id
    }

    /// Times already reserved on `date`. Entries without a time are skipped.
    pub fn booked_times(&self, date: &str) -> Vec<String> {
        self.appointments
            .get(date)
            .map(|entries| entries.iter().filter_map(|e| e.time.clone()).collect())
            .unwrap_or_default()
    }
}
