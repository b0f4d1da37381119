use serde::{Deserialize, Serialize};

/// What the booking form submits. Any field may be missing; validation decides.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingForm {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub issue: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookingConfirmation {
    pub message: String,
}
