use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub time: String,
    pub booked: bool,
}

impl Slot {
    pub fn is_available(&self) -> bool {
        !self.booked
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySlots {
    pub doc_id: String,
    pub date: String,
    pub slots: Vec<Slot>,
}
