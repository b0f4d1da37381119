use tracing::error;

use crate::booking::slots::{day_slots, format_date, is_weekend, parse_date};
use crate::error::AppError;
use crate::models::doctor::Doctor;
use crate::models::slot::DaySlots;
use crate::state::AppState;

/// The doctor list, or an empty one when the API cannot be reached.
pub async fn list_doctors(state: &AppState) -> Vec<Doctor> {
    match state.api.fetch_doctors().await {
        Ok(doctors) => doctors,
        Err(e) => {
            error!("Error fetching doctors: {}", e);
            Vec::new()
        }
    }
}

pub async fn get_day_slots(
    state: &AppState,
    doctor_id: &str,
    raw_date: &str,
) -> Result<DaySlots, AppError> {
    let date = parse_date(raw_date)?;
    let date_key = format_date(date);

    // weekends never reach the API
    if is_weekend(date) {
        return Err(AppError::Validation(format!(
            "{} falls on a weekend and cannot be booked.",
            date_key
        )));
    }

    let doctors = state.api.fetch_doctors().await?;
    let doctor = doctors
        .iter()
        .find(|d| d.id() == doctor_id)
        .ok_or_else(|| AppError::NotFound(format!("Doctor {} not found", doctor_id)))?;

    let key = (doctor_id.to_string(), date_key.clone());
    let booked = state.booked.merged(&key, doctor.booked_times(&date_key)).await;

    Ok(DaySlots {
        doc_id: doctor_id.to_string(),
        date: date_key,
        slots: day_slots(&booked),
    })
}
