use tracing::{error, warn};

use crate::booking::flatten::flatten_doctor_appointments;
use crate::booking::slots::parse_date;
use crate::booking::status::listings;
use crate::booking::submit::{BookingDraft, submit_booking};
use crate::error::AppError;
use crate::models::appointment::AppointmentListing;
use crate::models::booking::{BookingConfirmation, BookingForm};
use crate::state::AppState;

/// Every booked appointment, one row each, with status evaluated now.
pub async fn list_appointments(state: &AppState) -> Vec<AppointmentListing> {
    match state.api.fetch_doctors().await {
        Ok(doctors) => listings(flatten_doctor_appointments(&doctors), state.clock.as_ref()),
        Err(e) => {
            error!("Error fetching doctors: {}", e);
            Vec::new()
        }
    }
}

pub async fn book_appointment(
    state: &AppState,
    doctor_id: &str,
    form: BookingForm,
) -> Result<BookingConfirmation, AppError> {
    let date = match form.date.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => Some(parse_date(raw)?),
        _ => None,
    };
    let Some(time) = form.time.filter(|t| !t.trim().is_empty()) else {
        return Err(AppError::Validation("Please choose a time slot.".to_string()));
    };

    let draft = BookingDraft {
        doctor_id: Some(doctor_id.to_string()),
        date,
        issue: form.issue.unwrap_or_default(),
    };
    // local checks only, nothing has gone over the wire yet
    let checked = draft.validate(&time, &[])?;
    let key = (checked.doctor_id.clone(), checked.appointment.date.clone());

    // claimed before the booked-set read so a duplicate cannot slip in between
    let Some(_guard) = state.in_flight.claim(key.clone(), time.clone()) else {
        warn!("Duplicate booking for {} at {} rejected while in flight", key.1, time);
        return Err(AppError::Conflict(format!(
            "A booking for {} on {} is already in progress.",
            time, key.1
        )));
    };

    let doctors = state.api.fetch_doctors().await?;
    let doctor = doctors
        .iter()
        .find(|d| d.id() == doctor_id)
        .ok_or_else(|| AppError::NotFound(format!("Doctor {} not found", doctor_id)))?;
    let booked = state.booked.merged(&key, doctor.booked_times(&key.1)).await;
    let booking = draft.validate(&time, &booked)?;

    let confirmation = submit_booking(state.api.as_ref(), &booking).await?;
    state.booked.record(key, time).await;

    Ok(confirmation)
}
