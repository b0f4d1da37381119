use chrono::NaiveDateTime;

use crate::clock::Clock;
use crate::models::appointment::{AppointmentListing, CompletionStatus, FlattenedAppointment};

pub const APPOINTMENT_DATETIME_FORMAT: &str = "%Y-%m-%d %I:%M %p";

/// `Completed` only when the appointment's moment is strictly before `now`.
/// Anything that does not parse counts as upcoming.
pub fn completion_status(date: &str, time: Option<&str>, now: NaiveDateTime) -> CompletionStatus {
    let Some(time) = time else {
        return CompletionStatus::Upcoming;
    };

    match NaiveDateTime::parse_from_str(&format!("{} {}", date, time), APPOINTMENT_DATETIME_FORMAT) {
        Ok(at) if at < now => CompletionStatus::Completed,
        _ => CompletionStatus::Upcoming,
    }
}

/// Turns flattened records into listing rows, evaluating status against `clock`.
pub fn listings(appointments: Vec<FlattenedAppointment>, clock: &dyn Clock) -> Vec<AppointmentListing> {
    let now = clock.now();

    appointments
        .into_iter()
        .map(|appointment| {
            let (date, time, issue) = match appointment.occurrence() {
                Some((date, entry)) => (date.to_string(), entry.time.clone(), entry.issue.clone()),
                None => (String::new(), None, None),
            };
            let status = completion_status(&date, time.as_deref(), now);

            AppointmentListing {
                appointment,
                date,
                time,
                issue,
                status,
            }
        })
        .collect()
}
