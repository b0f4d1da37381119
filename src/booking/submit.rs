use chrono::NaiveDate;
use tracing::{error, info};

use crate::api::client::DoctorsApi;
use crate::booking::slots::{format_date, is_bookable_time, is_weekend};
use crate::error::{AppError, VALIDATION_MESSAGE};
use crate::models::appointment::NewAppointment;
use crate::models::booking::BookingConfirmation;

/// Status the remote API expects on a freshly created appointment.
const NEW_APPOINTMENT_STATUS: u8 = 0;

/// What has been filled in so far. Nothing here has been checked.
#[derive(Debug, Clone, Default)]
pub struct BookingDraft {
    pub doctor_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub issue: String,
}

/// A booking that passed local validation and may be sent.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidBooking {
    pub doctor_id: String,
    pub appointment: NewAppointment,
}

impl BookingDraft {
    /// Checks the draft against `time` and the slots already taken. Never touches
    /// the network.
    pub fn validate(&self, time: &str, booked: &[String]) -> Result<ValidBooking, AppError> {
        let (Some(doctor_id), Some(date)) = (self.doctor_id.as_deref(), self.date) else {
            return Err(AppError::Validation(VALIDATION_MESSAGE.to_string()));
        };
        if doctor_id.trim().is_empty() || self.issue.trim().is_empty() {
            return Err(AppError::Validation(VALIDATION_MESSAGE.to_string()));
        }
        if is_weekend(date) {
            return Err(AppError::Validation(
                "Appointments cannot be booked on weekends.".to_string(),
            ));
        }
        if !is_bookable_time(time) {
            return Err(AppError::Validation(format!(
                "{} is not a bookable time slot.",
                time
            )));
        }
        if booked.iter().any(|b| b == time) {
            return Err(AppError::Conflict(format!("{} is already booked.", time)));
        }

        Ok(ValidBooking {
            doctor_id: doctor_id.to_string(),
            appointment: NewAppointment {
                date: format_date(date),
                time: time.to_string(),
                issue: self.issue.clone(),
                status: NEW_APPOINTMENT_STATUS,
            },
        })
    }
}

/// Issues exactly one creation request for `booking`.
pub async fn submit_booking(
    api: &dyn DoctorsApi,
    booking: &ValidBooking,
) -> Result<BookingConfirmation, AppError> {
    let NewAppointment { date, time, .. } = &booking.appointment;

    match api.create_appointment(&booking.doctor_id, &booking.appointment).await {
        Ok(()) => {
            info!("Booked {} at {} with doctor {}", date, time, booking.doctor_id);
            Ok(BookingConfirmation {
                message: format!("Appointment booked on {} at {}", date, time),
            })
        }
        Err(e) => {
            error!("Failed to book appointment: {}", e);
            Err(e)
        }
    }
}
