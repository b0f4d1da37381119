use chrono::NaiveDate;

use crate::api::client::DoctorsApi;
use crate::booking::slots::{format_date, is_weekend, slots_for_date};
use crate::booking::submit::{BookingDraft, submit_booking};
use crate::error::AppError;
use crate::models::booking::BookingConfirmation;
use crate::models::doctor::Doctor;
use crate::models::slot::Slot;

/// State behind the "book an appointment" dialog.
///
/// Closed until [`open`](Self::open) picks a doctor. Slots appear once a weekday
/// is selected. A successful [`submit`](Self::submit) marks its slot booked
/// locally without refetching, and [`close`](Self::close) forgets everything.
#[derive(Debug, Clone, Default)]
pub struct BookingDialog {
    doctor: Option<Doctor>,
    date: Option<NaiveDate>,
    issue: String,
    booked_times: Vec<String>,
}

impl BookingDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.doctor.is_some()
    }

    pub fn doctor(&self) -> Option<&Doctor> {
        self.doctor.as_ref()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn issue(&self) -> &str {
        &self.issue
    }

    pub fn booked_times(&self) -> &[String] {
        &self.booked_times
    }

    pub fn open(&mut self, doctor: Doctor) {
        *self = Self {
            doctor: Some(doctor),
            ..Self::default()
        };
    }

    /// Selects `date` and loads the doctor's booked times for it. Weekends are
    /// refused and leave no date selected.
    pub fn select_date(&mut self, date: NaiveDate) -> Result<(), AppError> {
        let Some(doctor) = &self.doctor else {
            return Err(AppError::Validation("No doctor selected.".to_string()));
        };
        if is_weekend(date) {
            self.date = None;
            self.booked_times.clear();
            return Err(AppError::Validation(
                "Appointments cannot be booked on weekends.".to_string(),
            ));
        }

        self.booked_times = doctor.booked_times(&format_date(date));
        self.date = Some(date);
        Ok(())
    }

    pub fn set_issue(&mut self, issue: impl Into<String>) {
        self.issue = issue.into();
    }

    /// `None` until a weekday has been selected.
    pub fn slots(&self) -> Option<Vec<Slot>> {
        self.date
            .and_then(|date| slots_for_date(date, &self.booked_times))
    }

    pub async fn submit(
        &mut self,
        api: &dyn DoctorsApi,
        time: &str,
    ) -> Result<BookingConfirmation, AppError> {
        let draft = BookingDraft {
            doctor_id: self.doctor.as_ref().map(|d| d.id().to_string()),
            date: self.date,
            issue: self.issue.clone(),
        };
        let booking = draft.validate(time, &self.booked_times)?;

        let confirmation = submit_booking(api, &booking).await?;
        self.booked_times.push(booking.appointment.time);
        self.issue.clear();
        Ok(confirmation)
    }

    pub fn close(&mut self) {
        *self = Self::default();
    }
}
