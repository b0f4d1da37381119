use crate::models::appointment::FlattenedAppointment;
use crate::models::doctor::Doctor;

/// One record per (doctor, date, entry), in doctor order, then date key order,
/// then entry order. Entries are copied through without validation.
pub fn flatten_doctor_appointments(doctors: &[Doctor]) -> Vec<FlattenedAppointment> {
    doctors
        .iter()
        .flat_map(|doctor| {
            doctor.appointments.iter().flat_map(move |(date, entries)| {
                entries.iter().map(move |entry| {
                    FlattenedAppointment::new(doctor.profile.clone(), date.clone(), entry.clone())
                })
            })
        })
        .collect()
}
