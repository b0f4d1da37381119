pub mod appointment;
pub mod booking;
pub mod doctor;
pub mod slot;
