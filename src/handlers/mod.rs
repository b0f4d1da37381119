pub mod appointments;
pub mod doctors;
