pub mod dialog;
pub mod flatten;
pub mod slots;
pub mod status;
pub mod submit;
