pub mod autosave;
pub mod backup;
pub mod controller;
pub mod log;
pub mod submission;
pub mod validation;
