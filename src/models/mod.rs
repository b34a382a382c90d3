pub mod catalog;
pub mod draft;
pub mod form_field;
pub mod treatment_log;
