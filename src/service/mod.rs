pub mod date_picker;
pub mod layout_service;
pub mod overlap;
pub mod panel_service;
pub mod schedule_form;
