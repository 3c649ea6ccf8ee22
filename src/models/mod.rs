// Module exports for models

pub mod availability;
pub mod date_range;
pub mod event;
pub mod participant;
pub mod settings;
pub mod ui;
