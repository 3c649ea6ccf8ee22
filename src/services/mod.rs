// Service module exports

pub mod participants;
pub mod provider;
pub mod schedule;
pub mod settings;
pub mod view_resolver;
