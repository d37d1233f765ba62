//! Domain Concerns

pub mod stores;
