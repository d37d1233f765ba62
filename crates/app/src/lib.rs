//! Store installation lifecycle: persistence, platform client and the
//! orchestration between them.

pub mod context;
pub mod database;
pub mod domain;
pub mod installations;
pub mod platform;
pub mod secrets;

#[cfg(test)]
mod test;

mod uuids;
