//! Background Tasks Module
//!
//! Contains background tasks that run alongside the store.
//!
//! # Tasks
//! - TTL Sweeper: Removes expired in-memory entries at configured intervals

mod sweeper;

pub use sweeper::spawn_sweeper_task;
