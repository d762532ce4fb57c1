//! Headless driver and local session store for Tutor Hub.
//!
//! The engine's tick functions are scheduler-agnostic; this crate supplies
//! the real scheduler. Each simulation loop owns exactly one tokio interval,
//! and every exit path (natural completion, stop signal, driver shutdown)
//! ends the task and drops the timer with it, so no stray ticks can fire
//! after a loop is stopped.
//!
//! The session store mirrors the hosting application's local-storage layer
//! behind a key-value abstraction; see [`sessions::SessionManager`].

pub mod driver;
pub mod sessions;
pub mod store;

pub use driver::{spawn_farm_loop, spawn_gas_loop, SimLoop, StopSignal};
pub use sessions::{export_transcript, parse_transcript, SessionError, SessionManager};
pub use store::{KvStore, MemoryStore, StoreError};
