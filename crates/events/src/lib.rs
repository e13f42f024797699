//! Beacon notification bus.
//!
//! This crate provides the in-process core of the bus:
//!
//! - [`RingBuffer`] — fixed-capacity FIFO that overwrites its oldest slot.
//! - [`NotificationStore`] — the single shared, bounded, ordered event log.
//!   Assigns ids, evicts, and wakes every waiter on push.
//! - [`query`] — pure slicing of a store snapshot by `since` id and limit.
//! - [`poll`] — bounded long-poll over the store.
//! - [`stream`] — backlog replay followed by live frames and heartbeats.
//! - [`Publisher`] — the capability other subsystems depend on to emit
//!   notifications without knowing about the store.

pub mod config;
pub mod poll;
pub mod publisher;
pub mod query;
pub mod ring;
pub mod store;
pub mod stream;

pub use config::BusConfig;
pub use poll::{PollRequest, PollResult};
pub use publisher::Publisher;
pub use ring::RingBuffer;
pub use store::NotificationStore;
pub use stream::StreamFrame;
