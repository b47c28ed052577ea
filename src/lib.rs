//! Assigning people to cleaning zones: a one-occupant-per-zone assignment
//! store, a label classifier that groups zones for display, and a formatter
//! for the copyable result.

pub mod error;
pub mod model;
pub mod seed;
pub mod parser;
pub mod config;
pub mod classify;
pub mod format;
pub mod clipboard;
pub mod board;
pub mod display;
pub mod repl;
pub mod web;

pub use board::{Action, AssignmentMap, AssignmentStore, Notice, RangeStore};
pub use error::SeedError;
pub use model::{Person, Roster, Zone};
