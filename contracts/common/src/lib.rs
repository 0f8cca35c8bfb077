//! Shared helpers for the staking contract suite.
//!
//! - [`roles`] — role-based admin authorization stored in contract storage.

#![no_std]

pub mod roles;

pub use roles::AdminRole;
