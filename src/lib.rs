//! Warlore engine library.
//!
//! Exposes the board representation, battle resolver, action state
//! machine, and match orchestrator for use by integration tests and the
//! binary entry point.

pub mod action;
pub mod board;
pub mod catalog;
pub mod contest;
pub mod game;
pub mod resolve;
