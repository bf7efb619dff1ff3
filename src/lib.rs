//! Flashcard deck storage and practice core
//!
//! This crate provides:
//! - An async key-value persistence boundary with memory and file backends
//! - Card / deck / tag collections with cascade and cleanup rules
//! - Derived views: per-deck counts, deck search and tag filtering
//! - Selection and practice-session state with reconciliation
//!
//! The UI layer (forms, dialogs, rendering) lives elsewhere; the
//! bundled `cardbox-cli` binary is a plain-text consumer of the same
//! API.

pub mod models;
pub mod session;
pub mod storage;
pub mod store;
pub mod views;
