//! Domain logic for the AI app builder.
//!
//! Everything in this crate is pure and synchronous: the editor
//! configuration model and its merge rules, the section editors that turn
//! raw form input into typed patches, the preview pipeline, and the
//! classification of authentication outcomes. I/O lives in the session,
//! backend and api crates.

pub mod auth;
pub mod editor;
pub mod error;
pub mod preview;
pub mod types;
