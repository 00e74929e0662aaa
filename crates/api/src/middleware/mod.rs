//! Request extractors.
//!
//! - [`session::SessionUser`] -- Resolves the `session` cookie to a backend user id.

pub mod session;
