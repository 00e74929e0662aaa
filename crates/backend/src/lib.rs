//! HTTP clients for the services this app delegates to: the business
//! backend (accounts and app persistence) and the Kakao identity provider.

pub mod client;
pub mod error;
pub mod kakao;
pub mod reply;

pub use client::{BackendClient, CreatedApp};
pub use error::BackendError;
pub use kakao::{KakaoClient, KakaoProfile};
pub use reply::BackendReply;
