pub mod apps;
pub mod auth;
pub mod editor;
pub mod redirect;
