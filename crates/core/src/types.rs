use serde::{Deserialize, Serialize};

/// Backend user identifier. Opaque to this service; the backend owns the format.
pub type UserId = String;

/// Backend app identifier.
pub type AppId = String;

/// Display locale for labels shown in the editor and preview.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ko,
    En,
}
