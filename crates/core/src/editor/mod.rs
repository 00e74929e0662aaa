//! App builder editor: configuration schema, patches, section editors and
//! the controller that owns the current configuration.

pub mod coerce;
pub mod controller;
pub mod device;
pub mod patch;
pub mod schema;
pub mod sections;

pub use controller::ConfigController;
pub use device::{DeviceFrame, DeviceSelector, Dimensions};
pub use patch::{SectionKey, SectionPatch};
pub use schema::EditorConfig;
pub use sections::{controls_for, edit_section, Control, ControlKind, FieldInput, SectionEditor};
