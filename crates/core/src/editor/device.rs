//! Named preview viewports.
//!
//! The selected frame only sizes the preview surface. It is never part of
//! the app configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Locale;

/// Width and height of a viewport in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceFrame {
    TabletLandscape,
    TabletPortrait,
    #[default]
    Mobile,
}

impl DeviceFrame {
    pub const ALL: [DeviceFrame; 3] = [
        DeviceFrame::TabletLandscape,
        DeviceFrame::TabletPortrait,
        DeviceFrame::Mobile,
    ];

    pub fn dimensions(self) -> Dimensions {
        let (width, height) = match self {
            Self::TabletLandscape => (1024, 768),
            Self::TabletPortrait => (768, 1024),
            Self::Mobile => (375, 812),
        };
        Dimensions { width, height }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::TabletLandscape => "tablet_landscape",
            Self::TabletPortrait => "tablet_portrait",
            Self::Mobile => "mobile",
        }
    }

    pub fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::TabletLandscape, Locale::Ko) => "태블릿 가로",
            (Self::TabletLandscape, Locale::En) => "Tablet landscape",
            (Self::TabletPortrait, Locale::Ko) => "태블릿 세로",
            (Self::TabletPortrait, Locale::En) => "Tablet portrait",
            (Self::Mobile, Locale::Ko) => "모바일",
            (Self::Mobile, Locale::En) => "Mobile",
        }
    }
}

impl fmt::Display for DeviceFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceFrame {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Unknown device '{s}'. Must be one of: tablet_landscape, tablet_portrait, mobile"
                ))
            })
    }
}

/// Called with the new frame and its dimensions on every selection.
pub type DeviceListener = Box<dyn FnMut(DeviceFrame, Dimensions) + Send>;

/// Holds the selected viewport. Starts on [`DeviceFrame::Mobile`].
#[derive(Default)]
pub struct DeviceSelector {
    selected: DeviceFrame,
    listener: Option<DeviceListener>,
}

impl DeviceSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listener(listener: DeviceListener) -> Self {
        Self {
            selected: DeviceFrame::default(),
            listener: Some(listener),
        }
    }

    pub fn selected(&self) -> DeviceFrame {
        self.selected
    }

    pub fn dimensions(&self) -> Dimensions {
        self.selected.dimensions()
    }

    pub fn select(&mut self, frame: DeviceFrame) {
        self.selected = frame;
        if let Some(listener) = self.listener.as_mut() {
            listener(frame, frame.dimensions());
        }
    }
}

impl fmt::Debug for DeviceSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceSelector")
            .field("selected", &self.selected)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[test]
    fn default_is_mobile() {
        let selector = DeviceSelector::new();
        assert_eq!(selector.selected(), DeviceFrame::Mobile);
        assert_eq!(selector.dimensions(), Dimensions { width: 375, height: 812 });
    }

    #[test]
    fn select_notifies_with_dimensions() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut selector = DeviceSelector::with_listener(Box::new(move |frame, dims| {
            sink.lock().unwrap().push((frame, dims));
        }));

        selector.select(DeviceFrame::TabletLandscape);

        assert_eq!(selector.selected(), DeviceFrame::TabletLandscape);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![(DeviceFrame::TabletLandscape, Dimensions { width: 1024, height: 768 })]
        );
    }

    #[test]
    fn portrait_is_landscape_rotated() {
        let landscape = DeviceFrame::TabletLandscape.dimensions();
        let portrait = DeviceFrame::TabletPortrait.dimensions();
        assert_eq!(landscape.width, portrait.height);
        assert_eq!(landscape.height, portrait.width);
    }

    #[test]
    fn parse_device_names() {
        for frame in DeviceFrame::ALL {
            assert_eq!(frame.as_str().parse::<DeviceFrame>().unwrap(), frame);
        }
        assert!("desktop".parse::<DeviceFrame>().is_err());
    }
}
