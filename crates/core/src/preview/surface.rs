//! Sandboxed nested document the preview is rendered into.
//!
//! The surface is a standalone HTML document delivered to the browser as
//! an `<iframe sandbox srcdoc=...>`, so editor styles and preview styles
//! cannot reach each other. The document context is created once by
//! [`PreviewSurface::mount`]; head and body content are re-projected into
//! it on every render.

use std::fmt::Write as _;

use html_escape::{encode_double_quoted_attribute, encode_style, encode_text};

use crate::editor::device::Dimensions;

/// Reset applied to every surface before any inherited or supplied styles.
const BASE_STYLE: &str = "html, body { margin: 0; padding: 0; height: 100%; background: #0F0F10; color: #fff; }\n\
* { box-sizing: border-box; }";

pub const DEFAULT_TITLE: &str = "App Preview";

/// A stylesheet shared by the host page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostStylesheet {
    /// `<link rel="stylesheet" href=...>`
    Link(String),
    /// Inline `<style>` text.
    Inline(String),
}

/// What the hosting page allows and offers.
#[derive(Debug, Clone, Default)]
pub struct HostEnvironment {
    /// Whether the host permits creating a nested browsing context.
    pub nested_contexts: bool,
    pub stylesheets: Vec<HostStylesheet>,
}

impl HostEnvironment {
    /// A host that allows nested contexts and shares no stylesheets.
    pub fn standard() -> Self {
        Self {
            nested_contexts: true,
            stylesheets: Vec::new(),
        }
    }

    /// A host that forbids nested contexts.
    pub fn restricted() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone)]
pub struct SurfaceOptions {
    pub title: String,
    /// Attributes set on the nested `<html>` element. Entries with invalid
    /// attribute names are skipped.
    pub html_attrs: Vec<(String, String)>,
    /// Copy the host's stylesheets into the surface when it is mounted.
    pub inherit_host_styles: bool,
    pub stylesheet_urls: Vec<String>,
    pub style_text: Option<String>,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            html_attrs: Vec::new(),
            inherit_host_styles: false,
            stylesheet_urls: Vec::new(),
            style_text: None,
        }
    }
}

/// The created nested context. Holds the snapshot of host styles taken at
/// mount time.
#[derive(Debug, Clone)]
struct MountedContext {
    inherited: Vec<HostStylesheet>,
}

#[derive(Debug, Clone)]
pub struct PreviewSurface {
    options: SurfaceOptions,
    context: Option<MountedContext>,
    size: Option<Dimensions>,
    head: String,
    body: String,
}

impl PreviewSurface {
    pub fn new(options: SurfaceOptions) -> Self {
        Self {
            options,
            context: None,
            size: None,
            head: String::new(),
            body: String::new(),
        }
    }

    /// Create the nested context once. Returns whether the surface is
    /// mounted afterwards.
    ///
    /// Mounting again is a no-op and does not refresh the style snapshot.
    pub fn mount(&mut self, host: &HostEnvironment) -> bool {
        if self.context.is_some() {
            return true;
        }
        if !host.nested_contexts {
            tracing::debug!("Host forbids nested contexts, preview surface not mounted");
            return false;
        }
        let inherited = if self.options.inherit_host_styles {
            host.stylesheets.clone()
        } else {
            Vec::new()
        };
        self.context = Some(MountedContext { inherited });
        true
    }

    pub fn is_mounted(&self) -> bool {
        self.context.is_some()
    }

    /// Replace the head and body content. Content projected before mount is
    /// kept and appears once the surface is mounted.
    pub fn project(&mut self, head: impl Into<String>, body: impl Into<String>) {
        self.head = head.into();
        self.body = body.into();
    }

    pub fn resize(&mut self, size: Dimensions) {
        self.size = Some(size);
    }

    /// Full standalone document, or `None` while unmounted.
    pub fn document(&self) -> Option<String> {
        let context = self.context.as_ref()?;

        let mut doc = String::from("<!DOCTYPE html><html");
        for (name, value) in &self.options.html_attrs {
            if !is_attr_name(name) {
                tracing::debug!(attr = %name, "Skipping invalid html attribute");
                continue;
            }
            let _ = write!(doc, " {name}=\"{}\"", encode_double_quoted_attribute(value));
        }
        doc.push_str("><head><meta charset=\"utf-8\">");
        let _ = write!(doc, "<title>{}</title>", encode_text(&self.options.title));
        let _ = write!(doc, "<style>{BASE_STYLE}</style>");

        for sheet in &context.inherited {
            push_stylesheet(&mut doc, sheet);
        }
        for href in &self.options.stylesheet_urls {
            push_stylesheet(&mut doc, &HostStylesheet::Link(href.clone()));
        }
        if let Some(text) = &self.options.style_text {
            push_stylesheet(&mut doc, &HostStylesheet::Inline(text.clone()));
        }

        doc.push_str(&self.head);
        doc.push_str("</head><body>");
        doc.push_str(&self.body);
        doc.push_str("</body></html>");
        Some(doc)
    }

    /// The `<iframe>` element carrying the document, or an empty string
    /// when there is nothing to show.
    pub fn to_iframe(&self) -> String {
        let Some(document) = self.document() else {
            return String::new();
        };
        let mut html = format!(
            "<iframe title=\"{}\" sandbox=\"\" style=\"border: none\"",
            encode_double_quoted_attribute(&self.options.title)
        );
        if let Some(Dimensions { width, height }) = self.size {
            let _ = write!(html, " width=\"{width}\" height=\"{height}\"");
        }
        let _ = write!(html, " srcdoc=\"{}\"></iframe>", encode_double_quoted_attribute(&document));
        html
    }
}

fn push_stylesheet(doc: &mut String, sheet: &HostStylesheet) {
    match sheet {
        HostStylesheet::Link(href) => {
            let _ = write!(
                doc,
                "<link rel=\"stylesheet\" type=\"text/css\" href=\"{}\">",
                encode_double_quoted_attribute(href)
            );
        }
        HostStylesheet::Inline(text) => {
            let _ = write!(doc, "<style>{}</style>", encode_style(text));
        }
    }
}

fn is_attr_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == ':')
}
