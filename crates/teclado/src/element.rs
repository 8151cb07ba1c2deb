//! Element query boundary: selectors, descriptors, and the device-side
//! query trait.
//!
//! Keyboard detection never talks to a device directly. It issues
//! [`Selector`]s through an injected [`ElementQuery`] implementation and
//! reasons about the returned [`ElementDescriptor`]s. Whatever transport
//! sits behind the trait (HTTP into an instrumented app, a local
//! simulator channel, a scripted mock) is invisible to the detection
//! logic.

use crate::geometry::Rect;
use crate::result::TecladoResult;
use serde::{Deserialize, Serialize};

// =============================================================================
// SELECTOR CONSTANTS
// =============================================================================

/// View-hierarchy match strings issued by keyboard detection
pub mod selectors {
    /// Keyplane view, present whenever any software keyboard is up
    pub const KEYPLANE_VIEW: &str = "view:'UIKBKeyplaneView'";
    /// Image view present only while the split keyboard layout is shown
    pub const SPLIT_KEYBOARD_VIEW: &str = "view:'UIKBSplitImageView'";
    /// Single-line text entry class
    pub const TEXT_FIELD: &str = "textField";
    /// Multi-line text entry class
    pub const TEXT_VIEW: &str = "textView";
}

// =============================================================================
// SELECTOR
// =============================================================================

/// A view-hierarchy selector
///
/// Selectors are opaque match strings interpreted by the device-side
/// query service. This crate only issues them; it never parses one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selector(String);

impl Selector {
    /// Selector from a raw match string
    #[must_use]
    pub fn raw(query: impl Into<String>) -> Self {
        Self(query.into())
    }

    /// Selector matching a concrete view class
    #[must_use]
    pub fn view_class(class: &str) -> Self {
        Self(format!("view:'{class}'"))
    }

    /// Keyplane view selector (any software keyboard)
    #[must_use]
    pub fn keyplane() -> Self {
        Self::raw(selectors::KEYPLANE_VIEW)
    }

    /// Split-keyboard image view selector
    #[must_use]
    pub fn split_keyboard() -> Self {
        Self::raw(selectors::SPLIT_KEYBOARD_VIEW)
    }

    /// Text field selector
    #[must_use]
    pub fn text_field() -> Self {
        Self::raw(selectors::TEXT_FIELD)
    }

    /// Text view selector
    #[must_use]
    pub fn text_view() -> Self {
        Self::raw(selectors::TEXT_VIEW)
    }

    /// The match string sent to the device
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// QUERY KIND
// =============================================================================

/// Which part of the view hierarchy a query inspects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QueryKind {
    /// Only views currently visible on screen (the default)
    #[default]
    Visible,
    /// The full hierarchy, including hidden and offscreen views
    All,
}

// =============================================================================
// ELEMENT DESCRIPTOR
// =============================================================================

/// Snapshot of one matched view
///
/// Descriptors are produced fresh for every query and are stale the
/// moment they are returned. Nothing in this crate holds on to one
/// across queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementDescriptor {
    /// Frame in points
    pub rect: Rect,
    /// Device-side view class name
    #[serde(default)]
    pub class: String,
    /// Whether this view currently holds the input focus
    #[serde(default)]
    pub first_responder: bool,
    /// Text content, for views that carry any
    #[serde(default)]
    pub text: Option<String>,
}

impl ElementDescriptor {
    /// Descriptor with a frame and class, no focus, no text
    #[must_use]
    pub fn new(rect: Rect, class: impl Into<String>) -> Self {
        Self {
            rect,
            class: class.into(),
            first_responder: false,
            text: None,
        }
    }

    /// Mark whether this view holds the input focus
    #[must_use]
    pub fn with_first_responder(mut self, focused: bool) -> Self {
        self.first_responder = focused;
        self
    }

    /// Attach text content
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

// =============================================================================
// QUERY BOUNDARY
// =============================================================================

/// Device-side view hierarchy query
///
/// Implementations run `selector` against the instrumented app and
/// return one descriptor per matched view. An empty vec means the
/// selector matched nothing; an `Err` means the transport itself failed.
pub trait ElementQuery {
    /// Run `selector` against the view hierarchy
    fn query(&self, selector: &Selector, kind: QueryKind) -> TecladoResult<Vec<ElementDescriptor>>;
}

// =============================================================================
// TESTS
// =============================================================================
