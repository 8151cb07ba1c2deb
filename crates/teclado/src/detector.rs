//! Keyboard state classification over the live view hierarchy.
//!
//! Detection is geometric. A keyplane view sitting exactly flush with
//! the bottom edge of the screen is docked; a keyplane anywhere else is
//! undocked; the split layout is recognised by its dedicated image view.
//!
//! Nothing here is cached. Every predicate re-queries the device, and
//! an answer is only guaranteed for the instant its query ran.

use crate::element::{ElementDescriptor, ElementQuery, QueryKind, Selector};
use crate::failure::FailureSink;
use crate::result::{TecladoError, TecladoResult};
use crate::screen::ScreenInfo;
use tracing::debug;

// =============================================================================
// KEYBOARD STATE
// =============================================================================

/// Classified on-screen keyboard state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyboardState {
    /// Keyboard anchored to the bottom edge of the screen
    Docked,
    /// Keyboard detached and floating (tablets only)
    Undocked,
    /// Keyboard split into two halves (tablets only)
    Split,
    /// No software keyboard on screen
    Hidden,
}

impl KeyboardState {
    /// Whether any software keyboard is on screen
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        !matches!(self, Self::Hidden)
    }

    /// Lowercase state name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Docked => "docked",
            Self::Undocked => "undocked",
            Self::Split => "split",
            Self::Hidden => "hidden",
        }
    }
}

impl std::fmt::Display for KeyboardState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// DETECTION CAPABILITY
// =============================================================================

/// Keyboard visibility as a capability
///
/// The geometric [`KeyboardDetector`] is the primary implementation; the
/// legacy automation bridge provides a second one in
/// [`crate::uia::UiaKeyboardDetector`]. Wait primitives accept either.
pub trait KeyboardDetection {
    /// Whether any software keyboard is currently on screen
    fn keyboard_visible(&self) -> TecladoResult<bool>;
}

// =============================================================================
// KEYBOARD DETECTOR
// =============================================================================

/// Geometric keyboard detector over injected device boundaries
///
/// `Q` runs view-hierarchy queries, `S` answers screen metadata, and `F`
/// captures diagnostics when a precondition fails.
pub struct KeyboardDetector<Q, S, F> {
    query: Q,
    screen: S,
    failures: F,
}

impl<Q, S, F> std::fmt::Debug for KeyboardDetector<Q, S, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyboardDetector").finish_non_exhaustive()
    }
}

impl<Q: ElementQuery, S: ScreenInfo, F: FailureSink> KeyboardDetector<Q, S, F> {
    /// Create a detector over the given device boundaries
    pub fn new(query: Q, screen: S, failures: F) -> Self {
        Self {
            query,
            screen,
            failures,
        }
    }

    /// Whether a keyboard is docked to the bottom edge of the screen
    ///
    /// On phones any visible keyplane is docked; the OS offers no other
    /// placement, so no geometry is inspected. On tablets the keyplane
    /// frame must sit exactly flush: `screen_height - height == y` in
    /// points, with no tolerance. A frame off by any fraction of a point
    /// classifies as undocked.
    pub fn docked_keyboard_visible(&self) -> TecladoResult<bool> {
        let Some(keyplane) = self.first_keyplane()? else {
            return Ok(false);
        };
        if self.screen.device_family().is_phone() {
            return Ok(true);
        }

        let orientation = self.screen.orientation();
        let screen_height = self.screen.metrics().points_height(orientation);
        let rect = keyplane.rect;
        let docked = screen_height - rect.height == rect.y;
        debug!(
            screen_height,
            rect_y = rect.y,
            rect_height = rect.height,
            docked,
            "docked keyboard check"
        );
        Ok(docked)
    }

    /// Whether a keyboard is visible but detached from the bottom edge
    ///
    /// Phones cannot undock, so this is unconditionally false there. On
    /// tablets the keyplane is queried twice, once for presence and once
    /// inside the docked check; the screen can change between the two
    /// queries and the answer reflects whichever states the queries saw.
    pub fn undocked_keyboard_visible(&self) -> TecladoResult<bool> {
        if self.screen.device_family().is_phone() {
            return Ok(false);
        }
        if self.first_keyplane()?.is_none() {
            return Ok(false);
        }
        Ok(!self.docked_keyboard_visible()?)
    }

    /// Whether the split keyboard layout is on screen
    ///
    /// Split is recognised by its dedicated image view. The keyplane must
    /// simultaneously be absent: it lingers in the hierarchy while the
    /// keyboard transitions into the split layout.
    pub fn split_keyboard_visible(&self) -> TecladoResult<bool> {
        if self.screen.device_family().is_phone() {
            return Ok(false);
        }
        let split = self
            .query
            .query(&Selector::split_keyboard(), QueryKind::Visible)?;
        if split.is_empty() {
            return Ok(false);
        }
        Ok(self.first_keyplane()?.is_none())
    }

    /// Whether any software keyboard is on screen
    ///
    /// Checks docked, undocked, then split, short-circuiting on the
    /// first hit.
    pub fn keyboard_visible(&self) -> TecladoResult<bool> {
        Ok(self.docked_keyboard_visible()?
            || self.undocked_keyboard_visible()?
            || self.split_keyboard_visible()?)
    }

    /// Classify the current keyboard state
    ///
    /// Evaluation order matches [`Self::keyboard_visible`], so the two
    /// never disagree about visibility.
    pub fn keyboard_state(&self) -> TecladoResult<KeyboardState> {
        if self.docked_keyboard_visible()? {
            return Ok(KeyboardState::Docked);
        }
        if self.undocked_keyboard_visible()? {
            return Ok(KeyboardState::Undocked);
        }
        if self.split_keyboard_visible()? {
            return Ok(KeyboardState::Split);
        }
        Ok(KeyboardState::Hidden)
    }

    /// Require a visible keyboard, capturing a screenshot on failure
    ///
    /// Precondition guard for operations that only make sense while
    /// typing is possible. The screenshot is best-effort; failing to
    /// capture one never masks the missing keyboard.
    pub fn expect_keyboard_visible(&self) -> TecladoResult<()> {
        if self.keyboard_visible()? {
            return Ok(());
        }
        let screenshot = self.failures.capture_screenshot("keyboard_not_visible");
        Err(TecladoError::KeyboardNotVisible {
            message: "Keyboard is not visible".to_string(),
            screenshot,
        })
    }

    pub(crate) fn element_query(&self) -> &Q {
        &self.query
    }

    /// First keyplane view currently on screen, if any
    fn first_keyplane(&self) -> TecladoResult<Option<ElementDescriptor>> {
        let mut matches = self.query.query(&Selector::keyplane(), QueryKind::Visible)?;
        if matches.is_empty() {
            Ok(None)
        } else {
            Ok(Some(matches.remove(0)))
        }
    }
}

impl<Q: ElementQuery, S: ScreenInfo, F: FailureSink> KeyboardDetection
    for KeyboardDetector<Q, S, F>
{
    fn keyboard_visible(&self) -> TecladoResult<bool> {
        KeyboardDetector::keyboard_visible(self)
    }
}

// =============================================================================
// TESTS
// =============================================================================
