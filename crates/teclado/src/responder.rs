//! Reading text out of the view that holds the input focus.

use crate::detector::KeyboardDetector;
use crate::element::{ElementDescriptor, ElementQuery, QueryKind, Selector};
use crate::failure::FailureSink;
use crate::result::TecladoResult;
use crate::screen::ScreenInfo;

/// Reads text from the current first responder
///
/// A borrowing view over a [`KeyboardDetector`]. Reading focused text is
/// only meaningful while a keyboard is up, so every read is gated on the
/// visibility precondition.
pub struct FirstResponderTextReader<'a, Q, S, F> {
    detector: &'a KeyboardDetector<Q, S, F>,
}

impl<Q, S, F> std::fmt::Debug for FirstResponderTextReader<'_, Q, S, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirstResponderTextReader")
            .finish_non_exhaustive()
    }
}

impl<'a, Q: ElementQuery, S: ScreenInfo, F: FailureSink> FirstResponderTextReader<'a, Q, S, F> {
    /// Create a reader over `detector`
    pub fn new(detector: &'a KeyboardDetector<Q, S, F>) -> Self {
        Self { detector }
    }

    /// Text of the view that currently holds the input focus
    ///
    /// Requires a visible keyboard; fails with
    /// [`crate::TecladoError::KeyboardNotVisible`] otherwise. Text fields
    /// are checked before text views, and a focused field wins even when
    /// it is empty. Returns an empty string when no focused input view is
    /// found or the focused view carries no text.
    pub fn text_from_first_responder(&self) -> TecladoResult<String> {
        self.detector.expect_keyboard_visible()?;

        for selector in [Selector::text_field(), Selector::text_view()] {
            let matches = self
                .detector
                .element_query()
                .query(&selector, QueryKind::Visible)?;
            if let Some(text) = first_responder_text(&matches) {
                return Ok(text);
            }
        }
        Ok(String::new())
    }
}

/// Text of the first focused element, `None` when none holds focus
fn first_responder_text(matches: &[ElementDescriptor]) -> Option<String> {
    matches
        .iter()
        .find(|el| el.first_responder)
        .map(|el| el.text.clone().unwrap_or_default())
}

// =============================================================================
// TESTS
// =============================================================================
