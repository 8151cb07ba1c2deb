//! One-object surface bundling detection, waits, and focused-text reads.

use crate::detector::{KeyboardDetector, KeyboardState};
use crate::element::ElementQuery;
use crate::failure::FailureSink;
use crate::responder::FirstResponderTextReader;
use crate::result::TecladoResult;
use crate::screen::ScreenInfo;
use crate::wait::{WaitOptions, WaitOutcome, Waiter};

/// Facade over one set of device boundaries
///
/// Bundles the geometric detector and the wait primitives so test code
/// holds a single object. The failure sink is shared: the detector's
/// precondition guard and the waiter's timeout path write their
/// screenshots through the same sink.
pub struct KeyboardHarness<Q, S, F> {
    detector: KeyboardDetector<Q, S, F>,
    waiter: Waiter<F>,
}

impl<Q, S, F> std::fmt::Debug for KeyboardHarness<Q, S, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyboardHarness").finish_non_exhaustive()
    }
}

impl<Q, S, F> KeyboardHarness<Q, S, F>
where
    Q: ElementQuery,
    S: ScreenInfo,
    F: FailureSink + Clone,
{
    /// Build a harness over the given device boundaries
    pub fn new(query: Q, screen: S, failures: F) -> Self {
        Self {
            detector: KeyboardDetector::new(query, screen, failures.clone()),
            waiter: Waiter::new(failures),
        }
    }

    /// The underlying geometric detector
    #[must_use]
    pub fn detector(&self) -> &KeyboardDetector<Q, S, F> {
        &self.detector
    }

    /// The underlying waiter
    #[must_use]
    pub fn waiter(&self) -> &Waiter<F> {
        &self.waiter
    }

    /// Whether any software keyboard is on screen
    pub fn keyboard_visible(&self) -> TecladoResult<bool> {
        self.detector.keyboard_visible()
    }

    /// Classify the current keyboard state
    pub fn keyboard_state(&self) -> TecladoResult<KeyboardState> {
        self.detector.keyboard_state()
    }

    /// Require a visible keyboard, capturing a screenshot on failure
    pub fn expect_keyboard_visible(&self) -> TecladoResult<()> {
        self.detector.expect_keyboard_visible()
    }

    /// Wait for a keyboard with the standard keyboard defaults
    pub fn wait_for_keyboard(&self) -> TecladoResult<WaitOutcome> {
        self.waiter
            .wait_for_keyboard(&self.detector, &WaitOptions::for_keyboard())
    }

    /// Wait for a keyboard with custom options
    pub fn wait_for_keyboard_with(&self, options: &WaitOptions) -> TecladoResult<WaitOutcome> {
        self.waiter.wait_for_keyboard(&self.detector, options)
    }

    /// Wait until no keyboard is on screen, with the standard defaults
    pub fn wait_for_no_keyboard(&self) -> TecladoResult<WaitOutcome> {
        self.waiter
            .wait_for_no_keyboard(&self.detector, &WaitOptions::for_no_keyboard())
    }

    /// Wait until no keyboard is on screen, with custom options
    pub fn wait_for_no_keyboard_with(&self, options: &WaitOptions) -> TecladoResult<WaitOutcome> {
        self.waiter.wait_for_no_keyboard(&self.detector, options)
    }

    /// Text of the view that currently holds the input focus
    pub fn text_from_first_responder(&self) -> TecladoResult<String> {
        FirstResponderTextReader::new(&self.detector).text_from_first_responder()
    }
}

// =============================================================================
// TESTS
// =============================================================================
