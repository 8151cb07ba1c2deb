//! Poll-until-condition wait primitives.
//!
//! Waits here are the only retry mechanism in the crate: a predicate is
//! evaluated, the thread sleeps for the retry interval, and the cycle
//! repeats until the predicate passes or the timeout budget is spent.
//! Predicate errors are never swallowed; they abort the wait at once.

use crate::detector::KeyboardDetection;
use crate::failure::FailureSink;
use crate::result::{TecladoError, TecladoResult};
use crate::uia::{self, AutomationBridge};
use std::time::{Duration, Instant};
use tracing::{trace, warn};

// =============================================================================
// CONSTANTS
// =============================================================================

/// Default timeout for wait operations (30 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 30_000;

/// Default interval between predicate evaluations (300ms)
pub const DEFAULT_RETRY_FREQUENCY_MS: u64 = 300;

/// Settle delay after a keyboard appears (300ms)
pub const KEYBOARD_SETTLE_MS: u64 = 300;

/// Timeout for the legacy automation keyboard wait (10 seconds)
pub const UIA_WAIT_TIMEOUT_MS: u64 = 10_000;

/// Polling interval for the legacy automation path (100ms)
pub const UIA_RETRY_FREQUENCY_MS: u64 = 100;

/// Settle delay after the legacy path sees a keyboard (500ms)
pub const UIA_SETTLE_MS: u64 = 500;

/// Timeout message when a keyboard fails to appear
pub const KEYBOARD_TIMEOUT_MESSAGE: &str = "Keyboard did not appear";

/// Timeout message when a keyboard fails to leave the screen
pub const NO_KEYBOARD_TIMEOUT_MESSAGE: &str = "Keyboard is visible";

// =============================================================================
// WAIT OPTIONS
// =============================================================================

/// Options for wait operations
#[derive(Debug, Clone)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Interval between predicate evaluations in milliseconds
    pub retry_frequency_ms: u64,
    /// Settle delay after the predicate passes, in milliseconds
    pub post_timeout_ms: u64,
    /// Message carried by the timeout error
    pub timeout_message: String,
    /// Capture a diagnostic screenshot when the wait times out
    pub screenshot_on_timeout: bool,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            retry_frequency_ms: DEFAULT_RETRY_FREQUENCY_MS,
            post_timeout_ms: 0,
            timeout_message: "Condition not satisfied".to_string(),
            screenshot_on_timeout: true,
        }
    }
}

impl WaitOptions {
    /// Create new wait options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for waiting until a keyboard appears
    ///
    /// Applies the keyboard settle delay so the first synthetic touch
    /// after the wait lands on a fully animated-in keyboard.
    #[must_use]
    pub fn for_keyboard() -> Self {
        Self {
            post_timeout_ms: KEYBOARD_SETTLE_MS,
            timeout_message: KEYBOARD_TIMEOUT_MESSAGE.to_string(),
            ..Self::default()
        }
    }

    /// Options for waiting until no keyboard is on screen
    #[must_use]
    pub fn for_no_keyboard() -> Self {
        Self {
            timeout_message: NO_KEYBOARD_TIMEOUT_MESSAGE.to_string(),
            ..Self::default()
        }
    }

    /// Options for the legacy automation keyboard wait
    ///
    /// Polls faster than the geometric path and settles longer, matching
    /// the slower round trip of the automation channel. The timeout is
    /// tighter as well, ten seconds against the generic thirty.
    #[must_use]
    pub fn for_uia_keyboard() -> Self {
        Self {
            timeout_ms: UIA_WAIT_TIMEOUT_MS,
            retry_frequency_ms: UIA_RETRY_FREQUENCY_MS,
            post_timeout_ms: UIA_SETTLE_MS,
            timeout_message: KEYBOARD_TIMEOUT_MESSAGE.to_string(),
            ..Self::default()
        }
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set the retry interval in milliseconds
    #[must_use]
    pub fn with_retry_frequency(mut self, retry_frequency_ms: u64) -> Self {
        self.retry_frequency_ms = retry_frequency_ms;
        self
    }

    /// Set the settle delay applied after success, in milliseconds
    #[must_use]
    pub fn with_post_timeout(mut self, post_timeout_ms: u64) -> Self {
        self.post_timeout_ms = post_timeout_ms;
        self
    }

    /// Set the message carried by the timeout error
    #[must_use]
    pub fn with_timeout_message(mut self, message: impl Into<String>) -> Self {
        self.timeout_message = message.into();
        self
    }

    /// Enable or disable the diagnostic screenshot on timeout
    #[must_use]
    pub fn with_screenshot_on_timeout(mut self, capture: bool) -> Self {
        self.screenshot_on_timeout = capture;
        self
    }

    /// Get timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get retry interval as Duration
    #[must_use]
    pub const fn retry_frequency(&self) -> Duration {
        Duration::from_millis(self.retry_frequency_ms)
    }

    /// Get settle delay as Duration
    #[must_use]
    pub const fn post_timeout(&self) -> Duration {
        Duration::from_millis(self.post_timeout_ms)
    }
}

// =============================================================================
// WAIT OUTCOME
// =============================================================================

/// Record of a successful wait
///
/// Timeouts are errors, not outcomes; see
/// [`TecladoError::WaitTimeout`].
#[derive(Debug, Clone)]
pub struct WaitOutcome {
    /// Time spent polling before the predicate passed
    ///
    /// Excludes the settle delay, so wall-clock time can be longer.
    pub elapsed: Duration,
    /// Number of predicate evaluations
    pub polls: usize,
    /// Description of what was waited for
    pub waited_for: String,
}

// =============================================================================
// WAITER
// =============================================================================

/// Poll-driven synchronization over a failure sink
///
/// The sink captures diagnostic screenshots when a wait times out. Use
/// [`crate::failure::NullSink`] when artifacts are not wanted.
#[derive(Debug, Clone, Default)]
pub struct Waiter<F> {
    failures: F,
}

impl<F: FailureSink> Waiter<F> {
    /// Create a waiter reporting timeouts through `failures`
    pub fn new(failures: F) -> Self {
        Self { failures }
    }

    /// Poll `predicate` until it passes or the timeout budget is spent
    ///
    /// The predicate is evaluated immediately and then once per retry
    /// interval, so it runs at least once even with a zero timeout. On
    /// success the settle delay runs before returning. On timeout a
    /// screenshot is captured (unless disabled) and the configured
    /// timeout message is raised. A predicate error aborts the wait at
    /// once.
    pub fn wait_until<P>(
        &self,
        description: &str,
        predicate: P,
        options: &WaitOptions,
    ) -> TecladoResult<WaitOutcome>
    where
        P: Fn() -> TecladoResult<bool>,
    {
        let start = Instant::now();
        let timeout = options.timeout();
        let mut polls = 0usize;

        loop {
            polls += 1;
            if predicate()? {
                let elapsed = start.elapsed();
                trace!(description, polls, ?elapsed, "wait satisfied");
                if options.post_timeout_ms > 0 {
                    std::thread::sleep(options.post_timeout());
                }
                return Ok(WaitOutcome {
                    elapsed,
                    polls,
                    waited_for: description.to_string(),
                });
            }
            if start.elapsed() >= timeout {
                break;
            }
            std::thread::sleep(options.retry_frequency());
        }

        warn!(description, timeout_ms = options.timeout_ms, "wait timed out");
        let screenshot = if options.screenshot_on_timeout {
            self.failures.capture_screenshot(description)
        } else {
            None
        };
        Err(TecladoError::WaitTimeout {
            message: options.timeout_message.clone(),
            ms: options.timeout_ms,
            screenshot,
        })
    }

    /// Wait until `detector` reports a visible keyboard
    ///
    /// Pass [`WaitOptions::for_keyboard`] for the standard defaults.
    pub fn wait_for_keyboard<D: KeyboardDetection>(
        &self,
        detector: &D,
        options: &WaitOptions,
    ) -> TecladoResult<WaitOutcome> {
        self.wait_until("keyboard visible", || detector.keyboard_visible(), options)
    }

    /// Wait until `detector` reports no keyboard on screen
    ///
    /// Pass [`WaitOptions::for_no_keyboard`] for the standard defaults.
    pub fn wait_for_no_keyboard<D: KeyboardDetection>(
        &self,
        detector: &D,
        options: &WaitOptions,
    ) -> TecladoResult<WaitOutcome> {
        self.wait_until(
            "no keyboard visible",
            || Ok(!detector.keyboard_visible()?),
            options,
        )
    }

    /// Wait for a keyboard through the legacy automation bridge
    ///
    /// Fails with [`TecladoError::AutomationUnavailable`] before the
    /// first poll when no instrumentation session is attached. Pass
    /// [`WaitOptions::for_uia_keyboard`] for the standard defaults.
    pub fn uia_wait_for_keyboard<B: AutomationBridge>(
        &self,
        bridge: &B,
        options: &WaitOptions,
    ) -> TecladoResult<WaitOutcome> {
        if !bridge.available() {
            return Err(TecladoError::AutomationUnavailable {
                message: "keyboard wait requires an instrumentation session".to_string(),
            });
        }
        self.wait_until(
            "keyboard window (automation)",
            || uia::keyboard_shown(bridge),
            options,
        )
    }
}

// =============================================================================
// CONVENIENCE FUNCTIONS
// =============================================================================

/// Poll `predicate` with default options and no artifacts
pub fn wait_until<P>(predicate: P, timeout_ms: u64) -> TecladoResult<()>
where
    P: Fn() -> TecladoResult<bool>,
{
    let waiter = Waiter::new(crate::failure::NullSink);
    let options = WaitOptions::new().with_timeout(timeout_ms);
    waiter.wait_until("condition", predicate, &options)?;
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::detector::KeyboardDetector;
    use crate::element::{ElementDescriptor, Selector};
    use crate::failure::NullSink;
    use crate::mock::{MockDevice, RecordingSink};
    use serde_json::json;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;

    fn fast(options: WaitOptions) -> WaitOptions {
        options.with_timeout(200).with_retry_frequency(10)
    }

    mod wait_options_tests {
        use super::*;

        #[test]
        fn test_default_options() {
            let opts = WaitOptions::default();
            assert_eq!(opts.timeout_ms, 30_000);
            assert_eq!(opts.retry_frequency_ms, DEFAULT_RETRY_FREQUENCY_MS);
            assert_eq!(opts.post_timeout_ms, 0);
            assert!(opts.screenshot_on_timeout);
        }

        #[test]
        fn test_keyboard_preset() {
            let opts = WaitOptions::for_keyboard();
            assert_eq!(opts.timeout_ms, DEFAULT_WAIT_TIMEOUT_MS);
            assert_eq!(opts.retry_frequency_ms, DEFAULT_RETRY_FREQUENCY_MS);
            assert_eq!(opts.post_timeout_ms, KEYBOARD_SETTLE_MS);
            assert_eq!(opts.timeout_message, KEYBOARD_TIMEOUT_MESSAGE);
        }

        #[test]
        fn test_no_keyboard_preset() {
            let opts = WaitOptions::for_no_keyboard();
            assert_eq!(opts.post_timeout_ms, 0);
            assert_eq!(opts.timeout_message, NO_KEYBOARD_TIMEOUT_MESSAGE);
        }

        #[test]
        fn test_uia_preset() {
            let opts = WaitOptions::for_uia_keyboard();
            assert_eq!(opts.timeout_ms, UIA_WAIT_TIMEOUT_MS);
            assert_eq!(opts.retry_frequency_ms, UIA_RETRY_FREQUENCY_MS);
            assert_eq!(opts.post_timeout_ms, UIA_SETTLE_MS);
            assert_eq!(opts.timeout_message, KEYBOARD_TIMEOUT_MESSAGE);
        }

        #[test]
        fn test_uia_preset_tightens_the_generic_timeout() {
            let generic = WaitOptions::new();
            let uia = WaitOptions::for_uia_keyboard();
            assert_eq!(uia.timeout_ms, 10_000);
            assert_ne!(generic.timeout(), uia.timeout());
            assert!(uia.timeout() < generic.timeout());
        }

        #[test]
        fn test_builders_chain() {
            let opts = WaitOptions::new()
                .with_timeout(5000)
                .with_retry_frequency(50)
                .with_post_timeout(100)
                .with_timeout_message("field never focused")
                .with_screenshot_on_timeout(false);
            assert_eq!(opts.timeout_ms, 5000);
            assert_eq!(opts.retry_frequency_ms, 50);
            assert_eq!(opts.post_timeout_ms, 100);
            assert_eq!(opts.timeout_message, "field never focused");
            assert!(!opts.screenshot_on_timeout);
        }

        #[test]
        fn test_duration_getters() {
            let opts = WaitOptions::new()
                .with_timeout(5000)
                .with_retry_frequency(50)
                .with_post_timeout(100);
            assert_eq!(opts.timeout(), Duration::from_millis(5000));
            assert_eq!(opts.retry_frequency(), Duration::from_millis(50));
            assert_eq!(opts.post_timeout(), Duration::from_millis(100));
        }
    }

    mod waiter_tests {
        use super::*;

        #[test]
        fn test_immediate_success() {
            let waiter = Waiter::new(NullSink);
            let outcome = waiter
                .wait_until("always true", || Ok(true), &fast(WaitOptions::new()))
                .unwrap();
            assert_eq!(outcome.polls, 1);
            assert_eq!(outcome.waited_for, "always true");
            assert!(outcome.elapsed < Duration::from_millis(100));
        }

        #[test]
        fn test_success_after_several_polls() {
            let waiter = Waiter::new(NullSink);
            let calls = AtomicUsize::new(0);
            let outcome = waiter
                .wait_until(
                    "third time lucky",
                    || Ok(calls.fetch_add(1, Ordering::SeqCst) + 1 >= 3),
                    &fast(WaitOptions::new()),
                )
                .unwrap();
            assert_eq!(outcome.polls, 3);
            assert_eq!(calls.load(Ordering::SeqCst), 3);
        }

        #[test]
        fn test_timeout_carries_message_and_budget() {
            let waiter = Waiter::new(NullSink);
            let options = fast(WaitOptions::new().with_timeout_message("field never focused"))
                .with_timeout(100);
            let err = waiter
                .wait_until("never", || Ok(false), &options)
                .unwrap_err();
            match err {
                TecladoError::WaitTimeout {
                    message,
                    ms,
                    screenshot,
                } => {
                    assert_eq!(message, "field never focused");
                    assert_eq!(ms, 100);
                    assert!(screenshot.is_none());
                }
                other => panic!("expected WaitTimeout, got {other:?}"),
            }
        }

        #[test]
        fn test_zero_timeout_still_evaluates_once() {
            let waiter = Waiter::new(NullSink);
            let calls = AtomicUsize::new(0);
            let result = waiter.wait_until(
                "one shot",
                || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(false)
                },
                &WaitOptions::new().with_timeout(0),
            );
            assert!(result.is_err());
            assert_eq!(calls.load(Ordering::SeqCst), 1);
        }

        #[test]
        fn test_settle_delay_runs_after_success() {
            let waiter = Waiter::new(NullSink);
            let options = fast(WaitOptions::new()).with_post_timeout(60);
            let start = Instant::now();
            let outcome = waiter.wait_until("settled", || Ok(true), &options).unwrap();
            assert!(start.elapsed() >= Duration::from_millis(60));
            // The settle delay is not billed to the poll time.
            assert!(outcome.elapsed < Duration::from_millis(60));
        }

        #[test]
        fn test_predicate_error_aborts_wait() {
            let sink = RecordingSink::returning("/tmp/shot.png");
            let waiter = Waiter::new(sink.clone());
            let calls = AtomicUsize::new(0);
            let err = waiter
                .wait_until(
                    "broken transport",
                    || {
                        calls.fetch_add(1, Ordering::SeqCst);
                        Err(TecladoError::Query {
                            message: "connection reset".to_string(),
                        })
                    },
                    &fast(WaitOptions::new()),
                )
                .unwrap_err();
            match err {
                TecladoError::Query { message } => assert_eq!(message, "connection reset"),
                other => panic!("expected Query, got {other:?}"),
            }
            // One evaluation, no retries, no timeout artifact.
            assert_eq!(calls.load(Ordering::SeqCst), 1);
            assert_eq!(sink.capture_count(), 0);
        }

        #[test]
        fn test_timeout_captures_screenshot() {
            let sink = RecordingSink::returning("/tmp/artifacts/wait.png");
            let waiter = Waiter::new(sink.clone());
            let err = waiter
                .wait_until("never", || Ok(false), &fast(WaitOptions::new()).with_timeout(50))
                .unwrap_err();
            match err {
                TecladoError::WaitTimeout { screenshot, .. } => {
                    assert_eq!(screenshot, Some(PathBuf::from("/tmp/artifacts/wait.png")));
                }
                other => panic!("expected WaitTimeout, got {other:?}"),
            }
            assert_eq!(sink.labels(), vec!["never"]);
        }

        #[test]
        fn test_screenshot_can_be_disabled() {
            let sink = RecordingSink::returning("/tmp/artifacts/wait.png");
            let waiter = Waiter::new(sink.clone());
            let options = fast(WaitOptions::new())
                .with_timeout(50)
                .with_screenshot_on_timeout(false);
            let err = waiter.wait_until("never", || Ok(false), &options).unwrap_err();
            match err {
                TecladoError::WaitTimeout { screenshot, .. } => assert!(screenshot.is_none()),
                other => panic!("expected WaitTimeout, got {other:?}"),
            }
            assert_eq!(sink.capture_count(), 0);
        }

        #[test]
        fn test_failed_capture_reports_timeout_anyway() {
            let sink = RecordingSink::failing();
            let waiter = Waiter::new(sink.clone());
            let err = waiter
                .wait_until("never", || Ok(false), &fast(WaitOptions::new()).with_timeout(50))
                .unwrap_err();
            match err {
                TecladoError::WaitTimeout { screenshot, .. } => assert!(screenshot.is_none()),
                other => panic!("expected WaitTimeout, got {other:?}"),
            }
            assert_eq!(sink.capture_count(), 1);
        }

        #[test]
        fn test_condition_set_by_another_thread() {
            let flag = Arc::new(AtomicBool::new(false));
            let flag_clone = flag.clone();
            std::thread::spawn(move || {
                std::thread::sleep(Duration::from_millis(30));
                flag_clone.store(true, Ordering::SeqCst);
            });

            let waiter = Waiter::new(NullSink);
            let outcome = waiter.wait_until(
                "flag raised",
                || Ok(flag.load(Ordering::SeqCst)),
                &fast(WaitOptions::new()),
            );
            assert!(outcome.is_ok());
        }
    }

    mod keyboard_wait_tests {
        use super::*;

        // Phone visibility checks issue exactly one keyplane query, which
        // keeps the scripted sequences below in lockstep with poll counts.
        fn phone_keyplane() -> ElementDescriptor {
            ElementDescriptor::new(
                crate::geometry::Rect::new(0.0, 451.0, 375.0, 216.0),
                "UIKBKeyplaneView",
            )
        }

        #[test]
        fn test_wait_for_keyboard_appearing() {
            let device = MockDevice::phone();
            device.on_query_sequence(
                &Selector::keyplane(),
                vec![vec![], vec![], vec![phone_keyplane()]],
            );
            let det = KeyboardDetector::new(device.clone(), device.clone(), NullSink);
            let waiter = Waiter::new(NullSink);
            let outcome = waiter
                .wait_for_keyboard(&det, &fast(WaitOptions::for_keyboard()).with_post_timeout(0))
                .unwrap();
            assert_eq!(outcome.polls, 3);
        }

        #[test]
        fn test_wait_for_keyboard_timeout_message() {
            let device = MockDevice::phone();
            let det = KeyboardDetector::new(device.clone(), device.clone(), NullSink);
            let waiter = Waiter::new(NullSink);
            let err = waiter
                .wait_for_keyboard(&det, &fast(WaitOptions::for_keyboard()).with_timeout(60))
                .unwrap_err();
            match err {
                TecladoError::WaitTimeout { message, .. } => {
                    assert_eq!(message, KEYBOARD_TIMEOUT_MESSAGE);
                }
                other => panic!("expected WaitTimeout, got {other:?}"),
            }
        }

        #[test]
        fn test_wait_for_no_keyboard_dismissal() {
            let device = MockDevice::phone();
            device.on_query_sequence(
                &Selector::keyplane(),
                vec![vec![phone_keyplane()], vec![phone_keyplane()], vec![]],
            );
            let det = KeyboardDetector::new(device.clone(), device.clone(), NullSink);
            let waiter = Waiter::new(NullSink);
            let outcome = waiter
                .wait_for_no_keyboard(&det, &fast(WaitOptions::for_no_keyboard()))
                .unwrap();
            assert_eq!(outcome.polls, 3);
        }

        #[test]
        fn test_wait_for_no_keyboard_timeout_message() {
            let device = MockDevice::phone();
            device.on_query(&Selector::keyplane(), vec![phone_keyplane()]);
            let det = KeyboardDetector::new(device.clone(), device.clone(), NullSink);
            let waiter = Waiter::new(NullSink);
            let err = waiter
                .wait_for_no_keyboard(&det, &fast(WaitOptions::for_no_keyboard()).with_timeout(60))
                .unwrap_err();
            match err {
                TecladoError::WaitTimeout { message, .. } => {
                    assert_eq!(message, NO_KEYBOARD_TIMEOUT_MESSAGE);
                }
                other => panic!("expected WaitTimeout, got {other:?}"),
            }
        }

        #[test]
        fn test_detector_error_aborts_keyboard_wait() {
            let device = MockDevice::phone();
            device.fail_query(&Selector::keyplane(), "connection reset");
            let det = KeyboardDetector::new(device.clone(), device.clone(), NullSink);
            let waiter = Waiter::new(NullSink);
            let err = waiter
                .wait_for_keyboard(&det, &fast(WaitOptions::for_keyboard()))
                .unwrap_err();
            assert!(matches!(err, TecladoError::Query { .. }));
            assert_eq!(device.query_count(), 1);
        }
    }

    mod uia_wait_tests {
        use super::*;

        #[test]
        fn test_unavailable_session_raises_before_polling() {
            let device = MockDevice::tablet();
            device.set_automation_available(false);
            let waiter = Waiter::new(NullSink);
            let err = waiter
                .uia_wait_for_keyboard(&device, &fast(WaitOptions::for_uia_keyboard()))
                .unwrap_err();
            assert!(matches!(err, TecladoError::AutomationUnavailable { .. }));
            assert_eq!(device.window_query_count(), 0);
        }

        #[test]
        fn test_keyboard_window_appearing() {
            let device = MockDevice::tablet();
            device.set_automation_available(true);
            device.script_keyboard_window(vec![false, false, true]);
            let waiter = Waiter::new(NullSink);
            let outcome = waiter
                .uia_wait_for_keyboard(
                    &device,
                    &fast(WaitOptions::for_uia_keyboard()).with_post_timeout(0),
                )
                .unwrap();
            assert_eq!(outcome.polls, 3);
            assert_eq!(device.window_query_count(), 3);
        }

        #[test]
        fn test_uia_timeout_message() {
            let device = MockDevice::tablet();
            device.set_automation_available(true);
            let waiter = Waiter::new(NullSink);
            let err = waiter
                .uia_wait_for_keyboard(
                    &device,
                    &fast(WaitOptions::for_uia_keyboard()).with_timeout(60),
                )
                .unwrap_err();
            match err {
                TecladoError::WaitTimeout { message, .. } => {
                    assert_eq!(message, KEYBOARD_TIMEOUT_MESSAGE);
                }
                other => panic!("expected WaitTimeout, got {other:?}"),
            }
        }

        #[test]
        fn test_malformed_reply_aborts_wait() {
            let device = MockDevice::tablet();
            device.set_automation_available(true);
            device.push_window_reply(json!({"status": "success", "value": ":nil"}));
            device.push_window_reply(json!({"status": "error", "value": "engine crashed"}));
            let waiter = Waiter::new(NullSink);
            let err = waiter
                .uia_wait_for_keyboard(&device, &fast(WaitOptions::for_uia_keyboard()))
                .unwrap_err();
            assert!(matches!(err, TecladoError::MalformedResponse { .. }));
            assert_eq!(device.window_query_count(), 2);
        }
    }

    mod convenience_tests {
        use super::*;

        #[test]
        fn test_wait_until_success() {
            assert!(wait_until(|| Ok(true), 100).is_ok());
        }

        #[test]
        fn test_wait_until_timeout() {
            assert!(wait_until(|| Ok(false), 100).is_err());
        }
    }
}
