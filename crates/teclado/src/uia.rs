//! Legacy automation bridge.
//!
//! Older instrumentation stacks expose an on-device automation engine
//! reached over a JSON command channel. This module models that channel
//! as [`AutomationBridge`] and layers a second keyboard detection
//! strategy on top of it: instead of view-hierarchy geometry, the engine
//! is asked directly whether a keyboard window exists.
//!
//! The channel wraps every reply in a `{"status": ..., "value": ...}`
//! envelope and uses a string sentinel for "nothing found". Both quirks
//! are interpreted here so nothing else in the crate sees them.

use crate::detector::KeyboardDetection;
use crate::result::{TecladoError, TecladoResult};
use serde_json::Value;
use tracing::debug;

// =============================================================================
// CONSTANTS
// =============================================================================

/// Sentinel payload meaning "not found"
pub const NOT_FOUND: &str = ":nil";

/// Window kind queried for the software keyboard
pub const KEYBOARD_WINDOW_KIND: &str = "keyboard";

/// Envelope status for a successful reply
const STATUS_SUCCESS: &str = "success";

// =============================================================================
// AUTOMATION BRIDGE
// =============================================================================

/// Command channel into the legacy on-device automation engine
pub trait AutomationBridge {
    /// Whether an instrumentation session is attached
    ///
    /// Callers must branch on this before issuing commands; commands
    /// without a session fail immediately.
    fn available(&self) -> bool;

    /// Ask the automation engine for a window of the given kind
    ///
    /// Returns the raw reply envelope; interpret it with
    /// [`parse_outcome`].
    fn query_windows(&self, kind: &str) -> TecladoResult<Value>;
}

// =============================================================================
// ENVELOPE HANDLING
// =============================================================================

/// Extract the payload from an automation reply envelope
///
/// Replies look like `{"status": "success", "value": ...}`. A missing or
/// non-success status, or a missing value, is a malformed reply.
pub fn parse_outcome(envelope: &Value) -> TecladoResult<Value> {
    let Some(status) = envelope.get("status").and_then(Value::as_str) else {
        return Err(TecladoError::MalformedResponse {
            message: format!("missing status in automation reply: {envelope}"),
        });
    };
    if status != STATUS_SUCCESS {
        return Err(TecladoError::MalformedResponse {
            message: format!("automation reply status {status:?}: {envelope}"),
        });
    }
    envelope
        .get("value")
        .cloned()
        .ok_or_else(|| TecladoError::MalformedResponse {
            message: format!("missing value in automation reply: {envelope}"),
        })
}

/// Whether an automation payload is the not-found sentinel
#[must_use]
pub fn is_not_found(value: &Value) -> bool {
    value.as_str() == Some(NOT_FOUND)
}

/// Whether the automation engine currently reports a keyboard window
///
/// Issues one window query; any payload other than the not-found
/// sentinel counts as a visible keyboard.
pub fn keyboard_shown<B: AutomationBridge + ?Sized>(bridge: &B) -> TecladoResult<bool> {
    let envelope = bridge.query_windows(KEYBOARD_WINDOW_KIND)?;
    let payload = parse_outcome(&envelope)?;
    let shown = !is_not_found(&payload);
    debug!(shown, "automation keyboard window check");
    Ok(shown)
}

// =============================================================================
// UIA KEYBOARD DETECTOR
// =============================================================================

/// Keyboard detection over the legacy automation channel
///
/// A second implementation of [`KeyboardDetection`]; wait primitives
/// accept it interchangeably with the geometric detector.
#[derive(Debug, Clone)]
pub struct UiaKeyboardDetector<B> {
    bridge: B,
}

impl<B: AutomationBridge> UiaKeyboardDetector<B> {
    /// Create a detector over `bridge`
    pub fn new(bridge: B) -> Self {
        Self { bridge }
    }

    /// The underlying bridge
    pub fn bridge(&self) -> &B {
        &self.bridge
    }
}

impl<B: AutomationBridge> KeyboardDetection for UiaKeyboardDetector<B> {
    fn keyboard_visible(&self) -> TecladoResult<bool> {
        if !self.bridge.available() {
            return Err(TecladoError::AutomationUnavailable {
                message: "no instrumentation session is attached".to_string(),
            });
        }
        keyboard_shown(&self.bridge)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::mock::MockDevice;
    use serde_json::json;

    mod envelope_tests {
        use super::*;

        #[test]
        fn test_parse_outcome_success() {
            let envelope = json!({"status": "success", "value": ":nil"});
            assert_eq!(parse_outcome(&envelope).unwrap(), json!(":nil"));
        }

        #[test]
        fn test_parse_outcome_structured_value() {
            let envelope = json!({"status": "success", "value": {"name": "Keyboard"}});
            assert_eq!(parse_outcome(&envelope).unwrap(), json!({"name": "Keyboard"}));
        }

        #[test]
        fn test_parse_outcome_missing_status() {
            let envelope = json!({"value": ":nil"});
            let err = parse_outcome(&envelope).unwrap_err();
            match err {
                TecladoError::MalformedResponse { message } => {
                    assert!(message.contains("missing status"));
                }
                other => panic!("expected MalformedResponse, got {other:?}"),
            }
        }

        #[test]
        fn test_parse_outcome_error_status() {
            let envelope = json!({"status": "error", "value": "boom"});
            let err = parse_outcome(&envelope).unwrap_err();
            match err {
                TecladoError::MalformedResponse { message } => {
                    assert!(message.contains("error"));
                }
                other => panic!("expected MalformedResponse, got {other:?}"),
            }
        }

        #[test]
        fn test_parse_outcome_missing_value() {
            let envelope = json!({"status": "success"});
            assert!(parse_outcome(&envelope).is_err());
        }

        #[test]
        fn test_parse_outcome_non_object() {
            assert!(parse_outcome(&json!("success")).is_err());
        }
    }

    mod sentinel_tests {
        use super::*;

        #[test]
        fn test_sentinel_string_matches() {
            assert!(is_not_found(&json!(":nil")));
        }

        #[test]
        fn test_window_name_is_not_sentinel() {
            assert!(!is_not_found(&json!("Keyboard")));
        }

        #[test]
        fn test_structured_payload_is_not_sentinel() {
            assert!(!is_not_found(&json!({"name": "Keyboard"})));
            assert!(!is_not_found(&json!(null)));
        }
    }

    mod keyboard_shown_tests {
        use super::*;

        #[test]
        fn test_shown_when_window_reported() {
            let device = MockDevice::tablet();
            device.set_automation_available(true);
            device.script_keyboard_window(vec![true]);
            assert!(keyboard_shown(&device).unwrap());
        }

        #[test]
        fn test_not_shown_on_sentinel() {
            let device = MockDevice::tablet();
            device.set_automation_available(true);
            assert!(!keyboard_shown(&device).unwrap());
        }

        #[test]
        fn test_queries_keyboard_window_kind() {
            let device = MockDevice::tablet();
            device.set_automation_available(true);
            keyboard_shown(&device).unwrap();
            assert_eq!(device.window_kinds(), vec![KEYBOARD_WINDOW_KIND]);
        }

        #[test]
        fn test_malformed_reply_is_an_error() {
            let device = MockDevice::tablet();
            device.set_automation_available(true);
            device.push_window_reply(json!({"status": "error", "value": "timeout"}));
            assert!(keyboard_shown(&device).is_err());
        }
    }

    mod uia_detector_tests {
        use super::*;

        #[test]
        fn test_unavailable_session_fails_fast() {
            let device = MockDevice::tablet();
            device.set_automation_available(false);
            let det = UiaKeyboardDetector::new(device.clone());
            let err = det.keyboard_visible().unwrap_err();
            match err {
                TecladoError::AutomationUnavailable { .. } => {}
                other => panic!("expected AutomationUnavailable, got {other:?}"),
            }
            // Fail-fast: the window list was never consulted.
            assert_eq!(device.window_query_count(), 0);
        }

        #[test]
        fn test_visible_through_bridge() {
            let device = MockDevice::tablet();
            device.set_automation_available(true);
            device.script_keyboard_window(vec![true]);
            let det = UiaKeyboardDetector::new(device.clone());
            assert!(det.keyboard_visible().unwrap());
        }

        #[test]
        fn test_hidden_through_bridge() {
            let device = MockDevice::tablet();
            device.set_automation_available(true);
            device.script_keyboard_window(vec![false]);
            let det = UiaKeyboardDetector::new(device);
            assert!(!det.keyboard_visible().unwrap());
        }
    }
}
