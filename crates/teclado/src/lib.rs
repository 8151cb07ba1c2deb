//! Teclado: On-Screen Keyboard Detection for Mobile UI Tests
//!
//! Teclado (Spanish: "keyboard") answers one question reliably during UI
//! test automation: is the software keyboard on screen? It classifies
//! docked, undocked, and split keyboards from view-hierarchy geometry,
//! waits for appearance and dismissal with retry and settle policies,
//! and captures a diagnostic screenshot when a wait times out.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐     ┌───────────────────┐     ┌──────────────┐
//! │ KeyboardHarness  │────►│ KeyboardDetector  │────►│ ElementQuery │
//! │ (facade)         │     │ (geometry)        │     │ ScreenInfo   │
//! └──────────────────┘     └───────────────────┘     └──────────────┘
//!          │               ┌───────────────────┐     ┌──────────────┐
//!          └──────────────►│ Waiter            │────►│ FailureSink  │
//!                          │ (poll loops)      │     │ (artifacts)  │
//!                          └───────────────────┘     └──────────────┘
//! ```
//!
//! Detection is transport-agnostic: implement [`ElementQuery`] and
//! [`ScreenInfo`] for your device connection and every helper works
//! unchanged. The [`mock`] module ships a scripted device for tests.
//!
//! # Quick Start
//!
//! ```rust
//! use teclado::mock::MockDevice;
//! use teclado::{KeyboardHarness, KeyboardState, NullSink};
//!
//! let device = MockDevice::phone();
//! device.show_docked_keyboard();
//!
//! let harness = KeyboardHarness::new(device.clone(), device, NullSink);
//! assert!(harness.keyboard_visible()?);
//! assert_eq!(harness.keyboard_state()?, KeyboardState::Docked);
//! # Ok::<(), teclado::TecladoError>(())
//! ```
//!
//! # Waiting for the keyboard
//!
//! ```rust
//! use teclado::mock::MockDevice;
//! use teclado::{KeyboardHarness, NullSink};
//!
//! let device = MockDevice::phone();
//! let harness = KeyboardHarness::new(device.clone(), device.clone(), NullSink);
//!
//! device.show_docked_keyboard();
//! let outcome = harness.wait_for_keyboard()?;
//! assert_eq!(outcome.polls, 1);
//! # Ok::<(), teclado::TecladoError>(())
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

#[allow(
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::missing_const_for_fn
)]
mod detector;
mod element;
#[allow(clippy::missing_errors_doc, clippy::missing_const_for_fn)]
mod failure;
mod geometry;
#[allow(
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::missing_const_for_fn
)]
mod harness;
pub mod mock;
mod responder;
mod result;
mod screen;
#[allow(clippy::missing_errors_doc, clippy::missing_const_for_fn)]
mod uia;
#[allow(
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::missing_const_for_fn
)]
mod wait;

pub use detector::{KeyboardDetection, KeyboardDetector, KeyboardState};
pub use element::{selectors, ElementDescriptor, ElementQuery, QueryKind, Selector};
pub use failure::{ArtifactSink, FailureSink, NullSink, ScreenshotSource};
pub use geometry::{Point, Rect};
pub use harness::KeyboardHarness;
pub use responder::FirstResponderTextReader;
pub use result::{TecladoError, TecladoResult};
pub use screen::{DeviceFamily, Orientation, ScreenInfo, ScreenMetrics};
pub use uia::{
    is_not_found, keyboard_shown, parse_outcome, AutomationBridge, UiaKeyboardDetector,
    KEYBOARD_WINDOW_KIND, NOT_FOUND,
};
pub use wait::{
    wait_until, WaitOptions, WaitOutcome, Waiter, DEFAULT_RETRY_FREQUENCY_MS,
    DEFAULT_WAIT_TIMEOUT_MS, KEYBOARD_SETTLE_MS, KEYBOARD_TIMEOUT_MESSAGE,
    NO_KEYBOARD_TIMEOUT_MESSAGE, UIA_RETRY_FREQUENCY_MS, UIA_SETTLE_MS, UIA_WAIT_TIMEOUT_MS,
};
