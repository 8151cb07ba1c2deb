//! Scripted in-memory device for tests.
//!
//! [`MockDevice`] stands in for an instrumented app: element queries,
//! screen metadata, screenshots, and the legacy automation channel are
//! all answered from scripts. Clones share state, so one device can be
//! handed to every boundary of a detector or harness and inspected
//! afterwards.
//!
//! Scripted responses are served in order; the last response of a
//! sequence repeats forever, which makes "appears after N polls"
//! scenarios a one-liner.

use crate::element::{ElementDescriptor, ElementQuery, QueryKind, Selector};
use crate::failure::{FailureSink, ScreenshotSource};
use crate::geometry::Rect;
use crate::result::{TecladoError, TecladoResult};
use crate::screen::{DeviceFamily, Orientation, ScreenInfo, ScreenMetrics};
use crate::uia::{self, AutomationBridge};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::rc::Rc;

/// Default scripted keyboard height in points
const KEYBOARD_HEIGHT_PT: f64 = 300.0;

// =============================================================================
// MOCK DEVICE
// =============================================================================

#[derive(Debug)]
struct MockState {
    family: DeviceFamily,
    orientation: Orientation,
    metrics: ScreenMetrics,
    responses: HashMap<String, VecDeque<Result<Vec<ElementDescriptor>, String>>>,
    query_total: usize,
    query_counts: HashMap<String, usize>,
    query_kinds: Vec<QueryKind>,
    screenshot_base64: Option<String>,
    automation_available: bool,
    window_replies: VecDeque<Value>,
    window_query_count: usize,
    window_kinds: Vec<String>,
}

/// Scripted stand-in for an instrumented device
#[derive(Debug, Clone)]
pub struct MockDevice {
    state: Rc<RefCell<MockState>>,
}

impl MockDevice {
    /// Device with explicit screen state
    #[must_use]
    pub fn with_screen(
        family: DeviceFamily,
        orientation: Orientation,
        metrics: ScreenMetrics,
    ) -> Self {
        Self {
            state: Rc::new(RefCell::new(MockState {
                family,
                orientation,
                metrics,
                responses: HashMap::new(),
                query_total: 0,
                query_counts: HashMap::new(),
                query_kinds: Vec::new(),
                screenshot_base64: None,
                automation_available: false,
                window_replies: VecDeque::new(),
                window_query_count: 0,
                window_kinds: Vec::new(),
            })),
        }
    }

    /// Phone-class device, portrait, 4.7" screen
    #[must_use]
    pub fn phone() -> Self {
        Self::with_screen(
            DeviceFamily::Phone,
            Orientation::Portrait,
            ScreenMetrics::phone_4_7in(),
        )
    }

    /// Tablet-class device, portrait, 9.7" screen
    #[must_use]
    pub fn tablet() -> Self {
        Self::with_screen(
            DeviceFamily::Tablet,
            Orientation::Portrait,
            ScreenMetrics::tablet_9_7in(),
        )
    }

    /// Rotate the device
    pub fn set_orientation(&self, orientation: Orientation) {
        self.state.borrow_mut().orientation = orientation;
    }

    // ------------------------------------------------------------------
    // Element query scripting
    // ------------------------------------------------------------------

    /// Script a sticky response for `selector`
    ///
    /// Replaces any existing script for that selector.
    pub fn on_query(&self, selector: &Selector, elements: Vec<ElementDescriptor>) {
        self.state
            .borrow_mut()
            .responses
            .insert(selector.as_str().to_string(), VecDeque::from([Ok(elements)]));
    }

    /// Script a sequence of responses for `selector`
    ///
    /// Responses are served in order; the last one repeats. Replaces any
    /// existing script for that selector.
    pub fn on_query_sequence(&self, selector: &Selector, sequence: Vec<Vec<ElementDescriptor>>) {
        self.state.borrow_mut().responses.insert(
            selector.as_str().to_string(),
            sequence.into_iter().map(Ok).collect(),
        );
    }

    /// Script a transport failure for `selector`
    pub fn fail_query(&self, selector: &Selector, message: impl Into<String>) {
        self.state.borrow_mut().responses.insert(
            selector.as_str().to_string(),
            VecDeque::from([Err(message.into())]),
        );
    }

    /// Frame of a docked keyboard for the current screen state
    ///
    /// Full width, flush with the bottom edge.
    #[must_use]
    pub fn docked_keyboard_rect(&self) -> Rect {
        let state = self.state.borrow();
        let screen_height = state.metrics.points_height(state.orientation);
        let width = state.metrics.points_width(state.orientation);
        Rect::new(
            0.0,
            screen_height - KEYBOARD_HEIGHT_PT,
            width,
            KEYBOARD_HEIGHT_PT,
        )
    }

    /// Keyplane descriptor for a docked keyboard on the current screen
    #[must_use]
    pub fn docked_keyplane_descriptor(&self) -> ElementDescriptor {
        ElementDescriptor::new(self.docked_keyboard_rect(), "UIKBKeyplaneView")
    }

    /// Show a keyplane with the given frame (sticky)
    pub fn show_keyplane_at(&self, rect: Rect) {
        self.on_query(
            &Selector::keyplane(),
            vec![ElementDescriptor::new(rect, "UIKBKeyplaneView")],
        );
    }

    /// Show a docked keyboard on the current screen (sticky)
    pub fn show_docked_keyboard(&self) {
        let descriptor = self.docked_keyplane_descriptor();
        self.on_query(&Selector::keyplane(), vec![descriptor]);
    }

    /// Show the split keyboard image view (sticky)
    ///
    /// Leaves the keyplane script untouched; an absent keyplane plus
    /// this view is the split state.
    pub fn show_split_keyboard(&self) {
        let rect = self.docked_keyboard_rect();
        self.on_query(
            &Selector::split_keyboard(),
            vec![ElementDescriptor::new(rect, "UIKBSplitImageView")],
        );
    }

    /// Number of element queries issued so far
    #[must_use]
    pub fn query_count(&self) -> usize {
        self.state.borrow().query_total
    }

    /// Number of element queries issued for `selector`
    #[must_use]
    pub fn query_count_for(&self, selector: &Selector) -> usize {
        self.state
            .borrow()
            .query_counts
            .get(selector.as_str())
            .copied()
            .unwrap_or(0)
    }

    /// Query kinds in issue order
    #[must_use]
    pub fn queried_kinds(&self) -> Vec<QueryKind> {
        self.state.borrow().query_kinds.clone()
    }

    // ------------------------------------------------------------------
    // Screenshot scripting
    // ------------------------------------------------------------------

    /// Script the payload returned by screenshot capture
    pub fn set_screenshot_base64(&self, data: impl Into<String>) {
        self.state.borrow_mut().screenshot_base64 = Some(data.into());
    }

    // ------------------------------------------------------------------
    // Automation channel scripting
    // ------------------------------------------------------------------

    /// Attach or detach the scripted instrumentation session
    pub fn set_automation_available(&self, available: bool) {
        self.state.borrow_mut().automation_available = available;
    }

    /// Script a raw automation window reply (appends)
    pub fn push_window_reply(&self, reply: Value) {
        self.state.borrow_mut().window_replies.push_back(reply);
    }

    /// Script a sequence of keyboard window states (appends)
    ///
    /// `true` becomes a success envelope naming the keyboard window,
    /// `false` the not-found sentinel. Without any script the channel
    /// answers with the sentinel.
    pub fn script_keyboard_window(&self, states: Vec<bool>) {
        let mut state = self.state.borrow_mut();
        for shown in states {
            let value = if shown {
                json!("Keyboard")
            } else {
                json!(uia::NOT_FOUND)
            };
            state
                .window_replies
                .push_back(json!({"status": "success", "value": value}));
        }
    }

    /// Number of automation window queries issued so far
    #[must_use]
    pub fn window_query_count(&self) -> usize {
        self.state.borrow().window_query_count
    }

    /// Window kinds requested, in issue order
    #[must_use]
    pub fn window_kinds(&self) -> Vec<String> {
        self.state.borrow().window_kinds.clone()
    }
}

impl ElementQuery for MockDevice {
    fn query(&self, selector: &Selector, kind: QueryKind) -> TecladoResult<Vec<ElementDescriptor>> {
        let mut state = self.state.borrow_mut();
        state.query_total += 1;
        *state
            .query_counts
            .entry(selector.as_str().to_string())
            .or_insert(0) += 1;
        state.query_kinds.push(kind);

        let response = match state.responses.get_mut(selector.as_str()) {
            None => Ok(Vec::new()),
            Some(queue) => {
                if queue.len() > 1 {
                    queue.pop_front().unwrap_or_else(|| Ok(Vec::new()))
                } else {
                    queue.front().cloned().unwrap_or_else(|| Ok(Vec::new()))
                }
            }
        };
        response.map_err(|message| TecladoError::Query { message })
    }
}

impl ScreenInfo for MockDevice {
    fn device_family(&self) -> DeviceFamily {
        self.state.borrow().family
    }

    fn orientation(&self) -> Orientation {
        self.state.borrow().orientation
    }

    fn metrics(&self) -> ScreenMetrics {
        self.state.borrow().metrics
    }
}

impl ScreenshotSource for MockDevice {
    fn capture_base64(&self) -> TecladoResult<String> {
        self.state
            .borrow()
            .screenshot_base64
            .clone()
            .ok_or_else(|| TecladoError::Screenshot {
                message: "no screenshot scripted".to_string(),
            })
    }
}

impl AutomationBridge for MockDevice {
    fn available(&self) -> bool {
        self.state.borrow().automation_available
    }

    fn query_windows(&self, kind: &str) -> TecladoResult<Value> {
        let mut state = self.state.borrow_mut();
        state.window_query_count += 1;
        state.window_kinds.push(kind.to_string());

        let reply = if state.window_replies.len() > 1 {
            state.window_replies.pop_front()
        } else {
            state.window_replies.front().cloned()
        };
        Ok(reply.unwrap_or_else(|| json!({"status": "success", "value": uia::NOT_FOUND})))
    }
}

// =============================================================================
// RECORDING SINK
// =============================================================================

#[derive(Debug, Default)]
struct RecordingSinkState {
    labels: Vec<String>,
    path: Option<PathBuf>,
}

/// Failure sink that records capture requests
///
/// Clones share the record, so the sink handed into a detector or waiter
/// can be inspected from the test body.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    state: Rc<RefCell<RecordingSinkState>>,
}

impl RecordingSink {
    /// Sink that answers every capture with `path`
    #[must_use]
    pub fn returning(path: impl Into<PathBuf>) -> Self {
        Self {
            state: Rc::new(RefCell::new(RecordingSinkState {
                labels: Vec::new(),
                path: Some(path.into()),
            })),
        }
    }

    /// Sink whose captures always fail
    #[must_use]
    pub fn failing() -> Self {
        Self::default()
    }

    /// Labels of the captures requested so far
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        self.state.borrow().labels.clone()
    }

    /// Number of captures requested
    #[must_use]
    pub fn capture_count(&self) -> usize {
        self.state.borrow().labels.len()
    }
}

impl FailureSink for RecordingSink {
    fn capture_screenshot(&self, label: &str) -> Option<PathBuf> {
        let mut state = self.state.borrow_mut();
        state.labels.push(label.to_string());
        state.path.clone()
    }
}

// =============================================================================
// TEST LOGGING
// =============================================================================

/// Initialise test logging from `RUST_LOG`
///
/// Safe to call from every test; only the first call installs a
/// subscriber.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// =============================================================================
// TESTS
// =============================================================================
