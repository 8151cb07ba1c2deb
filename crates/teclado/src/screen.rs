//! Screen metadata boundary: device family, orientation, and metrics.

use serde::{Deserialize, Serialize};

// =============================================================================
// DEVICE FAMILY
// =============================================================================

/// Hardware family the app is running on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceFamily {
    /// Phone-class device: the software keyboard is always docked
    Phone,
    /// Tablet-class device: the keyboard may be docked, undocked, or split
    Tablet,
}

impl DeviceFamily {
    /// Whether this is a phone-class device
    #[must_use]
    pub const fn is_phone(&self) -> bool {
        matches!(self, Self::Phone)
    }

    /// Whether this is a tablet-class device
    #[must_use]
    pub const fn is_tablet(&self) -> bool {
        matches!(self, Self::Tablet)
    }
}

// =============================================================================
// ORIENTATION
// =============================================================================

/// Interface orientation at the time of a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Portrait or upside-down portrait
    Portrait,
    /// Landscape left or landscape right
    Landscape,
}

impl Orientation {
    /// Whether the interface is in a landscape orientation
    #[must_use]
    pub const fn is_landscape(&self) -> bool {
        matches!(self, Self::Landscape)
    }

    /// Whether the interface is in a portrait orientation
    #[must_use]
    pub const fn is_portrait(&self) -> bool {
        matches!(self, Self::Portrait)
    }
}

// =============================================================================
// SCREEN METRICS
// =============================================================================

/// Physical screen dimensions as reported by the device
///
/// `width` and `height` are device pixels in the native (portrait)
/// orientation; `scale` is the pixel-per-point factor. View hierarchy
/// frames are in points, so comparisons against screen extents go
/// through [`Self::points_height`] and [`Self::points_width`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenMetrics {
    /// Screen width in device pixels (portrait)
    pub width: f64,
    /// Screen height in device pixels (portrait)
    pub height: f64,
    /// Pixels per point
    pub scale: f64,
}

impl ScreenMetrics {
    /// Create metrics from pixel dimensions and scale
    #[must_use]
    pub const fn new(width: f64, height: f64, scale: f64) -> Self {
        Self {
            width,
            height,
            scale,
        }
    }

    /// Vertical extent of the screen in points for `orientation`
    ///
    /// In landscape the reported pixel width becomes the vertical extent.
    #[must_use]
    pub fn points_height(&self, orientation: Orientation) -> f64 {
        let pixels = if orientation.is_landscape() {
            self.width
        } else {
            self.height
        };
        pixels / self.scale
    }

    /// Horizontal extent of the screen in points for `orientation`
    #[must_use]
    pub fn points_width(&self, orientation: Orientation) -> f64 {
        let pixels = if orientation.is_landscape() {
            self.height
        } else {
            self.width
        };
        pixels / self.scale
    }

    /// Phone-class 4.7" screen (750 x 1334 @2x)
    #[must_use]
    pub const fn phone_4_7in() -> Self {
        Self::new(750.0, 1334.0, 2.0)
    }

    /// Phone-class 5.5" screen (1080 x 1920 @3x)
    #[must_use]
    pub const fn phone_5_5in() -> Self {
        Self::new(1080.0, 1920.0, 3.0)
    }

    /// Tablet 9.7" screen (1536 x 2048 @2x)
    #[must_use]
    pub const fn tablet_9_7in() -> Self {
        Self::new(1536.0, 2048.0, 2.0)
    }

    /// Tablet 12.9" screen (2048 x 2732 @2x)
    #[must_use]
    pub const fn tablet_12_9in() -> Self {
        Self::new(2048.0, 2732.0, 2.0)
    }
}

// =============================================================================
// SCREEN INFO BOUNDARY
// =============================================================================

/// Read-only snapshot of device screen state
///
/// Implementations answer from locally held device metadata, so the
/// methods are infallible. Each call reflects the state at call time;
/// orientation in particular can change between two calls.
pub trait ScreenInfo {
    /// Hardware family
    fn device_family(&self) -> DeviceFamily;

    /// Current interface orientation
    fn orientation(&self) -> Orientation;

    /// Screen dimensions and scale
    fn metrics(&self) -> ScreenMetrics;
}

// =============================================================================
// TESTS
// =============================================================================
