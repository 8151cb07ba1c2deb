//! Failure reporting: diagnostic screenshots for precondition and wait
//! failures.
//!
//! The rest of the crate only knows [`FailureSink`], an opaque boundary
//! that either produces an artifact path or quietly declines.
//! [`ArtifactSink`] is the standard implementation: it pulls a
//! base64-encoded PNG from a [`ScreenshotSource`] and writes it under an
//! artifact directory with a timestamped name.

use crate::result::{TecladoError, TecladoResult};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

// =============================================================================
// SCREENSHOT SOURCE
// =============================================================================

/// Device-side screenshot capture
///
/// Implementations return the PNG payload base64-encoded, the format
/// device channels ship it in.
pub trait ScreenshotSource {
    /// Capture the screen as base64-encoded PNG data
    fn capture_base64(&self) -> TecladoResult<String>;
}

// =============================================================================
// FAILURE SINK
// =============================================================================

/// Sink for failure diagnostics
///
/// Capture is best-effort: `None` means no artifact could be produced,
/// and the caller's original error must still be raised.
pub trait FailureSink {
    /// Capture a screenshot for a failure labelled `label`
    ///
    /// Returns the path of the written artifact, or `None` when capture
    /// failed or the sink discards artifacts.
    fn capture_screenshot(&self, label: &str) -> Option<PathBuf>;
}

/// Sink that discards all diagnostics
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl FailureSink for NullSink {
    fn capture_screenshot(&self, _label: &str) -> Option<PathBuf> {
        None
    }
}

// =============================================================================
// ARTIFACT SINK
// =============================================================================

/// Writes failure screenshots as PNG files under an artifact directory
///
/// File names are `<label>_<timestamp>_<n>.png`; the counter is shared
/// across clones so concurrent captures never collide.
#[derive(Clone)]
pub struct ArtifactSink<C> {
    source: C,
    artifact_dir: PathBuf,
    sequence: Arc<AtomicUsize>,
}

impl<C> std::fmt::Debug for ArtifactSink<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtifactSink")
            .field("artifact_dir", &self.artifact_dir)
            .finish_non_exhaustive()
    }
}

impl<C: ScreenshotSource> ArtifactSink<C> {
    /// Create a sink writing into `artifact_dir`
    ///
    /// The directory is created on first capture, not up front.
    pub fn new(source: C, artifact_dir: impl Into<PathBuf>) -> Self {
        Self {
            source,
            artifact_dir: artifact_dir.into(),
            sequence: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// The directory artifacts are written into
    #[must_use]
    pub fn artifact_dir(&self) -> &Path {
        &self.artifact_dir
    }

    fn write_screenshot(&self, label: &str) -> TecladoResult<PathBuf> {
        let data = self.source.capture_base64()?;
        let bytes = STANDARD
            .decode(data.trim())
            .map_err(|e| TecladoError::Screenshot {
                message: e.to_string(),
            })?;

        std::fs::create_dir_all(&self.artifact_dir)?;
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
        let stamp = chrono::Local::now().format("%Y-%m-%d_%H-%M-%S");
        let name = format!("{}_{stamp}_{seq}.png", sanitize_label(label));
        let path = self.artifact_dir.join(name);
        std::fs::write(&path, bytes)?;
        debug!(path = %path.display(), "wrote failure screenshot");
        Ok(path)
    }
}

impl<C: ScreenshotSource> FailureSink for ArtifactSink<C> {
    fn capture_screenshot(&self, label: &str) -> Option<PathBuf> {
        match self.write_screenshot(label) {
            Ok(path) => Some(path),
            Err(e) => {
                warn!(label, error = %e, "failed to capture failure screenshot");
                None
            }
        }
    }
}

/// Restrict a label to filename-safe characters
fn sanitize_label(label: &str) -> String {
    label
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================
