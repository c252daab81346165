// crates/fovstream-core/src/gaze.rs
//
// Gaze sourcing is kept behind two small traits so the pipeline never cares
// whether a descriptor came from a real eye tracker, a mouse pointer, or a
// fixed test position. Real eye-tracker integration is left as a reserved
// trait: which vendor SDK to bind against is still open, so `StubEyeTracker`
// always reports "unavailable" and callers fall back to pointer tracking.

use crate::foveation::FoveationDescriptor;

/// Produces one foveation descriptor per frame.
pub trait GazeProvider {
    fn sample(&mut self) -> FoveationDescriptor;
}

/// A 2D pointer position plus the window it's relative to, normalized into
/// `FoveationDescriptor`'s [0, 1] gaze coordinates by `PointerFallbackGaze`.
pub trait PointerSource {
    /// Pointer position in window pixels, `(x, y)`.
    fn position(&self) -> (f32, f32);
    /// Window size in pixels, `(width, height)`.
    fn window_size(&self) -> (f32, f32);
}

/// Always reports the window center — the default when no pointer or
/// eye-tracker signal is available.
pub struct CenterPointer;

impl PointerSource for CenterPointer {
    fn position(&self) -> (f32, f32) {
        (0.5, 0.5)
    }
    fn window_size(&self) -> (f32, f32) {
        (1.0, 1.0)
    }
}

/// Reads a fixed gaze position from `FOVSTREAM_GAZE_X` / `FOVSTREAM_GAZE_Y`
/// environment variables, falling back to window center for either that's
/// unset or unparsable. Exists for deterministic demos and integration
/// tests where a real pointer isn't available.
pub struct EnvPointer;

impl PointerSource for EnvPointer {
    fn position(&self) -> (f32, f32) {
        let x = std::env::var("FOVSTREAM_GAZE_X").ok().and_then(|v| v.parse().ok()).unwrap_or(0.5);
        let y = std::env::var("FOVSTREAM_GAZE_Y").ok().and_then(|v| v.parse().ok()).unwrap_or(0.5);
        (x, y)
    }
    fn window_size(&self) -> (f32, f32) {
        (1.0, 1.0)
    }
}

/// Turns a `PointerSource` into a `GazeProvider` by normalizing pointer
/// position to [0, 1] and using fixed sigma/offset defaults.
pub struct PointerFallbackGaze<P: PointerSource> {
    source: P,
    sigma: f32,
    offset: f32,
}

impl<P: PointerSource> PointerFallbackGaze<P> {
    /// Fallback descriptor per spec: `(mx/W, my/H, 0.3, 20)`.
    pub fn new(source: P) -> Self {
        Self::with_sigma_offset(source, 0.3, 20.0)
    }

    pub fn with_sigma_offset(source: P, sigma: f32, offset: f32) -> Self {
        Self { source, sigma, offset }
    }
}

impl<P: PointerSource> GazeProvider for PointerFallbackGaze<P> {
    fn sample(&mut self) -> FoveationDescriptor {
        let (px, py) = self.source.position();
        let (w, h) = self.source.window_size();
        let fx = (px / w).clamp(0.0, 1.0);
        let fy = (py / h).clamp(0.0, 1.0);
        FoveationDescriptor::new(fx, fy, self.sigma, self.offset)
    }
}

/// Reserved for a real eye-tracker backend. Which vendor SDK to bind
/// against is still undecided, so this only defines the shape callers
/// should expect: a sample that may be unavailable this frame (blink,
/// tracking loss, device unplugged).
pub trait EyeTracker {
    fn sample(&mut self) -> Option<FoveationDescriptor>;
}

/// Always reports unavailable. Placeholder until a real backend is chosen.
pub struct StubEyeTracker;

impl EyeTracker for StubEyeTracker {
    fn sample(&mut self) -> Option<FoveationDescriptor> {
        None
    }
}

/// Samples `tracker` first and falls back to `fallback` when it has nothing
/// this frame.
pub struct EyeTrackerGaze<E: EyeTracker, F: GazeProvider> {
    tracker: E,
    fallback: F,
}

impl<E: EyeTracker, F: GazeProvider> EyeTrackerGaze<E, F> {
    pub fn new(tracker: E, fallback: F) -> Self {
        Self { tracker, fallback }
    }
}

impl<E: EyeTracker, F: GazeProvider> GazeProvider for EyeTrackerGaze<E, F> {
    fn sample(&mut self) -> FoveationDescriptor {
        self.tracker.sample().unwrap_or_else(|| self.fallback.sample())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_pointer_yields_mid_gaze() {
        let mut gaze = PointerFallbackGaze::new(CenterPointer);
        let d = gaze.sample();
        assert_eq!(d.fx, 0.5);
        assert_eq!(d.fy, 0.5);
    }

    #[test]
    fn pointer_position_clamps_into_unit_range() {
        struct OutOfBounds;
        impl PointerSource for OutOfBounds {
            fn position(&self) -> (f32, f32) {
                (-50.0, 5000.0)
            }
            fn window_size(&self) -> (f32, f32) {
                (100.0, 100.0)
            }
        }
        let mut gaze = PointerFallbackGaze::new(OutOfBounds);
        let d = gaze.sample();
        assert_eq!(d.fx, 0.0);
        assert_eq!(d.fy, 1.0);
    }

    #[test]
    fn stub_eye_tracker_falls_back_to_pointer() {
        let mut gaze = EyeTrackerGaze::new(StubEyeTracker, PointerFallbackGaze::new(CenterPointer));
        let d = gaze.sample();
        assert_eq!(d.fx, 0.5);
        assert_eq!(d.fy, 0.5);
    }
}
