// src/gaze_source.rs
//
// Picks a GazeProvider at startup: `ET=1` selects the eye-tracker backend
// (currently a stub that always falls through to pointer tracking — which
// vendor SDK to bind against is still undecided), otherwise pointer
// tracking is used directly, with `FOVSTREAM_GAZE_X`/`FOVSTREAM_GAZE_Y`
// overriding the pointer position for deterministic runs.

use fovstream_core::{CenterPointer, EnvPointer, EyeTrackerGaze, GazeProvider, PointerFallbackGaze, StubEyeTracker};

pub enum GazeSource {
    PointerCenter(PointerFallbackGaze<CenterPointer>),
    PointerEnv(PointerFallbackGaze<EnvPointer>),
    EyeTracking(EyeTrackerGaze<StubEyeTracker, PointerFallbackGaze<CenterPointer>>),
}

impl GazeProvider for GazeSource {
    fn sample(&mut self) -> fovstream_core::FoveationDescriptor {
        match self {
            GazeSource::PointerCenter(g) => g.sample(),
            GazeSource::PointerEnv(g) => g.sample(),
            GazeSource::EyeTracking(g) => g.sample(),
        }
    }
}

pub fn select() -> GazeSource {
    if std::env::var("ET").is_ok() {
        eprintln!("[gaze] ET set, using eye-tracker backend (stub falls back to pointer)");
        return GazeSource::EyeTracking(EyeTrackerGaze::new(StubEyeTracker, PointerFallbackGaze::new(CenterPointer)));
    }
    if std::env::var("FOVSTREAM_GAZE_X").is_ok() || std::env::var("FOVSTREAM_GAZE_Y").is_ok() {
        eprintln!("[gaze] using fixed gaze position from environment");
        return GazeSource::PointerEnv(PointerFallbackGaze::new(EnvPointer));
    }
    GazeSource::PointerCenter(PointerFallbackGaze::new(CenterPointer))
}
