// crates/fovstream-core/src/lib.rs
//
// Pure pipeline types — no ffmpeg, no threads, no I/O beyond reading the
// playlist file. Everything here is usable (and tested) without a codec
// library or a real video file on disk.

pub mod codec_options;
pub mod error;
pub mod foveation;
pub mod gaze;
pub mod lag;
pub mod playlist;
pub mod queue;

pub use codec_options::{profile_for, CodecProfile, EncoderCodec};
pub use foveation::{FoveationDescriptor, FOVEATION_DESCRIPTOR};
pub use gaze::{
    CenterPointer, EnvPointer, EyeTracker, EyeTrackerGaze, GazeProvider, PointerFallbackGaze, PointerSource,
    StubEyeTracker,
};
pub use lag::LagTimestamp;
pub use playlist::parse_playlist;
pub use queue::BoundedQueue;
