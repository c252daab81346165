// crates/fovstream-codec/src/lib.rs
//
// Thin wrappers around ffmpeg-the-third plus the decoder/encoder trait
// abstraction the pipeline stages are written against. Keeping the trait
// boundary here (rather than calling ffmpeg directly from pipeline.rs) is
// what lets a NullDecoder/NullEncoder exercise the stage logic without a
// codec library or a video fixture.

pub mod codec;
pub mod decoder;
pub mod encoder;
pub mod frame;
pub mod packet;
pub mod pipeline;
pub mod reader;
pub mod stage;

pub use codec::CodecResult;
pub use decoder::{FfmpegDecoder, FrameDecoder, NullDecoder};
pub use encoder::{FfmpegEncoder, FrameEncoder, NullEncoder};
pub use frame::Frame;
pub use packet::Packet;
pub use pipeline::run_pipeline;
pub use reader::Reader;
pub use stage::{run_decode_stage, run_encode_stage};
