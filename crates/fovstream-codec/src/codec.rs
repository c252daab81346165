// crates/fovstream-codec/src/codec.rs
//
// Codec send/receive calls collapse to one of four outcomes; classify()
// centralizes the ffmpeg::Error -> outcome mapping in one place so a
// correction to the EAGAIN/EOF matching only has to happen here, not at
// every call site — the same reasoning that keeps the seek guard in one
// helper over in the teacher's video helpers.

use ffmpeg_the_third as ffmpeg;

#[derive(Debug)]
pub enum CodecResult<T> {
    Ready(T),
    NeedInput,
    EndOfStream,
    Invalid(String),
}

/// Classify a failed `receive_frame`/`receive_packet` call. `EAGAIN` means
/// the codec needs another `send_*` before it can produce output; `Eof`
/// means the codec has been fully drained after a flush. Anything else
/// (including `ENOMEM`) is folded into `Invalid` — a reimplementation with
/// distinct resource-exhaustion handling can split that out later, but the
/// pipeline has no different recovery path for it today.
pub fn classify_receive_error(err: ffmpeg::Error) -> CodecResult<std::convert::Infallible> {
    match err {
        ffmpeg::Error::Eof => CodecResult::EndOfStream,
        ffmpeg::Error::Other { errno } if errno == ffmpeg::util::error::EAGAIN => CodecResult::NeedInput,
        other => CodecResult::Invalid(other.to_string()),
    }
}
