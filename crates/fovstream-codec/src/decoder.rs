// crates/fovstream-codec/src/decoder.rs
//
// FrameDecoder is the seam a pipeline stage (stage.rs) is written against.
// FfmpegDecoder is the real backend; NullDecoder is a pass-through backend
// for exercising stage logic (sentinel propagation, queue draining) without
// a codec library or a video fixture on disk.

use std::collections::VecDeque;

use ffmpeg_the_third as ffmpeg;

use crate::codec::{classify_receive_error, CodecResult};
use crate::frame::Frame;
use crate::packet::Packet;

pub trait FrameDecoder {
    fn send_packet(&mut self, packet: &Packet) -> anyhow::Result<()>;
    /// Signal end of stream: no more packets will arrive, drain remaining frames.
    fn send_eof(&mut self) -> anyhow::Result<()>;
    fn receive_frame(&mut self) -> CodecResult<Frame>;
}

pub struct FfmpegDecoder {
    inner: ffmpeg::decoder::video::Video,
}

impl FfmpegDecoder {
    pub fn new(inner: ffmpeg::decoder::video::Video) -> Self {
        Self { inner }
    }
}

impl FrameDecoder for FfmpegDecoder {
    fn send_packet(&mut self, packet: &Packet) -> anyhow::Result<()> {
        self.inner.send_packet(packet.as_inner()).map_err(anyhow::Error::from)
    }

    fn send_eof(&mut self) -> anyhow::Result<()> {
        self.inner.send_eof().map_err(anyhow::Error::from)
    }

    fn receive_frame(&mut self) -> CodecResult<Frame> {
        let mut video = ffmpeg::util::frame::video::Video::empty();
        match self.inner.receive_frame(&mut video) {
            Ok(()) => CodecResult::Ready(Frame::new(video)),
            Err(e) => match classify_receive_error(e) {
                CodecResult::NeedInput => CodecResult::NeedInput,
                CodecResult::EndOfStream => CodecResult::EndOfStream,
                CodecResult::Invalid(msg) => CodecResult::Invalid(msg),
                CodecResult::Ready(infallible) => match infallible {},
            },
        }
    }
}

/// Pass-through decoder: each `send_packet` immediately makes one frame
/// available, in order. `send_eof` marks the stream exhausted once the
/// backlog is drained.
pub struct NullDecoder {
    pending: VecDeque<Frame>,
    eof: bool,
}

impl NullDecoder {
    pub fn new() -> Self {
        Self { pending: VecDeque::new(), eof: false }
    }
}

impl Default for NullDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameDecoder for NullDecoder {
    fn send_packet(&mut self, _packet: &Packet) -> anyhow::Result<()> {
        self.pending.push_back(Frame::new(ffmpeg::util::frame::video::Video::empty()));
        Ok(())
    }

    fn send_eof(&mut self) -> anyhow::Result<()> {
        self.eof = true;
        Ok(())
    }

    fn receive_frame(&mut self) -> CodecResult<Frame> {
        match self.pending.pop_front() {
            Some(frame) => CodecResult::Ready(frame),
            None if self.eof => CodecResult::EndOfStream,
            None => CodecResult::NeedInput,
        }
    }
}
