// crates/fovstream-codec/src/encoder.rs
//
// FrameEncoder mirrors FrameDecoder: the stage logic in stage.rs never
// touches ffmpeg directly. FfmpegEncoder opens libx264/libx265 with the
// low-latency foveated profile from fovstream_core::codec_options;
// NullEncoder is the pass-through backend used in tests.

use std::collections::VecDeque;

use ffmpeg_the_third as ffmpeg;
use ffmpeg::codec;
use ffmpeg::util::format::Pixel;
use ffmpeg::util::rational::Rational;

use fovstream_core::codec_options::{profile_for, CodecProfile, EncoderCodec};

use crate::codec::{classify_receive_error, CodecResult};
use crate::frame::Frame;
use crate::packet::Packet;

pub trait FrameEncoder {
    fn send_frame(&mut self, frame: &Frame) -> anyhow::Result<()>;
    fn send_eof(&mut self) -> anyhow::Result<()>;
    fn receive_packet(&mut self) -> CodecResult<Packet>;
}

pub struct FfmpegEncoder {
    inner: ffmpeg::encoder::video::Video,
    profile: CodecProfile,
}

impl FfmpegEncoder {
    /// Open an encoder for `codec` at `width`x`height`, YUV420P, with the
    /// low-latency foveated profile applied. `time_base` and `frame_rate`
    /// come from the source stream so presentation timestamps survive the
    /// transcode unchanged.
    pub fn open(
        codec_kind: EncoderCodec,
        width: u32,
        height: u32,
        time_base: Rational,
        frame_rate: Rational,
    ) -> anyhow::Result<Self> {
        let profile = profile_for(codec_kind);

        let ffcodec = ffmpeg::encoder::find_by_name(codec_kind.ffmpeg_name())
            .ok_or_else(|| anyhow::anyhow!("{} not available in this ffmpeg build", codec_kind.ffmpeg_name()))?;

        let enc_ctx = codec::context::Context::new_with_codec(ffcodec);
        let mut enc = enc_ctx.encoder().video()?;

        enc.set_width(width);
        enc.set_height(height);
        enc.set_format(Pixel::YUV420P);
        enc.set_time_base(time_base);
        enc.set_frame_rate(Some(frame_rate));
        enc.set_gop(profile.gop_size);
        enc.set_bit_rate(0);

        let mut opts = ffmpeg::Dictionary::new();
        for (key, value) in profile.dictionary_entries() {
            opts.set(key, &value);
        }

        let inner = enc
            .open_as_with(ffcodec, opts)
            .map_err(|e| anyhow::anyhow!("open {}: {e}", codec_kind.ffmpeg_name()))?;

        Ok(Self { inner, profile })
    }

    pub fn profile(&self) -> &CodecProfile {
        &self.profile
    }
}

impl FrameEncoder for FfmpegEncoder {
    fn send_frame(&mut self, frame: &Frame) -> anyhow::Result<()> {
        self.inner.send_frame(&frame.video).map_err(anyhow::Error::from)
    }

    fn send_eof(&mut self) -> anyhow::Result<()> {
        self.inner.send_eof().map_err(anyhow::Error::from)
    }

    fn receive_packet(&mut self) -> CodecResult<Packet> {
        let mut pkt = ffmpeg::Packet::empty();
        match self.inner.receive_packet(&mut pkt) {
            Ok(()) => CodecResult::Ready(Packet::new(pkt)),
            Err(e) => match classify_receive_error(e) {
                CodecResult::NeedInput => CodecResult::NeedInput,
                CodecResult::EndOfStream => CodecResult::EndOfStream,
                CodecResult::Invalid(msg) => CodecResult::Invalid(msg),
                CodecResult::Ready(infallible) => match infallible {},
            },
        }
    }
}

/// Pass-through encoder: each `send_frame` immediately makes one packet
/// available, in order. Used to exercise the encode stage without a
/// codec library.
pub struct NullEncoder {
    pending: VecDeque<Packet>,
    eof: bool,
}

impl NullEncoder {
    pub fn new() -> Self {
        Self { pending: VecDeque::new(), eof: false }
    }
}

impl Default for NullEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameEncoder for NullEncoder {
    fn send_frame(&mut self, _frame: &Frame) -> anyhow::Result<()> {
        self.pending.push_back(Packet::new(ffmpeg::Packet::empty()));
        Ok(())
    }

    fn send_eof(&mut self) -> anyhow::Result<()> {
        self.eof = true;
        Ok(())
    }

    fn receive_packet(&mut self) -> CodecResult<Packet> {
        match self.pending.pop_front() {
            Some(pkt) => CodecResult::Ready(pkt),
            None if self.eof => CodecResult::EndOfStream,
            None => CodecResult::NeedInput,
        }
    }
}
