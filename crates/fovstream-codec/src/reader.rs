// crates/fovstream-codec/src/reader.rs
//
// Reader: opens the container, picks the best video stream, marks every
// other stream discarded at the demuxer level, and pumps packets into the
// pipeline in file order.

use std::path::Path;

use anyhow::Context;
use ffmpeg_the_third as ffmpeg;
use ffmpeg::ffi;
use ffmpeg::format::input;
use ffmpeg::media::Type;

use fovstream_core::BoundedQueue;

use crate::packet::Packet;

pub struct Reader {
    ictx: ffmpeg::format::context::Input,
    video_idx: usize,
}

impl Reader {
    /// Open `path`, probe its streams, select the best video stream, and
    /// mark every other stream discarded. Fails fatally (per the reader's
    /// contract) if the container can't be opened or has no video stream.
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let mut ictx = input(path).with_context(|| format!("opening {}", path.display()))?;

        let video_idx = ictx
            .streams()
            .best(Type::Video)
            .ok_or_else(|| anyhow::anyhow!("no video stream in {}", path.display()))?
            .index();

        mark_non_video_streams_discarded(&mut ictx, video_idx);

        Ok(Self { ictx, video_idx })
    }

    /// Read packets until end of stream, pushing video-stream packets onto
    /// `output` and finishing with the null sentinel. Non-video packets and
    /// empty buffers are silently dropped — benign per-packet issues, not
    /// failures. The input context is dropped (closing the container) when
    /// this returns, whatever the outcome.
    pub fn run(mut self, output: &BoundedQueue<Packet>) -> anyhow::Result<()> {
        loop {
            match self.ictx.packets().next() {
                None => break,
                Some(Err(e)) => return Err(e).context("reading packet"),
                Some(Ok((stream, packet))) => {
                    if stream.index() != self.video_idx {
                        continue;
                    }
                    if packet.data().map(|d| d.is_empty()).unwrap_or(true) {
                        continue;
                    }
                    output.enqueue(Some(Packet::new(packet)));
                }
            }
        }
        output.enqueue(None);
        Ok(())
    }
}

fn mark_non_video_streams_discarded(ictx: &mut ffmpeg::format::context::Input, video_idx: usize) {
    for stream in ictx.streams() {
        if stream.index() == video_idx {
            continue;
        }
        // Stream doesn't expose a safe discard setter; AVStream.discard is a
        // plain field the demuxer reads back before every read_frame call.
        unsafe {
            let raw = stream.as_ptr() as *mut ffi::AVStream;
            (*raw).discard = ffi::AVDiscard::AVDISCARD_ALL;
        }
    }
}
