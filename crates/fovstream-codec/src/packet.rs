// crates/fovstream-codec/src/packet.rs
//
// Thin wrapper around an ffmpeg packet. Exists mostly so the pipeline queues
// carry a pipeline-owned type rather than leaking ffmpeg-the-third's type
// into stage.rs and reader.rs call sites.

use ffmpeg_the_third as ffmpeg;

pub struct Packet(pub ffmpeg::Packet);

impl Packet {
    pub fn new(inner: ffmpeg::Packet) -> Self {
        Self(inner)
    }

    pub fn into_inner(self) -> ffmpeg::Packet {
        self.0
    }

    pub fn as_inner(&self) -> &ffmpeg::Packet {
        &self.0
    }
}
