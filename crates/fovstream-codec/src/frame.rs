// crates/fovstream-codec/src/frame.rs
//
// Frame wraps a decoded video frame plus a side-data map keyed by tag. Real
// AVFrame side data is a closed enum (AVFrameSideDataType) with no slot for
// an application-defined foveation descriptor, so the map lives alongside
// the ffmpeg frame instead of inside it — it's allocated and freed with the
// Frame just the same, via ordinary Rust ownership.

use std::collections::HashMap;

use ffmpeg_the_third as ffmpeg;

pub struct Frame {
    pub video: ffmpeg::util::frame::video::Video,
    side_data: HashMap<&'static str, Vec<u8>>,
}

impl Frame {
    pub fn new(video: ffmpeg::util::frame::video::Video) -> Self {
        Self { video, side_data: HashMap::new() }
    }

    pub fn set_side_data(&mut self, tag: &'static str, payload: Vec<u8>) {
        self.side_data.insert(tag, payload);
    }

    pub fn side_data(&self, tag: &str) -> Option<&[u8]> {
        self.side_data.get(tag).map(Vec::as_slice)
    }

    pub fn pts(&self) -> Option<i64> {
        self.video.pts()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_video() -> ffmpeg::util::frame::video::Video {
        ffmpeg::util::frame::video::Video::empty()
    }

    #[test]
    fn side_data_round_trips_by_tag() {
        let mut frame = Frame::new(empty_video());
        assert!(frame.side_data("FOVEATION_DESCRIPTOR").is_none());
        frame.set_side_data("FOVEATION_DESCRIPTOR", vec![1, 2, 3, 4]);
        assert_eq!(frame.side_data("FOVEATION_DESCRIPTOR"), Some(&[1u8, 2, 3, 4][..]));
    }

    #[test]
    fn side_data_is_scoped_per_tag() {
        let mut frame = Frame::new(empty_video());
        frame.set_side_data("A", vec![9]);
        assert!(frame.side_data("B").is_none());
    }
}
