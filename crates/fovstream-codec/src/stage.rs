// crates/fovstream-codec/src/stage.rs
//
// Receive-then-feed pumps shared by every stage that wraps a codec. The
// receive-first order matters: codecs may buffer several frames behind one
// packet, so checking for output before feeding more input is what lets the
// packet-feed step block naturally on the upstream queue instead of
// over-reading. The source decoder and the foveated-region decoder share an
// identical contract, so one function (`run_decode_stage`) serves both.

use fovstream_core::gaze::GazeProvider;
use fovstream_core::{BoundedQueue, LagTimestamp, FOVEATION_DESCRIPTOR};

use crate::codec::CodecResult;
use crate::decoder::FrameDecoder;
use crate::encoder::FrameEncoder;
use crate::frame::Frame;
use crate::packet::Packet;

/// Receive-then-feed loop shared by the source decoder and the foveation
/// decoder: pull decoded frames out as long as the codec has them ready,
/// and only dequeue another packet when the codec asks for one. A null
/// packet (the upstream sentinel) is submitted to the codec to put it in
/// drain mode; the loop keeps pumping until the codec itself reports
/// end of stream.
pub fn run_decode_stage<D: FrameDecoder>(
    decoder: &mut D,
    input: &BoundedQueue<Packet>,
    output: &BoundedQueue<Frame>,
) -> anyhow::Result<()> {
    loop {
        match decoder.receive_frame() {
            CodecResult::Ready(frame) => {
                output.enqueue(Some(frame));
                continue;
            }
            CodecResult::NeedInput => {
                match input.dequeue() {
                    Some(packet) => decoder.send_packet(&packet)?,
                    None => decoder.send_eof()?,
                }
                continue;
            }
            CodecResult::EndOfStream => break,
            CodecResult::Invalid(msg) => return Err(anyhow::anyhow!("decoder rejected input: {msg}")),
        }
    }
    output.enqueue(None);
    Ok(())
}

/// The encoder's loop: same receive-first shape as `run_decode_stage`, but
/// each dequeued frame is stamped with a foveation descriptor before it's
/// submitted, and a lag timestamp is recorded for every frame handed to
/// the codec. On the null sentinel the loop exits directly — the
/// zerolatency/no-B-frame profile the encoder is opened with means nothing
/// is left buffered inside the codec to flush.
pub fn run_encode_stage<E: FrameEncoder, G: GazeProvider>(
    encoder: &mut E,
    gaze: &mut G,
    input: &BoundedQueue<Frame>,
    output: &BoundedQueue<Packet>,
    lag_queue: &BoundedQueue<LagTimestamp>,
) -> anyhow::Result<()> {
    loop {
        match encoder.receive_packet() {
            CodecResult::Ready(packet) => {
                output.enqueue(Some(packet));
                continue;
            }
            CodecResult::NeedInput => match input.dequeue() {
                Some(mut frame) => {
                    let descriptor = gaze.sample();
                    frame.set_side_data(FOVEATION_DESCRIPTOR, descriptor.to_bytes().to_vec());
                    encoder.send_frame(&frame)?;
                    lag_queue.enqueue(Some(LagTimestamp::now()));
                    continue;
                }
                None => break,
            },
            CodecResult::EndOfStream => break,
            CodecResult::Invalid(msg) => return Err(anyhow::anyhow!("encoder rejected input: {msg}")),
        }
    }
    output.enqueue(None);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::NullDecoder;
    use crate::encoder::NullEncoder;
    use fovstream_core::gaze::{CenterPointer, PointerFallbackGaze};
    use ffmpeg_the_third as ffmpeg;

    #[test]
    fn decode_stage_forwards_one_frame_per_packet_then_sentinel() {
        let mut decoder = NullDecoder::new();
        let input = BoundedQueue::<Packet>::new(4);
        let output = BoundedQueue::<Frame>::new(4);

        input.enqueue(Some(Packet::new(ffmpeg::Packet::empty())));
        input.enqueue(Some(Packet::new(ffmpeg::Packet::empty())));
        input.enqueue(None);

        run_decode_stage(&mut decoder, &input, &output).unwrap();

        assert!(output.dequeue().is_some());
        assert!(output.dequeue().is_some());
        assert!(output.dequeue().is_none());
    }

    #[test]
    fn encode_stage_stamps_lag_once_per_frame_then_sentinel() {
        let mut encoder = NullEncoder::new();
        let mut gaze = PointerFallbackGaze::new(CenterPointer);
        let input = BoundedQueue::<Frame>::new(4);
        let output = BoundedQueue::<Packet>::new(4);
        let lag_queue = BoundedQueue::<LagTimestamp>::new(4);

        input.enqueue(Some(Frame::new(ffmpeg::util::frame::video::Video::empty())));
        input.enqueue(Some(Frame::new(ffmpeg::util::frame::video::Video::empty())));
        input.enqueue(None);

        run_encode_stage(&mut encoder, &mut gaze, &input, &output, &lag_queue).unwrap();

        assert!(output.dequeue().is_some());
        assert!(output.dequeue().is_some());
        assert!(output.dequeue().is_none());
        assert!(lag_queue.dequeue().is_some());
        assert!(lag_queue.dequeue().is_some());
    }

    #[test]
    fn encode_stage_attaches_foveation_side_data() {
        struct CapturingEncoder {
            captured: Option<Vec<u8>>,
        }
        impl FrameEncoder for CapturingEncoder {
            fn send_frame(&mut self, frame: &Frame) -> anyhow::Result<()> {
                self.captured = frame.side_data(FOVEATION_DESCRIPTOR).map(|b| b.to_vec());
                Ok(())
            }
            fn send_eof(&mut self) -> anyhow::Result<()> {
                Ok(())
            }
            fn receive_packet(&mut self) -> CodecResult<Packet> {
                CodecResult::NeedInput
            }
        }

        let mut encoder = CapturingEncoder { captured: None };
        let mut gaze = PointerFallbackGaze::new(CenterPointer);
        let input = BoundedQueue::<Frame>::new(2);
        let output = BoundedQueue::<Packet>::new(2);
        let lag_queue = BoundedQueue::<LagTimestamp>::new(2);

        input.enqueue(Some(Frame::new(ffmpeg::util::frame::video::Video::empty())));
        input.enqueue(None);

        // NeedInput forever after the single frame means this would hang on the
        // second receive_packet; feed exactly one frame then break via sentinel.
        // receive_packet always returns NeedInput, so after the sentinel the
        // loop exits via the `None => break` arm.
        run_encode_stage(&mut encoder, &mut gaze, &input, &output, &lag_queue).unwrap();

        assert_eq!(encoder.captured.map(|b| b.len()), Some(16));
    }
}
