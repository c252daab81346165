// crates/fovstream-codec/src/pipeline.rs
//
// Wires the four stages and their queues together, spawns one OS thread per
// stage (plus the lag consumer), and joins them. Shutdown is driven entirely
// by sentinel propagation — there is no forced cancellation mid-run; a
// caller that wants to stop early does so between playlist entries, not
// mid-file.

use std::path::Path;
use std::sync::Arc;
use std::thread;

use anyhow::Context;
use ffmpeg_the_third as ffmpeg;
use ffmpeg::codec;
use ffmpeg::media::Type;

use fovstream_core::codec_options::EncoderCodec;
use fovstream_core::gaze::GazeProvider;
use fovstream_core::{BoundedQueue, LagTimestamp};

use crate::decoder::FfmpegDecoder;
use crate::encoder::FfmpegEncoder;
use crate::frame::Frame;
use crate::packet::Packet;
use crate::reader::Reader;
use crate::stage::{run_decode_stage, run_encode_stage};

/// Queue capacities per spec: the reader feeds a generously sized packet
/// buffer, `frm_q` gives the encoder a little slack, and everything
/// downstream of the encoder is pinned to 1 to enforce real-time pacing.
pub const DEFAULT_PKT_Q_CAPACITY: usize = 64;
const FRM_Q_CAPACITY: usize = 4;
const ENC_PKT_Q_CAPACITY: usize = 1;
const LAG_Q_CAPACITY: usize = 1;
const OUT_FRM_Q_CAPACITY: usize = 1;

const LAG_REPORT_INTERVAL: usize = 30;

struct SourceStreamInfo {
    width: u32,
    height: u32,
    time_base: ffmpeg::Rational,
    frame_rate: ffmpeg::Rational,
}

fn probe_source_stream(path: &Path) -> anyhow::Result<(FfmpegDecoder, SourceStreamInfo)> {
    let ictx = ffmpeg::format::input(path).with_context(|| format!("probing {}", path.display()))?;
    let stream = ictx
        .streams()
        .best(Type::Video)
        .ok_or_else(|| anyhow::anyhow!("no video stream in {}", path.display()))?;

    let time_base = stream.time_base();
    let frame_rate = stream.rate();
    let dec_ctx = codec::context::Context::from_parameters(stream.parameters())?;
    let decoder = dec_ctx.decoder().video()?;
    let info = SourceStreamInfo {
        width: decoder.width(),
        height: decoder.height(),
        time_base,
        frame_rate,
    };
    Ok((FfmpegDecoder::new(decoder), info))
}

fn open_fov_decoder(encoded_as: EncoderCodec) -> anyhow::Result<FfmpegDecoder> {
    let codec_id = match encoded_as {
        EncoderCodec::H264 => codec::Id::H264,
        EncoderCodec::H265 => codec::Id::HEVC,
    };
    let ffcodec = ffmpeg::decoder::find(codec_id)
        .ok_or_else(|| anyhow::anyhow!("no decoder available for {codec_id:?}"))?;
    let ctx = codec::context::Context::new_with_codec(ffcodec);
    let decoder = ctx.decoder().video()?;
    Ok(FfmpegDecoder::new(decoder))
}

/// Run the full pipeline — reader, source decoder, encoder, fov decoder, and
/// the lag/display sink — for a single input file, to completion or to the
/// first fatal error.
pub fn run_pipeline<G>(path: &Path, codec: EncoderCodec, mut gaze: G) -> anyhow::Result<()>
where
    G: GazeProvider + Send + 'static,
{
    let (source_decoder, info) = probe_source_stream(path)?;
    let encoder = FfmpegEncoder::open(codec, info.width, info.height, info.time_base, info.frame_rate)?;
    let fov_decoder = open_fov_decoder(codec)?;

    let pkt_q: Arc<BoundedQueue<Packet>> = Arc::new(BoundedQueue::new(DEFAULT_PKT_Q_CAPACITY));
    let frm_q: Arc<BoundedQueue<Frame>> = Arc::new(BoundedQueue::new(FRM_Q_CAPACITY));
    let enc_pkt_q: Arc<BoundedQueue<Packet>> = Arc::new(BoundedQueue::new(ENC_PKT_Q_CAPACITY));
    let lag_q: Arc<BoundedQueue<LagTimestamp>> = Arc::new(BoundedQueue::new(LAG_Q_CAPACITY));
    let out_frm_q: Arc<BoundedQueue<Frame>> = Arc::new(BoundedQueue::new(OUT_FRM_Q_CAPACITY));

    let reader = Reader::open(path)?;

    let reader_handle = {
        let pkt_q = Arc::clone(&pkt_q);
        thread::spawn(move || reader.run(&pkt_q))
    };

    let source_decode_handle = {
        let pkt_q = Arc::clone(&pkt_q);
        let frm_q = Arc::clone(&frm_q);
        let mut source_decoder = source_decoder;
        thread::spawn(move || run_decode_stage(&mut source_decoder, &pkt_q, &frm_q))
    };

    let encode_handle = {
        let frm_q = Arc::clone(&frm_q);
        let enc_pkt_q = Arc::clone(&enc_pkt_q);
        let lag_q = Arc::clone(&lag_q);
        let mut encoder = encoder;
        thread::spawn(move || run_encode_stage(&mut encoder, &mut gaze, &frm_q, &enc_pkt_q, &lag_q))
    };

    let fov_decode_handle = {
        let enc_pkt_q = Arc::clone(&enc_pkt_q);
        let out_frm_q = Arc::clone(&out_frm_q);
        let mut fov_decoder = fov_decoder;
        thread::spawn(move || run_decode_stage(&mut fov_decoder, &enc_pkt_q, &out_frm_q))
    };

    let sink_handle = {
        let out_frm_q = Arc::clone(&out_frm_q);
        let lag_q = Arc::clone(&lag_q);
        thread::spawn(move || run_sink(&out_frm_q, &lag_q))
    };

    let results = [
        reader_handle.join().map_err(|_| anyhow::anyhow!("reader thread panicked")),
        source_decode_handle.join().map_err(|_| anyhow::anyhow!("source decoder thread panicked")),
        encode_handle.join().map_err(|_| anyhow::anyhow!("encoder thread panicked")),
        fov_decode_handle.join().map_err(|_| anyhow::anyhow!("fov decoder thread panicked")),
    ];
    sink_handle.join().map_err(|_| anyhow::anyhow!("sink thread panicked"))?;

    for result in results {
        result??;
    }
    Ok(())
}

/// Drains decoded output frames and their paired lag timestamps, logging
/// glass-to-glass lag every `LAG_REPORT_INTERVAL` frames. This stands in for
/// the real display sink: presentation is out of scope, but something has
/// to consume `out_frm_q`/`lag_q` or both stages upstream would stall
/// permanently against a full queue.
///
/// `lag_q` carries exactly one entry per frame the encoder accepted and is
/// never itself terminated with a sentinel (`run_encode_stage` only puts
/// the sentinel on its packet output), so the frame sentinel on `out_frm_q`
/// must short-circuit the loop before `lag_q` is touched again — otherwise
/// the last iteration blocks forever on a `lag_q` that will never receive
/// another item.
fn run_sink(out_frm_q: &BoundedQueue<Frame>, lag_q: &BoundedQueue<LagTimestamp>) -> anyhow::Result<()> {
    let mut count = 0usize;
    loop {
        let frame = out_frm_q.dequeue();
        if frame.is_none() {
            return Ok(());
        }
        let submitted_at = lag_q.dequeue().expect("lag_q entry missing for frame submitted to the encoder");
        count += 1;
        if count % LAG_REPORT_INTERVAL == 0 {
            eprintln!("[pipeline] frame {count} glass-to-glass lag = {:?}", submitted_at.elapsed());
        }
    }
}
