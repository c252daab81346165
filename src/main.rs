// src/main.rs
//
// Entry point: read the playlist, run the transcode pipeline once per
// entry, in order. A file that fails fatally aborts the whole run — the
// pipeline's error-handling design has no notion of skip-and-continue.

mod args;
mod gaze_source;
mod signals;

use fovstream_core::codec_options::EncoderCodec;
use fovstream_core::parse_playlist;

fn codec_from_env() -> EncoderCodec {
    match std::env::var("FOVSTREAM_CODEC").as_deref() {
        Ok("H265") | Ok("h265") => EncoderCodec::H265,
        _ => EncoderCodec::H264,
    }
}

fn run() -> anyhow::Result<()> {
    if std::env::var("DEBUG").is_ok() {
        eprintln!("[main] DEBUG set (no behavioral effect on the pipeline)");
    }

    ffmpeg_the_third::init()?;
    let stop = signals::install()?;

    let args = args::parse()?;
    let entries = parse_playlist(&args.playlist_path)?;
    let codec = codec_from_env();

    for (i, path) in entries.iter().enumerate() {
        if stop.load(std::sync::atomic::Ordering::Relaxed) {
            eprintln!("[main] stop requested, skipping remaining {} playlist entries", entries.len() - i);
            break;
        }
        eprintln!("[main] [{}/{}] {}", i + 1, entries.len(), path.display());
        fovstream_codec::run_pipeline(path, codec, gaze_source::select())?;
    }

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("[main] fatal: {err:#}");
        std::process::exit(1);
    }
}
