// src/signals.rs
//
// SIGINT sets a shared flag the playlist loop checks between entries. There
// is no mid-file cancellation (the pipeline's shutdown protocol is
// sentinel-driven only), so a Ctrl-C during a long transcode finishes the
// current file before the process exits.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub fn install() -> anyhow::Result<Arc<AtomicBool>> {
    let stop = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&stop);
    ctrlc::set_handler(move || {
        eprintln!("[signals] interrupt received, finishing current file then exiting");
        flag.store(true, Ordering::Relaxed);
    })?;
    Ok(stop)
}
