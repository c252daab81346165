// src/args.rs
//
// `main <playlist-file>` — a single positional argument, no flags worth a
// parser crate for.

use std::path::PathBuf;

use fovstream_core::cfg_err;

pub struct Args {
    pub playlist_path: PathBuf,
}

pub fn parse() -> anyhow::Result<Args> {
    let mut argv = std::env::args().skip(1);
    let playlist_path = argv
        .next()
        .ok_or_else(|| cfg_err!("usage: fovstream <playlist-file>"))?;

    if argv.next().is_some() {
        return Err(cfg_err!("usage: fovstream <playlist-file> (too many arguments)"));
    }

    Ok(Args { playlist_path: PathBuf::from(playlist_path) })
}
