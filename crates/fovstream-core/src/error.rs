// crates/fovstream-core/src/error.rs
//
// Configuration errors (bad playlist entry, malformed CLI argument, missing
// env var) get a file/line tag so a misconfigured run is easy to place
// without reaching for a debugger — the pipeline itself uses plain
// `anyhow::Context` for everything else.

/// Build an `anyhow::Error` for a configuration problem, tagged with the
/// call site.
#[macro_export]
macro_rules! cfg_err {
    ($($arg:tt)*) => {
        anyhow::anyhow!("{} ({}:{})", format!($($arg)*), file!(), line!())
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn cfg_err_includes_message_and_location() {
        let err = cfg_err!("bad playlist entry: {}", "foo.mp4");
        let msg = err.to_string();
        assert!(msg.contains("bad playlist entry: foo.mp4"));
        assert!(msg.contains("error.rs"));
    }
}
