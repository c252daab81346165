// crates/fovstream-core/src/playlist.rs
//
// A playlist is a text file, one input path per line. Blank lines and lines
// starting with '#' are skipped so a playlist can carry comments.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::cfg_err;

/// Read and parse a playlist file into an ordered list of input paths.
///
/// Each non-blank, non-comment line becomes one entry; trailing `\r`/`\n`
/// and surrounding whitespace are stripped. An empty playlist is an error —
/// a pipeline run with nothing to process almost always means a typo'd
/// path, not an intentional no-op.
pub fn parse_playlist(path: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading playlist {}", path.display()))?;

    let entries: Vec<PathBuf> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(PathBuf::from)
        .collect();

    if entries.is_empty() {
        return Err(cfg_err!("playlist {} contains no entries", path.display()));
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn parses_paths_skipping_blank_and_comment_lines() {
        let path = write_temp(
            "fovstream_playlist_test_basic.txt",
            "clip_a.mp4\n\n# a comment\nclip_b.mp4\r\n",
        );
        let entries = parse_playlist(&path).unwrap();
        assert_eq!(entries, vec![PathBuf::from("clip_a.mp4"), PathBuf::from("clip_b.mp4")]);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn empty_playlist_is_an_error() {
        let path = write_temp("fovstream_playlist_test_empty.txt", "\n# only comments\n");
        assert!(parse_playlist(&path).is_err());
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn missing_file_is_an_error() {
        let path = std::env::temp_dir().join("fovstream_playlist_test_does_not_exist.txt");
        assert!(parse_playlist(&path).is_err());
    }
}
