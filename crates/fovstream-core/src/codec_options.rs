// crates/fovstream-core/src/codec_options.rs
//
// Encoder option profiles. Low-latency presets chosen for a live pipeline
// where the encoder can never sit on a frame waiting for lookahead.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncoderCodec {
    H264,
    H265,
}

impl EncoderCodec {
    pub fn ffmpeg_name(&self) -> &'static str {
        match self {
            EncoderCodec::H264 => "libx264",
            EncoderCodec::H265 => "libx265",
        }
    }
}

/// The dictionary entries a `FrameEncoder` adapter applies before opening the
/// codec context. `aq_mode` is surfaced separately from `extra` because the
/// two codecs expose it through different knobs: libx264 takes it as a plain
/// AVOption, libx265 only accepts it packed into `x265-params`.
#[derive(Clone, Debug)]
pub struct CodecProfile {
    pub codec: EncoderCodec,
    pub preset: &'static str,
    pub tune: &'static str,
    pub gop_size: u32,
    pub aq_mode: u32,
}

impl CodecProfile {
    /// `(key, value)` pairs ready to hand to `ffmpeg::Dictionary`, aq-mode
    /// included in whatever form this codec expects it.
    pub fn dictionary_entries(&self) -> Vec<(&'static str, String)> {
        let mut entries = vec![
            ("preset", self.preset.to_string()),
            ("tune", self.tune.to_string()),
        ];
        match self.codec {
            EncoderCodec::H264 => entries.push(("aq-mode", self.aq_mode.to_string())),
            EncoderCodec::H265 => entries.push(("x265-params", format!("aq-mode={}", self.aq_mode))),
        }
        entries
    }
}

/// Low-latency foveated-encode profile for the given codec: `ultrafast`
/// preset, `zerolatency` tune, a 3-frame GOP, and adaptive quantization mode
/// 2 (variance-based) so the encoder leans bits toward the fovea.
pub fn profile_for(codec: EncoderCodec) -> CodecProfile {
    CodecProfile {
        codec,
        preset: "ultrafast",
        tune: "zerolatency",
        gop_size: 3,
        aq_mode: 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn h264_uses_plain_aq_mode_key() {
        let p = profile_for(EncoderCodec::H264);
        let entries = p.dictionary_entries();
        assert!(entries.contains(&("aq-mode", "2".to_string())));
        assert!(!entries.iter().any(|(k, _)| *k == "x265-params"));
    }

    #[test]
    fn h265_packs_aq_mode_into_x265_params() {
        let p = profile_for(EncoderCodec::H265);
        let entries = p.dictionary_entries();
        assert!(entries.contains(&("x265-params", "aq-mode=2".to_string())));
        assert!(!entries.iter().any(|(k, _)| *k == "aq-mode"));
    }

    #[test]
    fn both_profiles_use_low_latency_settings() {
        for codec in [EncoderCodec::H264, EncoderCodec::H265] {
            let p = profile_for(codec);
            assert_eq!(p.preset, "ultrafast");
            assert_eq!(p.tune, "zerolatency");
            assert_eq!(p.gop_size, 3);
        }
    }
}
