//! Encoder configuration module
//!
//! Defines the HandBrakeCLI settings applied to every encode job. The
//! defaults produce an x264 two-pass MKV with the original audio tracks
//! copied and all matching subtitle tracks carried over.

use serde::{Deserialize, Serialize};

/// HandBrakeCLI encode settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderSettings {
    //
    // Container
    //

    /// HandBrake container format name
    pub format: String,

    /// Add chapter markers to the output
    pub markers: bool,

    /// Optimize MP4 layout for streaming (ignored for MKV)
    pub optimize: bool,

    //
    // Video
    //

    /// Video encoder name
    pub video_encoder: String,

    /// Encoder speed preset
    pub encoder_preset: String,

    /// Encoder profile
    pub encoder_profile: String,

    /// Encoder level
    pub encoder_level: String,

    /// Video bitrate in kbps
    pub video_bitrate: u32,

    /// Run a two-pass encode
    pub two_pass: bool,

    /// Use a fast first pass (only meaningful with `two_pass`)
    pub turbo: bool,

    /// Force a constant frame rate
    pub constant_frame_rate: bool,

    /// Crop values as top:bottom:left:right
    pub crop: String,

    /// Enable comb detection, decombing and detelecining
    pub deinterlace: bool,

    /// Disable the deblock and denoise filters
    pub disable_cleanup_filters: bool,

    //
    // Audio
    //

    /// Audio codec; "copy" passes tracks through
    pub audio_encoder: String,

    /// Codec used when a track cannot be copied
    pub audio_fallback: String,

    /// Fallback audio bitrate in kbps
    pub audio_bitrate: u32,

    /// Fallback downmix
    pub mixdown: String,
}

impl Default for EncoderSettings {
    fn default() -> Self {
        Self {
            format: "av_mkv".to_string(),
            markers: true,
            optimize: false,
            video_encoder: "x264".to_string(),
            encoder_preset: "medium".to_string(),
            encoder_profile: "main".to_string(),
            encoder_level: "4.0".to_string(),
            video_bitrate: 1600,
            two_pass: true,
            turbo: true,
            constant_frame_rate: true,
            crop: "0:0:0:0".to_string(),
            deinterlace: true,
            disable_cleanup_filters: true,
            audio_encoder: "copy".to_string(),
            audio_fallback: "av_aac".to_string(),
            audio_bitrate: 192,
            mixdown: "dpl2".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table_is_default() {
        let settings: EncoderSettings = toml::from_str("").unwrap();
        assert_eq!(settings, EncoderSettings::default());
    }

    #[test]
    fn test_override_single_field() {
        let settings: EncoderSettings =
            toml::from_str("two_pass = false\nvideo_encoder = \"x265\"").unwrap();
        assert!(!settings.two_pass);
        assert_eq!(settings.video_encoder, "x265");
        assert_eq!(settings.audio_bitrate, 192);
    }
}
