use serde::Deserialize;

// ============================================================================
// Media extractor (yt-dlp) Types
// ============================================================================

/// Subset of yt-dlp's `--dump-single-json` output
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaInfo {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    /// Seconds; yt-dlp emits either an integer or a float
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub formats: Vec<EncodingCandidate>,
}

/// One available stream variant
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct EncodingCandidate {
    #[serde(default)]
    pub format_id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    /// Container extension, e.g. "webm" or "m4a"
    #[serde(default)]
    pub ext: Option<String>,
    #[serde(default)]
    pub acodec: Option<String>,
    #[serde(default)]
    pub vcodec: Option<String>,
    /// Average audio bitrate in kbit/s
    #[serde(default)]
    pub abr: Option<f64>,
    #[serde(default)]
    pub filesize: Option<u64>,
    #[serde(default)]
    pub filesize_approx: Option<u64>,
}

impl EncodingCandidate {
    /// yt-dlp marks missing streams with the literal codec "none"
    pub fn has_audio(&self) -> bool {
        matches!(self.acodec.as_deref(), Some(codec) if codec != "none")
    }

    pub fn bitrate(&self) -> f64 {
        self.abr.filter(|abr| abr.is_finite()).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_info_deserialization() {
        let json = r#"{
            "id": "kJQP7kiw5Fk",
            "title": "Despacito",
            "duration": 282,
            "thumbnail": "https://i.ytimg.com/vi/kJQP7kiw5Fk/maxresdefault.jpg",
            "formats": [
                {"format_id": "sb0", "ext": "mhtml", "acodec": "none", "vcodec": "none",
                 "url": "https://sb"},
                {"format_id": "251", "ext": "webm", "acodec": "opus", "vcodec": "none",
                 "abr": 135.2, "filesize": 4812345, "url": "https://audio"},
                {"format_id": "18", "ext": "mp4", "acodec": "mp4a.40.2", "vcodec": "avc1",
                 "abr": null}
            ]
        }"#;

        let info: MediaInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.duration, Some(282.0));
        assert_eq!(info.formats.len(), 3);
        assert!(!info.formats[0].has_audio());
        assert!(info.formats[1].has_audio());
        assert_eq!(info.formats[1].filesize, Some(4812345));
        assert_eq!(info.formats[2].bitrate(), 0.0);
    }

    #[test]
    fn test_missing_acodec_is_not_audio() {
        let candidate = EncodingCandidate::default();
        assert!(!candidate.has_audio());
    }
}
