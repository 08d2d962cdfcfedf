use std::cmp::Ordering;

use crate::{
    error::{AppError, AppResult},
    models::{EncodingCandidate, MediaInfo},
    services::extractor::MediaExtractor,
};

/// Preference order over audio candidates: higher bitrate first, then earlier
/// position in the extractor's list. `Ordering::Less` means "preferred".
fn preference(
    (a_index, a): (usize, &EncodingCandidate),
    (b_index, b): (usize, &EncodingCandidate),
) -> Ordering {
    b.bitrate()
        .total_cmp(&a.bitrate())
        .then(a_index.cmp(&b_index))
}

/// Picks the best audio-capable encoding, if any.
pub fn select_best_audio(formats: &[EncodingCandidate]) -> Option<&EncodingCandidate> {
    formats
        .iter()
        .enumerate()
        .filter(|(_, candidate)| candidate.has_audio())
        .min_by(|a, b| preference(*a, *b))
        .map(|(_, candidate)| candidate)
}

/// An extracted video together with its chosen audio encoding
#[derive(Debug, Clone)]
pub struct ResolvedAudio {
    pub info: MediaInfo,
    pub encoding: EncodingCandidate,
    pub url: String,
}

/// Asks the extractor for `watch_url` and selects the audio encoding to serve.
///
/// Fails with `NotFound` when nothing carries audio or the winner has no
/// direct URL.
pub async fn resolve_audio(
    extractor: &dyn MediaExtractor,
    watch_url: &str,
) -> AppResult<ResolvedAudio> {
    let info = extractor.extract(watch_url).await?;

    let encoding = select_best_audio(&info.formats)
        .cloned()
        .ok_or_else(|| AppError::NotFound("No audio stream found".to_string()))?;

    let url = encoding
        .url
        .clone()
        .ok_or_else(|| AppError::NotFound("No audio stream URL found".to_string()))?;

    tracing::debug!(
        format_id = ?encoding.format_id,
        bitrate = encoding.bitrate(),
        ext = ?encoding.ext,
        "Selected audio encoding"
    );

    Ok(ResolvedAudio { info, encoding, url })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::extractor::MockMediaExtractor;

    fn audio(id: &str, abr: Option<f64>) -> EncodingCandidate {
        EncodingCandidate {
            format_id: Some(id.to_string()),
            url: Some(format!("https://cdn/{}", id)),
            ext: Some("webm".to_string()),
            acodec: Some("opus".to_string()),
            vcodec: Some("none".to_string()),
            abr,
            ..EncodingCandidate::default()
        }
    }

    fn video_only(id: &str) -> EncodingCandidate {
        EncodingCandidate {
            acodec: Some("none".to_string()),
            vcodec: Some("avc1".to_string()),
            abr: Some(999.0),
            ..audio(id, None)
        }
    }

    #[test]
    fn test_selects_highest_bitrate_in_any_order() {
        let orders = [[64.0, 128.0, 96.0], [128.0, 96.0, 64.0], [96.0, 64.0, 128.0]];

        for order in orders {
            let formats: Vec<_> = order
                .iter()
                .map(|abr| audio(&format!("{}", abr), Some(*abr)))
                .collect();
            let best = select_best_audio(&formats).unwrap();
            assert_eq!(best.abr, Some(128.0));
        }
    }

    #[test]
    fn test_ties_prefer_earlier_position() {
        let formats = vec![audio("first", Some(128.0)), audio("second", Some(128.0))];
        let best = select_best_audio(&formats).unwrap();
        assert_eq!(best.format_id.as_deref(), Some("first"));
    }

    #[test]
    fn test_missing_bitrate_counts_as_zero() {
        let formats = vec![audio("unknown", None), audio("low", Some(32.0))];
        assert_eq!(select_best_audio(&formats).unwrap().format_id.as_deref(), Some("low"));

        let formats = vec![audio("unknown", None), audio("also-unknown", None)];
        assert_eq!(
            select_best_audio(&formats).unwrap().format_id.as_deref(),
            Some("unknown")
        );
    }

    #[test]
    fn test_ignores_video_only_encodings() {
        let formats = vec![video_only("137"), audio("251", Some(48.0))];
        assert_eq!(select_best_audio(&formats).unwrap().format_id.as_deref(), Some("251"));
    }

    #[test]
    fn test_no_audio_candidates() {
        assert!(select_best_audio(&[]).is_none());
        assert!(select_best_audio(&[video_only("137"), video_only("248")]).is_none());
    }

    #[test]
    fn test_resolve_audio_not_found() {
        let mut extractor = MockMediaExtractor::new();
        extractor.expect_extract().times(1).returning(|_| {
            Ok(MediaInfo {
                formats: vec![video_only("137")],
                ..MediaInfo::default()
            })
        });

        let err = tokio_test::block_on(resolve_audio(&extractor, "https://watch")).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_resolve_audio_without_url() {
        let mut extractor = MockMediaExtractor::new();
        extractor.expect_extract().returning(|_| {
            let mut candidate = audio("251", Some(160.0));
            candidate.url = None;
            Ok(MediaInfo {
                formats: vec![candidate, audio("140", Some(128.0))],
                ..MediaInfo::default()
            })
        });

        let err = tokio_test::block_on(resolve_audio(&extractor, "https://watch")).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_resolve_audio_picks_best() {
        let mut extractor = MockMediaExtractor::new();
        extractor
            .expect_extract()
            .withf(|url| url.ends_with("watch?v=abc"))
            .returning(|_| {
                Ok(MediaInfo {
                    title: Some("Track".to_string()),
                    formats: vec![audio("139", Some(48.0)), audio("251", Some(160.0))],
                    ..MediaInfo::default()
                })
            });

        let resolved = tokio_test::block_on(resolve_audio(
            &extractor,
            "https://music.youtube.com/watch?v=abc",
        ))
        .unwrap();
        assert_eq!(resolved.url, "https://cdn/251");
        assert_eq!(resolved.info.title.as_deref(), Some("Track"));
    }

    #[test]
    fn test_resolve_audio_propagates_extractor_failure() {
        let mut extractor = MockMediaExtractor::new();
        extractor
            .expect_extract()
            .returning(|_| Err(AppError::Extractor("Video unavailable".to_string())));

        let err = tokio_test::block_on(resolve_audio(&extractor, "https://watch")).unwrap_err();
        assert!(matches!(err, AppError::Extractor(_)));
    }
}
