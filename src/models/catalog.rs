use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::Value;

// ============================================================================
// Catalog (YouTube Music InnerTube) Types
// ============================================================================

/// One entry of a thumbnail list. Fields of an unexpected type read as `None`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Thumbnail {
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub width: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub height: Option<u64>,
}

impl Thumbnail {
    pub fn new(url: &str) -> Self {
        Self {
            url: Some(url.to_string()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistRef {
    pub name: String,
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumRef {
    pub name: String,
    pub id: Option<String>,
}

/// One song row parsed out of a catalog search shelf
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSong {
    pub video_id: Option<String>,
    pub title: Option<String>,
    pub artists: Vec<ArtistRef>,
    pub album: Option<AlbumRef>,
    /// Display duration, e.g. "3:45"
    pub duration: Option<String>,
    /// Ascending by size
    pub thumbnails: Vec<Thumbnail>,
}

/// Raw player response for a single video
///
/// Every nested field is optional and decoded leniently: a value of the wrong
/// shape becomes `None` instead of failing the whole payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongPayload {
    #[serde(default, deserialize_with = "lenient")]
    pub video_details: Option<VideoDetails>,
    #[serde(default, deserialize_with = "lenient")]
    pub playability_status: Option<PlayabilityStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoDetails {
    #[serde(default, deserialize_with = "lenient_string")]
    pub video_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub author: Option<String>,
    /// Decimal string upstream, occasionally a plain number
    #[serde(default, deserialize_with = "lenient_u64")]
    pub length_seconds: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub view_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub thumbnail: Option<ThumbnailList>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThumbnailList {
    #[serde(default, deserialize_with = "lenient_thumbnails")]
    pub thumbnails: Vec<Thumbnail>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayabilityStatus {
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub reason: Option<String>,
}

/// Picks the highest resolution thumbnail: the catalog lists them ascending,
/// so that is the last one.
pub fn best_thumbnail(thumbnails: &[Thumbnail]) -> Option<String> {
    thumbnails.last().and_then(|t| t.url.clone())
}

/// Decodes a thumbnail array entry by entry, keeping positions; entries that are
/// not objects become empty thumbnails.
pub fn thumbnails_from_value(value: &Value) -> Vec<Thumbnail> {
    value
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .map(|entry| Thumbnail::deserialize(entry).unwrap_or_default())
                .collect()
        })
        .unwrap_or_default()
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Accepts `282`, `282.0` and `"282"`
fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_thumbnails<'de, D>(deserializer: D) -> Result<Vec<Thumbnail>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(thumbnails_from_value(&value))
}
