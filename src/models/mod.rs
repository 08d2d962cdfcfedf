pub mod catalog;
pub mod media;
pub mod song;
pub mod stream;

pub use catalog::{
    thumbnails_from_value, AlbumRef, ArtistRef, CatalogSong, SongPayload, Thumbnail, VideoDetails,
};
pub use media::{EncodingCandidate, MediaInfo};
pub use song::{SearchResponse, SearchResultItem, SongDetails};
pub use stream::StreamDescriptor;
