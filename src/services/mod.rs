pub mod catalog;
pub mod extractor;
pub mod health;
pub mod relay;
pub mod selection;

pub use catalog::{CatalogClient, YtMusicClient};
pub use extractor::{MediaExtractor, YtDlp};
pub use relay::Relay;
