pub mod error;
pub mod imdb;
pub mod normalize;
pub mod raw;
pub mod traits;

pub use error::ProviderError;
pub use imdb::ImdbClient;
pub use normalize::{normalize_record, NormalizeError};
pub use raw::RawRecord;
pub use traits::MetadataProvider;
