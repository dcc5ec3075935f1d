pub mod movie;
pub mod search;

pub use movie::MovieRecord;
pub use search::SearchHit;
