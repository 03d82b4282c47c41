pub mod search;

pub use crate::domain::model::{SearchRequest, SearchResult};
pub use crate::domain::ports::{Cache, ConfigProvider, GistSource};
pub use crate::utils::error::Result;
