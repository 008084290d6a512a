pub mod content_repository;
pub mod ranking;

pub use content_repository::{ContentRepository, InMemoryContentRepository};
pub use ranking::{RankingEngine, RankingRequest};
