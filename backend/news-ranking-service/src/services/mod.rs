pub mod artifacts;
pub mod catalog;
pub mod engine;
pub mod popularity;
pub mod ranking;
pub mod recall;
pub mod similarity;

pub use artifacts::{load_from_directory, LoadedArtifacts};
pub use catalog::{Catalog, CatalogProvider, UserListProvider};
pub use engine::NewsRecommendationEngine;
pub use popularity::PopularityRanker;
pub use ranking::HybridRanker;
pub use similarity::{BruteForceCosineIndex, SimilarityIndex};
