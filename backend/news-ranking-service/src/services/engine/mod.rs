use crate::config::RecommendationConfig;
use crate::models::{ModelInfo, News, NewsDetail, RelatedNews};
use crate::services::artifacts::LoadedArtifacts;
use crate::services::catalog::{Catalog, CatalogProvider, UserListProvider};
use crate::services::popularity::{PopularityRanker, PopularityWeights};
use crate::services::ranking::{HybridRanker, HybridWeights};
use crate::services::recall::{
    ContentBasedExpander, InteractionModel, RelatedItemsLookup, UserBasedRecommender,
};
use std::sync::Arc;
use tracing::{debug, info};

/// News Recommendation Engine
///
/// Architecture:
/// 1. Popularity ranking (cold start, computed once at startup)
/// 2. User-based collaborative filtering over the interaction matrix
/// 3. Content-based expansion of the user's history
/// 4. Weighted hybrid fusion
///
/// All state is read-only after construction; the engine is shared across
/// request workers behind an `Arc`.
pub struct NewsRecommendationEngine {
    catalog: Arc<Catalog>,
    interactions: Arc<InteractionModel>,
    user_cf: UserBasedRecommender,
    content: ContentBasedExpander,
    related: RelatedItemsLookup,
    hybrid: HybridRanker,
    popular: Arc<Vec<String>>,
    info: ModelInfo,
    default_top_n: usize,
}

impl NewsRecommendationEngine {
    pub fn new(artifacts: LoadedArtifacts, config: &RecommendationConfig) -> Self {
        let LoadedArtifacts {
            catalog,
            content,
            interactions,
            content_features,
            interaction_count,
            loaded_at,
        } = artifacts;

        let ranker = PopularityRanker::new(PopularityWeights::from(config));
        let popular = Arc::new(ranker.rank(catalog.items(), catalog.len()));

        let info = ModelInfo {
            catalog_items: catalog.len(),
            content_items: content.len(),
            content_features,
            users: interactions.users().len(),
            interaction_items: interactions.item_count(),
            interactions: interaction_count,
            loaded_at,
        };

        info!(
            catalog_items = info.catalog_items,
            users = info.users,
            cf_neighbors = config.cf_neighbors,
            content_top_k = config.content_top_k,
            "Recommendation engine initialized"
        );

        Self {
            user_cf: UserBasedRecommender::new(
                interactions.clone(),
                popular.clone(),
                config.cf_neighbors,
            ),
            content: ContentBasedExpander::new(
                RelatedItemsLookup::new(content.clone()),
                config.content_top_k,
            ),
            related: RelatedItemsLookup::new(content),
            hybrid: HybridRanker::new(HybridWeights::from(config)),
            catalog,
            interactions,
            popular,
            info,
            default_top_n: config.default_top_n,
        }
    }

    pub fn default_top_n(&self) -> usize {
        self.default_top_n
    }

    /// Ranked item ids for a user.
    ///
    /// Each source is asked for `2 * top_n` candidates before fusion. Missing,
    /// empty, and unknown user ids all resolve to the popularity ranking.
    pub fn recommend_ids_for_user(&self, user_id: Option<&str>, top_n: usize) -> Vec<String> {
        let user_id = user_id.filter(|id| !id.is_empty());
        let candidates = top_n.saturating_mul(2);

        let collaborative = self.user_cf.recommend(user_id, candidates);
        let history = user_id
            .map(|id| self.interactions.history_of(id))
            .unwrap_or_default();
        let content = self.content.expand(&history, candidates);

        let ranked = self.hybrid.rank(&collaborative, &content, top_n);

        debug!(
            user_id = user_id.unwrap_or("<anonymous>"),
            history_len = history.len(),
            collaborative = collaborative.len(),
            content = content.len(),
            returned = ranked.len(),
            "Hybrid recommendations generated"
        );

        ranked
    }

    /// Recommendations resolved to catalog entries, in ranked order
    pub fn recommend_for_user(&self, user_id: Option<&str>, top_n: usize) -> Vec<News> {
        let ids = self.recommend_ids_for_user(user_id, top_n);
        self.to_news(&ids)
    }

    /// Full detail for `item_id` plus its related articles.
    /// Unknown ids give `detail: None` and no related items.
    pub fn recommend_related(&self, item_id: &str, top_n: usize) -> RelatedNews {
        let Some(item) = self.catalog.get(item_id) else {
            return RelatedNews::default();
        };

        let related_ids = self.related.related(item_id, top_n);

        RelatedNews {
            detail: Some(NewsDetail::from(item)),
            related: self.to_news(&related_ids),
        }
    }

    pub fn list_users(&self) -> Vec<String> {
        self.interactions.users().list_users()
    }

    pub fn model_info(&self) -> ModelInfo {
        self.info.clone()
    }

    /// Full popularity ranking, best first
    pub fn popular(&self) -> &[String] {
        &self.popular
    }

    fn to_news(&self, ids: &[String]) -> Vec<News> {
        self.catalog
            .news_info(ids)
            .iter()
            .map(News::from)
            .collect()
    }
}
