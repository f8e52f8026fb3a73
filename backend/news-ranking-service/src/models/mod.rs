use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Catalog entry for a news article. Loaded once at startup, read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewsItem {
    #[serde(alias = "id", alias = "item_id", alias = "itemId")]
    pub page: String,
    pub title: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub body: String,
    pub url: String,
    pub issued: DateTime<Utc>,
    pub visits: f64,
    #[serde(rename = "timeOnPage", alias = "time_on_page")]
    pub time_on_page: f64,
}

/// Summary shape used in recommendation lists
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct News {
    pub page: String,
    pub title: String,
    pub caption: String,
    pub url: String,
    pub issued: DateTime<Utc>,
}

impl From<&NewsItem> for News {
    fn from(item: &NewsItem) -> Self {
        Self {
            page: item.page.clone(),
            title: item.title.clone(),
            caption: item.caption.clone(),
            url: item.url.clone(),
            issued: item.issued,
        }
    }
}

/// Full article, including the body
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewsDetail {
    pub page: String,
    pub title: String,
    pub caption: String,
    pub body: String,
    pub url: String,
    pub issued: DateTime<Utc>,
}

impl From<&NewsItem> for NewsDetail {
    fn from(item: &NewsItem) -> Self {
        Self {
            page: item.page.clone(),
            title: item.title.clone(),
            caption: item.caption.clone(),
            body: item.body.clone(),
            url: item.url.clone(),
            issued: item.issued,
        }
    }
}

/// Result of a "related articles" query. `detail` is `None` for unknown ids.
#[derive(Debug, Clone, Default)]
pub struct RelatedNews {
    pub detail: Option<NewsDetail>,
    pub related: Vec<News>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub catalog_items: usize,
    pub content_items: usize,
    pub content_features: usize,
    pub users: usize,
    pub interaction_items: usize,
    pub interactions: usize,
    pub loaded_at: DateTime<Utc>,
}
