use crate::error::{AppError, Result};
use serde::Deserialize;
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub artifacts: ArtifactsConfig,
    pub recommendation: RecommendationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub app_env: String,
    pub http_port: u16,
    pub service_name: String,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactsConfig {
    pub dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationConfig {
    pub default_top_n: usize,
    /// Neighbour users pulled from the interaction index per request
    pub cf_neighbors: usize,
    /// Content neighbours fetched per history item
    pub content_top_k: usize,
    pub hybrid_weight_cf: f64,
    pub hybrid_weight_cb: f64,
    pub popularity_weight_recency: f64,
    pub popularity_weight_visits: f64,
    pub popularity_weight_time: f64,
    /// 0 returns every known user
    pub users_sample_size: usize,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            default_top_n: 10,
            cf_neighbors: 2000,
            content_top_k: 10,
            hybrid_weight_cf: 0.5,
            hybrid_weight_cb: 0.5,
            popularity_weight_recency: 0.3,
            popularity_weight_visits: 0.4,
            popularity_weight_time: 0.3,
            users_sample_size: 10,
        }
    }
}

impl RecommendationConfig {
    pub fn validate(&self) -> Result<()> {
        let weights = [
            ("HYBRID_WEIGHT_CF", self.hybrid_weight_cf),
            ("HYBRID_WEIGHT_CB", self.hybrid_weight_cb),
            ("POPULARITY_WEIGHT_RECENCY", self.popularity_weight_recency),
            ("POPULARITY_WEIGHT_VISITS", self.popularity_weight_visits),
            ("POPULARITY_WEIGHT_TIME", self.popularity_weight_time),
        ];
        for (key, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(AppError::Config(format!(
                    "{} must be a non-negative number, got {}",
                    key, value
                )));
            }
        }

        if self.default_top_n == 0 {
            return Err(AppError::Config("DEFAULT_TOP_N must be at least 1".into()));
        }

        Ok(())
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = RecommendationConfig::default();

        let config = Config {
            service: ServiceConfig {
                app_env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                http_port: parse_env("HTTP_PORT", 8000)?,
                service_name: env::var("SERVICE_NAME")
                    .unwrap_or_else(|_| "news-ranking-service".to_string()),
                log_format: parse_env("LOG_FORMAT", LogFormat::Text)?,
            },
            artifacts: ArtifactsConfig {
                dir: env::var("ARTIFACTS_DIR").unwrap_or_else(|_| "./artifacts".to_string()),
            },
            recommendation: RecommendationConfig {
                default_top_n: parse_env("DEFAULT_TOP_N", defaults.default_top_n)?,
                cf_neighbors: parse_env("CF_NEIGHBORS", defaults.cf_neighbors)?,
                content_top_k: parse_env("CONTENT_TOP_K", defaults.content_top_k)?,
                hybrid_weight_cf: parse_env("HYBRID_WEIGHT_CF", defaults.hybrid_weight_cf)?,
                hybrid_weight_cb: parse_env("HYBRID_WEIGHT_CB", defaults.hybrid_weight_cb)?,
                popularity_weight_recency: parse_env(
                    "POPULARITY_WEIGHT_RECENCY",
                    defaults.popularity_weight_recency,
                )?,
                popularity_weight_visits: parse_env(
                    "POPULARITY_WEIGHT_VISITS",
                    defaults.popularity_weight_visits,
                )?,
                popularity_weight_time: parse_env(
                    "POPULARITY_WEIGHT_TIME",
                    defaults.popularity_weight_time,
                )?,
                users_sample_size: parse_env("USERS_SAMPLE_SIZE", defaults.users_sample_size)?,
            },
        };

        config.recommendation.validate()?;
        Ok(config)
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{} is invalid ({}): {}", key, raw, e))),
        Err(_) => Ok(default),
    }
}
