//! TikTok trends: actor input and report transform.
//!
//! Trend items come back as one flat list mixing hashtags, songs and
//! creators. Each item is classified into at most one bucket by the fields it
//! carries. If nothing classifies as a hashtag, every item is re-read as a
//! generic hashtag so the dashboard still has something to show; that pass
//! guesses at the schema and may mislabel items if the actor output drifts.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use trendscope_core::ClientConfig;

use crate::fields::{self, tiktok as keys};
use crate::format::format_number;
use crate::types::{
    CreatorTrend, HashtagTrend, Report, ReportMetadata, SoundTrend, TikTokPayload, Trends,
};

pub const ACTOR_ID: &str = "clockworks/tiktok-trends-scraper";
pub const SOURCE_NAME: &str = "tiktok";
pub const SOURCE_LABEL: &str = "TikTok Trends via Apify";

const DEFAULT_COUNTRY: &str = "PE";
const MAX_ITEMS: u32 = 50;
const TIMEFRAME: &str = "Last 30 days";

const UNKNOWN: &str = "Unknown";
const DEFAULT_GROWTH: &str = "+0%";
const DEFAULT_ENGAGEMENT: &str = "0%";
const DEFAULT_CATEGORY: &str = "General";
const SOUND_CATEGORY: &str = "Music";
const FALLBACK_CATEGORY: &str = "Trending";

/// Relevance assigned to hashtags that carry no rank.
const UNRANKED_RELEVANCE: i64 = 85;
const RELEVANCE_CEILING: i64 = 100;

/// Input for the `clockworks/tiktok-trends-scraper` actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TikTokTrendsInput {
    pub country: String,
    pub hashtags: bool,
    pub songs: bool,
    pub creators: bool,
    pub videos: bool,
    pub max_items: u32,
}

impl TikTokTrendsInput {
    /// Trending hashtags, songs and creators for the client's region
    /// (`PE` when the region is blank).
    #[must_use]
    pub fn for_client(config: &ClientConfig) -> Self {
        let region = config.region.trim();
        let country = if region.is_empty() {
            DEFAULT_COUNTRY
        } else {
            region
        };
        Self {
            country: country.to_string(),
            hashtags: true,
            songs: true,
            creators: true,
            videos: false,
            max_items: MAX_ITEMS,
        }
    }
}

/// Which bucket a raw trend item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendKind {
    Hashtag,
    Sound,
    Creator,
}

/// Classifies one item, testing in order: explicit `type` tag, hashtag
/// markers, sound markers, creator markers. `None` means the item is dropped
/// from categorized output.
#[must_use]
pub fn classify(item: &Value) -> Option<TrendKind> {
    match item.get(keys::TYPE).and_then(Value::as_str) {
        Some("hashtag") => return Some(TrendKind::Hashtag),
        Some("song") => return Some(TrendKind::Sound),
        Some("creator") => return Some(TrendKind::Creator),
        _ => {}
    }

    if fields::has_any(item, keys::HASHTAG_MARKERS) {
        Some(TrendKind::Hashtag)
    } else if fields::has_any(item, keys::SOUND_MARKERS) {
        Some(TrendKind::Sound)
    } else if fields::has_any(item, keys::CREATOR_MARKERS) {
        Some(TrendKind::Creator)
    } else {
        None
    }
}

/// Builds the TikTok report from raw actor items.
///
/// Pure and deterministic for a given `generated_at`.
#[must_use]
pub fn transform(
    items: &[Value],
    config: &ClientConfig,
    generated_at: DateTime<Utc>,
) -> Report<TikTokPayload> {
    let mut trends = items.iter().fold(Trends::default(), |mut trends, item| {
        match classify(item) {
            Some(TrendKind::Hashtag) => trends.hashtags.push(hashtag(item, &config.region)),
            Some(TrendKind::Sound) => trends.sounds.push(sound(item)),
            Some(TrendKind::Creator) => trends.creators.push(creator(item)),
            None => {}
        }
        trends
    });

    if trends.hashtags.is_empty() && !items.is_empty() {
        tracing::warn!(
            items = items.len(),
            "no items classified as hashtags; re-reading all items as generic hashtags"
        );
        trends.hashtags = items
            .iter()
            .enumerate()
            .map(|(idx, item)| generic_hashtag(idx, item, &config.region))
            .collect();
    }

    tracing::debug!(
        hashtags = trends.hashtags.len(),
        sounds = trends.sounds.len(),
        creators = trends.creators.len(),
        "transformed tiktok trends"
    );

    Report {
        timestamp: generated_at,
        source: SOURCE_LABEL.to_string(),
        region: config.region.clone(),
        category: config.category.clone(),
        client: config.label(),
        payload: TikTokPayload { trends },
        metadata: ReportMetadata {
            method: format!("Apify {ACTOR_ID}"),
            note: "Live data from TikTok trend discovery".to_string(),
            timeframe: Some(TIMEFRAME.to_string()),
            posts_fetched: None,
            items_fetched: Some(items.len()),
        },
    }
}

fn text_or(item: &Value, candidates: &[&str], default: &str) -> String {
    fields::lookup_text(item, candidates).unwrap_or_else(|| default.to_string())
}

fn hashtag(item: &Value, region: &str) -> HashtagTrend {
    HashtagTrend {
        hashtag: text_or(item, keys::HASHTAG_NAME, UNKNOWN),
        views: format_number(fields::first_truthy(item, keys::HASHTAG_VIEWS)),
        posts: format_number(fields::first_truthy(item, keys::HASHTAG_POSTS)),
        growth: text_or(item, keys::GROWTH, DEFAULT_GROWTH),
        relevance_score: relevance_from_rank(item),
        region: region.to_string(),
        category: text_or(item, keys::CATEGORY, DEFAULT_CATEGORY),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn relevance_from_rank(item: &Value) -> i64 {
    fields::lookup_number(item, keys::RANK)
        .filter(|rank| rank.is_finite())
        .map_or(UNRANKED_RELEVANCE, |rank| {
            RELEVANCE_CEILING - rank.round() as i64
        })
}

fn sound(item: &Value) -> SoundTrend {
    SoundTrend {
        sound_name: text_or(item, keys::SOUND_NAME, UNKNOWN),
        author: text_or(item, keys::SOUND_AUTHOR, UNKNOWN),
        usage: format_number(fields::first_truthy(item, keys::SOUND_USAGE)),
        growth: text_or(item, keys::GROWTH, DEFAULT_GROWTH),
        category: SOUND_CATEGORY.to_string(),
    }
}

fn creator(item: &Value) -> CreatorTrend {
    CreatorTrend {
        username: text_or(item, keys::CREATOR_NAME, UNKNOWN),
        followers: format_number(fields::first_truthy(item, keys::CREATOR_FOLLOWERS)),
        engagement: text_or(item, keys::ENGAGEMENT, DEFAULT_ENGAGEMENT),
        category: text_or(item, keys::CATEGORY, DEFAULT_CATEGORY),
    }
}

/// One hashtag-shaped record per raw item, relevance descending by position.
fn generic_hashtag(idx: usize, item: &Value, region: &str) -> HashtagTrend {
    let name = text_or(item, keys::FALLBACK_NAME, UNKNOWN);
    let idx = i64::try_from(idx).unwrap_or(i64::MAX);
    HashtagTrend {
        hashtag: format!("#{}", name.strip_prefix('#').unwrap_or(&name)),
        views: format_number(fields::first_truthy(item, keys::FALLBACK_VIEWS)),
        posts: format_number(fields::first_truthy(item, keys::FALLBACK_POSTS)),
        growth: DEFAULT_GROWTH.to_string(),
        relevance_score: RELEVANCE_CEILING.saturating_sub(idx),
        region: region.to_string(),
        category: FALLBACK_CATEGORY.to_string(),
    }
}

#[cfg(test)]
#[path = "tiktok_test.rs"]
mod tests;
