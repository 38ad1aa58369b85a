//! Report shapes written to `data/<source>/` and `public/data/<source>/`.
//!
//! Field names are part of the dashboard contract. Facebook keys are
//! snake_case except `aggregatedTopics`; TikTok keys are camelCase.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

/// A normalized report for one pipeline run. `P` is the source-specific
/// payload, flattened into the top-level object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report<P> {
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub source: String,
    pub region: String,
    pub category: String,
    pub client: String,
    #[serde(flatten)]
    pub payload: P,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportMetadata {
    pub method: String,
    pub note: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeframe: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posts_fetched: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items_fetched: Option<usize>,
}

/// ISO-8601 in UTC with millisecond precision, e.g. `2026-10-18T07:05:00.123Z`.
#[allow(clippy::trivially_copy_pass_by_ref)]
fn serialize_timestamp<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}

// ---------------------------------------------------------------------------
// Facebook
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacebookPayload {
    pub pages: Vec<PageSummary>,
    #[serde(rename = "aggregatedTopics")]
    pub aggregated_topics: Vec<TopicSummary>,
}

/// Engagement totals for one Facebook page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSummary {
    pub name: String,
    pub source: String,
    pub posts_analyzed: usize,
    pub total_reactions: u64,
    pub total_comments: u64,
    pub total_shares: u64,
    pub avg_engagement: u64,
    pub top_posts: Vec<TopPost>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopPost {
    pub text: String,
    pub reactions: u64,
    pub comments: u64,
    pub date: String,
}

/// A topic keyword and how many posts mentioned it.
///
/// `growth` and `sentiment` are fixed placeholders; nothing computes them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicSummary {
    pub topic: String,
    pub mentions: usize,
    pub engagement_score: f64,
    pub growth: String,
    pub sentiment: String,
}

// ---------------------------------------------------------------------------
// TikTok
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TikTokPayload {
    pub trends: Trends,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Trends {
    pub hashtags: Vec<HashtagTrend>,
    pub sounds: Vec<SoundTrend>,
    pub creators: Vec<CreatorTrend>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HashtagTrend {
    pub hashtag: String,
    pub views: String,
    pub posts: String,
    pub growth: String,
    pub relevance_score: i64,
    pub region: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SoundTrend {
    pub sound_name: String,
    pub author: String,
    pub usage: String,
    pub growth: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorTrend {
    pub username: String,
    pub followers: String,
    pub engagement: String,
    pub category: String,
}
