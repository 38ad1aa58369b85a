//! Facebook page posts: actor input and report transform.
//!
//! Posts are grouped by page (first-seen order) and summed into engagement
//! totals. Post text is scanned for topic keywords; topic counts are global
//! across pages.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use trendscope_core::ClientConfig;

use crate::fields::{self, facebook as keys};
use crate::types::{FacebookPayload, PageSummary, Report, ReportMetadata, TopPost, TopicSummary};

pub const ACTOR_ID: &str = "apify/facebook-posts-scraper";
pub const SOURCE_NAME: &str = "meta";
pub const SOURCE_LABEL: &str = "Meta/Facebook via Apify";

const PAGE_SOURCE_LABEL: &str = "Facebook Public Page";
const UNKNOWN_PAGE: &str = "Unknown Page";
const UNKNOWN_DATE: &str = "Unknown";
const TIMEFRAME: &str = "Last 30 days";

const MAX_POSTS_PER_PAGE: u32 = 30;
const MAX_COMMENTS_PER_POST: u32 = 10;
const COMMENTS_MODE: &str = "RANKED_UNFILTERED";

const MAX_TOP_POSTS: usize = 3;
const MAX_TOPICS: usize = 10;
const TEXT_PREVIEW_CHARS: usize = 100;
const MAX_ENGAGEMENT_SCORE: f64 = 10.0;

/// Non-computed topic annotations. No growth or sentiment analysis runs.
pub const PLACEHOLDER_GROWTH: &str = "+0%";
pub const PLACEHOLDER_SENTIMENT: &str = "positive";

/// Topic keywords used when the client config does not list its own.
pub const DEFAULT_TOPIC_KEYWORDS: &[&str] = &[
    "admisión",
    "admision",
    "becas",
    "carreras",
    "ingeniería",
    "ingenieria",
    "medicina",
    "derecho",
    "examen",
    "postulantes",
    "universidad",
    "ucsp",
    "matricula",
    "matrícula",
    "pregrado",
    "posgrado",
    "diplomado",
];

/// Input for the `apify/facebook-posts-scraper` actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacebookPostsInput {
    pub start_urls: Vec<StartUrl>,
    pub max_posts: u32,
    pub max_comments: u32,
    pub comments_mode: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StartUrl {
    pub url: String,
}

impl FacebookPostsInput {
    #[must_use]
    pub fn for_client(config: &ClientConfig) -> Self {
        Self {
            start_urls: config
                .facebook_pages
                .iter()
                .map(|url| StartUrl { url: url.clone() })
                .collect(),
            max_posts: MAX_POSTS_PER_PAGE,
            max_comments: MAX_COMMENTS_PER_POST,
            comments_mode: COMMENTS_MODE.to_string(),
        }
    }
}

/// The report written when the client has no Facebook pages configured.
#[must_use]
pub fn empty_report(config: &ClientConfig, generated_at: DateTime<Utc>) -> Report<FacebookPayload> {
    Report {
        timestamp: generated_at,
        source: SOURCE_LABEL.to_string(),
        region: config.region.clone(),
        category: config.category.clone(),
        client: config.label(),
        payload: FacebookPayload {
            pages: Vec::new(),
            aggregated_topics: Vec::new(),
        },
        metadata: ReportMetadata {
            method: format!("Apify {ACTOR_ID}"),
            note: "No Facebook pages configured. Add facebook_pages to the client config."
                .to_string(),
            timeframe: None,
            posts_fetched: Some(0),
            items_fetched: None,
        },
    }
}

/// Builds the Facebook report from raw actor items.
///
/// Pure and deterministic for a given `generated_at`.
#[must_use]
pub fn transform(
    items: &[Value],
    config: &ClientConfig,
    generated_at: DateTime<Utc>,
) -> Report<FacebookPayload> {
    let keywords = TopicKeywords::for_client(config);
    let tally = items
        .iter()
        .fold(Tally::default(), |tally, item| tally.add(item, &keywords));

    let pages: Vec<PageSummary> = tally.pages.into_iter().map(summarize_page).collect();
    let aggregated_topics = rank_topics(tally.topics);

    tracing::debug!(
        pages = pages.len(),
        topics = aggregated_topics.len(),
        posts = items.len(),
        "transformed facebook posts"
    );

    Report {
        timestamp: generated_at,
        source: SOURCE_LABEL.to_string(),
        region: config.region.clone(),
        category: config.category.clone(),
        client: config.label(),
        payload: FacebookPayload {
            pages,
            aggregated_topics,
        },
        metadata: ReportMetadata {
            method: format!("Apify {ACTOR_ID}"),
            note: "Live data from public Facebook pages".to_string(),
            timeframe: Some(TIMEFRAME.to_string()),
            posts_fetched: Some(items.len()),
            items_fetched: None,
        },
    }
}

/// Lower-cased needles paired with their display labels.
struct TopicKeywords {
    entries: Vec<(String, String)>,
}

impl TopicKeywords {
    fn for_client(config: &ClientConfig) -> Self {
        let keywords: Vec<&str> = if config.topic_keywords.is_empty() {
            DEFAULT_TOPIC_KEYWORDS.to_vec()
        } else {
            config.topic_keywords.iter().map(String::as_str).collect()
        };
        Self {
            entries: keywords.into_iter().filter_map(Self::entry).collect(),
        }
    }

    fn entry(keyword: &str) -> Option<(String, String)> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return None;
        }
        Some((keyword.to_lowercase(), capitalize(keyword)))
    }

    fn matches<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |(needle, _)| text.contains(needle.as_str()))
            .map(|(_, label)| label.as_str())
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Accumulator for the single pass over all posts.
#[derive(Default)]
struct Tally<'a> {
    pages: Vec<PageGroup<'a>>,
    page_index: HashMap<String, usize>,
    topics: Vec<(String, usize)>,
    topic_index: HashMap<String, usize>,
}

struct PageGroup<'a> {
    name: String,
    posts: Vec<&'a Value>,
}

impl<'a> Tally<'a> {
    fn add(mut self, post: &'a Value, keywords: &TopicKeywords) -> Self {
        let name = fields::lookup_text(post, keys::PAGE_NAME)
            .unwrap_or_else(|| UNKNOWN_PAGE.to_string());
        match self.page_index.get(&name) {
            Some(&idx) => self.pages[idx].posts.push(post),
            None => {
                self.page_index.insert(name.clone(), self.pages.len());
                self.pages.push(PageGroup {
                    name,
                    posts: vec![post],
                });
            }
        }

        let text = post_text(post).to_lowercase();
        for label in keywords.matches(&text) {
            match self.topic_index.get(label) {
                Some(&idx) => self.topics[idx].1 += 1,
                None => {
                    self.topic_index
                        .insert(label.to_string(), self.topics.len());
                    self.topics.push((label.to_string(), 1));
                }
            }
        }

        self
    }
}

fn post_text(post: &Value) -> String {
    fields::lookup_text(post, keys::TEXT).unwrap_or_default()
}

fn summarize_page(group: PageGroup<'_>) -> PageSummary {
    let total_reactions: u64 = group
        .posts
        .iter()
        .map(|p| fields::lookup_count(p, keys::REACTIONS))
        .sum();
    let total_comments: u64 = group
        .posts
        .iter()
        .map(|p| fields::lookup_count(p, keys::COMMENTS))
        .sum();
    let total_shares: u64 = group
        .posts
        .iter()
        .map(|p| fields::lookup_count(p, keys::SHARES))
        .sum();

    let posts_analyzed = group.posts.len();
    let avg_engagement = average_engagement(
        total_reactions + total_comments + total_shares,
        posts_analyzed,
    );

    let top_posts = group
        .posts
        .iter()
        .take(MAX_TOP_POSTS)
        .map(|p| TopPost {
            text: preview(&post_text(p)),
            reactions: fields::lookup_count(p, keys::REACTIONS),
            comments: fields::lookup_count(p, keys::COMMENTS),
            date: fields::lookup_text(p, keys::DATE).unwrap_or_else(|| UNKNOWN_DATE.to_string()),
        })
        .collect();

    PageSummary {
        name: group.name,
        source: PAGE_SOURCE_LABEL.to_string(),
        posts_analyzed,
        total_reactions,
        total_comments,
        total_shares,
        avg_engagement,
        top_posts,
    }
}

/// `round(total / posts)` with halves rounded up; zero posts → 0.
fn average_engagement(total: u64, posts: usize) -> u64 {
    let posts = posts as u64;
    if posts == 0 {
        return 0;
    }
    (total * 2 + posts) / (posts * 2)
}

fn preview(text: &str) -> String {
    let truncated: String = text.chars().take(TEXT_PREVIEW_CHARS).collect();
    format!("{truncated}...")
}

fn rank_topics(mut topics: Vec<(String, usize)>) -> Vec<TopicSummary> {
    // Stable sort: equal counts keep first-seen order.
    topics.sort_by(|a, b| b.1.cmp(&a.1));
    topics
        .into_iter()
        .take(MAX_TOPICS)
        .map(|(topic, mentions)| TopicSummary {
            topic,
            mentions,
            engagement_score: engagement_score(mentions),
            growth: PLACEHOLDER_GROWTH.to_string(),
            sentiment: PLACEHOLDER_SENTIMENT.to_string(),
        })
        .collect()
}

fn engagement_score(mentions: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let mentions = mentions as f64;
    (mentions / 2.0).min(MAX_ENGAGEMENT_SCORE)
}

#[cfg(test)]
#[path = "facebook_test.rs"]
mod tests;
