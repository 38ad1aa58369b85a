//! Ordered field-fallback lookups over raw actor items.
//!
//! Actor output drifts between versions, so every value the transformers read
//! is declared here as an ordered list of candidate keys. The first key whose
//! value is present and truthy wins; callers supply the default. When the
//! upstream schema renames a field, the fix is one line in this file.
//!
//! "Truthy" means: not `null`, not `false`, not `0`, not `""`. Empty arrays
//! and objects count as present.

use serde_json::Value;

/// Keys read from `apify/facebook-posts-scraper` items.
pub mod facebook {
    pub const PAGE_NAME: &[&str] = &["pageName", "authorName"];
    pub const REACTIONS: &[&str] = &["reactions", "likesCount", "likes"];
    pub const COMMENTS: &[&str] = &["comments", "commentsCount"];
    pub const SHARES: &[&str] = &["shares", "sharesCount"];
    pub const TEXT: &[&str] = &["text", "message"];
    pub const DATE: &[&str] = &["time", "timestamp"];
}

/// Keys read from `clockworks/tiktok-trends-scraper` items.
pub mod tiktok {
    pub const TYPE: &str = "type";

    // Presence markers used for classification, tested in this order.
    pub const HASHTAG_MARKERS: &[&str] = &["hashtag", "challengeId"];
    pub const SOUND_MARKERS: &[&str] = &["music", "soundId"];
    pub const CREATOR_MARKERS: &[&str] = &["uniqueId", "creatorId"];

    pub const HASHTAG_NAME: &[&str] = &["hashtag", "title", "name"];
    pub const HASHTAG_VIEWS: &[&str] = &["views", "videoCount"];
    pub const HASHTAG_POSTS: &[&str] = &["postsCount", "videoCount"];
    pub const RANK: &[&str] = &["rank"];

    pub const SOUND_NAME: &[&str] = &["title", "musicTitle", "name"];
    pub const SOUND_AUTHOR: &[&str] = &["author", "musicAuthor"];
    pub const SOUND_USAGE: &[&str] = &["videoCount", "usage"];

    pub const CREATOR_NAME: &[&str] = &["uniqueId", "username", "name"];
    pub const CREATOR_FOLLOWERS: &[&str] = &["followers", "followerCount"];
    pub const ENGAGEMENT: &[&str] = &["engagementRate"];

    pub const GROWTH: &[&str] = &["growth"];
    pub const CATEGORY: &[&str] = &["category"];

    // Generic re-read used when no hashtags were classified.
    pub const FALLBACK_NAME: &[&str] = &["title", "name"];
    pub const FALLBACK_VIEWS: &[&str] = &["views", "viewCount"];
    pub const FALLBACK_POSTS: &[&str] = &["videoCount", "postCount"];
}

/// JavaScript-style truthiness of a JSON value.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// First truthy value among `keys`, in order.
#[must_use]
pub fn first_truthy<'a>(item: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| item.get(key))
        .find(|value| is_truthy(value))
}

/// `true` if any of `keys` holds a truthy value.
#[must_use]
pub fn has_any(item: &Value, keys: &[&str]) -> bool {
    first_truthy(item, keys).is_some()
}

/// First truthy value among `keys` that is a string or number, rendered as
/// text. Objects and arrays under a key are skipped.
#[must_use]
pub fn lookup_text(item: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| item.get(key))
        .filter(|value| is_truthy(value))
        .find_map(|value| match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
}

/// First truthy numeric value among `keys`. Numeric strings (`"3"`) are
/// parsed; other values (for example a `comments` array where a count was
/// expected) are skipped.
#[must_use]
pub fn lookup_number(item: &Value, keys: &[&str]) -> Option<f64> {
    keys.iter()
        .filter_map(|key| item.get(key))
        .filter(|value| is_truthy(value))
        .find_map(as_number)
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// First positive numeric value among `keys` as a count, defaulting to zero.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn lookup_count(item: &Value, keys: &[&str]) -> u64 {
    lookup_number(item, keys)
        .filter(|n| n.is_finite() && *n > 0.0)
        .map_or(0, |n| n.round() as u64)
}
