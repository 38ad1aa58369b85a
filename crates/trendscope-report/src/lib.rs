//! Turns raw Apify dataset items into dashboard reports and writes them out.
//!
//! The transforms in [`facebook`] and [`tiktok`] are pure: same items, same
//! client config and same timestamp give the same report. [`ResultWriter`] is
//! the only part that touches the filesystem.

pub mod error;
pub mod facebook;
pub mod fields;
pub mod format;
pub mod tiktok;
pub mod types;
pub mod writer;

pub use error::ReportError;
pub use format::format_number;
pub use types::{
    CreatorTrend, FacebookPayload, HashtagTrend, PageSummary, Report, ReportMetadata, SoundTrend,
    TikTokPayload, TopPost, TopicSummary, Trends,
};
pub use writer::{ResultWriter, WrittenFiles};
