//! Console summaries printed after a successful run.

use trendscope_report::{FacebookPayload, TikTokPayload, WrittenFiles};

use crate::PipelineOutput;

const TOP_N: usize = 5;

pub fn print_meta(output: &PipelineOutput<FacebookPayload>) {
    for line in meta_lines(output) {
        println!("{line}");
    }
}

pub fn print_tiktok(output: &PipelineOutput<TikTokPayload>) {
    for line in tiktok_lines(output) {
        println!("{line}");
    }
}

fn file_lines(files: &WrittenFiles) -> Vec<String> {
    let mut lines = vec!["files written:".to_string()];
    lines.extend(
        files
            .paths()
            .iter()
            .map(|path| format!("  {}", path.display())),
    );
    lines
}

pub(crate) fn meta_lines(output: &PipelineOutput<FacebookPayload>) -> Vec<String> {
    let payload = &output.report.payload;
    let mut lines = file_lines(&output.files);

    lines.push(format!(
        "{}: {} pages, {} posts",
        output.report.client,
        payload.pages.len(),
        output.report.metadata.posts_fetched.unwrap_or_default()
    ));

    if !payload.aggregated_topics.is_empty() {
        lines.push("top topics:".to_string());
        lines.extend(
            payload
                .aggregated_topics
                .iter()
                .take(TOP_N)
                .enumerate()
                .map(|(i, t)| format!("  {}. {} ({} mentions)", i + 1, t.topic, t.mentions)),
        );
    }
    lines
}

pub(crate) fn tiktok_lines(output: &PipelineOutput<TikTokPayload>) -> Vec<String> {
    let trends = &output.report.payload.trends;
    let mut lines = file_lines(&output.files);

    lines.push(format!(
        "{}: {} hashtags, {} sounds, {} creators",
        output.report.client,
        trends.hashtags.len(),
        trends.sounds.len(),
        trends.creators.len()
    ));

    if !trends.hashtags.is_empty() {
        lines.push("top hashtags:".to_string());
        lines.extend(
            trends
                .hashtags
                .iter()
                .take(TOP_N)
                .enumerate()
                .map(|(i, h)| format!("  {}. {} ({} views)", i + 1, h.hashtag, h.views)),
        );
    }
    lines
}

#[cfg(test)]
#[path = "summary_test.rs"]
mod tests;
