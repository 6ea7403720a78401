//! Full report pipeline.
//!
//! Runs the three queries in order and returns an [`AnalysisReport`] ready to
//! be printed.

use analytics_core::formatting::{
    format_hour_count, format_most_active, format_top_hashtags, format_total,
};
use analytics_core::time_utils::HourWindow;
use analytics_core::Result;
use tracing::info;

use crate::analyzer::{AuthorActivity, HourlyCount, PostAnalyzer};
use crate::store::PostStore;

// ── Public types ──────────────────────────────────────────────────────────────

/// Everything the report prints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisReport {
    pub activity: AuthorActivity,
    pub top_hashtags: Vec<String>,
    pub hourly: Vec<HourlyCount>,
}

impl AnalysisReport {
    /// Console lines in print order: total, most active author, hashtags,
    /// then one line per hour window.
    pub fn render(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(3 + self.hourly.len());
        lines.push(format_total(self.activity.total_posts));
        lines.push(format_most_active(
            self.activity
                .most_active
                .as_ref()
                .map(|a| a.author_name.as_str()),
        ));
        lines.push(format_top_hashtags(&self.top_hashtags));
        for hour in &self.hourly {
            lines.push(format_hour_count(
                hour.count,
                hour.window.hour,
                &hour.window.day_label(),
            ));
        }
        lines
    }
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run every report query against `store`.
pub async fn analyze_posts<S: PostStore>(
    store: &S,
    hashtag_limit: usize,
    windows: &[HourWindow],
) -> Result<AnalysisReport> {
    let started = std::time::Instant::now();
    let analyzer = PostAnalyzer::new(store);

    let activity = analyzer.most_active_author().await?;
    let top_hashtags = analyzer.top_hashtags(hashtag_limit).await?;
    let hourly = analyzer.hourly_volume(windows).await?;

    info!(
        "Analysed {} posts in {:.3}s",
        activity.total_posts,
        started.elapsed().as_secs_f64()
    );

    Ok(AnalysisReport {
        activity,
        top_hashtags,
        hourly,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
