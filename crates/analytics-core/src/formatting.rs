//! Console wording for the analysis report.

/// Line reporting how many posts the collection holds.
///
/// ```
/// use analytics_core::formatting::format_total;
///
/// assert_eq!(format_total(8), "8 posts stored in the collection");
/// ```
pub fn format_total(total: u64) -> String {
    format!("{} posts stored in the collection", total)
}

/// Line naming the most active author, or noting that there is none.
pub fn format_most_active(author_name: Option<&str>) -> String {
    match author_name {
        Some(name) => format!("{} posted the most during the conference", name),
        None => "No posts stored, so there is no most active author".to_string(),
    }
}

/// Line listing the most used hashtags, most used first.
///
/// The header counts the hashtags actually listed, which may be fewer than
/// were asked for.
///
/// ```
/// use analytics_core::formatting::format_top_hashtags;
///
/// let tags = vec!["conf".to_string(), "tech".to_string()];
/// assert_eq!(format_top_hashtags(&tags), "The top 2 hashtags were: conf, tech");
/// ```
pub fn format_top_hashtags(hashtags: &[String]) -> String {
    if hashtags.is_empty() {
        return "No hashtags were used".to_string();
    }
    format!("The top {} hashtags were: {}", hashtags.len(), hashtags.join(", "))
}

/// Line reporting the volume of one local clock hour.
pub fn format_hour_count(count: u64, hour: u32, day: &str) -> String {
    format!("{} posts in the {} o'clock hour on {}", count, hour, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_most_active_named() {
        assert_eq!(
            format_most_active(Some("alice")),
            "alice posted the most during the conference"
        );
    }

    #[test]
    fn test_format_most_active_none() {
        assert!(format_most_active(None).starts_with("No posts stored"));
    }

    #[test]
    fn test_format_top_hashtags_empty() {
        assert_eq!(format_top_hashtags(&[]), "No hashtags were used");
    }

    #[test]
    fn test_format_hour_count_uses_local_label() {
        assert_eq!(
            format_hour_count(12, 9, "2015-02-14"),
            "12 posts in the 9 o'clock hour on 2015-02-14"
        );
    }
}
