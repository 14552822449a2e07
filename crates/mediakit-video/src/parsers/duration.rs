use regex::Regex;

/// Renders an ISO-8601 `PT#H#M#S` duration as `H:MM:SS`, or `M:SS` when
/// there are no hours. Missing components count as zero.
pub fn format_duration(iso: &str) -> Option<String> {
    let regex = Regex::new(r"PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?").ok()?;
    let captures = regex.captures(iso)?;
    let component = |index: usize| {
        captures
            .get(index)
            .and_then(|m| m.as_str().parse::<u64>().ok())
            .unwrap_or(0)
    };

    let (hours, minutes, seconds) = (component(1), component(2), component(3));
    if hours > 0 {
        Some(format!("{hours}:{minutes:02}:{seconds:02}"))
    } else {
        Some(format!("{minutes}:{seconds:02}"))
    }
}
