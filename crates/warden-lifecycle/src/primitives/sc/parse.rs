//! Text scraping for `sc.exe` output.

/// Extracts the platform code from a `[SC] <Call> FAILED <code>:` line.
pub(super) fn failure_code(text: &str) -> Option<i32> {
    text.split_whitespace()
        .skip_while(|token| *token != "FAILED")
        .nth(1)
        .and_then(|code| code.trim_end_matches(':').parse().ok())
}

/// Extracts the numeric state from the `STATE : <n>  <NAME>` line of a query.
pub(super) fn state_code(text: &str) -> Option<u32> {
    text.lines()
        .map(str::trim)
        .filter(|line| line.starts_with("STATE"))
        .find_map(|line| {
            let (_, value) = line.split_once(':')?;
            value.split_whitespace().next()?.parse().ok()
        })
}

/// First non-empty trimmed line, used as a fallback failure message.
pub(super) fn first_meaningful_line(text: &str) -> Option<&str> {
    text.lines().map(str::trim).find(|line| !line.is_empty())
}
