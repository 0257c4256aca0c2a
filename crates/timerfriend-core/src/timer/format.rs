/// Render milliseconds as `M:SS`. Minutes are not capped at 59 and carry no
/// leading zero; seconds are always two digits.
pub fn format_minutes_seconds(ms: u64) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms / 1000) % 60;
    format!("{minutes}:{seconds:02}")
}
