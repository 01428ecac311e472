/// Format an elapsed recording duration for display.
///
/// Floors to whole seconds and renders `minutes:seconds` with two-digit
/// seconds and no leading zero on minutes (`0:00`, `1:05`, `12:30`).
pub fn format_recording_duration(ms: u64) -> String {
    let total_secs = ms / 1000;
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    format!("{}:{:02}", minutes, seconds)
}
