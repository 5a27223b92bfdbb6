/// The SSE field prefix each logical event is framed with.
pub const DATA_MARKER: &str = "data:";

/// Splits a merged pass buffer into candidate event bodies.
///
/// Mirrors the server's framing: every event is prefixed with `data:` and
/// events are separated by blank lines, so splitting on the marker and
/// trimming is enough. Order is preserved; pieces that trim to nothing
/// (the text before the first marker, blank separators) are dropped.
pub fn split_segments(buffer: &str) -> Vec<&str> {
    buffer
        .trim()
        .split(DATA_MARKER)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect()
}
