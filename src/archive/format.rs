#![forbid(unsafe_code)]

/// Frame layout, repeated per entry:
/// - `\n-------File Location-------\n`
/// - archive path, UTF-8, one line
/// - `-------Character Count-------\n`
/// - content length in bytes, decimal ASCII, one line
/// - `-------File Content-------\n`
/// - exactly that many raw bytes, no delimiter of their own
/// - `\n-------End of File-------\n`
///
/// Markers match as exact whole trimmed lines. Content is written
/// verbatim and never escaped; the reader skips it by length, so marker
/// text appearing inside content cannot break framing.
pub const LOCATION_MARKER: &str = "-------File Location-------";
pub const COUNT_MARKER: &str = "-------Character Count-------";
pub const CONTENT_MARKER: &str = "-------File Content-------";
pub const END_MARKER: &str = "-------End of File-------";

/// One decoded frame. `content` is `None` when the reader was asked to
/// skip payloads (list mode).
#[derive(Debug, Clone)]
pub(crate) struct Frame {
    pub path: String,
    pub content: Option<Vec<u8>>,
}
