#![forbid(unsafe_code)]

use std::io::{BufRead, Read, Seek};

use crate::archive::error::{ArchiveError, ArchiveResult};
use crate::archive::format::{Frame, CONTENT_MARKER, COUNT_MARKER, END_MARKER, LOCATION_MARKER};

/// Decoder for a stream of frames.
///
/// Each frame is parsed by an explicit state machine keyed on the marker
/// lines, so a marker arriving out of order is rejected instead of
/// silently resynchronized. Content is never scanned for markers: once
/// the count is known the reader consumes exactly that many bytes,
/// either into memory or with a forward seek.
pub(crate) struct FrameReader<R> {
    inner: R,
}

enum State {
    Idle,
    HaveLocation { path: String },
    HaveCount { path: String, len: u64 },
    HaveContent { path: String, content: Option<Vec<u8>> },
}

impl<R: BufRead + Seek> FrameReader<R> {
    pub fn new(inner: R) -> Self {
        FrameReader { inner }
    }

    /// Decode the next frame, or `None` at a clean end of stream.
    ///
    /// With `read_content` false the payload is seeked over and the
    /// frame comes back with `content: None` (list mode).
    pub fn next_frame(&mut self, read_content: bool) -> ArchiveResult<Option<Frame>> {
        let mut state = State::Idle;
        let mut line = Vec::new();

        loop {
            line.clear();
            let n = self.inner.read_until(b'\n', &mut line)?;
            if n == 0 {
                return match state {
                    State::Idle => Ok(None),
                    _ => Err(ArchiveError::Invalid("archive ends mid-entry".into())),
                };
            }

            let trimmed = line.trim_ascii();
            if trimmed.is_empty() {
                // The frame separators the format itself produces.
                continue;
            }

            state = match (state, trimmed) {
                (State::Idle, t) if t == LOCATION_MARKER.as_bytes() => {
                    let path = self.metadata_line()?;
                    if path.is_empty() {
                        return Err(ArchiveError::Invalid("empty archive path".into()));
                    }
                    if path.starts_with('/') {
                        return Err(ArchiveError::Invalid(format!(
                            "absolute archive path: {path}"
                        )));
                    }
                    State::HaveLocation { path }
                }

                (State::HaveLocation { path }, t) if t == COUNT_MARKER.as_bytes() => {
                    let raw = self.metadata_line()?;
                    let len: u64 = raw.parse().map_err(|_| {
                        ArchiveError::Invalid(format!("character count is not a number: {raw}"))
                    })?;
                    State::HaveCount { path, len }
                }

                (State::HaveCount { path, len }, t) if t == CONTENT_MARKER.as_bytes() => {
                    let content = if read_content {
                        Some(self.read_content(len)?)
                    } else {
                        self.skip_content(len)?;
                        None
                    };
                    State::HaveContent { path, content }
                }

                (State::HaveContent { path, content }, t) if t == END_MARKER.as_bytes() => {
                    return Ok(Some(Frame { path, content }));
                }

                (_, t) => {
                    return Err(ArchiveError::Invalid(format!(
                        "unexpected line: {}",
                        String::from_utf8_lossy(t)
                    )));
                }
            };
        }
    }

    /// The single line following a location or count marker.
    fn metadata_line(&mut self) -> ArchiveResult<String> {
        let mut line = Vec::new();
        let n = self.inner.read_until(b'\n', &mut line)?;
        if n == 0 {
            return Err(ArchiveError::Invalid("archive ends mid-entry".into()));
        }
        String::from_utf8(line.trim_ascii().to_vec())
            .map_err(|_| ArchiveError::Invalid("metadata line is not utf-8".into()))
    }

    fn read_content(&mut self, len: u64) -> ArchiveResult<Vec<u8>> {
        let len = usize::try_from(len)
            .map_err(|_| ArchiveError::Invalid(format!("character count too large: {len}")))?;
        let mut buf = vec![0u8; len];
        self.inner.read_exact(&mut buf).map_err(|e| {
            if e.kind() == std::io::ErrorKind::UnexpectedEof {
                ArchiveError::Invalid("content truncated".into())
            } else {
                ArchiveError::Io(e)
            }
        })?;
        Ok(buf)
    }

    fn skip_content(&mut self, len: u64) -> ArchiveResult<()> {
        let len = i64::try_from(len)
            .map_err(|_| ArchiveError::Invalid(format!("character count too large: {len}")))?;
        self.inner.seek_relative(len)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::write::write_frame;
    use std::io::Cursor;

    fn reader(bytes: Vec<u8>) -> FrameReader<Cursor<Vec<u8>>> {
        FrameReader::new(Cursor::new(bytes))
    }

    fn framed(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut buf = Vec::new();
        for (path, content) in entries {
            write_frame(&mut buf, path, content).unwrap();
        }
        buf
    }

    #[test]
    fn empty_stream_is_a_clean_end() {
        let mut r = reader(Vec::new());
        assert!(r.next_frame(true).unwrap().is_none());
    }

    #[test]
    fn reads_frames_in_order() {
        let mut r = reader(framed(&[("a.txt", b"AA"), ("d/b.txt", b"")]));

        let first = r.next_frame(true).unwrap().unwrap();
        assert_eq!(first.path, "a.txt");
        assert_eq!(first.content.as_deref(), Some(&b"AA"[..]));

        let second = r.next_frame(true).unwrap().unwrap();
        assert_eq!(second.path, "d/b.txt");
        assert_eq!(second.content.as_deref(), Some(&b""[..]));

        assert!(r.next_frame(true).unwrap().is_none());
    }

    #[test]
    fn list_mode_skips_content() {
        let mut r = reader(framed(&[("a", b"0123456789"), ("b", b"xyz")]));
        let a = r.next_frame(false).unwrap().unwrap();
        assert_eq!((a.path.as_str(), a.content), ("a", None));
        let b = r.next_frame(false).unwrap().unwrap();
        assert_eq!(b.path, "b");
        assert!(r.next_frame(false).unwrap().is_none());
    }

    #[test]
    fn marker_text_inside_content_does_not_break_framing() {
        let tricky = b"before\n-------End of File-------\nafter";
        let mut r = reader(framed(&[("tricky.bin", tricky), ("next", b"ok")]));

        let first = r.next_frame(true).unwrap().unwrap();
        assert_eq!(first.content.as_deref(), Some(&tricky[..]));
        let second = r.next_frame(true).unwrap().unwrap();
        assert_eq!(second.path, "next");
    }

    #[test]
    fn marker_text_inside_content_does_not_break_listing() {
        let tricky = b"\n-------File Location-------\nfake.txt\n";
        let mut r = reader(framed(&[("real.bin", tricky)]));

        let only = r.next_frame(false).unwrap().unwrap();
        assert_eq!(only.path, "real.bin");
        assert!(r.next_frame(false).unwrap().is_none());
    }

    #[test]
    fn truncated_content_is_a_framing_error() {
        let mut bytes = framed(&[("a", b"0123456789")]);
        // Drops the end marker and the last bytes of the content itself.
        bytes.truncate(bytes.len() - 30);
        let mut r = reader(bytes);
        assert!(matches!(r.next_frame(true), Err(ArchiveError::Invalid(_))));
    }

    #[test]
    fn truncated_tail_fails_in_list_mode_too() {
        let mut bytes = framed(&[("a", b"0123456789")]);
        bytes.truncate(bytes.len() - 5);
        let mut r = reader(bytes);
        assert!(matches!(r.next_frame(false), Err(ArchiveError::Invalid(_))));
    }

    #[test]
    fn out_of_order_marker_is_rejected() {
        let bytes = b"\n-------Character Count-------\n2\n".to_vec();
        let mut r = reader(bytes);
        assert!(matches!(r.next_frame(true), Err(ArchiveError::Invalid(_))));
    }

    #[test]
    fn non_numeric_count_is_rejected() {
        let bytes =
            b"\n-------File Location-------\na.txt\n-------Character Count-------\nlots\n".to_vec();
        let mut r = reader(bytes);
        assert!(matches!(r.next_frame(true), Err(ArchiveError::Invalid(_))));
    }

    #[test]
    fn absolute_archive_path_is_rejected() {
        let mut r = reader(framed(&[("/etc/passwd", b"x")]));
        assert!(matches!(r.next_frame(true), Err(ArchiveError::Invalid(_))));
    }

    #[test]
    fn eof_after_location_marker_is_mid_entry() {
        let bytes = b"\n-------File Location-------\na.txt\n".to_vec();
        let mut r = reader(bytes);
        assert!(matches!(r.next_frame(true), Err(ArchiveError::Invalid(_))));
    }
}
