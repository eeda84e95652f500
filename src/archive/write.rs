#![forbid(unsafe_code)]

use std::fs;
use std::io::{self, Write};

use crate::archive::collect::PathMapping;
use crate::archive::error::ArchiveResult;
use crate::archive::format::{CONTENT_MARKER, COUNT_MARKER, END_MARKER, LOCATION_MARKER};

/// Write one frame per mapping entry, in mapping order. A source that
/// cannot be read (vanished since collection, permissions) is reported
/// and skipped; errors on the output stream are fatal. Returns the
/// number of entries written.
pub(crate) fn write_archive<W: Write>(out: &mut W, files: &PathMapping) -> ArchiveResult<usize> {
    let mut written = 0usize;

    for (source, archive_path) in files.iter() {
        let content = match fs::read(source) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("skipping {}: {e}", source.display());
                continue;
            }
        };

        write_frame(out, archive_path, &content)?;
        written += 1;
    }

    out.flush()?;
    Ok(written)
}

/// Content goes out verbatim, never escaped or inspected. The reader
/// relies solely on the count line to find the frame end.
pub(crate) fn write_frame<W: Write>(out: &mut W, path: &str, content: &[u8]) -> io::Result<()> {
    write!(
        out,
        "\n{LOCATION_MARKER}\n{path}\n{COUNT_MARKER}\n{}\n{CONTENT_MARKER}\n",
        content.len()
    )?;
    out.write_all(content)?;
    write!(out, "\n{END_MARKER}\n")?;
    Ok(())
}
