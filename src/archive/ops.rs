#![forbid(unsafe_code)]

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use crate::archive::collect::collect;
use crate::archive::error::{ArchiveError, ArchiveResult};
use crate::archive::read::FrameReader;
use crate::archive::write::write_archive;

/// Pack the input files and directory trees into `output`.
///
/// Inputs that exist as neither file nor directory are reported and
/// skipped; the archive is still written for the rest. Returns the
/// number of entries written.
pub fn pack(inputs: &[PathBuf], output: &Path) -> ArchiveResult<usize> {
    let collected = collect(inputs)?;
    for miss in &collected.missing {
        eprintln!("path not found: {}", miss.display());
    }

    let mut out = BufWriter::new(File::create(output)?);
    write_archive(&mut out, &collected.files)
}

/// Archive paths in stored order, without touching the payloads.
pub fn entries(archive: &Path) -> ArchiveResult<Vec<String>> {
    let mut reader = open_archive(archive)?;
    let mut out = Vec::new();
    while let Some(frame) = reader.next_frame(false)? {
        out.push(frame.path);
    }
    Ok(out)
}

/// Print the stored archive paths, one per line.
pub fn list(archive: &Path) -> ArchiveResult<()> {
    for path in entries(archive)? {
        println!("{path}");
    }
    Ok(())
}

/// Restore every entry under `dest`, creating intermediate directories.
/// Returns the number of entries written. A framing error aborts the
/// run; entries already restored stay on disk.
pub fn unpack(archive: &Path, dest: &Path) -> ArchiveResult<usize> {
    let mut reader = open_archive(archive)?;
    fs::create_dir_all(dest)?;

    let mut written = 0usize;
    while let Some(frame) = reader.next_frame(true)? {
        let out_path = dest.join(frame.path.replace('/', &std::path::MAIN_SEPARATOR.to_string()));
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&out_path, frame.content.unwrap_or_default())?;
        written += 1;
    }

    Ok(written)
}

fn open_archive(archive: &Path) -> ArchiveResult<FrameReader<BufReader<File>>> {
    if !archive.is_file() {
        return Err(ArchiveError::NotFound(
            archive.to_string_lossy().into_owned(),
        ));
    }
    Ok(FrameReader::new(BufReader::new(File::open(archive)?)))
}
