#![forbid(unsafe_code)]

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::archive::error::{ArchiveError, ArchiveResult};

/// Ordered source-path → archive-path mapping. Insertion order is
/// archive order. Re-inserting an existing source overwrites its archive
/// path in place, keeping the original position.
#[derive(Debug, Default)]
pub(crate) struct PathMapping {
    entries: Vec<(PathBuf, String)>,
}

impl PathMapping {
    pub fn insert(&mut self, source: PathBuf, archive_path: String) {
        if let Some(slot) = self.entries.iter_mut().find(|(p, _)| *p == source) {
            slot.1 = archive_path;
        } else {
            self.entries.push((source, archive_path));
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.entries.iter().map(|(p, a)| (p.as_path(), a.as_str()))
    }
}

#[derive(Debug, Default)]
pub(crate) struct Collected {
    pub files: PathMapping,
    /// Inputs that named neither a file nor a directory.
    pub missing: Vec<PathBuf>,
}

/// Expand the input paths into the archive mapping.
///
/// A file input is stored under its base filename. A directory input is
/// walked recursively; each file beneath it is stored relative to the
/// directory's parent, so the directory's own name stays the first
/// archive path segment. Walk order is filesystem order, not sorted.
pub(crate) fn collect(inputs: &[PathBuf]) -> ArchiveResult<Collected> {
    let mut out = Collected::default();

    for input in inputs {
        if input.is_file() {
            match input.file_name() {
                Some(name) => {
                    let name = name.to_string_lossy().into_owned();
                    out.files.insert(input.clone(), name);
                }
                None => out.missing.push(input.clone()),
            }
        } else if input.is_dir() {
            let root = fs::canonicalize(input)?;
            let base = root.parent().unwrap_or(&root).to_path_buf();

            for ent in WalkDir::new(&root).follow_links(false).into_iter() {
                let ent = ent.map_err(|e| {
                    let msg = e.to_string();
                    let io = e
                        .into_io_error()
                        .unwrap_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, msg));
                    ArchiveError::Io(io)
                })?;

                if !ent.file_type().is_file() {
                    continue;
                }

                let rel = archive_rel_path(&base, ent.path())?;
                out.files.insert(ent.path().to_path_buf(), rel);
            }
        } else {
            out.missing.push(input.clone());
        }
    }

    Ok(out)
}

/// Path relative to `base`, joined with forward slashes.
fn archive_rel_path(base: &Path, file_path: &Path) -> ArchiveResult<String> {
    let rel = file_path
        .strip_prefix(base)
        .map_err(|_| ArchiveError::Outside(file_path.to_string_lossy().into_owned()))?;

    let mut out = String::new();
    for (i, comp) in rel.components().enumerate() {
        if i != 0 {
            out.push('/');
        }
        out.push_str(&comp.as_os_str().to_string_lossy());
    }

    if out.is_empty() {
        return Err(ArchiveError::Invalid("empty relative path".into()));
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    fn touch(path: &Path, content: &[u8]) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        File::create(path).unwrap().write_all(content).unwrap();
    }

    #[test]
    fn file_input_maps_to_basename() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("notes.txt");
        touch(&file, b"hi");

        let got = collect(&[file.clone()]).unwrap();
        let mapped: Vec<_> = got.files.iter().collect();
        assert_eq!(mapped, vec![(file.as_path(), "notes.txt")]);
        assert!(got.missing.is_empty());
    }

    #[test]
    fn dir_input_keeps_top_level_dir_name() {
        let dir = tempfile::tempdir().unwrap();
        let d = dir.path().join("d");
        touch(&d.join("a.txt"), b"a");
        touch(&d.join("sub").join("b.txt"), b"b");

        let got = collect(&[d]).unwrap();
        let mut paths: Vec<String> = got.files.iter().map(|(_, a)| a.to_string()).collect();
        paths.sort();
        assert_eq!(paths, vec!["d/a.txt", "d/sub/b.txt"]);
    }

    #[test]
    fn missing_input_is_reported_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("ok.txt");
        touch(&file, b"ok");
        let ghost = dir.path().join("nope");

        let got = collect(&[ghost.clone(), file]).unwrap();
        assert_eq!(got.files.iter().count(), 1);
        assert_eq!(got.missing, vec![ghost]);
    }

    #[test]
    fn duplicate_source_keeps_first_position_last_value() {
        let mut m = PathMapping::default();
        m.insert(PathBuf::from("/a"), "one".into());
        m.insert(PathBuf::from("/b"), "two".into());
        m.insert(PathBuf::from("/a"), "three".into());

        let got: Vec<_> = m.iter().map(|(_, a)| a.to_string()).collect();
        assert_eq!(got, vec!["three", "two"]);
    }
}
