#![forbid(unsafe_code)]

use crate::archive;
use inquire::{InquireError, Select, Text};
use std::path::PathBuf;

fn prompt_err(e: InquireError) -> archive::ArchiveError {
    archive::ArchiveError::Io(std::io::Error::new(std::io::ErrorKind::Other, e))
}

fn split_inputs(s: &str) -> Vec<PathBuf> {
    s.split(',')
        .map(|x| x.trim())
        .filter(|x| !x.is_empty())
        .map(PathBuf::from)
        .collect()
}

pub fn run() -> archive::ArchiveResult<()> {
    println!("markpak shell\n");

    loop {
        let mode = Select::new("Mode", vec!["pack", "list", "unpack", "exit"])
            .prompt()
            .map_err(prompt_err)?;

        let res = match mode {
            "pack" => run_pack(),
            "list" => run_list(),
            "unpack" => run_unpack(),
            _ => {
                println!("bye");
                return Ok(());
            }
        };

        // Operation failures are reported and the shell keeps going.
        if let Err(e) = res {
            eprintln!("error: {e}");
        }
    }
}

fn run_pack() -> archive::ArchiveResult<()> {
    let inputs_raw = Text::new("Paths to pack (comma-separated)")
        .prompt()
        .map_err(prompt_err)?;
    let inputs = split_inputs(&inputs_raw);

    let output = Text::new("Output archive file")
        .with_default("./out.bin")
        .prompt()
        .map(PathBuf::from)
        .map_err(prompt_err)?;

    let count = archive::pack(&inputs, &output)?;
    println!("packed {count} entries into {}", output.display());
    Ok(())
}

fn run_list() -> archive::ArchiveResult<()> {
    let archive_path = Text::new("Archive file to list")
        .prompt()
        .map(PathBuf::from)
        .map_err(prompt_err)?;

    archive::list(&archive_path)
}

fn run_unpack() -> archive::ArchiveResult<()> {
    let archive_path = Text::new("Archive file to unpack")
        .prompt()
        .map(PathBuf::from)
        .map_err(prompt_err)?;

    let dest = Text::new("Destination directory")
        .with_default(".")
        .prompt()
        .map(PathBuf::from)
        .map_err(prompt_err)?;

    let count = archive::unpack(&archive_path, &dest)?;
    println!("unpacked {count} entries into {}", dest.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_inputs_trims_and_drops_empties() {
        let got = split_inputs(" a.txt , d/ ,, ");
        assert_eq!(got, vec![PathBuf::from("a.txt"), PathBuf::from("d/")]);
    }
}
