#![forbid(unsafe_code)]

mod archive;
mod ui;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "markpak", version, about = "Marker-framed file packer")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interactive shell (pack/list/unpack prompts).
    Ui,

    /// Pack files and directory trees into one archive.
    Pack {
        /// Input file or directory (repeatable).
        #[arg(long)]
        input: Vec<PathBuf>,
        /// Output archive file.
        #[arg(long)]
        output: PathBuf,
    },

    /// List the paths stored in an archive.
    List {
        #[arg(long)]
        archive: PathBuf,
    },

    /// Extract an archive into a directory.
    Unpack {
        #[arg(long)]
        archive: PathBuf,
        /// Destination root.
        #[arg(long)]
        dest: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let res = match cli.cmd {
        Command::Ui => ui::run(),
        Command::Pack { input, output } => archive::pack(&input, &output).map(|count| {
            println!("packed {count} entries into {}", output.display());
        }),
        Command::List { archive } => archive::list(&archive),
        Command::Unpack { archive, dest } => archive::unpack(&archive, &dest).map(|count| {
            println!("unpacked {count} entries into {}", dest.display());
        }),
    };

    if let Err(e) = res {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
