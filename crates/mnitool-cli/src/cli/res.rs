use std::{io::Write as _, path::PathBuf};

use clap::{Parser, Subcommand};
use mnidev::{resources::file::loose::file_in_dir, utils::debug::hex_dump};

use super::open_game;

/// Lists the files in the game's archive.
#[derive(Parser)]
struct ListFiles {
    /// Path to the game's root directory.
    #[clap(index = 1)]
    game_dir: PathBuf,
}

impl ListFiles {
    fn run(&self) -> anyhow::Result<()> {
        let loader = open_game(&self.game_dir)?;
        for (name, size) in loader.archive().entries() {
            println!("{name:<12} {size:>8}");
        }
        Ok(())
    }
}

/// Dumps the hexadecimal content of a file.
#[derive(Parser)]
struct DumpFile {
    /// Path to the game's root directory.
    #[clap(index = 1)]
    game_dir: PathBuf,
    /// The name of the file, e.g. DROP1.MNI.
    #[clap(index = 2)]
    name: String,
}

impl DumpFile {
    fn run(&self) -> anyhow::Result<()> {
        let loader = open_game(&self.game_dir)?;
        let data = loader.file(&self.name)?;
        print!("{}", hex_dump(&data, 0));
        Ok(())
    }
}

/// Extracts a file from the archive into a loose file.
#[derive(Parser)]
struct ExtractFile {
    /// Path to the game's root directory.
    #[clap(index = 1)]
    game_dir: PathBuf,
    /// The name of the file to extract.
    #[clap(index = 2)]
    name: String,
    /// If set, prints what would be done without actually writing files.
    #[clap(short = 'n', long, default_value = "false")]
    dry_run: bool,
    /// Directory to save the output file. Defaults to <game_dir>.
    #[clap(short = 'o', long)]
    output_dir: Option<PathBuf>,
}

impl ExtractFile {
    fn run(&self) -> anyhow::Result<()> {
        let loader = open_game(&self.game_dir)?;
        let data = loader.archive().file(&self.name)?;
        let out_root = self.output_dir.as_ref().unwrap_or(&self.game_dir);
        let filename = file_in_dir(out_root, &self.name)
            .ok_or_else(|| anyhow::anyhow!("{:?} is not a plain file name", self.name))?;
        if self.dry_run {
            eprintln!(
                "DRY_RUN: Writing {} ({} bytes) to {}",
                self.name,
                data.len(),
                filename.display()
            );
            return Ok(());
        }
        eprintln!(
            "Writing {} ({} bytes) to {}",
            self.name,
            data.len(),
            filename.display()
        );
        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&filename)?;
        file.write_all(&data)?;
        Ok(())
    }
}

#[derive(Subcommand)]
enum ResourceCommand {
    #[clap(name = "list", about = "Lists the files in the game's archive.")]
    List(ListFiles),
    #[clap(name = "dump", about = "Dumps the hexadecimal content of a file.")]
    Dump(DumpFile),
    #[clap(name = "extract", about = "Extracts a file from the archive.")]
    Extract(ExtractFile),
}

/// Commands for working with archive files.
#[derive(Parser)]
pub(super) struct Resource {
    #[clap(subcommand)]
    res_cmd: ResourceCommand,
}

impl Resource {
    pub(super) fn run(&self) -> anyhow::Result<()> {
        match &self.res_cmd {
            ResourceCommand::List(list) => list.run(),
            ResourceCommand::Dump(dump) => dump.run(),
            ResourceCommand::Extract(extract) => extract.run(),
        }
    }
}
