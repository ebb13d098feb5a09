use std::{fs::File, io::BufWriter, path::Path};

use clap::{Parser, Subcommand};
use mnidev::resources::{loader::ResourceLoader, types::image::Image};

mod export;
mod res;
mod script;
mod sound;

fn open_game(game_dir: &Path) -> anyhow::Result<ResourceLoader> {
    Ok(ResourceLoader::new(game_dir)?)
}

fn write_png(image: &Image, path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)?;
    image.write_png(BufWriter::new(file))?;
    eprintln!(
        "Wrote {}x{} image to {}",
        image.width(),
        image.height(),
        path.display()
    );
    Ok(())
}

/// The category of command to run.
#[derive(Subcommand)]
enum Category {
    #[clap(name = "res", about = "Commands for working with archive files.")]
    Resource(res::Resource),
    #[clap(name = "export", about = "Commands for converting assets to PNG and WAV.")]
    Export(export::Export),
    #[clap(name = "sound", about = "Commands for inspecting sound effects and music.")]
    Sound(sound::Sound),
    #[clap(name = "script", about = "Commands for working with script bundles.")]
    Script(script::Script),
}

impl Category {
    fn run(&self) -> anyhow::Result<()> {
        match self {
            Category::Resource(res) => res.run(),
            Category::Export(export) => export.run(),
            Category::Sound(sound) => sound.run(),
            Category::Script(script) => script.run(),
        }
    }
}

/// A command line tool for working with the data files of Duke Nukem II.
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
pub(crate) struct Cli {
    /// Increases log output. Can be repeated.
    #[clap(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// The category of command to run.
    #[clap(subcommand)]
    category: Category,
}

impl Cli {
    pub(crate) fn init_logging(&self) {
        let level = match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };
        env_logger::Builder::new()
            .filter_level(level)
            .parse_default_env()
            .init();
    }

    pub(crate) fn run(&self) -> anyhow::Result<()> {
        self.category.run()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn verbosity_is_counted() {
        let cli = Cli::try_parse_from(["mnitool", "-vv", "res", "list", "game"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
