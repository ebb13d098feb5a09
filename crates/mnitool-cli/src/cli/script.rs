use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::open_game;

/// Lists the scripts in a script bundle.
#[derive(Parser)]
struct ListScripts {
    /// Path to the game's root directory.
    #[clap(index = 1)]
    game_dir: PathBuf,
    /// The bundle's file name, e.g. TEXT.MNI.
    #[clap(index = 2)]
    bundle: String,
}

impl ListScripts {
    fn run(&self) -> anyhow::Result<()> {
        let loader = open_game(&self.game_dir)?;
        let bundle = loader.load_script_bundle(&self.bundle)?;
        for name in bundle.names() {
            let len = bundle.get(name).map_or(0, Vec::len);
            println!("{name:<24} {len:>4} commands");
        }
        Ok(())
    }
}

/// Prints the commands of a single script.
#[derive(Parser)]
struct ShowScript {
    /// Path to the game's root directory.
    #[clap(index = 1)]
    game_dir: PathBuf,
    /// The bundle's file name, e.g. TEXT.MNI.
    #[clap(index = 2)]
    bundle: String,
    /// The name of the script.
    #[clap(index = 3)]
    name: String,
}

impl ShowScript {
    fn run(&self) -> anyhow::Result<()> {
        let loader = open_game(&self.game_dir)?;
        let bundle = loader.load_script_bundle(&self.bundle)?;
        let script = bundle
            .get(&self.name)
            .ok_or_else(|| anyhow::anyhow!("Script not found: {}", self.name))?;
        for command in script {
            println!("{command}");
        }
        Ok(())
    }
}

#[derive(Subcommand)]
enum ScriptCommand {
    #[clap(name = "list", about = "Lists the scripts in a script bundle.")]
    List(ListScripts),
    #[clap(name = "show", about = "Prints the commands of a single script.")]
    Show(ShowScript),
}

/// Commands for working with script bundles.
#[derive(Parser)]
pub(super) struct Script {
    #[clap(subcommand)]
    script_cmd: ScriptCommand,
}

impl Script {
    pub(super) fn run(&self) -> anyhow::Result<()> {
        match &self.script_cmd {
            ScriptCommand::List(cmd) => cmd.run(),
            ScriptCommand::Show(cmd) => cmd.run(),
        }
    }
}
