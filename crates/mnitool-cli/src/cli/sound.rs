use std::path::PathBuf;

use clap::{Parser, Subcommand};
use itertools::Itertools;
use mnidev::{
    ids::SoundId,
    resources::{
        loader::resolution::{SoundSource, sound_sources},
        types::audio::SoundData,
    },
};

use super::open_game;

fn describe_source(source: &SoundSource) -> String {
    match source {
        SoundSource::DedicatedFile(name) => (*name).to_owned(),
        SoundSource::DigitizedFile(name) => format!("{name}?"),
        SoundSource::Synthesized(_) => "adlib".to_owned(),
    }
}

/// Lists every sound id with the places it can be loaded from.
#[derive(Parser)]
struct ListSounds {}

impl ListSounds {
    #[expect(clippy::unused_self)]
    fn run(&self) -> anyhow::Result<()> {
        for &id in SoundId::ALL {
            let sources = sound_sources(id).iter().map(describe_source).join(", ");
            println!("{:>2} {:<28} {sources}", id.number(), id.name());
        }
        Ok(())
    }
}

/// Shows which version of a sound the game would play.
#[derive(Parser)]
struct SoundInfo {
    /// Path to the game's root directory.
    #[clap(index = 1)]
    game_dir: PathBuf,
    /// The sound, as a number or a name like `duke-jumping`.
    #[clap(index = 2)]
    sound: SoundId,
}

impl SoundInfo {
    fn run(&self) -> anyhow::Result<()> {
        let loader = open_game(&self.game_dir)?;
        match loader.load_sound(self.sound)? {
            SoundData::Digitized(buffer) => println!(
                "{}: digitized, {} Hz, {} samples, {:.2}s",
                self.sound,
                buffer.sample_rate(),
                buffer.samples().len(),
                buffer.duration().as_secs_f64()
            ),
            SoundData::Synthesized(sound) => println!(
                "{}: adlib, priority {}, octave {}, {} notes",
                self.sound,
                sound.priority(),
                sound.octave(),
                sound.notes().len()
            ),
        }
        Ok(())
    }
}

/// Prints the OPL register writes of a synthesized sound.
#[derive(Parser)]
struct SoundCommands {
    /// Path to the game's root directory.
    #[clap(index = 1)]
    game_dir: PathBuf,
    /// The sound, as a number or a name like `duke-jumping`.
    #[clap(index = 2)]
    sound: SoundId,
}

impl SoundCommands {
    fn run(&self) -> anyhow::Result<()> {
        let loader = open_game(&self.game_dir)?;
        let sound = loader.load_audio_package()?.load_adlib_sound(self.sound)?;
        for command in sound.register_commands() {
            println!(
                "{:>5} {:02X} {:02X}",
                command.tick, command.register, command.value
            );
        }
        Ok(())
    }
}

/// Summarizes an IMF song.
#[derive(Parser)]
struct MusicInfo {
    /// Path to the game's root directory.
    #[clap(index = 1)]
    game_dir: PathBuf,
    /// The song's file name, e.g. CALM.IMF.
    #[clap(index = 2)]
    name: String,
    /// Also print every register write.
    #[clap(long, default_value = "false")]
    commands: bool,
}

impl MusicInfo {
    fn run(&self) -> anyhow::Result<()> {
        let loader = open_game(&self.game_dir)?;
        let song = loader.load_music(&self.name)?;
        println!(
            "{}: {} commands, {:.2}s",
            self.name,
            song.commands().len(),
            song.duration().as_secs_f64()
        );
        if self.commands {
            for command in song.commands() {
                println!(
                    "{:02X} {:02X} {:>5}",
                    command.register, command.value, command.delay
                );
            }
        }
        Ok(())
    }
}

#[derive(Subcommand)]
enum SoundCommand {
    #[clap(name = "list", about = "Lists every sound id and where it is loaded from.")]
    List(ListSounds),
    #[clap(name = "info", about = "Shows which version of a sound the game would play.")]
    Info(SoundInfo),
    #[clap(name = "commands", about = "Prints the OPL register writes of an AdLib sound.")]
    Commands(SoundCommands),
    #[clap(name = "music", about = "Summarizes an IMF song.")]
    Music(MusicInfo),
}

/// Commands for inspecting sound effects and music.
#[derive(Parser)]
pub(super) struct Sound {
    #[clap(subcommand)]
    sound_cmd: SoundCommand,
}

impl Sound {
    pub(super) fn run(&self) -> anyhow::Result<()> {
        match &self.sound_cmd {
            SoundCommand::List(cmd) => cmd.run(),
            SoundCommand::Info(cmd) => cmd.run(),
            SoundCommand::Commands(cmd) => cmd.run(),
            SoundCommand::Music(cmd) => cmd.run(),
        }
    }
}
