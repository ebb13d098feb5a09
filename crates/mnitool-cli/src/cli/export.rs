use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use mnidev::{
    ids::{ActorId, SoundId},
    resources::{
        file::replacement::actor_frame_replacement_name,
        types::audio::{AudioBuffer, SoundData},
    },
};

use super::{open_game, write_png};

/// Exports a backdrop as a PNG image.
#[derive(Parser)]
struct ExportBackdrop {
    /// Path to the game's root directory.
    #[clap(index = 1)]
    game_dir: PathBuf,
    /// The backdrop's file name, e.g. DROP1.MNI.
    #[clap(index = 2)]
    name: String,
    /// The PNG file to write.
    #[clap(short = 'o', long)]
    output: PathBuf,
}

impl ExportBackdrop {
    fn run(&self) -> anyhow::Result<()> {
        let loader = open_game(&self.game_dir)?;
        write_png(&loader.load_backdrop(&self.name)?, &self.output)
    }
}

/// Exports the tiles of a tile set as a single PNG image.
#[derive(Parser)]
struct ExportTileSet {
    /// Path to the game's root directory.
    #[clap(index = 1)]
    game_dir: PathBuf,
    /// The tile set's file name, e.g. CZONE1.MNI.
    #[clap(index = 2)]
    name: String,
    /// The PNG file to write.
    #[clap(short = 'o', long)]
    output: PathBuf,
}

impl ExportTileSet {
    fn run(&self) -> anyhow::Result<()> {
        let loader = open_game(&self.game_dir)?;
        let tile_set = loader.load_tile_set(&self.name)?;
        write_png(tile_set.image(), &self.output)
    }
}

/// Exports a full-screen image as a PNG image.
#[derive(Parser)]
struct ExportFullscreen {
    /// Path to the game's root directory.
    #[clap(index = 1)]
    game_dir: PathBuf,
    /// The image's file name, e.g. STORY1.MNI.
    #[clap(index = 2)]
    name: String,
    /// The image carries its own palette (title and story screens).
    #[clap(long, default_value = "false")]
    standalone: bool,
    /// Draw the image with the palette of this standalone image.
    #[clap(long, conflicts_with = "standalone")]
    palette_from: Option<String>,
    /// The PNG file to write.
    #[clap(short = 'o', long)]
    output: PathBuf,
}

impl ExportFullscreen {
    fn run(&self) -> anyhow::Result<()> {
        let loader = open_game(&self.game_dir)?;
        let image = if self.standalone {
            loader.load_standalone_fullscreen_image(&self.name)?
        } else if let Some(palette_source) = &self.palette_from {
            let palette = loader.load_palette_from_fullscreen_image(palette_source)?;
            loader.load_tiled_fullscreen_image_with_palette(&self.name, &palette)?
        } else {
            loader.load_tiled_fullscreen_image(&self.name)?
        };
        write_png(&image, &self.output)
    }
}

/// Exports the anti-piracy screen as a PNG image.
#[derive(Parser)]
struct ExportAntiPiracy {
    /// Path to the game's root directory.
    #[clap(index = 1)]
    game_dir: PathBuf,
    /// The PNG file to write.
    #[clap(short = 'o', long)]
    output: PathBuf,
}

impl ExportAntiPiracy {
    fn run(&self) -> anyhow::Result<()> {
        let loader = open_game(&self.game_dir)?;
        write_png(&loader.load_anti_piracy_image()?, &self.output)
    }
}

/// Exports a cutscene movie as one PNG image per frame, each showing the
/// whole screen at that point of the movie.
#[derive(Parser)]
struct ExportMovie {
    /// Path to the game's root directory.
    #[clap(index = 1)]
    game_dir: PathBuf,
    /// The movie's file name, e.g. NUKEM2.F1.
    #[clap(index = 2)]
    name: String,
    /// Directory to write the frames to. Defaults to the current directory.
    #[clap(short = 'o', long)]
    output_dir: Option<PathBuf>,
}

impl ExportMovie {
    fn run(&self) -> anyhow::Result<()> {
        let loader = open_game(&self.game_dir)?;
        let movie = loader.load_movie(&self.name)?;
        let out_dir = self
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        log::info!(
            "{} frames, {:?} apart",
            movie.frames().len() + 1,
            movie.frame_delay()
        );
        let mut screen = movie.base_image().clone();
        write_png(&screen, &out_dir.join("frame0.png"))?;
        for (index, frame) in movie.frames().iter().enumerate() {
            frame.apply(&mut screen);
            write_png(&screen, &out_dir.join(format!("frame{}.png", index + 1)))?;
        }
        Ok(())
    }
}

/// Exports every frame of an actor as PNG images. The files are named the
/// way replacement images are, so they can be edited and dropped into the
/// replacement directory.
#[derive(Parser)]
struct ExportActor {
    /// Path to the game's root directory.
    #[clap(index = 1)]
    game_dir: PathBuf,
    /// The actor, as a number or `actor-<n>`.
    #[clap(index = 2)]
    actor: ActorId,
    /// Directory to write the frames to. Defaults to the current directory.
    #[clap(short = 'o', long)]
    output_dir: Option<PathBuf>,
}

impl ExportActor {
    fn run(&self) -> anyhow::Result<()> {
        let loader = open_game(&self.game_dir)?;
        let actor = loader.load_actor(self.actor)?;
        let out_dir = self
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        for (index, frame) in actor.frames().iter().enumerate() {
            let path = out_dir.join(actor_frame_replacement_name(self.actor, index));
            write_png(frame.image(), &path)?;
            log::info!("Frame {index} draw offset: {:?}", frame.draw_offset());
        }
        Ok(())
    }
}

fn write_wav(buffer: &AudioBuffer, path: &Path) -> anyhow::Result<()> {
    let spec = hound::WavSpec {
        channels: buffer.channels(),
        sample_rate: buffer.sample_rate(),
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec)?;
    for &sample in buffer.samples() {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(())
}

/// Exports a digitized sound effect as a WAV file.
#[derive(Parser)]
struct ExportSound {
    /// Path to the game's root directory.
    #[clap(index = 1)]
    game_dir: PathBuf,
    /// The sound, as a number or a name like `duke-jumping`.
    #[clap(index = 2)]
    sound: SoundId,
    /// The WAV file to write.
    #[clap(short = 'o', long)]
    output: PathBuf,
}

impl ExportSound {
    fn run(&self) -> anyhow::Result<()> {
        let loader = open_game(&self.game_dir)?;
        match loader.load_sound(self.sound)? {
            SoundData::Digitized(buffer) => {
                write_wav(&buffer, &self.output)?;
                eprintln!(
                    "Wrote {:.2}s of audio to {}",
                    buffer.duration().as_secs_f64(),
                    self.output.display()
                );
                Ok(())
            }
            SoundData::Synthesized(_) => anyhow::bail!(
                "Sound {} only has an AdLib version. Use `sound commands` to inspect it.",
                self.sound
            ),
        }
    }
}

#[derive(Subcommand)]
enum ExportCommand {
    #[clap(name = "backdrop", about = "Exports a backdrop as a PNG image.")]
    Backdrop(ExportBackdrop),
    #[clap(name = "tileset", about = "Exports a tile set as a PNG image.")]
    TileSet(ExportTileSet),
    #[clap(name = "fullscreen", about = "Exports a full-screen image as a PNG image.")]
    Fullscreen(ExportFullscreen),
    #[clap(name = "anti-piracy", about = "Exports the anti-piracy screen as a PNG image.")]
    AntiPiracy(ExportAntiPiracy),
    #[clap(name = "actor", about = "Exports the frames of an actor as PNG images.")]
    Actor(ExportActor),
    #[clap(name = "movie", about = "Exports the frames of a movie as PNG images.")]
    Movie(ExportMovie),
    #[clap(name = "sound", about = "Exports a digitized sound effect as a WAV file.")]
    Sound(ExportSound),
}

/// Commands for converting assets to PNG and WAV.
#[derive(Parser)]
pub(super) struct Export {
    #[clap(subcommand)]
    export_cmd: ExportCommand,
}

impl Export {
    pub(super) fn run(&self) -> anyhow::Result<()> {
        match &self.export_cmd {
            ExportCommand::Backdrop(cmd) => cmd.run(),
            ExportCommand::TileSet(cmd) => cmd.run(),
            ExportCommand::Fullscreen(cmd) => cmd.run(),
            ExportCommand::AntiPiracy(cmd) => cmd.run(),
            ExportCommand::Actor(cmd) => cmd.run(),
            ExportCommand::Movie(cmd) => cmd.run(),
            ExportCommand::Sound(cmd) => cmd.run(),
        }
    }
}
