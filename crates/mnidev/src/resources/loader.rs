//! Loading of decoded assets from a game installation.

use std::path::{Path, PathBuf};

use crate::{
    errors::{Error, Result},
    game_traits::{
        FULL_SCREEN_IMAGE_DATA_SIZE, VIEWPORT_HEIGHT_PX, VIEWPORT_WIDTH_PX, VIEWPORT_WIDTH_TILES,
        files,
    },
    ids::{ActorId, SoundId},
    resources::{
        file::{
            CmpArchive,
            loose::LooseFiles,
            replacement::{
                ReplacementDir, actor_frame_replacement_name, backdrop_replacement_name,
                tileset_replacement_name,
            },
        },
        types::{
            actor::{ActorData, ActorFrame, ActorInfo},
            adlib::AudioPackage,
            audio::{AudioBuffer, SoundData},
            ega::{TileImageType, decode_planar_ega_buffer, decode_simple_planar_ega_buffer},
            image::Image,
            movie::Movie,
            music::Song,
            palette::{INGAME_PALETTE, Palette16, Palette256},
            script::ScriptBundle,
            tile_set::TileSet,
        },
    },
    utils::mem_reader::{MemReader, SliceMemReader},
};

use self::resolution::{
    FILE_RESOLUTION_ORDER, IMAGE_RESOLUTION_ORDER, ResolutionStep, SoundSource, sound_sources,
};

pub mod resolution;

/// Loads assets of a game installation.
///
/// Every asset is looked up by its archive name. Raw files are taken from a
/// loose file in the game directory if one exists, and from the archive
/// otherwise. Backdrops, tile sets and actor frames can additionally come
/// from a PNG in the replacement directory; see [`resolution`] for the exact
/// order.
///
/// Nothing is cached: every call reads and decodes its input again.
#[derive(Debug)]
pub struct ResourceLoader {
    loose: LooseFiles,
    replacements: ReplacementDir,
    archive: CmpArchive,
}

impl ResourceLoader {
    /// Opens the game installation at `game_path`, which must contain the
    /// main archive.
    pub fn new(game_path: impl Into<PathBuf>) -> Result<Self> {
        let game_path = game_path.into();
        let archive = CmpArchive::open(&game_path.join(files::MAIN_ARCHIVE))?;
        Ok(Self::with_archive(game_path, archive))
    }

    /// Creates a loader from an already opened archive.
    #[must_use]
    pub fn with_archive(game_path: impl Into<PathBuf>, archive: CmpArchive) -> Self {
        let game_path = game_path.into();
        ResourceLoader {
            replacements: ReplacementDir::new(game_path.join(files::ASSET_REPLACEMENTS_DIR)),
            loose: LooseFiles::new(game_path),
            archive,
        }
    }

    #[must_use]
    pub fn game_path(&self) -> &Path {
        self.loose.root()
    }

    #[must_use]
    pub fn archive(&self) -> &CmpArchive {
        &self.archive
    }

    fn lookup_file(&self, step: ResolutionStep, name: &str) -> Result<Option<Vec<u8>>> {
        match step {
            ResolutionStep::LooseFile => self.loose.read(name),
            ResolutionStep::Archive if self.archive.has_file(name) => {
                self.archive.file(name).map(Some)
            }
            ResolutionStep::Archive | ResolutionStep::Replacement => Ok(None),
        }
    }

    /// Returns the raw contents of the named file.
    pub fn file(&self, name: &str) -> Result<Vec<u8>> {
        for &step in FILE_RESOLUTION_ORDER {
            if let Some(data) = self.lookup_file(step, name)? {
                return Ok(data);
            }
        }
        Err(Error::not_found(name))
    }

    #[must_use]
    pub fn has_file(&self, name: &str) -> bool {
        FILE_RESOLUTION_ORDER.iter().any(|step| match step {
            ResolutionStep::LooseFile => self.loose.exists(name),
            ResolutionStep::Archive => self.archive.has_file(name),
            ResolutionStep::Replacement => false,
        })
    }

    /// Returns the named file as text. Every byte becomes the character of
    /// the same code point.
    pub fn file_as_text(&self, name: &str) -> Result<String> {
        Ok(self.file(name)?.into_iter().map(char::from).collect())
    }

    fn asset_files<'a>(&'a self, name: &'a str) -> AssetFiles<'a> {
        AssetFiles {
            loader: self,
            name,
            loose: None,
            archive: None,
        }
    }

    fn resolve_image(
        &self,
        files: &mut AssetFiles<'_>,
        replacement: Option<&str>,
        decode: impl Fn(&[u8]) -> Result<Image>,
    ) -> Result<Image> {
        for &step in IMAGE_RESOLUTION_ORDER {
            let image = match step {
                ResolutionStep::Replacement => {
                    replacement.and_then(|file_name| self.replacements.load(file_name))
                }
                ResolutionStep::LooseFile | ResolutionStep::Archive => {
                    files.get(step)?.map(&decode).transpose()?
                }
            };
            if let Some(image) = image {
                log::debug!("Resolved image {} via {step:?}", files.name);
                return Ok(image);
            }
        }
        Err(Error::not_found(files.name))
    }

    /// Loads a full-screen image stored as 40x25 unmasked tiles, drawn with
    /// the in-game palette.
    pub fn load_tiled_fullscreen_image(&self, name: &str) -> Result<Image> {
        self.load_tiled_fullscreen_image_with_palette(name, &INGAME_PALETTE)
    }

    pub fn load_tiled_fullscreen_image_with_palette(
        &self,
        name: &str,
        palette: &Palette16,
    ) -> Result<Image> {
        decode_planar_ega_buffer(
            &self.file(name)?,
            palette,
            VIEWPORT_WIDTH_TILES,
            TileImageType::Unmasked,
        )
    }

    /// Loads a full-screen image that carries its own palette after the
    /// planar pixel data.
    pub fn load_standalone_fullscreen_image(&self, name: &str) -> Result<Image> {
        let data = self.file(name)?;
        let mut reader = SliceMemReader::new(name, &data);
        let pixels = reader.read_bytes(FULL_SCREEN_IMAGE_DATA_SIZE)?;
        let palette = Palette16::read_6bit(&mut reader)?;
        decode_simple_planar_ega_buffer(pixels, &palette, VIEWPORT_WIDTH_PX, VIEWPORT_HEIGHT_PX)
    }

    /// Loads only the palette of a standalone full-screen image.
    pub fn load_palette_from_fullscreen_image(&self, name: &str) -> Result<Palette16> {
        let data = self.file(name)?;
        let mut reader = SliceMemReader::new(name, &data);
        reader.skip(FULL_SCREEN_IMAGE_DATA_SIZE)?;
        Ok(Palette16::read_6bit(&mut reader)?)
    }

    /// Loads the anti-piracy screen. Unlike the other full-screen images it
    /// is a 256 color image: a VGA palette followed by one byte per pixel.
    pub fn load_anti_piracy_image(&self) -> Result<Image> {
        let name = files::ANTI_PIRACY_SCREEN;
        let data = self.file(name)?;
        let mut reader = SliceMemReader::new(name, &data);
        let palette = Palette256::read_6bit(&mut reader)?;
        let indices = reader.read_bytes(VIEWPORT_WIDTH_PX * VIEWPORT_HEIGHT_PX)?;
        if !reader.is_empty() {
            log::warn!("Ignoring {} trailing bytes in {name}", reader.remaining());
        }
        let pixels = indices.iter().map(|&i| palette[usize::from(i)]).collect();
        Image::from_pixels(pixels, VIEWPORT_WIDTH_PX, VIEWPORT_HEIGHT_PX)
    }

    pub fn load_backdrop(&self, name: &str) -> Result<Image> {
        let replacement = backdrop_replacement_name(name);
        self.resolve_image(&mut self.asset_files(name), replacement.as_deref(), |data| {
            decode_planar_ega_buffer(
                data,
                &INGAME_PALETTE,
                VIEWPORT_WIDTH_TILES,
                TileImageType::Unmasked,
            )
        })
    }

    /// Loads a tile set. A replacement image only replaces the pixels; the
    /// tile attributes are always read from the original file.
    pub fn load_tile_set(&self, name: &str) -> Result<TileSet> {
        let attributes = TileSet::read_attributes(&self.file(name)?)?;
        let image = self.resolve_image(
            &mut self.asset_files(name),
            tileset_replacement_name(name).as_deref(),
            TileSet::decode_image,
        )?;
        Ok(TileSet::new(image, attributes))
    }

    pub fn load_actor_info(&self) -> Result<ActorInfo> {
        ActorInfo::from_bytes(&self.file(files::ACTOR_INFO)?)
    }

    /// Loads every frame of an actor. Each frame can be replaced on its own.
    /// The actor image file is read at most once per call.
    pub fn load_actor(&self, id: ActorId) -> Result<ActorData> {
        let info = self.load_actor_info()?;
        let header = info
            .header(id)
            .ok_or_else(|| Error::not_found(id.to_string()))?;
        let mut image_files = self.asset_files(files::ACTOR_IMAGES);
        let frames = header
            .frames()
            .iter()
            .enumerate()
            .map(|(index, frame)| {
                let image = self.resolve_image(
                    &mut image_files,
                    Some(actor_frame_replacement_name(id, index).as_str()),
                    |data| frame.decode_image(data),
                )?;
                Ok(ActorFrame::new(frame.draw_offset(), image))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(ActorData::new(header.draw_index(), frames))
    }

    /// Loads a cutscene movie. Movies are not part of the archive, so only
    /// the game directory is searched.
    pub fn load_movie(&self, name: &str) -> Result<Movie> {
        let data = self
            .loose
            .read(name)?
            .ok_or_else(|| Error::not_found(name))?;
        Movie::from_bytes(&data)
    }

    pub fn load_music(&self, name: &str) -> Result<Song> {
        Song::from_bytes(&self.file(name)?)
    }

    pub fn load_audio_package(&self) -> Result<AudioPackage> {
        AudioPackage::new(&self.file(files::AUDIO_DICT)?, self.file(files::AUDIO_DATA)?)
    }

    fn try_sound_source(&self, source: &SoundSource) -> Result<Option<SoundData>> {
        let sound = match source {
            SoundSource::DedicatedFile(name) => SoundData::Digitized(self.load_sound_file(name)?),
            SoundSource::DigitizedFile(name) => {
                if !self.has_file(name) {
                    return Ok(None);
                }
                SoundData::Digitized(self.load_sound_file(name)?)
            }
            SoundSource::Synthesized(id) => {
                SoundData::Synthesized(self.load_audio_package()?.load_adlib_sound(*id)?)
            }
        };
        log::debug!("Resolved sound via {source:?}");
        Ok(Some(sound))
    }

    /// Loads a sound effect, preferring a digitized version over the AdLib
    /// one.
    pub fn load_sound(&self, id: SoundId) -> Result<SoundData> {
        for source in sound_sources(id) {
            if let Some(sound) = self.try_sound_source(&source)? {
                return Ok(sound);
            }
        }
        Err(Error::UnknownSoundId(id))
    }

    /// Loads a VOC file by name.
    pub fn load_sound_file(&self, name: &str) -> Result<AudioBuffer> {
        crate::resources::types::voc::decode_voc(&self.file(name)?)
    }

    pub fn load_script_bundle(&self, name: &str) -> Result<ScriptBundle> {
        Ok(ScriptBundle::parse(&self.file_as_text(name)?))
    }
}

/// The raw files that can hold an image asset, each read on first use.
struct AssetFiles<'a> {
    loader: &'a ResourceLoader,
    name: &'a str,
    loose: Option<Option<Vec<u8>>>,
    archive: Option<Option<Vec<u8>>>,
}

impl AssetFiles<'_> {
    fn get(&mut self, step: ResolutionStep) -> Result<Option<&[u8]>> {
        let slot = match step {
            ResolutionStep::LooseFile => &mut self.loose,
            ResolutionStep::Archive => &mut self.archive,
            ResolutionStep::Replacement => return Ok(None),
        };
        if slot.is_none() {
            *slot = Some(self.loader.lookup_file(step, self.name)?);
        }
        Ok(slot.as_ref().and_then(Option::as_deref))
    }
}

#[cfg(test)]
mod tests {
    use datalit::datalit;
    use tempfile::TempDir;

    use super::*;
    use crate::{
        ErrorKind,
        game_traits::{ADLIB_SOUNDS_BASE, czone},
        resources::types::image::Color,
        utils::testing::{
            actor_images_fixture, actor_info_fixture, build_cmp_archive, czone_fixture,
            encode_planar_tile, png_bytes, solid_image, write_file,
        },
    };

    fn open_game(entries: &[(&str, &[u8])]) -> (TempDir, ResourceLoader) {
        let dir = tempfile::tempdir().unwrap();
        write_file(
            &dir.path().join(files::MAIN_ARCHIVE),
            &build_cmp_archive(entries),
        );
        let loader = ResourceLoader::new(dir.path()).unwrap();
        (dir, loader)
    }

    fn replacement_path(dir: &TempDir, file_name: &str) -> PathBuf {
        dir.path().join(files::ASSET_REPLACEMENTS_DIR).join(file_name)
    }

    /// A tiled full-screen image of a single color.
    fn backdrop_data(color: u8) -> Vec<u8> {
        encode_planar_tile(&[Some(color); 64], false).repeat(1000)
    }

    /// A VOC file with a single sample.
    fn voc_data(sample: u8) -> Vec<u8> {
        let mut data = datalit!(
            b"Creative Voice File\x1A",
            26u16_le,
            0x010Au16_le,
            0x1129u16_le,
            0x01u8,
            0x030000,
            156u8,
            0u8,
        )
        .to_vec();
        data.extend([sample, 0x00]);
        data
    }

    fn audio_files() -> (Vec<u8>, Vec<u8>) {
        let data = datalit!(
            2u32_le,
            1u16_le,
            0x01u8, 0x02u8, 0x03u8, 0x04u8, 0x05u8, 0x06u8, 0x07u8, 0x08u8,
            0x09u8, 0x0Au8, 0x0Bu8, 0x00u8, 0x00u8, 0x00u8, 0x00u8, 0x00u8,
            4u8,
            0x40u8, 0x41u8,
        )
        .to_vec();
        // Entry `ADLIB_SOUNDS_BASE + 1` (DukeNormalShot) is the only
        // non-empty one.
        let mut offsets = vec![0u32; ADLIB_SOUNDS_BASE + 2];
        offsets.push(u32::try_from(data.len()).unwrap());
        let dict = offsets.iter().flat_map(|o| o.to_le_bytes()).collect();
        (dict, data)
    }

    #[test]
    fn loose_file_beats_archive() {
        let (dir, loader) = open_game(&[("A.MNI", b"archive"), ("B.MNI", b"only archive")]);
        write_file(&dir.path().join("A.MNI"), b"loose");
        write_file(&dir.path().join("C.MNI"), b"only loose");

        assert_eq!(loader.file("A.MNI").unwrap(), b"loose");
        assert_eq!(loader.file("B.MNI").unwrap(), b"only archive");
        assert_eq!(loader.file("C.MNI").unwrap(), b"only loose");
        assert!(loader.has_file("C.MNI"));
        assert!(!loader.has_file("D.MNI"));
        assert_eq!(loader.file("D.MNI").unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn loose_file_beats_replacement_and_archive() {
        let (dir, loader) = open_game(&[("DROP1.MNI", &backdrop_data(1))]);
        write_file(&dir.path().join("DROP1.MNI"), &backdrop_data(2));
        write_file(
            &replacement_path(&dir, "backdrop1.png"),
            &png_bytes(&solid_image(Color::opaque(1, 2, 3), 320, 200)),
        );

        let image = loader.load_backdrop("DROP1.MNI").unwrap();
        assert_eq!(image.pixel_at(0, 0), Some(INGAME_PALETTE[2]));
        assert_eq!(image.pixel_at(319, 199), Some(INGAME_PALETTE[2]));
    }

    #[test]
    fn backdrop_replacement_beats_archive() {
        let (dir, loader) = open_game(&[("DROP3.MNI", &backdrop_data(1))]);
        let replacement = solid_image(Color::new(10, 20, 30, 40), 640, 400);
        write_file(
            &replacement_path(&dir, "backdrop3.png"),
            &png_bytes(&replacement),
        );

        assert_eq!(loader.load_backdrop("DROP3.MNI").unwrap(), replacement);
        // Replacement names don't depend on the case of the asset name.
        assert_eq!(loader.load_backdrop("drop3.mni").unwrap(), replacement);
    }

    #[test]
    fn unreadable_replacement_falls_through() {
        let (dir, loader) = open_game(&[("DROP3.MNI", &backdrop_data(5))]);
        write_file(&replacement_path(&dir, "backdrop3.png"), b"garbage");

        let image = loader.load_backdrop("DROP3.MNI").unwrap();
        assert_eq!(image.pixel_at(0, 0), Some(INGAME_PALETTE[5]));
    }

    #[test]
    fn fullscreen_image_with_palette_override() {
        let (_dir, loader) = open_game(&[("STORY1.MNI", &backdrop_data(3))]);
        let mut colors = *INGAME_PALETTE.colors();
        colors[3] = Color::opaque(1, 1, 1);
        let palette = Palette16::new(colors);
        let image = loader
            .load_tiled_fullscreen_image_with_palette("STORY1.MNI", &palette)
            .unwrap();
        assert_eq!(image.pixel_at(100, 100), Some(Color::opaque(1, 1, 1)));
        let image = loader.load_tiled_fullscreen_image("STORY1.MNI").unwrap();
        assert_eq!(image.pixel_at(100, 100), Some(INGAME_PALETTE[3]));
    }

    #[test]
    fn tile_set_replacement_keeps_attributes() {
        let (dir, loader) = open_game(&[("CZONE1.MNI", &czone_fixture())]);
        let replacement = solid_image(Color::opaque(9, 9, 9), 640, 464);
        write_file(
            &replacement_path(&dir, "tileset1.png"),
            &png_bytes(&replacement),
        );

        let tile_set = loader.load_tile_set("CZONE1.MNI").unwrap();
        assert_eq!(tile_set.image(), &replacement);
        assert_eq!(tile_set.attributes().len(), czone::NUM_TILES_TOTAL);
        assert_eq!(tile_set.attributes().raw_attributes(5), Some(5));
    }

    #[test]
    fn tile_set_from_archive() {
        let (_dir, loader) = open_game(&[("CZONE1.MNI", &czone_fixture())]);
        let tile_set = loader.load_tile_set("CZONE1.MNI").unwrap();
        assert_eq!(tile_set.image().pixel_at(8, 0), Some(INGAME_PALETTE[1]));
        assert_eq!(tile_set.attributes().raw_attributes(1000), Some(0x4000));
    }

    #[test]
    fn standalone_fullscreen_image() {
        let mut data = vec![0xFF; FULL_SCREEN_IMAGE_DATA_SIZE];
        let mut palette = vec![0u8; Palette16::DATA_SIZE];
        palette[45..48].copy_from_slice(&[63, 0, 63]);
        data.extend_from_slice(&palette);
        let (_dir, loader) = open_game(&[("TITLE1.MNI", &data)]);

        let image = loader.load_standalone_fullscreen_image("TITLE1.MNI").unwrap();
        assert_eq!((image.width(), image.height()), (320, 200));
        assert_eq!(image.pixel_at(319, 199), Some(Color::opaque(255, 0, 255)));

        let palette = loader
            .load_palette_from_fullscreen_image("TITLE1.MNI")
            .unwrap();
        assert_eq!(palette[15], Color::opaque(255, 0, 255));
    }

    #[test]
    fn truncated_fullscreen_image() {
        let data = vec![0; FULL_SCREEN_IMAGE_DATA_SIZE + 47];
        let (_dir, loader) = open_game(&[("TITLE1.MNI", &data)]);
        let err = loader
            .load_standalone_fullscreen_image("TITLE1.MNI")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TruncatedData);
    }

    #[test]
    fn anti_piracy_image() {
        let mut data = vec![0u8; Palette256::DATA_SIZE];
        data[200 * 3..201 * 3].copy_from_slice(&[63, 63, 0]);
        data.extend(std::iter::repeat_n(200u8, 320 * 200));
        let (_dir, loader) = open_game(&[("LCR.MNI", &data)]);

        let image = loader.load_anti_piracy_image().unwrap();
        assert_eq!(image.pixel_at(0, 0), Some(Color::opaque(255, 255, 0)));

        data.pop();
        let (_dir, loader) = open_game(&[("LCR.MNI", &data)]);
        let err = loader.load_anti_piracy_image().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TruncatedData);
    }

    #[test]
    fn actor_frames_can_be_replaced() {
        let (dir, loader) = open_game(&[
            ("ACTRINFO.MNI", &actor_info_fixture()),
            ("ACTORS.MNI", &actor_images_fixture()),
        ]);

        let actor = loader.load_actor(ActorId::new(0)).unwrap();
        assert_eq!(actor.draw_index(), -1);
        let frame = &actor.frames()[0];
        assert_eq!(frame.draw_offset(), (-2, 3));
        assert_eq!(frame.image().pixel_at(8, 0), Some(INGAME_PALETTE[9]));

        let replacement = solid_image(Color::opaque(7, 7, 7), 32, 16);
        write_file(
            &replacement_path(&dir, "actor0_frame0.png"),
            &png_bytes(&replacement),
        );
        let actor = loader.load_actor(ActorId::new(0)).unwrap();
        assert_eq!(actor.frames()[0].image(), &replacement);
        assert_eq!(actor.frames()[0].draw_offset(), (-2, 3));

        let err = loader.load_actor(ActorId::new(1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn asset_files_are_read_once() {
        let (dir, loader) = open_game(&[("ACTORS.MNI", b"archive")]);
        let loose_path = dir.path().join("ACTORS.MNI");
        write_file(&loose_path, b"loose");

        let mut files = loader.asset_files("ACTORS.MNI");
        assert_eq!(
            files.get(ResolutionStep::LooseFile).unwrap(),
            Some(&b"loose"[..])
        );
        std::fs::remove_file(&loose_path).unwrap();
        assert_eq!(
            files.get(ResolutionStep::LooseFile).unwrap(),
            Some(&b"loose"[..])
        );
        assert_eq!(
            files.get(ResolutionStep::Archive).unwrap(),
            Some(&b"archive"[..])
        );
        assert_eq!(files.get(ResolutionStep::Replacement).unwrap(), None);

        let mut fresh = loader.asset_files("ACTORS.MNI");
        assert_eq!(fresh.get(ResolutionStep::LooseFile).unwrap(), None);
    }

    #[test]
    fn movies_come_from_the_game_directory() {
        let mut data = datalit!(
            144u32_le,
            0xAF11u16_le,
            1u16_le,
            2u16_le,
            1u16_le,
            8u16_le,
            0u16_le,
            5u16_le,
        )
        .to_vec();
        data.resize(128, 0);
        data.extend_from_slice(&datalit!(16u32_le, 0xF1FAu16_le, 0u16_le, 0u32_le, 0u32_le));

        let (dir, loader) = open_game(&[("NUKEM2.F1", &data)]);
        let err = loader.load_movie("NUKEM2.F1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        write_file(&dir.path().join("NUKEM2.F1"), &data);
        let movie = loader.load_movie("NUKEM2.F1").unwrap();
        assert_eq!(
            (movie.base_image().width(), movie.base_image().height()),
            (2, 1)
        );
        assert!(movie.frames().is_empty());

        write_file(&dir.path().join("NUKEM2.F2"), &data[..140]);
        let err = loader.load_movie("NUKEM2.F2").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TruncatedData);
    }

    #[test]
    fn intro_sound_uses_only_its_file() {
        let (dict, data) = audio_files();
        let (dir, loader) = open_game(&[("AUDIOHED.MNI", &dict), ("AUDIOT.MNI", &data)]);

        let err = loader.load_sound(SoundId::IntroGunShot).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        write_file(&dir.path().join("INTRO3.MNI"), &voc_data(0x90));
        let sound = loader.load_sound(SoundId::IntroGunShot).unwrap();
        let SoundData::Digitized(buffer) = sound else {
            panic!("expected digitized sound, got {sound:?}");
        };
        assert_eq!(buffer.samples(), &[16 << 8]);
    }

    #[test]
    fn digitized_sound_beats_synthesized() {
        let (dict, data) = audio_files();
        let (dir, loader) = open_game(&[("AUDIOHED.MNI", &dict), ("AUDIOT.MNI", &data)]);

        // DukeNormalShot is sound 1.
        let sound = loader.load_sound(SoundId::DukeNormalShot).unwrap();
        let SoundData::Synthesized(adlib) = sound else {
            panic!("expected synthesized sound, got {sound:?}");
        };
        assert_eq!(adlib.notes(), &[0x40, 0x41]);

        write_file(&dir.path().join("SB_2.MNI"), &voc_data(0x80));
        let sound = loader.load_sound(SoundId::DukeNormalShot).unwrap();
        assert!(matches!(sound, SoundData::Digitized(_)));

        let err = loader.load_sound(SoundId::DukeJumping).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownSoundId);
    }

    #[test]
    fn music_and_scripts() {
        let song = datalit!(0x20u8, 0x01u8, 10u16_le);
        let (_dir, loader) = open_game(&[
            ("PUZZ.IMF", &song),
            ("TEXT.MNI", b"Hint_1\r\n//FADEIN\r\n//END\r\n"),
        ]);
        assert_eq!(loader.load_music("PUZZ.IMF").unwrap().commands().len(), 1);
        let bundle = loader.load_script_bundle("TEXT.MNI").unwrap();
        assert_eq!(bundle.get("Hint_1").unwrap(), &["//FADEIN"]);
        assert_eq!(
            loader.load_music("MISSING.IMF").unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn text_keeps_every_byte() {
        let (_dir, loader) = open_game(&[("T.MNI", &[b'a', 0xE9, b'\n'])]);
        assert_eq!(loader.file_as_text("T.MNI").unwrap(), "a\u{e9}\n");
    }
}
