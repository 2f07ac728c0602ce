use super::errors::{ErrorKind, Result};
use super::graphics::Graphics;
use super::spritesheet::Spritesheet;
use failchain::{bail, ResultExt};
use math::Rect;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::ops::Range;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ClipMetadata {
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

/// Describes a spritesheet: which image backs it and the named clips cut out of it.
///
/// ```toml
/// texture = "hero.png"
///
/// [[clips]]
/// name = "idle_0"
/// x = 0
/// y = 0
/// w = 32
/// h = 32
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SheetMetadata {
    pub texture: PathBuf,

    #[serde(default = "Default::default")]
    pub clips: Vec<ClipMetadata>,
}

impl SheetMetadata {
    /// Reads metadata from a file. A relative `texture` path is taken relative to the file.
    pub fn from_file<P: AsRef<Path>>(path: &P) -> Result<SheetMetadata> {
        let path = path.as_ref();
        let mut contents = String::new();
        File::open(path)
            .and_then(|mut file| file.read_to_string(&mut contents))
            .chain_err(|| ErrorKind::ResourceIo {
                what: "clip metadata",
                path: path.display().to_string(),
            })?;
        let mut metadata = SheetMetadata::from_text(&contents)?;
        if metadata.texture.is_relative() {
            if let Some(parent) = path.parent() {
                metadata.texture = parent.join(&metadata.texture);
            }
        }
        Ok(metadata)
    }

    pub fn from_text(text: &str) -> Result<SheetMetadata> {
        let metadata: SheetMetadata = toml::from_str(text)
            .chain_err(|| ErrorKind::corrupt_metadata("Failed to parse metadata file."))?;
        metadata.validate()?;
        Ok(metadata)
    }

    pub fn clip_rects(&self) -> impl Iterator<Item = Rect> + '_ {
        self.clips
            .iter()
            .map(|clip| Rect::new(clip.x, clip.y, clip.w, clip.h))
    }

    /// Position of the clip called `name`, which is also its index once added to a sheet.
    pub fn clip_index(&self, name: &str) -> Option<usize> {
        self.clips.iter().position(|clip| clip.name == name)
    }

    /// Adds every clip to `sheet` in order, returning the indices they were given.
    pub fn add_clips_to<GraphicsT: Graphics>(
        &self,
        sheet: &mut Spritesheet<GraphicsT>,
    ) -> Range<usize> {
        let start = sheet.len();
        for rect in self.clip_rects() {
            sheet.add_clip(rect);
        }
        start..sheet.len()
    }

    fn validate(&self) -> Result<()> {
        let mut names = HashSet::with_capacity(self.clips.len());
        for clip in &self.clips {
            if !names.insert(clip.name.as_str()) {
                bail!(ErrorKind::corrupt_metadata(format!(
                    "Duplicate clip name `{}`.",
                    clip.name
                )));
            }
            if clip.w < 0 || clip.h < 0 {
                bail!(ErrorKind::corrupt_metadata(format!(
                    "Clip `{}` has negative size {}x{}.",
                    clip.name, clip.w, clip.h
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::super::errors::ErrorKind;
    use super::super::spritesheet::test::TestGraphics;
    use super::super::spritesheet::Spritesheet;
    use super::SheetMetadata;
    use math::Rect;
    use std::path::Path;

    const HERO: &str = r#"
        texture = "hero.png"

        [[clips]]
        name = "idle"
        x = 0
        y = 0
        w = 32
        h = 32

        [[clips]]
        name = "walk"
        x = 32
        y = 0
        w = 32
        h = 48
    "#;

    #[test]
    fn test_sheet_metadata() {
        let metadata = SheetMetadata::from_text(HERO).unwrap();
        assert_eq!(metadata.texture, Path::new("hero.png"));
        assert_eq!(
            metadata.clip_rects().collect::<Vec<_>>(),
            vec![Rect::new(0, 0, 32, 32), Rect::new(32, 0, 32, 48)]
        );
        assert_eq!(metadata.clip_index("walk"), Some(1));
        assert_eq!(metadata.clip_index("jump"), None);
    }

    #[test]
    fn test_add_clips_to_sheet() {
        let graphics = TestGraphics::default();
        let mut sheet = Spritesheet::<TestGraphics>::new(graphics.texture(64, 64));
        sheet.add_clip(Rect::new(0, 0, 1, 1));

        let metadata = SheetMetadata::from_text(HERO).unwrap();
        let added = metadata.add_clips_to(&mut sheet);
        assert_eq!(added, 1..3);
        assert_eq!(sheet.get_clip(2).unwrap(), Rect::new(32, 0, 32, 48));
    }

    #[test]
    fn test_no_clips() {
        let metadata = SheetMetadata::from_text(r#"texture = "empty.png""#).unwrap();
        assert!(metadata.clips.is_empty());
    }

    #[test]
    fn test_duplicate_clip_names() {
        let text = r#"
            texture = "a.png"
            [[clips]]
            name = "a"
            x = 0
            y = 0
            w = 1
            h = 1
            [[clips]]
            name = "a"
            x = 1
            y = 0
            w = 1
            h = 1
        "#;
        match *SheetMetadata::from_text(text).unwrap_err().kind() {
            ErrorKind::CorruptMetadata(ref message) => assert!(message.contains("`a`")),
            ref kind => panic!("unexpected error kind {:?}", kind),
        }
    }

    #[test]
    fn test_negative_size() {
        let text = r#"
            texture = "a.png"
            [[clips]]
            name = "bad"
            x = 0
            y = 0
            w = -4
            h = 1
        "#;
        match *SheetMetadata::from_text(text).unwrap_err().kind() {
            ErrorKind::CorruptMetadata(_) => {}
            ref kind => panic!("unexpected error kind {:?}", kind),
        }
    }

    #[test]
    fn test_malformed() {
        match *SheetMetadata::from_text("clips = 3").unwrap_err().kind() {
            ErrorKind::CorruptMetadata(_) => {}
            ref kind => panic!("unexpected error kind {:?}", kind),
        }
    }

    #[test]
    fn test_from_file_resolves_texture_path() {
        let dir = std::env::temp_dir().join("rs_sprites_meta_test");
        std::fs::create_dir_all(&dir).unwrap();
        let relative = dir.join("hero.toml");
        std::fs::write(&relative, HERO).unwrap();
        let absolute = dir.join("absolute.toml");
        let texture = dir.join("elsewhere").join("hero.png");
        std::fs::write(
            &absolute,
            format!("texture = {:?}\n", texture.to_str().unwrap()),
        )
        .unwrap();

        let metadata = SheetMetadata::from_file(&relative).unwrap();
        assert_eq!(metadata.texture, dir.join("hero.png"));
        assert_eq!(metadata.clips.len(), 2);
        assert_eq!(
            SheetMetadata::from_file(&absolute).unwrap().texture,
            texture
        );

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_file() {
        match *SheetMetadata::from_file(&"does/not/exist.toml")
            .unwrap_err()
            .kind()
        {
            ErrorKind::ResourceIo { what, .. } => assert_eq!(what, "clip metadata"),
            ref kind => panic!("unexpected error kind {:?}", kind),
        }
    }
}
