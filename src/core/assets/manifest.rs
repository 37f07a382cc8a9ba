//=========================================================================
// Asset Manifest
//=========================================================================
//
// Declarative list of the files a scene needs, grouped by loader type.
// Paths are relative to the `assets/` directory.
//
//=========================================================================

//=== Entries =============================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    pub key: String,
    pub path: String,
}

/// Uniform-grid spritesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpritesheetEntry {
    pub key: String,
    pub path: String,
    pub frame_width: u32,
    pub frame_height: u32,
    pub end_frame: Option<u32>,
    pub margin: Option<u32>,
    pub spacing: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioEntry {
    pub key: String,
    pub path: String,
    pub instances: Option<u32>,
}

/// Texture plus its JSON frame atlas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtlasEntry {
    pub key: String,
    pub path: String,
    pub atlas_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiatlasEntry {
    pub key: String,
    pub path: String,
}

//=== AssetManifest =======================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetManifest {
    pub images: Vec<ImageEntry>,
    pub spritesheets: Vec<SpritesheetEntry>,
    pub audio: Vec<AudioEntry>,
    pub atlases: Vec<AtlasEntry>,
    pub multiatlases: Vec<MultiatlasEntry>,
}

impl AssetManifest {
    /// Assets used by the platformer scenes.
    pub fn game_assets() -> Self {
        let images = [
            ("background", "bg.png"),
            ("logo", "logo.png"),
            ("platform", "platform.png"),
            ("enemy-bg", "enemy-bg.png"),
            ("coin-bg", "coin-bg.png"),
            ("enemy64-bg", "enemy64-bg.png"),
        ]
        .into_iter()
        .map(|(key, path)| ImageEntry {
            key: key.into(),
            path: path.into(),
        })
        .collect();

        let spritesheets = [
            ("player", "character.png", 32, 32),
            ("dude", "dude.png", 32, 48),
            ("coin", "coin.png", 32, 32),
            ("coinGlowing", "coinGlowing.png", 32, 32),
            ("coinsprite", "coinsprite.png", 32, 32),
            ("enemy", "enemy.png", 32, 32),
            ("enemy64", "enemy64.png", 64, 64),
            ("toto", "toto.png", 32, 32),
            ("template9frames", "template9frames.png", 32, 32),
            ("character-withbg", "character-withbg.png", 32, 32),
        ]
        .into_iter()
        .map(|(key, path, w, h)| SpritesheetEntry::grid(key, path, w, h))
        .collect();

        Self {
            images,
            spritesheets,
            ..Self::default()
        }
    }

    /// Total number of entries across all groups.
    pub fn len(&self) -> usize {
        self.images.len()
            + self.spritesheets.len()
            + self.audio.len()
            + self.atlases.len()
            + self.multiatlases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SpritesheetEntry {
    /// Spritesheet with no end frame, margin or spacing.
    pub fn grid(key: &str, path: &str, frame_width: u32, frame_height: u32) -> Self {
        Self {
            key: key.into(),
            path: path.into(),
            frame_width,
            frame_height,
            end_frame: None,
            margin: None,
            spacing: None,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
