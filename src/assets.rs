//! Named asset lookup with scoped acquisition
//!
//! `ResourceManager` loads every asset listed in an `AssetManifest` up front
//! through a backend `AssetLoader`, hands out lightweight ids by name, and
//! releases everything it loaded when dropped.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GolfError;

/// Backend texture handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Backend font handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontId(pub u32);

/// Backend sound clip handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Texture,
    Font,
    Sound,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AssetKind::Texture => "texture",
            AssetKind::Font => "font",
            AssetKind::Sound => "sound",
        })
    }
}

/// A font file and the point size to open it at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontDescriptor {
    pub path: String,
    pub size: u16,
}

/// Every asset the game needs, by logical name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetManifest {
    /// Texture name → image path
    #[serde(default)]
    pub textures: BTreeMap<String, String>,
    /// Font name → font file and size
    #[serde(default)]
    pub fonts: BTreeMap<String, FontDescriptor>,
    /// Sound name → audio clip path
    #[serde(default)]
    pub sounds: BTreeMap<String, String>,
}

const WIDE_TILE: &str = "res/tile100x150_light.png";
const SQUARE_TILE: &str = "res/tile100_light.png";

impl Default for AssetManifest {
    fn default() -> Self {
        let mut textures = BTreeMap::new();
        for (name, path) in [
            ("background", "res/background3.png"),
            ("ball", "res/ball.png"),
            ("arrow", "res/arrow.png"),
            ("startScreen", "res/flash_screen.png"),
            ("hole", "res/hole.png"),
            ("comScreen", "res/com_background.png"),
        ] {
            textures.insert(name.to_string(), path.to_string());
        }
        for n in 1..=12 {
            let path = if matches!(n, 1 | 2 | 3 | 10) {
                WIDE_TILE
            } else {
                SQUARE_TILE
            };
            textures.insert(obstacle_texture(n - 1), path.to_string());
        }

        let mut fonts = BTreeMap::new();
        fonts.insert(
            "font".to_string(),
            FontDescriptor {
                path: "res/font.ttf".to_string(),
                size: 30,
            },
        );

        let mut sounds = BTreeMap::new();
        sounds.insert("launch".to_string(), "res/ball_hit.mp3".to_string());
        sounds.insert("hole".to_string(), "res/hole_0.mp3".to_string());

        Self {
            textures,
            fonts,
            sounds,
        }
    }
}

/// Texture name for the obstacle at `index` (0-based)
pub fn obstacle_texture(index: usize) -> String {
    format!("object{}", index + 1)
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read a manifest file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GolfError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| GolfError::ManifestIo {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json).map_err(|source| GolfError::Parse {
            what: "asset manifest",
            path: path.display().to_string(),
            source,
        })
    }

    /// Prefix every path with `root` (e.g. an install directory)
    pub fn rooted(mut self, root: &str) -> Self {
        let join = |p: &mut String| *p = format!("{}/{}", root.trim_end_matches('/'), p);
        self.textures.values_mut().for_each(join);
        self.fonts.values_mut().for_each(|f| join(&mut f.path));
        self.sounds.values_mut().for_each(join);
        self
    }
}

/// Name-based lookup used by the presenter and audio
pub trait ResourceProvider {
    fn texture(&self, name: &str) -> Option<TextureId>;
    fn font(&self, name: &str) -> Option<FontId>;
    fn sound(&self, name: &str) -> Option<SoundId>;
}

/// Backend that turns files into handles (image decoder, font rasterizer, mixer)
pub trait AssetLoader {
    type Error: fmt::Display;

    fn load_texture(&mut self, path: &str) -> Result<TextureId, Self::Error>;
    fn load_font(&mut self, path: &str, size: u16) -> Result<FontId, Self::Error>;
    fn load_sound(&mut self, path: &str) -> Result<SoundId, Self::Error>;

    fn release_texture(&mut self, id: TextureId);
    fn release_font(&mut self, id: FontId);
    fn release_sound(&mut self, id: SoundId);
}

/// Owns every loaded asset for the lifetime of the game
pub struct ResourceManager<L: AssetLoader> {
    loader: L,
    textures: HashMap<String, TextureId>,
    fonts: HashMap<String, FontId>,
    sounds: HashMap<String, SoundId>,
}

impl<L: AssetLoader> ResourceManager<L> {
    /// Load everything in `manifest`. Any failure is fatal; whatever was
    /// already loaded is released before the error is returned.
    pub fn acquire(loader: L, manifest: &AssetManifest) -> Result<Self, GolfError> {
        let mut manager = Self {
            loader,
            textures: HashMap::with_capacity(manifest.textures.len()),
            fonts: HashMap::with_capacity(manifest.fonts.len()),
            sounds: HashMap::with_capacity(manifest.sounds.len()),
        };

        for (name, path) in &manifest.textures {
            let id = manager
                .loader
                .load_texture(path)
                .map_err(|e| asset_error(AssetKind::Texture, name, path, e))?;
            manager.textures.insert(name.clone(), id);
        }
        for (name, desc) in &manifest.fonts {
            let id = manager
                .loader
                .load_font(&desc.path, desc.size)
                .map_err(|e| asset_error(AssetKind::Font, name, &desc.path, e))?;
            manager.fonts.insert(name.clone(), id);
        }
        for (name, path) in &manifest.sounds {
            let id = manager
                .loader
                .load_sound(path)
                .map_err(|e| asset_error(AssetKind::Sound, name, path, e))?;
            manager.sounds.insert(name.clone(), id);
        }

        log::info!(
            "Loaded {} textures, {} fonts, {} sounds",
            manager.textures.len(),
            manager.fonts.len(),
            manager.sounds.len()
        );
        Ok(manager)
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Release everything now (same as dropping)
    pub fn teardown(self) {}
}

fn asset_error(kind: AssetKind, name: &str, path: &str, reason: impl fmt::Display) -> GolfError {
    GolfError::Asset {
        kind,
        name: name.to_string(),
        path: path.to_string(),
        reason: reason.to_string(),
    }
}

impl<L: AssetLoader> ResourceProvider for ResourceManager<L> {
    fn texture(&self, name: &str) -> Option<TextureId> {
        self.textures.get(name).copied()
    }

    fn font(&self, name: &str) -> Option<FontId> {
        self.fonts.get(name).copied()
    }

    fn sound(&self, name: &str) -> Option<SoundId> {
        self.sounds.get(name).copied()
    }
}

impl<L: AssetLoader> Drop for ResourceManager<L> {
    fn drop(&mut self) {
        for (_, id) in self.textures.drain() {
            self.loader.release_texture(id);
        }
        for (_, id) in self.fonts.drain() {
            self.loader.release_font(id);
        }
        for (_, id) in self.sounds.drain() {
            self.loader.release_sound(id);
        }
        log::debug!("Released all game assets");
    }
}

/// In-memory loader: hands out sequential ids without touching the disk.
///
/// Used by the headless runner and tests. Paths listed in `missing` fail to
/// load, everything else succeeds.
#[derive(Debug, Default)]
pub struct MemoryLoader {
    next_id: u32,
    live: HashSet<(AssetKind, u32)>,
    missing: HashSet<String>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make loading `path` fail
    pub fn with_missing(mut self, path: &str) -> Self {
        self.missing.insert(path.to_string());
        self
    }

    /// Number of handles currently loaded
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    fn alloc(&mut self, kind: AssetKind, path: &str) -> Result<u32, String> {
        if self.missing.contains(path) {
            return Err(format!("no such file: {path}"));
        }
        self.next_id += 1;
        self.live.insert((kind, self.next_id));
        Ok(self.next_id)
    }
}

impl AssetLoader for MemoryLoader {
    type Error = String;

    fn load_texture(&mut self, path: &str) -> Result<TextureId, String> {
        self.alloc(AssetKind::Texture, path).map(TextureId)
    }

    fn load_font(&mut self, path: &str, _size: u16) -> Result<FontId, String> {
        self.alloc(AssetKind::Font, path).map(FontId)
    }

    fn load_sound(&mut self, path: &str) -> Result<SoundId, String> {
        self.alloc(AssetKind::Sound, path).map(SoundId)
    }

    fn release_texture(&mut self, id: TextureId) {
        self.live.remove(&(AssetKind::Texture, id.0));
    }

    fn release_font(&mut self, id: FontId) {
        self.live.remove(&(AssetKind::Font, id.0));
    }

    fn release_sound(&mut self, id: SoundId) {
        self.live.remove(&(AssetKind::Sound, id.0));
    }
}

// Lets tests keep an eye on the loader after the manager is dropped
impl<T: AssetLoader> AssetLoader for &mut T {
    type Error = T::Error;

    fn load_texture(&mut self, path: &str) -> Result<TextureId, T::Error> {
        (**self).load_texture(path)
    }

    fn load_font(&mut self, path: &str, size: u16) -> Result<FontId, T::Error> {
        (**self).load_font(path, size)
    }

    fn load_sound(&mut self, path: &str) -> Result<SoundId, T::Error> {
        (**self).load_sound(path)
    }

    fn release_texture(&mut self, id: TextureId) {
        (**self).release_texture(id)
    }

    fn release_font(&mut self, id: FontId) {
        (**self).release_font(id)
    }

    fn release_sound(&mut self, id: SoundId) {
        (**self).release_sound(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_manifest_lists_every_asset() {
        let manifest = AssetManifest::default();
        assert_eq!(manifest.textures.len(), 18);
        assert_eq!(manifest.textures["object1"], WIDE_TILE);
        assert_eq!(manifest.textures["object4"], SQUARE_TILE);
        assert_eq!(manifest.textures["object10"], WIDE_TILE);
        assert_eq!(manifest.textures["object12"], SQUARE_TILE);
        assert_eq!(manifest.fonts["font"].size, 30);
        assert_eq!(manifest.sounds.len(), 2);
    }

    #[test]
    fn test_manifest_from_json() {
        let json = r#"{
            "textures": { "ball": "ball.png" },
            "fonts": { "font": { "path": "f.ttf", "size": 12 } }
        }"#;
        let manifest = AssetManifest::from_json(json).unwrap();
        assert_eq!(manifest.textures["ball"], "ball.png");
        assert_eq!(manifest.fonts["font"].size, 12);
        assert!(manifest.sounds.is_empty());
    }

    #[test]
    fn test_rooted_prefixes_paths() {
        let manifest = AssetManifest::default().rooted("/opt/golf/");
        assert_eq!(manifest.textures["ball"], "/opt/golf/res/ball.png");
        assert_eq!(manifest.fonts["font"].path, "/opt/golf/res/font.ttf");
        assert_eq!(manifest.sounds["hole"], "/opt/golf/res/hole_0.mp3");
    }

    #[test]
    fn test_lookup_by_name() {
        let manager = ResourceManager::acquire(MemoryLoader::new(), &AssetManifest::default()).unwrap();
        assert!(manager.texture("ball").is_some());
        assert!(manager.texture("object12").is_some());
        assert!(manager.font("font").is_some());
        assert!(manager.sound("launch").is_some());
        assert!(manager.texture("nonexistent").is_none());
        assert!(manager.font("nonexistent").is_none());
    }

    #[test]
    fn test_drop_releases_everything() {
        let mut loader = MemoryLoader::new();
        {
            let manager = ResourceManager::acquire(&mut loader, &AssetManifest::default()).unwrap();
            assert_eq!(manager.loader().live_count(), 18 + 1 + 2);
        }
        assert_eq!(loader.live_count(), 0);
    }

    #[test]
    fn test_memory_loader_tracks_handles_per_kind() {
        let mut loader = MemoryLoader::new();
        let texture = loader.load_texture("a.png").unwrap();
        let font = loader.load_font("a.ttf", 12).unwrap();
        assert_eq!(loader.live_count(), 2);

        // Releasing an id under the wrong kind leaves the handle alive
        loader.release_font(FontId(texture.0));
        assert_eq!(loader.live_count(), 2);

        loader.release_texture(texture);
        loader.release_font(font);
        assert_eq!(loader.live_count(), 0);
    }

    #[test]
    fn test_missing_asset_is_fatal_and_releases_partial_load() {
        let mut loader = MemoryLoader::new().with_missing("res/hole_0.mp3");
        let err = ResourceManager::acquire(&mut loader, &AssetManifest::default())
            .err()
            .expect("missing sound should fail");
        let GolfError::Asset { kind, name, .. } = err else {
            panic!("expected asset error");
        };
        assert_eq!(kind, AssetKind::Sound);
        assert_eq!(name, "hole");
        assert_eq!(loader.live_count(), 0);
    }

    #[test]
    fn test_obstacle_texture_names_are_one_based() {
        assert_eq!(obstacle_texture(0), "object1");
        assert_eq!(obstacle_texture(11), "object12");
    }
}
