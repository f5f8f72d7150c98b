//! Asset store resource.
//!
//! A non-send resource that owns every loaded texture and every registered
//! atlas, keyed by string names. Textures come in through a
//! [`RenderBackend`]; atlases are baked against their texture's dimensions
//! the moment they are registered, so everything the store hands out is
//! ready to draw from.
//!
//! An atlas and its backing texture share one name: registering an atlas
//! called `"ships"` requires a texture called `"ships"` to already be
//! loaded.

use std::path::Path;

use log::info;
use rustc_hash::FxHashMap;

use crate::atlas::Atlas;
use crate::backend::{RenderBackend, SoftwareBackend, Texture};
use crate::error::AssetError;
use crate::rect::Rect;

/// Texture and atlas storage over a pluggable loading backend.
///
/// This is a non-send resource; use `NonSend<AssetStore>` in system
/// parameters.
// NonSend resource: insert with insert_non_send_resource and access via NonSend/NonSendMut
pub struct AssetStore<B: RenderBackend = SoftwareBackend> {
    backend: B,
    textures: FxHashMap<String, Texture>,
    atlases: FxHashMap<String, Atlas>,
}

impl AssetStore<SoftwareBackend> {
    /// Create an empty store over the CPU decoding backend.
    pub fn new() -> Self {
        Self::with_backend(SoftwareBackend)
    }
}

impl Default for AssetStore<SoftwareBackend> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: RenderBackend> AssetStore<B> {
    /// Create an empty store over the given backend.
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            textures: FxHashMap::default(),
            atlases: FxHashMap::default(),
        }
    }

    /// Load the texture at `path` and store it under `name`.
    ///
    /// Loading an already used name replaces the stored texture; any atlas
    /// registered under that name stays as baked.
    pub fn load_texture_named(
        &mut self,
        path: impl AsRef<Path>,
        name: impl Into<String>,
    ) -> Result<(), AssetError> {
        let name = name.into();
        let path = path.as_ref();
        let texture = self
            .backend
            .load_texture(path)
            .map_err(|reason| AssetError::ResourceLoad {
                path: path.to_path_buf(),
                reason,
            })?;
        info!(
            "loaded texture {:?} from {} ({}x{})",
            name,
            path.display(),
            texture.width,
            texture.height
        );
        self.textures.insert(name, texture);
        Ok(())
    }

    /// Load the texture at `path`, storing it under its file name.
    ///
    /// The chosen name keeps the extension (`sprites/ships.png` is stored
    /// as `"ships.png"`) and is returned so callers can refer back to it.
    pub fn load_texture(&mut self, path: impl AsRef<Path>) -> Result<String, AssetError> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| AssetError::ResourceLoad {
                path: path.to_path_buf(),
                reason: "path has no file name to use as a texture name".to_string(),
            })?;
        self.load_texture_named(path, name.clone())?;
        Ok(name)
    }

    /// Bake `atlas` against its texture and register it.
    ///
    /// The texture named after the atlas must already be loaded; its
    /// dimensions drive the bake. Registering a name again replaces the
    /// previous atlas.
    pub fn register_atlas(&mut self, mut atlas: Atlas) -> Result<(), AssetError> {
        let (width, height) = self.texture(atlas.name())?.size();
        atlas.bake(width, height)?;
        info!(
            "registered atlas {:?} with {} line(s)",
            atlas.name(),
            atlas.lines().len()
        );
        self.atlases.insert(atlas.name().to_string(), atlas);
        Ok(())
    }

    /// Get a texture by its name.
    pub fn texture(&self, name: impl AsRef<str>) -> Result<&Texture, AssetError> {
        let name = name.as_ref();
        self.textures
            .get(name)
            .ok_or_else(|| AssetError::TextureNotFound {
                name: name.to_string(),
            })
    }

    /// Get a registered (baked) atlas by its name.
    pub fn atlas(&self, name: impl AsRef<str>) -> Result<&Atlas, AssetError> {
        let name = name.as_ref();
        self.atlases
            .get(name)
            .ok_or_else(|| AssetError::AtlasNotFound {
                name: name.to_string(),
            })
    }

    /// Resolve the source rectangle for `frame` of `line` in `atlas`.
    pub fn resolve_frame(
        &self,
        atlas: impl AsRef<str>,
        line: impl AsRef<str>,
        frame: usize,
    ) -> Result<Rect, AssetError> {
        Ok(self.atlas(atlas)?.frame_rect(line, frame)?)
    }

    pub fn has_texture(&self, name: impl AsRef<str>) -> bool {
        self.textures.contains_key(name.as_ref())
    }

    pub fn has_atlas(&self, name: impl AsRef<str>) -> bool {
        self.atlases.contains_key(name.as_ref())
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    pub fn atlas_count(&self) -> usize {
        self.atlases.len()
    }

    /// Drop every texture and atlas.
    pub fn release_all(&mut self) {
        info!(
            "releasing {} texture(s) and {} atlas(es)",
            self.textures.len(),
            self.atlases.len()
        );
        self.textures.clear();
        self.atlases.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Backend that fabricates textures instead of reading files.
    ///
    /// A file stem like `128x32` picks the dimensions; anything else gets
    /// 256x64. A stem containing `missing` fails, standing in for an
    /// unreadable file.
    struct MockBackend;

    impl RenderBackend for MockBackend {
        fn load_texture(&mut self, path: &Path) -> Result<Texture, String> {
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default();
            if stem.contains("missing") {
                return Err(format!("no such file: {}", path.display()));
            }
            let (width, height) = stem
                .split_once('x')
                .and_then(|(w, h)| Some((w.parse().ok()?, h.parse().ok()?)))
                .unwrap_or((256u32, 64u32));
            Ok(Texture::from_image(image::RgbaImage::new(width, height)))
        }
    }

    /// Store with a 256x64 `"ships"` texture and a two-line atlas on it.
    fn store_256x64() -> AssetStore<MockBackend> {
        let mut store = AssetStore::with_backend(MockBackend);
        store.load_texture_named("ships.png", "ships").unwrap();
        let mut atlas = Atlas::new("ships");
        atlas.add_line("idle").unwrap().set_frames_count(8, false);
        atlas
            .add_line("thrust")
            .unwrap()
            .set_frame_width(32)
            .set_frames_count(0, true);
        store.register_atlas(atlas).unwrap();
        store
    }

    #[test]
    fn load_and_fetch_texture() {
        let mut store = AssetStore::with_backend(MockBackend);
        store.load_texture_named("ships.png", "ships").unwrap();
        assert!(store.has_texture("ships"));
        assert_eq!(store.texture("ships").unwrap().size(), (256, 64));
        assert_eq!(store.texture_count(), 1);
    }

    #[test]
    fn load_missing_file_reports_path() {
        let mut store = AssetStore::with_backend(MockBackend);
        let err = store
            .load_texture_named("sprites/missing.png", "x")
            .unwrap_err();
        match err {
            AssetError::ResourceLoad { path, .. } => {
                assert_eq!(path, Path::new("sprites/missing.png"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(store.texture_count(), 0);
    }

    #[test]
    fn load_defaults_name_to_file_name() {
        let mut store = AssetStore::with_backend(MockBackend);
        let name = store.load_texture("assets/ships.png").unwrap();
        assert_eq!(name, "ships.png");
        assert!(store.has_texture("ships.png"));
    }

    #[test]
    fn load_rejects_nameless_path() {
        let mut store = AssetStore::with_backend(MockBackend);
        assert!(matches!(
            store.load_texture(".."),
            Err(AssetError::ResourceLoad { .. })
        ));
    }

    #[test]
    fn reload_replaces_texture_in_place() {
        let mut store = AssetStore::with_backend(MockBackend);
        store.load_texture_named("256x64.png", "sheet").unwrap();
        store.load_texture_named("128x32.png", "sheet").unwrap();
        assert_eq!(store.texture_count(), 1);
        assert_eq!(store.texture("sheet").unwrap().size(), (128, 32));
    }

    #[test]
    fn register_atlas_requires_texture() {
        let mut store = AssetStore::with_backend(MockBackend);
        let atlas = Atlas::new("ghost");
        assert_eq!(
            store.register_atlas(atlas),
            Err(AssetError::TextureNotFound {
                name: "ghost".to_string()
            })
        );
    }

    #[test]
    fn register_atlas_bakes_against_texture() {
        let store = store_256x64();
        let atlas = store.atlas("ships").unwrap();
        assert!(atlas.is_baked());
        assert_eq!(atlas.line("idle").unwrap().frame_width(), 32);
        let thrust = atlas.line("thrust").unwrap();
        assert_eq!(thrust.frames_count(), 8);
        assert_eq!(thrust.y_offset(), 32);
    }

    #[test]
    fn register_atlas_propagates_bake_errors() {
        let mut store = AssetStore::with_backend(MockBackend);
        store.load_texture_named("bad.png", "bad").unwrap();
        let mut atlas = Atlas::new("bad");
        atlas.add_line("bare").unwrap();
        assert!(matches!(
            store.register_atlas(atlas),
            Err(AssetError::Atlas(_))
        ));
        assert!(!store.has_atlas("bad"));
    }

    #[test]
    fn resolve_frame_walks_the_line() {
        let store = store_256x64();
        let rect = store.resolve_frame("ships", "idle", 9).unwrap();
        // 9 wraps to column 1 of the top line.
        assert_eq!(rect, Rect::new(32, 0, 32, 32));
    }

    #[test]
    fn resolve_frame_reports_missing_atlas_and_line() {
        let store = store_256x64();
        assert_eq!(
            store.resolve_frame("ghost", "idle", 0),
            Err(AssetError::AtlasNotFound {
                name: "ghost".to_string()
            })
        );
        assert!(matches!(
            store.resolve_frame("ships", "ghost", 0),
            Err(AssetError::Atlas(_))
        ));
    }

    #[test]
    fn release_all_clears_everything() {
        let mut store = store_256x64();
        store.release_all();
        assert_eq!(store.texture_count(), 0);
        assert_eq!(store.atlas_count(), 0);
        // Releasing an empty store is a no-op.
        store.release_all();
        assert!(!store.has_texture("ships"));
    }
}
