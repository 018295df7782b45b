//! Image folder scanning and the `GameAssets` handle table.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use bevy::prelude::*;

use crate::shared::*;

/// Image files directly inside `root/rel`, as asset paths relative to `root`.
/// Numeric file stems sort numerically (`2.png` before `10.png`).
/// A missing or empty folder is an error.
pub fn import_folder(root: &Path, rel: &str) -> Result<Vec<String>, String> {
    let mut names = image_names(root, rel)?;
    names.sort_by(|a, b| {
        let key = |name: &str| {
            let stem = Path::new(name)
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_string();
            (stem.parse::<u32>().unwrap_or(u32::MAX), stem)
        };
        key(a).cmp(&key(b))
    });
    Ok(names.into_iter().map(|name| format!("{rel}/{name}")).collect())
}

/// File stem -> asset path for every image directly inside `root/rel`.
pub fn import_folder_dict(root: &Path, rel: &str) -> Result<HashMap<String, String>, String> {
    let names = image_names(root, rel)?;
    Ok(names
        .into_iter()
        .filter_map(|name| {
            let stem = Path::new(&name).file_stem()?.to_str()?.to_string();
            Some((stem, format!("{rel}/{name}")))
        })
        .collect())
}

fn image_names(root: &Path, rel: &str) -> Result<Vec<String>, String> {
    let dir = root.join(rel);
    let entries = fs::read_dir(&dir).map_err(|e| format!("read folder {}: {e}", dir.display()))?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| format!("read folder {}: {e}", dir.display()))?;
        let path = entry.path();
        let is_image = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("png"));
        if is_image && path.is_file() {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                names.push(name.to_string());
            }
        }
    }
    if names.is_empty() {
        return Err(format!("no images in {}", dir.display()));
    }
    Ok(names)
}

fn require_file(root: &Path, rel: &str) -> Result<String, String> {
    if root.join(rel).is_file() {
        Ok(rel.to_string())
    } else {
        Err(format!("missing asset {}", root.join(rel).display()))
    }
}

/// Asset paths for everything the simulation draws, checked on disk.
/// Turned into handles by [`GameAssets::from_manifest`].
#[derive(Debug, Clone, Default)]
pub struct AssetManifest {
    pub player: HashMap<String, Vec<String>>,
    pub water: Vec<String>,
    pub soil: HashMap<String, String>,
    pub soil_water: Vec<String>,
    pub crops: HashMap<CropKind, Vec<String>>,
    pub rain_drops: Vec<String>,
    pub rain_floor: Vec<String>,
    pub apple: String,
    pub stumps: HashMap<TreeSize, String>,
    pub ground: String,
    pub map_images: Vec<String>,
}

impl AssetManifest {
    pub fn scan(root: &Path, map: &MapData) -> Result<Self, String> {
        let mut player = HashMap::new();
        for status in PlayerStatus::all() {
            let key = status.key();
            let frames = import_folder(root, &format!("graphics/character/{key}"))?;
            player.insert(key, frames);
        }

        let mut crops = HashMap::new();
        crops.insert(CropKind::Corn, import_folder(root, "graphics/fruit/corn")?);
        crops.insert(CropKind::Tomato, import_folder(root, "graphics/fruit/tomato")?);

        let mut stumps = HashMap::new();
        stumps.insert(TreeSize::Small, require_file(root, "graphics/stumps/small.png")?);
        stumps.insert(TreeSize::Large, require_file(root, "graphics/stumps/large.png")?);

        let map_images = map
            .image_paths()
            .into_iter()
            .map(|path| require_file(root, &path))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            player,
            water: import_folder(root, "graphics/water")?,
            soil: import_folder_dict(root, "graphics/soil")?,
            soil_water: import_folder(root, "graphics/soil_water")?,
            crops,
            rain_drops: import_folder(root, "graphics/rain/drops")?,
            rain_floor: import_folder(root, "graphics/rain/floor")?,
            apple: require_file(root, "graphics/fruit/apple.png")?,
            stumps,
            ground: require_file(root, "graphics/world/ground.png")?,
            map_images,
        })
    }
}

impl GameAssets {
    pub fn from_manifest(manifest: &AssetManifest, asset_server: &AssetServer) -> Self {
        let load_all = |paths: &[String]| -> Vec<Handle<Image>> {
            paths.iter().map(|p| asset_server.load(p.clone())).collect()
        };
        Self {
            player: manifest
                .player
                .iter()
                .map(|(key, paths)| (key.clone(), load_all(paths)))
                .collect(),
            water: load_all(&manifest.water),
            soil: manifest
                .soil
                .iter()
                .map(|(name, path)| (name.clone(), asset_server.load(path.clone())))
                .collect(),
            soil_water: load_all(&manifest.soil_water),
            crops: manifest
                .crops
                .iter()
                .map(|(crop, paths)| (*crop, load_all(paths)))
                .collect(),
            rain_drops: load_all(&manifest.rain_drops),
            rain_floor: load_all(&manifest.rain_floor),
            apple: asset_server.load(manifest.apple.clone()),
            stumps: manifest
                .stumps
                .iter()
                .map(|(size, path)| (*size, asset_server.load(path.clone())))
                .collect(),
            ground: asset_server.load(manifest.ground.clone()),
            images: manifest
                .map_images
                .iter()
                .map(|path| (path.clone(), asset_server.load(path.clone())))
                .collect(),
        }
    }

    /// Map image by path; the default handle when unknown.
    pub fn image(&self, path: Option<&str>) -> Handle<Image> {
        path.and_then(|p| self.images.get(p))
            .cloned()
            .unwrap_or_default()
    }

    pub fn player_frames(&self, status: &PlayerStatus) -> &[Handle<Image>] {
        self.player
            .get(&status.key())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn crop_frame(&self, crop: CropKind, stage: u8) -> Handle<Image> {
        self.crops
            .get(&crop)
            .and_then(|frames| frames.get(stage as usize))
            .cloned()
            .unwrap_or_default()
    }

    pub fn soil_tile(&self, variant: &str) -> Handle<Image> {
        self.soil.get(variant).cloned().unwrap_or_default()
    }

    pub fn stump(&self, size: TreeSize) -> Handle<Image> {
        self.stumps.get(&size).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, rel: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_import_folder_orders_numerically() {
        let root = tempfile::tempdir().unwrap();
        for name in ["10.png", "2.png", "0.png", "1.png", "notes.txt"] {
            touch(root.path(), &format!("graphics/water/{name}"));
        }
        let frames = import_folder(root.path(), "graphics/water").unwrap();
        assert_eq!(
            frames,
            vec![
                "graphics/water/0.png",
                "graphics/water/1.png",
                "graphics/water/2.png",
                "graphics/water/10.png",
            ]
        );
    }

    #[test]
    fn test_import_folder_missing_is_error() {
        let root = tempfile::tempdir().unwrap();
        let err = import_folder(root.path(), "graphics/nothing").unwrap_err();
        assert!(err.starts_with("read folder"));
    }

    #[test]
    fn test_import_folder_empty_is_error() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir_all(root.path().join("graphics/empty")).unwrap();
        let err = import_folder(root.path(), "graphics/empty").unwrap_err();
        assert!(err.starts_with("no images"));
    }

    #[test]
    fn test_import_folder_dict_keys_by_stem() {
        let root = tempfile::tempdir().unwrap();
        for name in ["lr.png", "o.png", "tbr.png"] {
            touch(root.path(), &format!("graphics/soil/{name}"));
        }
        let dict = import_folder_dict(root.path(), "graphics/soil").unwrap();
        assert_eq!(dict.len(), 3);
        assert_eq!(dict["lr"], "graphics/soil/lr.png");
    }

    #[test]
    fn test_scan_reports_first_missing_folder() {
        let root = tempfile::tempdir().unwrap();
        let err = AssetManifest::scan(root.path(), &MapData::generate_farm()).unwrap_err();
        assert!(err.contains("graphics/character"));
    }

    #[test]
    fn test_unknown_lookups_fall_back_to_default_handle() {
        let assets = GameAssets::default();
        assert_eq!(assets.image(Some("graphics/none.png")), Handle::default());
        assert_eq!(assets.crop_frame(CropKind::Corn, 9), Handle::default());
        assert!(assets.player_frames(&PlayerStatus::default()).is_empty());
    }
}
