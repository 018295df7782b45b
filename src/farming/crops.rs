//! Crop catalogue: growth stages, sprite placement, harvest yield.

use bevy::math::IRect;
use bevy::prelude::*;
use crate::shared::*;

pub fn max_stage(crop: CropKind) -> u8 {
    match crop {
        CropKind::Corn => 3,
        CropKind::Tomato => 3,
    }
}

/// Vertical nudge from the tile's bottom edge; taller crops sit higher.
pub fn y_offset(crop: CropKind) -> i32 {
    match crop {
        CropKind::Corn => -16,
        CropKind::Tomato => -8,
    }
}

pub fn harvest_item(crop: CropKind) -> ItemKind {
    match crop {
        CropKind::Corn => ItemKind::Corn,
        CropKind::Tomato => ItemKind::Tomato,
    }
}

pub fn crop_name(crop: CropKind) -> &'static str {
    match crop {
        CropKind::Corn => "corn",
        CropKind::Tomato => "tomato",
    }
}

/// Sprite size for a growth stage.
pub fn plant_size(crop: CropKind, stage: u8) -> IVec2 {
    let heights: [i32; 4] = match crop {
        CropKind::Corn => [32, 48, 64, 80],
        CropKind::Tomato => [32, 44, 56, 64],
    };
    IVec2::new(48, heights[(stage as usize).min(3)])
}

/// Render rect: bottom-centred on the tile, shifted by the crop's y offset.
pub fn plant_rect(tile: IVec2, crop: CropKind, stage: u8) -> IRect {
    let size = plant_size(crop, stage);
    let soil = rect_xywh(tile.x * TILE_SIZE, tile.y * TILE_SIZE, TILE_SIZE, TILE_SIZE);
    let midbottom = IVec2::new(soil.center_point().x, soil.bottom() + y_offset(crop));
    rect_xywh(0, 0, size.x, size.y).with_midbottom(midbottom)
}

/// Grown plants block movement; seedlings do not.
pub fn plant_collider(rect: IRect, stage: u8) -> Option<IRect> {
    (stage > 0).then(|| rect.inflated(-26, -(rect.height() as f32 * 0.4) as i32))
}

pub fn plant_depth(stage: u8) -> Depth {
    if stage > 0 {
        Depth::Main
    } else {
        Depth::GroundPlant
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plant_rect_sits_on_tile_bottom() {
        let rect = plant_rect(IVec2::new(2, 3), CropKind::Corn, 0);
        assert_eq!(rect.bottom(), 4 * TILE_SIZE - 16);
        assert_eq!(rect.center_point().x, 2 * TILE_SIZE + TILE_SIZE / 2);
        let tomato = plant_rect(IVec2::new(2, 3), CropKind::Tomato, 3);
        assert_eq!(tomato.bottom(), 4 * TILE_SIZE - 8);
        assert_eq!(tomato.height(), 64);
    }

    #[test]
    fn test_seedlings_have_no_collider() {
        let rect = plant_rect(IVec2::ZERO, CropKind::Corn, 0);
        assert!(plant_collider(rect, 0).is_none());
        assert_eq!(plant_depth(0), Depth::GroundPlant);

        let grown = plant_rect(IVec2::ZERO, CropKind::Corn, 2);
        let hitbox = plant_collider(grown, 2).unwrap();
        assert_eq!(hitbox.width(), grown.width() - 26);
        assert!(hitbox.height() < grown.height());
        assert_eq!(plant_depth(2), Depth::Main);
    }

    #[test]
    fn test_harvest_item_matches_crop() {
        assert_eq!(harvest_item(CropKind::Corn), ItemKind::Corn);
        assert_eq!(harvest_item(CropKind::Tomato), ItemKind::Tomato);
    }
}
