//! Soil grid state machine: till, water, plant, grow, harvest.
//!
//! Every operation takes a tile coordinate and is a no-op outside the grid
//! or when the cell is not in the required state.

use bevy::prelude::*;
use crate::shared::*;

use super::crops::max_stage;

impl SoilGrid {
    pub fn new(width: i32, height: i32) -> Self {
        let len = (width.max(0) * height.max(0)) as usize;
        Self {
            width: width.max(0),
            height: height.max(0),
            cells: vec![SoilCell::default(); len],
        }
    }

    /// Grid sized to the map with every listed tile marked farmable.
    pub fn from_farmable(width: i32, height: i32, farmable: impl IntoIterator<Item = IVec2>) -> Self {
        let mut grid = Self::new(width, height);
        for tile in farmable {
            if let Some(cell) = grid.cell_mut(tile) {
                cell.farmable = true;
            }
        }
        grid
    }

    /// Tile under a world-pixel point.
    pub fn tile_at(point: IVec2) -> IVec2 {
        IVec2::new(point.x.div_euclid(TILE_SIZE), point.y.div_euclid(TILE_SIZE))
    }

    fn index(&self, tile: IVec2) -> Option<usize> {
        if tile.x < 0 || tile.y < 0 || tile.x >= self.width || tile.y >= self.height {
            return None;
        }
        Some((tile.y * self.width + tile.x) as usize)
    }

    pub fn cell(&self, tile: IVec2) -> Option<&SoilCell> {
        self.index(tile).map(|i| &self.cells[i])
    }

    fn cell_mut(&mut self, tile: IVec2) -> Option<&mut SoilCell> {
        self.index(tile).map(move |i| &mut self.cells[i])
    }

    pub fn is_tilled(&self, tile: IVec2) -> bool {
        self.cell(tile).is_some_and(|c| c.tilled)
    }

    /// Farmable and not yet tilled -> tilled. Returns whether anything changed.
    pub fn till(&mut self, tile: IVec2) -> bool {
        match self.cell_mut(tile) {
            Some(cell) if cell.farmable && !cell.tilled => {
                cell.tilled = true;
                true
            }
            _ => false,
        }
    }

    /// Tilled and dry -> watered.
    pub fn water(&mut self, tile: IVec2) -> bool {
        match self.cell_mut(tile) {
            Some(cell) if cell.tilled && !cell.watered => {
                cell.watered = true;
                true
            }
            _ => false,
        }
    }

    /// Waters every tilled tile. Returns how many were newly watered.
    pub fn water_all(&mut self) -> usize {
        let mut count = 0;
        for cell in self.cells.iter_mut().filter(|c| c.tilled && !c.watered) {
            cell.watered = true;
            count += 1;
        }
        count
    }

    /// Tilled and empty -> planted at stage 0.
    pub fn plant(&mut self, tile: IVec2, crop: CropKind) -> bool {
        match self.cell_mut(tile) {
            Some(cell) if cell.tilled && cell.plant.is_none() => {
                cell.plant = Some(PlantState {
                    crop,
                    stage: 0,
                    harvestable: false,
                });
                true
            }
            _ => false,
        }
    }

    /// Every plant on a watered tile grows one stage, capped at its max stage.
    /// Must run before `clear_water` in a day reset.
    pub fn advance_growth(&mut self) {
        for cell in self.cells.iter_mut().filter(|c| c.watered) {
            if let Some(plant) = cell.plant.as_mut() {
                let max = max_stage(plant.crop);
                plant.stage = (plant.stage + 1).min(max);
                if plant.stage >= max {
                    plant.harvestable = true;
                }
            }
        }
    }

    pub fn clear_water(&mut self) {
        for cell in &mut self.cells {
            cell.watered = false;
        }
    }

    /// Removes a harvestable plant and returns its crop. The tile stays tilled.
    pub fn harvest(&mut self, tile: IVec2) -> Option<CropKind> {
        let cell = self.cell_mut(tile)?;
        match cell.plant {
            Some(plant) if plant.harvestable => {
                cell.plant = None;
                Some(plant.crop)
            }
            _ => None,
        }
    }

    /// Coordinates of every cell, row-major.
    pub fn tiles(&self) -> impl Iterator<Item = (IVec2, &SoilCell)> {
        let width = self.width.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (IVec2::new(i as i32 % width, i as i32 / width), cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> SoilGrid {
        SoilGrid::from_farmable(8, 8, [IVec2::new(2, 2), IVec2::new(3, 2), IVec2::new(2, 3)])
    }

    #[test]
    fn test_till_requires_farmable() {
        let mut grid = field();
        assert!(!grid.till(IVec2::new(0, 0)));
        assert!(grid.till(IVec2::new(2, 2)));
        assert!(!grid.till(IVec2::new(2, 2)), "already tilled");
        assert!(grid.is_tilled(IVec2::new(2, 2)));
    }

    #[test]
    fn test_out_of_range_is_noop() {
        let mut grid = field();
        let before = grid.clone();
        for tile in [IVec2::new(-1, 0), IVec2::new(8, 0), IVec2::new(0, 99)] {
            assert!(!grid.till(tile));
            assert!(!grid.water(tile));
            assert!(!grid.plant(tile, CropKind::Corn));
            assert!(grid.harvest(tile).is_none());
            assert!(grid.cell(tile).is_none());
        }
        assert_eq!(grid, before);
    }

    #[test]
    fn test_water_and_plant_need_tilled_soil() {
        let mut grid = field();
        let tile = IVec2::new(2, 2);
        assert!(!grid.water(tile));
        assert!(!grid.plant(tile, CropKind::Tomato));
        grid.till(tile);
        assert!(grid.water(tile));
        assert!(!grid.water(tile), "already watered");
        assert!(grid.plant(tile, CropKind::Tomato));
        assert!(!grid.plant(tile, CropKind::Corn), "occupied");
        assert_eq!(grid.cell(tile).unwrap().plant.unwrap().crop, CropKind::Tomato);
    }

    #[test]
    fn test_water_all_is_idempotent() {
        let mut grid = field();
        grid.till(IVec2::new(2, 2));
        grid.till(IVec2::new(3, 2));
        assert_eq!(grid.water_all(), 2);
        assert_eq!(grid.water_all(), 0);
        assert!(!grid.cell(IVec2::new(2, 3)).unwrap().watered, "untilled stays dry");
    }

    #[test]
    fn test_growth_only_on_watered_tiles() {
        let mut grid = field();
        let wet = IVec2::new(2, 2);
        let dry = IVec2::new(3, 2);
        for tile in [wet, dry] {
            grid.till(tile);
            grid.plant(tile, CropKind::Corn);
        }
        grid.water(wet);
        grid.advance_growth();
        grid.clear_water();
        assert_eq!(grid.cell(wet).unwrap().plant.unwrap().stage, 1);
        assert_eq!(grid.cell(dry).unwrap().plant.unwrap().stage, 0);
        assert!(grid.cells.iter().all(|c| !c.watered));
    }

    #[test]
    fn test_growth_caps_and_marks_harvestable() {
        let mut grid = field();
        let tile = IVec2::new(2, 2);
        grid.till(tile);
        grid.plant(tile, CropKind::Corn);
        for day in 1..=5u8 {
            grid.water(tile);
            grid.advance_growth();
            grid.clear_water();
            let plant = grid.cell(tile).unwrap().plant.unwrap();
            assert_eq!(plant.stage, day.min(max_stage(CropKind::Corn)));
            assert_eq!(plant.harvestable, day >= max_stage(CropKind::Corn));
        }
    }

    #[test]
    fn test_harvest_only_when_ripe() {
        let mut grid = field();
        let tile = IVec2::new(2, 2);
        grid.till(tile);
        grid.plant(tile, CropKind::Tomato);
        assert_eq!(grid.harvest(tile), None);
        for _ in 0..max_stage(CropKind::Tomato) {
            grid.water(tile);
            grid.advance_growth();
        }
        assert_eq!(grid.harvest(tile), Some(CropKind::Tomato));
        assert!(grid.cell(tile).unwrap().plant.is_none());
        assert!(grid.is_tilled(tile));
    }

    #[test]
    fn test_tile_at_floors_negative_points() {
        assert_eq!(SoilGrid::tile_at(IVec2::new(130, 64)), IVec2::new(2, 1));
        assert_eq!(SoilGrid::tile_at(IVec2::new(-1, 63)), IVec2::new(-1, 0));
    }

    #[test]
    fn test_tiles_are_row_major() {
        let grid = SoilGrid::new(3, 2);
        let coords: Vec<IVec2> = grid.tiles().map(|(t, _)| t).collect();
        assert_eq!(coords[4], IVec2::new(1, 1));
        assert_eq!(coords.len(), 6);
    }
}
