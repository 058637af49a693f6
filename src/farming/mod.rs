//! Farming domain — the tile grid, player tools, and the monthly
//! per-tile transition including the automation intercepts.
//!
//! Communicates with other domains exclusively through crate::shared
//! events/resources.

use bevy::prelude::*;

use crate::shared::*;

pub mod actions;
pub mod advance;

pub struct FarmingPlugin;

impl Plugin for FarmingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                actions::handle_buy_tile,
                actions::handle_plant_seed,
                actions::handle_water_tile,
                actions::handle_harvest,
                actions::handle_sell_crop,
                actions::handle_clear_tile,
            )
                .run_if(in_state(GameState::Playing)),
        )
        .add_systems(
            Update,
            advance::on_month_end.in_set(MonthEndSet::Tiles),
        );
    }
}

/// Area a tile id belongs to.
pub fn area_of(tile_id: usize) -> usize {
    tile_id / TILES_PER_AREA
}

/// The item a mature plant of `seed` hands over on harvest.
pub fn yield_of(seed: &CropDef) -> ItemId {
    seed.harvest_id.clone().unwrap_or_else(|| seed.id.clone())
}

/// Cash value of harvesting-and-selling a mature plant of `seed` in one
/// motion: market spot for the golden apple, fixed produce price
/// otherwise. None when the yield item is missing from the catalog.
pub fn sale_value(seed: &CropDef, crops: &CropRegistry, spot: u32) -> Option<u32> {
    if seed.id == GOLDEN_APPLE_SEED {
        return Some(spot);
    }
    crops.get(&yield_of(seed)).map(|produce| produce.sell_price)
}

/// Clamped moisture arithmetic; every moisture write funnels through this.
pub fn apply_moisture(moisture: u32, delta: i64) -> u32 {
    (moisture as i64 + delta).clamp(0, MAX_MOISTURE as i64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_of() {
        assert_eq!(area_of(0), 0);
        assert_eq!(area_of(11), 0);
        assert_eq!(area_of(12), 1);
        assert_eq!(area_of(47), 3);
    }

    #[test]
    fn test_apply_moisture_clamps() {
        assert_eq!(apply_moisture(10, -30), 0);
        assert_eq!(apply_moisture(90, 50), MAX_MOISTURE);
        assert_eq!(apply_moisture(50, -10), 40);
    }
}
