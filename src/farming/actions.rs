//! Tool-driven player actions on individual tiles.
//!
//! Every handler validates up front and either applies its full effect or
//! emits a typed rejection; no action leaves a tile half-updated.

use bevy::prelude::*;

use super::{area_of, sale_value, yield_of};
use crate::shared::*;

/// Months-remaining advisory for any tool used on a damaged tile.
fn reject_damaged(rejected: &mut EventWriter<ActionRejectedEvent>, tile: &Tile) {
    rejected.send(ActionRejectedEvent {
        kind: RejectionKind::InvalidTarget,
        message: format!(
            "Land damaged by earthquake. Repairs in {} months.",
            tile.recovery_months
        ),
    });
}

// ─────────────────────────────────────────────────────────────────────────────
// Buy locked tile
// ─────────────────────────────────────────────────────────────────────────────

/// Individual locked tiles inside an owned area sell for LAND_COST.
pub fn handle_buy_tile(
    mut events: EventReader<BuyTileEvent>,
    mut farm: ResMut<FarmState>,
    player: Res<PlayerState>,
    unlocked: Res<UnlockedAreas>,
    mut money: EventWriter<MoneyChangeEvent>,
    mut toasts: EventWriter<ToastEvent>,
    mut rejected: EventWriter<ActionRejectedEvent>,
) {
    for ev in events.read() {
        let Some(tile) = farm.tiles.get_mut(ev.tile) else {
            continue;
        };
        if !tile.is_locked {
            continue; // already owned — stale click
        }
        if !unlocked.contains(area_of(ev.tile)) {
            rejected.send(ActionRejectedEvent {
                kind: RejectionKind::InvalidTarget,
                message: "Unlock the area first!".to_string(),
            });
            continue;
        }
        if player.money < LAND_COST {
            rejected.send(ActionRejectedEvent {
                kind: RejectionKind::InsufficientFunds {
                    needed: LAND_COST,
                    have: player.money,
                },
                message: format!("Land costs ${}", LAND_COST),
            });
            continue;
        }

        tile.is_locked = false;
        tile.moisture = 50;
        money.send(MoneyChangeEvent {
            amount: -(LAND_COST as i64),
            reason: format!("tile {} purchased", ev.tile),
        });
        toasts.send(ToastEvent {
            message: "New land purchased!".to_string(),
        });
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Plant
// ─────────────────────────────────────────────────────────────────────────────

/// Plants one seed on an empty tile, enforcing the golden-orchard
/// exclusivity rule both ways.
pub fn handle_plant_seed(
    mut events: EventReader<PlantSeedEvent>,
    mut farm: ResMut<FarmState>,
    mut inventory: ResMut<Inventory>,
    crops: Res<CropRegistry>,
    unlocked: Res<UnlockedAreas>,
    mut planted: EventWriter<CropPlantedEvent>,
    mut toasts: EventWriter<ToastEvent>,
    mut rejected: EventWriter<ActionRejectedEvent>,
) {
    for ev in events.read() {
        let Some(tile) = farm.tiles.get_mut(ev.tile) else {
            continue;
        };
        if !unlocked.contains(area_of(ev.tile)) {
            rejected.send(ActionRejectedEvent {
                kind: RejectionKind::InvalidTarget,
                message: "Unlock the area first!".to_string(),
            });
            continue;
        }
        if tile.is_locked {
            rejected.send(ActionRejectedEvent {
                kind: RejectionKind::InvalidTarget,
                message: "Buy this land first.".to_string(),
            });
            continue;
        }
        if tile.state == TileState::Damaged {
            reject_damaged(&mut rejected, tile);
            continue;
        }
        if tile.state != TileState::Empty {
            rejected.send(ActionRejectedEvent {
                kind: RejectionKind::InvalidTarget,
                message: "Clear the land first!".to_string(),
            });
            continue;
        }

        let Some(crop) = crops.get(&ev.seed_id) else {
            warn!("[Farming] Plant request for unknown crop id {:?}", ev.seed_id);
            rejected.send(ActionRejectedEvent {
                kind: RejectionKind::UnknownId,
                message: format!("Unknown seed {:?}", ev.seed_id),
            });
            continue;
        };
        if crop.category != ItemCategory::Seed {
            rejected.send(ActionRejectedEvent {
                kind: RejectionKind::InvalidTarget,
                message: format!("{} is not plantable.", crop.name),
            });
            continue;
        }

        let area = area_of(ev.tile);
        if ev.seed_id == GOLDEN_APPLE_SEED && area != GOLDEN_AREA {
            rejected.send(ActionRejectedEvent {
                kind: RejectionKind::InvalidTarget,
                message: "Golden Apples only grow in the Golden Orchard!".to_string(),
            });
            continue;
        }
        if area == GOLDEN_AREA && ev.seed_id != GOLDEN_APPLE_SEED {
            rejected.send(ActionRejectedEvent {
                kind: RejectionKind::InvalidTarget,
                message: "Only Golden Apples grow in this mystic soil!".to_string(),
            });
            continue;
        }

        if !inventory.try_remove(&ev.seed_id, 1) {
            rejected.send(ActionRejectedEvent {
                kind: RejectionKind::InsufficientItems {
                    item_id: ev.seed_id.clone(),
                    needed: 1,
                    have: 0,
                },
                message: "Out of seeds! Buy more.".to_string(),
            });
            continue;
        }

        tile.state = TileState::Seeded;
        tile.crop_id = Some(ev.seed_id.clone());
        tile.growth_progress = 0;
        tile.is_watered = false;
        tile.moisture = tile.moisture.max(PLANTING_MOISTURE_FLOOR);
        tile.shelf_life = 0;
        tile.note = None;

        planted.send(CropPlantedEvent {
            tile: ev.tile,
            seed_id: ev.seed_id.clone(),
        });
        toasts.send(ToastEvent {
            message: format!("{} planted.", crop.name),
        });
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Water
// ─────────────────────────────────────────────────────────────────────────────

/// Pumped water costs money and tops up one tile's moisture.
pub fn handle_water_tile(
    mut events: EventReader<WaterTileEvent>,
    mut farm: ResMut<FarmState>,
    player: Res<PlayerState>,
    mut money: EventWriter<MoneyChangeEvent>,
    mut watered: EventWriter<TileWateredEvent>,
    mut toasts: EventWriter<ToastEvent>,
    mut rejected: EventWriter<ActionRejectedEvent>,
) {
    for ev in events.read() {
        let Some(tile) = farm.tiles.get_mut(ev.tile) else {
            continue;
        };
        if tile.state == TileState::Damaged {
            reject_damaged(&mut rejected, tile);
            continue;
        }
        if matches!(tile.state, TileState::Empty | TileState::Dead) {
            rejected.send(ActionRejectedEvent {
                kind: RejectionKind::InvalidTarget,
                message: "Nothing here needs water.".to_string(),
            });
            continue;
        }
        if tile.moisture >= MAX_MOISTURE {
            toasts.send(ToastEvent {
                message: "Soil is already soaked!".to_string(),
            });
            continue;
        }
        if player.money < WATER_COST {
            rejected.send(ActionRejectedEvent {
                kind: RejectionKind::InsufficientFunds {
                    needed: WATER_COST,
                    have: player.money,
                },
                message: "Not enough money to pump water!".to_string(),
            });
            continue;
        }

        tile.moisture = (tile.moisture + WATER_AMOUNT).min(MAX_MOISTURE);
        tile.is_watered = true;
        tile.note = None;
        money.send(MoneyChangeEvent {
            amount: -(WATER_COST as i64),
            reason: format!("watered tile {}", ev.tile),
        });
        watered.send(TileWateredEvent { tile: ev.tile });
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Harvest (hand)
// ─────────────────────────────────────────────────────────────────────────────

/// Moves the mature plant's yield into the inventory and frees the tile.
pub fn handle_harvest(
    mut events: EventReader<HarvestTileEvent>,
    mut farm: ResMut<FarmState>,
    mut inventory: ResMut<Inventory>,
    crops: Res<CropRegistry>,
    mut harvested: EventWriter<CropHarvestedEvent>,
    mut toasts: EventWriter<ToastEvent>,
    mut rejected: EventWriter<ActionRejectedEvent>,
) {
    for ev in events.read() {
        let Some(tile) = farm.tiles.get_mut(ev.tile) else {
            continue;
        };
        if tile.state == TileState::Damaged {
            reject_damaged(&mut rejected, tile);
            continue;
        }
        if tile.state != TileState::Mature {
            rejected.send(ActionRejectedEvent {
                kind: RejectionKind::InvalidTarget,
                message: "Nothing to harvest here.".to_string(),
            });
            continue;
        }
        let Some(seed_id) = tile.crop_id.clone() else {
            continue;
        };
        let Some(seed) = crops.get(&seed_id) else {
            warn!("[Farming] Mature tile {} holds unknown crop {:?}", ev.tile, seed_id);
            continue;
        };
        let yield_id = yield_of(seed);
        let Some(produce) = crops.get(&yield_id) else {
            warn!("[Farming] Yield {:?} missing from catalog", yield_id);
            continue;
        };

        inventory.add(&yield_id, 1);
        tile.reset();
        harvested.send(CropHarvestedEvent {
            seed_id,
            yield_id: yield_id.clone(),
            quantity: 1,
        });
        toasts.send(ToastEvent {
            message: format!("Harvested {}!", produce.name),
        });
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sell (sell tool)
// ─────────────────────────────────────────────────────────────────────────────

/// Sells the mature plant straight off the tile for cash instead of
/// harvesting it. Golden apples fetch the live market spot.
pub fn handle_sell_crop(
    mut events: EventReader<SellCropEvent>,
    mut farm: ResMut<FarmState>,
    crops: Res<CropRegistry>,
    market: Res<MarketState>,
    mut money: EventWriter<MoneyChangeEvent>,
    mut sold: EventWriter<ItemSoldEvent>,
    mut toasts: EventWriter<ToastEvent>,
    mut rejected: EventWriter<ActionRejectedEvent>,
) {
    for ev in events.read() {
        let Some(tile) = farm.tiles.get_mut(ev.tile) else {
            continue;
        };
        if tile.state == TileState::Damaged {
            reject_damaged(&mut rejected, tile);
            continue;
        }
        if tile.state != TileState::Mature {
            rejected.send(ActionRejectedEvent {
                kind: RejectionKind::InvalidTarget,
                message: "Only mature crops can be sold off the field.".to_string(),
            });
            continue;
        }
        let Some(seed_id) = tile.crop_id.clone() else {
            continue;
        };
        let Some(seed) = crops.get(&seed_id) else {
            warn!("[Farming] Mature tile {} holds unknown crop {:?}", ev.tile, seed_id);
            continue;
        };
        let Some(revenue) = sale_value(seed, &crops, market.price) else {
            warn!("[Farming] Yield for {:?} missing from catalog", seed_id);
            continue;
        };

        let yield_id = yield_of(seed);
        tile.reset();
        money.send(MoneyChangeEvent {
            amount: revenue as i64,
            reason: format!("sold {} off tile {}", yield_id, ev.tile),
        });
        sold.send(ItemSoldEvent {
            item_id: yield_id,
            quantity: 1,
        });
        toasts.send(ToastEvent {
            message: format!("Sold for ${}", revenue),
        });
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Clear (shovel)
// ─────────────────────────────────────────────────────────────────────────────

/// Shovel: clears dead plants. An empty tile carrying a leftover advisory
/// note also counts as clearable (the shovel just wipes the note).
pub fn handle_clear_tile(
    mut events: EventReader<ClearTileEvent>,
    mut farm: ResMut<FarmState>,
    mut rejected: EventWriter<ActionRejectedEvent>,
) {
    for ev in events.read() {
        let Some(tile) = farm.tiles.get_mut(ev.tile) else {
            continue;
        };
        if tile.state == TileState::Damaged {
            reject_damaged(&mut rejected, tile);
            continue;
        }
        let note_only = tile.state == TileState::Empty && tile.note.is_some();
        if tile.state != TileState::Dead && !note_only {
            rejected.send(ActionRejectedEvent {
                kind: RejectionKind::InvalidTarget,
                message: "Nothing to clear here.".to_string(),
            });
            continue;
        }
        tile.reset();
    }
}
