//! The monthly per-tile transition.
//!
//! Rule priority, first match wins (per tile):
//!   1. drone intercept (mature tiles in drone areas are harvested/sold)
//!   2. seeder intercept (empty tiles in seeder areas are planted)
//!   3. damaged recovery countdown
//!   4. new earthquake damage
//!   5. dead/empty passive evaporation
//!   6. mature decay (golden apples get a shelf-life grace)
//!   7. seasonal kill for growing crops
//!   8. moisture update & growth
//!
//! Tiles claimed by an intercept skip every later rule for the month.
//! All of this is plain functions over FarmState so the rules can be
//! tested one by one; `on_month_end` is the thin system wrapper.

use bevy::prelude::*;
use rand::Rng;
use std::collections::HashSet;

use super::{apply_moisture, sale_value, yield_of};
use crate::shared::*;

/// Everything the tile pass needs to know about the month being entered.
pub struct MonthContext<'a> {
    pub season: Season,
    /// Weather rolled for the new month.
    pub weather: Weather,
    /// Weather of the month that just ended; drought withering reads this.
    pub previous_weather: Weather,
    pub casualties: &'a [usize],
    /// Tiles already consumed by drones or seeders this month.
    pub claimed: &'a HashSet<usize>,
}

/// What the standard rule pass did, for event emission and toasts.
#[derive(Debug, Default)]
pub struct TileReport {
    /// (tile, seed id) pairs that reached maturity this month.
    pub matured: Vec<(usize, ItemId)>,
    pub recovered: Vec<usize>,
    pub damaged: Vec<usize>,
    pub died: Vec<usize>,
    /// Catalog misses found mid-pass — data inconsistencies.
    pub unknown_crops: Vec<ItemId>,
}

/// Drone pass results.
#[derive(Debug, Default)]
pub struct DroneReport {
    /// (seed id, yield id, revenue) for auto-sell mode.
    pub sold: Vec<(ItemId, ItemId, u32)>,
    /// (seed id, yield id) for store mode.
    pub stored: Vec<(ItemId, ItemId)>,
    pub claimed: Vec<usize>,
}

/// Seeder pass results.
#[derive(Debug, Default)]
pub struct SeederReport {
    pub planted: Vec<(usize, ItemId)>,
    pub claimed: Vec<usize>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Earthquake targeting
// ─────────────────────────────────────────────────────────────────────────────

/// Pick this month's quake casualties: 1 tile, or 2 with 30% probability,
/// drawn uniformly without replacement from owned, undamaged land.
pub fn select_quake_casualties(
    rng: &mut impl Rng,
    farm: &FarmState,
    unlocked: &UnlockedAreas,
) -> Vec<usize> {
    let mut eligible: Vec<usize> = farm
        .tiles
        .iter()
        .filter(|t| {
            unlocked.contains(t.area()) && !t.is_locked && t.state != TileState::Damaged
        })
        .map(|t| t.id)
        .collect();

    let count = if rng.gen::<f64>() > 0.7 { 2 } else { 1 };
    let mut picked = Vec::new();
    for _ in 0..count {
        if eligible.is_empty() {
            break;
        }
        let idx = rng.gen_range(0..eligible.len());
        picked.push(eligible.swap_remove(idx));
    }
    picked
}

// ─────────────────────────────────────────────────────────────────────────────
// Intercept 1: drones
// ─────────────────────────────────────────────────────────────────────────────

/// Harvest every mature tile in each drone-enabled area before the
/// standard rules run — a tile the drone claims never gets to rot.
pub fn run_drones(
    farm: &mut FarmState,
    automation: &AreaAutomation,
    crops: &CropRegistry,
    spot: u32,
    inventory: &mut Inventory,
) -> DroneReport {
    let mut report = DroneReport::default();

    for tile in farm.tiles.iter_mut() {
        if tile.is_locked || tile.state != TileState::Mature {
            continue;
        }
        let Some(config) = automation.configs.get(tile.area()) else {
            continue;
        };
        if !config.drone_active() {
            continue;
        }
        let Some(seed_id) = tile.crop_id.clone() else {
            continue;
        };
        let Some(seed) = crops.get(&seed_id) else {
            continue;
        };
        let yield_id = yield_of(seed);

        if config.auto_sell {
            let Some(revenue) = sale_value(seed, crops, spot) else {
                continue;
            };
            report.sold.push((seed_id, yield_id, revenue));
        } else {
            inventory.add(&yield_id, 1);
            report.stored.push((seed_id, yield_id));
        }
        report.claimed.push(tile.id);
        tile.reset();
    }
    report
}

// ─────────────────────────────────────────────────────────────────────────────
// Intercept 2: seeders
// ─────────────────────────────────────────────────────────────────────────────

/// Plant each empty tile in a seeder-enabled area with the configured
/// seed, exactly as manual planting would. Tiles picked for earthquake
/// damage this month are left alone so the damage still lands.
pub fn run_seeders(
    farm: &mut FarmState,
    automation: &AreaAutomation,
    crops: &CropRegistry,
    inventory: &mut Inventory,
    casualties: &[usize],
) -> SeederReport {
    let mut report = SeederReport::default();

    for tile in farm.tiles.iter_mut() {
        if tile.is_locked || tile.state != TileState::Empty {
            continue;
        }
        if casualties.contains(&tile.id) {
            continue;
        }
        let Some(config) = automation.configs.get(tile.area()) else {
            continue;
        };
        if !config.seeder_active() {
            continue;
        }
        let Some(seed_id) = config.seeder_seed_id.clone() else {
            continue;
        };
        if crops.get(&seed_id).is_none() {
            continue;
        }
        if !inventory.try_remove(&seed_id, 1) {
            continue; // hopper ran dry — tile stays empty this month
        }

        tile.state = TileState::Seeded;
        tile.crop_id = Some(seed_id.clone());
        tile.growth_progress = 0;
        tile.is_watered = false;
        tile.moisture = tile.moisture.max(PLANTING_MOISTURE_FLOOR);
        tile.shelf_life = 0;
        tile.note = None;

        report.planted.push((tile.id, seed_id));
        report.claimed.push(tile.id);
    }
    report
}

// ─────────────────────────────────────────────────────────────────────────────
// Standard rule pass
// ─────────────────────────────────────────────────────────────────────────────

/// Apply rules 3-8 to every tile not claimed by an intercept.
pub fn advance_tiles(
    farm: &mut FarmState,
    crops: &CropRegistry,
    automation: &AreaAutomation,
    ctx: &MonthContext,
) -> TileReport {
    let mut report = TileReport::default();

    for tile in farm.tiles.iter_mut() {
        if tile.is_locked || ctx.claimed.contains(&tile.id) {
            continue;
        }

        // Rule 3: damaged land counts down to recovery.
        if tile.state == TileState::Damaged {
            if tile.recovery_months > 1 {
                tile.recovery_months -= 1;
            } else {
                tile.state = TileState::Empty;
                tile.recovery_months = 0;
                tile.note = Some("Land recovered".to_string());
                report.recovered.push(tile.id);
            }
            continue;
        }

        // Rule 4: fresh earthquake damage wipes whatever was here.
        if ctx.casualties.contains(&tile.id) {
            tile.state = TileState::Damaged;
            tile.recovery_months = QUAKE_RECOVERY_MONTHS;
            tile.crop_id = None;
            tile.growth_progress = 0;
            tile.note = Some("Destroyed by Earthquake".to_string());
            report.damaged.push(tile.id);
            continue;
        }

        // Rule 5: bare or dead soil only evaporates.
        if matches!(tile.state, TileState::Dead | TileState::Empty) {
            tile.is_watered = false;
            tile.moisture = apply_moisture(tile.moisture, -(EVAPORATION_RATE as i64));
            continue;
        }

        let Some(seed_id) = tile.crop_id.clone() else {
            continue;
        };
        let Some(crop) = crops.get(&seed_id) else {
            report.unknown_crops.push(seed_id);
            continue;
        };

        // Rule 6: unharvested mature crops rot. Golden apples keep on the
        // tree for GOLDEN_SHELF_LIFE months first.
        if tile.state == TileState::Mature {
            if seed_id == GOLDEN_APPLE_SEED {
                tile.shelf_life += 1;
                if tile.shelf_life > GOLDEN_SHELF_LIFE {
                    tile.state = TileState::Dead;
                    tile.moisture = 0;
                    tile.note = Some("Rotted (Old Age)".to_string());
                    report.died.push(tile.id);
                }
            } else {
                tile.state = TileState::Dead;
                tile.moisture = 0;
                tile.note = Some("Crop rotted. Harvest earlier!".to_string());
                report.died.push(tile.id);
            }
            continue;
        }

        // Rule 7: the turning season kills unsuited growing crops before
        // any moisture update.
        if ctx.season == Season::Winter && !crop.cold_resistant {
            tile.state = TileState::Dead;
            tile.note = Some(format!("{} cannot survive Winter frost.", crop.name));
            report.died.push(tile.id);
            continue;
        }
        if ctx.season == Season::Summer && crop.heat_sensitive {
            tile.state = TileState::Dead;
            tile.note = Some(format!("{} cannot survive Summer heat.", crop.name));
            report.died.push(tile.id);
            continue;
        }

        // Rule 8: moisture budget, then growth.
        let mut moisture = tile.moisture;
        let mut has_grown = false;

        if moisture > 0 {
            has_grown = true;
            moisture = apply_moisture(moisture, -(GROWTH_MOISTURE_COST as i64));
        } else if ctx.previous_weather == Weather::Drought {
            tile.state = TileState::Dead;
            tile.note = Some("Withered due to Drought.".to_string());
            report.died.push(tile.id);
            continue;
        }

        // Irrigation floor, defeated only by drought.
        let irrigated = automation
            .configs
            .get(tile.area())
            .map(|c| c.irrigation_active())
            .unwrap_or(false);
        if irrigated && ctx.weather != Weather::Drought {
            moisture = moisture.max(IRRIGATION_MOISTURE_FLOOR);
        }

        moisture = match ctx.weather {
            Weather::Rainy => apply_moisture(moisture, 50),
            Weather::Storm => MAX_MOISTURE,
            Weather::Sunny => apply_moisture(moisture, -(EVAPORATION_RATE as i64)),
            Weather::Drought => apply_moisture(moisture, -(2 * EVAPORATION_RATE as i64)),
            Weather::Snowy | Weather::Earthquake => moisture,
        };

        if !has_grown {
            tile.moisture = moisture;
            tile.note = Some("Needs water (Stunted)".to_string());
            continue;
        }

        tile.growth_progress += 1;
        tile.moisture = moisture;
        tile.is_watered = false;
        if tile.growth_progress >= crop.duration_months {
            tile.state = TileState::Mature;
            report.matured.push((tile.id, seed_id));
        } else if tile.state == TileState::Seeded {
            tile.state = TileState::Growing;
        }
    }

    report
}

// ─────────────────────────────────────────────────────────────────────────────
// System wrapper
// ─────────────────────────────────────────────────────────────────────────────

/// Runs the full monthly pass for each `MonthEndEvent`: quake targeting,
/// drone and seeder intercepts, then the standard rules, translating the
/// reports into events for the rest of the engine.
pub fn on_month_end(
    mut month_end: EventReader<MonthEndEvent>,
    mut farm: ResMut<FarmState>,
    mut inventory: ResMut<Inventory>,
    mut rng: ResMut<GameRng>,
    crops: Res<CropRegistry>,
    automation: Res<AreaAutomation>,
    unlocked: Res<UnlockedAreas>,
    market: Res<MarketState>,
    mut money: EventWriter<MoneyChangeEvent>,
    mut harvested: EventWriter<CropHarvestedEvent>,
    mut sold: EventWriter<ItemSoldEvent>,
    mut planted: EventWriter<CropPlantedEvent>,
    mut toasts: EventWriter<ToastEvent>,
) {
    for ev in month_end.read() {
        let casualties = if ev.weather == Weather::Earthquake {
            select_quake_casualties(&mut rng.0, &farm, &unlocked)
        } else {
            Vec::new()
        };

        let drones = run_drones(&mut farm, &automation, &crops, market.price, &mut inventory);
        for (_, yield_id, revenue) in &drones.sold {
            money.send(MoneyChangeEvent {
                amount: *revenue as i64,
                reason: format!("drone sold {}", yield_id),
            });
            sold.send(ItemSoldEvent {
                item_id: yield_id.clone(),
                quantity: 1,
            });
        }
        for (seed_id, yield_id) in &drones.stored {
            harvested.send(CropHarvestedEvent {
                seed_id: seed_id.clone(),
                yield_id: yield_id.clone(),
                quantity: 1,
            });
        }

        let seeded = run_seeders(&mut farm, &automation, &crops, &mut inventory, &casualties);
        for (tile, seed_id) in &seeded.planted {
            planted.send(CropPlantedEvent {
                tile: *tile,
                seed_id: seed_id.clone(),
            });
        }

        let claimed: HashSet<usize> = drones
            .claimed
            .iter()
            .chain(seeded.claimed.iter())
            .copied()
            .collect();

        let ctx = MonthContext {
            season: ev.season,
            weather: ev.weather,
            previous_weather: ev.previous_weather,
            casualties: &casualties,
            claimed: &claimed,
        };
        let report = advance_tiles(&mut farm, &crops, &automation, &ctx);

        for (_, seed_id) in &report.matured {
            if let Some(crop) = crops.get(seed_id) {
                toasts.send(ToastEvent {
                    message: format!("{} is ready!", crop.name),
                });
            }
        }
        if !report.damaged.is_empty() {
            toasts.send(ToastEvent {
                message: format!("{} tile(s) destroyed by the earthquake.", report.damaged.len()),
            });
        }
        for id in &report.unknown_crops {
            warn!("[Farming] Tile holds unknown crop id {:?} — catalog inconsistency", id);
        }

        info!(
            "[Farming] Month pass: {} matured, {} died, {} damaged, {} recovered, drone {}/{}, seeder {}",
            report.matured.len(),
            report.died.len(),
            report.damaged.len(),
            report.recovered.len(),
            drones.sold.len(),
            drones.stored.len(),
            seeded.planted.len(),
        );
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests — the rule table, rule by rule
// ─────────────────────────────────────────────────────────────────────────────
