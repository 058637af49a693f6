//! Automation domain — buying, toggling and configuring the per-area
//! upgrades (irrigation, drone harvester, auto-seeder).
//!
//! The upgrades' effect on the monthly tile pass lives with the tile
//! rules in the farming domain; this module owns the FarmOS management
//! surface.

use bevy::prelude::*;

use crate::shared::*;

pub struct AutomationPlugin;

impl Plugin for AutomationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                handle_buy_upgrade,
                handle_toggle_upgrade,
                handle_set_auto_sell,
                handle_set_seeder_seed,
            )
                .run_if(in_state(GameState::Playing)),
        );
    }
}

fn config_mut<'a>(
    automation: &'a mut AreaAutomation,
    area: usize,
) -> Option<&'a mut AreaAutomationConfig> {
    automation.configs.get_mut(area)
}

// ─────────────────────────────────────────────────────────────────────────────
// Purchase
// ─────────────────────────────────────────────────────────────────────────────

/// One-time purchase per area and upgrade kind. Installing also enables.
pub fn handle_buy_upgrade(
    mut events: EventReader<BuyAreaUpgradeEvent>,
    mut automation: ResMut<AreaAutomation>,
    player: Res<PlayerState>,
    features: Res<FeatureUnlocks>,
    unlocked: Res<UnlockedAreas>,
    mut money: EventWriter<MoneyChangeEvent>,
    mut installed: EventWriter<UpgradeInstalledEvent>,
    mut toasts: EventWriter<ToastEvent>,
    mut rejected: EventWriter<ActionRejectedEvent>,
) {
    for ev in events.read() {
        if !features.farm_os {
            rejected.send(ActionRejectedEvent {
                kind: RejectionKind::FeatureLocked,
                message: "FarmOS is not online yet.".to_string(),
            });
            continue;
        }
        if !unlocked.contains(ev.area) {
            rejected.send(ActionRejectedEvent {
                kind: RejectionKind::InvalidTarget,
                message: "Unlock the area first!".to_string(),
            });
            continue;
        }
        let Some(config) = config_mut(&mut automation, ev.area) else {
            continue;
        };

        let already = match ev.kind {
            AreaUpgradeKind::Irrigation => config.has_irrigation,
            AreaUpgradeKind::Drone => config.has_drone,
            AreaUpgradeKind::Seeder => config.has_seeder,
        };
        if already {
            rejected.send(ActionRejectedEvent {
                kind: RejectionKind::InvalidTarget,
                message: format!("Area {} already has {}.", ev.area, ev.kind.label()),
            });
            continue;
        }

        let cost = ev.kind.cost();
        if player.money < cost {
            rejected.send(ActionRejectedEvent {
                kind: RejectionKind::InsufficientFunds {
                    needed: cost,
                    have: player.money,
                },
                message: format!("{} costs ${}", ev.kind.label(), cost),
            });
            continue;
        }

        match ev.kind {
            AreaUpgradeKind::Irrigation => {
                config.has_irrigation = true;
                config.irrigation_enabled = true;
            }
            AreaUpgradeKind::Drone => {
                config.has_drone = true;
                config.drone_enabled = true;
            }
            AreaUpgradeKind::Seeder => {
                config.has_seeder = true;
                config.seeder_enabled = true;
            }
        }

        money.send(MoneyChangeEvent {
            amount: -(cost as i64),
            reason: format!("{} installed in area {}", ev.kind.label(), ev.area),
        });
        installed.send(UpgradeInstalledEvent {
            upgrade: ev.kind.label().to_string(),
            area: Some(ev.area),
        });
        toasts.send(ToastEvent {
            message: format!("{} online in area {}.", ev.kind.label(), ev.area),
        });
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Toggle & configure
// ─────────────────────────────────────────────────────────────────────────────

/// Flip an installed upgrade's enabled flag. No cost; no-op if the
/// upgrade was never bought.
pub fn handle_toggle_upgrade(
    mut events: EventReader<ToggleAreaUpgradeEvent>,
    mut automation: ResMut<AreaAutomation>,
    mut rejected: EventWriter<ActionRejectedEvent>,
) {
    for ev in events.read() {
        let Some(config) = config_mut(&mut automation, ev.area) else {
            continue;
        };
        let flipped = match ev.kind {
            AreaUpgradeKind::Irrigation if config.has_irrigation => {
                config.irrigation_enabled = !config.irrigation_enabled;
                true
            }
            AreaUpgradeKind::Drone if config.has_drone => {
                config.drone_enabled = !config.drone_enabled;
                true
            }
            AreaUpgradeKind::Seeder if config.has_seeder => {
                config.seeder_enabled = !config.seeder_enabled;
                true
            }
            _ => false,
        };
        if !flipped {
            rejected.send(ActionRejectedEvent {
                kind: RejectionKind::InvalidTarget,
                message: format!("No {} installed in area {}.", ev.kind.label(), ev.area),
            });
        }
    }
}

pub fn handle_set_auto_sell(
    mut events: EventReader<SetAutoSellEvent>,
    mut automation: ResMut<AreaAutomation>,
) {
    for ev in events.read() {
        if let Some(config) = config_mut(&mut automation, ev.area) {
            config.auto_sell = ev.auto_sell;
        }
    }
}

/// Point an area's seeder at a seed (or clear it). The seed must exist,
/// be a seed, and be legal for the area under the golden-orchard rule.
pub fn handle_set_seeder_seed(
    mut events: EventReader<SetSeederSeedEvent>,
    mut automation: ResMut<AreaAutomation>,
    crops: Res<CropRegistry>,
    mut rejected: EventWriter<ActionRejectedEvent>,
) {
    for ev in events.read() {
        let Some(seed_id) = ev.seed_id.clone() else {
            if let Some(config) = config_mut(&mut automation, ev.area) {
                config.seeder_seed_id = None;
            }
            continue;
        };

        let Some(crop) = crops.get(&seed_id) else {
            warn!("[Automation] Seeder target {:?} missing from catalog", seed_id);
            rejected.send(ActionRejectedEvent {
                kind: RejectionKind::UnknownId,
                message: format!("Unknown seed {:?}", seed_id),
            });
            continue;
        };
        if crop.category != ItemCategory::Seed {
            rejected.send(ActionRejectedEvent {
                kind: RejectionKind::InvalidTarget,
                message: format!("{} is not a seed.", crop.name),
            });
            continue;
        }
        let golden = seed_id == GOLDEN_APPLE_SEED;
        if golden != (ev.area == GOLDEN_AREA) {
            rejected.send(ActionRejectedEvent {
                kind: RejectionKind::InvalidTarget,
                message: "That seed cannot grow in this area.".to_string(),
            });
            continue;
        }

        if let Some(config) = config_mut(&mut automation, ev.area) {
            config.seeder_seed_id = Some(seed_id);
        }
    }
}
