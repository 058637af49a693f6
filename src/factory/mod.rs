//! Factory domain — the real-time production scheduler.
//!
//! Jobs run on the wall clock, not the turn clock: a recipe started now
//! finishes `seconds` later regardless of how many months the player
//! advances in between. The background tick polls for finished jobs; the
//! conveyor upgrade makes the tick collect them too, and hoppers chain a
//! fresh run in the same slot while input lasts.
//!
//! Job resolution is a pure function of "now" so tests drive it with
//! synthetic clocks.

use bevy::prelude::*;

use crate::shared::*;

pub struct FactoryPlugin;

impl Plugin for FactoryPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                handle_start_job,
                handle_collect_job,
                handle_buy_slot,
                handle_buy_upgrade,
                tick,
            )
                .run_if(in_state(GameState::Playing)),
        );
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Pure job logic
// ─────────────────────────────────────────────────────────────────────────────

/// Record a job in `slot`. Input must already be deducted.
pub fn begin_job(factory: &mut FactoryState, recipe: &RecipeDef, slot: usize, now: f64) -> u64 {
    let id = factory.next_job_id;
    factory.next_job_id += 1;
    factory.jobs.push(ProcessingJob {
        id,
        recipe_id: recipe.id.clone(),
        slot,
        started_at: now,
        ends_at: now + recipe.seconds,
        complete: false,
    });
    id
}

/// What one collection produced, and whether a hopper chained a new run.
pub struct CollectOutcome {
    pub recipe_id: String,
    pub item_id: ItemId,
    pub quantity: u32,
    pub restarted: bool,
}

/// Collect the job at `index`: credit the output, drop the job, and if
/// the slot has a hopper and input remains, immediately restart. Returns
/// None (leaving everything untouched) if the job isn't complete.
pub fn collect_job(
    factory: &mut FactoryState,
    index: usize,
    recipes: &RecipeRegistry,
    inventory: &mut Inventory,
    now: f64,
) -> Option<CollectOutcome> {
    let pending = factory.jobs.get(index)?;
    if !pending.complete {
        return None;
    }
    let Some(recipe) = recipes.get(&pending.recipe_id) else {
        warn!(
            "[Factory] Job {} references unknown recipe {:?}",
            pending.id, pending.recipe_id
        );
        return None;
    };
    let recipe = recipe.clone();
    let job = factory.jobs.remove(index);

    let (output_id, output_count) = recipe.output.clone();
    inventory.add(&output_id, output_count);

    let mut restarted = false;
    let (input_id, input_count) = recipe.input.clone();
    if factory.hoppers.get(job.slot).copied().unwrap_or(false)
        && inventory.try_remove(&input_id, input_count)
    {
        begin_job(factory, &recipe, job.slot, now);
        restarted = true;
    }

    Some(CollectOutcome {
        recipe_id: recipe.id.clone(),
        item_id: output_id,
        quantity: output_count,
        restarted,
    })
}

/// The background tick body: flag every job whose end time has passed,
/// then (with a conveyor) collect them all. Returns the collections made.
pub fn resolve_completed_jobs(
    factory: &mut FactoryState,
    recipes: &RecipeRegistry,
    inventory: &mut Inventory,
    now: f64,
    auto_collect: bool,
) -> Vec<CollectOutcome> {
    for job in factory.jobs.iter_mut() {
        if !job.complete && now >= job.ends_at {
            job.complete = true;
        }
    }

    let mut collected = Vec::new();
    if auto_collect {
        // Collect-and-restart until no completed job remains; restarted
        // jobs are fresh and won't be complete at the same `now`.
        while let Some(index) = factory.jobs.iter().position(|j| j.complete) {
            match collect_job(factory, index, recipes, inventory, now) {
                Some(outcome) => collected.push(outcome),
                None => break,
            }
        }
    }
    collected
}

// ─────────────────────────────────────────────────────────────────────────────
// Systems
// ─────────────────────────────────────────────────────────────────────────────

/// Wall-clock poll. With a conveyor this is also the collection path.
pub fn tick(
    time: Res<Time>,
    mut factory: ResMut<FactoryState>,
    recipes: Res<RecipeRegistry>,
    mut inventory: ResMut<Inventory>,
    mut produced: EventWriter<FactoryProducedEvent>,
    mut toasts: EventWriter<ToastEvent>,
) {
    let now = time.elapsed_secs_f64();
    let auto_collect = factory.has_conveyor;
    let collected = resolve_completed_jobs(&mut factory, &recipes, &mut inventory, now, auto_collect);
    for outcome in collected {
        produced.send(FactoryProducedEvent {
            recipe_id: outcome.recipe_id,
            item_id: outcome.item_id.clone(),
            quantity: outcome.quantity,
        });
        toasts.send(ToastEvent {
            message: format!("Conveyor delivered {}.", outcome.item_id),
        });
    }
}

/// Start a production run: deduct input, occupy a slot, stamp the clock.
pub fn handle_start_job(
    mut events: EventReader<StartFactoryJobEvent>,
    time: Res<Time>,
    mut factory: ResMut<FactoryState>,
    recipes: Res<RecipeRegistry>,
    mut inventory: ResMut<Inventory>,
    features: Res<FeatureUnlocks>,
    mut toasts: EventWriter<ToastEvent>,
    mut rejected: EventWriter<ActionRejectedEvent>,
) {
    let now = time.elapsed_secs_f64();
    for ev in events.read() {
        if !features.factory {
            rejected.send(ActionRejectedEvent {
                kind: RejectionKind::FeatureLocked,
                message: "The factory is not unlocked yet.".to_string(),
            });
            continue;
        }
        let Some(recipe) = recipes.get(&ev.recipe_id) else {
            warn!("[Factory] Start request for unknown recipe {:?}", ev.recipe_id);
            rejected.send(ActionRejectedEvent {
                kind: RejectionKind::UnknownId,
                message: format!("Unknown recipe {:?}", ev.recipe_id),
            });
            continue;
        };

        let slot = match ev.slot {
            Some(slot) => {
                if slot >= factory.slots || factory.job_in_slot(slot).is_some() {
                    rejected.send(ActionRejectedEvent {
                        kind: RejectionKind::NoCapacity,
                        message: "That production line is busy.".to_string(),
                    });
                    continue;
                }
                slot
            }
            None => match factory.first_free_slot() {
                Some(slot) => slot,
                None => {
                    rejected.send(ActionRejectedEvent {
                        kind: RejectionKind::NoCapacity,
                        message: "All production lines are busy.".to_string(),
                    });
                    continue;
                }
            },
        };

        let (input_id, input_count) = recipe.input.clone();
        if !inventory.try_remove(&input_id, input_count) {
            rejected.send(ActionRejectedEvent {
                kind: RejectionKind::InsufficientItems {
                    item_id: input_id.clone(),
                    needed: input_count,
                    have: inventory.count(&input_id),
                },
                message: "Insufficient input.".to_string(),
            });
            continue;
        }

        let id = begin_job(&mut factory, recipe, slot, now);
        info!(
            "[Factory] Job {} ({}) started in slot {}, {}s",
            id, recipe.id, slot, recipe.seconds
        );
        toasts.send(ToastEvent {
            message: format!("{} started.", recipe.name),
        });
    }
}

/// Manual collection. Unreachable in practice once a conveyor is
/// installed — the tick gets there first.
pub fn handle_collect_job(
    mut events: EventReader<CollectFactoryJobEvent>,
    time: Res<Time>,
    mut factory: ResMut<FactoryState>,
    recipes: Res<RecipeRegistry>,
    mut inventory: ResMut<Inventory>,
    mut produced: EventWriter<FactoryProducedEvent>,
    mut toasts: EventWriter<ToastEvent>,
    mut rejected: EventWriter<ActionRejectedEvent>,
) {
    let now = time.elapsed_secs_f64();
    for ev in events.read() {
        let Some(index) = factory.jobs.iter().position(|j| j.id == ev.job_id) else {
            continue; // already collected — stale reference
        };
        if !factory.jobs[index].complete {
            rejected.send(ActionRejectedEvent {
                kind: RejectionKind::InvalidTarget,
                message: "Still processing.".to_string(),
            });
            continue;
        }
        if let Some(outcome) = collect_job(&mut factory, index, &recipes, &mut inventory, now) {
            produced.send(FactoryProducedEvent {
                recipe_id: outcome.recipe_id,
                item_id: outcome.item_id.clone(),
                quantity: outcome.quantity,
            });
            toasts.send(ToastEvent {
                message: format!("Collected {}.", outcome.item_id),
            });
        }
    }
}

/// Buy the next production line; price scales with lines owned.
pub fn handle_buy_slot(
    mut events: EventReader<BuyFactorySlotEvent>,
    mut factory: ResMut<FactoryState>,
    player: Res<PlayerState>,
    features: Res<FeatureUnlocks>,
    mut money: EventWriter<MoneyChangeEvent>,
    mut toasts: EventWriter<ToastEvent>,
    mut rejected: EventWriter<ActionRejectedEvent>,
) {
    for _ in events.read() {
        if !features.factory {
            rejected.send(ActionRejectedEvent {
                kind: RejectionKind::FeatureLocked,
                message: "The factory is not unlocked yet.".to_string(),
            });
            continue;
        }
        if factory.slots >= FACTORY_SLOT_CAP {
            rejected.send(ActionRejectedEvent {
                kind: RejectionKind::InvalidTarget,
                message: "The factory floor is full.".to_string(),
            });
            continue;
        }
        let cost = factory.next_slot_cost();
        if player.money < cost {
            rejected.send(ActionRejectedEvent {
                kind: RejectionKind::InsufficientFunds {
                    needed: cost,
                    have: player.money,
                },
                message: format!("A new line costs ${}", cost),
            });
            continue;
        }
        factory.slots += 1;
        money.send(MoneyChangeEvent {
            amount: -(cost as i64),
            reason: format!("factory line {}", factory.slots),
        });
        toasts.send(ToastEvent {
            message: format!("Production line {} installed.", factory.slots),
        });
    }
}

/// Hopper (per slot) and conveyor (global) purchases.
pub fn handle_buy_upgrade(
    mut events: EventReader<BuyFactoryUpgradeEvent>,
    mut factory: ResMut<FactoryState>,
    player: Res<PlayerState>,
    features: Res<FeatureUnlocks>,
    mut money: EventWriter<MoneyChangeEvent>,
    mut installed: EventWriter<UpgradeInstalledEvent>,
    mut toasts: EventWriter<ToastEvent>,
    mut rejected: EventWriter<ActionRejectedEvent>,
) {
    for ev in events.read() {
        if !features.factory {
            rejected.send(ActionRejectedEvent {
                kind: RejectionKind::FeatureLocked,
                message: "The factory is not unlocked yet.".to_string(),
            });
            continue;
        }
        let (label, cost) = match ev.kind {
            FactoryUpgradeKind::Hopper { slot } => {
                if slot >= factory.slots {
                    rejected.send(ActionRejectedEvent {
                        kind: RejectionKind::InvalidTarget,
                        message: "No such production line.".to_string(),
                    });
                    continue;
                }
                if factory.hoppers[slot] {
                    rejected.send(ActionRejectedEvent {
                        kind: RejectionKind::InvalidTarget,
                        message: "That line already has a hopper.".to_string(),
                    });
                    continue;
                }
                ("hopper", HOPPER_COST)
            }
            FactoryUpgradeKind::Conveyor => {
                if factory.has_conveyor {
                    rejected.send(ActionRejectedEvent {
                        kind: RejectionKind::InvalidTarget,
                        message: "The conveyor is already running.".to_string(),
                    });
                    continue;
                }
                ("conveyor", CONVEYOR_COST)
            }
        };

        if player.money < cost {
            rejected.send(ActionRejectedEvent {
                kind: RejectionKind::InsufficientFunds {
                    needed: cost,
                    have: player.money,
                },
                message: format!("{} costs ${}", label, cost),
            });
            continue;
        }

        match ev.kind {
            FactoryUpgradeKind::Hopper { slot } => factory.hoppers[slot] = true,
            FactoryUpgradeKind::Conveyor => factory.has_conveyor = true,
        }
        money.send(MoneyChangeEvent {
            amount: -(cost as i64),
            reason: format!("factory {}", label),
        });
        installed.send(UpgradeInstalledEvent {
            upgrade: label.to_string(),
            area: None,
        });
        toasts.send(ToastEvent {
            message: format!("Factory {} installed.", label),
        });
    }
}
