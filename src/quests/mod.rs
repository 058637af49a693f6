//! Quest domain — reactive objective tracking.
//!
//! Exactly one quest is Active at a time. It consumes gameplay events
//! (plant, water, harvest, sell, produce, buy-option, unlock, install),
//! plus two special task shapes: HaveMoney is a watermark over the live
//! balance, and WaitSeason is a one-shot latch on a season change.

use bevy::prelude::*;

use crate::shared::*;

pub struct QuestPlugin;

impl Plugin for QuestPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (observe_gameplay_events, watermark_money)
                .chain()
                .in_set(MonthEndSet::Quests),
        )
        .add_systems(
            Update,
            handle_claim_reward.run_if(in_state(GameState::Playing)),
        );
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Matching & counting
// ─────────────────────────────────────────────────────────────────────────────

/// What a gameplay event is "about", for target filters.
pub enum Subject<'a> {
    Any,
    Item(&'a str),
    Area(usize),
    Upgrade(&'a str),
}

fn subject_matches(target: &Option<TaskTarget>, subject: &Subject) -> bool {
    let Some(target) = target else {
        return true; // untargeted task counts anything of its kind
    };
    match (target, subject) {
        (TaskTarget::Item(want), Subject::Item(got)) => want == got,
        (TaskTarget::Area(want), Subject::Area(got)) => want == got,
        (TaskTarget::Upgrade(want), Subject::Upgrade(got)) => want == got,
        _ => false,
    }
}

/// Bounded accumulator: `current` never exceeds `count` and never
/// decreases.
fn bump(task: &mut QuestTask, amount: u32) {
    task.current = (task.current + amount).min(task.count);
    if task.current >= task.count {
        task.complete = true;
    }
}

/// Count `amount` against the active quest's matching tasks.
pub fn record_progress(quest: &mut Quest, kind: TaskKind, subject: &Subject, amount: u32) {
    for task in quest.tasks.iter_mut() {
        if task.complete || task.kind != kind {
            continue;
        }
        if subject_matches(&task.target, subject) {
            bump(task, amount);
        }
    }
}

/// Watermark rule: progress is the running maximum of the observed
/// balance, not a sum of gains.
pub fn record_money_watermark(quest: &mut Quest, money: u32) {
    for task in quest.tasks.iter_mut() {
        if task.complete || task.kind != TaskKind::HaveMoney {
            continue;
        }
        task.current = task.current.max(money).min(task.count);
        if task.current >= task.count {
            task.complete = true;
        }
    }
}

/// Latch rule: reaching the named season completes the task outright.
pub fn record_season_reached(quest: &mut Quest, season: Season) {
    for task in quest.tasks.iter_mut() {
        if task.complete || task.kind != TaskKind::WaitSeason {
            continue;
        }
        let hit = match &task.target {
            Some(TaskTarget::Season(want)) => *want == season,
            None => true,
            _ => false,
        };
        if hit {
            task.current = task.count;
            task.complete = true;
        }
    }
}

fn check_completion(
    quest: &mut Quest,
    completed: &mut EventWriter<QuestCompletedEvent>,
    toasts: &mut EventWriter<ToastEvent>,
) {
    if quest.status == QuestStatus::Active && quest.tasks.iter().all(|t| t.complete) {
        quest.status = QuestStatus::Completed;
        info!("[Quests] Quest {} '{}' completed", quest.id, quest.title);
        completed.send(QuestCompletedEvent { quest_id: quest.id });
        toasts.send(ToastEvent {
            message: format!("Quest complete: {} — claim your reward!", quest.title),
        });
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Observers
// ─────────────────────────────────────────────────────────────────────────────

/// Feeds every gameplay event into the single active quest.
#[allow(clippy::too_many_arguments)]
pub fn observe_gameplay_events(
    mut quest_log: ResMut<QuestLog>,
    mut planted: EventReader<CropPlantedEvent>,
    mut watered: EventReader<TileWateredEvent>,
    mut harvested: EventReader<CropHarvestedEvent>,
    mut sold: EventReader<ItemSoldEvent>,
    mut produced: EventReader<FactoryProducedEvent>,
    mut options: EventReader<OptionPurchasedEvent>,
    mut areas: EventReader<AreaUnlockedEvent>,
    mut upgrades: EventReader<UpgradeInstalledEvent>,
    mut seasons: EventReader<SeasonChangeEvent>,
    mut completed: EventWriter<QuestCompletedEvent>,
    mut toasts: EventWriter<ToastEvent>,
) {
    let Some(quest) = quest_log.active_mut() else {
        // Nobody listening — drain so stale events don't replay later.
        planted.clear();
        watered.clear();
        harvested.clear();
        sold.clear();
        produced.clear();
        options.clear();
        areas.clear();
        upgrades.clear();
        seasons.clear();
        return;
    };

    for ev in planted.read() {
        record_progress(quest, TaskKind::Plant, &Subject::Item(&ev.seed_id), 1);
    }
    for _ in watered.read() {
        record_progress(quest, TaskKind::Water, &Subject::Any, 1);
    }
    for ev in harvested.read() {
        record_progress(quest, TaskKind::Harvest, &Subject::Item(&ev.yield_id), ev.quantity);
    }
    for ev in sold.read() {
        record_progress(quest, TaskKind::Sell, &Subject::Item(&ev.item_id), ev.quantity);
    }
    for ev in produced.read() {
        record_progress(
            quest,
            TaskKind::FactoryProduce,
            &Subject::Item(&ev.item_id),
            ev.quantity,
        );
    }
    for _ in options.read() {
        record_progress(quest, TaskKind::BuyOption, &Subject::Any, 1);
    }
    for ev in areas.read() {
        record_progress(quest, TaskKind::UnlockArea, &Subject::Area(ev.area), 1);
    }
    for ev in upgrades.read() {
        record_progress(
            quest,
            TaskKind::InstallUpgrade,
            &Subject::Upgrade(&ev.upgrade),
            1,
        );
    }
    for ev in seasons.read() {
        record_season_reached(quest, ev.new_season);
    }

    check_completion(quest, &mut completed, &mut toasts);
}

/// HaveMoney tasks track the live balance every frame.
pub fn watermark_money(
    mut quest_log: ResMut<QuestLog>,
    player: Res<PlayerState>,
    mut completed: EventWriter<QuestCompletedEvent>,
    mut toasts: EventWriter<ToastEvent>,
) {
    let Some(quest) = quest_log.active_mut() else {
        return;
    };
    record_money_watermark(quest, player.money);
    check_completion(quest, &mut completed, &mut toasts);
}

// ─────────────────────────────────────────────────────────────────────────────
// Claiming
// ─────────────────────────────────────────────────────────────────────────────

/// Pays out a Completed quest and promotes the next quest in id order.
pub fn handle_claim_reward(
    mut events: EventReader<ClaimQuestRewardEvent>,
    mut quest_log: ResMut<QuestLog>,
    mut features: ResMut<FeatureUnlocks>,
    mut money: EventWriter<MoneyChangeEvent>,
    mut toasts: EventWriter<ToastEvent>,
    mut rejected: EventWriter<ActionRejectedEvent>,
) {
    for ev in events.read() {
        let Some(quest) = quest_log.quests.iter_mut().find(|q| q.id == ev.quest_id) else {
            continue;
        };
        if quest.status != QuestStatus::Completed {
            rejected.send(ActionRejectedEvent {
                kind: RejectionKind::InvalidTarget,
                message: "That quest has no reward waiting.".to_string(),
            });
            continue;
        }

        quest.status = QuestStatus::Claimed;
        let title = quest.title.clone();
        if quest.reward_money > 0 {
            money.send(MoneyChangeEvent {
                amount: quest.reward_money as i64,
                reason: format!("quest reward: {}", title),
            });
        }
        match quest.reward_feature {
            Some(FeatureFlag::Factory) => {
                features.factory = true;
                toasts.send(ToastEvent {
                    message: "The Tech Barn is open for business!".to_string(),
                });
            }
            Some(FeatureFlag::FarmOs) => {
                features.farm_os = true;
                toasts.send(ToastEvent {
                    message: "FarmOS terminal installed.".to_string(),
                });
            }
            None => {}
        }

        // Promote the next quest in id order.
        if let Some(next) = quest_log
            .quests
            .iter_mut()
            .filter(|q| q.status == QuestStatus::Locked)
            .min_by_key(|q| q.id)
        {
            next.status = QuestStatus::Active;
            info!("[Quests] Quest {} '{}' is now active", next.id, next.title);
            toasts.send(ToastEvent {
                message: format!("New quest: {}", next.title),
            });
        }
    }
}
