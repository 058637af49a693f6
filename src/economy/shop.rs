//! Shop transactions and area purchases.
//!
//! The shop deals in catalog items at fixed prices; the golden apple is
//! the one exception, traded at whatever spot price the host passes in.

use bevy::prelude::*;

use crate::shared::*;

/// Buy one unit of an item at the quoted unit cost.
pub fn handle_buy_item(
    mut events: EventReader<BuyItemEvent>,
    mut inventory: ResMut<Inventory>,
    player: Res<PlayerState>,
    crops: Res<CropRegistry>,
    mut money: EventWriter<MoneyChangeEvent>,
    mut toasts: EventWriter<ToastEvent>,
    mut rejected: EventWriter<ActionRejectedEvent>,
) {
    for ev in events.read() {
        if crops.get(&ev.item_id).is_none() {
            warn!("[Shop] Buy request for unknown item {:?}", ev.item_id);
            rejected.send(ActionRejectedEvent {
                kind: RejectionKind::UnknownId,
                message: format!("Unknown item {:?}", ev.item_id),
            });
            continue;
        }
        if player.money < ev.unit_cost {
            rejected.send(ActionRejectedEvent {
                kind: RejectionKind::InsufficientFunds {
                    needed: ev.unit_cost,
                    have: player.money,
                },
                message: "Not enough money!".to_string(),
            });
            continue;
        }

        inventory.add(&ev.item_id, 1);
        money.send(MoneyChangeEvent {
            amount: -(ev.unit_cost as i64),
            reason: format!("bought {}", ev.item_id),
        });
        toasts.send(ToastEvent {
            message: "Purchased!".to_string(),
        });
    }
}

/// Sell from the inventory: golden apples at spot, everything else at
/// its fixed catalog price.
pub fn handle_sell_item(
    mut events: EventReader<SellItemEvent>,
    mut inventory: ResMut<Inventory>,
    crops: Res<CropRegistry>,
    market: Res<MarketState>,
    mut money: EventWriter<MoneyChangeEvent>,
    mut sold: EventWriter<ItemSoldEvent>,
    mut toasts: EventWriter<ToastEvent>,
    mut rejected: EventWriter<ActionRejectedEvent>,
) {
    for ev in events.read() {
        let Some(item) = crops.get(&ev.item_id) else {
            warn!("[Shop] Sell request for unknown item {:?}", ev.item_id);
            rejected.send(ActionRejectedEvent {
                kind: RejectionKind::UnknownId,
                message: format!("Unknown item {:?}", ev.item_id),
            });
            continue;
        };
        if ev.amount == 0 {
            continue;
        }
        if !inventory.try_remove(&ev.item_id, ev.amount) {
            rejected.send(ActionRejectedEvent {
                kind: RejectionKind::InsufficientItems {
                    item_id: ev.item_id.clone(),
                    needed: ev.amount,
                    have: inventory.count(&ev.item_id),
                },
                message: "Not enough items!".to_string(),
            });
            continue;
        }

        let unit_price = if ev.item_id == GOLDEN_APPLE_FRUIT {
            market.price
        } else {
            item.sell_price
        };
        let revenue = unit_price as i64 * ev.amount as i64;

        money.send(MoneyChangeEvent {
            amount: revenue,
            reason: format!("sold {} {}", ev.amount, ev.item_id),
        });
        sold.send(ItemSoldEvent {
            item_id: ev.item_id.clone(),
            quantity: ev.amount,
        });
        toasts.send(ToastEvent {
            message: format!("Sold {} {} for ${}", ev.amount, item.name, revenue),
        });
    }
}

/// One-time purchase of a whole area.
pub fn handle_unlock_area(
    mut events: EventReader<UnlockAreaEvent>,
    mut unlocked: ResMut<UnlockedAreas>,
    player: Res<PlayerState>,
    mut money: EventWriter<MoneyChangeEvent>,
    mut area_unlocked: EventWriter<AreaUnlockedEvent>,
    mut toasts: EventWriter<ToastEvent>,
    mut rejected: EventWriter<ActionRejectedEvent>,
) {
    for ev in events.read() {
        let Some(area) = AREAS.iter().find(|a| a.id == ev.area) else {
            rejected.send(ActionRejectedEvent {
                kind: RejectionKind::UnknownId,
                message: format!("No such area {}", ev.area),
            });
            continue;
        };
        if unlocked.contains(ev.area) {
            continue; // stale click
        }
        if player.money < area.cost {
            rejected.send(ActionRejectedEvent {
                kind: RejectionKind::InsufficientFunds {
                    needed: area.cost,
                    have: player.money,
                },
                message: format!("Need ${} to unlock {}", area.cost, area.name),
            });
            continue;
        }

        unlocked.ids.push(ev.area);
        money.send(MoneyChangeEvent {
            amount: -(area.cost as i64),
            reason: format!("unlocked {}", area.name),
        });
        area_unlocked.send(AreaUnlockedEvent { area: ev.area });
        toasts.send(ToastEvent {
            message: format!("{} unlocked!", area.name),
        });
    }
}
