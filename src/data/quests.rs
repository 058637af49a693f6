use crate::shared::*;

/// Populate the quest chain. Exactly one quest starts Active; claiming a
/// reward promotes the next id. The Factory and FarmOS features are both
/// granted along the way, in that order.
pub fn populate_quests(log: &mut QuestLog) {
    let mut add = |quest: Quest| {
        log.quests.push(quest);
    };

    add(Quest {
        id: 1,
        title: "First Sprouts".into(),
        description: "Get your hands dirty: put some seeds in the ground and keep them wet.".into(),
        tasks: vec![
            QuestTask::new("Plant 3 seeds", TaskKind::Plant, None, 3),
            QuestTask::new("Water 2 tiles", TaskKind::Water, None, 2),
        ],
        reward_money: 150,
        reward_feature: None,
        status: QuestStatus::Active,
    });

    add(Quest {
        id: 2,
        title: "To Market".into(),
        description: "A farm feeds people. Bring in a harvest and turn some of it into cash.".into(),
        tasks: vec![
            QuestTask::new("Harvest 3 crops", TaskKind::Harvest, None, 3),
            QuestTask::new("Sell 2 items", TaskKind::Sell, None, 2),
        ],
        reward_money: 250,
        reward_feature: None,
        status: QuestStatus::Locked,
    });

    add(Quest {
        id: 3,
        title: "Rainy Day Fund".into(),
        description: "Hold $1,000 at once. Savings, not earnings — spending it resets nothing.".into(),
        tasks: vec![QuestTask::new(
            "Hold $1,000",
            TaskKind::HaveMoney,
            None,
            1_000,
        )],
        reward_money: 300,
        reward_feature: None,
        status: QuestStatus::Locked,
    });

    add(Quest {
        id: 4,
        title: "The Turning Year".into(),
        description: "Seasons change what grows. Keep the farm alive until summer arrives.".into(),
        tasks: vec![QuestTask::new(
            "Reach Summer",
            TaskKind::WaitSeason,
            Some(TaskTarget::Season(Season::Summer)),
            1,
        )],
        reward_money: 200,
        reward_feature: None,
        status: QuestStatus::Locked,
    });

    add(Quest {
        id: 5,
        title: "Breaking Ground".into(),
        description: "Buy the East Field. The extra land comes with a bonus: the old \
                      Tech Barn on the property still works."
            .into(),
        tasks: vec![QuestTask::new(
            "Unlock the East Field",
            TaskKind::UnlockArea,
            Some(TaskTarget::Area(1)),
            1,
        )],
        reward_money: 500,
        reward_feature: Some(FeatureFlag::Factory),
        status: QuestStatus::Locked,
    });

    add(Quest {
        id: 6,
        title: "Production Line".into(),
        description: "Raw produce is cheap. Run the factory and ship something finished.".into(),
        tasks: vec![QuestTask::new(
            "Produce 3 factory goods",
            TaskKind::FactoryProduce,
            None,
            3,
        )],
        reward_money: 600,
        reward_feature: Some(FeatureFlag::FarmOs),
        status: QuestStatus::Locked,
    });

    add(Quest {
        id: 7,
        title: "Hands-Off Farming".into(),
        description: "FarmOS is online. Install any automation upgrade and let the machines \
                      take a shift."
            .into(),
        tasks: vec![QuestTask::new(
            "Install an upgrade",
            TaskKind::InstallUpgrade,
            None,
            1,
        )],
        reward_money: 800,
        reward_feature: None,
        status: QuestStatus::Locked,
    });

    add(Quest {
        id: 8,
        title: "The Golden Bet".into(),
        description: "The orchard's fruit trades like a commodity. Write a contract against \
                      it and build a real fortune."
            .into(),
        tasks: vec![
            QuestTask::new("Buy an option", TaskKind::BuyOption, None, 1),
            QuestTask::new("Hold $20,000", TaskKind::HaveMoney, None, 20_000),
        ],
        reward_money: 5_000,
        reward_feature: None,
        status: QuestStatus::Locked,
    });
}
