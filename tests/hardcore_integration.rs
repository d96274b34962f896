//! Integration tests for hardcore death penalties and vampirism

use std::cell::RefCell;
use std::io::{Seek, SeekFrom, Write};
use std::path::Path;

use hardcore_mode::core::config::{load_config, HardcoreConfig, ReloadableConfig};
use hardcore_mode::core::types::Player;
use hardcore_mode::events::{EventDispatcher, HardcoreEvent, Verdict};
use hardcore_mode::hardcore::{
    settle_event, HardcoreManager, Notifier, PenaltyOutcome, SkillDelta, SkipReason,
};
use hardcore_mode::notify::{MessageKey, NotificationType};
use hardcore_mode::skills::{InMemoryProfiles, PlayerProfile, SkillType};
use hardcore_mode::zones::{NoZoneIntegration, RegionFlags};

#[derive(Default)]
struct Inbox {
    messages: RefCell<Vec<(String, String)>>,
}

impl Notifier for Inbox {
    fn notify(&self, player: &Player, _kind: NotificationType, key: MessageKey, args: &[String]) {
        self.messages
            .borrow_mut()
            .push((player.name.clone(), key.render(args)));
    }
}

fn write_config(file: &mut tempfile::NamedTempFile, body: &str) {
    let f = file.as_file_mut();
    f.set_len(0).unwrap();
    f.seek(SeekFrom::Start(0)).unwrap();
    f.write_all(body.as_bytes()).unwrap();
    f.flush().unwrap();
}

fn message(player: &str, text: &str) -> (String, String) {
    (player.to_string(), text.to_string())
}

const AXES_AT_10: &str = r#"
[death_penalty]
penalty_percentage = 10.0
level_threshold = 0

[death_penalty.enabled]
axes = true
"#;

const AXES_AT_30: &str = r#"
[death_penalty]
penalty_percentage = 30.0
level_threshold = 0

[death_penalty.enabled]
axes = true
"#;

/// Test 1: the bundled sample config loads and validates
#[test]
fn test_sample_config_loads() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let config = load_config(&root.join("config/hardcore.toml")).unwrap();
    let profiles = InMemoryProfiles::new();
    let bus = EventDispatcher::new();
    let inbox = Inbox::default();
    let manager = HardcoreManager::new(
        &NoZoneIntegration,
        &config,
        &profiles,
        &config,
        &bus,
        &inbox,
    );
    assert!(manager.is_stat_loss_enabled());
    assert!(manager.is_vampirism_enabled());
}

/// Test 2: death, event, settlement and message end to end
#[test]
fn test_death_round_trip_through_settlement() {
    let steve = Player::new("Steve");
    let mut profiles = InMemoryProfiles::new();
    profiles.insert(
        steve.id,
        PlayerProfile::new()
            .with_skill(SkillType::Mining, 57, 1000.0)
            .with_skill(SkillType::Fishing, 8, 300.0),
    );

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write_config(
        &mut file,
        r#"
        [death_penalty]
        penalty_percentage = 12.5
        level_threshold = 10
        [death_penalty.enabled]
        mining = true
        fishing = true
        "#,
    );
    let config = ReloadableConfig::open(file.path()).unwrap();
    let bus = EventDispatcher::new();
    let inbox = Inbox::default();

    let outcome = {
        let manager = HardcoreManager::new(
            &NoZoneIntegration,
            &config,
            &profiles,
            &config,
            &bus,
            &inbox,
        );
        manager.apply_death_penalty(&steve)
    };
    assert_eq!(outcome.total_levels(), 7);

    let accepted = bus.drain_accepted();
    assert_eq!(accepted.len(), 1);
    assert_eq!(
        accepted[0].deltas().get(SkillType::Fishing),
        Some(SkillDelta::ZERO)
    );
    assert!(settle_event(&mut profiles, &accepted[0]));

    let profile = profiles.get(steve.id).unwrap();
    assert_eq!(profile.skill_level(SkillType::Mining), 50);
    assert_eq!(profile.skill_xp_level(SkillType::Mining), 875);
    assert_eq!(profile.skill_level(SkillType::Fishing), 8);

    let messages = inbox.messages.borrow();
    assert_eq!(
        messages.as_slice(),
        &[message("Steve", "You have lost 7 levels from death.")]
    );
}

/// Test 3: config is read on every call, so a reload applies immediately
#[test]
fn test_reload_takes_effect_on_next_death() {
    let steve = Player::new("Steve");
    let mut profiles = InMemoryProfiles::new();
    profiles.insert(
        steve.id,
        PlayerProfile::new().with_skill(SkillType::Axes, 100, 0.0),
    );

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write_config(&mut file, AXES_AT_10);
    let config = ReloadableConfig::open(file.path()).unwrap();
    assert_eq!(config.path(), file.path());

    let bus = EventDispatcher::new();
    let inbox = Inbox::default();
    let manager = HardcoreManager::new(
        &NoZoneIntegration,
        &config,
        &profiles,
        &config,
        &bus,
        &inbox,
    );

    assert_eq!(manager.apply_death_penalty(&steve).total_levels(), 10);

    write_config(&mut file, AXES_AT_30);
    config.reload().unwrap();
    assert_eq!(manager.apply_death_penalty(&steve).total_levels(), 30);

    // A broken file keeps the last good values
    write_config(
        &mut file,
        "[death_penalty]\npenalty_percentage = 300.0\nlevel_threshold = 0\n",
    );
    assert!(config.reload().is_err());
    assert_eq!(manager.apply_death_penalty(&steve).total_levels(), 30);
    assert!(manager.is_stat_loss_enabled());

    let snapshot = config.snapshot();
    assert_eq!(snapshot.death_penalty.policy.penalty_percentage, 30.0);
    assert!(snapshot.death_penalty.enabled.is_enabled(SkillType::Axes));
}

/// Test 4: a PvP kill in a flagged arena moves levels from victim to killer
#[test]
fn test_arena_vampirism() {
    let steve = Player::new("Steve");
    let alex = Player::new("Alex");
    let mut profiles = InMemoryProfiles::new();
    profiles.insert(
        steve.id,
        PlayerProfile::new().with_skill(SkillType::Swords, 100, 0.0),
    );
    profiles.insert(
        alex.id,
        PlayerProfile::new().with_skill(SkillType::Swords, 80, 500.0),
    );

    let mut zones = RegionFlags::new();
    zones.flag_region("arena");
    zones.move_player(steve.id, "arena");
    zones.move_player(alex.id, "arena");

    let config = HardcoreConfig::from_toml(
        r#"
        [vampirism]
        penalty_percentage = 5.0
        level_threshold = 0
        [vampirism.enabled]
        swords = true
        "#,
    )
    .unwrap();
    let bus = EventDispatcher::new();
    let inbox = Inbox::default();

    let outcome = {
        let manager = HardcoreManager::new(&zones, &config, &profiles, &config, &bus, &inbox);
        manager.apply_vampirism(&steve, &alex)
    };
    assert_eq!(outcome.total_levels(), 4);

    for event in bus.drain_accepted() {
        assert!(matches!(event, HardcoreEvent::Vampirism(_)));
        assert!(settle_event(&mut profiles, &event));
    }
    let killer = profiles.get(steve.id).unwrap();
    assert_eq!(killer.skill_level(SkillType::Swords), 104);
    let victim = profiles.get(alex.id).unwrap();
    assert_eq!(victim.skill_level(SkillType::Swords), 76);

    let messages = inbox.messages.borrow();
    assert_eq!(
        messages[0],
        message("Steve", "You have stolen 4 levels from Alex.")
    );
    assert_eq!(
        messages[1],
        message("Alex", "Steve has stolen 4 levels from you!")
    );
}

/// Test 5: leaving the arena turns hardcore rules off for that player
#[test]
fn test_outside_arena_no_effect() {
    let steve = Player::new("Steve");
    let alex = Player::new("Alex");
    let mut profiles = InMemoryProfiles::new();
    profiles.insert(
        steve.id,
        PlayerProfile::new().with_skill(SkillType::Swords, 100, 0.0),
    );
    profiles.insert(
        alex.id,
        PlayerProfile::new().with_skill(SkillType::Swords, 80, 0.0),
    );

    let mut zones = RegionFlags::new();
    zones.flag_region("arena");
    zones.move_player(steve.id, "arena");
    zones.move_player(alex.id, "village");

    let config = HardcoreConfig::default();
    let bus = EventDispatcher::new();
    let inbox = Inbox::default();
    let manager = HardcoreManager::new(&zones, &config, &profiles, &config, &bus, &inbox);

    assert_eq!(
        manager.apply_vampirism(&steve, &alex),
        PenaltyOutcome::Skipped(SkipReason::ZoneNotHardcore)
    );
    assert_eq!(
        manager.apply_death_penalty(&alex),
        PenaltyOutcome::Skipped(SkipReason::ZoneNotHardcore)
    );
    assert_eq!(bus.pending(), 0);
    assert!(inbox.messages.borrow().is_empty());
}

/// Test 6: a protection listener vetoes kills against low-level players
#[test]
fn test_listener_veto_leaves_profiles_alone() {
    let steve = Player::new("Steve");
    let alex = Player::new("Alex");
    let mut profiles = InMemoryProfiles::new();
    profiles.insert(
        steve.id,
        PlayerProfile::new().with_skill(SkillType::Unarmed, 40, 0.0),
    );
    profiles.insert(
        alex.id,
        PlayerProfile::new().with_skill(SkillType::Unarmed, 30, 0.0),
    );

    let config = HardcoreConfig::from_toml(
        r#"
        [vampirism]
        penalty_percentage = 50.0
        level_threshold = 0
        [vampirism.enabled]
        unarmed = true
        "#,
    )
    .unwrap();
    let mut bus = EventDispatcher::new();
    bus.subscribe(|event| match event {
        HardcoreEvent::Vampirism(e) if e.deltas.total_levels() > 10 => Verdict::Cancel,
        _ => Verdict::Allow,
    });
    let inbox = Inbox::default();
    let manager = HardcoreManager::new(
        &NoZoneIntegration,
        &config,
        &profiles,
        &config,
        &bus,
        &inbox,
    );

    assert_eq!(
        manager.apply_vampirism(&steve, &alex),
        PenaltyOutcome::Cancelled
    );
    assert!(bus.drain_accepted().is_empty());
    assert!(inbox.messages.borrow().is_empty());
}
