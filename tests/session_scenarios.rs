use amaze::config::GameRules;
use amaze::import_world::default_world;
use amaze::models::enemy::{Enemy, EnemyKind};
use amaze::models::item::Item;
use amaze::models::types::{Direction, RoomId};
use amaze::models::world::World;
use amaze::Session;

fn two_rooms() -> (World, RoomId, RoomId) {
    let mut world = World::new();
    let a = world.add_room("a", "Room A", "The first room.");
    let b = world.add_room("b", "Room B", "The second room.");
    world.link(a, b, Direction::East).unwrap();
    (world, a, b)
}

fn session_with(world: World, start: RoomId) -> Session {
    Session::new(world, start, GameRules::default())
}

fn has_line(lines: &[String], needle: &str) -> bool {
    lines.iter().any(|l| l.contains(needle))
}

#[test]
fn eating_food_caps_health_and_uses_item() {
    let (mut world, a, _) = two_rooms();
    world
        .room_mut(a)
        .unwrap()
        .add_item(Item::food("apple", "Fresh Apple", "A juicy red apple.", 10, false));
    let mut s = session_with(world, a);

    assert!(s.process_command("take apple").messages[0].contains("Fresh Apple"));
    s.player_mut().take_damage(5);
    assert_eq!(s.health(), 95);

    let r = s.process_command("eat apple");
    assert!(r.health_changed);
    assert_eq!(s.health(), 100);
    assert!(s.inventory().is_empty());

    let r = s.process_command("eat apple");
    assert_eq!(r.message(), Some("You don't have that food item."));
    assert!(!r.health_changed);
}

#[test]
fn killing_blow_drops_weapon_without_counter_attack() {
    let (mut world, a, _) = two_rooms();
    let room = world.room_mut(a).unwrap();
    room.add_item(Item::melee("axe", "Battle Axe", "Heavy.", 15));
    room.add_enemy(Enemy::new(
        EnemyKind::Orc,
        "Grug",
        "An orc warrior.",
        15,
        Some(Item::melee("sword", "Iron Sword", "A strong iron sword.", 15)),
    ));
    let mut s = session_with(world, a);

    s.process_command("take axe");
    s.process_command("equip axe");
    let r = s.process_command("attack grug");

    assert!(has_line(&r.messages, "Grug has been defeated!"));
    assert!(!has_line(&r.messages, "attacks you"));
    assert!(!r.health_changed);
    assert_eq!(s.health(), 100);

    let room = s.current_room().unwrap();
    assert!(room.enemies.is_empty());
    assert!(room.find_item("sword").is_some());
}

#[test]
fn locked_exit_keeps_player_in_place() {
    let (mut world, a, _) = two_rooms();
    world.lock(a, Direction::East).unwrap();
    let mut s = session_with(world, a);

    let r = s.process_command("go east");
    assert_eq!(r.message(), Some("The door to the east is locked."));
    assert!(!r.room_changed);
    assert_eq!(s.current_room().unwrap().id, a);
}

#[test]
fn full_inventory_refuses_take() {
    let (mut world, a, _) = two_rooms();
    let room = world.room_mut(a).unwrap();
    for i in 0..11 {
        room.add_item(Item::plain(&format!("pebble{i}"), "Pebble", "A small pebble."));
    }
    let mut s = session_with(world, a);

    for i in 0..10 {
        s.process_command(&format!("take pebble{i}"));
    }
    assert_eq!(s.inventory().len(), 10);

    let r = s.process_command("take pebble10");
    assert_eq!(r.message(), Some("Item not found or can't be picked up."));
    assert_eq!(s.inventory().len(), 10);
    assert!(s.current_room().unwrap().find_item("pebble10").is_some());
}

#[test]
fn take_then_drop_restores_room() {
    let (mut world, a, _) = two_rooms();
    world
        .room_mut(a)
        .unwrap()
        .add_item(Item::plain("key", "Rusty Key", "A small rusty key."));
    let mut s = session_with(world, a);

    s.process_command("take the key");
    assert_eq!(s.inventory().len(), 1);
    assert!(s.current_room().unwrap().items.is_empty());

    let r = s.process_command("drop key");
    assert_eq!(r.message(), Some("You dropped Rusty Key."));
    assert!(s.inventory().is_empty());
    assert!(s.current_room().unwrap().find_item("key").is_some());

    let r = s.process_command("drop key");
    assert_eq!(r.message(), Some("You don't have that item."));
}

#[test]
fn failure_messages_match_command_table() {
    let (world, a, _) = two_rooms();
    let mut s = session_with(world, a);

    let cases = [
        ("go north", "You cannot go that way."),
        ("go", "You cannot go that way."),
        ("take unicorn", "Item not found or can't be picked up."),
        ("drop unicorn", "You don't have that item."),
        ("equip unicorn", "You don't have that weapon."),
        ("eat unicorn", "You don't have that food item."),
        ("drink unicorn", "You don't have that potion item."),
        ("attack unicorn", "No enemy by that name here."),
        ("unlock", "You need a key."),
        ("dance", "Invalid command."),
        ("", "Invalid command."),
    ];
    for (cmd, expected) in cases {
        let r = s.process_command(cmd);
        assert_eq!(r.message(), Some(expected), "command {cmd:?}");
        assert!(!r.room_changed && !r.health_changed && !r.game_over);
    }
}

#[test]
fn living_enemy_blocks_movement_unless_fleeing_allowed() {
    let build = || {
        let (mut world, a, b) = two_rooms();
        world
            .room_mut(a)
            .unwrap()
            .add_enemy(Enemy::new(EnemyKind::Goblin, "Snik", "A goblin.", 8, None));
        (world, a, b)
    };

    let (world, a, _) = build();
    let mut s = session_with(world, a);
    let r = s.process_command("e");
    assert!(r.message().unwrap().starts_with("Snik blocks your way"));
    assert!(!r.room_changed);

    let (world, a, b) = build();
    let rules = GameRules {
        enemies_block_movement: false,
        ..GameRules::default()
    };
    let mut s = Session::new(world, a, rules);
    let r = s.process_command("go east");
    assert!(r.room_changed);
    assert_eq!(s.current_room().unwrap().id, b);
    assert!(s.world().room(a).unwrap().visited);
}

#[test]
fn attack_without_usable_weapon_changes_nothing() {
    let (mut world, a, _) = two_rooms();
    let room = world.room_mut(a).unwrap();
    room.add_item(Item::ranged("bow", "Wooden Bow", "A bow.", 12, 1));
    room.add_enemy(Enemy::new(
        EnemyKind::Skeleton,
        "Rattles",
        "Bones.",
        30,
        Some(Item::melee("club", "Bone Club", "A club.", 4)),
    ));
    let mut s = session_with(world, a);

    let r = s.process_command("attack rattles");
    assert_eq!(r.message(), Some("You have no usable weapon equipped."));

    s.process_command("take bow");
    s.process_command("equip bow");
    let r = s.process_command("attack rattles");
    assert!(has_line(&r.messages, "Rattles has 18 health left."));
    assert!(has_line(&r.messages, "Rattles attacks you for 4 damage."));
    assert_eq!(s.health(), 96);
    assert_eq!(s.equipped_weapon().and_then(|w| w.as_weapon()).and_then(|w| w.ammo()), Some(0));

    let r = s.process_command("attack rattles");
    assert_eq!(r.message(), Some("You have no usable weapon equipped."));
    assert_eq!(s.health(), 96);
    assert_eq!(s.current_room().unwrap().find_enemy("rattles").unwrap().health(), 18);
}

#[test]
fn death_ends_the_game_until_exit() {
    let (mut world, a, _) = two_rooms();
    let room = world.room_mut(a).unwrap();
    room.add_item(Item::melee("dagger", "Dagger", "Small.", 1));
    room.add_enemy(Enemy::new(
        EnemyKind::Dragon,
        "Smaug",
        "Very large.",
        500,
        Some(Item::melee("claws", "Claws", "Sharp.", 60)),
    ));
    let mut s = session_with(world, a);
    s.process_command("take dagger");
    s.process_command("equip dagger");

    let r = s.process_command("attack smaug");
    assert!(!r.game_over);
    assert_eq!(s.health(), 40);

    let r = s.process_command("attack smaug");
    assert!(r.game_over);
    assert!(r.health_changed);
    assert_eq!(s.health(), 0);
    assert!(has_line(&r.messages, "Game over"));
    assert!(s.is_over());

    let r = s.process_command("look");
    assert!(r.game_over);
    assert_eq!(r.message(), Some("You have been defeated. Type 'exit' to leave."));

    let r = s.process_command("exit");
    assert!(r.quit);
}

#[test]
fn troll_regenerates_when_abilities_enabled() {
    let (mut world, a, _) = two_rooms();
    let room = world.room_mut(a).unwrap();
    room.add_item(Item::melee("sword", "Sword", "Sharp.", 8));
    room.add_enemy(Enemy::new(EnemyKind::Troll, "Mossback", "Huge.", 20, None));
    let rules = GameRules {
        enemy_abilities: true,
        ..GameRules::default()
    };
    let mut s = Session::new(world, a, rules);
    s.process_command("take sword");
    s.process_command("equip sword");

    let r = s.process_command("attack mossback");
    assert!(has_line(&r.messages, "Mossback regenerates health! Current health: 17"));
    assert!(has_line(&r.messages, "no weapon to strike back"));
}

#[test]
fn handle_forwards_messages_to_sink() {
    let (world, a, _) = two_rooms();
    let mut s = session_with(world, a);
    let mut sink: Vec<String> = Vec::new();

    let r = s.handle("health", &mut sink);
    assert_eq!(sink, vec!["Health: 100/100".to_string()]);
    assert_eq!(r.messages, sink);
}

#[test]
fn default_world_walkthrough() {
    let (world, start) = default_world().unwrap();
    let mut s = session_with(world, start);
    assert_eq!(s.current_room().unwrap().name, "The Amusement a long time ago");

    // Grug guards the start room
    let r = s.process_command("go east");
    assert!(r.message().unwrap().starts_with("Grug blocks your way"));

    s.process_command("take wooden sword");
    let r = s.process_command("equip wooden sword");
    assert_eq!(r.message(), Some("You equipped Wooden Sword (damage 5)."));

    let r = s.process_command("attack grug");
    assert!(has_line(&r.messages, "Grug has 10 health left."));
    assert!(has_line(&r.messages, "Grug attacks you for 15 damage."));
    s.process_command("attack grug");
    assert_eq!(s.health(), 70);
    let r = s.process_command("attack grug");
    assert!(has_line(&r.messages, "Grug dropped Iron Sword."));
    assert_eq!(s.health(), 70);

    // Room 2: east is locked and the key is still back in room 1
    let r = s.process_command("go east");
    assert!(r.room_changed);
    assert_eq!(s.current_room().unwrap().name, "Room 2");
    assert_eq!(s.process_command("go east").message(), Some("The door to the east is locked."));
    assert_eq!(s.process_command("unlock").message(), Some("You need a key."));

    s.process_command("w");
    s.process_command("take key");
    s.process_command("e");
    assert_eq!(s.process_command("unlock north").message(), Some("There is no locked door here."));
    assert_eq!(s.process_command("unlock").message(), Some("You unlocked the door to the east."));
    assert_eq!(s.process_command("unlock").message(), Some("There is no locked door here."));
    assert!(s.inventory().iter().any(|i| i.short_id == "key"));

    let r = s.process_command("go east");
    assert!(r.room_changed);
    assert_eq!(s.current_room().unwrap().name, "Room 3");

    let r = s.process_command("show map");
    assert!(has_line(&r.messages, "west  : Room 2"));
    assert!(has_line(&r.messages, "south : Room 6"));
    assert!(has_line(&r.messages, "Visited rooms: The Amusement a long time ago, Room 2"));
}

#[test]
fn poisonous_potion_hurts_and_is_used_up() {
    let (world, start) = default_world().unwrap();
    let mut s = Session::new(
        world,
        start,
        GameRules {
            enemies_block_movement: false,
            ..GameRules::default()
        },
    );

    // room1 -> room4 -> room7
    s.process_command("s");
    s.process_command("s");
    assert_eq!(s.current_room().unwrap().name, "Room 7");

    s.process_command("take poisonous_potion");
    let r = s.process_command("drink poisonous_potion");
    assert!(has_line(&r.messages, "It was poisonous! You lost 50 health."));
    assert_eq!(s.health(), 50);
    assert!(s.inventory().is_empty());

    let r = s.process_command("eat bow");
    assert_eq!(r.message(), Some("You don't have that food item."));
}

#[test]
fn enemy_named_with_an_article_can_be_fought() {
    let (mut world, a, b) = two_rooms();
    let room = world.room_mut(a).unwrap();
    room.add_item(Item::melee("cleaver", "Giant Cleaver", "Heavy.", 50));
    room.add_enemy(Enemy::new(EnemyKind::Demon, "The Butcher", "Covered in blood.", 40, None));
    let mut s = session_with(world, a);
    s.process_command("take cleaver");
    s.process_command("equip cleaver");

    let r = s.process_command("go east");
    assert_eq!(r.message(), Some("The Butcher blocks your way! Deal with it before moving on."));

    let r = s.process_command("look at the butcher");
    assert_eq!(r.message(), Some("The Butcher the demon"));

    let r = s.process_command("attack the butcher");
    assert!(has_line(&r.messages, "You attack The Butcher for 50 damage."));
    assert!(has_line(&r.messages, "The Butcher has been defeated!"));

    let r = s.process_command("go east");
    assert!(r.room_changed);
    assert_eq!(s.current_room().unwrap().id, b);
}

#[test]
fn item_id_with_an_article_survives_parsing() {
    let (mut world, a, _) = two_rooms();
    let room = world.room_mut(a).unwrap();
    room.add_item(Item::plain("the one ring", "The One Ring", "Plain gold."));
    room.add_item(Item::food("ghost in the shell", "Ghost in the Shell", "A very strange snack.", 5, false));
    let mut s = session_with(world, a);

    let r = s.process_command("take the one ring");
    assert_eq!(r.message(), Some("You picked up The One Ring."));
    assert_eq!(s.inventory().len(), 1);

    let r = s.process_command("drop the one ring");
    assert_eq!(r.message(), Some("You dropped The One Ring."));
    assert!(s.current_room().unwrap().find_item("the one ring").is_some());

    s.process_command("take ghost in the shell");
    s.player_mut().take_damage(10);
    let r = s.process_command("eat ghost in the shell");
    assert_eq!(r.message(), Some("You ate Ghost in the Shell and restored 5 health."));
    assert!(s.inventory().is_empty());
}

#[test]
fn attacking_with_a_named_weapon_equips_it_first() {
    let (mut world, a, _) = two_rooms();
    let room = world.room_mut(a).unwrap();
    room.add_item(Item::melee("dagger", "Dagger", "Small.", 2));
    room.add_item(Item::ranged("bow", "Wooden Bow", "A bow.", 12, 3));
    room.add_enemy(Enemy::new(EnemyKind::Goblin, "Snik", "A goblin.", 30, None));
    let mut s = session_with(world, a);
    s.process_command("take dagger");
    s.process_command("take bow");
    s.process_command("equip dagger");

    let r = s.process_command("attack snik with the bow");
    assert_eq!(r.messages[0], "You equipped Wooden Bow (damage 12, ammo 3).");
    assert!(has_line(&r.messages, "You attack Snik for 12 damage."));
    assert!(s.equipped_weapon().unwrap().matches("bow"));

    let r = s.process_command("attack snik with the axe");
    assert_eq!(r.message(), Some("You don't have that weapon."));
    assert!(s.equipped_weapon().unwrap().matches("bow"));
    assert_eq!(s.current_room().unwrap().find_enemy("snik").unwrap().health(), 18);

    // No enemy, so the weapon stays as it was
    let r = s.process_command("attack nobody with dagger");
    assert_eq!(r.message(), Some("No enemy by that name here."));
    assert!(s.equipped_weapon().unwrap().matches("bow"));
}
