//! Headless integration tests for Emberwild.
//!
//! These tests exercise the game's ECS logic without a window or GPU.
//! They use Bevy's `MinimalPlugins` to tick the app, register only the
//! logic plugins (no UI, no keyboard), write `PlayerInput` directly, and
//! step time by hand.
//!
//! Run with: `cargo test --test headless`

use std::collections::BTreeMap;
use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use emberwild::camping::scene::CAMPFIRE_POS;
use emberwild::camping::{CampDialog, CampingPlugin};
use emberwild::cooking::{CookingPhase, CookingProcess};
use emberwild::data::DataPlugin;
use emberwild::deferred::DeferredPlugin;
use emberwild::fire::CampFires;
use emberwild::narrative::NarrativePlugin;
use emberwild::player::PlayerPlugin;
use emberwild::registry::SceneRegistry;
use emberwild::shared::*;
use emberwild::village::VillagePlugin;
use emberwild::zone::{Exclamation, VillageObject, ZonePlugin};

// ─────────────────────────────────────────────────────────────────────────────
// Test App Builder
// ─────────────────────────────────────────────────────────────────────────────

/// Builds a minimal Bevy app with the shared contract and every logic
/// plugin, but no rendering, windowing, UI, or keyboard. Time does not move
/// unless a test asks for it. Not yet updated.
fn build_bare_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(StatesPlugin);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::ZERO));
    app.world_mut()
        .resource_mut::<Time<Virtual>>()
        .set_max_delta(Duration::from_secs(5));

    // ── Scene and screen registers ───────────────────────────────────────
    app.init_state::<GameScene>().init_state::<ScreenState>();

    // ── Shared resources (mirrors main.rs) ───────────────────────────────
    app.init_resource::<Inventory>()
        .init_resource::<PlayerStats>()
        .init_resource::<Equipment>()
        .init_resource::<ZoneSession>()
        .init_resource::<SceneRegistry>()
        .init_resource::<WallClock>()
        .init_resource::<LootTable>()
        .init_resource::<NarrativeContent>()
        .init_resource::<DialogBox>()
        .init_resource::<MenuDisplay>()
        .init_resource::<MenuPointer>()
        .init_resource::<TextEntryFocus>()
        .init_resource::<PlayerInput>()
        .init_resource::<InputContext>();

    // ── Shared events (mirrors main.rs) ──────────────────────────────────
    app.add_event::<ToastEvent>()
        .add_event::<ZoneTransitionEvent>()
        .add_event::<FireExtinguishedEvent>()
        .add_event::<VillageInteractionEvent>()
        .add_event::<NarrativeStartEvent>();

    app.add_plugins((
        DeferredPlugin,
        PlayerPlugin,
        ZonePlugin,
        NarrativePlugin,
        VillagePlugin,
        CampingPlugin,
    ));
    app
}

/// A bare app that has already run its first frame (always a zero delta)
/// and sits in Loading.
fn build_test_app() -> App {
    let mut app = build_bare_app();
    app.update();
    app
}

fn run_seconds(app: &mut App, seconds: u32) {
    *app.world_mut().resource_mut::<TimeUpdateStrategy>() =
        TimeUpdateStrategy::ManualDuration(Duration::from_secs(1));
    for _ in 0..seconds {
        app.update();
    }
    *app.world_mut().resource_mut::<TimeUpdateStrategy>() =
        TimeUpdateStrategy::ManualDuration(Duration::ZERO);
}

/// Holds the given input for one frame, releases it, and lets pending
/// events and state changes land. No game time passes.
fn press(app: &mut App, hold: impl FnOnce(&mut PlayerInput)) {
    hold(&mut app.world_mut().resource_mut::<PlayerInput>());
    app.update();
    *app.world_mut().resource_mut::<PlayerInput>() = PlayerInput::default();
    app.update();
    app.update();
}

fn confirm(app: &mut App) {
    press(app, |i| i.ui_confirm = true);
}

fn down(app: &mut App) {
    press(app, |i| i.ui_down = true);
}

fn travel(app: &mut App, target: SceneTarget, inventory: Vec<InventoryItem>) {
    app.world_mut().send_event(ZoneTransitionEvent {
        target,
        inventory,
        prompt_count: 0,
        reset_stats: false,
    });
    app.update();
    app.update();
}

fn scene(app: &App) -> GameScene {
    *app.world().resource::<State<GameScene>>().get()
}

fn screen(app: &App) -> ScreenState {
    *app.world().resource::<State<ScreenState>>().get()
}

fn place_player(app: &mut App, at: Vec2) {
    let world = app.world_mut();
    let mut query = world.query_filtered::<&mut Transform, With<Player>>();
    for mut transform in query.iter_mut(world) {
        transform.translation.x = at.x;
        transform.translation.y = at.y;
    }
}

fn player_velocity(app: &mut App) -> Vec2 {
    let world = app.world_mut();
    let mut query = world.query_filtered::<&Velocity, With<Player>>();
    query.single(world).0
}

fn camp_with(app: &mut App, items: &[(&str, u32)]) {
    let inventory = items
        .iter()
        .map(|(name, qty)| InventoryItem::new(*name, *qty))
        .collect();
    travel(app, SceneTarget::Camping, inventory);
    assert_eq!(scene(app), GameScene::Camping);
    // Within reach of the campfire only.
    place_player(app, CAMPFIRE_POS - Vec2::new(0.0, 30.0));
}

/// F at the campfire, pick the first fuel row, raise the quantity, burn.
fn stoke_campfire(app: &mut App, extra: u32) {
    press(app, |i| i.stoke = true);
    assert!(matches!(
        *app.world().resource::<CampDialog>(),
        CampDialog::Stoking(_)
    ));
    confirm(app);
    for _ in 0..extra {
        press(app, |i| i.ui_right = true);
    }
    confirm(app);
    assert_eq!(*app.world().resource::<CampDialog>(), CampDialog::Closed);
}

/// C at the campfire, pick the first food row.
fn cook_first_food(app: &mut App) {
    press(app, |i| i.cook = true);
    assert!(matches!(
        *app.world().resource::<CampDialog>(),
        CampDialog::Cooking(_)
    ));
    confirm(app);
}

/// Frames with no input held and no game time passing.
fn idle(app: &mut App, frames: u32) {
    for _ in 0..frames {
        app.update();
    }
}

fn menu_last_changed(app: &App) -> bevy::ecs::component::Tick {
    app.world().resource_ref::<MenuDisplay>().last_changed()
}

fn dialog_last_changed(app: &App) -> bevy::ecs::component::Tick {
    app.world().resource_ref::<DialogBox>().last_changed()
}

fn dialog_text(app: &App) -> String {
    app.world()
        .resource::<DialogBox>()
        .text()
        .unwrap_or_default()
        .to_string()
}

// ─────────────────────────────────────────────────────────────────────────────
// Boot
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_headless_boot_lands_in_village_with_starting_kit() {
    let mut app = build_bare_app();
    app.add_plugins(DataPlugin);

    // First update enters Loading and hands off to the Village; the next
    // ones apply the scene change.
    for _ in 0..3 {
        app.update();
    }

    assert_eq!(scene(&app), GameScene::Zone);
    assert_eq!(screen(&app), ScreenState::None);
    assert_eq!(app.world().resource::<ZoneSession>().zone, ZoneId::Village);
    assert_eq!(
        app.world().resource::<Inventory>().snapshot(),
        Inventory::starting_kit().snapshot()
    );
    assert!(!app.world().resource::<LootTable>().all_item_names().is_empty());
    assert!(!app
        .world()
        .resource::<NarrativeContent>()
        .prompts_for(ZoneId::OuterGrasslands)
        .is_empty());

    let world = app.world_mut();
    let sites = world.query::<&VillageObject>().iter(world).count();
    assert_eq!(sites, VillageSite::ALL.len());
    let players = world.query_filtered::<(), With<Player>>().iter(world).count();
    assert_eq!(players, 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// Camp: fire and skillet
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_two_firewood_give_six_stokes_and_three_minutes() {
    let mut app = build_test_app();
    camp_with(&mut app, &[("Firewood", 2), ("Cod", 1)]);

    stoke_campfire(&mut app, 1);

    let fires = app.world().resource::<CampFires>();
    assert!(fires.campfire.is_lit);
    assert_eq!(fires.campfire.stoke_count, 6.0);
    assert_eq!(fires.campfire.burn_time_remaining, 180);
    assert!(!fires.torch.is_lit, "torch is out of reach and untouched");
    assert_eq!(app.world().resource::<Inventory>().count("Firewood"), 0);

    let record = app.world().resource::<SceneRegistry>().fuel(FuelKind::Campfire);
    assert_eq!(record.burn_time, 180);
    assert!(record.is_lit);

    run_seconds(&mut app, 5);
    let fires = app.world().resource::<CampFires>();
    assert_eq!(fires.campfire.burn_time_remaining, 175);
}

#[test]
fn test_rock_is_not_offered_as_fuel() {
    let mut app = build_test_app();
    camp_with(&mut app, &[("Rock", 1)]);

    press(&mut app, |i| i.stoke = true);

    assert_eq!(*app.world().resource::<CampDialog>(), CampDialog::Closed);
    assert_eq!(*app.world().resource::<CampFires>(), CampFires::default());
    assert_eq!(app.world().resource::<Inventory>().count("Rock"), 1);
}

#[test]
fn test_stoking_out_of_reach_does_nothing() {
    let mut app = build_test_app();
    camp_with(&mut app, &[("Firewood", 1)]);
    place_player(&mut app, Vec2::new(-250.0, -150.0));

    press(&mut app, |i| i.stoke = true);

    assert_eq!(*app.world().resource::<CampDialog>(), CampDialog::Closed);
    assert_eq!(app.world().resource::<Inventory>().count("Firewood"), 1);
}

#[test]
fn test_cod_is_cooked_after_thirty_one_seconds() {
    let mut app = build_test_app();
    camp_with(&mut app, &[("Firewood", 2), ("Cod", 1)]);
    stoke_campfire(&mut app, 1);
    cook_first_food(&mut app);

    assert_eq!(app.world().resource::<Inventory>().count("Cod"), 0);
    assert!(app.world().resource::<CookingProcess>().is_cooking());

    run_seconds(&mut app, 29);
    assert!(app.world().resource::<CookingProcess>().is_cooking());

    run_seconds(&mut app, 2);
    let cooking = app.world().resource::<CookingProcess>();
    assert_eq!(cooking.phase, CookingPhase::Complete);
    assert_eq!(
        cooking.result_item.as_ref().map(|i| i.name.as_str()),
        Some("Cooked Cod")
    );

    press(&mut app, |i| i.cook = true);
    assert_eq!(app.world().resource::<Inventory>().count("Cooked Cod"), 1);
    assert_eq!(
        app.world().resource::<CookingProcess>().phase,
        CookingPhase::Idle
    );
}

#[test]
fn test_fire_going_out_at_ten_seconds_loses_the_dish() {
    let mut app = build_test_app();
    camp_with(&mut app, &[("Firewood", 1), ("Cod", 1)]);
    stoke_campfire(&mut app, 0);
    cook_first_food(&mut app);
    // Burns out on the tenth second.
    app.world_mut()
        .resource_mut::<CampFires>()
        .campfire
        .burn_time_remaining = 10;

    run_seconds(&mut app, 9);
    assert!(app.world().resource::<CookingProcess>().is_cooking());

    run_seconds(&mut app, 1);
    let fires = app.world().resource::<CampFires>();
    assert!(!fires.campfire.is_lit);
    assert_eq!(fires.campfire.light_radius, 0.0);
    let cooking = app.world().resource::<CookingProcess>();
    assert_eq!(cooking.phase, CookingPhase::Idle);
    assert!(cooking.result_item.is_none());

    run_seconds(&mut app, 30);
    let inventory = app.world().resource::<Inventory>();
    assert_eq!(inventory.count("Cooked Cod"), 0);
    assert_eq!(inventory.count("Cod"), 0, "raw cod is not refunded");
}

#[test]
fn test_cooking_resumes_from_wall_clock_after_leaving_camp() {
    let mut app = build_test_app();
    app.insert_resource(WallClock::frozen(100_000));
    camp_with(&mut app, &[("Firewood", 2), ("Cod", 1)]);
    stoke_campfire(&mut app, 1);
    cook_first_food(&mut app);
    run_seconds(&mut app, 10);
    assert_eq!(app.world().resource::<CookingProcess>().elapsed_seconds, 10);

    // ESC breaks camp.
    press(&mut app, |i| i.ui_cancel = true);
    assert_eq!(scene(&app), GameScene::Zone);
    assert_eq!(app.world().resource::<ZoneSession>().zone, ZoneId::Village);
    let record = app.world().resource::<SceneRegistry>().cooking();
    assert!(record.is_cooking);
    assert_eq!(record.elapsed_seconds, 10);
    assert_eq!(record.started_at_ms, 100_000);

    app.world_mut().resource_mut::<WallClock>().advance_ms(25_000);
    let inventory = app.world().resource::<Inventory>().snapshot();
    travel(&mut app, SceneTarget::Camping, inventory);
    assert_eq!(scene(&app), GameScene::Camping);

    let cooking = app.world().resource::<CookingProcess>();
    assert_eq!(cooking.phase, CookingPhase::Complete);
    assert_eq!(cooking.elapsed_seconds, 35);
    assert!(app.world().resource::<CampFires>().campfire.is_lit);
}

#[test]
fn test_camp_dialog_is_not_rewritten_while_idle() {
    let mut app = build_test_app();
    camp_with(&mut app, &[("Firewood", 3)]);

    press(&mut app, |i| i.stoke = true);
    let listed = menu_last_changed(&app);
    idle(&mut app, 20);
    assert_eq!(menu_last_changed(&app), listed);
    assert!(matches!(
        *app.world().resource::<CampDialog>(),
        CampDialog::Stoking(_)
    ));

    confirm(&mut app);
    let picker = menu_last_changed(&app);
    assert_ne!(picker, listed);
    idle(&mut app, 20);
    assert_eq!(menu_last_changed(&app), picker);
    let title = app
        .world()
        .resource::<MenuDisplay>()
        .current
        .as_ref()
        .map(|m| m.title.clone())
        .unwrap_or_default();
    assert_eq!(title, "How many Firewood to use?");
}

#[test]
fn test_camp_seeds_wood_and_cod_when_arriving_empty() {
    let mut app = build_test_app();
    travel(&mut app, SceneTarget::Camping, Vec::new());
    let inventory = app.world().resource::<Inventory>();
    assert_eq!(inventory.count("wood"), 1);
    assert_eq!(inventory.count("cod"), 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// Movement gate
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_velocity_is_zero_on_every_screen_but_none() {
    let mut app = build_test_app();
    travel(&mut app, SceneTarget::Zone(ZoneId::Village), Vec::new());
    app.world_mut().resource_mut::<PlayerInput>().move_axis = Vec2::X;

    app.update();
    assert_eq!(player_velocity(&mut app), Vec2::X * ZONE_PLAYER_SPEED);

    for state in ScreenState::ALL {
        if state == ScreenState::None {
            continue;
        }
        app.world_mut()
            .resource_mut::<NextState<ScreenState>>()
            .set(state);
        app.update();
        assert_eq!(screen(&app), state);
        assert_eq!(player_velocity(&mut app), Vec2::ZERO, "{state:?}");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Narrative
// ─────────────────────────────────────────────────────────────────────────────

fn fork_in_the_trail() -> NarrativeContent {
    let mut prompts = BTreeMap::new();
    prompts.insert(
        ZoneId::OuterGrasslands.name().to_string(),
        vec![NarrativePrompt {
            prompt: "A fork in the trail.".into(),
            options: vec!["Left".into(), "Right".into()],
            outcomes: vec![
                "You find a pouch. (+Loot)".into(),
                "Thorns scratch you. (-5 Health)".into(),
            ],
        }],
    );
    NarrativeContent {
        prologues: BTreeMap::new(),
        prompts,
    }
}

/// Walks onto the first exclamation marker and touches it.
fn touch_marker(app: &mut App) {
    let marker = {
        let world = app.world_mut();
        let mut query = world.query_filtered::<&Transform, With<Exclamation>>();
        query
            .iter(world)
            .next()
            .map(|tf| tf.translation.truncate())
            .expect("markers spawn on entry")
    };
    place_player(app, marker);
    press(app, |i| i.interact = true);
}

#[test]
fn test_narrative_chain_from_marker_to_end() {
    let mut app = build_test_app();
    app.insert_resource(fork_in_the_trail());
    travel(&mut app, SceneTarget::Zone(ZoneId::OuterGrasslands), Vec::new());

    touch_marker(&mut app);

    assert_eq!(screen(&app), ScreenState::Prompt);
    assert!(dialog_text(&app).contains("A fork in the trail."));

    confirm(&mut app);
    assert_eq!(screen(&app), ScreenState::Choices);
    let rows = app
        .world()
        .resource::<MenuDisplay>()
        .current
        .as_ref()
        .map(|m| m.rows.clone())
        .unwrap_or_default();
    assert_eq!(rows, ["Left", "Right", "Back"]);

    down(&mut app);
    confirm(&mut app);
    assert_eq!(screen(&app), ScreenState::Outcome);
    let stats = app.world().resource::<PlayerStats>();
    assert_eq!(stats.health, 95);
    assert_eq!(stats.thirst, 93);

    confirm(&mut app);
    assert_eq!(screen(&app), ScreenState::ItemMenu);

    confirm(&mut app);
    assert_eq!(screen(&app), ScreenState::None);
    assert_eq!(app.world().resource::<ZoneSession>().prompt_count, 1);
    assert!(!app.world().resource::<DialogBox>().is_open());
    assert!(app.world().resource::<MenuDisplay>().current.is_none());
}

#[test]
fn test_prompt_stays_up_while_idle_in_scavenger_zone() {
    let mut app = build_test_app();
    app.insert_resource(fork_in_the_trail());
    travel(&mut app, SceneTarget::Zone(ZoneId::OuterGrasslands), Vec::new());
    touch_marker(&mut app);
    assert_eq!(screen(&app), ScreenState::Prompt);
    let opened = dialog_last_changed(&app);

    idle(&mut app, 20);

    assert_eq!(screen(&app), ScreenState::Prompt);
    assert!(app.world().resource::<DialogBox>().is_open());
    assert!(dialog_text(&app).contains("A fork in the trail."));
    assert_eq!(dialog_last_changed(&app), opened);
}

#[test]
fn test_choices_menu_is_not_rewritten_while_idle() {
    let mut app = build_test_app();
    app.insert_resource(fork_in_the_trail());
    travel(&mut app, SceneTarget::Zone(ZoneId::OuterGrasslands), Vec::new());
    touch_marker(&mut app);
    confirm(&mut app);
    assert_eq!(screen(&app), ScreenState::Choices);
    let shown = menu_last_changed(&app);

    idle(&mut app, 20);

    assert_eq!(screen(&app), ScreenState::Choices);
    assert_eq!(menu_last_changed(&app), shown);
    let rows = app
        .world()
        .resource::<MenuDisplay>()
        .current
        .as_ref()
        .map(|m| m.rows.clone())
        .unwrap_or_default();
    assert_eq!(rows, ["Left", "Right", "Back"]);

    // Pressing down at a new row does rewrite it.
    down(&mut app);
    assert_ne!(menu_last_changed(&app), shown);
}

#[test]
fn test_item_menu_stays_up_while_idle() {
    let mut app = build_test_app();
    app.insert_resource(fork_in_the_trail());
    travel(&mut app, SceneTarget::Zone(ZoneId::OuterGrasslands), Vec::new());
    touch_marker(&mut app);
    confirm(&mut app);
    down(&mut app);
    confirm(&mut app);
    confirm(&mut app);
    assert_eq!(screen(&app), ScreenState::ItemMenu);
    let opened = dialog_last_changed(&app);

    idle(&mut app, 20);

    assert_eq!(screen(&app), ScreenState::ItemMenu);
    assert!(dialog_text(&app).starts_with("Item Options:"));
    assert_eq!(dialog_last_changed(&app), opened);
    assert!(app.world().resource::<MenuDisplay>().current.is_none());
}

#[test]
fn test_leaving_village_leaves_no_stale_ui_over_the_story() {
    let mut app = build_test_app();
    app.insert_resource(fork_in_the_trail());
    travel(&mut app, SceneTarget::Zone(ZoneId::Village), Vec::new());
    let gate = site_position(&mut app, VillageSite::ScavengerMode);
    place_player(&mut app, gate);
    press(&mut app, |i| i.interact = true);
    assert!(app.world().resource::<DialogBox>().is_open());

    confirm(&mut app);
    idle(&mut app, 2);
    assert_eq!(
        app.world().resource::<ZoneSession>().zone,
        ZoneId::OuterGrasslands
    );
    assert!(!app.world().resource::<DialogBox>().is_open());

    touch_marker(&mut app);
    assert_eq!(screen(&app), ScreenState::Prompt);
    idle(&mut app, 20);
    assert_eq!(screen(&app), ScreenState::Prompt);
    assert!(dialog_text(&app).contains("A fork in the trail."));

    confirm(&mut app);
    idle(&mut app, 20);
    assert_eq!(screen(&app), ScreenState::Choices);
    assert!(app.world().resource::<MenuDisplay>().current.is_some());
}

#[test]
fn test_death_respawns_in_village_with_entry_inventory() {
    let mut app = build_test_app();
    travel(
        &mut app,
        SceneTarget::Zone(ZoneId::OuterGrasslands),
        Inventory::starting_kit().snapshot(),
    );
    app.world_mut().resource_mut::<Inventory>().add("Stick", 3);
    app.world_mut().resource_mut::<PlayerStats>().health = 0;
    app.world_mut()
        .resource_mut::<NextState<ScreenState>>()
        .set(ScreenState::Outcome);
    app.update();
    app.update();

    assert_eq!(screen(&app), ScreenState::None);
    let shown = app.world().resource::<DialogBox>().text().unwrap_or_default().to_string();
    assert!(shown.starts_with("You have died!"));
    assert_eq!(app.world().resource::<ZoneSession>().zone, ZoneId::OuterGrasslands);

    run_seconds(&mut app, 3);
    app.update();
    app.update();

    assert_eq!(scene(&app), GameScene::Zone);
    assert_eq!(app.world().resource::<ZoneSession>().zone, ZoneId::Village);
    assert_eq!(app.world().resource::<ZoneSession>().prompt_count, 0);
    assert_eq!(app.world().resource::<PlayerStats>().health, STAT_MAX);
    assert_eq!(
        app.world().resource::<Inventory>().snapshot(),
        Inventory::starting_kit().snapshot()
    );
    assert!(!app.world().resource::<DialogBox>().is_open());
}

// ─────────────────────────────────────────────────────────────────────────────
// Village
// ─────────────────────────────────────────────────────────────────────────────

fn site_position(app: &mut App, site: VillageSite) -> Vec2 {
    let world = app.world_mut();
    let mut query = world.query::<(&VillageObject, &Transform)>();
    query
        .iter(world)
        .find(|(object, _)| object.site == site)
        .map(|(_, tf)| tf.translation.truncate())
        .expect("every site is spawned in the Village")
}

#[test]
fn test_marketplace_purchase_spends_oromozi() {
    let mut app = build_test_app();
    travel(&mut app, SceneTarget::Zone(ZoneId::Village), Vec::new());
    let merchant = site_position(&mut app, VillageSite::MerchantQuarter);
    place_player(&mut app, merchant);

    press(&mut app, |i| i.interact = true);
    assert_eq!(screen(&app), ScreenState::Merchant);

    // "Browse Marketplace"
    down(&mut app);
    confirm(&mut app);
    // "Healing Potion - 100 OROMOZI"
    down(&mut app);
    down(&mut app);
    confirm(&mut app);

    assert_eq!(app.world().resource::<PlayerStats>().oromozi, STARTING_OROMOZI - 100);
    assert_eq!(app.world().resource::<Inventory>().count("Healing Potion"), 1);
    assert_eq!(screen(&app), ScreenState::Merchant);
    let title = app
        .world()
        .resource::<MenuDisplay>()
        .current
        .as_ref()
        .map(|m| m.title.clone())
        .unwrap_or_default();
    assert!(title.starts_with("Marketplace"));

    let shown = menu_last_changed(&app);
    idle(&mut app, 20);
    assert_eq!(menu_last_changed(&app), shown);
    assert_eq!(screen(&app), ScreenState::Merchant);
}

#[test]
fn test_camping_departure_waits_for_confirm() {
    let mut app = build_test_app();
    travel(
        &mut app,
        SceneTarget::Zone(ZoneId::Village),
        vec![InventoryItem::new("Firewood", 1)],
    );
    let camp = site_position(&mut app, VillageSite::CampingMode);
    place_player(&mut app, camp);

    press(&mut app, |i| i.interact = true);
    assert_eq!(scene(&app), GameScene::Zone);
    assert!(app.world().resource::<DialogBox>().is_open());

    confirm(&mut app);
    assert_eq!(scene(&app), GameScene::Camping);
    assert_eq!(app.world().resource::<Inventory>().count("Firewood"), 1);
}
