use bevy::prelude::*;
use crate::cooking::CookingProcess;
use crate::fire::CampFires;
use crate::shared::*;

const METER_WIDTH: f32 = 160.0;
const METER_HEIGHT: f32 = 10.0;

// ═══════════════════════════════════════════════════════════════════════
// MARKER COMPONENTS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component)]
pub struct HudStatsText;

#[derive(Component)]
pub struct HudZoneText;

#[derive(Component)]
pub struct CampMeters;

/// Fill bar for a fuel source's burn time.
#[derive(Component)]
pub struct BurnMeterFill(pub FuelKind);

#[derive(Component)]
pub struct CookingMeterFill;

// ═══════════════════════════════════════════════════════════════════════
// SPAWN HUD
// ═══════════════════════════════════════════════════════════════════════

pub fn spawn_hud(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(8.0),
                left: Val::Px(8.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(4.0),
                padding: UiRect::all(Val::Px(8.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
        ))
        .with_children(|parent| {
            parent.spawn((
                HudZoneText,
                Text::new(""),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 0.9, 0.5)),
            ));
            parent.spawn((
                HudStatsText,
                Text::new(""),
                TextFont {
                    font_size: 15.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

// ═══════════════════════════════════════════════════════════════════════
// UPDATE SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

pub fn update_hud(
    stats: Res<PlayerStats>,
    session: Res<ZoneSession>,
    scene: Res<State<GameScene>>,
    mut stats_text: Query<&mut Text, (With<HudStatsText>, Without<HudZoneText>)>,
    mut zone_text: Query<&mut Text, (With<HudZoneText>, Without<HudStatsText>)>,
) {
    if !stats.is_changed() && !session.is_changed() && !scene.is_changed() {
        return;
    }
    let title = match scene.get() {
        GameScene::Loading => "Loading...",
        GameScene::Camping => "Camp",
        GameScene::Zone => session.zone.name(),
    };
    for mut text in &mut zone_text {
        **text = title.to_string();
    }
    for mut text in &mut stats_text {
        **text = stats.hud_line(session.zone);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// CAMP METERS
// ═══════════════════════════════════════════════════════════════════════

fn spawn_meter(parent: &mut ChildBuilder, label: &str, fill: impl Bundle, color: Color) {
    parent.spawn((
        Text::new(label),
        TextFont {
            font_size: 13.0,
            ..default()
        },
        TextColor(Color::WHITE),
    ));
    parent
        .spawn((
            Node {
                width: Val::Px(METER_WIDTH),
                height: Val::Px(METER_HEIGHT),
                ..default()
            },
            BackgroundColor(Color::srgba(0.2, 0.2, 0.2, 0.9)),
        ))
        .with_children(|bar| {
            bar.spawn((
                fill,
                Node {
                    width: Val::Percent(0.0),
                    height: Val::Percent(100.0),
                    ..default()
                },
                BackgroundColor(color),
            ));
        });
}

pub fn spawn_camp_meters(mut commands: Commands) {
    commands
        .spawn((
            CampMeters,
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(8.0),
                right: Val::Px(8.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(4.0),
                padding: UiRect::all(Val::Px(8.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
        ))
        .with_children(|parent| {
            spawn_meter(
                parent,
                "Campfire",
                BurnMeterFill(FuelKind::Campfire),
                Color::srgb(1.0, 0.55, 0.1),
            );
            spawn_meter(
                parent,
                "Torch",
                BurnMeterFill(FuelKind::Torch),
                Color::srgb(1.0, 0.8, 0.3),
            );
            spawn_meter(parent, "Skillet", CookingMeterFill, Color::srgb(0.5, 0.85, 0.4));
        });
}

pub fn despawn_camp_meters(mut commands: Commands, query: Query<Entity, With<CampMeters>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

pub fn update_camp_meters(
    fires: Res<CampFires>,
    cooking: Res<CookingProcess>,
    mut burn: Query<(&BurnMeterFill, &mut Node), Without<CookingMeterFill>>,
    mut skillet: Query<&mut Node, (With<CookingMeterFill>, Without<BurnMeterFill>)>,
) {
    if fires.is_changed() {
        for (fill, mut node) in &mut burn {
            let fraction = fires.get(fill.0).burn_fraction().clamp(0.0, 1.0);
            node.width = Val::Percent(fraction * 100.0);
        }
    }
    if cooking.is_changed() {
        for mut node in &mut skillet {
            node.width = Val::Percent(cooking.progress().clamp(0.0, 1.0) * 100.0);
        }
    }
}
