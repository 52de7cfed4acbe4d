use bevy::prelude::*;
use rand::Rng;
use crate::shared::*;

pub const ZONE_PLAYER_START: Vec2 = Vec2::new(0.0, -180.0);
pub const EXCLAMATIONS_ON_ENTRY: usize = 6;

const SITE_SIZE: Vec2 = Vec2::new(56.0, 48.0);
const MARKER_SIZE: Vec2 = Vec2::new(16.0, 16.0);

/// A village interaction point.
#[derive(Component, Debug, Clone, Copy)]
pub struct VillageObject {
    pub site: VillageSite,
}

/// Starts the narrative flow when touched.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Exclamation;

fn site_position(site: VillageSite) -> Vec2 {
    match site {
        VillageSite::LiquidityBank => Vec2::new(-240.0, 160.0),
        VillageSite::MerchantQuarter => Vec2::new(-120.0, 160.0),
        VillageSite::RoyalMarket => Vec2::new(0.0, 160.0),
        VillageSite::TinkerersLab => Vec2::new(120.0, 160.0),
        VillageSite::CraftingWorkshop => Vec2::new(240.0, 160.0),
        VillageSite::TradingPost => Vec2::new(-240.0, 40.0),
        VillageSite::BattleMode => Vec2::new(-80.0, 40.0),
        VillageSite::ScavengerMode => Vec2::new(80.0, 40.0),
        VillageSite::CampingMode => Vec2::new(240.0, 40.0),
    }
}

fn site_color(site: VillageSite) -> Color {
    match site {
        VillageSite::BattleMode => Color::srgb(0.8, 0.2, 0.2),
        VillageSite::CampingMode => Color::srgb(0.9, 0.85, 0.2),
        VillageSite::ScavengerMode => Color::srgb(0.3, 0.7, 0.35),
        _ => Color::srgb(0.35, 0.45, 0.7),
    }
}

fn zone_backdrop(zone: ZoneId) -> Color {
    match zone {
        ZoneId::Village => Color::srgb(0.25, 0.3, 0.22),
        ZoneId::OuterGrasslands => Color::srgb(0.3, 0.45, 0.2),
        ZoneId::ShadyGrove => Color::srgb(0.12, 0.25, 0.15),
        ZoneId::AridDesert => Color::srgb(0.6, 0.5, 0.3),
    }
}

/// Spawns everything a zone needs: backdrop, player, and either the
/// village sites or the opening batch of exclamation markers.
pub fn spawn_zone(commands: &mut Commands, zone: ZoneId, rng: &mut impl Rng) {
    commands.spawn((
        ZoneEntity,
        Sprite::from_color(zone_backdrop(zone), Vec2::new(ZONE_WIDTH, ZONE_HEIGHT)),
        Transform::from_xyz(0.0, 0.0, -1.0),
    ));

    commands.spawn((
        Player,
        ZoneEntity,
        Velocity::default(),
        WalkSpeed(ZONE_PLAYER_SPEED),
        HalfSize(Vec2::splat(8.0)),
        Sprite::from_color(Color::srgb(0.2, 0.5, 0.8), Vec2::splat(16.0)),
        Transform::from_translation(ZONE_PLAYER_START.extend(10.0)),
    ));

    if zone.is_village() {
        for site in VillageSite::ALL {
            commands.spawn((
                VillageObject { site },
                ZoneEntity,
                HalfSize(SITE_SIZE / 2.0),
                Sprite::from_color(site_color(site), SITE_SIZE),
                Transform::from_translation(site_position(site).extend(1.0)),
                Name::new(site.key()),
            ));
        }
    } else {
        for _ in 0..EXCLAMATIONS_ON_ENTRY {
            spawn_exclamation(commands, rng);
        }
    }
}

pub fn spawn_exclamation(commands: &mut Commands, rng: &mut impl Rng) {
    let pos = super::random_marker_position(rng);
    commands.spawn((
        Exclamation,
        ZoneEntity,
        HalfSize(MARKER_SIZE / 2.0),
        Sprite::from_color(Color::srgb(1.0, 0.9, 0.1), MARKER_SIZE),
        Transform::from_translation(pos.extend(5.0)),
    ));
}
