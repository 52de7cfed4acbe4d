use bevy::prelude::*;
use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// COMPONENTS & CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

/// Toasts on screen at once; the oldest goes first.
pub const MAX_TOASTS: usize = 3;
const FADE_SECS: f32 = 0.5;

/// Marker for the toast container node (top-center of screen).
#[derive(Component)]
pub struct ToastContainer;

#[derive(Component)]
pub struct ToastItem {
    pub timer: Timer,
    pub fade_timer: Option<Timer>,
}

// ═══════════════════════════════════════════════════════════════════════
// SPAWN CONTAINER
// ═══════════════════════════════════════════════════════════════════════

pub fn spawn_toast_container(mut commands: Commands) {
    commands.spawn((
        ToastContainer,
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(60.0),
            left: Val::Percent(50.0),
            width: Val::Px(360.0),
            margin: UiRect {
                left: Val::Px(-180.0),
                ..default()
            },
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(6.0),
            align_items: AlignItems::Center,
            ..default()
        },
        GlobalZIndex(20),
    ));
}

// ═══════════════════════════════════════════════════════════════════════
// HANDLE TOAST EVENTS
// ═══════════════════════════════════════════════════════════════════════

pub fn handle_toast_events(
    mut commands: Commands,
    mut events: EventReader<ToastEvent>,
    container_query: Query<Entity, With<ToastContainer>>,
    existing_toasts: Query<Entity, With<ToastItem>>,
) {
    let Ok(container) = container_query.get_single() else {
        return;
    };
    let mut live: Vec<Entity> = existing_toasts.iter().collect();

    for event in events.read() {
        if live.len() >= MAX_TOASTS {
            let oldest = live.remove(0);
            commands.entity(oldest).despawn_recursive();
        }

        let toast = commands
            .spawn((
                ToastItem {
                    timer: Timer::from_seconds(event.duration_secs, TimerMode::Once),
                    fade_timer: None,
                },
                Node {
                    padding: UiRect::axes(Val::Px(12.0), Val::Px(5.0)),
                    border: UiRect::all(Val::Px(1.0)),
                    ..default()
                },
                BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.75)),
                BorderColor(Color::srgba(0.5, 0.5, 0.5, 0.5)),
            ))
            .with_children(|parent| {
                parent.spawn((
                    Text::new(event.message.clone()),
                    TextFont {
                        font_size: 14.0,
                        ..default()
                    },
                    TextColor(Color::WHITE),
                ));
            })
            .id();

        commands.entity(container).add_child(toast);
        live.push(toast);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// UPDATE TOASTS
// ═══════════════════════════════════════════════════════════════════════

/// Ticks each toast, fades it out, then despawns it.
pub fn update_toasts(
    mut commands: Commands,
    time: Res<Time>,
    mut toast_query: Query<(Entity, &mut ToastItem, &mut BackgroundColor, &Children)>,
    mut text_color_query: Query<&mut TextColor>,
) {
    for (entity, mut toast, mut bg_color, children) in &mut toast_query {
        if toast.fade_timer.is_none() {
            toast.timer.tick(time.delta());
            if toast.timer.just_finished() {
                toast.fade_timer = Some(Timer::from_seconds(FADE_SECS, TimerMode::Once));
            }
            continue;
        }
        let Some(fade) = toast.fade_timer.as_mut() else {
            continue;
        };

        fade.tick(time.delta());
        if fade.finished() {
            commands.entity(entity).despawn_recursive();
            continue;
        }
        let alpha = 1.0 - fade.fraction();
        bg_color.0 = bg_color.0.with_alpha(0.75 * alpha);
        for &child in children.iter() {
            if let Ok(mut text_color) = text_color_query.get_mut(child) {
                text_color.0 = Color::srgba(1.0, 1.0, 1.0, alpha);
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// EVENT-TO-TOAST WIRING
// ═══════════════════════════════════════════════════════════════════════

pub fn wire_extinguish_toasts(
    mut events: EventReader<FireExtinguishedEvent>,
    mut toast_writer: EventWriter<ToastEvent>,
) {
    for event in events.read() {
        toast_writer.send(ToastEvent {
            message: format!("The {} has burned out.", event.kind.label()),
            duration_secs: 3.0,
        });
    }
}
