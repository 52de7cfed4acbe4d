//! The one on-screen list menu. Whatever domain owns the active menu writes
//! a `MenuSnapshot` into `MenuDisplay`; this module draws it and reports
//! row clicks back through `MenuPointer`.

use bevy::prelude::*;
use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// LAYOUT & MARKERS
// ═══════════════════════════════════════════════════════════════════════

const ROW_WIDTH: f32 = 420.0;
const ROW_HEIGHT: f32 = 30.0;
const ROW_COLOR: Color = Color::srgba(0.15, 0.12, 0.1, 0.9);
const ROW_SELECTED_COLOR: Color = Color::srgba(0.55, 0.35, 0.15, 0.95);

#[derive(Component)]
pub struct MenuViewRoot;

/// An on-screen row. `index` is the position within the visible window.
#[derive(Component)]
pub struct MenuRow {
    pub index: usize,
}

fn spawn_text(parent: &mut ChildBuilder, text: &str, font_size: f32, color: Color) {
    parent.spawn((
        Text::new(text),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(color),
    ));
}

// ═══════════════════════════════════════════════════════════════════════
// REBUILD
// ═══════════════════════════════════════════════════════════════════════

/// Rebuilds the panel whenever the snapshot changes.
pub fn rebuild_menu_view(
    mut commands: Commands,
    display: Res<MenuDisplay>,
    existing: Query<Entity, With<MenuViewRoot>>,
) {
    if !display.is_changed() {
        return;
    }
    for entity in &existing {
        commands.entity(entity).despawn_recursive();
    }
    let Some(snapshot) = display.current.as_ref() else {
        return;
    };

    commands
        .spawn((
            MenuViewRoot,
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(90.0),
                left: Val::Percent(50.0),
                margin: UiRect::left(Val::Px(-(ROW_WIDTH / 2.0) - 16.0)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(6.0),
                padding: UiRect::all(Val::Px(16.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.8)),
            GlobalZIndex(15),
        ))
        .with_children(|panel| {
            spawn_text(panel, &snapshot.title, 18.0, Color::srgb(1.0, 0.85, 0.5));
            for (index, label) in snapshot.rows.iter().enumerate() {
                let selected = snapshot.cursor_row == Some(index);
                panel
                    .spawn((
                        MenuRow { index },
                        Button,
                        Node {
                            width: Val::Px(ROW_WIDTH),
                            height: Val::Px(ROW_HEIGHT),
                            align_items: AlignItems::Center,
                            padding: UiRect::horizontal(Val::Px(10.0)),
                            ..default()
                        },
                        BackgroundColor(if selected { ROW_SELECTED_COLOR } else { ROW_COLOR }),
                    ))
                    .with_children(|row| {
                        spawn_text(row, label, 15.0, Color::WHITE);
                    });
            }
            spawn_text(panel, &snapshot.footer, 12.0, Color::srgb(0.6, 0.6, 0.6));
        });
}

// ═══════════════════════════════════════════════════════════════════════
// POINTER
// ═══════════════════════════════════════════════════════════════════════

/// A pressed row becomes a click for whichever menu is active.
pub fn menu_row_clicks(
    rows: Query<(&Interaction, &MenuRow), Changed<Interaction>>,
    mut pointer: ResMut<MenuPointer>,
) {
    for (interaction, row) in &rows {
        if *interaction == Interaction::Pressed {
            pointer.clicked_row = Some(row.index);
        }
    }
}
