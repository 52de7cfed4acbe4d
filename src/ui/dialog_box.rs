use bevy::prelude::*;
use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// MARKER COMPONENTS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component)]
pub struct DialogBoxRoot;

#[derive(Component)]
pub struct DialogBoxText;

// ═══════════════════════════════════════════════════════════════════════
// SPAWN
// ═══════════════════════════════════════════════════════════════════════

/// Bottom panel, hidden until a domain writes to `DialogBox`.
pub fn spawn_dialog_box(mut commands: Commands) {
    commands
        .spawn((
            DialogBoxRoot,
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(20.0),
                left: Val::Percent(50.0),
                width: Val::Px(700.0),
                min_height: Val::Px(120.0),
                margin: UiRect::left(Val::Px(-350.0)),
                padding: UiRect::all(Val::Px(16.0)),
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.05, 0.04, 0.03, 0.9)),
            BorderColor(Color::srgb(0.75, 0.55, 0.3)),
            GlobalZIndex(10),
            Visibility::Hidden,
        ))
        .with_children(|panel| {
            panel.spawn((
                DialogBoxText,
                Text::new(""),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(0.95, 0.92, 0.85)),
            ));
        });
}

// ═══════════════════════════════════════════════════════════════════════
// UPDATE
// ═══════════════════════════════════════════════════════════════════════

pub fn update_dialog_box(
    dialog: Res<DialogBox>,
    mut root: Query<&mut Visibility, With<DialogBoxRoot>>,
    mut text: Query<&mut Text, With<DialogBoxText>>,
) {
    if !dialog.is_changed() {
        return;
    }
    for mut visibility in &mut root {
        *visibility = if dialog.is_open() {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
    if let Some(shown) = dialog.text() {
        for mut line in &mut text {
            **line = shown.to_string();
        }
    }
}
