use bevy::prelude::*;
use crate::shared::*;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            PreUpdate,
            (manage_input_context, reset_and_read_input).chain(),
        );
    }
}

const DIGIT_KEYS: [(KeyCode, KeyCode, char); 10] = [
    (KeyCode::Digit0, KeyCode::Numpad0, '0'),
    (KeyCode::Digit1, KeyCode::Numpad1, '1'),
    (KeyCode::Digit2, KeyCode::Numpad2, '2'),
    (KeyCode::Digit3, KeyCode::Numpad3, '3'),
    (KeyCode::Digit4, KeyCode::Numpad4, '4'),
    (KeyCode::Digit5, KeyCode::Numpad5, '5'),
    (KeyCode::Digit6, KeyCode::Numpad6, '6'),
    (KeyCode::Digit7, KeyCode::Numpad7, '7'),
    (KeyCode::Digit8, KeyCode::Numpad8, '8'),
    (KeyCode::Digit9, KeyCode::Numpad9, '9'),
];

fn read_list_navigation(
    keys: &ButtonInput<KeyCode>,
    bindings: &KeyBindings,
    input: &mut PlayerInput,
) {
    input.ui_up = keys.just_pressed(bindings.move_up) || keys.just_pressed(KeyCode::ArrowUp);
    input.ui_down = keys.just_pressed(bindings.move_down) || keys.just_pressed(KeyCode::ArrowDown);
    input.ui_left = keys.just_pressed(bindings.move_left) || keys.just_pressed(KeyCode::ArrowLeft);
    input.ui_right =
        keys.just_pressed(bindings.move_right) || keys.just_pressed(KeyCode::ArrowRight);
    input.ui_confirm = keys.just_pressed(bindings.ui_confirm);
    input.submit = keys.just_pressed(bindings.ui_submit);
    input.ui_cancel = keys.just_pressed(bindings.ui_cancel);
}

/// The single point where hardware input becomes game actions.
fn reset_and_read_input(
    keys: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    bindings: Res<KeyBindings>,
    context: Res<InputContext>,
    mut input: ResMut<PlayerInput>,
) {
    *input = PlayerInput::default();

    input.any_key =
        keys.get_just_pressed().next().is_some() || mouse.get_just_pressed().next().is_some();

    match *context {
        InputContext::Disabled => {}

        InputContext::Gameplay => {
            let mut axis = Vec2::ZERO;
            if keys.pressed(bindings.move_up) || keys.pressed(KeyCode::ArrowUp) {
                axis.y += 1.0;
            }
            if keys.pressed(bindings.move_down) || keys.pressed(KeyCode::ArrowDown) {
                axis.y -= 1.0;
            }
            if keys.pressed(bindings.move_left) || keys.pressed(KeyCode::ArrowLeft) {
                axis.x -= 1.0;
            }
            if keys.pressed(bindings.move_right) || keys.pressed(KeyCode::ArrowRight) {
                axis.x += 1.0;
            }
            input.move_axis = axis.normalize_or_zero();

            input.interact = keys.just_pressed(bindings.interact);
            input.stoke = keys.just_pressed(bindings.stoke);
            input.cook = keys.just_pressed(bindings.cook);
            input.cycle_zone = keys.just_pressed(bindings.cycle_zone);

            // Camp dialogs and departure prompts open without leaving gameplay.
            read_list_navigation(&keys, &bindings, &mut input);
        }

        InputContext::Narrative => {
            read_list_navigation(&keys, &bindings, &mut input);
            input.use_item = keys.just_pressed(bindings.use_item);
            input.equip_item = keys.just_pressed(bindings.equip_item);
        }

        InputContext::Menu => {
            read_list_navigation(&keys, &bindings, &mut input);
        }

        InputContext::TextEntry => {
            for (digit, numpad, c) in DIGIT_KEYS {
                if keys.just_pressed(digit) || keys.just_pressed(numpad) {
                    input.typed.push(c);
                }
            }
            input.backspace = keys.just_pressed(KeyCode::Backspace);
            input.submit = keys.just_pressed(bindings.ui_submit)
                || keys.just_pressed(KeyCode::NumpadEnter);
            input.ui_cancel = keys.just_pressed(bindings.ui_cancel);
        }
    }
}

/// Derives the input context from scene and screen. One system, so no
/// domain has to guard against stray keys itself.
fn manage_input_context(
    scene: Res<State<GameScene>>,
    screen: Res<State<ScreenState>>,
    focus: Res<TextEntryFocus>,
    mut context: ResMut<InputContext>,
) {
    let next = match (*scene.get(), *screen.get()) {
        (GameScene::Loading, _) => InputContext::Disabled,
        (GameScene::Camping, _) | (GameScene::Zone, ScreenState::None) => InputContext::Gameplay,
        (GameScene::Zone, s) if s.is_narrative() => InputContext::Narrative,
        (GameScene::Zone, _) if focus.0 => InputContext::TextEntry,
        (GameScene::Zone, _) => InputContext::Menu,
    };
    if *context != next {
        debug!("Input context {:?} -> {:?}", *context, next);
        *context = next;
    }
}
