use raylib::prelude::*;

use crate::player::Player;

/// Traduce el teclado a los intents del frame (girar/caminar en {-1, 0, 1}).
/// Devuelve false cuando el usuario pide salir.
pub fn process_events(window: &RaylibHandle, player: &mut Player) -> bool {
    player.turn_direction = 0;
    player.walk_direction = 0;

    if window.is_key_down(KeyboardKey::KEY_LEFT) {
        player.turn_direction = -1;
    }
    if window.is_key_down(KeyboardKey::KEY_RIGHT) {
        player.turn_direction = 1;
    }
    if window.is_key_down(KeyboardKey::KEY_UP) {
        player.walk_direction = 1;
    }
    if window.is_key_down(KeyboardKey::KEY_DOWN) {
        player.walk_direction = -1;
    }

    !window.is_key_down(KeyboardKey::KEY_ESCAPE)
}
