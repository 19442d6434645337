use raylib::prelude::*;

use crate::caster::normalize_angle;
use crate::map::Map;

pub struct Player {
    pub pos: Vector2,
    pub a: f32,              // ángulo de vista (yaw), siempre en [0, 2π)
    pub turn_direction: i32, // -1 izquierda, 0, 1 derecha
    pub walk_direction: i32, // -1 atrás, 0, 1 adelante
    pub walk_speed: f32,
    pub turn_speed: f32,
}

impl Player {
    pub fn new(x: f32, y: f32, angle: f32) -> Self {
        Self {
            pos: Vector2::new(x, y),
            a: normalize_angle(angle),
            turn_direction: 0,
            walk_direction: 0,
            walk_speed: 150.0,                       // unidades de mundo por segundo
            turn_speed: std::f32::consts::FRAC_PI_2, // rad por segundo
        }
    }

    /// Aplica los intents capturados este frame. La posición candidata se
    /// prueba por eje contra el mapa, así el jugador desliza sobre la pared
    /// cuando solo un eje está bloqueado.
    pub fn advance(&mut self, delta_time: f32, map: &Map) {
        self.a = normalize_angle(
            self.a + self.turn_direction as f32 * self.turn_speed * delta_time,
        );

        let step = self.walk_direction as f32 * self.walk_speed * delta_time;
        let next_x = self.pos.x + self.a.cos() * step;
        let next_y = self.pos.y + self.a.sin() * step;

        if !map.is_blocked(next_x, self.pos.y) {
            self.pos.x = next_x;
        }
        if !map.is_blocked(self.pos.x, next_y) {
            self.pos.y = next_y;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defs::TILE_SIZE;
    use std::f32::consts::TAU;

    fn room(size: usize) -> Map {
        let mut grid = vec![vec![0u8; size]; size];
        for i in 0..size {
            grid[0][i] = 1;
            grid[size - 1][i] = 1;
            grid[i][0] = 1;
            grid[i][size - 1] = 1;
        }
        Map::from_rows(grid)
    }

    #[test]
    fn never_walks_into_a_wall() {
        let map = room(5);
        let mut player = Player::new(1.5 * TILE_SIZE, 1.5 * TILE_SIZE, 0.0);
        player.walk_direction = 1;
        for step in 0..2000 {
            // empuja contra las paredes girando de a ratos
            player.turn_direction = match step % 11 {
                0..=2 => 1,
                3 => -1,
                _ => 0,
            };
            player.advance(0.033, &map);
            assert!(
                !map.is_blocked(player.pos.x, player.pos.y),
                "jugador dentro de pared en ({}, {})",
                player.pos.x,
                player.pos.y
            );
        }
    }

    #[test]
    fn backwards_walk_respects_collision_too() {
        let map = room(5);
        let mut player = Player::new(2.5 * TILE_SIZE, 2.5 * TILE_SIZE, 0.0);
        player.walk_direction = -1;
        for _ in 0..500 {
            player.advance(0.05, &map);
            assert!(!map.is_blocked(player.pos.x, player.pos.y));
        }
        // quedó apoyado contra la pared oeste
        assert!(player.pos.x >= TILE_SIZE);
        assert!(player.pos.x < 1.5 * TILE_SIZE);
    }

    #[test]
    fn slides_along_wall_when_one_axis_is_blocked() {
        let map = room(6);
        // pegado a la pared norte, mirando en diagonal arriba-derecha
        let mut player =
            Player::new(1.5 * TILE_SIZE, 1.2 * TILE_SIZE, -std::f32::consts::FRAC_PI_4);
        player.walk_direction = 1;
        let start_x = player.pos.x;
        for _ in 0..100 {
            player.advance(0.016, &map);
        }
        assert!(player.pos.x > start_x); // el eje libre sí avanzó
        assert!(player.pos.y >= TILE_SIZE); // nunca entró a la fila de pared
        assert!(!map.is_blocked(player.pos.x, player.pos.y));
    }

    #[test]
    fn turning_keeps_the_angle_normalized() {
        let map = room(5);
        let mut player = Player::new(2.5 * TILE_SIZE, 2.5 * TILE_SIZE, 0.1);
        player.turn_direction = -1;
        for _ in 0..500 {
            player.advance(0.05, &map);
            assert!(
                (0.0..TAU).contains(&player.a),
                "ángulo fuera de rango: {}",
                player.a
            );
        }
    }
}
