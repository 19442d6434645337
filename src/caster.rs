use std::f32::consts::{FRAC_PI_2, PI, TAU};

use crate::defs::{FOV_ANGLE, MAX_RAY_DISTANCE, MAX_RAY_STEPS, TILE_SIZE};
use crate::map::Map;
use crate::player::Player;

// Rayos casi alineados a un eje: la familia de cruces del eje contrario no existe
const MIN_TAN: f32 = 1e-6;
const MAX_TAN: f32 = 1e6;

/// Envuelve el ángulo en [0, 2π).
#[inline]
pub fn normalize_angle(a: f32) -> f32 {
    a.rem_euclid(TAU)
}

#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub angle: f32,
    pub hit_x: f32,
    pub hit_y: f32,
    pub distance: f32, // euclídea cruda, sin corregir
    pub hits_vertically: bool,
    pub material: u8,
}

#[inline]
fn dist2(ax: f32, ay: f32, bx: f32, by: f32) -> f32 {
    let dx = bx - ax;
    let dy = by - ay;
    dx * dx + dy * dy
}

// Empate exacto entre familias: gana el cruce vertical
#[inline]
fn vertical_candidate_wins(dv2: f32, dh2: f32) -> bool {
    dv2 <= dh2
}

/// Recorre la grilla desde (px, py) en la dirección `angle` y devuelve el
/// primer impacto contra una celda ocupada. Avanza de cruce en cruce,
/// alternando entre la familia de líneas horizontales y verticales según
/// cuál candidato quede más cerca.
pub fn cast_ray(map: &Map, px: f32, py: f32, angle: f32) -> Ray {
    let a = normalize_angle(angle);
    let facing_down = a < PI; // y crece hacia abajo
    let facing_right = a < FRAC_PI_2 || a > 3.0 * FRAC_PI_2;
    let tan_a = a.tan();

    // Cruces con líneas horizontales (y = k * TILE_SIZE)
    let mut h_alive = tan_a.abs() > MIN_TAN;
    let mut hx = 0.0;
    let mut hy = 0.0;
    let mut h_step_x = 0.0;
    let mut h_step_y = 0.0;
    if h_alive {
        h_step_y = if facing_down { TILE_SIZE } else { -TILE_SIZE };
        h_step_x = h_step_y / tan_a;
        hy = (py / TILE_SIZE).floor() * TILE_SIZE + if facing_down { TILE_SIZE } else { 0.0 };
        hx = px + (hy - py) / tan_a;
    }

    // Cruces con líneas verticales (x = k * TILE_SIZE)
    let mut v_alive = tan_a.abs() < MAX_TAN;
    let mut vx = 0.0;
    let mut vy = 0.0;
    let mut v_step_x = 0.0;
    let mut v_step_y = 0.0;
    if v_alive {
        v_step_x = if facing_right { TILE_SIZE } else { -TILE_SIZE };
        v_step_y = v_step_x * tan_a;
        vx = (px / TILE_SIZE).floor() * TILE_SIZE + if facing_right { TILE_SIZE } else { 0.0 };
        vy = py + (vx - px) * tan_a;
    }

    for _ in 0..MAX_RAY_STEPS {
        if !h_alive && !v_alive {
            break;
        }
        let dh = if h_alive { dist2(px, py, hx, hy) } else { f32::INFINITY };
        let dv = if v_alive { dist2(px, py, vx, vy) } else { f32::INFINITY };

        if vertical_candidate_wins(dv, dh) {
            // celda justo después de la línea cruzada
            let col = (vx / TILE_SIZE).round() as i32 + if facing_right { 0 } else { -1 };
            let row = (vy / TILE_SIZE).floor() as i32;
            if !map.contains_cell(col, row) {
                v_alive = false;
                continue;
            }
            let material = map.material_at(col, row);
            if material != 0 {
                return Ray {
                    angle: a,
                    hit_x: vx,
                    hit_y: vy,
                    distance: dv.sqrt(),
                    hits_vertically: true,
                    material,
                };
            }
            vx += v_step_x;
            vy += v_step_y;
        } else {
            let row = (hy / TILE_SIZE).round() as i32 + if facing_down { 0 } else { -1 };
            let col = (hx / TILE_SIZE).floor() as i32;
            if !map.contains_cell(col, row) {
                h_alive = false;
                continue;
            }
            let material = map.material_at(col, row);
            if material != 0 {
                return Ray {
                    angle: a,
                    hit_x: hx,
                    hit_y: hy,
                    distance: dh.sqrt(),
                    hits_vertically: false,
                    material,
                };
            }
            hx += h_step_x;
            hy += h_step_y;
        }
    }

    // Mapa abierto o corte de pasos: distancia acotada y material centinela
    Ray {
        angle: a,
        hit_x: px + a.cos() * MAX_RAY_DISTANCE,
        hit_y: py + a.sin() * MAX_RAY_DISTANCE,
        distance: MAX_RAY_DISTANCE,
        hits_vertically: false,
        material: 0,
    }
}

/// Un rayo por columna, de izquierda a derecha.
pub fn cast_all(map: &Map, player: &Player, num_rays: usize) -> Vec<Ray> {
    let mut rays = Vec::with_capacity(num_rays);
    for i in 0..num_rays {
        let t = i as f32 / num_rays as f32;
        let angle = player.a - FOV_ANGLE / 2.0 + FOV_ANGLE * t;
        rays.push(cast_ray(map, player.pos.x, player.pos.y, angle));
    }
    rays
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defs::FOV_ANGLE;

    fn bordered(size: usize) -> Map {
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
    fn normalize_angle_lands_in_domain() {
        for &a in &[-10.0f32, -TAU, -0.1, 0.0, 0.1, TAU, TAU + 0.5, 7.5, 123.456] {
            let n = normalize_angle(a);
            assert!((0.0..TAU).contains(&n), "{} se normalizó a {}", a, n);
        }
    }

    #[test]
    fn cast_all_returns_one_ray_per_column_in_order() {
        let map = bordered(5);
        let player = Player::new(2.5 * TILE_SIZE, 2.5 * TILE_SIZE, FRAC_PI_2);
        let rays = cast_all(&map, &player, 97);
        assert_eq!(rays.len(), 97);
        // barrido de -FOV/2 a +FOV/2; con vista al sur no hay envoltura
        for pair in rays.windows(2) {
            assert!(pair[1].angle > pair[0].angle);
        }
    }

    #[test]
    fn straight_ray_distance_matches_geometry() {
        let map = bordered(7);
        let ray = cast_ray(&map, 3.5 * TILE_SIZE, 3.5 * TILE_SIZE, 0.0);
        // la cara oeste de la pared este está en x = 6 tiles
        assert!((ray.distance - 2.5 * TILE_SIZE).abs() < 1e-3);
        assert!(ray.distance > 0.0 && ray.distance.is_finite());
    }

    #[test]
    fn axis_aligned_rays_report_wall_orientation() {
        let map = bordered(5);
        let (px, py) = (2.5 * TILE_SIZE, 2.5 * TILE_SIZE);
        assert!(cast_ray(&map, px, py, 0.0).hits_vertically); // este
        assert!(cast_ray(&map, px, py, PI).hits_vertically); // oeste
        assert!(!cast_ray(&map, px, py, FRAC_PI_2).hits_vertically); // sur
        assert!(!cast_ray(&map, px, py, 3.0 * FRAC_PI_2).hits_vertically); // norte
    }

    #[test]
    fn equal_candidates_prefer_the_vertical_family() {
        for &d in &[0.0f32, 1.0, 64.0, 9999.5] {
            assert!(vertical_candidate_wins(d, d));
        }
        assert!(vertical_candidate_wins(1.0, 2.0));
        assert!(!vertical_candidate_wins(2.0, 1.0));
    }

    #[test]
    fn diagonal_ray_hits_the_corner_cell() {
        let map = bordered(5);
        let ray = cast_ray(
            &map,
            2.5 * TILE_SIZE,
            2.5 * TILE_SIZE,
            std::f32::consts::FRAC_PI_4,
        );
        assert_eq!(ray.material, 1);
        assert!((ray.hit_x - 4.0 * TILE_SIZE).abs() < 1e-2);
        assert!((ray.hit_y - 4.0 * TILE_SIZE).abs() < 1e-2);
    }

    #[test]
    fn open_map_returns_bounded_sentinel() {
        let map = Map::from_rows(vec![vec![0u8; 8]; 8]);
        let ray = cast_ray(&map, 4.0 * TILE_SIZE, 4.0 * TILE_SIZE, 0.7);
        assert_eq!(ray.material, 0);
        assert_eq!(ray.distance, MAX_RAY_DISTANCE);
        assert!(ray.distance.is_finite());
    }

    #[test]
    fn east_ray_in_bordered_room_hits_east_wall() {
        // jugador en el centro de la celda (2, 2); el único rayo sale con ángulo 0
        let map = bordered(5);
        let player = Player::new(2.5 * TILE_SIZE, 2.5 * TILE_SIZE, FOV_ANGLE / 2.0);
        let rays = cast_all(&map, &player, 1);
        assert_eq!(rays.len(), 1);
        let ray = &rays[0];
        assert!((ray.hit_x - 4.0 * TILE_SIZE).abs() < 1e-3);
        assert!((ray.hit_y - 2.5 * TILE_SIZE).abs() < 1e-3);
        assert!(ray.hits_vertically);
        assert_eq!(ray.material, 1);
        assert!((ray.distance - 1.5 * TILE_SIZE).abs() < 1e-3);
    }
}
