// main.rs
#![allow(dead_code)]

mod caster;
mod defs;
mod framebuffer;
mod line;
mod map;
mod player;
mod process_events;
mod projection;
mod textures;

use std::thread;
use std::time::Instant;

use raylib::prelude::*;

use caster::{cast_all, Ray};
use defs::{
    FRAME_TARGET_TIME, MINIMAP_SCALE, NUM_RAYS, TILE_SIZE, WINDOW_HEIGHT, WINDOW_WIDTH,
};
use framebuffer::Framebuffer;
use map::Map;
use player::Player;
use process_events::process_events;
use projection::render_wall_projection;
use textures::TextureManager;

/// Estado de la simulación que viaja por el loop: jugador, mapa, bandera de
/// corrida y el reloj del frame anterior.
struct Game {
    player: Player,
    map: Map,
    running: bool,
    last_frame: Instant,
}

impl Game {
    fn new(map: Map) -> Self {
        Self {
            player: Player::new(1.5 * TILE_SIZE, 1.5 * TILE_SIZE, 0.0),
            map,
            running: true,
            last_frame: Instant::now(),
        }
    }

    /// Pacing cooperativo + avance del jugador con el dt real.
    fn update(&mut self) {
        let elapsed = self.last_frame.elapsed();
        if elapsed < FRAME_TARGET_TIME {
            thread::sleep(FRAME_TARGET_TIME - elapsed);
        }
        let now = Instant::now();
        let delta_time = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        self.player.advance(delta_time, &self.map);
    }
}

fn minimap_cell_color(material: u8) -> Color {
    match material {
        0 => Color::new(25, 25, 25, 255),
        1 => Color::LIGHTGRAY,
        2 => Color::SKYBLUE,
        3 => Color::BEIGE,
        _ => Color::WHITE,
    }
}

/// Overlay 2D en la esquina: celdas del mapa, rayos del frame y el jugador.
fn render_minimap(framebuffer: &mut Framebuffer, game: &Game, rays: &[Ray]) {
    let cell = (TILE_SIZE * MINIMAP_SCALE).ceil() as u32;

    for row in 0..game.map.height() {
        for col in 0..game.map.width() {
            let material = game.map.material_at(col as i32, row as i32);
            framebuffer.set_current_color(minimap_cell_color(material));
            framebuffer.draw_rect(
                (col as f32 * TILE_SIZE * MINIMAP_SCALE) as u32,
                (row as f32 * TILE_SIZE * MINIMAP_SCALE) as u32,
                cell,
                cell,
            );
        }
    }

    let origin = Vector2::new(
        game.player.pos.x * MINIMAP_SCALE,
        game.player.pos.y * MINIMAP_SCALE,
    );

    framebuffer.set_current_color(Color::new(255, 220, 120, 255));
    for ray in rays {
        let target = Vector2::new(ray.hit_x * MINIMAP_SCALE, ray.hit_y * MINIMAP_SCALE);
        line::line(framebuffer, origin, target);
    }

    framebuffer.set_current_color(Color::RED);
    framebuffer.draw_rect(
        (origin.x as u32).saturating_sub(2),
        (origin.y as u32).saturating_sub(2),
        4,
        4,
    );
}

fn main() {
    let (mut window, raylib_thread) = raylib::init()
        .size(WINDOW_WIDTH as i32, WINDOW_HEIGHT as i32)
        .title("Raycaster")
        .build();

    let map = Map::load("map.txt").unwrap_or_else(Map::builtin);
    let texman = TextureManager::new();
    texman
        .validate_map(&map)
        .expect("el mapa usa materiales sin textura");

    let mut framebuffer = Framebuffer::new(WINDOW_WIDTH, WINDOW_HEIGHT);

    // textura persistente donde se sube el color buffer cada frame
    let screen_image =
        Image::gen_image_color(WINDOW_WIDTH as i32, WINDOW_HEIGHT as i32, Color::BLACK);
    let mut screen_texture = window
        .load_texture_from_image(&raylib_thread, &screen_image)
        .expect("no pude crear la textura de pantalla");

    let mut game = Game::new(map);

    while game.running && !window.window_should_close() {
        game.running = process_events(&window, &mut game.player);

        game.update();

        let rays = cast_all(&game.map, &game.player, NUM_RAYS);

        framebuffer.clear();
        render_wall_projection(&mut framebuffer, &game.player, &rays, &texman);
        render_minimap(&mut framebuffer, &game, &rays);

        framebuffer.upload_to_texture(&mut screen_texture);

        let fps = window.get_fps();
        let mut d = window.begin_drawing(&raylib_thread);
        d.clear_background(Color::BLACK);
        d.draw_texture(&screen_texture, 0, 0, Color::WHITE);
        d.draw_text(&format!("FPS: {}", fps), 10, WINDOW_HEIGHT as i32 - 30, 20, Color::WHITE);
    }
    // al salir del loop, raylib libera ventana y texturas al soltar los handles
}
