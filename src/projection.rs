use raylib::prelude::*;

use crate::caster::Ray;
use crate::defs::{
    distance_to_projection_plane, CORRECT_FISH_EYE_EFFECT, TEXTURE_HEIGHT, TEXTURE_WIDTH,
    TILE_SIZE, WINDOW_HEIGHT,
};
use crate::framebuffer::Framebuffer;
use crate::player::Player;
use crate::textures::TextureManager;

const CEILING_COLOR: Color = Color::new(238, 238, 238, 255);
const FLOOR_COLOR: Color = Color::new(238, 221, 204, 255);

// Una pared pegada a la cámara no debe dividir por cero
const MIN_WALL_DISTANCE: f32 = 0.01;

/// Geometría ya proyectada de una columna: tramo vertical en pantalla,
/// altura sin recortar y columna fija de textura.
pub struct WallSlice {
    pub top: u32,
    pub bottom: u32,
    pub height: f32,
    pub tex_u: u32,
    pub material: u8,
}

pub fn project_ray(ray: &Ray, facing: f32, correct_fish_eye: bool) -> WallSlice {
    let distance = if correct_fish_eye {
        ray.distance * (ray.angle - facing).cos()
    } else {
        ray.distance
    };
    let distance = distance.max(MIN_WALL_DISTANCE);

    let height = (TILE_SIZE / distance) * distance_to_projection_plane();
    let half_height = height / 2.0;
    let half_window = WINDOW_HEIGHT as f32 / 2.0;
    let top = (half_window - half_height).max(0.0) as u32;
    let bottom = ((half_window + half_height).min(WINDOW_HEIGHT as f32)) as u32;

    // la coordenada horizontal de textura es fija para toda la columna:
    // cara vertical repite a lo largo de y, cara horizontal a lo largo de x
    let wall_hit = if ray.hits_vertically { ray.hit_y } else { ray.hit_x };
    let offset = wall_hit.rem_euclid(TILE_SIZE);
    let tex_u = (((offset / TILE_SIZE) * TEXTURE_WIDTH as f32) as u32).min(TEXTURE_WIDTH - 1);

    WallSlice {
        top,
        bottom,
        height,
        tex_u,
        material: ray.material,
    }
}

/// Fila de textura para la fila de pantalla `y` dentro del tramo de pared.
/// Se mide desde el tope sin recortar para que paredes más altas que la
/// ventana sigan muestreando la porción visible correcta.
pub fn texel_row(slice: &WallSlice, y: u32) -> u32 {
    let half_window = WINDOW_HEIGHT as f32 / 2.0;
    let unclamped_top = half_window - slice.height / 2.0;
    let v = (y as f32 - unclamped_top) * (TEXTURE_HEIGHT as f32 / slice.height);
    (v.max(0.0) as u32).min(TEXTURE_HEIGHT - 1)
}

/// Pinta cada columna: cielo plano, tramo de pared texturizado, piso plano.
pub fn render_wall_projection(
    framebuffer: &mut Framebuffer,
    player: &Player,
    rays: &[Ray],
    texman: &TextureManager,
) {
    for (x, ray) in rays.iter().enumerate() {
        let slice = project_ray(ray, player.a, CORRECT_FISH_EYE_EFFECT);
        for y in 0..WINDOW_HEIGHT {
            let color = if y < slice.top {
                CEILING_COLOR
            } else if y < slice.bottom {
                texman.get_pixel_color(slice.material, slice.tex_u, texel_row(&slice, y))
            } else {
                FLOOR_COLOR
            };
            framebuffer.set_pixel_color(x as u32, y, color);
        }
    }
}
