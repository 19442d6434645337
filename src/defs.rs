// defs.rs
use std::time::Duration;

// Tamaño de celda en unidades de mundo (coherente con colisiones y texturas)
pub const TILE_SIZE: f32 = 64.0;

// Ventana y proyección
pub const WINDOW_WIDTH: u32 = 800;
pub const WINDOW_HEIGHT: u32 = 600;
pub const FOV_ANGLE: f32 = std::f32::consts::PI / 3.0; // 60°

// Un rayo por columna de pantalla
pub const NUM_RAYS: usize = WINDOW_WIDTH as usize;

// Las texturas de pared se remuestrean a este tamaño si el PNG difiere
pub const TEXTURE_WIDTH: u32 = 64;
pub const TEXTURE_HEIGHT: u32 = 64;

// ~60 FPS
pub const FRAME_TARGET_TIME: Duration = Duration::from_millis(16);

pub const CORRECT_FISH_EYE_EFFECT: bool = true;

// Corte defensivo del caster para mapas sin borde cerrado
pub const MAX_RAY_DISTANCE: f32 = 3000.0;
pub const MAX_RAY_STEPS: usize = 256;

// Overlay 2D
pub const MINIMAP_SCALE: f32 = 0.2;

/// Distancia al plano de proyección: media pantalla sobre tan(FOV/2).
#[inline]
pub fn distance_to_projection_plane() -> f32 {
    (WINDOW_WIDTH as f32 / 2.0) / (FOV_ANGLE / 2.0).tan()
}
