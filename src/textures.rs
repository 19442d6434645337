use std::collections::HashMap;

use rand::Rng;
use raylib::prelude::*;

use crate::defs::{TEXTURE_HEIGHT, TEXTURE_WIDTH};
use crate::map::Map;

/// Un pixmap inmutable (CPU) para samplear por pixel.
struct Pixmap {
    w: u32,
    h: u32,
    px: Vec<Color>,
}

impl Pixmap {
    fn new(w: u32, h: u32, px: Vec<Color>) -> Self {
        Self { w, h, px }
    }

    // el módulo mantiene cualquier coordenada dentro de la imagen
    #[inline]
    fn sample(&self, x: u32, y: u32) -> Color {
        let xi = (x % self.w) as usize;
        let yi = (y % self.h) as usize;
        self.px[yi * self.w as usize + xi]
    }
}

/// Texturas de pared por id de material (los ids son 1-based; 0 es "sin pared").
pub struct TextureManager {
    maps: HashMap<u8, Pixmap>,
}

impl TextureManager {
    /// Carga PNGs de assets/ si existen; completa con fallbacks procedurales.
    pub fn new() -> Self {
        let mut maps = HashMap::new();

        let candidates: &[(&str, u8)] = &[
            ("assets/wall1.png", 1),
            ("assets/wall2.png", 2),
            ("assets/wall3.png", 3),
            ("assets/wall4.png", 4),
        ];
        for (path, id) in candidates {
            if let Ok(mut img) = Image::load_image(path) {
                img.resize(TEXTURE_WIDTH as i32, TEXTURE_HEIGHT as i32);
                let data = img.get_image_data().to_vec();
                maps.insert(*id, Pixmap::new(TEXTURE_WIDTH, TEXTURE_HEIGHT, data));
            }
        }

        let mut tm = Self { maps };
        tm.fill_fallbacks();
        tm
    }

    /// Solo pixmaps procedurales, sin tocar disco.
    pub fn with_fallbacks() -> Self {
        let mut tm = Self { maps: HashMap::new() };
        tm.fill_fallbacks();
        tm
    }

    fn fill_fallbacks(&mut self) {
        let mut rng = rand::thread_rng();
        for id in 1..=4u8 {
            if self.maps.contains_key(&id) {
                continue;
            }
            let pm = match id {
                1 => make_brick(Color::new(170, 74, 68, 255), &mut rng),
                2 => make_checker(Color::new(60, 90, 170, 255)),
                3 => make_brick(Color::new(118, 120, 128, 255), &mut rng),
                _ => make_checker(Color::new(70, 140, 80, 255)),
            };
            self.maps.insert(id, pm);
        }
    }

    /// Todo id no nulo del mapa debe tener textura cargada; si no, el error
    /// se reporta al arranque en vez de esconderse durante el render.
    pub fn validate_map(&self, map: &Map) -> Result<(), String> {
        for row in 0..map.height() {
            for col in 0..map.width() {
                let id = map.material_at(col as i32, row as i32);
                if id != 0 && !self.maps.contains_key(&id) {
                    return Err(format!(
                        "la celda ({}, {}) usa el material {} y no hay textura para él",
                        col, row, id
                    ));
                }
            }
        }
        Ok(())
    }

    pub fn get_pixel_color(&self, id: u8, tx: u32, ty: u32) -> Color {
        match self.maps.get(&id) {
            Some(pm) => pm.sample(tx, ty),
            // rayos centinela (material 0) degradan a un gris lejano
            None => Color::new(90, 90, 90, 255),
        }
    }

    pub fn size(&self, id: u8) -> Option<(u32, u32)> {
        self.maps.get(&id).map(|p| (p.w, p.h))
    }
}

/// Damero simple con casillas aclaradas.
fn make_checker(base: Color) -> Pixmap {
    let (w, h) = (TEXTURE_WIDTH, TEXTURE_HEIGHT);
    let mut px = vec![base; (w * h) as usize];
    let cell = 8;
    for y in 0..h {
        for x in 0..w {
            if ((x / cell) + (y / cell)) % 2 == 0 {
                let i = (y * w + x) as usize;
                let c = px[i];
                px[i] = Color::new(
                    c.r.saturating_add(24),
                    c.g.saturating_add(24),
                    c.b.saturating_add(24),
                    255,
                );
            }
        }
    }
    Pixmap::new(w, h, px)
}

/// Ladrillos con mortero y tono variable por ladrillo.
fn make_brick(base: Color, rng: &mut impl Rng) -> Pixmap {
    const BRICK_W: u32 = 16;
    const BRICK_H: u32 = 8;
    const MORTAR: Color = Color::new(46, 42, 40, 255);

    let (w, h) = (TEXTURE_WIDTH, TEXTURE_HEIGHT);
    let cols = w / BRICK_W + 2;
    let rows = h / BRICK_H + 1;
    let shades: Vec<i16> = (0..cols * rows).map(|_| rng.gen_range(-18..=18)).collect();

    let mut px = vec![MORTAR; (w * h) as usize];
    for y in 0..h {
        let brick_row = y / BRICK_H;
        // filas alternadas corridas medio ladrillo
        let offset = if brick_row % 2 == 0 { 0 } else { BRICK_W / 2 };
        for x in 0..w {
            let bx = (x + offset) % BRICK_W;
            let by = y % BRICK_H;
            if bx < 1 || by < 1 {
                continue; // línea de mortero
            }
            let brick_col = (x + offset) / BRICK_W;
            let d = shades[(brick_row * cols + brick_col) as usize];
            let tone = |v: u8| -> u8 { (v as i16 + d).clamp(0, 255) as u8 };
            px[(y * w + x) as usize] = Color::new(tone(base.r), tone(base.g), tone(base.b), 255);
        }
    }
    Pixmap::new(w, h, px)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallbacks_cover_the_builtin_materials() {
        let tm = TextureManager::with_fallbacks();
        for id in 1..=4u8 {
            assert_eq!(tm.size(id), Some((TEXTURE_WIDTH, TEXTURE_HEIGHT)));
        }
        tm.validate_map(&Map::builtin()).unwrap();
    }

    #[test]
    fn validation_rejects_materials_without_texture() {
        let tm = TextureManager::with_fallbacks();
        let map = Map::from_rows(vec![vec![9, 0], vec![0, 1]]);
        assert!(tm.validate_map(&map).is_err());
    }

    #[test]
    fn sampling_wraps_out_of_range_coordinates() {
        let tm = TextureManager::with_fallbacks();
        let a = tm.get_pixel_color(2, 5, 7);
        let b = tm.get_pixel_color(2, TEXTURE_WIDTH * 3 + 5, TEXTURE_HEIGHT * 2 + 7);
        assert_eq!((a.r, a.g, a.b, a.a), (b.r, b.g, b.b, b.a));
    }

    #[test]
    fn unknown_material_degrades_to_a_flat_color() {
        let tm = TextureManager::with_fallbacks();
        let c = tm.get_pixel_color(0, 3, 3);
        assert_eq!((c.r, c.g, c.b), (90, 90, 90));
    }
}
