use raylib::core::texture::RaylibTexture2D; // trait para usar .update_texture()
use raylib::prelude::*;

/// Color buffer en CPU donde se pinta todo el frame antes de presentarlo.
pub struct Framebuffer {
    pub color_buffer: Vec<Color>,
    pub width: u32,
    pub height: u32,
    pub background_color: Color,
    pub current_color: Color,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let bg = Color::BLACK;
        Self {
            color_buffer: vec![bg; (width * height) as usize],
            width,
            height,
            background_color: bg,
            current_color: Color::WHITE,
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.color_buffer.fill(self.background_color);
    }

    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32) {
        if x < self.width && y < self.height {
            self.color_buffer[(y * self.width + x) as usize] = self.current_color;
        }
    }

    #[inline]
    pub fn set_pixel_color(&mut self, x: u32, y: u32, color: Color) {
        if x < self.width && y < self.height {
            self.color_buffer[(y * self.width + x) as usize] = color;
        }
    }

    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Color {
        if x < self.width && y < self.height {
            return self.color_buffer[(y * self.width + x) as usize];
        }
        self.background_color
    }

    #[inline]
    pub fn set_current_color(&mut self, c: Color) {
        self.current_color = c;
    }

    #[inline]
    pub fn set_background_color(&mut self, c: Color) {
        self.background_color = c;
    }

    /// Rectángulo relleno con current_color, recortado al borde del buffer.
    pub fn draw_rect(&mut self, x: u32, y: u32, w: u32, h: u32) {
        let x1 = x.saturating_add(w).min(self.width);
        let y1 = y.saturating_add(h).min(self.height);
        for yy in y..y1 {
            let base = (yy * self.width) as usize;
            for xx in x..x1 {
                self.color_buffer[base + xx as usize] = self.current_color;
            }
        }
    }

    /// Sube los píxeles a una textura persistente del mismo tamaño.
    pub fn upload_to_texture(&self, tex: &mut Texture2D) {
        // &[Color] → &[u8] (RGBA8) sin copiar
        let byte_len = self.color_buffer.len() * std::mem::size_of::<Color>();
        let bytes: &[u8] = unsafe {
            std::slice::from_raw_parts(self.color_buffer.as_ptr() as *const u8, byte_len)
        };
        let _ = tex.update_texture(bytes);
    }
}
