use crate::defs::TILE_SIZE;

// Grilla por defecto si no hay map.txt al lado del binario
const DEFAULT_MAP: &str = "\
11111111111111111111
1                  1
1                  1
1       22    33   1
1       2      3   1
1       2          1
1                  1
1  2               1
1  2       333     1
1  2         3     1
1            3     1
1                  1
11111111111111111111
";

/// Grilla inmutable de materiales; 0 es celda transitable.
pub struct Map {
    grid: Vec<Vec<u8>>,
}

impl Map {
    pub fn from_rows(grid: Vec<Vec<u8>>) -> Self {
        Self { grid }
    }

    /// Parsea dígitos; espacio y '0' son piso, lo desconocido cuenta como pared.
    pub fn from_text(text: &str) -> Self {
        let mut grid: Vec<Vec<u8>> = Vec::new();
        for line in text.lines() {
            if line.trim().is_empty() {
                continue;
            }
            let row: Vec<u8> = line
                .chars()
                .map(|c| match c {
                    ' ' | '0' => 0,
                    c if c.is_ascii_digit() => c as u8 - b'0',
                    _ => 1,
                })
                .collect();
            grid.push(row);
        }

        // empareja filas desiguales, el relleno es sólido
        let max_width = grid.iter().map(|r| r.len()).max().unwrap_or(0);
        for row in &mut grid {
            row.resize(max_width, 1);
        }

        Self { grid }
    }

    pub fn load(path: &str) -> Option<Self> {
        let text = std::fs::read_to_string(path).ok()?;
        let map = Self::from_text(&text);
        if map.height() == 0 { None } else { Some(map) }
    }

    pub fn builtin() -> Self {
        Self::from_text(DEFAULT_MAP)
    }

    pub fn width(&self) -> usize {
        self.grid.first().map_or(0, |r| r.len())
    }

    pub fn height(&self) -> usize {
        self.grid.len()
    }

    pub fn contains_cell(&self, col: i32, row: i32) -> bool {
        col >= 0 && row >= 0 && (row as usize) < self.height() && (col as usize) < self.width()
    }

    /// Material de la celda; fuera del mapa devuelve 0.
    pub fn material_at(&self, col: i32, row: i32) -> u8 {
        if self.contains_cell(col, row) {
            self.grid[row as usize][col as usize]
        } else {
            0
        }
    }

    /// Coordenadas de mundo; fuera del mapa cuenta como sólido.
    pub fn is_blocked(&self, x: f32, y: f32) -> bool {
        let col = (x / TILE_SIZE).floor() as i32;
        let row = (y / TILE_SIZE).floor() as i32;
        if !self.contains_cell(col, row) {
            return true;
        }
        self.grid[row as usize][col as usize] != 0
    }
}
