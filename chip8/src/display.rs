pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Monochrome framebuffer, one byte (0 or 1) per pixel, row-major.
pub struct Display {
    pixels: [u8; DISPLAY_WIDTH * DISPLAY_HEIGHT],
    draw_flag: bool,
}

impl Display {
    pub fn new() -> Display {
        Display {
            pixels: [0; DISPLAY_WIDTH * DISPLAY_HEIGHT],
            draw_flag: false,
        }
    }

    pub fn clear(&mut self) {
        for pixel in self.pixels.iter_mut() {
            *pixel = 0;
        }
    }

    /// XORs `sprite` onto the screen with its top-left corner at (x, y).
    /// Each row is one byte, MSB first. Pixels falling off an edge wrap to
    /// the opposite one. Returns `true` if any lit pixel was turned off.
    pub fn draw(&mut self, x: usize, y: usize, sprite: &[u8]) -> bool {
        let mut collision_bit = false;

        for (sy, byte) in sprite.iter().enumerate() {
            let dy = (y + sy) % DISPLAY_HEIGHT;
            for sx in 0..8 {
                let bit_mask = 0b1000_0000 >> sx;
                if (byte & bit_mask) != 0 {
                    let dx = (x + sx) % DISPLAY_WIDTH;
                    let index = dy * DISPLAY_WIDTH + dx;

                    if self.pixels[index] == 1 {
                        collision_bit = true;
                    }
                    self.pixels[index] ^= 1;
                }
            }
        }

        self.draw_flag = true;
        collision_bit
    }

    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.pixels[y * DISPLAY_WIDTH + x]
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn draw_flag(&self) -> bool {
        self.draw_flag
    }

    /// Reads and clears the draw flag in one go.
    pub fn take_draw_flag(&mut self) -> bool {
        let draw_flag = self.draw_flag;
        self.draw_flag = false;
        draw_flag
    }

    pub fn clear_draw_flag(&mut self) {
        self.draw_flag = false;
    }

    pub(crate) fn reset(&mut self) {
        self.clear();
        self.draw_flag = false;
    }
}
