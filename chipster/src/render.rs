use chip8::display::Display;
use chip8::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// Renders the framebuffer as text, packing two pixel rows into each line
/// with half-block characters.
pub fn render_text(display: &Display) -> String {
    let mut out = String::with_capacity((DISPLAY_WIDTH * 3 + 1) * DISPLAY_HEIGHT / 2);

    for row in 0..DISPLAY_HEIGHT / 2 {
        for x in 0..DISPLAY_WIDTH {
            let top = display.get(x, row * 2) != 0;
            let bottom = display.get(x, row * 2 + 1) != 0;
            out.push(match (top, bottom) {
                (true, true) => '█',
                (true, false) => '▀',
                (false, true) => '▄',
                (false, false) => ' ',
            });
        }
        out.push('\n');
    }

    out
}
