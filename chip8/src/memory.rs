pub const MEMORY_SIZE: usize = 0x1000;
/// Where programs are loaded and where execution starts.
pub const PROGRAM_START: u16 = 0x200;
pub const FONT_MEMORY_OFFSET: u16 = 0;
/// Bytes per font glyph.
pub const GLYPH_SIZE: u16 = 5;

const ADDR_MASK: u16 = 0x0FFF;

#[cfg_attr(rustfmt, rustfmt_skip)]
pub const FONT_SPRITES: [u8; 80] = [
	0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
	0x20, 0x60, 0x20, 0x20, 0x70, // 1
	0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
	0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
	0x90, 0x90, 0xF0, 0x10, 0x10, // 4
	0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
	0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
	0xF0, 0x10, 0x20, 0x40, 0x40, // 7
	0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
	0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
	0xF0, 0x90, 0xF0, 0x90, 0x90, // A
	0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
	0xF0, 0x80, 0x80, 0x80, 0xF0, // C
	0xE0, 0x90, 0x90, 0x90, 0xE0, // D
	0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
	0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// 4K address space. Every access goes through a 12-bit mask, so computed
/// addresses past 0xFFF wrap around to the bottom of memory.
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    pub fn new() -> Memory {
        let mut memory = Memory {
            bytes: [0; MEMORY_SIZE],
        };
        memory.reset();
        memory
    }

    /// Zeroes everything and copies the font back in.
    pub fn reset(&mut self) {
        self.bytes = [0; MEMORY_SIZE];
        let font_start = FONT_MEMORY_OFFSET as usize;
        self.bytes[font_start..font_start + FONT_SPRITES.len()].copy_from_slice(&FONT_SPRITES);
    }

    pub fn read(&self, addr: u16) -> u8 {
        self.bytes[(addr & ADDR_MASK) as usize]
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        self.bytes[(addr & ADDR_MASK) as usize] = value;
    }

    /// Copies `data` verbatim at `offset`. Fails without writing anything if
    /// `data` doesn't fit below the end of memory.
    pub fn load(&mut self, offset: u16, data: &[u8]) -> crate::Result<()> {
        let start = offset as usize;
        let capacity = MEMORY_SIZE.saturating_sub(start);
        if data.len() > capacity {
            bail!(crate::ErrorKind::ProgramTooLarge(data.len(), capacity));
        }
        self.bytes[start..start + data.len()].copy_from_slice(data);
        Ok(())
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}
