use std::sync::atomic::{AtomicBool, Ordering};

pub const KEY_COUNT: usize = 16;

/// Hex keypad state, written by the input side and read by the interpreter.
///
/// Each key is its own atomic, so it can be shared through an `Arc` with an
/// input thread. No ordering is implied between different keys.
#[derive(Debug, Default)]
pub struct Keypad {
    keys: [AtomicBool; KEY_COUNT],
}

impl Keypad {
    pub fn new() -> Keypad {
        Keypad::default()
    }

    pub fn set(&self, key: u8, pressed: bool) {
        self.keys[key as usize % KEY_COUNT].store(pressed, Ordering::Relaxed);
    }

    pub fn press(&self, key: u8) {
        self.set(key, true);
    }

    pub fn release(&self, key: u8) {
        self.set(key, false);
    }

    pub fn is_pressed(&self, key: u8) -> bool {
        self.keys[key as usize % KEY_COUNT].load(Ordering::Relaxed)
    }

    /// Lowest-numbered key currently held down.
    pub fn first_pressed(&self) -> Option<u8> {
        (0..KEY_COUNT as u8).find(|&key| self.is_pressed(key))
    }

    pub fn release_all(&self) {
        for key in self.keys.iter() {
            key.store(false, Ordering::Relaxed);
        }
    }
}
