pub struct Timer {
    left: u8,
}

impl Timer {
    pub fn new() -> Timer {
        Timer { left: 0 }
    }

    /// Counts down by one. Returns `true` when this tick took the timer
    /// from 1 to 0.
    pub fn tick(&mut self) -> bool {
        match self.left {
            0 => false,
            left => {
                self.left = left - 1;
                left == 1
            }
        }
    }

    pub fn get(&self) -> u8 {
        self.left
    }

    pub fn set(&mut self, ticks: u8) {
        self.left = ticks
    }
}
