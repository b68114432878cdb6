use core::fmt;

pub const STACK_DEPTH: usize = 16;

/// Return address stack. `sp` counts occupied frames.
pub struct Stack {
    sp: usize,
    frames: [u16; STACK_DEPTH],
}

impl Stack {
    pub fn new() -> Stack {
        Stack {
            sp: 0,
            frames: [0; STACK_DEPTH],
        }
    }

    pub fn pop(&mut self) -> Option<u16> {
        if self.sp == 0 {
            return None;
        }
        self.sp -= 1;
        Some(self.frames[self.sp])
    }

    /// Returns `false` and leaves the stack as is when it is full.
    pub fn push(&mut self, value: u16) -> bool {
        if self.sp == STACK_DEPTH {
            return false;
        }
        self.frames[self.sp] = value;
        self.sp += 1;
        true
    }

    pub fn depth(&self) -> usize {
        self.sp
    }

    pub fn clear(&mut self) {
        self.sp = 0;
        self.frames = [0; STACK_DEPTH];
    }
}

impl fmt::Debug for Stack {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let frames: Vec<String> = self.frames[..self.sp]
            .iter()
            .map(|frame| format!("{:04x}", frame))
            .collect();
        f.debug_struct("Stack")
            .field("sp", &self.sp)
            .field("frames", &frames)
            .finish()
    }
}
