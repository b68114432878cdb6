//! CHIP-8 interpreter core.
//!
//! [`Chip8`] owns memory, registers, timers, the call stack, the framebuffer
//! and the keypad. The host loads a program, feeds key presses through the
//! shared [`Keypad`] and calls [`Chip8::step`] once per emulated cycle,
//! redrawing whenever the display's draw flag is set.

// `error_chain!` can recurse deeply
#![recursion_limit = "1024"]

extern crate byteorder;
#[macro_use]
extern crate enum_primitive;
#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate log;
#[cfg(test)]
#[macro_use]
extern crate maplit;
extern crate rand;

mod memory;
mod regfile;
mod stack;
mod timer;
mod vm;

pub mod beeper;
pub mod display;
pub mod instruction;
pub mod keypad;

pub use self::beeper::{Beeper, LogBeeper};
pub use self::display::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
pub use self::keypad::Keypad;
pub use self::memory::{FONT_SPRITES, MEMORY_SIZE, PROGRAM_START};
pub use self::stack::STACK_DEPTH;
pub use self::vm::Chip8;

error_chain! {
    links {
        Instruction(instruction::Error, instruction::ErrorKind);
    }

    errors {
        ProgramTooLarge(len: usize, capacity: usize) {
            description("program too large")
            display("program is {} bytes, only {} fit in memory", len, capacity)
        }
        StackOverflow(pc: u16) {
            description("stack overflow")
            display("stack overflow at {:04x}", pc)
        }
        StackUnderflow(pc: u16) {
            description("stack underflow")
            display("return with empty stack at {:04x}", pc)
        }
    }
}
