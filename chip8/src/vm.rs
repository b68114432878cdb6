use std::fmt;
use std::sync::Arc;

use byteorder::{BigEndian, ByteOrder};
use rand::{Rng, RngCore};

use crate::beeper::{Beeper, LogBeeper};
use crate::display::Display;
use crate::instruction::*;
use crate::keypad::Keypad;
use crate::memory::{Memory, FONT_MEMORY_OFFSET, GLYPH_SIZE, PROGRAM_START};
use crate::regfile::RegFile;
use crate::stack::Stack;
use crate::timer::Timer;
use crate::{ErrorKind, Result};

/// Where to go after an instruction has run.
enum Next {
    Advance,
    Skip,
    Stay,
    Goto(u16),
}

pub struct Chip8 {
    memory: Memory,
    gpr: RegFile,
    stack: Stack,
    pc: u16,
    i: u16,
    opcode: u16,
    dt: Timer,
    st: Timer,
    keypad: Arc<Keypad>,
    rng: Box<dyn RngCore>,
    beeper: Box<dyn Beeper>,
    pub display: Display,
}

impl Chip8 {
    pub fn new() -> Chip8 {
        Chip8::with_rng(Box::new(rand::thread_rng()))
    }

    /// Builds an interpreter that draws `Cxkk` bytes from `rng`.
    pub fn with_rng(rng: Box<dyn RngCore>) -> Chip8 {
        Chip8 {
            memory: Memory::new(),
            gpr: RegFile::new(),
            stack: Stack::new(),
            pc: PROGRAM_START,
            i: 0,
            opcode: 0,
            dt: Timer::new(),
            st: Timer::new(),
            keypad: Arc::new(Keypad::new()),
            rng,
            beeper: Box::new(LogBeeper),
            display: Display::new(),
        }
    }

    pub fn with_program(program: &[u8]) -> Result<Chip8> {
        let mut chip8 = Chip8::new();
        chip8.load_program(program)?;
        Ok(chip8)
    }

    pub fn set_beeper(&mut self, beeper: Box<dyn Beeper>) {
        self.beeper = beeper;
    }

    pub fn reset(&mut self) {
        self.memory.reset();
        self.gpr.clear();
        self.stack.clear();
        self.display.reset();
        self.keypad.release_all();
        self.pc = PROGRAM_START;
        self.i = 0;
        self.opcode = 0;
        self.dt.set(0);
        self.st.set(0);
        debug!("reset");
    }

    /// Resets the machine and copies `program` to 0x200. A program that
    /// doesn't fit is rejected before anything is touched.
    pub fn load_program(&mut self, program: &[u8]) -> Result<()> {
        let capacity = crate::memory::MEMORY_SIZE - PROGRAM_START as usize;
        if program.len() > capacity {
            bail!(ErrorKind::ProgramTooLarge(program.len(), capacity));
        }
        self.reset();
        self.memory.load(PROGRAM_START, program)?;
        debug!("loaded {} bytes at {:04x}", program.len(), PROGRAM_START);
        Ok(())
    }

    /// Runs one fetch-decode-execute cycle, then ticks both timers.
    ///
    /// Unknown opcodes are logged and skipped over without moving PC.
    /// Stack overflow and underflow are reported as errors; PC, the stack and
    /// the timers are left as they were before the call.
    pub fn step(&mut self) -> Result<()> {
        let word = self.fetch();
        self.opcode = word.0;

        match Instruction::decode(word) {
            Ok(instruction) => {
                trace!("{:04x}: {:04x} {:?}", self.pc, word.0, instruction);
                let next = self.execute_instruction(instruction)?;
                self.pc = match next {
                    Next::Advance => self.pc.wrapping_add(2),
                    Next::Skip => self.pc.wrapping_add(4),
                    Next::Stay => self.pc,
                    Next::Goto(addr) => addr,
                };
            }
            Err(e) => warn!("{:04x}: {}", self.pc, e),
        }

        self.update_timers();
        Ok(())
    }

    /// Decodes the instruction at PC without running it.
    pub fn current_instruction(&self) -> Result<Instruction> {
        Ok(Instruction::decode(self.fetch())?)
    }

    fn fetch(&self) -> InstructionWord {
        let bytes = [self.memory.read(self.pc), self.memory.read(self.pc.wrapping_add(1))];
        InstructionWord(BigEndian::read_u16(&bytes))
    }

    fn update_timers(&mut self) {
        self.dt.tick();
        if self.st.tick() {
            self.beeper.beep();
        }
    }

    fn execute_instruction(&mut self, instruction: Instruction) -> Result<Next> {
        use crate::instruction::Instruction::*;

        let next = match instruction {
            ClearScreen => {
                self.display.clear();
                Next::Advance
            }
            Ret => match self.stack.pop() {
                Some(retaddr) => Next::Goto(retaddr.wrapping_add(2)),
                None => return Err(ErrorKind::StackUnderflow(self.pc).into()),
            },
            Jump(addr) => Next::Goto(addr.0),
            Call(addr) => {
                if !self.stack.push(self.pc) {
                    bail!(ErrorKind::StackOverflow(self.pc));
                }
                Next::Goto(addr.0)
            }
            SkipEqImm { vx, imm, inv } => skip_if((self.gpr[vx] == imm.0) != inv),
            SkipEqReg { vx, vy, inv } => skip_if((self.gpr[vx] == self.gpr[vy]) != inv),
            PutImm { vx, imm } => {
                self.gpr[vx] = imm.0;
                Next::Advance
            }
            AddImm { vx, imm } => {
                let x = self.gpr[vx];
                self.gpr[vx] = x.wrapping_add(imm.0);
                Next::Advance
            }
            Apply { vx, vy, f } => {
                self.apply(vx, vy, f);
                Next::Advance
            }
            SetI(addr) => {
                self.i = addr.0;
                Next::Advance
            }
            JumpPlusV0(addr) => Next::Goto(addr.0 + self.gpr[Reg::V0] as u16),
            Randomize { vx, imm } => {
                let random_byte = self.rng.gen::<u8>();
                self.gpr[vx] = random_byte & imm.0;
                Next::Advance
            }
            Draw { vx, vy, n } => {
                let x = self.gpr[vx] as usize;
                let y = self.gpr[vy] as usize;

                let mut sprite = [0u8; 15];
                for (row, byte) in sprite.iter_mut().enumerate().take(n.0 as usize) {
                    *byte = self.memory.read(self.i.wrapping_add(row as u16));
                }

                let collision_bit = self.display.draw(x, y, &sprite[..n.0 as usize]);
                self.gpr.set_flag(collision_bit);
                Next::Advance
            }
            SkipPressed { vx, inv } => skip_if(self.keypad.is_pressed(self.gpr[vx]) != inv),
            GetDT(vx) => {
                self.gpr[vx] = self.dt.get();
                Next::Advance
            }
            WaitKey(vx) => match self.keypad.first_pressed() {
                Some(key) => {
                    self.gpr[vx] = key;
                    Next::Advance
                }
                None => Next::Stay,
            },
            SetDT(vx) => {
                self.dt.set(self.gpr[vx]);
                Next::Advance
            }
            SetST(vx) => {
                self.st.set(self.gpr[vx]);
                Next::Advance
            }
            AddI(vx) => {
                let x = self.gpr[vx] as u16;
                let overflow = self.i as u32 + x as u32 > 0xFFF;
                self.i = self.i.wrapping_add(x);
                self.gpr.set_flag(overflow);
                Next::Advance
            }
            LoadGlyph(vx) => {
                let v = self.gpr[vx] as u16;
                self.i = FONT_MEMORY_OFFSET + v * GLYPH_SIZE;
                Next::Advance
            }
            StoreBCD(vx) => {
                let v = self.gpr[vx];
                let i = self.i;

                self.memory.write(i, v / 100);
                self.memory.write(i.wrapping_add(1), (v / 10) % 10);
                self.memory.write(i.wrapping_add(2), v % 10);
                Next::Advance
            }
            StoreRegs(vx) => {
                let count = vx.index() as u16 + 1;
                for offset in 0..count {
                    let value = self.gpr.read_at_index(offset as usize);
                    self.memory.write(self.i.wrapping_add(offset), value);
                }
                self.i = self.i.wrapping_add(count);
                Next::Advance
            }
            LoadRegs(vx) => {
                let count = vx.index() as u16 + 1;
                for offset in 0..count {
                    let value = self.memory.read(self.i.wrapping_add(offset));
                    self.gpr.write_at_index(offset as usize, value);
                }
                self.i = self.i.wrapping_add(count);
                Next::Advance
            }
        };

        Ok(next)
    }

    /// `8xyN`. The flag is always written after the result, so with
    /// `vx == Vf` the register ends up holding the flag.
    fn apply(&mut self, vx: Reg, vy: Reg, f: Fun) {
        let x = self.gpr[vx];
        let y = self.gpr[vy];

        match f {
            Fun::Id => {
                self.gpr[vx] = y;
            }
            Fun::Or => {
                self.gpr[vx] = x | y;
            }
            Fun::And => {
                self.gpr[vx] = x & y;
            }
            Fun::Xor => {
                self.gpr[vx] = x ^ y;
            }
            Fun::Add => {
                let (v, carry) = x.overflowing_add(y);
                self.gpr[vx] = v;
                self.gpr.set_flag(carry);
            }
            Fun::Subtract => {
                self.gpr[vx] = x.wrapping_sub(y);
                self.gpr.set_flag(x > y);
            }
            Fun::ShiftRight => {
                self.gpr[vx] = x >> 1;
                self.gpr.set_flag(x & 0x01 != 0);
            }
            Fun::SubtractInv => {
                self.gpr[vx] = y.wrapping_sub(x);
                self.gpr.set_flag(y > x);
            }
            Fun::ShiftLeft => {
                self.gpr[vx] = x << 1;
                self.gpr.set_flag(x & 0x80 != 0);
            }
        }
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    pub fn i(&self) -> u16 {
        self.i
    }

    /// Last fetched opcode.
    pub fn opcode(&self) -> u16 {
        self.opcode
    }

    pub fn register(&self, reg: Reg) -> u8 {
        self.gpr[reg]
    }

    pub fn registers(&self) -> &[u8; 16] {
        self.gpr.as_array()
    }

    pub fn memory(&self) -> &[u8] {
        self.memory.as_slice()
    }

    pub fn stack_depth(&self) -> usize {
        self.stack.depth()
    }

    pub fn delay_timer(&self) -> u8 {
        self.dt.get()
    }

    pub fn sound_timer(&self) -> u8 {
        self.st.get()
    }

    pub fn set_delay_timer(&mut self, ticks: u8) {
        self.dt.set(ticks);
    }

    pub fn set_sound_timer(&mut self, ticks: u8) {
        self.st.set(ticks);
    }

    pub fn is_beeping(&self) -> bool {
        self.st.get() != 0
    }

    /// Handle for the input side. Stays valid across `reset`.
    pub fn keypad(&self) -> Arc<Keypad> {
        self.keypad.clone()
    }
}

impl Default for Chip8 {
    fn default() -> Chip8 {
        Chip8::new()
    }
}

fn skip_if(cond: bool) -> Next {
    if cond {
        Next::Skip
    } else {
        Next::Advance
    }
}

impl fmt::Debug for Chip8 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Chip8")
            .field("gpr", &self.gpr)
            .field("pc", &format!("{:04x}", self.pc))
            .field("i", &format!("{:04x}", self.i))
            .field("opcode", &format!("{:04x}", self.opcode))
            .field("dt", &format!("{:02x}", self.dt.get()))
            .field("st", &format!("{:02x}", self.st.get()))
            .field("stack", &self.stack)
            .finish()
    }
}
