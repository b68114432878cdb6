use enum_primitive::FromPrimitive;

error_chain! {
    errors {
        UnknownOpcode(word: u16) {
            description("unknown opcode")
            display("unknown opcode: {:04x}", word)
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct InstructionWord(pub u16);

impl InstructionWord {
    pub fn class(self) -> u8 {
        (self.0 >> 12) as u8
    }

    pub fn nnn(self) -> u16 {
        self.0 & 0x0FFF
    }

    pub fn kk(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    pub fn n(self) -> u8 {
        (self.0 & 0xF) as u8
    }

    pub fn x(self) -> u8 {
        ((self.0 & 0x0F00) >> 8) as u8
    }

    pub fn y(self) -> u8 {
        ((self.0 & 0x00F0) >> 4) as u8
    }
}

enum_from_primitive! {
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Reg {
    V0 = 0x0,
    V1 = 0x1,
    V2 = 0x2,
    V3 = 0x3,
    V4 = 0x4,
    V5 = 0x5,
    V6 = 0x6,
    V7 = 0x7,
    V8 = 0x8,
    V9 = 0x9,
    Va = 0xA,
    Vb = 0xB,
    Vc = 0xC,
    Vd = 0xD,
    Ve = 0xE,
    Vf = 0xF,
}
}

impl Reg {
    pub fn index(self) -> u8 {
        self as u8
    }
}

enum_from_primitive! {
/// ALU operation selected by the low nibble of `8xyN`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Fun {
    Id = 0x0,
    Or = 0x1,
    And = 0x2,
    Xor = 0x3,
    Add = 0x4,
    Subtract = 0x5,
    ShiftRight = 0x6,
    SubtractInv = 0x7,
    ShiftLeft = 0xE,
}
}

/// 12-bit address operand.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Addr(pub u16);

/// 8-bit immediate.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Imm(pub u8);

/// 4-bit immediate, only used as the sprite height of `Dxyn`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Imm4(pub u8);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    ClearScreen,
    Ret,
    Jump(Addr),
    Call(Addr),
    SkipEqImm { vx: Reg, imm: Imm, inv: bool },
    SkipEqReg { vx: Reg, vy: Reg, inv: bool },
    PutImm { vx: Reg, imm: Imm },
    AddImm { vx: Reg, imm: Imm },
    Apply { vx: Reg, vy: Reg, f: Fun },
    SetI(Addr),
    JumpPlusV0(Addr),
    Randomize { vx: Reg, imm: Imm },
    Draw { vx: Reg, vy: Reg, n: Imm4 },
    SkipPressed { vx: Reg, inv: bool },
    GetDT(Reg),
    WaitKey(Reg),
    SetDT(Reg),
    SetST(Reg),
    AddI(Reg),
    LoadGlyph(Reg),
    StoreBCD(Reg),
    StoreRegs(Reg),
    LoadRegs(Reg),
}

impl Instruction {
    pub fn decode(word: InstructionWord) -> Result<Instruction> {
        use self::Instruction::*;

        let unknown = || Error::from(ErrorKind::UnknownOpcode(word.0));

        let vx = Reg::from_u8(word.x()).ok_or_else(unknown)?;
        let vy = Reg::from_u8(word.y()).ok_or_else(unknown)?;
        let addr = Addr(word.nnn());
        let imm = Imm(word.kk());

        let instruction = match word.class() {
            0x0 => match word.nnn() {
                0x0E0 => ClearScreen,
                0x0EE => Ret,
                _ => return Err(unknown()),
            },
            0x1 => Jump(addr),
            0x2 => Call(addr),
            0x3 => SkipEqImm { vx, imm, inv: false },
            0x4 => SkipEqImm { vx, imm, inv: true },
            0x5 if word.n() == 0 => SkipEqReg { vx, vy, inv: false },
            0x6 => PutImm { vx, imm },
            0x7 => AddImm { vx, imm },
            0x8 => {
                let f = Fun::from_u8(word.n()).ok_or_else(unknown)?;
                Apply { vx, vy, f }
            }
            0x9 if word.n() == 0 => SkipEqReg { vx, vy, inv: true },
            0xA => SetI(addr),
            0xB => JumpPlusV0(addr),
            0xC => Randomize { vx, imm },
            0xD => Draw { vx, vy, n: Imm4(word.n()) },
            0xE => match word.kk() {
                0x9E => SkipPressed { vx, inv: false },
                0xA1 => SkipPressed { vx, inv: true },
                _ => return Err(unknown()),
            },
            0xF => match word.kk() {
                0x07 => GetDT(vx),
                0x0A => WaitKey(vx),
                0x15 => SetDT(vx),
                0x18 => SetST(vx),
                0x1E => AddI(vx),
                0x29 => LoadGlyph(vx),
                0x33 => StoreBCD(vx),
                0x55 => StoreRegs(vx),
                0x65 => LoadRegs(vx),
                _ => return Err(unknown()),
            },
            _ => return Err(unknown()),
        };

        Ok(instruction)
    }
}
