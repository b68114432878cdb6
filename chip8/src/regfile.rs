use core::ops::{Index, IndexMut};
use core::fmt;
use crate::instruction::Reg;

pub struct RegFile {
    gpr: [u8; 16],
}

impl RegFile {
    pub fn new() -> RegFile {
        RegFile { gpr: [0; 16] }
    }

    pub fn read_at_index(&self, index: usize) -> u8 {
        self.gpr[index]
    }

    pub fn write_at_index(&mut self, index: usize, value: u8) {
        self.gpr[index] = value;
    }

    /// Writes VF. Callers that also produce a result in Vx must store the
    /// result first, so that `Vx = VF` ends up holding the flag.
    pub fn set_flag(&mut self, flag: bool) {
        self[Reg::Vf] = flag as u8;
    }

    pub fn as_array(&self) -> &[u8; 16] {
        &self.gpr
    }

    pub fn clear(&mut self) {
        self.gpr = [0; 16];
    }
}

impl Index<Reg> for RegFile {
    type Output = u8;

    fn index(&self, index: Reg) -> &u8 {
        &self.gpr[index.index() as usize]
    }
}

impl IndexMut<Reg> for RegFile {
    fn index_mut(&mut self, index: Reg) -> &mut u8 {
        &mut self.gpr[index.index() as usize]
    }
}

impl fmt::Debug for RegFile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut dbg = f.debug_struct("RegFile");
        for i in 0..16 {
            let reg_name = format!("V{:0X}", i);
            let reg_value = format!("{:02x}", self.read_at_index(i));
            dbg.field(&reg_name, &reg_value);
        }
        dbg.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_overwrites_vf() {
        let mut gpr = RegFile::new();
        gpr[Reg::Vf] = 0x42;
        gpr.set_flag(true);
        assert_eq!(gpr[Reg::Vf], 1);
        gpr.set_flag(false);
        assert_eq!(gpr.read_at_index(15), 0);
    }

    #[test]
    fn index_by_reg() {
        let mut gpr = RegFile::new();
        gpr[Reg::V3] = 7;
        gpr.write_at_index(0xA, 9);
        assert_eq!(gpr.read_at_index(3), 7);
        assert_eq!(gpr[Reg::Va], 9);
        gpr.clear();
        assert_eq!(gpr.as_array(), &[0; 16]);
    }
}
