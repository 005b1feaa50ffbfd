/*!
table.rs - Table-driven opcode dispatch: one static entry per opcode byte.

Design
------
- Table: `[Option<Opcode>; 256]`, indexed by the opcode byte. `None` marks
  an undocumented opcode; the dispatcher reports it as
  `CpuError::IllegalOpcode` before touching any state.
- Each entry carries the mnemonic (for the trace disassembler), the
  addressing mode, the base cycle count, the page-cross policy and the
  handler.
- Handlers receive the already-resolved operand and report how PC should
  move (`Flow`); they never advance PC themselves and never count cycles.

The table is built in a `const` context, so a missing or duplicated entry
is a build-time constant, not a runtime registration step.
*/

use crate::bus::Bus;
use crate::cpu::addressing::{AddressingMode, Operand};
use crate::cpu::cycles::Penalty;
use crate::cpu::dispatch::{
    arithmetic, branches, compare, control_flow, load_store, logical, misc, rmw,
};
use crate::cpu::regs::CpuRegs;
use crate::error::BusError;

/// How the program counter moves once a handler returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    /// Fall through: PC += encoded length.
    Next,
    /// Control transfer to an absolute target (JMP/JSR/RTS/RTI/BRK).
    Jump(u16),
    /// Conditional branch; `true` means taken.
    Branch(bool),
}

pub(crate) type OpHandler = fn(&mut dyn CpuRegs, &mut dyn Bus, Operand) -> Result<Flow, BusError>;

/// Static description of one documented opcode.
#[derive(Clone, Copy)]
pub struct Opcode {
    pub mnemonic: &'static str,
    pub mode: AddressingMode,
    pub cycles: u8,
    pub penalty: Penalty,
    pub(crate) exec: OpHandler,
}

impl std::fmt::Debug for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Opcode")
            .field("mnemonic", &self.mnemonic)
            .field("mode", &self.mode)
            .field("cycles", &self.cycles)
            .field("penalty", &self.penalty)
            .finish()
    }
}

/// Look up the table entry for `opcode`.
#[inline]
pub fn lookup(opcode: u8) -> Option<&'static Opcode> {
    OPCODES[opcode as usize].as_ref()
}

pub(crate) static OPCODES: [Option<Opcode>; 256] = build_table();

const fn op(
    mnemonic: &'static str,
    mode: AddressingMode,
    cycles: u8,
    exec: OpHandler,
) -> Option<Opcode> {
    Some(Opcode {
        mnemonic,
        mode,
        cycles,
        penalty: Penalty::None,
        exec,
    })
}

/// Read-class entry: +1 cycle when indexing crosses a page.
const fn read(
    mnemonic: &'static str,
    mode: AddressingMode,
    cycles: u8,
    exec: OpHandler,
) -> Option<Opcode> {
    Some(Opcode {
        mnemonic,
        mode,
        cycles,
        penalty: Penalty::PageCross,
        exec,
    })
}

/// The eight-mode ALU group (ORA/AND/EOR/ADC/CMP/SBC/LDA), laid out from
/// the ($zp,X) opcode `base`.
const fn alu_group(
    mut t: [Option<Opcode>; 256],
    base: usize,
    mnemonic: &'static str,
    exec: OpHandler,
) -> [Option<Opcode>; 256] {
    use AddressingMode::*;
    t[base] = op(mnemonic, IndirectX, 6, exec);
    t[base + 0x04] = op(mnemonic, ZeroPage, 3, exec);
    t[base + 0x08] = op(mnemonic, Immediate, 2, exec);
    t[base + 0x0C] = op(mnemonic, Absolute, 4, exec);
    t[base + 0x10] = read(mnemonic, IndirectY, 5, exec);
    t[base + 0x14] = op(mnemonic, ZeroPageX, 4, exec);
    t[base + 0x18] = read(mnemonic, AbsoluteY, 4, exec);
    t[base + 0x1C] = read(mnemonic, AbsoluteX, 4, exec);
    t
}

/// Memory read-modify-write group (zp, zp,X, abs, abs,X), laid out from the
/// zero-page opcode `base`.
const fn rmw_group(
    mut t: [Option<Opcode>; 256],
    base: usize,
    mnemonic: &'static str,
    exec: OpHandler,
) -> [Option<Opcode>; 256] {
    use AddressingMode::*;
    t[base] = op(mnemonic, ZeroPage, 5, exec);
    t[base + 0x08] = op(mnemonic, Absolute, 6, exec);
    t[base + 0x10] = op(mnemonic, ZeroPageX, 6, exec);
    t[base + 0x18] = op(mnemonic, AbsoluteX, 7, exec);
    t
}

const fn build_table() -> [Option<Opcode>; 256] {
    use AddressingMode::*;

    let mut t: [Option<Opcode>; 256] = [None; 256];

    // ---------------- ALU groups ----------------
    t = alu_group(t, 0x01, "ORA", logical::op_ora);
    t = alu_group(t, 0x21, "AND", logical::op_and);
    t = alu_group(t, 0x41, "EOR", logical::op_eor);
    t = alu_group(t, 0x61, "ADC", arithmetic::op_adc);
    t = alu_group(t, 0xA1, "LDA", load_store::op_lda);
    t = alu_group(t, 0xC1, "CMP", compare::op_cmp);
    t = alu_group(t, 0xE1, "SBC", arithmetic::op_sbc);

    // ---------------- STA (no immediate, no penalty) ----------------
    t[0x81] = op("STA", IndirectX, 6, load_store::op_sta);
    t[0x85] = op("STA", ZeroPage, 3, load_store::op_sta);
    t[0x8D] = op("STA", Absolute, 4, load_store::op_sta);
    t[0x91] = op("STA", IndirectY, 6, load_store::op_sta);
    t[0x95] = op("STA", ZeroPageX, 4, load_store::op_sta);
    t[0x99] = op("STA", AbsoluteY, 5, load_store::op_sta);
    t[0x9D] = op("STA", AbsoluteX, 5, load_store::op_sta);

    // ---------------- LDX / LDY / STX / STY ----------------
    t[0xA2] = op("LDX", Immediate, 2, load_store::op_ldx);
    t[0xA6] = op("LDX", ZeroPage, 3, load_store::op_ldx);
    t[0xAE] = op("LDX", Absolute, 4, load_store::op_ldx);
    t[0xB6] = op("LDX", ZeroPageY, 4, load_store::op_ldx);
    t[0xBE] = read("LDX", AbsoluteY, 4, load_store::op_ldx);

    t[0xA0] = op("LDY", Immediate, 2, load_store::op_ldy);
    t[0xA4] = op("LDY", ZeroPage, 3, load_store::op_ldy);
    t[0xAC] = op("LDY", Absolute, 4, load_store::op_ldy);
    t[0xB4] = op("LDY", ZeroPageX, 4, load_store::op_ldy);
    t[0xBC] = read("LDY", AbsoluteX, 4, load_store::op_ldy);

    t[0x86] = op("STX", ZeroPage, 3, load_store::op_stx);
    t[0x8E] = op("STX", Absolute, 4, load_store::op_stx);
    t[0x96] = op("STX", ZeroPageY, 4, load_store::op_stx);

    t[0x84] = op("STY", ZeroPage, 3, load_store::op_sty);
    t[0x8C] = op("STY", Absolute, 4, load_store::op_sty);
    t[0x94] = op("STY", ZeroPageX, 4, load_store::op_sty);

    // ---------------- CPX / CPY / BIT ----------------
    t[0xE0] = op("CPX", Immediate, 2, compare::op_cpx);
    t[0xE4] = op("CPX", ZeroPage, 3, compare::op_cpx);
    t[0xEC] = op("CPX", Absolute, 4, compare::op_cpx);

    t[0xC0] = op("CPY", Immediate, 2, compare::op_cpy);
    t[0xC4] = op("CPY", ZeroPage, 3, compare::op_cpy);
    t[0xCC] = op("CPY", Absolute, 4, compare::op_cpy);

    t[0x24] = op("BIT", ZeroPage, 3, logical::op_bit);
    t[0x2C] = op("BIT", Absolute, 4, logical::op_bit);

    // ---------------- Shifts / rotates / INC / DEC ----------------
    t = rmw_group(t, 0x06, "ASL", rmw::op_asl);
    t = rmw_group(t, 0x26, "ROL", rmw::op_rol);
    t = rmw_group(t, 0x46, "LSR", rmw::op_lsr);
    t = rmw_group(t, 0x66, "ROR", rmw::op_ror);
    t = rmw_group(t, 0xC6, "DEC", rmw::op_dec);
    t = rmw_group(t, 0xE6, "INC", rmw::op_inc);

    t[0x0A] = op("ASL", Accumulator, 2, rmw::op_asl);
    t[0x2A] = op("ROL", Accumulator, 2, rmw::op_rol);
    t[0x4A] = op("LSR", Accumulator, 2, rmw::op_lsr);
    t[0x6A] = op("ROR", Accumulator, 2, rmw::op_ror);

    // ---------------- Register increment / decrement ----------------
    t[0xE8] = op("INX", Implied, 2, arithmetic::op_inx);
    t[0xC8] = op("INY", Implied, 2, arithmetic::op_iny);
    t[0xCA] = op("DEX", Implied, 2, arithmetic::op_dex);
    t[0x88] = op("DEY", Implied, 2, arithmetic::op_dey);

    // ---------------- Branches ----------------
    t[0x10] = op("BPL", Relative, 2, branches::op_bpl);
    t[0x30] = op("BMI", Relative, 2, branches::op_bmi);
    t[0x50] = op("BVC", Relative, 2, branches::op_bvc);
    t[0x70] = op("BVS", Relative, 2, branches::op_bvs);
    t[0x90] = op("BCC", Relative, 2, branches::op_bcc);
    t[0xB0] = op("BCS", Relative, 2, branches::op_bcs);
    t[0xD0] = op("BNE", Relative, 2, branches::op_bne);
    t[0xF0] = op("BEQ", Relative, 2, branches::op_beq);

    // ---------------- Control flow ----------------
    t[0x00] = op("BRK", Implied, 7, control_flow::op_brk);
    t[0x20] = op("JSR", Absolute, 6, control_flow::op_jsr);
    t[0x40] = op("RTI", Implied, 6, control_flow::op_rti);
    t[0x4C] = op("JMP", Absolute, 3, control_flow::op_jmp);
    t[0x60] = op("RTS", Implied, 6, control_flow::op_rts);
    t[0x6C] = op("JMP", Indirect, 5, control_flow::op_jmp);

    // ---------------- Transfers ----------------
    t[0xAA] = op("TAX", Implied, 2, misc::op_tax);
    t[0xA8] = op("TAY", Implied, 2, misc::op_tay);
    t[0x8A] = op("TXA", Implied, 2, misc::op_txa);
    t[0x98] = op("TYA", Implied, 2, misc::op_tya);
    t[0xBA] = op("TSX", Implied, 2, misc::op_tsx);
    t[0x9A] = op("TXS", Implied, 2, misc::op_txs);

    // ---------------- Stack ----------------
    t[0x48] = op("PHA", Implied, 3, misc::op_pha);
    t[0x08] = op("PHP", Implied, 3, misc::op_php);
    t[0x68] = op("PLA", Implied, 4, misc::op_pla);
    t[0x28] = op("PLP", Implied, 4, misc::op_plp);

    // ---------------- Flags ----------------
    t[0x18] = op("CLC", Implied, 2, misc::op_clc);
    t[0x38] = op("SEC", Implied, 2, misc::op_sec);
    t[0x58] = op("CLI", Implied, 2, misc::op_cli);
    t[0x78] = op("SEI", Implied, 2, misc::op_sei);
    t[0xB8] = op("CLV", Implied, 2, misc::op_clv);
    t[0xD8] = op("CLD", Implied, 2, misc::op_cld);
    t[0xF8] = op("SED", Implied, 2, misc::op_sed);

    t[0xEA] = op("NOP", Implied, 2, misc::op_nop);

    t
}
