/*!
cycles.rs - Cycle timing rules for the 6502 CPU core.

Base cycle counts live in the opcode table next to each entry. This module
holds the dynamic adjustments the dispatcher adds on top:

  - page-cross penalty: +1 for read-class abs,X / abs,Y / (zp),Y entries
    when indexing moves the effective address to another page. Stores and
    read-modify-write entries use `Penalty::None`; their base count already
    includes the fix-up cycle.
  - branch penalty: +1 when taken, +1 more when the target lies on another
    page than the instruction following the branch.
*/

/// Whether an opcode entry pays for a page cross.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Penalty {
    None,
    PageCross,
}

/// Cost of the NMI / IRQ entry sequence.
pub const INTERRUPT_CYCLES: u32 = 7;

/// Cost of the power-on / reset sequence.
pub const RESET_CYCLES: u64 = 7;

#[inline]
pub fn page_penalty(penalty: Penalty, crossed: bool) -> u32 {
    match penalty {
        Penalty::PageCross if crossed => 1,
        _ => 0,
    }
}

#[inline]
pub fn branch_penalty(taken: bool, crossed: bool) -> u32 {
    match (taken, crossed) {
        (false, _) => 0,
        (true, false) => 1,
        (true, true) => 2,
    }
}
