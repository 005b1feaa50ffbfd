/*!
error.rs - Error taxonomy for the CPU core and its bus collaborators.

Two failure sources exist:
- The bus rejects an access (`BusError`). The core never retries or
  substitutes a default value; the error is propagated unchanged.
- The fetched opcode byte has no entry in the opcode table
  (`CpuError::IllegalOpcode`). This is fatal to the current run because
  silently skipping it would corrupt all subsequent timing.

Every defined opcode is total over its 8/16-bit input domain, so there are
no "soft" errors inside a single instruction.
*/

use thiserror::Error;

/// Failure reported by a `Bus` implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BusError {
    /// Nothing is mapped at this address on the bus.
    #[error("address ${0:04X} is not mapped on this bus")]
    AddressOutOfRange(u16),

    /// A program image does not fit the bus's program window.
    #[error("program image of {len} bytes exceeds the {max}-byte program window")]
    ImageTooLarge { len: usize, max: usize },
}

/// Failure of a single CPU step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CpuError {
    /// Opcode byte with no table entry (undocumented opcodes are not emulated).
    #[error("illegal opcode ${opcode:02X} at ${pc:04X}")]
    IllegalOpcode { opcode: u8, pc: u16 },

    /// The bus rejected an access made while executing the step.
    #[error(transparent)]
    Bus(#[from] BusError),
}

pub type Result<T> = std::result::Result<T, CpuError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_render_hex_addresses() {
        let e = CpuError::IllegalOpcode {
            opcode: 0x02,
            pc: 0xC000,
        };
        assert_eq!(e.to_string(), "illegal opcode $02 at $C000");

        let b: CpuError = BusError::AddressOutOfRange(0x4016).into();
        assert_eq!(b.to_string(), "address $4016 is not mapped on this bus");
    }
}
