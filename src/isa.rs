//! Decoded-instruction representation shared by the instruction source and the engine.

use anyhow::{bail, Result};

/// Architectural register file size.
pub const NUM_REGISTERS: u8 = 64;

/// Number of functional-unit op classes (0, 1, 2).
pub const NUM_OP_CLASSES: u8 = 3;

/// One already-decoded instruction as produced by an [`crate::source::InstructionSource`].
///
/// This is the out-of-scope "oracle" input described by the surrounding spec: no
/// operand values, just enough shape to drive renaming and scheduling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedInstruction {
    pub op_class: u8,
    pub dest_reg: Option<u8>,
    pub src_reg: [Option<u8>; 2],
}

impl DecodedInstruction {
    pub fn new(op_class: u8, dest_reg: Option<u8>, src_reg: [Option<u8>; 2]) -> Self {
        Self {
            op_class,
            dest_reg,
            src_reg,
        }
    }

    /// Reject instructions naming an op-class or register outside the modeled range.
    /// A violation is malformed input (fatal, not recoverable) per the error-handling design.
    pub fn validate(&self) -> Result<()> {
        if self.op_class >= NUM_OP_CLASSES {
            bail!(
                "op-class {} out of range (0..={})",
                self.op_class,
                NUM_OP_CLASSES - 1
            );
        }
        for reg in self.dest_reg.into_iter().chain(self.src_reg.into_iter().flatten()) {
            if reg >= NUM_REGISTERS {
                bail!("register {} out of range (0..={})", reg, NUM_REGISTERS - 1);
            }
        }
        Ok(())
    }
}
