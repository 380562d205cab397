//! Register Readiness Table: rename/ready bit per architectural register.

use crate::instr::InstructionId;
use crate::isa::NUM_REGISTERS;

#[derive(Debug, Clone, Copy)]
struct RegisterEntry {
    ready: bool,
    producer_tag: InstructionId,
}

impl Default for RegisterEntry {
    fn default() -> Self {
        Self {
            ready: true,
            producer_tag: 0,
        }
    }
}

/// 64-entry rename table. `ready=true` means the committed value is current and
/// `producer_tag` is stale; `ready=false` means `producer_tag` names the in-flight
/// writer to listen for.
#[derive(Debug, Clone)]
pub struct RegisterFile {
    entries: [RegisterEntry; NUM_REGISTERS as usize],
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self {
            entries: [RegisterEntry::default(); NUM_REGISTERS as usize],
        }
    }
}

impl RegisterFile {
    /// `(ready, producer_tag)` for a source operand read at dispatch.
    pub fn read(&self, reg: u8) -> (bool, InstructionId) {
        let e = self.entries[reg as usize];
        (e.ready, e.producer_tag)
    }

    /// Rename `reg` to the youngest in-flight writer `tag` (Schedule's issue sub-phase).
    pub fn rename(&mut self, reg: u8, tag: InstructionId) {
        let e = &mut self.entries[reg as usize];
        e.ready = false;
        e.producer_tag = tag;
    }

    /// Mark `reg` ready on behalf of writer `tag`, but only if `tag` is still the
    /// youngest in-flight writer — an older writer completing after a WAW rename
    /// must not clobber the newer writer's pending state. Returns whether the
    /// update took effect.
    pub fn complete(&mut self, reg: u8, tag: InstructionId) -> bool {
        let e = &mut self.entries[reg as usize];
        if e.producer_tag == tag {
            e.ready = true;
            true
        } else {
            false
        }
    }
}
