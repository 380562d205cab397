//! The instruction record: identity, phase flags, and stage-entry cycle stamps.

use crate::isa::DecodedInstruction;

/// 1-based sequence number, doubling as the arena index (`id - 1`) and as the
/// producer tag other instructions listen for on the CDB.
pub type InstructionId = u64;

/// An instruction as it flows through Dispatch, Schedule, Execute and State Update.
///
/// Stage-entry cycle fields are `0` until the instruction first enters that stage;
/// invariant 5 (monotonic, set-once) is the caller's responsibility to preserve —
/// these fields are public data, not accessors, mirroring the teacher's stage-register
/// structs.
#[derive(Debug, Clone)]
pub struct Instruction {
    pub id: InstructionId,
    pub op_class: u8,
    pub dest_reg: Option<u8>,
    pub src_reg: [Option<u8>; 2],
    pub src_ready: [bool; 2],
    pub src_tag: [InstructionId; 2],

    /// Declared ready to issue (both sources ready, stamped in Schedule's first half).
    pub fire: bool,
    /// Occupies a functional unit (set in Schedule's second half).
    pub fired: bool,
    /// Has claimed a CDB slot (set in Execute's first half).
    pub executed: bool,
    /// Promised a scheduling-queue slot this cycle (Dispatch's first half).
    pub reserved: bool,

    pub cycle_fetch: u64,
    pub cycle_dispatch: u64,
    pub cycle_schedule: u64,
    pub cycle_execute: u64,
    pub cycle_state_update: u64,
}

impl Instruction {
    /// Construct a freshly-fetched instruction. `cycle_dispatch` is pre-stamped to
    /// `cycle + 1` regardless of whether the instruction actually dispatches that
    /// cycle — see the open question in the design notes; this behavior is preserved
    /// for trace compatibility.
    pub fn fetched(id: InstructionId, decoded: DecodedInstruction, cycle: u64) -> Self {
        Self {
            id,
            op_class: decoded.op_class,
            dest_reg: decoded.dest_reg,
            src_reg: decoded.src_reg,
            src_ready: [false, false],
            src_tag: [0, 0],
            fire: false,
            fired: false,
            executed: false,
            reserved: false,
            cycle_fetch: cycle,
            cycle_dispatch: cycle + 1,
            cycle_schedule: 0,
            cycle_execute: 0,
            cycle_state_update: 0,
        }
    }
}
