//! Cycle-accurate simulator for a Tomasulo-style out-of-order superscalar
//! pipeline: a unified reservation-station scheduling queue, fixed pools of
//! functional units per op-class, and a shared Common Data Bus for result
//! broadcast.
//!
//! The engine ([`Simulator`]) is generic over an [`InstructionSource`], so it
//! can be driven from an in-memory program ([`VecSource`]) or a trace file
//! ([`TraceFileSource`]) without caring which.

mod cdb;
mod engine;
mod funits;
mod instr;
mod isa;
mod params;
mod regfile;
mod source;
mod stats;

pub use engine::Simulator;
pub use instr::{Instruction, InstructionId};
pub use isa::{DecodedInstruction, NUM_OP_CLASSES, NUM_REGISTERS};
pub use params::Params;
pub use source::{InstructionSource, TraceFileSource, VecSource};
pub use stats::{emit_trace, Stats};
