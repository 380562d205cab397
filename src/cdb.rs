//! Common Data Bus pool: `r` result-broadcast slots, each occupied for exactly one cycle.

use crate::instr::InstructionId;

#[derive(Debug, Clone, Copy)]
pub struct CdbSlot {
    pub producer_tag: InstructionId,
    pub dest_reg: Option<u8>,
}

#[derive(Debug, Clone)]
pub struct CommonDataBus {
    slots: Vec<Option<CdbSlot>>,
}

impl CommonDataBus {
    pub fn new(r: usize) -> Self {
        Self { slots: vec![None; r] }
    }

    /// Claim the first free slot in index order (invariant: CDB scan order is fixed).
    pub fn claim_free(&mut self, producer_tag: InstructionId, dest_reg: Option<u8>) -> bool {
        for slot in &mut self.slots {
            if slot.is_none() {
                *slot = Some(CdbSlot {
                    producer_tag,
                    dest_reg,
                });
                return true;
            }
        }
        false
    }

    /// Slots currently broadcasting a result, for Schedule's wakeup sub-phase.
    pub fn occupied(&self) -> impl Iterator<Item = &CdbSlot> {
        self.slots.iter().filter_map(|s| s.as_ref())
    }

    /// Release every slot at the start of State Update's first half. A slot is never
    /// freed in the same half-cycle it was just occupied (testable property 5) —
    /// Execute occupies in cycle N's FIRST half, State Update frees in cycle N+1's
    /// FIRST half, after Schedule's wakeup has observed it in cycle N's SECOND half.
    pub fn release_all(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
    }

}
