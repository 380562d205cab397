//! The Cycle Driver and the five stages, each split into explicit first/second
//! half-cycle methods rather than a boolean-branching "half" parameter (§9).

use std::collections::VecDeque;

use anyhow::Result;

use crate::cdb::CommonDataBus;
use crate::funits::FunctionalUnitPool;
use crate::instr::{Instruction, InstructionId};
use crate::params::Params;
use crate::regfile::RegisterFile;
use crate::source::InstructionSource;
use crate::stats::Stats;

/// The owning aggregate: every piece of pipeline state lives here, passed
/// implicitly via `&mut self` to the stage methods instead of through
/// process-wide singletons (§9).
pub struct Simulator<S: InstructionSource> {
    source: S,
    params: Params,

    /// Arena of every instruction ever fetched, indexed by `id - 1`.
    all_instrs: Vec<Instruction>,
    dispatch_q: VecDeque<InstructionId>,
    /// Program order of insertion; never reordered.
    sched_q: Vec<InstructionId>,

    regfile: RegisterFile,
    funits: FunctionalUnitPool,
    cdb: CommonDataBus,

    cycle: u64,
    read_count: u64,
    read_finished: bool,
    finished: bool,

    stats: Stats,
}

impl<S: InstructionSource> Simulator<S> {
    pub fn new(source: S, params: Params) -> Self {
        let [k0, k1, k2] = params.fu_counts;
        Self {
            source,
            all_instrs: Vec::new(),
            dispatch_q: VecDeque::new(),
            sched_q: Vec::new(),
            regfile: RegisterFile::default(),
            funits: FunctionalUnitPool::new(k0, k1, k2),
            cdb: CommonDataBus::new(params.result_buses as usize),
            cycle: 1,
            read_count: 0,
            read_finished: false,
            finished: false,
            stats: Stats::default(),
            params,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.all_instrs
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    fn instr(&self, id: InstructionId) -> &Instruction {
        &self.all_instrs[(id - 1) as usize]
    }

    fn instr_mut(&mut self, id: InstructionId) -> &mut Instruction {
        &mut self.all_instrs[(id - 1) as usize]
    }

    /// Drive the pipeline to completion, returning the final statistics.
    ///
    /// Mirrors the original `run_proc` loop exactly: each iteration runs the
    /// FIRST half of all four active stages, then State Update's SECOND half
    /// (which may set `finished`); only if still running does it run the
    /// remaining SECOND halves and advance the cycle counter.
    pub fn run(&mut self) -> Result<Stats> {
        while !self.finished {
            self.state_update_first_half();
            self.execute_first_half();
            self.schedule_first_half();
            self.dispatch_first_half();

            self.state_update_second_half();

            if !self.finished {
                self.schedule_second_half();
                self.dispatch_second_half();
                self.fetch_decode_second_half()?;
                self.cycle += 1;
            }
        }
        self.stats.cycle_count = self.cycle;
        Ok(self.stats)
    }

    // ---- Fetch & Decode (SECOND half only) ------------------------------

    fn fetch_decode_second_half(&mut self) -> Result<()> {
        if self.read_finished {
            return Ok(());
        }
        for _ in 0..self.params.fetch_width {
            match self.source.read_instruction()? {
                Some(decoded) => {
                    decoded.validate()?;
                    let id = self.read_count + 1;
                    tracing::debug!(id, cycle = self.cycle, "fetched instruction");
                    self.all_instrs
                        .push(Instruction::fetched(id, decoded, self.cycle));
                    self.dispatch_q.push_back(id);
                    self.read_count += 1;
                }
                None => {
                    self.read_finished = true;
                    break;
                }
            }
        }
        Ok(())
    }

    // ---- Dispatch ---------------------------------------------------------

    fn dispatch_first_half(&mut self) {
        let size = self.dispatch_q.len() as u64;
        self.stats.sum_disp_size += size;
        self.stats.max_disp_size = self.stats.max_disp_size.max(size);

        let mut available = self
            .params
            .scheduling_capacity()
            .saturating_sub(self.sched_q.len() as u64);
        for &id in self.dispatch_q.iter() {
            if available == 0 {
                break;
            }
            self.instr_mut(id).reserved = true;
            available -= 1;
        }
    }

    fn dispatch_second_half(&mut self) {
        while let Some(&id) = self.dispatch_q.front() {
            if !self.instr(id).reserved {
                break;
            }
            self.dispatch_q.pop_front();

            for j in 0..2 {
                let src = self.instr(id).src_reg[j];
                match src {
                    None => self.instr_mut(id).src_ready[j] = true,
                    Some(reg) => {
                        let (ready, tag) = self.regfile.read(reg);
                        self.instr_mut(id).src_ready[j] = ready;
                        if !ready {
                            self.instr_mut(id).src_tag[j] = tag;
                        }
                    }
                }
            }

            debug_assert!(
                (self.sched_q.len() as u64) < self.params.scheduling_capacity(),
                "dispatch reserved a slot beyond scheduling-queue capacity"
            );
            self.sched_q.push(id);
        }
    }

    // ---- Schedule -----------------------------------------------------------

    fn schedule_first_half(&mut self) {
        for &id in &self.sched_q {
            let instr = self.instr_mut(id);
            if instr.fire {
                continue;
            }
            if instr.cycle_schedule == 0 {
                instr.cycle_schedule = self.cycle;
            }
            instr.fire = instr.src_ready[0] && instr.src_ready[1];
        }
    }

    fn schedule_second_half(&mut self) {
        // The occupied set doesn't change during this half; snapshot it once so
        // every instruction's wakeup sub-phase scans the same CDB contents, in
        // slot-index order.
        let occupied: Vec<_> = self.cdb.occupied().copied().collect();

        // Issue, then CDB wakeup, in that order per instruction (program order).
        for i in 0..self.sched_q.len() {
            let id = self.sched_q[i];

            if self.instr(id).fire && !self.instr(id).fired {
                let class = self.instr(id).op_class;
                if self.funits.try_acquire(class) {
                    self.instr_mut(id).fired = true;
                    if let Some(reg) = self.instr(id).dest_reg {
                        self.regfile.rename(reg, id);
                    }
                    tracing::debug!(id, class, cycle = self.cycle, "instruction fired");
                }
            }

            for slot in &occupied {
                for j in 0..2 {
                    if !self.instr(id).src_ready[j] && self.instr(id).src_tag[j] == slot.producer_tag
                    {
                        self.instr_mut(id).src_ready[j] = true;
                    }
                }
            }
        }
    }

    // ---- Execute (FIRST half only) -----------------------------------------

    fn execute_first_half(&mut self) {
        for i in 0..self.sched_q.len() {
            let id = self.sched_q[i];
            if !self.instr(id).fired || self.instr(id).cycle_execute != 0 {
                continue;
            }
            let dest = self.instr(id).dest_reg;
            if !self.cdb.claim_free(id, dest) {
                continue;
            }
            if let Some(reg) = dest {
                self.regfile.complete(reg, id);
            }
            let class = self.instr(id).op_class;
            self.instr_mut(id).executed = true;
            self.instr_mut(id).cycle_execute = self.cycle;
            self.funits.release(class);
            tracing::debug!(id, cycle = self.cycle, "instruction claimed a CDB slot");
        }
    }

    // ---- State Update -------------------------------------------------------

    fn state_update_first_half(&mut self) {
        for &id in &self.sched_q {
            let instr = self.instr_mut(id);
            if instr.executed && instr.cycle_state_update == 0 {
                instr.cycle_state_update = self.cycle;
            }
        }
        self.cdb.release_all();
    }

    fn state_update_second_half(&mut self) {
        let cycle = self.cycle;
        let all_instrs = &self.all_instrs;
        let mut retired_now = 0u64;
        self.sched_q.retain(|&id| {
            let done = all_instrs[(id - 1) as usize].cycle_state_update != 0;
            if done {
                retired_now += 1;
                tracing::debug!(id, cycle, "instruction retired");
            }
            !done
        });
        self.stats.retired_instruction += retired_now;

        if self.read_finished && self.stats.retired_instruction == self.read_count {
            self.finished = true;
        }
    }
}
