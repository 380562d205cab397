//! Statistics record and the per-instruction stage-cycle trace emitter.

use std::io::Write;

use anyhow::Result;

use crate::instr::Instruction;

/// Aggregate counters maintained by the engine, with the two averages computed
/// once the run finishes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stats {
    pub cycle_count: u64,
    pub retired_instruction: u64,
    pub sum_disp_size: u64,
    pub max_disp_size: u64,
}

impl Stats {
    pub fn avg_disp_size(&self) -> f64 {
        self.sum_disp_size as f64 / self.cycle_count as f64
    }

    pub fn avg_inst_retired(&self) -> f64 {
        self.retired_instruction as f64 / self.cycle_count as f64
    }
}

impl std::fmt::Display for Stats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "cycles:            {}", self.cycle_count)?;
        writeln!(f, "retired:           {}", self.retired_instruction)?;
        writeln!(f, "avg IPC:           {:.4}", self.avg_inst_retired())?;
        writeln!(f, "avg dispatch size: {:.4}", self.avg_disp_size())?;
        write!(f, "max dispatch size: {}", self.max_disp_size)
    }
}

/// Renders the §6 trace report: a tab-separated header, one row per instruction
/// whose id falls in `[begin, end]` (in id order), then a trailing blank line.
pub fn emit_trace(
    mut out: impl Write,
    instructions: &[Instruction],
    begin: u64,
    end: u64,
) -> Result<()> {
    writeln!(out, "INST\tFETCH\tDISP\tSCHED\tEXEC\tSTATE")?;
    for instr in instructions {
        if instr.id >= begin && instr.id <= end {
            writeln!(
                out,
                "{}\t{}\t{}\t{}\t{}\t{}",
                instr.id,
                instr.cycle_fetch,
                instr.cycle_dispatch,
                instr.cycle_schedule,
                instr.cycle_execute,
                instr.cycle_state_update
            )?;
        }
    }
    writeln!(out)?;
    Ok(())
}
