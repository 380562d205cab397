//! Instruction source: the fetch oracle, plus two concrete adapters.
//!
//! The core engine only needs [`InstructionSource`]; `VecSource` and
//! `TraceFileSource` are the thin, replaceable ambient layer around it.

use std::collections::VecDeque;
use std::io::BufRead;

use anyhow::{bail, Context, Result};

use crate::isa::DecodedInstruction;

/// Produces one decoded instruction at a time. `Ok(None)` signals end-of-trace;
/// `Err` signals malformed input, which is fatal (see the error-handling design).
/// This is the idiomatic-Rust rendition of the original's out-parameter-plus-bool
/// `read_instruction` signature.
pub trait InstructionSource {
    fn read_instruction(&mut self) -> Result<Option<DecodedInstruction>>;
}

/// In-memory source for tests and embedders.
#[derive(Debug, Default)]
pub struct VecSource {
    pending: VecDeque<DecodedInstruction>,
}

impl VecSource {
    pub fn new(instructions: impl IntoIterator<Item = DecodedInstruction>) -> Self {
        Self {
            pending: instructions.into_iter().collect(),
        }
    }
}

impl InstructionSource for VecSource {
    fn read_instruction(&mut self) -> Result<Option<DecodedInstruction>> {
        Ok(self.pending.pop_front())
    }
}

/// Reads one record per line from a plain-text trace: `op_class dest src0 src1`,
/// whitespace-separated, `-` marking an absent register. Blank lines and lines
/// starting with `#` are skipped.
pub struct TraceFileSource {
    lines: std::vec::IntoIter<(usize, String)>,
}

impl TraceFileSource {
    pub fn from_reader(reader: impl BufRead) -> Result<Self> {
        let mut lines = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let lineno = idx + 1;
            let line = line.with_context(|| format!("trace line {lineno}: I/O error"))?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            lines.push((lineno, trimmed.to_string()));
        }
        Ok(Self {
            lines: lines.into_iter(),
        })
    }

    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .with_context(|| format!("could not open trace file `{}`", path.display()))?;
        Self::from_reader(std::io::BufReader::new(file))
    }
}

fn parse_field(field: &str, lineno: usize, what: &str) -> Result<Option<u8>> {
    if field == "-" {
        return Ok(None);
    }
    let v: u8 = field
        .parse()
        .with_context(|| format!("trace line {lineno}: invalid {what} `{field}`"))?;
    Ok(Some(v))
}

impl InstructionSource for TraceFileSource {
    fn read_instruction(&mut self) -> Result<Option<DecodedInstruction>> {
        let Some((lineno, line)) = self.lines.next() else {
            return Ok(None);
        };
        let fields: Vec<&str> = line.split_whitespace().collect();
        parse_trace_line(&fields, lineno).map(Some)
    }
}

fn parse_trace_line(fields: &[&str], lineno: usize) -> Result<DecodedInstruction> {
    if fields.len() != 4 {
        bail!(
            "trace line {lineno}: expected 4 fields `op_class dest src0 src1`, found {}",
            fields.len()
        );
    }
    let op_class: u8 = fields[0]
        .parse()
        .with_context(|| format!("trace line {lineno}: invalid op-class `{}`", fields[0]))?;
    let dest_reg = parse_field(fields[1], lineno, "dest register")?;
    let src0 = parse_field(fields[2], lineno, "src0 register")?;
    let src1 = parse_field(fields[3], lineno, "src1 register")?;
    Ok(DecodedInstruction::new(op_class, dest_reg, [src0, src1]))
}
