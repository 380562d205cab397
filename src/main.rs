mod logging;

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tomasulo_pipe_rs::{emit_trace, Params, Simulator, TraceFileSource};

/// Cycle-accurate out-of-order superscalar pipeline simulator (Tomasulo-style
/// dynamic scheduling).
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, arg_required_else_help = true)]
struct Args {
    /// Path to the instruction trace (`op_class dest src0 src1` per line, `-` = absent)
    trace: String,

    /// Number of CDB result-bus slots
    #[arg(short = 'r', long, default_value_t = 2)]
    result_buses: u64,

    /// Functional units for op class 0
    #[arg(long, default_value_t = 1)]
    k0: u64,

    /// Functional units for op class 1
    #[arg(long, default_value_t = 1)]
    k1: u64,

    /// Functional units for op class 2
    #[arg(long, default_value_t = 1)]
    k2: u64,

    /// Instructions fetched per cycle
    #[arg(short = 'f', long, default_value_t = 1)]
    fetch_width: u64,

    /// First instruction id to include in the per-instruction trace dump
    #[arg(long, default_value_t = 0)]
    begin_dump: u64,

    /// Last instruction id to include in the per-instruction trace dump
    #[arg(long, default_value_t = 0)]
    end_dump: u64,

    /// Print per-cycle debug logs
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    logging::setup(log_level);

    let source = TraceFileSource::from_path(&args.trace)
        .with_context(|| format!("could not load trace `{}`", &args.trace))?;
    let params = Params::new(args.result_buses, args.k0, args.k1, args.k2, args.fetch_width)
        .with_dump_range(args.begin_dump, args.end_dump);

    let mut sim = Simulator::new(source, params);
    let stats = sim.run().context("simulation failed")?;

    if params.begin_dump > 0 {
        emit_trace(io::stdout(), sim.instructions(), params.begin_dump, params.end_dump)
            .context("could not write trace dump")?;
    }
    println!("{stats}");
    Ok(())
}
