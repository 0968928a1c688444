pub mod cli;
pub mod error;
pub mod model;
pub mod processor;
pub mod writer;

use anyhow::Context;
use clap::Parser;
use processor::{CodegenOptions, JumpStyle};
use tracing_subscriber::{EnvFilter, fmt};

pub fn run() -> anyhow::Result<()> {
    let args = cli::Cli::parse();
    init_logging(args.verbose);

    let options = CodegenOptions {
        jumps: if args.structured_jumps {
            JumpStyle::Structured
        } else {
            JumpStyle::Compat
        },
    };

    // 1. ── Read ───────────────────────────────────────────────────────
    let src = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Reading {}", args.input.display()))?;

    // 2. ── Process ────────────────────────────────────────────────────
    let processed = processor::run(&src, &options)
        .with_context(|| format!("Compiling {}", args.input.display()))?;

    if args.disassemble {
        let lines = processor::listing::disassemble(&processed.compiled.code)
            .with_context(|| "Disassembling generated code")?;
        for line in lines {
            println!("{line}");
        }
    }

    // 3. ── Write outputs ──────────────────────────────────────────────
    match &args.output {
        Some(out) => {
            std::fs::create_dir_all(out)
                .with_context(|| format!("Creating {}", out.display()))?;

            writer::text::emit(&processed, out).with_context(|| "Writing compiled program")?;
            writer::c::emit(&processed, out).with_context(|| "Writing C artifacts")?;
            writer::json::emit(&processed, out).with_context(|| "Writing AST dump")?;
            tracing::info!(dir = %out.display(), "artifacts written");
        }
        None if !args.disassemble => {
            let mut stdout = std::io::stdout().lock();
            writer::text::write_compiled(&mut stdout, &processed.compiled.code)
                .with_context(|| "Writing compiled program")?;
        }
        None => {}
    }

    Ok(())
}

/// `RUST_LOG` overrides the default filter.
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "debug" } else { "warn,bl_compiler=info" })
    });

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
