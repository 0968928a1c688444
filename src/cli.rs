use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Input .bl program
    pub input: PathBuf,
    /// Output directory; the compiled code goes to stdout when omitted
    pub output: Option<PathBuf>,
    /// Lower IF/ELSE and WHILE with unconditional JUMPs
    #[arg(long)]
    pub structured_jumps: bool,
    /// Print a disassembly listing of the generated code
    #[arg(short, long)]
    pub disassemble: bool,
    /// Debug-level logging unless RUST_LOG is set
    #[arg(short, long)]
    pub verbose: bool,
}
