use anyhow::Context;
use bytes::Bytes;
use clap::Parser;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use rift::engine::DiffConfig;
use rift::output::unidiff::DEFAULT_CONTEXT_LINES;
use rift::output::{FileInfo, context, ed, plain, unidiff};

#[derive(Parser)]
#[command(
    name = "rift",
    version = "0.1.0",
    about = "Compare two files line by line",
    long_about = "Computes a minimal line diff between two files with a recursive \
    multi-algorithm engine (Myers, Patience, and linear-space Myers divide-and-conquer) \
    and prints it in plain, unified, context, or ed-script form.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[arg(short = 'u', help = "Output a unified diff with 3 lines of context")]
    unified: bool,

    #[arg(
        short = 'U',
        value_name = "NUM",
        help = "Output a unified diff with NUM lines of context"
    )]
    unified_context: Option<usize>,

    #[arg(short = 'c', help = "Output a copied-context diff with 3 lines of context")]
    context: bool,

    #[arg(
        short = 'C',
        value_name = "NUM",
        help = "Output a copied-context diff with NUM lines of context"
    )]
    context_context: Option<usize>,

    #[arg(short = 'e', help = "Output an ed script")]
    ed: bool,

    #[arg(
        short = 'f',
        help = "Output a forward ed script (like -e, but top-down and not usable by ed)"
    )]
    forward_ed: bool,

    #[arg(index = 1, help = "The left (old) file")]
    file1: PathBuf,

    #[arg(index = 2, help = "The right (new) file")]
    file2: PathBuf,
}

fn read_input(path: &PathBuf) -> anyhow::Result<Bytes> {
    let data = std::fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
    Ok(Bytes::from(data))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let left = read_input(&cli.file1)?;
    let right = read_input(&cli.file2)?;

    let config = DiffConfig::standard();
    let result = rift::diff(&config, left, right).context("diff failed")?;

    let left_path = cli.file1.display().to_string();
    let right_path = cli.file2.display().to_string();
    let info = FileInfo::new(&left_path, &right_path);

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if let Some(context_lines) = cli.unified_context {
        unidiff::write(&mut out, &info, &result, context_lines)?;
    } else if cli.unified {
        unidiff::write(&mut out, &info, &result, DEFAULT_CONTEXT_LINES)?;
    } else if let Some(context_lines) = cli.context_context {
        context::write(&mut out, &info, &result, context_lines)?;
    } else if cli.context {
        context::write(&mut out, &info, &result, DEFAULT_CONTEXT_LINES)?;
    } else if cli.ed {
        ed::write_ed(&mut out, &result)?;
    } else if cli.forward_ed {
        ed::write_forward_ed(&mut out, &result)?;
    } else {
        plain::write(&mut out, &info, &result)?;
    }

    out.flush()?;
    Ok(())
}
