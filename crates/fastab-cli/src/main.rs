use std::fs::File;
use std::io::{stdin, Read};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "fastab",
    about = "Read a delimited ASCII table and emit typed columns as JSON",
    version
)]
struct Args {
    /// Field delimiter: a single byte, or one of "tab" / "space"
    #[arg(short, long, default_value = ",")]
    delimiter: String,

    /// Comment byte; lines starting with it are skipped
    #[arg(short, long)]
    comment: Option<String>,

    /// Input has no header row; column names are auto-generated
    #[arg(long)]
    no_header: bool,

    /// Pad short rows with empty fields instead of failing
    #[arg(long)]
    fill_empty: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Input file (defaults to stdin)
    input: Option<PathBuf>,
}

fn byte_arg(value: &str, what: &str) -> Result<u8> {
    match value {
        "tab" | "\\t" => Ok(b'\t'),
        "space" => Ok(b' '),
        _ => {
            let bytes = value.as_bytes();
            if bytes.len() != 1 {
                bail!("{what} must be a single byte, got {value:?}");
            }
            Ok(bytes[0])
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut buf = Vec::new();
    match &args.input {
        Some(path) => {
            let mut f = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            f.read_to_end(&mut buf)?;
        }
        None => {
            stdin().read_to_end(&mut buf)?;
        }
    }

    let mut options = if args.no_header {
        fastab::ReadOptions::no_header()
    } else {
        fastab::ReadOptions::default()
    };
    options.delimiter = byte_arg(&args.delimiter, "delimiter")?;
    options.comment = match &args.comment {
        Some(c) => Some(byte_arg(c, "comment")?),
        None => None,
    };
    options.fill_extra_cols = args.fill_empty;

    let table = fastab::read_bytes(&buf, &options).context("reading table")?;

    if args.pretty {
        println!("{}", serde_json::to_string_pretty(&table)?);
    } else {
        println!("{}", serde_json::to_string(&table)?);
    }

    Ok(())
}
