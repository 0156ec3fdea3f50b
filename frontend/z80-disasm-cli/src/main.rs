mod hexdump;
mod listing;

use crate::listing::ListingOptions;
use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use zx_tape::TapFile;

/// Z80 disassembler for ZX Spectrum TAP files and raw binaries
#[derive(Debug, Parser)]
struct Args {
    /// Input file (.tap or raw binary)
    input: PathBuf,

    /// Output file (default: <input>_disasm.txt next to the input file)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Origin address for raw binaries; accepts decimal, 0x hex, 0o octal or 0b binary
    #[arg(long, default_value = "0", value_parser = parse_address)]
    org: u16,

    /// Force raw binary mode (skip TAP parsing)
    #[arg(long, default_value_t)]
    raw: bool,

    /// Disassemble only the TAP entry starting at this block number
    #[arg(long)]
    block: Option<usize>,

    /// Include hex dumps for blocks that are not disassembled
    #[arg(long, default_value_t)]
    hex: bool,
}

impl Args {
    fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| default_output_path(&self.input))
    }

    fn is_tap(&self) -> bool {
        !self.raw
            && self
                .input
                .extension()
                .and_then(OsStr::to_str)
                .is_some_and(|extension| extension.eq_ignore_ascii_case("tap"))
    }

    fn listing_options(&self) -> ListingOptions {
        ListingOptions { include_hex: self.hex, block_filter: self.block }
    }
}

fn parse_address(s: &str) -> Result<u16, String> {
    let s = s.trim();
    let (digits, radix) = match s.get(..2).map(str::to_ascii_lowercase).as_deref() {
        Some("0x") => (&s[2..], 16),
        Some("0o") => (&s[2..], 8),
        Some("0b") => (&s[2..], 2),
        _ => (s, 10),
    };

    let digits = digits.replace('_', "");
    u16::from_str_radix(&digits, radix)
        .map_err(|err| format!("invalid address '{s}' (must be 0-65535): {err}"))
}

fn default_output_path(input: &Path) -> PathBuf {
    let mut file_name = input.file_stem().unwrap_or(input.as_os_str()).to_os_string();
    file_name.push("_disasm.txt");
    input.with_file_name(file_name)
}

fn display_file_name(path: &Path) -> String {
    path.file_name().unwrap_or(path.as_os_str()).to_string_lossy().into_owned()
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let lines = if args.is_tap() {
        log::info!("Parsing '{}' as a TAP file", args.input.display());
        run_tap(&args)?
    } else {
        log::info!("Disassembling '{}' as a raw binary at 0x{:04X}", args.input.display(), args.org);
        run_raw(&args)?
    };

    let output_path = args.output_path();
    fs::write(&output_path, listing::render(&lines))
        .with_context(|| format!("Failed to write output file '{}'", output_path.display()))?;

    log::info!("Disassembly written to {} ({} lines)", output_path.display(), lines.len());

    Ok(())
}

fn run_raw(args: &Args) -> anyhow::Result<Vec<String>> {
    if args.block.is_some() {
        log::warn!("--block has no effect on raw binaries");
    }

    let code = fs::read(&args.input)
        .with_context(|| format!("Failed to read input file '{}'", args.input.display()))?;

    Ok(listing::raw_listing(&display_file_name(&args.input), &code, args.org))
}

fn run_tap(args: &Args) -> anyhow::Result<Vec<String>> {
    let tap = TapFile::open(&args.input)?;
    log::info!("Read {} TAP blocks", tap.len());

    if let Some(block) = args.block {
        log::info!("Listing only the entry at block {block}");
    }

    Ok(listing::tap_listing(&display_file_name(&args.input), &tap, args.listing_options()))
}
