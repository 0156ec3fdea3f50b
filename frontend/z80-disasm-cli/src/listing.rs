//! Text listings for raw binaries and TAP files

#[cfg(test)]
mod tests;

use crate::hexdump;
use z80_disasm::DecodedInstruction;
use zx_tape::{HeaderType, SCREEN_DATA_LEN, TapEntry, TapFile, TapHeader};

const BANNER_WIDTH: usize = 60;
const SCREEN_BASE_ADDRESS: u16 = 0x4000;
const SCREEN_PREVIEW_LEN: usize = 128;
const END_OF_LISTING: &str = "; === End of Disassembly ===";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListingOptions {
    /// Include hex dumps of blocks that are not disassembled
    pub include_hex: bool,
    /// Only list the TAP entry that starts at this block index
    pub block_filter: Option<usize>,
}

pub fn format_instruction(instruction: &DecodedInstruction<'_>) -> String {
    let hex = hexdump::hex_bytes(instruction.bytes);
    format!("{:04X}: {hex:<16} {}", instruction.address, instruction.mnemonic)
}

/// Joins listing lines into the final output text, which always ends in a newline.
pub fn render(lines: &[String]) -> String {
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

#[derive(Debug, Default)]
struct Listing {
    lines: Vec<String>,
}

impl Listing {
    fn with_banner(file_name: &str) -> Self {
        let rule = format!("; {}", "=".repeat(BANNER_WIDTH));

        let mut listing = Self::default();
        listing.push(rule.clone());
        listing.push(format!("; Z80 Disassembly of {file_name}"));
        listing.push(rule);
        listing
    }

    fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }

    fn disassemble(&mut self, code: &[u8], base_address: u16) {
        self.lines.extend(
            z80_disasm::instructions(code, base_address)
                .map(|instruction| format_instruction(&instruction)),
        );
    }

    fn hex_dump_comment(&mut self, data: &[u8], base_address: u16) {
        self.lines
            .extend(hexdump::hex_dump(data, base_address).into_iter().map(|line| format!("; {line}")));
    }

    fn finish(mut self) -> Vec<String> {
        self.push(END_OF_LISTING);
        self.lines
    }
}

/// Disassembles an entire raw binary loaded at `origin`.
pub fn raw_listing(file_name: &str, code: &[u8], origin: u16) -> Vec<String> {
    let mut listing = Listing::with_banner(file_name);
    listing.push(format!("; ORG: 0x{origin:04X}"));
    listing.push(format!("; Length: {len} bytes (0x{len:04X})", len = code.len()));
    listing.blank();

    listing.disassemble(code, origin);
    listing.blank();

    listing.finish()
}

/// Lists every entry of a TAP file, disassembling code blocks and describing everything else.
pub fn tap_listing(file_name: &str, tap: &TapFile, options: ListingOptions) -> Vec<String> {
    let mut listing = Listing::with_banner(file_name);
    listing.push(format!("; Total blocks: {}", tap.len()));
    listing.blank();

    let entries = tap.entries();
    let selected = entries
        .iter()
        .filter(|entry| options.block_filter.is_none_or(|block| block == entry.index));

    let mut listed = 0;
    for entry in selected {
        match &entry.header {
            Some(header) => list_header_entry(&mut listing, entry, header, options),
            None => list_headerless_entry(&mut listing, entry, options),
        }
        listed += 1;
    }

    if let Some(block) = options.block_filter
        && listed == 0
    {
        log::warn!("No TAP entry starts at block {block}");
    }

    listing.finish()
}

fn push_checksum_mismatch(listing: &mut Listing, entry: &TapEntry<'_>) {
    if let Some((stored, computed)) = entry.data.checksum_mismatch() {
        listing.push(format!("; Checksum mismatch: stored 0x{stored:02X}, computed 0x{computed:02X}"));
    }
}

fn list_header_entry(
    listing: &mut Listing,
    entry: &TapEntry<'_>,
    header: &TapHeader,
    options: ListingOptions,
) {
    let payload = entry.data.payload();

    listing.push(format!(
        "; === Block {}/{}: {} \"{}\" ===",
        entry.index,
        entry.index + 1,
        header.header_type,
        header.name
    ));
    push_checksum_mismatch(listing, entry);

    match header.header_type {
        HeaderType::Program => {
            listing.push(format!("; Auto-start line: {}", header.param1));
            listing.push(format!("; Data length: {} bytes", header.data_length));
            listing.push("; (BASIC program - not disassembled)");
            listing.blank();
            if options.include_hex {
                listing.hex_dump_comment(payload, 0x0000);
                listing.blank();
            }
        }
        HeaderType::Code => {
            let load_address = header.param1;
            listing.push(format!("; Load address: 0x{load_address:04X}"));
            listing.push(format!("; Length: {} bytes", header.data_length));
            listing.blank();
            listing.disassemble(payload, load_address);
            listing.blank();
        }
        HeaderType::NumberArray | HeaderType::CharacterArray | HeaderType::Unknown(_) => {
            listing.push(format!("; Data length: {} bytes", header.data_length));
            listing.push("; (Data block - not disassembled)");
            listing.blank();
            if options.include_hex {
                listing.hex_dump_comment(payload, 0x0000);
                listing.blank();
            }
        }
    }
}

fn list_headerless_entry(listing: &mut Listing, entry: &TapEntry<'_>, options: ListingOptions) {
    let payload = entry.data.payload();

    listing.push(format!("; === Block {}: Headerless data block ===", entry.index));
    listing.push(format!("; Flag: 0x{:02X}", entry.data.flag()));
    listing.push(format!("; Payload length: {} bytes", payload.len()));
    push_checksum_mismatch(listing, entry);

    if payload.len() == SCREEN_DATA_LEN {
        listing.push("; Likely ZX Spectrum screen data (6144 pixels + 768 attributes)");
        listing.blank();
        if options.include_hex {
            listing.push(format!("; First {SCREEN_PREVIEW_LEN} bytes:"));
            listing.hex_dump_comment(&payload[..SCREEN_PREVIEW_LEN], SCREEN_BASE_ADDRESS);
            listing.push("; ...");
            listing.blank();
        }
    } else {
        listing.push("; (Headerless block - load address unknown, disassembling from 0x0000)");
        listing.push("; Use --org to specify the correct base address for raw blocks.");
        listing.blank();
        listing.disassemble(payload, 0x0000);
        listing.blank();
    }
}
