use super::*;
use test_log::test;

fn block_bytes(flag: u8, payload: &[u8]) -> Vec<u8> {
    let mut data = vec![flag];
    data.extend_from_slice(payload);
    data.push(data.iter().fold(0, |acc, &byte| acc ^ byte));
    data
}

fn header_bytes(header_type: u8, name: &[u8; 10], data_length: u16, param1: u16) -> Vec<u8> {
    let mut payload = vec![header_type];
    payload.extend_from_slice(name);
    payload.extend_from_slice(&data_length.to_le_bytes());
    payload.extend_from_slice(&param1.to_le_bytes());
    payload.extend_from_slice(&[0x00, 0x80]);
    block_bytes(0x00, &payload)
}

fn tap_file(blocks: &[Vec<u8>]) -> TapFile {
    let mut bytes = Vec::new();
    for block in blocks {
        bytes.extend_from_slice(&(block.len() as u16).to_le_bytes());
        bytes.extend_from_slice(block);
    }
    TapFile::from_bytes(&bytes)
}

fn banner(file_name: &str) -> Vec<String> {
    let rule = format!("; {}", "=".repeat(60));
    vec![rule.clone(), format!("; Z80 Disassembly of {file_name}"), rule]
}

#[test]
fn instruction_line() {
    let (instruction, _) = z80_disasm::decode_one(&[0xDD, 0x21, 0x00, 0x80], 0, 0x8000);
    assert_eq!(format_instruction(&instruction), "8000: DD 21 00 80      LD IX, 0x8000");

    let (instruction, _) = z80_disasm::decode_one(&[0xC9], 0, 0x0038);
    assert_eq!(format_instruction(&instruction), format!("0038: {:<16} RET", "C9"));
}

#[test]
fn raw() {
    let lines = raw_listing("game.bin", &[0x3E, 0x01, 0xC9], 0x8000);

    let mut expected = banner("game.bin");
    expected.extend(
        [
            "; ORG: 0x8000",
            "; Length: 3 bytes (0x0003)",
            "",
            "8000: 3E 01            LD A, 0x01",
            "8002: C9               RET",
            "",
            "; === End of Disassembly ===",
        ]
        .map(String::from),
    );
    assert_eq!(lines, expected);
}

#[test]
fn raw_empty() {
    let lines = raw_listing("empty.bin", &[], 0);
    assert_eq!(lines[3..], ["; ORG: 0x0000", "; Length: 0 bytes (0x0000)", "", "", END_OF_LISTING]);
}

#[test]
fn render_adds_trailing_newline() {
    assert_eq!(render(&["a".into(), "b".into()]), "a\nb\n");
}

#[test]
fn tap_code_block() {
    let tap = tap_file(&[
        header_bytes(3, b"loader    ", 3, 0x8000),
        block_bytes(0xFF, &[0x3E, 0x01, 0xC9]),
    ]);
    let lines = tap_listing("game.tap", &tap, ListingOptions::default());

    let mut expected = banner("game.tap");
    expected.extend(
        [
            "; Total blocks: 2",
            "",
            "; === Block 0/1: Code \"loader\" ===",
            "; Load address: 0x8000",
            "; Length: 3 bytes",
            "",
            "8000: 3E 01            LD A, 0x01",
            "8002: C9               RET",
            "",
            "; === End of Disassembly ===",
        ]
        .map(String::from),
    );
    assert_eq!(lines, expected);
}

#[test]
fn tap_program_block() {
    let tap = tap_file(&[
        header_bytes(0, b"boot      ", 2, 10),
        block_bytes(0xFF, b"AB"),
    ]);

    let lines = tap_listing("game.tap", &tap, ListingOptions::default());
    assert_eq!(
        lines[5..],
        [
            "; === Block 0/1: Program \"boot\" ===",
            "; Auto-start line: 10",
            "; Data length: 2 bytes",
            "; (BASIC program - not disassembled)",
            "",
            END_OF_LISTING,
        ]
    );

    let options = ListingOptions { include_hex: true, block_filter: None };
    let lines = tap_listing("game.tap", &tap, options);
    assert!(lines.contains(&format!("; 0000: {:<47}  AB", "41 42")));
}

#[test]
fn tap_array_block() {
    let tap = tap_file(&[header_bytes(1, b"scores    ", 5, 0), block_bytes(0xFF, &[0; 5])]);

    let lines = tap_listing("game.tap", &tap, ListingOptions::default());
    assert_eq!(
        lines[5..],
        [
            "; === Block 0/1: Number array \"scores\" ===",
            "; Data length: 5 bytes",
            "; (Data block - not disassembled)",
            "",
            END_OF_LISTING,
        ]
    );
}

#[test]
fn tap_headerless_block() {
    let tap = tap_file(&[block_bytes(0xFF, &[0x00, 0xC9])]);

    let lines = tap_listing("game.tap", &tap, ListingOptions::default());
    assert_eq!(
        lines[5..],
        [
            "; === Block 0: Headerless data block ===",
            "; Flag: 0xFF",
            "; Payload length: 2 bytes",
            "; (Headerless block - load address unknown, disassembling from 0x0000)",
            "; Use --org to specify the correct base address for raw blocks.",
            "",
            "0000: 00               NOP",
            "0001: C9               RET",
            "",
            END_OF_LISTING,
        ]
    );
}

#[test]
fn tap_screen_block() {
    let tap = tap_file(&[block_bytes(0xFF, &[0x41; SCREEN_DATA_LEN])]);

    let lines = tap_listing("game.tap", &tap, ListingOptions::default());
    assert!(lines.contains(&"; Likely ZX Spectrum screen data (6144 pixels + 768 attributes)".into()));
    assert!(!lines.iter().any(|line| line.starts_with("; 4000:")));

    let options = ListingOptions { include_hex: true, block_filter: None };
    let lines = tap_listing("game.tap", &tap, options);
    let dump: Vec<_> = lines.iter().filter(|line| line.starts_with("; 4")).collect();
    assert_eq!(dump.len(), 8);
    assert_eq!(dump[0], &format!("; 4000: {}  {}", ["41"; 16].join(" "), "A".repeat(16)));
    assert_eq!(dump[7][..6], *"; 4070");
    assert!(lines.contains(&"; First 128 bytes:".into()));
}

#[test]
fn tap_block_filter() {
    let tap = tap_file(&[
        header_bytes(3, b"first     ", 1, 0x8000),
        block_bytes(0xFF, &[0xC9]),
        header_bytes(3, b"second    ", 1, 0x9000),
        block_bytes(0xFF, &[0x00]),
    ]);

    let options = ListingOptions { include_hex: false, block_filter: Some(2) };
    let lines = tap_listing("game.tap", &tap, options);

    assert!(lines.contains(&"; Total blocks: 4".into()));
    assert!(lines.contains(&"; === Block 2/3: Code \"second\" ===".into()));
    assert!(lines.contains(&"9000: 00               NOP".into()));
    assert!(!lines.iter().any(|line| line.contains("first")));

    // Filter on a data block index that does not start an entry
    let options = ListingOptions { include_hex: false, block_filter: Some(1) };
    let lines = tap_listing("game.tap", &tap, options);
    assert_eq!(lines[5..], [END_OF_LISTING]);
}

#[test]
fn tap_checksum_mismatch() {
    let mut data = block_bytes(0xFF, &[0xC9]);
    *data.last_mut().unwrap() ^= 0x01;
    let tap = tap_file(&[data]);

    let lines = tap_listing("game.tap", &tap, ListingOptions::default());
    assert_eq!(lines[8], "; Checksum mismatch: stored 0x37, computed 0x36");
}
