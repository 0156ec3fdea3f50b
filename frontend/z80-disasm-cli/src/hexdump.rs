const BYTES_PER_LINE: usize = 16;

// Width of a full line of hex bytes: two digits per byte plus separating spaces
const HEX_COLUMN_WIDTH: usize = BYTES_PER_LINE * 3 - 1;

fn printable(byte: u8) -> char {
    if (0x20..0x7F).contains(&byte) { char::from(byte) } else { '.' }
}

/// Formats `data` as 16-byte rows of `ADDR: HEX  ASCII`, with addresses wrapping at 0xFFFF.
pub fn hex_dump(data: &[u8], base_address: u16) -> Vec<String> {
    data.chunks(BYTES_PER_LINE)
        .enumerate()
        .map(|(i, chunk)| {
            let address = base_address.wrapping_add((i * BYTES_PER_LINE) as u16);
            let hex = hex_bytes(chunk);
            let ascii: String = chunk.iter().copied().map(printable).collect();
            format!("{address:04X}: {hex:<HEX_COLUMN_WIDTH$}  {ascii}")
        })
        .collect()
}

/// Uppercase two-digit hex, separated by single spaces.
pub fn hex_bytes(bytes: &[u8]) -> String {
    let hex: Vec<_> = bytes.iter().map(|byte| format!("{byte:02X}")).collect();
    hex.join(" ")
}
