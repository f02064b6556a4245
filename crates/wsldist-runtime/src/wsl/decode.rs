//! Decoding of `wsl.exe` output.

/// Decode process output that may be UTF-16LE or UTF-8.
///
/// `wsl.exe` writes UTF-16LE by default and UTF-8 when `WSL_UTF8=1` is
/// honoured; older builds ignore that variable, so both are accepted.
pub fn decode_output(bytes: &[u8]) -> String {
    let text = if let Some(rest) = bytes.strip_prefix(&[0xFF, 0xFE]) {
        decode_utf16le(rest)
    } else if let Some(rest) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        String::from_utf8_lossy(rest).into_owned()
    } else if looks_like_utf16le(bytes) {
        decode_utf16le(bytes)
    } else {
        String::from_utf8_lossy(bytes).into_owned()
    };
    text.replace('\0', "")
}

fn decode_utf16le(bytes: &[u8]) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    String::from_utf16_lossy(&units)
}

/// Mostly-ASCII UTF-16LE has a zero in at least half of the odd positions.
fn looks_like_utf16le(bytes: &[u8]) -> bool {
    if bytes.len() < 2 {
        return false;
    }
    let high_bytes = bytes.len() / 2;
    let zeros = bytes.iter().skip(1).step_by(2).filter(|b| **b == 0).count();
    zeros * 2 >= high_bytes
}
