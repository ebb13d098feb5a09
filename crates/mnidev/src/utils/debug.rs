use std::fmt::Write as _;

const BYTES_PER_LINE: usize = 16;

/// Formats a hex dump of `data`, sixteen bytes per line with an ASCII column.
/// The `initial_offset` is what the first byte of the data should be
/// considered as, for printing of offsets.
///
/// ```text
///      00 01 02 03 04 05 06 07 08 09 0A 0B 0C 0D 0E 0F
///      -----------------------------------------------
/// 0000 43 72 65 61 74 69 76 65 20 56 6F 69 63 65 20 46  Creative Voice F
/// ```
#[must_use]
pub fn hex_dump(data: &[u8], initial_offset: usize) -> String {
    let max_offset = initial_offset + data.len().max(1) - 1;
    let offset_width = format!("{max_offset:X}").len().max(4);
    let padding = " ".repeat(offset_width);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{padding} 00 01 02 03 04 05 06 07 08 09 0A 0B 0C 0D 0E 0F"
    );
    let _ = writeln!(
        out,
        "{padding} -----------------------------------------------"
    );

    // The first line may start partway through a row when the offset is not
    // aligned.
    let mut line_start = initial_offset - initial_offset % BYTES_PER_LINE;
    let mut remaining = data;
    let mut skip = initial_offset % BYTES_PER_LINE;
    while !remaining.is_empty() {
        let line_len = remaining.len().min(BYTES_PER_LINE - skip);
        let (line, rest) = remaining.split_at(line_len);

        let _ = write!(out, "{line_start:0offset_width$X}");
        out.push_str(&"   ".repeat(skip));
        for b in line {
            let _ = write!(out, " {b:02X}");
        }
        out.push_str(&"   ".repeat(BYTES_PER_LINE - skip - line_len));
        out.push_str("  ");
        out.push_str(&" ".repeat(skip));
        out.extend(line.iter().map(|&b| {
            if b.is_ascii_graphic() || b == b' ' {
                char::from(b)
            } else {
                '.'
            }
        }));
        out.push('\n');

        remaining = rest;
        line_start += BYTES_PER_LINE;
        skip = 0;
    }
    out
}
