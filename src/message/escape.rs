//! Backslash escape decoding for free text.
//!
//! Follows double-quoted string literal rules: `\a \b \f \n \r \t \v \\ \"`,
//! `\xHH`, three-digit octal `\NNN`, `\uHHHH` and `\UHHHHHHHH`. Decoding is
//! all-or-nothing: any sequence outside that grammar, a bare `"`, or a
//! literal line feed leaves the whole input untouched.

/// Decodes escape sequences in `input`, returning it unchanged if any
/// sequence cannot be decoded.
pub fn decode_escapes(input: &str) -> String {
    unquote(input).unwrap_or_else(|| input.to_string())
}

fn unquote(input: &str) -> Option<String> {
    if !input.contains(['\\', '"', '\n']) {
        return Some(input.to_string());
    }

    let mut out: Vec<u8> = Vec::with_capacity(input.len());
    let mut chars = input.chars();
    let mut buf = [0u8; 4];

    while let Some(c) = chars.next() {
        match c {
            '"' | '\n' => return None,
            '\\' => match chars.next()? {
                'a' => out.push(0x07),
                'b' => out.push(0x08),
                'f' => out.push(0x0c),
                'n' => out.push(b'\n'),
                'r' => out.push(b'\r'),
                't' => out.push(b'\t'),
                'v' => out.push(0x0b),
                '\\' => out.push(b'\\'),
                '"' => out.push(b'"'),
                'x' => out.push(u8::try_from(read_digits(&mut chars, 2, 16)?).ok()?),
                d @ '0'..='7' => {
                    let rest = read_digits(&mut chars, 2, 8)?;
                    let value = d.to_digit(8)? * 64 + rest;
                    out.push(u8::try_from(value).ok()?);
                }
                'u' => {
                    let ch = char::from_u32(read_digits(&mut chars, 4, 16)?)?;
                    out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
                }
                'U' => {
                    let ch = char::from_u32(read_digits(&mut chars, 8, 16)?)?;
                    out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
                }
                _ => return None,
            },
            other => out.extend_from_slice(other.encode_utf8(&mut buf).as_bytes()),
        }
    }

    // \x and octal escapes can produce bytes that are not valid UTF-8
    String::from_utf8(out).ok()
}

fn read_digits(chars: &mut std::str::Chars<'_>, count: usize, radix: u32) -> Option<u32> {
    let mut value = 0u32;
    for _ in 0..count {
        value = value * radix + chars.next()?.to_digit(radix)?;
    }
    Some(value)
}
