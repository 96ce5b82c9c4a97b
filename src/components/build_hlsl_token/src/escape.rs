use crate::{cursor::is_line_terminator, error::LexErrorKind};
use look_ahead::LookAhead;
use std::str::Chars;

/// Decodes the body of a quoted literal, resolving backslash escapes.
///
/// A backslash directly before a line terminator splices the lines and
/// contributes nothing to the value. Unrecognised escapes are kept as
/// written, backslash included.
pub fn unescape(content: &str) -> Result<String, LexErrorKind> {
    let mut chars = LookAhead::new(content.chars());
    let mut value = String::with_capacity(content.len());

    while let Some(c) = chars.next() {
        if c != '\\' {
            value.push(c);
            continue;
        }

        match chars.peek().copied() {
            Some(terminator) if is_line_terminator(terminator) => {
                chars.next();

                if terminator == '\r' {
                    chars.next_if(|c| *c == '\n');
                }
            }
            Some(other) if !is_escape_start(other) => value.push('\\'),
            None => value.push('\\'),
            _ => value.push(escape_sequence(&mut chars)?),
        }
    }

    Ok(value)
}

fn is_escape_start(c: char) -> bool {
    matches!(
        c,
        '\'' | '"' | '?' | '\\' | 'a' | 'b' | 'f' | 'n' | 'r' | 't' | 'v' | '0'..='7' | 'x' | 'u' | 'U'
    )
}

fn make_character(digits: &str, radix: u32) -> Result<char, LexErrorKind> {
    u32::from_str_radix(digits, radix)
        .ok()
        .and_then(char::from_u32)
        .ok_or(LexErrorKind::BadEscapedCodepoint)
}

fn exact_hex_digits(chars: &mut LookAhead<Chars>, count: usize) -> Result<char, LexErrorKind> {
    let mut digits = String::with_capacity(count);

    for _ in 0..count {
        match chars.next() {
            Some(digit) if digit.is_ascii_hexdigit() => digits.push(digit),
            _ => return Err(LexErrorKind::BadEscapedCodepoint),
        }
    }

    make_character(&digits, 16)
}

fn escape_sequence(chars: &mut LookAhead<Chars>) -> Result<char, LexErrorKind> {
    match chars.next() {
        Some('\'') => Ok('\''),
        Some('"') => Ok('"'),
        Some('?') => Ok('?'),
        Some('\\') => Ok('\\'),
        Some('a') => Ok('\u{07}'),
        Some('b') => Ok('\u{08}'),
        Some('f') => Ok('\u{0C}'),
        Some('n') => Ok('\n'),
        Some('r') => Ok('\r'),
        Some('t') => Ok('\t'),
        Some('v') => Ok('\u{0B}'),
        Some(start_digit @ '0'..='7') => {
            // Octal, up to three digits
            let mut digits = String::with_capacity(3);
            digits.push(start_digit);

            for _ in 0..2 {
                match chars.next_if(|c| matches!(c, '0'..='7')) {
                    Some(digit) => digits.push(digit),
                    None => break,
                }
            }

            make_character(&digits, 8)
        }
        Some('x') => {
            let mut digits = String::with_capacity(8);

            while let Some(digit) = chars.next_if(char::is_ascii_hexdigit) {
                digits.push(digit);
            }

            make_character(&digits, 16)
        }
        Some('u') => exact_hex_digits(chars, 4),
        Some('U') => exact_hex_digits(chars, 8),
        _ => Err(LexErrorKind::BadEscapedCodepoint),
    }
}
