use crate::{
    cursor::{Cursor, is_identifier_continue},
    error::{LexError, LexErrorKind},
};
use hlsl_token::{TokenKind, TokenValue};
use source_files::Occurrence;

const FLOAT_SUFFIXES: &[char] = &['f', 'F', 'h', 'H', 'l', 'L'];

/// Scans a numeric literal starting at the cursor, including an optional
/// leading `-` and any type suffix.
pub fn lex_number(cursor: &mut Cursor) -> Result<(TokenKind, TokenValue), LexError> {
    let start = cursor.here();
    let negative = cursor.eat("-");

    let radix = if cursor.starts_with("0x") || cursor.starts_with("0X") {
        Some((16, TokenKind::IntegerHexLiteral))
    } else if (cursor.starts_with("0b") || cursor.starts_with("0B"))
        && cursor.peek_nth(2).is_some_and(|c| matches!(c, '0' | '1'))
    {
        Some((2, TokenKind::IntegerBinaryLiteral))
    } else {
        None
    };

    if let Some((radix, kind)) = radix {
        cursor.advance();
        cursor.advance();

        let digits_start = cursor.offset();
        cursor.advance_while(|c| c.is_digit(radix));
        let digits = cursor.slice_from(digits_start);

        if digits.is_empty() {
            return Err(malformed(cursor, start));
        }

        let digits = digits.to_string();
        eat_integer_suffix(cursor);
        reject_trailing(cursor, start)?;
        return integer(cursor, start, &digits, radix, negative).map(|value| (kind, value));
    }

    let digits_start = cursor.offset();
    let integer_digits = cursor.advance_while(|c| c.is_ascii_digit());
    let mut is_float = false;

    if cursor.peek() == Some('.')
        && (cursor.peek_nth(1).is_some_and(|c| c.is_ascii_digit())
            || (integer_digits > 0 && cursor.peek_nth(1) != Some('.')))
    {
        cursor.advance();
        cursor.advance_while(|c| c.is_ascii_digit());
        is_float = true;
    }

    if matches!(cursor.peek(), Some('e' | 'E')) {
        let exponent_digit = match cursor.peek_nth(1) {
            Some('+' | '-') => cursor.peek_nth(2),
            other => other,
        };

        if exponent_digit.is_some_and(|c| c.is_ascii_digit()) {
            cursor.advance();
            cursor.eat("+");
            cursor.eat("-");
            cursor.advance_while(|c| c.is_ascii_digit());
            is_float = true;
        }
    }

    let digits = cursor.slice_from(digits_start).to_string();

    if cursor.peek().is_some_and(|c| FLOAT_SUFFIXES.contains(&c))
        && (is_float || !matches!(cursor.peek(), Some('l' | 'L')))
    {
        cursor.advance();
        is_float = true;
    } else if !is_float {
        eat_integer_suffix(cursor);
    }

    reject_trailing(cursor, start)?;

    if is_float {
        let value = digits
            .parse::<f64>()
            .map_err(|_| malformed(cursor, start))?;
        let value = if negative { -value } else { value };
        return Ok((TokenKind::FloatLiteral, TokenValue::Float(value)));
    }

    if digits.len() > 1 && digits.starts_with('0') {
        if !digits.chars().all(|c| c.is_digit(8)) {
            return Err(malformed(cursor, start));
        }

        return integer(cursor, start, &digits[1..], 8, negative)
            .map(|value| (TokenKind::IntegerOctalLiteral, value));
    }

    integer(cursor, start, &digits, 10, negative).map(|value| (TokenKind::IntegerLiteral, value))
}

fn eat_integer_suffix(cursor: &mut Cursor) {
    for _ in 0..3 {
        if cursor.peek().is_some_and(|c| matches!(c, 'u' | 'U' | 'l' | 'L')) {
            cursor.advance();
        }
    }
}

fn reject_trailing(cursor: &mut Cursor, start: Occurrence) -> Result<(), LexError> {
    if cursor.peek().is_some_and(is_identifier_continue) {
        cursor.advance_while(is_identifier_continue);
        return Err(malformed(cursor, start));
    }

    Ok(())
}

fn integer(
    cursor: &Cursor,
    start: Occurrence,
    digits: &str,
    radix: u32,
    negative: bool,
) -> Result<TokenValue, LexError> {
    let (occurrence, lexeme) = cursor.since(start);

    // Values above i64::MAX keep their bit pattern
    let value = u64::from_str_radix(digits, radix)
        .map_err(|_| LexErrorKind::NumberOutOfRange(lexeme.into()).at(occurrence))?
        as i64;

    Ok(TokenValue::Integer(if negative {
        value.wrapping_neg()
    } else {
        value
    }))
}

fn malformed(cursor: &Cursor, start: Occurrence) -> LexError {
    let (occurrence, lexeme) = cursor.since(start);
    LexErrorKind::MalformedNumber(lexeme.into()).at(occurrence)
}
