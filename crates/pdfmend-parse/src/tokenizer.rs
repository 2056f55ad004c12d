//! Minimal content stream lexer.
//!
//! Only the leading token of a page is ever inspected, so this lexer reads a
//! single token and stops. It does not validate the rest of the stream.

/// Kind of the first token in a content stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// An operator keyword such as `q`, `BT` or `T*`.
    Operator(String),
    /// An operand: number, string, name, array, dictionary or boolean/null.
    Operand,
    /// A stray closing delimiter or brace; not valid at the start of content.
    Other,
}

/// Lex the first token of `input`, skipping leading whitespace and comments.
///
/// Returns `None` for empty or whitespace-only content.
pub fn first_token(input: &[u8]) -> Option<Token> {
    let mut pos = 0;
    skip_whitespace_and_comments(input, &mut pos);
    let b = *input.get(pos)?;

    let token = match b {
        b'(' | b'<' | b'[' | b'/' => Token::Operand,
        b'0'..=b'9' | b'+' | b'-' | b'.' => Token::Operand,
        b if is_keyword_byte(b) => match parse_keyword(input, &mut pos).as_str() {
            "true" | "false" | "null" => Token::Operand,
            keyword => Token::Operator(keyword.to_string()),
        },
        _ => Token::Other,
    };
    Some(token)
}

/// Whether the first token of `input` is the operator `op`.
pub fn starts_with_operator(input: &[u8], op: &str) -> bool {
    matches!(first_token(input), Some(Token::Operator(first)) if first == op)
}

/// Returns `true` if `b` is a PDF whitespace character.
fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n' | 0x0C | 0x00)
}

fn is_keyword_byte(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'*' || b == b'\'' || b == b'"'
}

/// Skip whitespace and comments.
fn skip_whitespace_and_comments(input: &[u8], pos: &mut usize) {
    while *pos < input.len() {
        if is_whitespace(input[*pos]) {
            *pos += 1;
        } else if input[*pos] == b'%' {
            while *pos < input.len() && input[*pos] != b'\n' && input[*pos] != b'\r' {
                *pos += 1;
            }
        } else {
            break;
        }
    }
}

/// Parse a keyword (alphabetic + `*` + `'` + `"`).
///
/// A keyword glued to trailing digits (`d0`, `d1`) keeps them.
fn parse_keyword(input: &[u8], pos: &mut usize) -> String {
    let start = *pos;
    while *pos < input.len() {
        let b = input[*pos];
        if is_keyword_byte(b) || (*pos > start && b.is_ascii_digit()) {
            *pos += 1;
        } else {
            break;
        }
    }
    String::from_utf8_lossy(&input[start..*pos]).into_owned()
}
