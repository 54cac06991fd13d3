//! Compile-time constant values and literal decoding.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum ConstantValue {
    String(String),
    Char(char),
    Integer(i64),
    Real(f64),
    Bool(bool),
    Null,
}

impl ConstantValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConstantValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// `a + b` for the operand kinds the folder supports.
    pub fn concat(&self, rhs: &ConstantValue) -> Option<ConstantValue> {
        use ConstantValue::*;
        match (self, rhs) {
            (String(a), String(b)) => Some(String(format!("{a}{b}"))),
            (String(a), Null) | (Null, String(a)) => Some(String(a.clone())),
            (Integer(a), Integer(b)) => a.checked_add(*b).map(Integer),
            _ => None,
        }
    }
}

/// Decode a regular string literal: `"a\tb"`.
pub fn decode_regular_string(text: &str) -> Option<String> {
    let body = text
        .strip_suffix("u8")
        .unwrap_or(text)
        .strip_prefix('"')?
        .strip_suffix('"')?;
    unescape(body)
}

/// Decode a verbatim string literal: `@"C:\dir ""quoted"""`.
pub fn decode_verbatim_string(text: &str) -> Option<String> {
    let body = text
        .strip_prefix("@\"")
        .or_else(|| text.strip_prefix("\"@"))?
        .strip_suffix('"')?;
    Some(body.replace("\"\"", "\""))
}

/// Decode a raw string literal: `"""text"""`, single- or multi-line.
pub fn decode_raw_string(text: &str) -> Option<String> {
    let quotes = text.chars().take_while(|c| *c == '"').count();
    if quotes < 3 || text.len() < quotes * 2 {
        return None;
    }
    let closing = &text[text.len() - quotes..];
    if closing.chars().any(|c| c != '"') {
        return None;
    }
    let body = &text[quotes..text.len() - quotes];

    if !body.contains('\n') {
        return Some(body.to_string());
    }

    // Multi-line: drop the first and last line and strip the closing
    // line's indentation from every content line.
    let lines: Vec<&str> = body.split('\n').collect();
    let last = lines.last().copied().unwrap_or("");
    let indent = last.trim_end_matches('\r');
    if !indent.chars().all(char::is_whitespace) {
        return None;
    }
    let content = &lines[1..lines.len() - 1];
    let stripped: Vec<&str> = content
        .iter()
        .map(|line| {
            let line = line.trim_end_matches('\r');
            line.strip_prefix(indent).unwrap_or(line.trim_start())
        })
        .collect();
    Some(stripped.join("\n"))
}

pub fn decode_char(text: &str) -> Option<char> {
    let body = text.strip_prefix('\'')?.strip_suffix('\'')?;
    let decoded = unescape(body)?;
    let mut chars = decoded.chars();
    let c = chars.next()?;
    chars.next().is_none().then_some(c)
}

pub fn decode_integer(text: &str) -> Option<i64> {
    let cleaned: String = text.chars().filter(|c| *c != '_').collect();
    let lower = cleaned.to_ascii_lowercase();
    let digits = lower.trim_end_matches(['u', 'l']);
    let value = if let Some(hex) = digits.strip_prefix("0x") {
        u64::from_str_radix(hex, 16).ok()?
    } else if let Some(bin) = digits.strip_prefix("0b") {
        u64::from_str_radix(bin, 2).ok()?
    } else {
        digits.parse::<u64>().ok()?
    };
    i64::try_from(value).ok()
}

pub fn decode_real(text: &str) -> Option<f64> {
    let cleaned: String = text.chars().filter(|c| *c != '_').collect();
    cleaned
        .trim_end_matches(['f', 'F', 'd', 'D', 'm', 'M'])
        .parse()
        .ok()
}

fn unescape(body: &str) -> Option<String> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let decoded = match chars.next()? {
            '\'' => '\'',
            '"' => '"',
            '\\' => '\\',
            '0' => '\0',
            'a' => '\u{7}',
            'b' => '\u{8}',
            'e' => '\u{1b}',
            'f' => '\u{c}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'v' => '\u{b}',
            'u' => hex_char(&mut chars, 4, 4)?,
            'U' => hex_char(&mut chars, 8, 8)?,
            'x' => hex_char(&mut chars, 1, 4)?,
            _ => return None,
        };
        out.push(decoded);
    }
    Some(out)
}

fn hex_char(chars: &mut std::str::Chars<'_>, min: usize, max: usize) -> Option<char> {
    let mut digits = String::new();
    while digits.len() < max {
        match chars.clone().next() {
            Some(c) if c.is_ascii_hexdigit() => {
                digits.push(c);
                chars.next();
            }
            _ => break,
        }
    }
    if digits.len() < min {
        return None;
    }
    char::from_u32(u32::from_str_radix(&digits, 16).ok()?)
}
