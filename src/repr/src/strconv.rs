// Copyright Materialize, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! String conversion and sanitization helpers shared by the column types.

/// Parses `s` as an `i64`, accepting only the canonical rendering.
///
/// Surrounding ASCII whitespace is ignored, but the remainder must round-trip
/// exactly: `"007"`, `"+5"`, and `"123.45"` are all rejected.
pub fn parse_exact_i64(s: &str) -> Option<i64> {
    let trimmed = s.trim();
    let parsed: i64 = trimmed.parse().ok()?;
    if parsed.to_string() == trimmed {
        Some(parsed)
    } else {
        None
    }
}

/// The number of decimal digits in the magnitude of `v`.
pub fn digit_count(v: i64) -> u32 {
    v.unsigned_abs().checked_ilog10().unwrap_or(0) + 1
}

/// The number of ASCII digits in `s`, ignoring any sign or separator.
pub fn numeric_digit_count(s: &str) -> u32 {
    u32::try_from(s.bytes().filter(u8::is_ascii_digit).count()).unwrap_or(u32::MAX)
}

/// A plain decimal literal split into sign, integer digits, and fractional
/// digits. Digit strings are kept verbatim, leading zeros included, so
/// callers can enforce digit budgets on what was actually written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecimalParts {
    /// Whether the literal carried a `-` sign.
    pub negative: bool,
    /// The digits before the separator.
    pub int_digits: String,
    /// The digits after the separator, empty if there was none.
    pub frac_digits: String,
}

impl DecimalParts {
    /// Re-renders the literal at exactly `scale` fractional digits.
    ///
    /// Leading zeros are dropped from the integer part and a zero magnitude
    /// loses its sign, matching how fixed-point arithmetic libraries
    /// normalize.
    pub fn render(&self, scale: u8) -> String {
        let int_digits = self.int_digits.trim_start_matches('0');
        let int_digits = if int_digits.is_empty() { "0" } else { int_digits };
        let zero = int_digits == "0" && self.frac_digits.bytes().all(|b| b == b'0');
        let mut out = String::new();
        if self.negative && !zero {
            out.push('-');
        }
        out.push_str(int_digits);
        if scale > 0 {
            out.push('.');
            out.push_str(&self.frac_digits);
            for _ in self.frac_digits.len()..usize::from(scale) {
                out.push('0');
            }
        }
        out
    }
}

/// Parses a plain decimal literal: optional sign, integer digits, optional
/// `.` and fractional digits. Exponents are not accepted.
pub fn parse_decimal(s: &str) -> Option<DecimalParts> {
    let trimmed = s.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let (int_part, frac_part, has_point) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part, true),
        None => (unsigned, "", false),
    };
    if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if has_point && (frac_part.is_empty() || !frac_part.bytes().all(|b| b.is_ascii_digit())) {
        return None;
    }
    Some(DecimalParts {
        negative,
        int_digits: int_part.to_string(),
        frac_digits: frac_part.to_string(),
    })
}

/// Rounds `v` to `places` decimal places, half away from zero.
pub fn round_to_places(v: f64, places: u8) -> f64 {
    let factor = 10f64.powi(i32::from(places));
    (v * factor).round() / factor
}

/// Left-pads `s` with `'0'` to `width` characters.
pub fn zero_pad(s: &str, width: usize) -> String {
    let chars = s.chars().count();
    if chars >= width {
        return s.to_string();
    }
    let mut out = String::with_capacity(width.max(s.len()));
    for _ in chars..width {
        out.push('0');
    }
    out.push_str(s);
    out
}

/// Renders `v` zero-padded to `width` digits, with the sign ahead of the
/// padding.
pub fn zero_pad_int(v: i64, width: usize) -> String {
    let padded = zero_pad(&v.unsigned_abs().to_string(), width);
    if v < 0 {
        format!("-{}", padded)
    } else {
        padded
    }
}

/// Removes `<`…`>` tag runs from `s`. An unterminated `<` drops the rest of
/// the input, as tag strippers conventionally do.
pub fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            ch if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

/// Escapes `&`, `<`, `>`, `"`, and `'` as HTML entities.
///
/// Existing entities are left untouched, so applying the escape twice gives
/// the same result as applying it once.
pub fn escape_entities(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    while let Some(ch) = s[i..].chars().next() {
        match ch {
            '&' => {
                if let Some(len) = entity_len(&s[i..]) {
                    out.push_str(&s[i..i + len]);
                    i += len;
                } else {
                    out.push_str("&amp;");
                    i += 1;
                }
            }
            '<' => {
                out.push_str("&lt;");
                i += 1;
            }
            '>' => {
                out.push_str("&gt;");
                i += 1;
            }
            '"' => {
                out.push_str("&quot;");
                i += 1;
            }
            '\'' => {
                out.push_str("&#039;");
                i += 1;
            }
            other => {
                out.push(other);
                i += other.len_utf8();
            }
        }
    }
    out
}

/// The length in bytes of the entity at the start of `s`, which must begin
/// with `&`. Recognizes `&name;`, `&#123;`, and `&#xAB;` forms.
fn entity_len(s: &str) -> Option<usize> {
    let rest = s.strip_prefix('&')?;
    let body_len = if let Some(hex) = rest.strip_prefix("#x").or_else(|| rest.strip_prefix("#X")) {
        let digits = hex.bytes().take_while(u8::is_ascii_hexdigit).count();
        if digits == 0 {
            return None;
        }
        2 + digits
    } else if let Some(dec) = rest.strip_prefix('#') {
        let digits = dec.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return None;
        }
        1 + digits
    } else {
        let name = rest.bytes().take_while(u8::is_ascii_alphanumeric).count();
        if name == 0 || !rest.as_bytes()[0].is_ascii_alphabetic() {
            return None;
        }
        name
    };
    if body_len > 32 {
        return None;
    }
    if rest.as_bytes().get(body_len) == Some(&b';') {
        Some(1 + body_len + 1)
    } else {
        None
    }
}

/// The sanitizer applied to text values before storing: tags stripped, then
/// special characters escaped.
pub fn sanitize(s: &str) -> String {
    escape_entities(&strip_tags(s))
}
