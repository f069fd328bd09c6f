// Temperature extraction from loosely structured sensor lines

pub const DEFAULT_MARKER: &str = "temp_c";

/// Pulls temperatures out of sensor lines using one configured marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extractor {
    marker: String,
}

impl Extractor {
    pub fn new(marker: String) -> Self {
        Self { marker }
    }

    pub fn extract(&self, line: &str) -> Option<f64> {
        extract_with_marker(line, &self.marker)
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER.to_string())
    }
}

/// Extract the number following `marker`
/// Example: `{"temp_c": 23.5}` -> Some(23.5)
///
/// The marker is matched case-sensitively, then the first `:` after it,
/// then any run of spaces, tabs and double quotes is skipped. Anything that
/// does not start with a number, or whose number is not finite, yields `None`.
pub fn extract_with_marker(line: &str, marker: &str) -> Option<f64> {
    if marker.is_empty() {
        return None;
    }
    let start = line.find(marker)?;
    let colon = line[start..].find(':')?;
    let rest = line[start + colon + 1..].trim_start_matches([' ', '\t', '"']);

    let number = numeric_prefix(rest);
    if number.is_empty() {
        return None;
    }
    number.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Longest prefix of `text` shaped like a decimal literal:
/// `[+-]digits[.digits][(e|E)[+-]digits]`
fn numeric_prefix(text: &str) -> &str {
    let bytes = text.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - (end + 1);
        end = frac_end;
    }

    if mantissa_digits == 0 {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    &text[..end]
}
