//! Tolerant parsers for hand-edited table columns.

use msgdef_text::first_nfkd_char;

use crate::model::{Level, TypeName};

/// Parse a severity from its leading letter.
///
/// The first character is decomposed (NFKD) and uppercased, so `crit`,
/// `Fatal`, `ｗarn` and `verbose` are all accepted.
///
/// ```
/// use msgdef::{Level, relaxed::parse_level};
///
/// assert_eq!(parse_level("crit"), Some(Level::Critical));
/// assert_eq!(parse_level(""), None);
/// ```
#[must_use]
pub fn parse_level(value: &str) -> Option<Level> {
    let first = first_nfkd_char(value.trim())?;
    match first.to_uppercase().next()? {
        'C' | 'F' => Some(Level::Critical),
        'E' => Some(Level::Error),
        'W' => Some(Level::Warning),
        'I' => Some(Level::Information),
        'D' => Some(Level::Debug),
        'T' | 'V' => Some(Level::Trace),
        _ => None,
    }
}

/// Any non-whitespace content counts as `true`.
#[must_use]
pub fn parse_non_blank(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Resolve a type alias to its canonical name.
///
/// Unknown names are kept as [`TypeName::Other`] with surrounding
/// whitespace removed. Blank input yields `None`.
#[must_use]
pub fn parse_type(value: &str) -> Option<TypeName> {
    let token = value.trim();
    if token.is_empty() {
        return None;
    }
    if let Some(canonical) = TypeName::CANONICAL
        .iter()
        .find(|name| name.as_str().eq_ignore_ascii_case(token))
    {
        return Some(canonical.clone());
    }
    let alias = match token.to_ascii_lowercase().as_str() {
        "bool" => TypeName::Boolean,
        "char" => TypeName::Char,
        "string" => TypeName::String,
        "decimal" => TypeName::Decimal,
        "byte" => TypeName::Byte,
        "short" => TypeName::Int16,
        "int" => TypeName::Int32,
        "long" => TypeName::Int64,
        "sbyte" => TypeName::SByte,
        "ushort" => TypeName::UInt16,
        "uint" => TypeName::UInt32,
        "ulong" => TypeName::UInt64,
        "float" => TypeName::Single,
        "double" => TypeName::Double,
        "datetime" | "date" | "time" => TypeName::DateTimeOffset,
        "timespan" | "duration" | "interval" => TypeName::TimeSpan,
        "exception" => TypeName::Exception,
        _ => TypeName::Other(token.to_string()),
    };
    Some(alias)
}

/// Parse an id as decimal, then as hexadecimal with an optional `0x`.
#[must_use]
pub fn parse_id(value: &str) -> Option<u32> {
    let token = value.trim();
    if let Ok(id) = token.parse::<u32>() {
        return Some(id);
    }
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);
    if digits.is_empty() || digits.starts_with('+') {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_letters() {
        let cases = [
            ("Critical", Level::Critical),
            ("fatal", Level::Critical),
            ("err", Level::Error),
            ("  Warn ", Level::Warning),
            ("info", Level::Information),
            ("debug", Level::Debug),
            ("trace", Level::Trace),
            ("Verbose", Level::Trace),
        ];
        for (input, expected) in cases {
            assert_eq!(parse_level(input), Some(expected), "{input}");
        }
    }

    #[test]
    fn level_rejects_unknown_and_blank() {
        assert_eq!(parse_level(""), None);
        assert_eq!(parse_level("   "), None);
        assert_eq!(parse_level("loud"), None);
        assert_eq!(parse_level("9"), None);
    }

    #[test]
    fn level_uses_compatibility_decomposition() {
        // Fullwidth and accented forms decompose to ASCII base letters.
        assert_eq!(parse_level("\u{FF57}arning"), Some(Level::Warning));
        assert_eq!(parse_level("\u{00C9}rreur"), Some(Level::Error));
    }

    #[test]
    fn non_blank() {
        assert!(parse_non_blank("x"));
        assert!(!parse_non_blank(" \t "));
        assert!(!parse_non_blank(""));
    }

    #[test]
    fn type_aliases() {
        assert_eq!(parse_type("int"), Some(TypeName::Int32));
        assert_eq!(parse_type("INT"), Some(TypeName::Int32));
        assert_eq!(parse_type("Int32"), Some(TypeName::Int32));
        assert_eq!(parse_type("duration"), Some(TypeName::TimeSpan));
        assert_eq!(parse_type("date"), Some(TypeName::DateTimeOffset));
        assert_eq!(parse_type("exception"), Some(TypeName::Exception));
        assert_eq!(parse_type(" Guid "), Some(TypeName::Other("Guid".into())));
        assert_eq!(parse_type("  "), None);
    }

    #[test]
    fn ids() {
        assert_eq!(parse_id("42"), Some(42));
        assert_eq!(parse_id(" 10 "), Some(10));
        assert_eq!(parse_id("1F"), Some(0x1F));
        assert_eq!(parse_id("0xff"), Some(255));
        assert_eq!(parse_id("0X10"), Some(16));
        assert_eq!(parse_id("-1"), None);
        assert_eq!(parse_id("0x"), None);
        assert_eq!(parse_id("zz"), None);
        assert_eq!(parse_id(""), None);
    }
}
