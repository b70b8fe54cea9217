//! Message template scanning.
//!
//! Templates use structured-logging hole syntax: `{name}`, optionally
//! followed by an alignment (`{name,10}`) and/or a format string
//! (`{name:N2}`). Doubled braces are escapes.
//!
//! # Invariants
//!
//! 1. **Brace runs resolve by parity**: in a run of `{`, an even count is
//!    literal text; an odd count opens a hole at the last brace. A run of `}`
//!    closes the hole at its first brace.
//!
//! 2. **Unterminated holes are text**: a `{` with no matching `}` never
//!    yields a placeholder.
//!
//! 3. **Order is first occurrence**: [`extract_placeholders`] keeps the first
//!    position of each distinct name (exact, case-sensitive match).
//!
//! # Failure Modes
//!
//! | Input | Result |
//! |-------|--------|
//! | `"{{literal}}"` | no holes |
//! | `"{{{value}}}"` | one hole, `value` |
//! | `"open { only"` | no holes |
//! | `"{}"` | one hole with an empty name |

use std::ops::Range;

/// One placeholder occurrence inside a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hole<'a> {
    /// Placeholder name, the text between `{` and the first `,`/`:`.
    pub name: &'a str,
    /// Alignment and format suffix including its leading delimiter, or `""`.
    pub spec: &'a str,
    /// Byte range of the hole in the template, braces included.
    pub span: Range<usize>,
}

/// Scan every hole of `template` in order, duplicates included.
#[must_use]
pub fn scan_template(template: &str) -> Vec<Hole<'_>> {
    let bytes = template.as_bytes();
    let end = bytes.len();
    let mut holes = Vec::new();
    let mut scan = 0;

    while scan < end {
        let open = find_brace(bytes, b'{', scan, end);
        if open == end {
            break;
        }
        let close = find_brace(bytes, b'}', open, end);
        if close == end {
            break;
        }

        let delimiter = bytes[open..close]
            .iter()
            .position(|&b| b == b',' || b == b':')
            .map_or(close, |offset| open + offset);

        holes.push(Hole {
            name: &template[open + 1..delimiter],
            spec: &template[delimiter..close],
            span: open..close + 1,
        });
        scan = close + 1;
    }

    holes
}

/// Distinct placeholder names of `template` in first-occurrence order.
///
/// ```
/// use msgdef_i18n::template::extract_placeholders;
///
/// let names = extract_placeholders("{user} bought {count:N0} items, {{not}} {user}");
/// assert_eq!(names, ["user", "count"]);
/// ```
#[must_use]
pub fn extract_placeholders(template: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for hole in scan_template(template) {
        if !names.iter().any(|existing| existing == hole.name) {
            names.push(hole.name.to_string());
        }
    }
    names
}

// Braces, ',' and ':' are ASCII, so every index returned here is a char
// boundary of the input &str.
fn find_brace(bytes: &[u8], brace: u8, start: usize, end: usize) -> usize {
    let mut found = end;
    let mut run = 0usize;

    for (index, &b) in bytes.iter().enumerate().take(end).skip(start) {
        if run > 0 && b != brace {
            if run % 2 == 0 {
                run = 0;
                found = end;
            } else {
                break;
            }
        } else if b == brace {
            // '{' opens at the last brace of a run, '}' closes at the first.
            if brace == b'{' || run == 0 {
                found = index;
            }
            run += 1;
        }
    }

    found
}
