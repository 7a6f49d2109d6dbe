//! Deck-list conversion.
//!
//! Deck builders export lists as `<count> <card name>` lines. The ledger
//! block operations expect `<card name>, <count>`, so this rewrites one into
//! the other.

use std::fmt;

/// Converted deck list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversion {
    /// `name, count` lines in input order
    pub lines: Vec<String>,

    /// Non-blank lines that had no leading count
    pub dropped: usize,
}

impl fmt::Display for Conversion {
    /// Lines joined by `\n` with no trailing newline.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines.join("\n"))
    }
}

/// Convert `<count> <card name>` lines into `<card name>, <count>` lines.
///
/// The split happens on the first space. Lines whose first word is not an
/// integer (section headers, comments) are dropped and counted.
pub fn convert_deck_list(text: &str) -> Conversion {
    let mut conversion = Conversion::default();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let converted = line.split_once(' ').and_then(|(count, name)| {
            let count: u64 = count.parse().ok()?;
            let name = name.trim();
            (!name.is_empty()).then(|| format!("{}, {}", name, count))
        });

        match converted {
            Some(converted) => conversion.lines.push(converted),
            None => {
                tracing::debug!(line, "dropped deck-list line without a count");
                conversion.dropped += 1;
            }
        }
    }

    conversion
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_swaps_count_and_name() {
        let conversion = convert_deck_list("4 Lightning Bolt\r\n20 Mountain\n");
        assert_eq!(conversion.to_string(), "Lightning Bolt, 4\nMountain, 20");
        assert_eq!(conversion.dropped, 0);
    }

    #[test]
    fn test_convert_drops_headers_and_blank_lines() {
        let conversion = convert_deck_list("Deck\n\n1 Sol Ring\nSideboard\n2 Duress");
        assert_eq!(conversion.lines, vec!["Sol Ring, 1", "Duress, 2"]);
        assert_eq!(conversion.dropped, 2);
    }

    #[test]
    fn test_converted_lines_parse_as_records() {
        let conversion = convert_deck_list("3 Counterspell");
        let record = crate::record::parse_record(&conversion.lines[0]).unwrap();
        assert_eq!(record.name, "Counterspell");
        assert_eq!(record.quantity, 3);
    }
}
