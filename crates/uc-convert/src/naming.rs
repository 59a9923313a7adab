//! Table resource names derived from record identifiers.
//!
//! Two conventions are in use:
//! - fixed affixes: `CONV-<name>-RB`, a 5-character prefix and a 3-character suffix
//! - delimiters: `<area>-<name>-<field>`, the text between the first and last `-`

use serde::{Deserialize, Serialize};

pub const FIXED_PREFIX_LEN: usize = 5;
pub const FIXED_SUFFIX_LEN: usize = 3;
pub const SEPARATOR: char = '-';

/// How a resource name is extracted from an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingStrategy {
    /// Strip a constant prefix and suffix.
    FixedAffix,
    /// Take the text between the first and last separator.
    Delimiter,
    /// Delimiter when it yields a name, fixed affixes otherwise.
    #[default]
    Auto,
}

/// Resource name for `identifier`, or `None` when no table should be loaded.
pub fn resource_name(identifier: &str, strategy: NamingStrategy) -> Option<String> {
    match strategy {
        NamingStrategy::FixedAffix => fixed_affix(identifier),
        NamingStrategy::Delimiter => delimited(identifier),
        NamingStrategy::Auto => delimited(identifier).or_else(|| fixed_affix(identifier)),
    }
}

fn fixed_affix(identifier: &str) -> Option<String> {
    let len = identifier.chars().count();
    if len <= FIXED_PREFIX_LEN + FIXED_SUFFIX_LEN {
        return None;
    }
    Some(
        identifier
            .chars()
            .skip(FIXED_PREFIX_LEN)
            .take(len - FIXED_PREFIX_LEN - FIXED_SUFFIX_LEN)
            .collect(),
    )
}

fn delimited(identifier: &str) -> Option<String> {
    let first = identifier.find(SEPARATOR)?;
    let last = identifier.rfind(SEPARATOR)?;
    if first + SEPARATOR.len_utf8() >= identifier.len() || last <= first {
        return None;
    }
    let name = &identifier[first + SEPARATOR.len_utf8()..last];
    (!name.is_empty()).then(|| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_affix_strips_prefix_and_suffix() {
        assert_eq!(
            resource_name("CONV-SI-QFA-RB", NamingStrategy::FixedAffix).as_deref(),
            Some("SI-QFA")
        );
        assert_eq!(
            resource_name("CONV-Q-SP", NamingStrategy::FixedAffix).as_deref(),
            Some("Q")
        );
    }

    #[test]
    fn fixed_affix_needs_more_than_eight_chars() {
        assert_eq!(resource_name("CONV--RB", NamingStrategy::FixedAffix), None);
        assert_eq!(resource_name("", NamingStrategy::FixedAffix), None);
    }

    #[test]
    fn delimiter_takes_text_between_first_and_last() {
        assert_eq!(
            resource_name("BO-B-1-Current", NamingStrategy::Delimiter).as_deref(),
            Some("B-1")
        );
        assert_eq!(
            resource_name("SI-QFA-RB", NamingStrategy::Delimiter).as_deref(),
            Some("QFA")
        );
    }

    #[test]
    fn delimiter_edge_cases_yield_no_name() {
        // no separator
        assert_eq!(resource_name("QUADRUPOLE", NamingStrategy::Delimiter), None);
        // single separator in the middle
        assert_eq!(resource_name("SI-QFA", NamingStrategy::Delimiter), None);
        // separator is the last character
        assert_eq!(resource_name("SIQFA-", NamingStrategy::Delimiter), None);
        // adjacent separators
        assert_eq!(resource_name("SI--RB", NamingStrategy::Delimiter), None);
    }

    #[test]
    fn auto_prefers_delimiter_then_fixed_affix() {
        assert_eq!(
            resource_name("CONV-SI-QFA-RB", NamingStrategy::Auto).as_deref(),
            Some("SI-QFA")
        );
        assert_eq!(
            resource_name("CONVXQUADXRB", NamingStrategy::Auto).as_deref(),
            Some("QUAD")
        );
        assert_eq!(resource_name("Q-1", NamingStrategy::Auto), None);
    }

    #[test]
    fn strategy_serde_names() {
        let s: NamingStrategy = serde_yaml::from_str("fixed_affix").unwrap();
        assert_eq!(s, NamingStrategy::FixedAffix);
        assert_eq!(NamingStrategy::default(), NamingStrategy::Auto);
    }
}
