//! Per-query lookup modifiers.
//!
//! `LookupFlags` is a small bit set threaded through `contains` and `complete`.
//! It is never stored in the trie. The textual form (`"case-insensitive|partial"`)
//! lets editor settings carry a flag combination as a plain string.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};
use std::str::FromStr;

use crate::Error;

/// Bit set of lookup modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LookupFlags(u8);

const NAMES: [(LookupFlags, &str); 4] = [
    (LookupFlags::CASE_INSENSITIVE, "case-insensitive"),
    (LookupFlags::PARTIAL, "partial"),
    (LookupFlags::SKIP_CHARS, "skip-chars"),
    (LookupFlags::SKIP_SPACES, "skip-spaces"),
];

impl LookupFlags {
    /// Exact, case-sensitive matching of whole stored strings.
    pub const NONE: LookupFlags = LookupFlags(0);
    /// Compare characters after lowercasing both sides.
    pub const CASE_INSENSITIVE: LookupFlags = LookupFlags(1);
    /// A query that ends inside stored content counts as found.
    pub const PARTIAL: LookupFlags = LookupFlags(1 << 1);
    /// Tolerate one extra character in the query.
    pub const SKIP_CHARS: LookupFlags = LookupFlags(1 << 2);
    /// Stored whitespace may be stepped over by the query.
    pub const SKIP_SPACES: LookupFlags = LookupFlags(1 << 3);
    /// Flags used by `complete` when the caller does not choose any.
    pub const COMPLETION: LookupFlags = LookupFlags(1 | 1 << 1);

    const ALL: u8 = 0b1111;

    /// Returns the raw bits.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Builds flags from raw bits, dropping unknown ones.
    pub const fn from_bits_truncate(bits: u8) -> Self {
        LookupFlags(bits & Self::ALL)
    }

    /// Returns `true` if every flag in `other` is set in `self`.
    pub const fn contains(self, other: LookupFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Compares a stored character with a query character.
    pub fn chars_match(self, stored: char, query: char) -> bool {
        stored == query
            || (self.contains(Self::CASE_INSENSITIVE)
                && stored.to_lowercase().eq(query.to_lowercase()))
    }
}

impl BitOr for LookupFlags {
    type Output = LookupFlags;

    fn bitor(self, rhs: LookupFlags) -> LookupFlags {
        LookupFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for LookupFlags {
    fn bitor_assign(&mut self, rhs: LookupFlags) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for LookupFlags {
    type Output = LookupFlags;

    fn bitand(self, rhs: LookupFlags) -> LookupFlags {
        LookupFlags(self.0 & rhs.0)
    }
}

impl fmt::Display for LookupFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "none");
        }
        let mut first = true;
        for (flag, name) in NAMES.iter() {
            if self.contains(*flag) {
                if !first {
                    write!(f, "|")?;
                }
                write!(f, "{}", name)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl FromStr for LookupFlags {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut flags = LookupFlags::NONE;
        for part in s.split('|') {
            let part = part.trim();
            if part.is_empty() || part.eq_ignore_ascii_case("none") {
                continue;
            }
            let flag = NAMES
                .iter()
                .find(|(_, name)| part.eq_ignore_ascii_case(name))
                .map(|(flag, _)| *flag)
                .ok_or_else(|| Error::UnknownFlag(part.to_string()))?;
            flags |= flag;
        }
        Ok(flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_and_combine() {
        let flags = LookupFlags::CASE_INSENSITIVE | LookupFlags::PARTIAL;
        assert_eq!(flags, LookupFlags::COMPLETION);
        assert!(flags.contains(LookupFlags::PARTIAL));
        assert!(!flags.contains(LookupFlags::SKIP_CHARS));
        assert!(LookupFlags::NONE.is_empty());
        assert_eq!((flags & LookupFlags::PARTIAL), LookupFlags::PARTIAL);
    }

    #[test]
    fn test_from_bits_truncate() {
        assert_eq!(LookupFlags::from_bits_truncate(0xff).bits(), 0b1111);
        assert_eq!(LookupFlags::from_bits_truncate(2), LookupFlags::PARTIAL);
    }

    #[test]
    fn test_chars_match() {
        assert!(LookupFlags::NONE.chars_match('a', 'a'));
        assert!(!LookupFlags::NONE.chars_match('F', 'f'));
        assert!(LookupFlags::CASE_INSENSITIVE.chars_match('F', 'f'));
        assert!(LookupFlags::CASE_INSENSITIVE.chars_match('Ä', 'ä'));
    }

    #[test]
    fn test_display() {
        assert_eq!(LookupFlags::NONE.to_string(), "none");
        assert_eq!(LookupFlags::COMPLETION.to_string(), "case-insensitive|partial");
        assert_eq!(
            (LookupFlags::SKIP_SPACES | LookupFlags::SKIP_CHARS).to_string(),
            "skip-chars|skip-spaces"
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!("".parse::<LookupFlags>(), Ok(LookupFlags::NONE));
        assert_eq!("none".parse::<LookupFlags>(), Ok(LookupFlags::NONE));
        assert_eq!(
            " Partial | case-insensitive ".parse::<LookupFlags>(),
            Ok(LookupFlags::COMPLETION)
        );
        let all = LookupFlags::from_bits_truncate(0b1111);
        assert_eq!(all.to_string().parse::<LookupFlags>(), Ok(all));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            "partial|fuzzy".parse::<LookupFlags>(),
            Err(Error::UnknownFlag("fuzzy".to_string()))
        );
    }
}
