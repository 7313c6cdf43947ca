//! Ranking of completion candidates.
//!
//! `match_strength` scores how well a typed query fits a candidate, rewarding
//! runs of consecutive matches and matches on word starts. `match_strength_sort`
//! orders candidates best-first and keeps the incoming order among ties, so the
//! trie's insertion order breaks ties.

use std::cmp::Reverse;
use std::convert::TryFrom;

use crate::flags::LookupFlags;

/// Scores `candidate` against `query`.
///
/// Query characters are consumed greedily, left to right and ignoring case.
/// A matched character earns a point when it continues a run of matches,
/// starts a capitalized word, matches an uppercase query character with an
/// uppercase candidate character, or follows a separator. The start of the
/// candidate counts as a separator. A non-empty query consumed without
/// skipping any candidate character earns one more point, so a candidate
/// that starts with the query outranks the same text behind a prefix.
///
/// When some query characters are never matched the result is
/// `-(unmatched query characters)`. The count is negated so that a failure
/// sorts below every real score (real scores are at least 0) under the
/// descending order of [`match_strength_sort`], and the more of the query
/// failed, the lower it sorts.
///
/// # Examples
///
/// ```
/// use completion_trie::match_strength;
///
/// assert!(match_strength("foo", "foo") > match_strength("foo", "xfoo"));
/// assert!(match_strength("foo", "foo") > match_strength("foo", "_foo"));
/// assert!(match_strength("foo", "xfoo") > match_strength("foo", "fxx"));
/// assert_eq!(match_strength("foo", "fxx"), -2);
/// ```
pub fn match_strength(query: &str, candidate: &str) -> i32 {
    let mut pending = query.chars().peekable();
    let mut last_was_not_upper = true;
    let mut last_was_spacer = true;
    let mut last_was_match = false;
    let mut jumped = false;
    let mut score = 0;

    for c in candidate.chars() {
        let q = match pending.peek() {
            Some(&q) => q,
            None => break,
        };
        let is_upper = c.is_uppercase();
        let is_word = c.is_alphanumeric();

        if LookupFlags::CASE_INSENSITIVE.chars_match(c, q) {
            if last_was_match
                || (last_was_not_upper && is_upper)
                || (is_upper && q.is_uppercase())
                || (last_was_spacer && is_word)
            {
                score += 1;
            }
            last_was_match = true;
            pending.next();
        } else {
            last_was_match = false;
            jumped = true;
        }
        last_was_not_upper = !is_upper;
        last_was_spacer = !is_word;
    }

    match pending.count() {
        0 if !jumped && !query.is_empty() => score + 1,
        0 => score,
        missing => -i32::try_from(missing).unwrap_or(i32::MAX),
    }
}

/// Sorts `items` by descending `match_strength` against `query`.
///
/// The sort is stable: equally scored items keep their relative order.
pub fn match_strength_sort<S: AsRef<str>>(query: &str, items: &mut [S]) {
    items.sort_by_cached_key(|item| Reverse(match_strength(query, item.as_ref())));
}

/// Collects `items` and returns them ranked against `query`.
pub fn ranked<S, I>(query: &str, items: I) -> Vec<S>
where
    S: AsRef<str>,
    I: IntoIterator<Item = S>,
{
    let mut items: Vec<S> = items.into_iter().collect();
    match_strength_sort(query, &mut items);
    items
}
