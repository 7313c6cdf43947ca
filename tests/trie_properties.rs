use completion_trie::{LookupFlags, SharedWith, Trie};
use quickcheck::{quickcheck, Arbitrary, Gen};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Short words over a tiny alphabet, so tries share plenty of prefixes.
/// Spaces exercise whitespace collapsing and `A` exercises case folding.
#[derive(Clone, Debug)]
struct Word(String);

impl Arbitrary for Word {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % 6;
        let word = (0..len)
            .map(|_| *g.choose(&['a', 'b', 'c', 'A', ' ']).unwrap())
            .collect();
        Word(word)
    }
}

/// Collapses whitespace runs to a single space, the equivalence `insert` applies.
fn squeeze(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_space = false;
    for c in s.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

fn squeezed<'a, I: IntoIterator<Item = &'a String>>(strings: I) -> BTreeSet<String> {
    strings.into_iter().map(|s| squeeze(s)).collect()
}

fn build(words: &[Word]) -> Trie {
    words.iter().map(|w| w.0.as_str()).collect()
}

fn set_of(words: &[Word]) -> BTreeSet<String> {
    words.iter().map(|w| w.0.clone()).collect()
}

fn content(trie: &Trie) -> BTreeSet<String> {
    trie.string_list().into_iter().collect()
}

fn no_duplicates(trie: &Trie) -> bool {
    let list = trie.string_list();
    list.len() == content(trie).len()
}

quickcheck! {
    fn stores_exactly_what_was_inserted(words: Vec<Word>) -> bool {
        let trie = build(&words);
        let expected = squeezed(&set_of(&words));
        let stored = content(&trie);
        squeezed(&stored) == expected
            && stored.len() == expected.len()
            && no_duplicates(&trie)
            && trie.len() == expected.len()
    }

    fn insert_is_idempotent(words: Vec<Word>, extra: Word) -> bool {
        let once = build(&words).inserted(&extra.0);
        let twice = once.inserted(&extra.0);
        Arc::ptr_eq(once.root().unwrap(), twice.root().unwrap())
            && once.string_list() == twice.string_list()
    }

    fn recall(words: Vec<Word>) -> bool {
        let trie = build(&words);
        words.iter().all(|w| trie.contains(&w.0))
    }

    fn partial_lookup_accepts_every_prefix(words: Vec<Word>) -> bool {
        let trie = build(&words);
        words.iter().all(|w| {
            let chars: Vec<char> = w.0.chars().collect();
            (0..=chars.len()).all(|n| {
                let prefix: String = chars[..n].iter().collect();
                trie.contains_with(&prefix, LookupFlags::PARTIAL)
            })
        })
    }

    fn complete_lists_exactly_the_extensions(words: Vec<Word>, query: Word) -> bool {
        let trie = build(&words);
        let found: BTreeSet<String> = trie
            .complete_with(&query.0, "", LookupFlags::PARTIAL)
            .into_iter()
            .collect();
        let prefix = squeeze(&query.0);
        let expected: BTreeSet<String> = content(&trie)
            .into_iter()
            .filter(|w| squeeze(w).starts_with(&prefix))
            .collect();
        found == expected
    }

    fn case_insensitive_lookup_folds_case(words: Vec<Word>, query: Word) -> bool {
        let trie = build(&words);
        let fold = |s: &str| squeeze(&s.to_lowercase());
        let expected = words.iter().any(|w| fold(&w.0) == fold(&query.0));
        trie.contains_with(&query.0, LookupFlags::CASE_INSENSITIVE) == expected
    }

    fn intersection_is_set_intersection(a: Vec<Word>, b: Vec<Word>) -> bool {
        let (ta, tb) = (build(&a), build(&b));
        let expected: BTreeSet<String> = content(&ta).intersection(&content(&tb)).cloned().collect();
        let result = ta.intersected(&tb);
        content(&result) == expected && no_duplicates(&result)
    }

    fn intersection_with_self_is_free(words: Vec<Word>) -> bool {
        let trie = build(&words);
        let (root, shared) = completion_trie::intersect(trie.root(), trie.root(), 0);
        match (root, trie.root()) {
            (Some(result), Some(original)) => {
                shared == SharedWith::BOTH && Arc::ptr_eq(&result, original)
            }
            (None, None) => true,
            _ => false,
        }
    }

    fn union_is_set_union(a: Vec<Word>, b: Vec<Word>) -> bool {
        let (ta, tb) = (build(&a), build(&b));
        let expected = squeezed(content(&ta).union(&content(&tb)));
        let result = ta.merged(&tb);
        squeezed(&content(&result)) == expected
            && result.len() == expected.len()
            && no_duplicates(&result)
    }

    fn union_keeps_left_order_first(a: Vec<Word>, b: Vec<Word>) -> bool {
        let (ta, tb) = (build(&a), build(&b));
        let before = ta.string_list();
        let merged = ta.merged(&tb).string_list();
        let kept: Vec<String> = merged.into_iter().filter(|s| before.contains(s)).collect();
        kept == before
    }

    fn operations_leave_inputs_untouched(a: Vec<Word>, b: Vec<Word>) -> bool {
        let (ta, tb) = (build(&a), build(&b));
        let (before_a, before_b) = (ta.string_list(), tb.string_list());
        let _ = ta.merged(&tb);
        let _ = ta.intersected(&tb);
        let _ = tb.inserted("zz");
        ta.string_list() == before_a && tb.string_list() == before_b
    }
}
