/// Finds the length of the common prefix between two character runs.
///
/// Returns the number of leading characters that are exactly equal.
pub fn common_prefix(a: &[char], b: &[char]) -> usize {
    a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count()
}

/// Returns the index just past the whitespace run starting at `from`.
pub fn skip_whitespace(chars: &[char], from: usize) -> usize {
    let mut i = from;
    while i < chars.len() && chars[i].is_whitespace() {
        i += 1;
    }
    i
}

/// Whether two leading characters select the same child during insertion.
///
/// Any two whitespace characters are interchangeable.
pub fn same_leading(a: char, b: char) -> bool {
    a == b || (a.is_whitespace() && b.is_whitespace())
}

/// Walks a stored prefix against a value being inserted.
///
/// A whitespace run in the prefix only continues into a whitespace run of the
/// value, and both runs are consumed as one boundary. Returns the positions
/// reached in `prefix` and in `value`.
pub fn match_for_insert(prefix: &[char], value: &[char]) -> (usize, usize) {
    let (mut i, mut j) = (0, 0);

    while i < prefix.len() && j < value.len() {
        if prefix[i].is_whitespace() {
            if !value[j].is_whitespace() {
                break;
            }
            i = skip_whitespace(prefix, i);
            j = skip_whitespace(value, j);
            continue;
        }
        if prefix[i] != value[j] {
            break;
        }
        i += 1;
        j += 1;
    }

    (i, j)
}
