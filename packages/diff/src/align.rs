//! Longest-common-subsequence alignment over child lists.

/// Compute the LCS pairing between two sequences under an arbitrary
/// equality predicate. Returns matched index pairs, strictly increasing
/// on both sides.
///
/// Classic quadratic dynamic program over suffixes, so the backtrack is
/// a forward walk that takes the earliest available match. When skipping,
/// it advances whichever side keeps the larger remaining match count and
/// prefers the left sequence on ties, which keeps pairings deterministic.
pub fn align<T, U, F>(left: &[T], right: &[U], equals: F) -> Vec<(usize, usize)>
where
    F: Fn(&T, &U) -> bool,
{
    if left.is_empty() || right.is_empty() {
        return Vec::new();
    }

    let n = left.len();
    let m = right.len();

    // table[i][j] = LCS length of left[i..] vs right[j..]
    let mut table = vec![vec![0usize; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            table[i][j] = if equals(&left[i], &right[j]) {
                table[i + 1][j + 1] + 1
            } else {
                table[i + 1][j].max(table[i][j + 1])
            };
        }
    }

    let mut pairs = Vec::with_capacity(table[0][0]);
    let mut i = 0;
    let mut j = 0;
    while i < n && j < m {
        if equals(&left[i], &right[j]) && table[i][j] == table[i + 1][j + 1] + 1 {
            pairs.push((i, j));
            i += 1;
            j += 1;
        } else if table[i + 1][j] >= table[i][j + 1] {
            i += 1;
        } else {
            j += 1;
        }
    }
    pairs
}
