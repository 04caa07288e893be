//! Longest common subsequence
//!
//! When several maximal subsequences exist, the result is pinned by a fixed
//! tie-break. On a mismatch where the cell above `(i-1, j)` and the cell to
//! the left `(i, j-1)` hold equally long subsequences, the cell above wins.
//! The traceback below applies the same rule, so it reproduces exactly the
//! subsequence a string-valued table would hold at the final cell.

/// Compute one longest common subsequence of `a` and `b`
pub fn longest_common_subsequence(a: &[u8], b: &[u8]) -> Vec<u8> {
    let n = a.len();
    let m = b.len();
    if n == 0 || m == 0 {
        return Vec::new();
    }

    let cols = m + 1;
    let idx = |i: usize, j: usize| i * cols + j;
    let mut lengths = vec![0usize; (n + 1) * cols];

    for i in 1..=n {
        for j in 1..=m {
            lengths[idx(i, j)] = if a[i - 1] == b[j - 1] {
                lengths[idx(i - 1, j - 1)] + 1
            } else {
                lengths[idx(i - 1, j)].max(lengths[idx(i, j - 1)])
            };
        }
    }

    let mut result = Vec::with_capacity(lengths[idx(n, m)]);
    let (mut i, mut j) = (n, m);
    while i > 0 && j > 0 {
        if a[i - 1] == b[j - 1] {
            result.push(a[i - 1]);
            i -= 1;
            j -= 1;
        } else if lengths[idx(i - 1, j)] >= lengths[idx(i, j - 1)] {
            i -= 1;
        } else {
            j -= 1;
        }
    }
    result.reverse();

    log::trace!("lcs of {}x{} has length {}", n, m, result.len());
    result
}
