//! Approximate string matching for span reconciliation

/// Classic single-character edit distance (insert/delete/substitute, each
/// cost 1), computed over chars
///
/// No truncation, case-folding, or whitespace normalization happens here;
/// those are caller responsibilities.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Two-row rolling table; spans can reach the comparison cap, so the
    // full m×n matrix is avoidable memory.
    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0usize; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = if a_chars[i - 1] == b_chars[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1)
                .min(curr[j - 1] + 1)
                .min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Normalized similarity ratio in [0, 1]
///
/// `(max_len - edit_distance) / max_len` over character counts. A
/// zero-length side yields 0.0 by definition: no match, never a division
/// by zero. Symmetric, and 1.0 for equal non-empty inputs.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a_len = a.chars().count();
    let b_len = b.chars().count();

    if a_len == 0 || b_len == 0 {
        return 0.0;
    }

    let max_len = a_len.max(b_len);
    (max_len - edit_distance(a, b)) as f64 / max_len as f64
}
