//! Bounded case-insensitive prefix comparison.

/// Compare the first `n` characters of `a` and `b`, ignoring ASCII case.
///
/// `n == 0` always matches. If either string holds fewer than `n`
/// characters the result is `false`: missing characters never match.
pub fn prefix_eq(a: &str, b: &str, n: usize) -> bool {
    let mut ai = a.chars().map(|c| c.to_ascii_lowercase());
    let mut bi = b.chars().map(|c| c.to_ascii_lowercase());
    for _ in 0..n {
        match (ai.next(), bi.next()) {
            (Some(x), Some(y)) if x == y => {},
            _ => return false,
        }
    }
    true
}
