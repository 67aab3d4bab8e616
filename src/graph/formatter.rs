use serde::Serialize;

use super::aggregator::ScoreMatrix;

/// How a score matrix is turned into output rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// A pair is kept when one of its directed weights is strictly greater.
    /// Negative thresholds keep every pair, zero-weight ones included.
    pub threshold: i64,
    /// Replace labels with [`pseudonym`]s.
    pub anonymize: bool,
}

/// One output row: an unordered pair with its combined weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub weight: u64,
}

/// Stable short alias for a label: `n` plus the hex MD5 of `key`,
/// 8 characters in total.
pub fn pseudonym(key: &str) -> String {
    let mut alias = format!("n{:x}", md5::compute(key));
    alias.truncate(8);
    alias
}

fn label(key: &str, anonymize: bool) -> String {
    if anonymize {
        pseudonym(key)
    } else {
        key.to_string()
    }
}

/// Pair up every distinct label of `matrix`, senders and repliers alike.
///
/// A pair passes when either directed weight exceeds the threshold; the
/// row follows the first passing direction in key order and carries the
/// sum of both directions. Sorted by weight descending, then by label.
pub fn edges(matrix: &ScoreMatrix, options: &ReportOptions) -> Vec<Edge> {
    let keys: Vec<&str> = matrix.keys().into_iter().collect();
    let threshold = i128::from(options.threshold);
    let mut rows = Vec::new();

    for (i, &a) in keys.iter().enumerate() {
        for &b in &keys[i + 1..] {
            let forward = matrix.get(a, b);
            let backward = matrix.get(b, a);
            let (source, target) = if i128::from(forward) > threshold {
                (a, b)
            } else if i128::from(backward) > threshold {
                (b, a)
            } else {
                continue;
            };
            rows.push(Edge {
                source: label(source, options.anonymize),
                target: label(target, options.anonymize),
                weight: forward + backward,
            });
        }
    }

    rows.sort_by(|x, y| {
        y.weight
            .cmp(&x.weight)
            .then_with(|| x.source.cmp(&y.source))
            .then_with(|| x.target.cmp(&y.target))
    });
    rows
}

#[cfg(test)]
#[path = "formatter_test.rs"]
mod tests;
