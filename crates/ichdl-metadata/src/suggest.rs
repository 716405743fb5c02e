//! "Did you mean" matching for part numbers and template names.

/// Levenshtein edit distance between two strings.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    // Single rolling row instead of the full matrix.
    let mut row: Vec<usize> = (0..=b_chars.len()).collect();

    for (i, ca) in a_chars.iter().enumerate() {
        let mut diag = row[0];
        row[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != cb);
            let next = (row[j + 1] + 1).min(row[j] + 1).min(diag + cost);
            diag = row[j + 1];
            row[j + 1] = next;
        }
    }

    row[b_chars.len()]
}

/// Candidates similar to `input`, closest first.
///
/// A candidate matches when one contains the other (case-insensitive) or the
/// edit distance is at most half the input length plus one.
pub fn similar<'a, I>(input: &str, candidates: I, limit: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let needle = input.to_lowercase();
    let threshold = input.chars().count() / 2 + 1;

    let mut scored: Vec<(usize, &str)> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let hay = candidate.to_lowercase();
            let distance = levenshtein(&needle, &hay);
            let contains = !needle.is_empty() && (hay.contains(&needle) || needle.contains(&hay));
            if distance == 0 {
                None
            } else if distance <= threshold || contains {
                Some((distance, candidate))
            } else {
                None
            }
        })
        .collect();

    scored.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));
    scored.dedup_by(|a, b| a.1 == b.1);
    scored
        .into_iter()
        .take(limit)
        .map(|(_, c)| c.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("7400", "7400"), 0);
        assert_eq!(levenshtein("7440", "7400"), 1);
    }

    #[test]
    fn test_similar_part_numbers() {
        let parts = ["7400", "7402", "7404", "74138", "555"];
        let found = similar("7401", parts, 3);
        assert_eq!(found, vec!["7400", "7402", "7404"]);

        assert!(similar("9999999", parts, 3).is_empty());
    }

    #[test]
    fn test_similar_substring() {
        let names = ["nand_quad", "nor_quad", "counter_decade_7490"];
        let found = similar("7490", names, 5);
        assert_eq!(found, vec!["counter_decade_7490"]);
    }

    #[test]
    fn test_exact_match_excluded() {
        assert!(similar("7400", ["7400"], 3).is_empty());
    }

    proptest! {
        #[test]
        fn levenshtein_is_symmetric(a in "[a-z0-9]{0,12}", b in "[a-z0-9]{0,12}") {
            prop_assert_eq!(levenshtein(&a, &b), levenshtein(&b, &a));
        }

        #[test]
        fn levenshtein_bounded_by_longer(a in "[a-z0-9]{0,12}", b in "[a-z0-9]{0,12}") {
            let d = levenshtein(&a, &b);
            prop_assert!(d <= a.len().max(b.len()));
            prop_assert!(d >= a.len().abs_diff(b.len()));
        }
    }
}
