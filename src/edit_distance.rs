//! Member-name suggestions for decode failures, in the spirit of rustc's
//! `find_best_match_for_name`.

/// Find the candidate closest to `name`, if any is close enough to be worth
/// suggesting. `max_dist` defaults to a third of the name's length, so short
/// names only match near-exact candidates.
pub(crate) fn find_best_match_for_name<'a>(
    candidates: impl IntoIterator<Item = &'a str>,
    name: &str,
    max_dist: Option<usize>,
) -> Option<String> {
    let limit = max_dist.unwrap_or(name.len() / 3 + 1);
    let mut best: Option<(usize, &str)> = None;
    for candidate in candidates {
        let dist = levenshtein(name, candidate);
        if dist <= limit && best.map_or(true, |(d, _)| dist < d) {
            best = Some((dist, candidate));
        }
    }
    best.map(|(_, candidate)| candidate.to_owned())
}

fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b_chars.len()).collect();
    for (i, a_ch) in a.chars().enumerate() {
        let mut prev_diag = row[0];
        row[0] = i + 1;
        for (j, &b_ch) in b_chars.iter().enumerate() {
            let cost = if a_ch == b_ch { 0 } else { 1 };
            let next = (prev_diag + cost).min(row[j] + 1).min(row[j + 1] + 1);
            prev_diag = row[j + 1];
            row[j + 1] = next;
        }
    }
    row[b_chars.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("abc", "abc"), 0);
        assert_eq!(levenshtein("abc", "abd"), 1);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("", "abc"), 3);
    }

    #[test]
    fn suggests_close_names_only() {
        let members = ["name", "description", "resupply_cost"];
        assert_eq!(
            find_best_match_for_name(members, "descripton", None),
            Some("description".to_owned())
        );
        assert_eq!(find_best_match_for_name(members, "zzz", None), None);
    }
}
