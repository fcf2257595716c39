use crate::types::ContributorRecord;

/// Most contributors shown in charts and reports.
pub const TOP_CONTRIBUTORS: usize = 10;

/// Pick the contributors to display.
///
/// Without a filter (or with an empty one) this is the first
/// [`TOP_CONTRIBUTORS`] records. With a filter it is the first
/// [`TOP_CONTRIBUTORS`] records whose login contains the filter, ignoring
/// case. The input order is kept.
pub fn filter_contributors<'a>(
    contributors: &'a [ContributorRecord],
    username_filter: Option<&str>,
) -> Vec<&'a ContributorRecord> {
    match username_filter.filter(|f| !f.is_empty()) {
        None => contributors.iter().take(TOP_CONTRIBUTORS).collect(),
        Some(filter) => {
            let needle = filter.to_lowercase();
            contributors
                .iter()
                .filter(|c| c.login.to_lowercase().contains(&needle))
                .take(TOP_CONTRIBUTORS)
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn many(n: u64) -> Vec<ContributorRecord> {
        (0..n)
            .map(|i| ContributorRecord::new(format!("user{i}"), 1000 - i))
            .collect()
    }

    #[test]
    fn test_no_filter_takes_top_ten() {
        let contributors = many(25);
        let shown = filter_contributors(&contributors, None);
        let expected: Vec<&ContributorRecord> = contributors[..10].iter().collect();
        assert_eq!(shown, expected);
    }

    #[test]
    fn test_empty_filter_behaves_like_none() {
        let contributors = many(12);
        assert_eq!(
            filter_contributors(&contributors, Some("")),
            filter_contributors(&contributors, None)
        );
    }

    #[test]
    fn test_fewer_than_ten() {
        let contributors = many(3);
        assert_eq!(filter_contributors(&contributors, None).len(), 3);
    }

    #[test]
    fn test_case_insensitive_substring() {
        let contributors = vec![
            ContributorRecord::new("Alice", 50),
            ContributorRecord::new("bob", 10),
        ];
        let shown = filter_contributors(&contributors, Some("b"));
        assert_eq!(shown, vec![&ContributorRecord::new("bob", 10)]);

        let shown = filter_contributors(&contributors, Some("ALI"));
        assert_eq!(shown, vec![&ContributorRecord::new("Alice", 50)]);
    }

    #[test]
    fn test_filter_keeps_order_and_caps_at_ten() {
        let contributors = many(40);
        let shown = filter_contributors(&contributors, Some("USER1"));
        // user1, user10..user19 match; only the first ten are kept
        assert_eq!(shown.len(), 10);
        assert_eq!(shown[0].login, "user1");
        assert_eq!(shown[1].login, "user10");
        assert_eq!(shown[9].login, "user18");
        assert!(shown
            .windows(2)
            .all(|pair| pair[0].contributions > pair[1].contributions));
    }

    #[test]
    fn test_no_matches_is_empty() {
        let contributors = many(5);
        assert!(filter_contributors(&contributors, Some("zzz")).is_empty());
        assert!(filter_contributors(&[], Some("a")).is_empty());
    }

    #[test]
    fn test_unicode_logins() {
        let contributors = vec![
            ContributorRecord::new("ÉLODIE", 7),
            ContributorRecord::new("elodie", 3),
        ];
        let shown = filter_contributors(&contributors, Some("élo"));
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].login, "ÉLODIE");
    }
}
