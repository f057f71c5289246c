use crate::models::{Poll, Tally};

/// Display-ready view of a tally.
#[derive(Debug, Clone, PartialEq)]
pub struct PollResults {
    pub total: u128,
    pub rows: Vec<OptionResult>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptionResult {
    pub id: String,
    pub label: String,
    pub text: String,
    pub count: u64,
    pub percent: u64,
    pub leading: bool,
}

/// One row per poll option, in poll order. Unknown ids in the tally are
/// ignored, including for the total.
pub fn summarize(poll: &Poll, tally: &Tally) -> PollResults {
    let counts: Vec<u64> = poll
        .options()
        .iter()
        .map(|option| tally.get(&option.id).copied().unwrap_or(0))
        .collect();

    let total: u128 = counts.iter().map(|count| u128::from(*count)).sum();
    let max = counts.iter().copied().max().unwrap_or(0);

    let rows = poll
        .options()
        .iter()
        .zip(counts)
        .map(|(option, count)| OptionResult {
            id: option.id.clone(),
            label: option.label.clone(),
            text: option.text.clone(),
            count,
            percent: percent_of(count, total),
            leading: max > 0 && count == max,
        })
        .collect();

    PollResults { total, rows }
}

/// Whole percent, halves rounded up.
fn percent_of(count: u64, total: u128) -> u64 {
    if total == 0 {
        return 0;
    }
    let percent = (u128::from(count) * 200 + total) / (2 * total);
    u64::try_from(percent).unwrap_or(100)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally(pairs: &[(&str, u64)]) -> Tally {
        pairs.iter().map(|(id, n)| (id.to_string(), *n)).collect()
    }

    #[test]
    fn test_empty_tally_has_no_leader() {
        let poll = Poll::first_coffee().unwrap();
        let results = summarize(&poll, &poll.initial_tally());

        assert_eq!(results.total, 0);
        assert_eq!(results.rows.len(), 4);
        assert!(results.rows.iter().all(|r| r.percent == 0 && !r.leading));
    }

    #[test]
    fn test_percentages_and_leader() {
        let poll = Poll::first_coffee().unwrap();
        let results = summarize(&poll, &tally(&[("a", 1), ("b", 2), ("c", 0), ("d", 0)]));

        assert_eq!(results.total, 3);
        let percents: Vec<u64> = results.rows.iter().map(|r| r.percent).collect();
        assert_eq!(percents, vec![33, 67, 0, 0]);
        let leaders: Vec<&str> = results
            .rows
            .iter()
            .filter(|r| r.leading)
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(leaders, vec!["b"]);
    }

    #[test]
    fn test_ties_share_the_lead() {
        let poll = Poll::first_coffee().unwrap();
        let results = summarize(&poll, &tally(&[("a", 4), ("d", 4)]));

        let leaders: Vec<&str> = results
            .rows
            .iter()
            .filter(|r| r.leading)
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(leaders, vec!["a", "d"]);
    }

    #[test]
    fn test_unknown_ids_are_ignored() {
        let poll = Poll::first_coffee().unwrap();
        let results = summarize(&poll, &tally(&[("a", 1), ("legacy", 40)]));

        assert_eq!(results.total, 1);
        assert_eq!(results.rows[0].percent, 100);
        assert!(results.rows.iter().all(|r| r.id != "legacy"));
    }

    #[test]
    fn test_huge_counts_do_not_overflow_total() {
        let poll = Poll::first_coffee().unwrap();
        let half = u64::MAX / 2 + 1;
        let results = summarize(&poll, &tally(&[("a", half), ("b", half)]));

        assert_eq!(results.total, u128::from(half) * 2);
        assert_eq!(results.rows[0].percent, 50);
        assert_eq!(results.rows[1].percent, 50);
        assert!(results.rows[0].leading && results.rows[1].leading);
    }

    #[test]
    fn test_single_max_count_is_whole() {
        let poll = Poll::first_coffee().unwrap();
        let results = summarize(&poll, &tally(&[("d", u64::MAX)]));

        assert_eq!(results.rows[3].percent, 100);
        assert_eq!(results.rows[0].percent, 0);
    }
}
