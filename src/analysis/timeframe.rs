use std::fmt;

/// A trailing window over the weekly commit series.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Timeframe {
    LastWeek,
    LastMonth,
    LastThreeMonths,
    LastSixMonths,
    #[default]
    AllTime,
}

impl Timeframe {
    /// Every timeframe, in the order offered to the user.
    pub const ALL: [Timeframe; 5] = [
        Timeframe::LastWeek,
        Timeframe::LastMonth,
        Timeframe::LastThreeMonths,
        Timeframe::LastSixMonths,
        Timeframe::AllTime,
    ];

    /// Number of weeks covered.
    pub fn weeks(&self) -> usize {
        match self {
            Timeframe::LastWeek => 1,
            Timeframe::LastMonth => 4,
            Timeframe::LastThreeMonths => 12,
            Timeframe::LastSixMonths => 26,
            Timeframe::AllTime => 52,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::LastWeek => "Last Week",
            Timeframe::LastMonth => "Last Month",
            Timeframe::LastThreeMonths => "Last 3 Months",
            Timeframe::LastSixMonths => "Last 6 Months",
            Timeframe::AllTime => "All Time",
        }
    }

    /// Look up a timeframe by label; unknown labels mean the whole year.
    pub fn from_label(label: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|t| t.label() == label)
            .unwrap_or_default()
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Keep the most recent `weeks` entries of a chronological series.
///
/// Returns the input itself when it is empty or no longer than the window.
pub fn filter_commits_by_timeframe<T>(series: &[T], weeks: usize) -> &[T] {
    if series.is_empty() || weeks >= series.len() {
        return series;
    }
    &series[series.len() - weeks..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn year() -> Vec<u64> {
        (1..=52).collect()
    }

    #[test]
    fn test_last_month_takes_last_four_weeks() {
        let series = year();
        let filtered = filter_commits_by_timeframe(&series, Timeframe::LastMonth.weeks());
        assert_eq!(filtered, &[49, 50, 51, 52]);
        assert_eq!(series.len(), 52);
    }

    #[test]
    fn test_length_is_min_of_window_and_series() {
        let series: Vec<u64> = (0..20).collect();
        for timeframe in Timeframe::ALL {
            let filtered = filter_commits_by_timeframe(&series, timeframe.weeks());
            let expected = timeframe.weeks().min(series.len());
            assert_eq!(filtered.len(), expected);
            assert_eq!(filtered, &series[series.len() - expected..]);
        }
    }

    #[test]
    fn test_window_larger_than_series_is_identity() {
        let series = vec![3u64, 1, 4];
        assert_eq!(filter_commits_by_timeframe(&series, 52), &series[..]);
        assert_eq!(filter_commits_by_timeframe(&series, 3), &series[..]);
    }

    #[test]
    fn test_empty_series() {
        let series: Vec<u64> = Vec::new();
        assert!(filter_commits_by_timeframe(&series, 4).is_empty());
    }

    #[test]
    fn test_zero_window_is_empty() {
        let series = year();
        assert!(filter_commits_by_timeframe(&series, 0).is_empty());
    }

    #[test]
    fn test_labels_round_trip_and_default() {
        for timeframe in Timeframe::ALL {
            assert_eq!(Timeframe::from_label(timeframe.label()), timeframe);
        }
        assert_eq!(Timeframe::from_label("Last Decade"), Timeframe::AllTime);
        assert_eq!(Timeframe::default().weeks(), 52);
    }
}
