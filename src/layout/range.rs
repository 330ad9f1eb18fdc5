use super::*;

/// Padded `[min_date, max_date]` span of the timeline axis. Both ends fall on
/// the 1st of a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub min_date: NaiveDate,
    pub max_date: NaiveDate,
}

impl DateRange {
    pub fn total_days(&self) -> i64 {
        day_difference(self.min_date, self.max_date)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.min_date && date <= self.max_date
    }
}

/// Scans every event date of the given conferences and pads the extremes out
/// to whole months. Returns `None` when there is not a single date.
pub fn compute_date_range<'a, I>(conferences: I, padding_months: u32) -> Option<DateRange>
where
    I: IntoIterator<Item = &'a Conference>,
{
    let (earliest, latest) = conferences
        .into_iter()
        .filter_map(Conference::date_bounds)
        .reduce(|(lo, hi), (a, b)| (lo.min(a), hi.max(b)))?;

    let months = padding_months.max(1) as i32;
    let min_date = add_months(first_of_month(earliest), -months).unwrap_or(earliest);
    let max_date = add_months(first_of_month(latest), months).unwrap_or(latest);
    Some(DateRange { min_date, max_date })
}
