use chrono::NaiveDate;

/// Period the rewards are summed over, as written in the overview sheet.
///
/// The dates are forwarded to the API untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub start_date: String,
    pub end_date: String,
}

impl DateRange {
    pub fn new(start_date: impl Into<String>, end_date: impl Into<String>) -> Self {
        DateRange {
            start_date: start_date.into(),
            end_date: end_date.into(),
        }
    }

    /// Both dates are ISO-8601 (`YYYY-MM-DD`) and the range is not reversed.
    pub fn is_well_formed(&self) -> bool {
        let parse = |date: &str| NaiveDate::parse_from_str(date, "%Y-%m-%d");
        match (parse(&self.start_date), parse(&self.end_date)) {
            (Ok(start), Ok(end)) => start <= end,
            _ => false,
        }
    }
}
