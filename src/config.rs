use chrono::{Months, NaiveDate, Utc};

/// Label that opts a PR's branch out of staleness consideration.
pub const PROTECTIVE_LABEL: &str = "do-not-delete";

/// Warning label the label pass applies ahead of deletion.
pub const WARNING_LABEL: &str = "will-be-deleted-within-a-week";

/// Run-constant configuration for one sweep over an organization.
///
/// Built once at startup and passed explicitly to the filter and drivers; the
/// cutoff is never recomputed mid-run, so every repository sees the same date.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub org: String,
    pub cutoff: NaiveDate,
    pub dry_run: bool,
    pub protective_label: String,
    pub warning_label: String,
}

impl RunConfig {
    /// `date_period` is in months; the cutoff is today minus that many months.
    pub fn new(org: impl Into<String>, date_period: u32, dry_run: bool) -> Self {
        Self::with_cutoff(org, cutoff_date(Utc::now().date_naive(), date_period), dry_run)
    }

    /// Fix the cutoff directly. Tests use this to pin the date.
    pub fn with_cutoff(org: impl Into<String>, cutoff: NaiveDate, dry_run: bool) -> Self {
        Self {
            org: org.into(),
            cutoff,
            dry_run,
            protective_label: PROTECTIVE_LABEL.to_string(),
            warning_label: WARNING_LABEL.to_string(),
        }
    }
}

/// `today` minus `months`, clamped to the last valid day of the target month.
pub fn cutoff_date(today: NaiveDate, months: u32) -> NaiveDate {
    today
        .checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN)
}
