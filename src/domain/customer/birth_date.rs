use chrono::{Days, Local, NaiveDate};

use super::errors::{CustomerError, MALFORMED_DATE};

const DATE_LENGTH: usize = 10;

/// `DD/MM/YYYY` with day 00-31 and month 00-12, as accepted at the boundary.
pub fn matches_date_pattern(raw: &str) -> bool {
    let b = raw.as_bytes();
    if b.len() != DATE_LENGTH || b[2] != b'/' || b[5] != b'/' {
        return false;
    }

    let day = matches!((b[0], b[1]), (b'0'..=b'2', b'0'..=b'9') | (b'3', b'0' | b'1'));
    let month = matches!((b[3], b[4]), (b'0', b'0'..=b'9') | (b'1', b'0'..=b'2'));

    day && month && b[6..].iter().all(u8::is_ascii_digit)
}

/// Validate a birth date against the local calendar day.
pub fn validate_birth_date(raw: &str) -> Result<Option<NaiveDate>, CustomerError> {
    validate_birth_date_on(raw, Local::now().date_naive())
}

/// Validate a birth date against an explicit `today`. Today itself is accepted.
///
/// Returns the calendar day the text resolves to, or `None` when it cannot be
/// represented. An unrepresentable date never counts as later than today.
pub fn validate_birth_date_on(raw: &str, today: NaiveDate) -> Result<Option<NaiveDate>, CustomerError> {
    let raw = raw.trim();
    if !matches_date_pattern(raw) {
        return Err(CustomerError::MalformedInput(MALFORMED_DATE));
    }

    let birth_date = resolve_date(raw);
    if birth_date.is_some_and(|date| date > today) {
        return Err(CustomerError::OutOfRange);
    }

    Ok(birth_date)
}

/// Resolve `DD/MM/YYYY` with overflow carried forward: day 00 is the last day
/// of the previous month, month 00 is December of the previous year, and days
/// past the end of a month roll into the next one (`31/02/1990` is 3 March).
fn resolve_date(raw: &str) -> Option<NaiveDate> {
    let mut parts = raw.split('/').map(str::parse::<u32>);
    let day = parts.next()?.ok()?;
    let month = parts.next()?.ok()?;
    let year = i32::try_from(parts.next()?.ok()?).ok()?;

    let (year, month) = match month {
        0 => (year - 1, 12),
        m => (year, m),
    };
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;

    match day {
        0 => first.pred_opt(),
        d => first.checked_add_days(Days::new(u64::from(d - 1))),
    }
}
