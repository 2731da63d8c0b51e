use crate::domain::failure::TimeBucket;
use crate::retry::error::RetryError;

pub fn classify(days_overdue: i64) -> Result<TimeBucket, RetryError> {
    match days_overdue {
        d if d < 0 => Err(RetryError::InvalidDaysOverdue(d)),
        0..=30 => Ok(TimeBucket::UpTo30Days),
        31..=60 => Ok(TimeBucket::UpTo60Days),
        61..=180 => Ok(TimeBucket::UpTo180Days),
        _ => Ok(TimeBucket::Over180Days),
    }
}
