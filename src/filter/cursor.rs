use chrono::{DateTime, Utc};

use super::error::FilterError;
use super::filter_where::{FilterWhere, Predicate};
use super::types::SqlParam;

/// Keyset pagination window over the posted timestamp.
///
/// `after` is the newest timestamp the client has already seen and `before`
/// the oldest. Rows strictly outside `[before, after]` are returned, so one
/// request both catches up on new deals and loads the next older page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub after: DateTime<Utc>,
    pub before: DateTime<Utc>,
}

impl Cursor {
    pub fn parse(before: Option<&str>, after: Option<&str>) -> Result<Option<Self>, FilterError> {
        let (before, after) = match (before, after) {
            (None, None) => return Ok(None),
            (Some(before), Some(after)) => (before, after),
            _ => return Err(FilterError::MissingCursorBound),
        };

        let before = parse_timestamp(before).ok_or(FilterError::InvalidBefore)?;
        let after = parse_timestamp(after).ok_or(FilterError::InvalidAfter)?;
        Self::new(after, before).map(Some)
    }

    pub fn new(after: DateTime<Utc>, before: DateTime<Utc>) -> Result<Self, FilterError> {
        if before > after {
            return Err(FilterError::BeforeLaterThanAfter);
        }
        Ok(Self { after, before })
    }

    /// Whether a row posted at `ts` falls outside the already-seen window.
    pub fn selects(&self, ts: DateTime<Utc>) -> bool {
        ts > self.after || ts < self.before
    }
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

/// `(col > after OR col < before)` on the given ordering column.
pub struct CursorPredicate<'a> {
    pub column: &'static str,
    pub cursor: &'a Cursor,
}

impl Predicate for CursorPredicate<'_> {
    fn apply(&self, builder: &mut FilterWhere) {
        let after = builder.param(SqlParam::Timestamp(self.cursor.after));
        let before = builder.param(SqlParam::Timestamp(self.cursor.before));
        builder.push(format!(
            "({col} > {after} OR {col} < {before})",
            col = self.column
        ));
    }
}
