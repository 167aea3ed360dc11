use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(pub i64);

impl ContactId {
    pub fn as_i64(&self) -> i64 {
        self.0
    }

    /// Time-derived id that is not in `existing`.
    ///
    /// Normally strictly greater than every existing id, so two adds within
    /// the same millisecond still get distinct ids and a clock that moves
    /// backwards never yields an id already in use. When the newest id is
    /// `i64::MAX` the first free id from `now_millis` onwards is used.
    pub fn next<I>(existing: I, now_millis: i64) -> Self
    where
        I: IntoIterator<Item = ContactId>,
    {
        let taken: BTreeSet<i64> = existing.into_iter().map(|id| id.0).collect();
        let id = match taken.last() {
            None => now_millis,
            Some(newest) => match newest.checked_add(1) {
                Some(floor) => now_millis.max(floor),
                None => first_free(&taken, now_millis),
            },
        };
        Self(id)
    }
}

fn first_free(taken: &BTreeSet<i64>, from: i64) -> i64 {
    (from..=i64::MAX)
        .chain(i64::MIN..from)
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or(from)
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ContactId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::ContactId;

    #[test]
    fn next_uses_clock_when_ahead() {
        let existing = [ContactId(10), ContactId(20)];
        assert_eq!(ContactId::next(existing, 1_700_000_000_000).0, 1_700_000_000_000);
    }

    #[test]
    fn next_stays_unique_within_same_millisecond() {
        let now = 1_700_000_000_000;
        let first = ContactId::next([], now);
        let second = ContactId::next([first], now);
        assert_eq!(first.0, now);
        assert_eq!(second.0, now + 1);
    }

    #[test]
    fn next_ignores_clock_going_backwards() {
        let existing = [ContactId(1_700_000_000_500)];
        let id = ContactId::next(existing, 1_700_000_000_000);
        assert_eq!(id.0, 1_700_000_000_501);
    }

    #[test]
    fn next_never_reuses_max_id() {
        let now = 1_700_000_000_000;
        let id = ContactId::next([ContactId(i64::MAX)], now);
        assert_eq!(id.0, now);

        let id = ContactId::next([ContactId(i64::MAX), ContactId(now)], now);
        assert_eq!(id.0, now + 1);

        let id = ContactId::next([ContactId(i64::MAX - 1), ContactId(i64::MAX)], i64::MAX - 1);
        assert_eq!(id.0, i64::MIN);
    }

    #[test]
    fn parses_trimmed_integers() {
        let id: ContactId = " 42 ".parse().expect("parse id");
        assert_eq!(id, ContactId(42));
        assert!("abc".parse::<ContactId>().is_err());
    }
}
