use thiserror::Error;

/// An inclusive window between two absolute instants in unix millis.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSpan {
    start_ts: i64,
    end_ts: i64,
}

#[derive(Error, Debug)]
pub enum InvalidTimeSpanError {
    #[error("The provided start: {0} is after the provided end: {1}")]
    StartAfterEnd(i64, i64),
}

impl TimeSpan {
    pub fn new(start_ts: i64, end_ts: i64) -> Result<Self, InvalidTimeSpanError> {
        if start_ts > end_ts {
            return Err(InvalidTimeSpanError::StartAfterEnd(start_ts, end_ts));
        }
        Ok(Self { start_ts, end_ts })
    }

    pub fn start(&self) -> i64 {
        self.start_ts
    }

    pub fn end(&self) -> i64 {
        self.end_ts
    }

    pub fn duration(&self) -> i64 {
        self.end_ts - self.start_ts
    }

    pub fn contains(&self, ts: i64) -> bool {
        self.start_ts <= ts && ts <= self.end_ts
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rejects_inverted_span() {
        assert!(TimeSpan::new(10, 5).is_err());
    }

    #[test]
    fn contains_is_inclusive() {
        let span = TimeSpan::new(5, 10).unwrap();
        assert!(span.contains(5));
        assert!(span.contains(10));
        assert!(!span.contains(4));
        assert!(!span.contains(11));
    }
}
