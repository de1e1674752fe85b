use rrule::RRule;
use serde::{de::Visitor, Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// The body of an RFC-5545 `RRULE` expression, e.g. `FREQ=DAILY` or
/// `FREQ=WEEKLY;INTERVAL=2;BYDAY=MO,FR`.
///
/// The expression is kept verbatim so that rules round-trip through
/// storage unchanged. Validity is checked once, at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceRule(String);

#[derive(Error, Debug)]
pub enum InvalidRecurrenceRuleError {
    #[error("Recurrence rule: `{0}` is not a valid RRULE expression")]
    Malformed(String),
}

// The rrule parser needs a DTSTART to anchor expansion. Any fixed instant
// works for checking that the rule itself is well formed; the anchor is
// never stored.
const PARSE_ANCHOR: &str = "DTSTART:20200101T000000Z";

impl FromStr for RecurrenceRule {
    type Err = InvalidRecurrenceRuleError;

    fn from_str(rule: &str) -> Result<Self, Self::Err> {
        let rule = rule.trim();
        if rule.is_empty() || rule.contains('\n') {
            return Err(InvalidRecurrenceRuleError::Malformed(rule.to_string()));
        }
        format!("{}\nRRULE:{}", PARSE_ANCHOR, rule)
            .parse::<RRule>()
            .map(|_| Self(rule.to_string()))
            .map_err(|_| InvalidRecurrenceRuleError::Malformed(rule.to_string()))
    }
}

impl RecurrenceRule {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Render the rule as a short phrase for read-only UI, e.g.
    /// "every day" or "every 2 weeks on Monday and Friday".
    ///
    /// This is a total function: content it cannot phrase (unknown
    /// frequencies, ordinal weekdays, garbage read back from storage)
    /// degrades to a fixed fallback instead of failing the caller.
    pub fn humanize(&self) -> String {
        const FALLBACK: &str = "custom schedule";

        let mut freq = None;
        let mut interval: u32 = 1;
        let mut weekdays = Vec::new();

        for part in self.0.split(';') {
            let mut kv = part.splitn(2, '=');
            let (key, value) = match (kv.next(), kv.next()) {
                (Some(key), Some(value)) => (key, value),
                _ => continue,
            };
            match key.to_uppercase().as_str() {
                "FREQ" => freq = Some(value.to_uppercase()),
                "INTERVAL" => match value.parse::<u32>() {
                    Ok(i) if i >= 1 => interval = i,
                    _ => return FALLBACK.into(),
                },
                "BYDAY" => {
                    for day in value.split(',') {
                        match weekday_name(day) {
                            Some(name) => weekdays.push(name),
                            None => return FALLBACK.into(),
                        }
                    }
                }
                _ => {}
            }
        }

        let unit = match freq.as_deref() {
            Some("DAILY") => "day",
            Some("WEEKLY") => "week",
            Some("MONTHLY") => "month",
            Some("YEARLY") => "year",
            _ => return FALLBACK.into(),
        };

        let mut text = if interval == 1 {
            format!("every {}", unit)
        } else {
            format!("every {} {}s", interval, unit)
        };
        if !weekdays.is_empty() {
            text.push_str(" on ");
            text.push_str(&join_names(&weekdays));
        }
        text
    }
}

fn weekday_name(day: &str) -> Option<&'static str> {
    match day.to_uppercase().as_str() {
        "MO" => Some("Monday"),
        "TU" => Some("Tuesday"),
        "WE" => Some("Wednesday"),
        "TH" => Some("Thursday"),
        "FR" => Some("Friday"),
        "SA" => Some("Saturday"),
        "SU" => Some("Sunday"),
        _ => None,
    }
}

fn join_names(names: &[&str]) -> String {
    match names.len() {
        1 => names[0].to_string(),
        2 => format!("{} and {}", names[0], names[1]),
        n => format!("{} and {}", names[..n - 1].join(", "), names[n - 1]),
    }
}

impl Default for RecurrenceRule {
    fn default() -> Self {
        Self("FREQ=DAILY".into())
    }
}

impl Display for RecurrenceRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for RecurrenceRule {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RecurrenceRule {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct RecurrenceRuleVisitor;

        impl<'de> Visitor<'de> for RecurrenceRuleVisitor {
            type Value = RecurrenceRule;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("A valid RRULE expression")
            }

            fn visit_str<E>(self, value: &str) -> Result<RecurrenceRule, E>
            where
                E: serde::de::Error,
            {
                value
                    .parse::<RecurrenceRule>()
                    .map_err(|_| E::custom(format!("Malformed recurrence rule: {}", value)))
            }
        }

        deserializer.deserialize_str(RecurrenceRuleVisitor)
    }
}

/// Wall-clock time at which a schedule fires, in the schedule's timezone.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeOfDay {
    hours: u32,
    minutes: u32,
}

#[derive(Error, Debug)]
pub enum InvalidTimeOfDayError {
    #[error("Time of day: `{0}` is malformed, expected `HH:MM`")]
    Malformed(String),
}

impl TimeOfDay {
    pub fn new(hours: u32, minutes: u32) -> Result<Self, InvalidTimeOfDayError> {
        if hours > 23 || minutes > 59 {
            return Err(InvalidTimeOfDayError::Malformed(format!(
                "{}:{}",
                hours, minutes
            )));
        }
        Ok(Self { hours, minutes })
    }

    pub fn hours(&self) -> u32 {
        self.hours
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }
}

impl Default for TimeOfDay {
    fn default() -> Self {
        Self {
            hours: 0,
            minutes: 0,
        }
    }
}

impl FromStr for TimeOfDay {
    type Err = InvalidTimeOfDayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let e = || InvalidTimeOfDayError::Malformed(s.to_string());
        let parts = s.split(':').collect::<Vec<_>>();
        if parts.len() != 2 {
            return Err(e());
        }
        let hours = parts[0].parse::<u32>().map_err(|_| e())?;
        let minutes = parts[1].parse::<u32>().map_err(|_| e())?;
        TimeOfDay::new(hours, minutes).map_err(|_| e())
    }
}

impl Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hours, self.minutes)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct TimeOfDayVisitor;

        impl<'de> Visitor<'de> for TimeOfDayVisitor {
            type Value = TimeOfDay;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("A valid `HH:MM` time of day")
            }

            fn visit_str<E>(self, value: &str) -> Result<TimeOfDay, E>
            where
                E: serde::de::Error,
            {
                value
                    .parse::<TimeOfDay>()
                    .map_err(|_| E::custom(format!("Malformed time of day: {}", value)))
            }
        }

        deserializer.deserialize_str(TimeOfDayVisitor)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_valid_recurrence_rules() {
        let rules = vec![
            "FREQ=DAILY",
            "FREQ=DAILY;INTERVAL=2",
            "FREQ=WEEKLY;BYDAY=MO",
            "FREQ=WEEKLY;INTERVAL=2;BYDAY=MO,FR",
            "FREQ=MONTHLY;BYMONTHDAY=1",
            "FREQ=YEARLY",
        ];
        for rule in rules {
            let parsed = rule.parse::<RecurrenceRule>();
            assert!(parsed.is_ok(), "Expected `{}` to be valid", rule);
            // The stored expression is the input, verbatim
            assert_eq!(parsed.unwrap().as_str(), rule);
        }
    }

    #[test]
    fn rejects_malformed_recurrence_rules() {
        let rules = vec!["", "   ", "FREQ=WHENEVER", "FREQ=DAILY;INTERVAL=abc"];
        for rule in rules {
            assert!(
                rule.parse::<RecurrenceRule>().is_err(),
                "Expected `{}` to be rejected",
                rule
            );
        }
    }

    #[test]
    fn humanizes_common_rules() {
        let cases = vec![
            ("FREQ=DAILY", "every day"),
            ("FREQ=DAILY;INTERVAL=2", "every 2 days"),
            ("FREQ=WEEKLY;BYDAY=MO", "every week on Monday"),
            (
                "FREQ=WEEKLY;INTERVAL=2;BYDAY=MO,FR",
                "every 2 weeks on Monday and Friday",
            ),
            (
                "FREQ=WEEKLY;BYDAY=MO,WE,FR",
                "every week on Monday, Wednesday and Friday",
            ),
            ("FREQ=MONTHLY;BYMONTHDAY=1", "every month"),
            ("FREQ=YEARLY", "every year"),
        ];
        for (rule, expected) in cases {
            let rule = rule.parse::<RecurrenceRule>().unwrap();
            assert_eq!(rule.humanize(), expected);
        }
    }

    #[test]
    fn humanize_falls_back_on_unphrasable_rules() {
        // Valid RRULE content that the renderer does not try to phrase
        let rule = "FREQ=HOURLY".parse::<RecurrenceRule>().unwrap();
        assert_eq!(rule.humanize(), "custom schedule");
    }

    #[test]
    fn parses_valid_time_of_day() {
        assert_eq!(
            "09:00".parse::<TimeOfDay>().unwrap(),
            TimeOfDay::new(9, 0).unwrap()
        );
        assert_eq!(
            "23:59".parse::<TimeOfDay>().unwrap(),
            TimeOfDay::new(23, 59).unwrap()
        );
        assert_eq!("09:00".parse::<TimeOfDay>().unwrap().to_string(), "09:00");
    }

    #[test]
    fn rejects_malformed_time_of_day() {
        assert!("".parse::<TimeOfDay>().is_err());
        assert!("9".parse::<TimeOfDay>().is_err());
        assert!("24:00".parse::<TimeOfDay>().is_err());
        assert!("12:60".parse::<TimeOfDay>().is_err());
        assert!("12:00:00".parse::<TimeOfDay>().is_err());
        assert!("noon".parse::<TimeOfDay>().is_err());
    }
}
