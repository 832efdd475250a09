//! Domain labels shared by meetings, members and attendance records.
//!
//! The database stores these as their text labels (`"5A"`, `"FALTA_JUST"`, ...)
//! so that rows written by older clients with unexpected values can still be
//! read. Entity models expose typed accessors that return `None` for such
//! values, and the frequency engine skips them per counter.

use crate::errors::Error;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Generates `as_str`, `from_label`, `ALL`, `Display` and `FromStr` for a label enum.
///
/// `from_label` is the exact match used for stored values. `FromStr` trims
/// surrounding whitespace first and is meant for operator input.
macro_rules! label_enum {
    ($name:ident, $field:literal, { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl $name {
            /// Every variant, in display order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The stored text label.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }

            /// The variant whose label is exactly `label`, without trimming.
            #[must_use]
            pub fn from_label(label: &str) -> Option<Self> {
                match label {
                    $($label => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                Self::from_label(trimmed).ok_or_else(|| Error::InvalidLabel {
                    field: $field,
                    value: trimmed.to_string(),
                })
            }
        }
    };
}

/// The kind of a meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeetingKind {
    /// Regular meeting
    #[serde(rename = "NORMAL")]
    Normal,
    /// Mandatory meeting
    #[serde(rename = "OBRIGACAO")]
    Obrigacao,
    /// Development meeting
    #[serde(rename = "DESENVOLVIMENTO")]
    Desenvolvimento,
}

label_enum!(MeetingKind, "meeting kind", {
    Normal => "NORMAL",
    Obrigacao => "OBRIGACAO",
    Desenvolvimento => "DESENVOLVIMENTO",
});

/// The weekday slot a meeting belongs to.
///
/// Stored independently of the meeting date and authoritative for aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    /// Thursday
    #[serde(rename = "5A")]
    Quinta,
    /// Saturday
    #[serde(rename = "SAB")]
    Sabado,
    /// Sunday
    #[serde(rename = "DOM")]
    Domingo,
}

label_enum!(Weekday, "weekday", {
    Quinta => "5A",
    Sabado => "SAB",
    Domingo => "DOM",
});

impl Weekday {
    /// Maps a calendar weekday to its meeting slot, if meetings happen on it.
    #[must_use]
    pub const fn from_chrono(day: chrono::Weekday) -> Option<Self> {
        match day {
            chrono::Weekday::Thu => Some(Self::Quinta),
            chrono::Weekday::Sat => Some(Self::Sabado),
            chrono::Weekday::Sun => Some(Self::Domingo),
            _ => None,
        }
    }
}

/// How a member's weekday frequency is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EvaluationRule {
    /// One combined Thursday + Saturday ratio
    #[serde(rename = "AMBAS")]
    Ambas,
    /// Separate ratios, evaluated on Thursdays
    #[serde(rename = "5A")]
    Quinta,
    /// Separate ratios, evaluated on Saturdays
    #[serde(rename = "SAB")]
    Sabado,
}

label_enum!(EvaluationRule, "evaluation rule", {
    Ambas => "AMBAS",
    Quinta => "5A",
    Sabado => "SAB",
});

/// Recorded outcome for one member at one meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    /// Present
    #[serde(rename = "OK")]
    Ok,
    /// Unexcused absence
    #[serde(rename = "FALTA_SEM")]
    FaltaSem,
    /// Excused absence
    #[serde(rename = "FALTA_JUST")]
    FaltaJust,
}

label_enum!(AttendanceStatus, "attendance status", {
    Ok => "OK",
    FaltaSem => "FALTA_SEM",
    FaltaJust => "FALTA_JUST",
});

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_labels_parse() {
        assert_eq!("NORMAL".parse::<MeetingKind>().unwrap(), MeetingKind::Normal);
        assert_eq!("5A".parse::<Weekday>().unwrap(), Weekday::Quinta);
        assert_eq!("AMBAS".parse::<EvaluationRule>().unwrap(), EvaluationRule::Ambas);
        assert_eq!(
            "FALTA_JUST".parse::<AttendanceStatus>().unwrap(),
            AttendanceStatus::FaltaJust
        );
    }

    #[test]
    fn test_operator_input_is_trimmed() {
        assert_eq!(" DOM ".parse::<Weekday>().unwrap(), Weekday::Domingo);
        assert_eq!("OK\n".parse::<AttendanceStatus>().unwrap(), AttendanceStatus::Ok);
    }

    #[test]
    fn test_from_label_is_exact() {
        assert_eq!(Weekday::from_label("DOM"), Some(Weekday::Domingo));
        assert_eq!(Weekday::from_label(" DOM "), None);
        assert_eq!(AttendanceStatus::from_label(" OK "), None);
        assert_eq!(MeetingKind::from_label("NORMAL "), None);
        assert_eq!(EvaluationRule::from_label(" AMBAS"), None);
        assert_eq!(EvaluationRule::from_label("ambas"), None);
    }

    #[test]
    fn test_unknown_label_is_rejected() {
        let err = "INVALID_VALUE".parse::<AttendanceStatus>().unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidLabel { field: "attendance status", ref value } if value == "INVALID_VALUE"
        ));

        // Labels are case-sensitive
        assert!("normal".parse::<MeetingKind>().is_err());
    }

    #[test]
    fn test_display_matches_stored_label() {
        for kind in MeetingKind::ALL {
            assert_eq!(kind.to_string().parse::<MeetingKind>().unwrap(), *kind);
        }
        assert_eq!(Weekday::Sabado.to_string(), "SAB");
        assert_eq!(EvaluationRule::Quinta.as_str(), "5A");
    }

    #[test]
    fn test_weekday_from_chrono() {
        use chrono::Datelike;

        // 2024-01-04 is a Thursday
        let thursday = NaiveDate::from_ymd_opt(2024, 1, 4).unwrap();
        assert_eq!(Weekday::from_chrono(thursday.weekday()), Some(Weekday::Quinta));
        assert_eq!(
            Weekday::from_chrono(chrono::Weekday::Sat),
            Some(Weekday::Sabado)
        );
        assert_eq!(
            Weekday::from_chrono(chrono::Weekday::Sun),
            Some(Weekday::Domingo)
        );
        assert_eq!(Weekday::from_chrono(chrono::Weekday::Mon), None);
    }
}
