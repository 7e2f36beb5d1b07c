// src/domain/month_year.rs

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// `MM-YYYY` 形式（月は 01〜12 のゼロ埋め、年は 4 桁）
static MONTH_YEAR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(0[1-9]|1[0-2])-(\d{4})$").expect("Invalid month-year regex"));

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid month-year '{0}', expected MM-YYYY")]
pub struct ParseMonthYearError(pub String);

/// 暦上の月（日は常に 1 日）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthYear(NaiveDate);

impl MonthYear {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    /// 月初日の日付を取得
    pub fn first_day(self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }
}

impl FromStr for MonthYear {
    type Err = ParseMonthYearError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let captures = MONTH_YEAR_REGEX
            .captures(s)
            .ok_or_else(|| ParseMonthYearError(s.to_string()))?;

        let month = captures[1]
            .parse::<u32>()
            .map_err(|_| ParseMonthYearError(s.to_string()))?;
        let year = captures[2]
            .parse::<i32>()
            .map_err(|_| ParseMonthYearError(s.to_string()))?;

        Self::new(year, month).ok_or_else(|| ParseMonthYearError(s.to_string()))
    }
}

impl From<MonthYear> for NaiveDate {
    fn from(value: MonthYear) -> Self {
        value.0
    }
}

// DB から読み出した日付は月初に丸める
impl From<NaiveDate> for MonthYear {
    fn from(date: NaiveDate) -> Self {
        Self(date.with_day(1).unwrap_or(date))
    }
}

impl fmt::Display for MonthYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:04}", self.month(), self.year())
    }
}

impl Serialize for MonthYear {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthYear {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
