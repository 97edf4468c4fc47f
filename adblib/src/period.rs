//! Период расчёта: включительный диапазон дат и его границы по умолчанию.

use crate::{
    error::{AdbError, Result},
    model::DailyBalanceSeries,
};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Инвариант: `start <= end`.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Period {
    start: NaiveDate,
    end: NaiveDate,
}

/// Явно заданные границы; каждая перекрывает только свою.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeriodOverride {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl PeriodOverride {
    pub fn validate(&self) -> Result<()> {
        match (self.start, self.end) {
            (Some(start), Some(end)) if start > end => Err(AdbError::InvalidPeriod { start, end }),
            _ => Ok(()),
        }
    }
}

impl Period {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(AdbError::InvalidPeriod { start, end });
        }
        Ok(Self { start, end })
    }

    /// Незаданные границы — целые месяцы, которые покрывает `series`.
    pub fn resolve(series: &DailyBalanceSeries, over: PeriodOverride) -> Result<Self> {
        let start = match over.start {
            Some(d) => d,
            None => month_start(series.first().ok_or(AdbError::EmptyInput)?.date),
        };
        let end = match over.end {
            Some(d) => d,
            None => month_end(series.last().ok_or(AdbError::EmptyInput)?.date),
        };
        Self::new(start, end)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn total_days(&self) -> usize {
        usize::try_from((self.end - self.start).num_days() + 1).unwrap_or(0)
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn month_end(date: NaiveDate) -> NaiveDate {
    if date.month() == 12 {
        return date.with_day(31).unwrap_or(date);
    }
    NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}
