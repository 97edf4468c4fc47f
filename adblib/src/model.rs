//! Доменные модели: сырые пары из выгрузок, дневные остатки и итог расчёта.

use crate::period::Period;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Откуда пришла строка: имя источника и номер строки (с 1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    pub source: String,
    pub line: u64,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.source, self.line)
    }
}

/// Неразобранная пара (дата, остаток) в том виде, как её отдал ридер.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub date: String,
    pub balance: String,
    pub origin: Origin,
}

impl RawRecord {
    pub fn new(date: impl Into<String>, balance: impl Into<String>, origin: Origin) -> Self {
        Self {
            date: date.into(),
            balance: balance.into(),
            origin,
        }
    }
}

/// Остаток на конец дня.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BalanceRecord {
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::str")]
    pub balance: Decimal,
}

/// Одна запись на каждую встреченную дату, даты строго возрастают.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct DailyBalanceSeries(Vec<BalanceRecord>);

impl DailyBalanceSeries {
    /// Даты должны строго возрастать, это обеспечивает вызывающий.
    pub(crate) fn from_sorted(records: Vec<BalanceRecord>) -> Self {
        debug_assert!(records.windows(2).all(|w| w[0].date < w[1].date));
        Self(records)
    }

    pub fn records(&self) -> &[BalanceRecord] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&BalanceRecord> {
        self.0.first()
    }

    pub fn last(&self) -> Option<&BalanceRecord> {
        self.0.last()
    }

    pub fn get(&self, date: NaiveDate) -> Option<&BalanceRecord> {
        self.0
            .binary_search_by_key(&date, |r| r.date)
            .ok()
            .map(|i| &self.0[i])
    }
}

/// Чем заполнять дни без записей.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum FillPolicy {
    /// Последний известный остаток; до первой записи в периоде — 0.
    #[default]
    #[serde(rename = "forward")]
    ForwardFill,
    /// Всегда 0.
    #[serde(rename = "zero")]
    ZeroFill,
}

/// День периода с итоговым остатком. `observed` — была ли запись за этот день.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct DailyBalance {
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::str")]
    pub balance: Decimal,
    pub observed: bool,
}

/// Каждый календарный день периода, по порядку.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct CompleteBalanceSeries(Vec<DailyBalance>);

impl CompleteBalanceSeries {
    pub(crate) fn new(days: Vec<DailyBalance>) -> Self {
        Self(days)
    }

    pub fn days(&self) -> &[DailyBalance] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, date: NaiveDate) -> Option<&DailyBalance> {
        self.0
            .binary_search_by_key(&date, |d| d.date)
            .ok()
            .map(|i| &self.0[i])
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AggregateResult {
    pub period: Period,
    pub fill_policy: FillPolicy,
    pub actual_days_with_data: usize,
    pub total_days_in_period: usize,
    pub first_transaction_date: NaiveDate,
    pub last_transaction_date: NaiveDate,
    #[serde(with = "rust_decimal::serde::str")]
    pub starting_balance: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub ending_balance: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_balance_sum: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub average_daily_balance: Decimal,
    pub daily_balances: DailyBalanceSeries,
    pub complete_balances: CompleteBalanceSeries,
}
