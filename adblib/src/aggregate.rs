//! Расчёт среднего дневного остатка.
//!
//! Чистые функции: на вход сырые пары, на выход [`AggregateResult`].
//! Ничего не пишут и не логируют, все ошибки возвращаются вызывающему.

use crate::{
    error::{AdbError, Result},
    model::{
        AggregateResult, BalanceRecord, CompleteBalanceSeries, DailyBalance, DailyBalanceSeries,
        FillPolicy, RawRecord,
    },
    period::{Period, PeriodOverride},
};
use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

// знак, целая часть (запятые только группами по три), дробь, экспонента
const BALANCE_PATTERN: &str =
    r"^[+-]?(?:(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.(?P<frac>\d+))?|\.(?P<lead_frac>\d+))(?:[eE][+-]?\d+)?$";

/// Один источник или несколько, уже склеенных по порядку.
pub fn compute_average_daily_balance(
    raw: &[RawRecord],
    over: PeriodOverride,
    policy: FillPolicy,
) -> Result<AggregateResult> {
    over.validate()?;

    let series = collapse_daily(parse_records(raw)?);
    if series.is_empty() {
        return Err(AdbError::EmptyInput);
    }
    let period = Period::resolve(&series, over)?;
    let complete = fill_period(&series, &period, policy);
    summarize(series, period, complete, policy)
}

/// Источники склеиваются в заданном порядке. Между источниками дубликаты
/// не ищутся, остаётся только схлопывание по датам.
pub fn compute_from_sources<I>(
    sources: I,
    over: PeriodOverride,
    policy: FillPolicy,
) -> Result<AggregateResult>
where
    I: IntoIterator<Item = Vec<RawRecord>>,
{
    let raw: Vec<RawRecord> = sources.into_iter().flatten().collect();
    compute_average_daily_balance(&raw, over, policy)
}

/// Первая же битая строка прерывает разбор целиком.
pub fn parse_records(raw: &[RawRecord]) -> Result<Vec<BalanceRecord>> {
    let balances = BalanceParser::new()?;
    raw.iter()
        .map(|r| {
            let date = parse_date(&r.date).ok_or_else(|| {
                AdbError::parse(&r.origin, format!("invalid date {:?}", r.date))
            })?;
            let balance = balances.parse(&r.balance).map_err(|e| {
                AdbError::parse(&r.origin, format!("invalid balance {:?}: {e}", r.balance))
            })?;
            Ok(BalanceRecord { date, balance })
        })
        .collect()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Разбор суммы остатка. Форма проверяется целиком до конвертации в `Decimal`.
pub struct BalanceParser {
    shape: Regex,
}

impl BalanceParser {
    pub fn new() -> Result<Self> {
        Ok(Self { shape: Regex::new(BALANCE_PATTERN)? })
    }

    pub fn parse(&self, s: &str) -> std::result::Result<Decimal, String> {
        let s = s.trim();
        let caps = self
            .shape
            .captures(s)
            .ok_or_else(|| "not a decimal amount".to_string())?;
        let frac_digits = caps
            .name("frac")
            .or_else(|| caps.name("lead_frac"))
            .map_or(0, |m| m.as_str().len());

        let cleaned: String = s.chars().filter(|c| *c != ',').collect();
        let cleaned = cleaned.strip_prefix('+').unwrap_or(&cleaned);
        if cleaned.contains(['e', 'E']) {
            return Decimal::from_scientific(cleaned).map_err(|e| e.to_string());
        }

        let value = Decimal::from_str(cleaned).map_err(|e| e.to_string())?;
        // from_str молча округляет лишние знаки дроби
        if frac_digits > value.scale() as usize {
            return Err(format!(
                "more than {} fractional digits cannot be represented exactly",
                value.scale()
            ));
        }
        Ok(value)
    }
}

/// Устойчивая сортировка по дате, из записей одного дня остаётся последняя.
pub fn collapse_daily(mut records: Vec<BalanceRecord>) -> DailyBalanceSeries {
    records.sort_by_key(|r| r.date);

    let mut out: Vec<BalanceRecord> = Vec::with_capacity(records.len());
    for rec in records {
        match out.last_mut() {
            Some(last) if last.date == rec.date => *last = rec,
            _ => out.push(rec),
        }
    }
    DailyBalanceSeries::from_sorted(out)
}

pub fn fill_period(
    series: &DailyBalanceSeries,
    period: &Period,
    policy: FillPolicy,
) -> CompleteBalanceSeries {
    // записи до начала периода в перенос не попадают
    let mut pending = series
        .records()
        .iter()
        .skip_while(|r| r.date < period.start())
        .peekable();
    let mut carry = Decimal::ZERO;
    let mut days = Vec::with_capacity(period.total_days());

    for date in period.days() {
        let hit = pending.next_if(|r| r.date == date);
        let day = match (hit, policy) {
            (Some(rec), _) => {
                carry = rec.balance;
                DailyBalance { date, balance: rec.balance, observed: true }
            }
            (None, FillPolicy::ForwardFill) => DailyBalance { date, balance: carry, observed: false },
            (None, FillPolicy::ZeroFill) => {
                DailyBalance { date, balance: Decimal::ZERO, observed: false }
            }
        };
        days.push(day);
    }
    CompleteBalanceSeries::new(days)
}

fn summarize(
    series: DailyBalanceSeries,
    period: Period,
    complete: CompleteBalanceSeries,
    policy: FillPolicy,
) -> Result<AggregateResult> {
    let (first, last) = match (series.first(), series.last()) {
        (Some(f), Some(l)) => (*f, *l),
        _ => return Err(AdbError::EmptyInput),
    };

    let total_days = complete.len();
    if total_days == 0 {
        return Err(AdbError::DivisionByZero);
    }
    let total = complete
        .days()
        .iter()
        .try_fold(Decimal::ZERO, |acc, d| acc.checked_add(d.balance))
        .ok_or(AdbError::Overflow)?;
    let average = total
        .checked_div(Decimal::from(total_days))
        .ok_or(AdbError::DivisionByZero)?;

    Ok(AggregateResult {
        period,
        fill_policy: policy,
        actual_days_with_data: series.len(),
        total_days_in_period: total_days,
        first_transaction_date: first.date,
        last_transaction_date: last.date,
        starting_balance: first.balance,
        ending_balance: last.balance,
        total_balance_sum: total,
        average_daily_balance: average,
        daily_balances: series,
        complete_balances: complete,
    })
}
