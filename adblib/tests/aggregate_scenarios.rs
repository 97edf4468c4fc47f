use adblib::{
    compute_average_daily_balance, compute_from_sources,
    formats::csv::Csv,
    model::{FillPolicy, Origin, RawRecord},
    traits::ReadRecords,
    AdbError, PeriodOverride,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::io::Cursor;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn read(csv: &str) -> Vec<RawRecord> {
    Csv::read(Cursor::new(csv), "inline").expect("read csv")
}

#[test]
fn example_statement_forward_fill() {
    let raw = read("2024-01-01,1000\n2024-01-01,1200\n2024-01-05,800\n");
    let res = compute_average_daily_balance(&raw, PeriodOverride::default(), FillPolicy::ForwardFill)
        .expect("compute");

    assert_eq!(res.period.start(), d(2024, 1, 1));
    assert_eq!(res.period.end(), d(2024, 1, 31));
    assert_eq!(res.total_days_in_period, 31);
    assert_eq!(res.actual_days_with_data, 2);
    assert_eq!(res.first_transaction_date, d(2024, 1, 1));
    assert_eq!(res.last_transaction_date, d(2024, 1, 5));
    assert_eq!(res.starting_balance, dec!(1200));
    assert_eq!(res.ending_balance, dec!(800));
    assert_eq!(res.total_balance_sum, dec!(26400));
    assert_eq!(res.average_daily_balance, dec!(26400) / dec!(31));
    assert_eq!(res.average_daily_balance.round_dp(2), dec!(851.61));

    let c = &res.complete_balances;
    assert_eq!(c.get(d(2024, 1, 4)).unwrap().balance, dec!(1200));
    assert_eq!(c.get(d(2024, 1, 5)).unwrap().balance, dec!(800));
    assert_eq!(c.get(d(2024, 1, 31)).unwrap().balance, dec!(800));
}

#[test]
fn example_statement_zero_fill() {
    let raw = read("2024-01-01,1000\n2024-01-01,1200\n2024-01-05,800\n");
    let res = compute_average_daily_balance(&raw, PeriodOverride::default(), FillPolicy::ZeroFill)
        .expect("compute");
    assert_eq!(res.total_balance_sum, dec!(2000));
    assert_eq!(res.average_daily_balance, dec!(2000) / dec!(31));
    assert!(res
        .complete_balances
        .days()
        .iter()
        .filter(|x| !x.observed)
        .all(|x| x.balance.is_zero()));
}

#[test]
fn default_period_spans_whole_month() {
    let raw = read("2024-03-20,10\n2024-03-05,20\n");
    let res = compute_average_daily_balance(&raw, PeriodOverride::default(), FillPolicy::ForwardFill)
        .unwrap();
    assert_eq!(res.period.start(), d(2024, 3, 1));
    assert_eq!(res.period.end(), d(2024, 3, 31));
    assert_eq!(res.total_days_in_period, 31);
}

#[test]
fn december_end_rolls_without_error() {
    let raw = read("2024-12-10,500\n");
    let res = compute_average_daily_balance(&raw, PeriodOverride::default(), FillPolicy::ForwardFill)
        .unwrap();
    assert_eq!(res.period.end(), d(2024, 12, 31));
    assert_eq!(res.total_days_in_period, 31);
}

#[test]
fn period_across_months_counts_every_day() {
    let raw = read("2024-01-15,100\n2024-03-02,300\n");
    let res = compute_average_daily_balance(&raw, PeriodOverride::default(), FillPolicy::ForwardFill)
        .unwrap();
    let expected = (res.period.end() - res.period.start()).num_days() as usize + 1;
    assert_eq!(res.total_days_in_period, expected);
    assert_eq!(res.total_days_in_period, 31 + 29 + 31);
    assert_eq!(res.complete_balances.len(), res.total_days_in_period);
}

#[test]
fn single_bound_override_keeps_other_default() {
    let raw = read("2024-01-10,100\n2024-01-20,200\n");
    let over = PeriodOverride { start: Some(d(2024, 1, 10)), end: None };
    let res = compute_average_daily_balance(&raw, over, FillPolicy::ForwardFill).unwrap();
    assert_eq!(res.period.start(), d(2024, 1, 10));
    assert_eq!(res.period.end(), d(2024, 1, 31));
    // 10 дней по 100, 12 дней по 200
    assert_eq!(res.total_balance_sum, dec!(3400));
    assert_eq!(res.total_days_in_period, 22);
}

#[test]
fn fully_covered_period_averages_exactly() {
    let raw = read("2024-02-01,10.10\n2024-02-02,20.20\n2024-02-03,30.31\n");
    let over = PeriodOverride { start: Some(d(2024, 2, 1)), end: Some(d(2024, 2, 3)) };
    for policy in [FillPolicy::ForwardFill, FillPolicy::ZeroFill] {
        let res = compute_average_daily_balance(&raw, over, policy).unwrap();
        assert_eq!(res.total_balance_sum, dec!(60.61));
        assert_eq!(res.average_daily_balance, dec!(60.61) / dec!(3));
    }
}

#[test]
fn decimal_sum_has_no_cent_drift() {
    let rows: String = (1..=30).map(|day| format!("2024-06-{day:02},0.10\n")).collect();
    let res = compute_average_daily_balance(&read(&rows), PeriodOverride::default(), FillPolicy::ZeroFill)
        .unwrap();
    assert_eq!(res.total_balance_sum, dec!(3.00));
    assert_eq!(res.average_daily_balance, dec!(0.10));
}

#[test]
fn actual_days_counts_distinct_dates() {
    let raw = read("2024-05-03,1\n2024-05-01,2\n2024-05-03,3\n2024-05-01,4\n2024-05-09,5\n");
    let res = compute_average_daily_balance(&raw, PeriodOverride::default(), FillPolicy::ForwardFill)
        .unwrap();
    assert_eq!(res.actual_days_with_data, 3);
    let dates: Vec<NaiveDate> = res.daily_balances.records().iter().map(|r| r.date).collect();
    assert_eq!(dates, vec![d(2024, 5, 1), d(2024, 5, 3), d(2024, 5, 9)]);
    // последняя по входу запись дня побеждает
    assert_eq!(res.daily_balances.get(d(2024, 5, 1)).unwrap().balance, dec!(4));
    assert_eq!(res.daily_balances.get(d(2024, 5, 3)).unwrap().balance, dec!(3));
}

#[test]
fn complete_series_feeds_back_to_same_average() {
    let raw = read("2024-04-03,150.55\n2024-04-17,-20\n2024-04-28,999.99\n");
    let first = compute_average_daily_balance(&raw, PeriodOverride::default(), FillPolicy::ForwardFill)
        .unwrap();

    let replay: Vec<RawRecord> = first
        .complete_balances
        .days()
        .iter()
        .enumerate()
        .map(|(i, day)| {
            RawRecord::new(
                day.date.format("%Y-%m-%d").to_string(),
                day.balance.to_string(),
                Origin { source: "replay".into(), line: i as u64 + 1 },
            )
        })
        .collect();
    let over = PeriodOverride {
        start: Some(first.period.start()),
        end: Some(first.period.end()),
    };
    let second = compute_average_daily_balance(&replay, over, FillPolicy::ZeroFill).unwrap();

    assert_eq!(second.average_daily_balance, first.average_daily_balance);
    assert_eq!(second.total_balance_sum, first.total_balance_sum);
    assert!(second.complete_balances.days().iter().all(|x| x.observed));
}

#[test]
fn negative_balances_are_summed_as_is() {
    let raw = read("2024-02-01,-100\n");
    let over = PeriodOverride { start: None, end: Some(d(2024, 2, 4)) };
    let res = compute_average_daily_balance(&raw, over, FillPolicy::ForwardFill).unwrap();
    assert_eq!(res.total_balance_sum, dec!(-400));
    assert_eq!(res.average_daily_balance, dec!(-100));
}

#[test]
fn overlapping_sources_match_single_combined_source() {
    let a = read("2024-07-01,100\n2024-07-10,300\n");
    let b = read("2024-07-10,350\n2024-07-05,200\n2024-07-20,50\n");
    let combined = read(
        "2024-07-01,100\n2024-07-10,300\n2024-07-10,350\n2024-07-05,200\n2024-07-20,50\n",
    );

    let multi = compute_from_sources(vec![a, b], PeriodOverride::default(), FillPolicy::ForwardFill)
        .unwrap();
    let single =
        compute_average_daily_balance(&combined, PeriodOverride::default(), FillPolicy::ForwardFill)
            .unwrap();

    assert_eq!(multi.daily_balances, single.daily_balances);
    assert_eq!(multi.average_daily_balance, single.average_daily_balance);
    assert_eq!(multi.daily_balances.get(d(2024, 7, 10)).unwrap().balance, dec!(350));
}

#[test]
fn source_order_decides_same_day_winner() {
    let a = read("2024-07-10,1\n");
    let b = read("2024-07-10,2\n");
    let res = compute_from_sources(vec![b, a], PeriodOverride::default(), FillPolicy::ZeroFill)
        .unwrap();
    assert_eq!(res.ending_balance, dec!(1));
}

#[test]
fn malformed_row_aborts_whole_input() {
    let raw = read("2024-01-01,100\n2024-13-01,100\n");
    let err = compute_average_daily_balance(&raw, PeriodOverride::default(), FillPolicy::ForwardFill)
        .unwrap_err();
    assert!(matches!(err, AdbError::Parse { .. }));
}

#[test]
fn empty_file_is_empty_input() {
    let raw = read("\n\n");
    let err = compute_average_daily_balance(&raw, PeriodOverride::default(), FillPolicy::ForwardFill)
        .unwrap_err();
    assert!(matches!(err, AdbError::EmptyInput));
}

#[test]
fn records_outside_period_still_count_as_transactions() {
    let raw = read("2024-01-05,100\n2024-02-10,200\n");
    let over = PeriodOverride { start: Some(d(2024, 1, 1)), end: Some(d(2024, 1, 31)) };
    let res = compute_average_daily_balance(&raw, over, FillPolicy::ForwardFill).unwrap();
    assert_eq!(res.actual_days_with_data, 2);
    assert_eq!(res.last_transaction_date, d(2024, 2, 10));
    assert_eq!(res.total_balance_sum, Decimal::from(27 * 100));
}
