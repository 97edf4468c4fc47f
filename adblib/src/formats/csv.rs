//! CSV без заголовка, две колонки: `date,balance`.
//! Запись дневного ряда: `date,balance,observed`.

use crate::{
    error::{AdbError, Result},
    model::{CompleteBalanceSeries, Origin, RawRecord},
};
use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use std::io::{BufRead, Write};

pub struct Csv;

impl crate::traits::ReadRecords for Csv {
    fn read<R: BufRead>(r: R, source: &str) -> Result<Vec<RawRecord>> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(r);

        let mut out = Vec::new();
        let mut rec = StringRecord::new();
        while rdr.read_record(&mut rec)? {
            let origin = Origin {
                source: source.to_string(),
                line: rec.position().map_or(out.len() as u64 + 1, |p| p.line()),
            };

            // строка из одних пробелов
            if rec.len() == 1 && rec[0].is_empty() {
                continue;
            }
            if rec.len() != 2 {
                return Err(AdbError::parse(
                    origin,
                    format!("expected 2 fields (date,balance), found {}", rec.len()),
                ));
            }
            out.push(RawRecord::new(&rec[0], &rec[1], origin));
        }
        Ok(out)
    }
}

impl crate::traits::WriteSeries for Csv {
    fn write<W: Write>(mut w: W, series: &CompleteBalanceSeries) -> Result<()> {
        let mut wrt = WriterBuilder::new().has_headers(false).from_writer(&mut w);

        for day in series.days() {
            wrt.write_record([
                day.date.format("%Y-%m-%d").to_string(),
                day.balance.to_string(),
                day.observed.to_string(),
            ])?;
        }
        wrt.flush()?;
        Ok(())
    }
}
