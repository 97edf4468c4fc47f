//! Унифицированные трэйты чтения/записи на основе std::io::{BufRead, Write}.

use crate::{
    error::Result,
    model::{CompleteBalanceSeries, RawRecord},
};
use std::io::{BufRead, Write};

/// Источник сырых пар (дата, остаток). `source` попадает в [`crate::model::Origin`].
pub trait ReadRecords {
    fn read<R: BufRead>(r: R, source: &str) -> Result<Vec<RawRecord>>;
}

pub trait WriteSeries {
    fn write<W: Write>(w: W, series: &CompleteBalanceSeries) -> Result<()>;
}
