//! Коды выхода. Скрипты на них полагаются, не перенумеровывать.
//!
//! | Код | Когда                                        |
//! |-----|----------------------------------------------|
//! | 0   | успех                                        |
//! | 1   | прочие ошибки (I/O, конфиг, JSON, переполнение) |
//! | 2   | плохие аргументы, файл-источник не найден    |
//! | 3   | битая строка во входных данных               |
//! | 4   | во входных данных нет ни одной записи        |
//! | 5   | начало периода позже конца                   |

use adblib::AdbError;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE: u8 = 2;
pub const EXIT_PARSE: u8 = 3;
pub const EXIT_EMPTY: u8 = 4;
pub const EXIT_INVALID_PERIOD: u8 = 5;

pub fn for_error(err: &AdbError) -> u8 {
    match err {
        AdbError::SourceNotFound { .. } => EXIT_USAGE,
        AdbError::Parse { .. } | AdbError::Csv(_) => EXIT_PARSE,
        AdbError::EmptyInput => EXIT_EMPTY,
        AdbError::InvalidPeriod { .. } => EXIT_INVALID_PERIOD,
        _ => EXIT_ERROR,
    }
}
