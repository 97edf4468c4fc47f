//! Интерактивный сбор имён файлов, когда они не переданы аргументами.

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

/// Пустой результат — пользователь ничего не ввёл. EOF считается пустой строкой.
pub fn collect_files<R: BufRead, W: Write>(mut input: R, mut out: W) -> io::Result<Vec<PathBuf>> {
    let multiple = ask(&mut input, &mut out, "Do you want to process multiple CSV files? (y/n): ")?;

    if !multiple.eq_ignore_ascii_case("y") {
        let path = ask(&mut input, &mut out, "Enter the CSV file name (e.g., sample.csv): ")?;
        if path.is_empty() {
            return Ok(Vec::new());
        }
        return Ok(vec![PathBuf::from(path)]);
    }

    writeln!(out, "\nEnter CSV file names (one per line). Enter a blank line when done:")?;
    let mut files = Vec::new();
    loop {
        let path = ask(&mut input, &mut out, "CSV file: ")?;
        if path.is_empty() {
            break;
        }
        files.push(PathBuf::from(path));
    }
    Ok(files)
}

fn ask<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> io::Result<String> {
    write!(out, "{question}")?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}
