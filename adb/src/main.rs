mod exit_codes;
mod prompt;

use adblib::{
    compute_from_sources,
    config::Settings,
    error::{AdbError, Result},
    formats::csv::Csv,
    model::FillPolicy,
    report::render_report,
    sources::load_sources,
    traits::WriteSeries,
    PeriodOverride,
};
use chrono::NaiveDate;
use clap::{ArgAction, Parser, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Fill {
    /// Дни без записей получают последний известный остаток
    Forward,
    /// Дни без записей получают 0
    Zero,
}

impl From<Fill> for FillPolicy {
    fn from(f: Fill) -> Self {
        match f {
            Fill::Forward => FillPolicy::ForwardFill,
            Fill::Zero => FillPolicy::ZeroFill,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "adb", version, about = "Средний дневной остаток по выгрузкам остатков (CSV: date,balance)")]
struct Cli {
    /// CSV-файлы без заголовка; без аргументов спросит интерактивно
    files: Vec<PathBuf>,

    /// Начало периода (YYYY-MM-DD), по умолчанию первое число месяца первой записи
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Конец периода (YYYY-MM-DD), по умолчанию последний день месяца последней записи
    #[arg(long)]
    end: Option<NaiveDate>,

    /// Заполнение дней без записей
    #[arg(long, value_enum)]
    fill: Option<Fill>,

    /// Метка валюты в отчёте
    #[arg(long)]
    currency: Option<String>,

    /// Файл настроек (TOML), по умолчанию ./adb.toml если есть
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Вывести результат в JSON вместо отчёта (только с файлами в аргументах)
    #[arg(long, requires = "files")]
    json: bool,

    /// Записать полный дневной ряд в CSV (date,balance,observed)
    #[arg(long = "export-daily")]
    export_daily: Option<PathBuf>,

    /// -v: info, -vv: debug (RUST_LOG имеет приоритет)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::from(exit_codes::EXIT_SUCCESS),
        Err(e) => {
            render_error(&e);
            ExitCode::from(exit_codes::for_error(&e))
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    apply_overrides(&mut settings, &cli);
    debug!(?settings, "settings resolved");

    let over = PeriodOverride { start: cli.start, end: cli.end };
    over.validate()?;

    let files = if cli.files.is_empty() {
        println!("Average Daily Balance Calculator");
        println!("{}", "=".repeat(50));
        prompt::collect_files(io::stdin().lock(), io::stdout())?
    } else {
        cli.files
    };
    if files.is_empty() {
        println!("No files entered. Exiting.");
        return Ok(());
    }
    if files.len() > 1 && !cli.json {
        println!("\nProcessing {} CSV files...", files.len());
    }

    let sources = load_sources::<Csv>(&files)?;
    let result = compute_from_sources(sources, over, settings.fill_policy)?;
    info!(
        start = %result.period.start(),
        end = %result.period.end(),
        days = result.total_days_in_period,
        average = %result.average_daily_balance,
        "average daily balance computed"
    );

    if let Some(path) = &cli.export_daily {
        let mut w = BufWriter::new(File::create(path)?);
        Csv::write(&mut w, &result.complete_balances)?;
        w.flush()?;
        info!(path = %path.display(), days = result.complete_balances.len(), "daily series exported");
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if cli.json {
        serde_json::to_writer_pretty(&mut out, &result)?;
        writeln!(out)?;
    } else {
        write!(out, "\n{}", render_report(&result, &settings.currency, files.len()))?;
    }
    out.flush().map_err(AdbError::from)
}

/// Флаги командной строки перекрывают файл и окружение.
fn apply_overrides(settings: &mut Settings, cli: &Cli) {
    if let Some(f) = cli.fill {
        settings.fill_policy = f.into();
    }
    if let Some(c) = &cli.currency {
        settings.currency = c.clone();
    }
}

fn render_error(e: &AdbError) {
    match e {
        AdbError::SourceNotFound { path } => {
            eprintln!("Error: Could not find one or more CSV files ({})", path.display());
            eprintln!("Please make sure all files exist and the paths are correct.");
        }
        other => eprintln!("Error processing the data: {other}"),
    }
}
