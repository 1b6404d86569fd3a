//! `bizdesk` operator tool.
//!
//! # Responsibility
//! - Open a record store and print section statistics as JSON.
//! - Move entity arrays in and out of the store as JSON files.

mod config;

use bizdesk_core::db::Connection;
use bizdesk_core::model::client::Client;
use bizdesk_core::model::inventory::InventoryItem;
use bizdesk_core::model::repair::Repair;
use bizdesk_core::model::schedule::Schedule;
use bizdesk_core::model::technician::Technician;
use bizdesk_core::model::transaction::Transaction;
use bizdesk_core::query::finance::TransactionFilter;
use bizdesk_core::stats::clients::{client_stats, ClientStats};
use bizdesk_core::stats::finance::{
    finance_stats, period_summary, FinanceStats, PeriodSummary, SummaryPeriod,
};
use bizdesk_core::stats::inventory::{inventory_stats, reorder_list, InventoryStats};
use bizdesk_core::stats::schedule::{schedule_stats, ScheduleStats};
use bizdesk_core::stats::technicians::{technician_stats, TechnicianStats};
use bizdesk_core::{
    core_version, default_log_level, export_json, init_logging, open_db, parse_import, DbError,
    Entity, EntityKind, EntityService, LoggingError, RepoError, SqliteRecordRepository,
    TransferError,
};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use config::{load_file_config, ConfigError, FlagOverrides, Settings, DEFAULT_CONFIG_FILE};
use log::info;
use serde::Serialize;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "bizdesk", version, about = "Back-office record store tool")]
struct Cli {
    /// Config file; `bizdesk.toml` in the working directory when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print statistics for every section.
    Summary {
        /// Reference day for time series and period cards.
        #[arg(long)]
        today: Option<NaiveDate>,
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
        #[arg(long)]
        category: Option<String>,
    },
    /// Bulk-create records from a JSON array file.
    Import { kind: EntityKind, file: PathBuf },
    /// Write all records of one kind as a JSON array.
    Export {
        kind: EntityKind,
        /// Output file; stdout when omitted.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// List inventory items at or below their minimum stock.
    Reorder,
    Version,
}

#[derive(Debug)]
enum CliError {
    Config(ConfigError),
    Logging(LoggingError),
    Db(DbError),
    Repo(RepoError),
    Transfer(TransferError),
    Io { path: PathBuf, source: std::io::Error },
    Json(serde_json::Error),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Logging(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Transfer(err) => write!(f, "{err}"),
            Self::Io { path, source } => write!(f, "`{}`: {source}", path.display()),
            Self::Json(err) => write!(f, "cannot encode output: {err}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<ConfigError> for CliError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<LoggingError> for CliError {
    fn from(value: LoggingError) -> Self {
        Self::Logging(value)
    }
}

impl From<DbError> for CliError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<RepoError> for CliError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<TransferError> for CliError {
    fn from(value: TransferError) -> Self {
        Self::Transfer(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("bizdesk: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    if let Command::Version = cli.command {
        println!("bizdesk_core version={}", core_version());
        return Ok(());
    }

    let settings = load_settings(&cli)?;
    if let Some(log_dir) = &settings.log_dir {
        init_logging(&settings.log_level, &absolute(log_dir)?)?;
    }
    let conn = open_db(&settings.db_path)?;
    info!(
        "event=cli_command module=cli status=start command={}",
        command_name(&cli.command)
    );

    match cli.command {
        Command::Summary {
            today,
            from,
            to,
            category,
        } => {
            let filter = TransactionFilter {
                date_from: from,
                date_to: to,
                category,
            };
            let today = today.unwrap_or_else(|| Local::now().date_naive());
            print_json(&summary(&conn, &filter, today)?)
        }
        Command::Import { kind, file } => {
            let json = std::fs::read_to_string(&file).map_err(|source| CliError::Io {
                path: file.clone(),
                source,
            })?;
            let count = match kind {
                EntityKind::Client => import_records::<Client>(&conn, &json)?,
                EntityKind::Transaction => import_records::<Transaction>(&conn, &json)?,
                EntityKind::InventoryItem => import_records::<InventoryItem>(&conn, &json)?,
                EntityKind::Schedule => import_records::<Schedule>(&conn, &json)?,
                EntityKind::Technician => import_records::<Technician>(&conn, &json)?,
                EntityKind::Repair => import_records::<Repair>(&conn, &json)?,
            };
            println!("imported {count} {kind} records");
            Ok(())
        }
        Command::Export { kind, output } => {
            let json = match kind {
                EntityKind::Client => export_records::<Client>(&conn)?,
                EntityKind::Transaction => export_records::<Transaction>(&conn)?,
                EntityKind::InventoryItem => export_records::<InventoryItem>(&conn)?,
                EntityKind::Schedule => export_records::<Schedule>(&conn)?,
                EntityKind::Technician => export_records::<Technician>(&conn)?,
                EntityKind::Repair => export_records::<Repair>(&conn)?,
            };
            match output {
                Some(path) => std::fs::write(&path, json)
                    .map_err(|source| CliError::Io { path, source }),
                None => {
                    println!("{json}");
                    Ok(())
                }
            }
        }
        Command::Reorder => {
            let items = service::<InventoryItem>(&conn)?.get_all()?;
            print_json(&reorder_list(&items))
        }
        Command::Version => Ok(()),
    }
}

fn load_settings(cli: &Cli) -> Result<Settings, CliError> {
    let (path, required) = match &cli.config {
        Some(path) => (path.clone(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };
    let file = load_file_config(&path, required)?;
    let flags = FlagOverrides {
        db_path: cli.db.clone(),
        log_level: cli.log_level.clone(),
        log_dir: cli.log_dir.clone(),
    };
    Ok(Settings::resolve(file, flags, default_log_level()))
}

fn absolute(path: &Path) -> Result<PathBuf, CliError> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Summary { .. } => "summary",
        Command::Import { .. } => "import",
        Command::Export { .. } => "export",
        Command::Reorder => "reorder",
        Command::Version => "version",
    }
}

type SqliteService<'conn, E> = EntityService<E, SqliteRecordRepository<'conn, E>>;

fn service<E: Entity>(conn: &Connection) -> Result<SqliteService<'_, E>, CliError> {
    Ok(EntityService::new(SqliteRecordRepository::try_new(conn)?))
}

fn import_records<E: Entity>(conn: &Connection, json: &str) -> Result<usize, CliError> {
    let records = parse_import::<E>(json)?;
    Ok(service::<E>(conn)?.import(&records)?)
}

fn export_records<E: Entity>(conn: &Connection) -> Result<String, CliError> {
    let records = service::<E>(conn)?.export()?;
    Ok(export_json(&records)?)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Summary {
    today: NaiveDate,
    clients: ClientStats,
    finance: FinanceStats,
    finance_today: PeriodSummary,
    finance_week: PeriodSummary,
    finance_month: PeriodSummary,
    inventory: InventoryStats,
    schedule: ScheduleStats,
    technicians: TechnicianStats,
}

fn summary(
    conn: &Connection,
    filter: &TransactionFilter,
    today: NaiveDate,
) -> Result<Summary, CliError> {
    let transactions = service::<Transaction>(conn)?.get_all()?;
    Ok(Summary {
        today,
        clients: client_stats(&service::<Client>(conn)?.get_all()?),
        finance: finance_stats(&transactions, filter, today),
        finance_today: period_summary(&transactions, SummaryPeriod::Today, today),
        finance_week: period_summary(&transactions, SummaryPeriod::Week, today),
        finance_month: period_summary(&transactions, SummaryPeriod::Month, today),
        inventory: inventory_stats(&service::<InventoryItem>(conn)?.get_all()?),
        schedule: schedule_stats(&service::<Schedule>(conn)?.get_all()?),
        technicians: technician_stats(&service::<Technician>(conn)?.get_all()?),
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
