//! Argument handling for the `fintrack_cli` binary.
//!
//! ```text
//! fintrack_cli forecast <records.json> [--start DATE] [--days N] [--expand] [--json]
//! fintrack_cli summary  <records.json> [--start DATE] [--days N] [--expand] [--json]
//! fintrack_cli rollup   <records.json> [--start DATE] [--days N] [--expand] [--table]
//! fintrack_cli check    <records.json>
//! fintrack_cli config   [set <key> <value>]
//! fintrack_cli version
//! ```
//!
//! `--user <id>` may replace the records path; the snapshot is then read from
//! the configured data root.

use std::{
    env,
    io::{self, Write},
    path::PathBuf,
};

use chrono::NaiveDateTime;
use fintrack_config::{Config, ConfigManager};
use fintrack_core::{
    storage::{record_warnings, InMemoryRecordSource, RecordSource},
    time::{Clock, FixedClock, SystemClock},
    ForecastService, LocalForecastBackend, RecurrencePolicy, RemoteForecastClient,
    RemoteForecastRequest, SummaryService,
};
use fintrack_domain::{parse_record_date, UserRecords};
use fintrack_storage_json::{load_records_from_path, JsonRecordStore};

use crate::{
    errors::AppError,
    report::{self, AmountFormatter},
    utils::build_info,
};

pub const CONFIG_ENV: &str = "FINTRACK_CONFIG";
const LOCAL_USER: &str = "local";

/// Entry point used by the binary. Returns the process exit code.
pub fn run_cli() -> i32 {
    let args: Vec<String> = env::args().skip(1).collect();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match run(&args, &SystemClock, &mut out) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("Error: {err}");
            if err.is_usage() {
                print_usage();
                2
            } else {
                1
            }
        }
    }
}

pub fn print_usage() {
    eprintln!(
        "Usage: fintrack_cli <command> [options]\n\
         Commands:\n  \
         forecast <records.json | --user ID> [--start DATE] [--days N] [--expand] [--json]\n  \
         summary  <records.json | --user ID> [--start DATE] [--days N] [--expand] [--json]\n  \
         rollup   <records.json | --user ID> [--start DATE] [--days N] [--expand] [--table]\n  \
         check    <records.json | --user ID>\n  \
         config   [set <key> <value>]\n  \
         version\n\
         Options:\n  \
         --config PATH   configuration file (defaults to ${CONFIG_ENV} or the platform config dir)\n  \
         --no-color      disable highlighting of negative amounts"
    );
}

/// Runs one command. `clock` resolves the forecast start when `--start` is omitted.
pub fn run<W: Write>(args: &[String], clock: &dyn Clock, out: &mut W) -> Result<(), AppError> {
    let Some((command, rest)) = args.split_first() else {
        return Err(AppError::usage("missing command"));
    };

    match command.as_str() {
        "forecast" => forecast(&parse_options(rest)?, clock, out),
        "summary" => summary(&parse_options(rest)?, clock, out),
        "rollup" => rollup(&parse_options(rest)?, clock, out),
        "check" => check(&parse_options(rest)?, out),
        "config" => config(rest, out),
        "version" | "--version" => {
            writeln!(out, "{}", build_info::current())?;
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => Err(AppError::usage(format!("unknown command `{other}`"))),
    }
}

#[derive(Debug, Clone, PartialEq)]
enum RecordsArg {
    File(PathBuf),
    User(String),
}

#[derive(Debug, Clone, Default)]
struct Options {
    records: Option<RecordsArg>,
    start: Option<NaiveDateTime>,
    days: Option<u32>,
    expand: bool,
    json: bool,
    table: bool,
    no_color: bool,
    config: Option<PathBuf>,
}

fn parse_options(args: &[String]) -> Result<Options, AppError> {
    let mut options = Options::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--start" => {
                let raw = flag_value(&mut iter, "--start")?;
                let start = parse_record_date(raw)
                    .ok_or_else(|| AppError::usage(format!("invalid --start date `{raw}`")))?;
                options.start = Some(start);
            }
            "--days" => {
                let raw = flag_value(&mut iter, "--days")?;
                let days = raw
                    .parse::<u32>()
                    .ok()
                    .filter(|days| *days > 0)
                    .ok_or_else(|| {
                        AppError::usage(format!("--days expects a positive number, got `{raw}`"))
                    })?;
                options.days = Some(days);
            }
            "--user" => {
                let user = flag_value(&mut iter, "--user")?;
                set_records(&mut options, RecordsArg::User(user.to_string()))?;
            }
            "--config" => {
                options.config = Some(PathBuf::from(flag_value(&mut iter, "--config")?));
            }
            "--expand" => options.expand = true,
            "--json" => options.json = true,
            "--table" => options.table = true,
            "--no-color" => options.no_color = true,
            flag if flag.starts_with("--") => {
                return Err(AppError::usage(format!("unknown option `{flag}`")));
            }
            path => set_records(&mut options, RecordsArg::File(PathBuf::from(path)))?,
        }
    }
    Ok(options)
}

fn flag_value<'a>(
    iter: &mut impl Iterator<Item = &'a String>,
    flag: &str,
) -> Result<&'a str, AppError> {
    iter.next()
        .map(String::as_str)
        .ok_or_else(|| AppError::usage(format!("{flag} requires a value")))
}

fn set_records(options: &mut Options, records: RecordsArg) -> Result<(), AppError> {
    if options.records.is_some() {
        return Err(AppError::usage("only one records source may be given"));
    }
    options.records = Some(records);
    Ok(())
}

/// Everything a forecasting command needs once arguments and config are resolved.
struct Prepared {
    config: Config,
    records: UserRecords,
    start: NaiveDateTime,
    days: u32,
    policy: RecurrencePolicy,
}

impl Prepared {
    fn resolve(options: &Options, clock: &dyn Clock) -> Result<Self, AppError> {
        let config = load_config(options)?;
        let records = load_records(options, &config)?;
        for warning in record_warnings(&records) {
            tracing::warn!(user = %records.user_id, "{warning}");
        }
        let policy = if options.expand || config.expand_recurring {
            RecurrencePolicy::Expand
        } else {
            RecurrencePolicy::SingleOccurrence
        };
        Ok(Self {
            start: options.start.unwrap_or_else(|| clock.now_naive()),
            days: options.days.unwrap_or(config.default_horizon_days),
            policy,
            records,
            config,
        })
    }

    fn formatter(&self) -> AmountFormatter {
        AmountFormatter::from_config(&self.config)
    }

    fn color(&self, options: &Options) -> bool {
        self.config.ui_color_enabled && !options.no_color
    }
}

fn config_manager(options: &Options) -> Result<ConfigManager, AppError> {
    let explicit = options
        .config
        .clone()
        .or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from));
    match explicit {
        Some(path) => Ok(ConfigManager::new(path)),
        None => Ok(ConfigManager::platform_default()?),
    }
}

fn load_config(options: &Options) -> Result<Config, AppError> {
    Ok(config_manager(options)?.load()?)
}

fn load_records(options: &Options, config: &Config) -> Result<UserRecords, AppError> {
    match &options.records {
        Some(RecordsArg::File(path)) => Ok(load_records_from_path(path)?),
        Some(RecordsArg::User(user)) => {
            let store = JsonRecordStore::new(config.resolve_data_root())?;
            Ok(store.load_records(user)?)
        }
        None => Err(AppError::usage("a records file or --user is required")),
    }
}

fn forecast<W: Write>(options: &Options, clock: &dyn Clock, out: &mut W) -> Result<(), AppError> {
    let prepared = Prepared::resolve(options, clock)?;
    let items = ForecastService::generate_for_records(
        &prepared.records,
        prepared.start,
        prepared.days,
        prepared.policy,
    );

    if options.json {
        serde_json::to_writer_pretty(&mut *out, &items)?;
        writeln!(out)?;
    } else {
        let table = report::forecast_table(&items, &prepared.formatter());
        write!(out, "{}", table.render(prepared.color(options)))?;
    }
    Ok(())
}

fn summary<W: Write>(options: &Options, clock: &dyn Clock, out: &mut W) -> Result<(), AppError> {
    let prepared = Prepared::resolve(options, clock)?;
    let items = ForecastService::generate_for_records(
        &prepared.records,
        prepared.start,
        prepared.days,
        prepared.policy,
    );
    let summary = SummaryService::summarize(&items);

    if options.json {
        serde_json::to_writer_pretty(&mut *out, &summary)?;
        writeln!(out)?;
    } else {
        for line in report::summary_lines(&summary, &prepared.formatter()) {
            writeln!(out, "{line}")?;
        }
    }
    Ok(())
}

/// Serves the remote forecast contract locally against the given records.
fn rollup<W: Write>(options: &Options, clock: &dyn Clock, out: &mut W) -> Result<(), AppError> {
    let mut prepared = Prepared::resolve(options, clock)?;
    if prepared.records.user_id.trim().is_empty() {
        prepared.records.user_id = LOCAL_USER.to_string();
    }
    let user_id = prepared.records.user_id.clone();

    let source = InMemoryRecordSource::new().with_records(prepared.records.clone());
    let backend = LocalForecastBackend::new(source, FixedClock::at(prepared.start))
        .with_policy(prepared.policy);
    let response = backend.forecast(Some(&user_id), &RemoteForecastRequest::new(prepared.days))?;

    if options.table {
        let table = report::rollup_table(&response.forecast, &prepared.formatter());
        write!(out, "{}", table.render(prepared.color(options)))?;
    } else {
        serde_json::to_writer_pretty(&mut *out, &response)?;
        writeln!(out)?;
    }
    Ok(())
}

fn check<W: Write>(options: &Options, out: &mut W) -> Result<(), AppError> {
    let config = load_config(options)?;
    let records = load_records(options, &config)?;
    let warnings = record_warnings(&records);
    if warnings.is_empty() {
        writeln!(out, "{} records look usable.", records.record_count())?;
    } else {
        for warning in &warnings {
            writeln!(out, "warning: {warning}")?;
        }
    }
    Ok(())
}

/// A single validated `config set` assignment.
#[derive(Debug, Clone, PartialEq)]
enum Setting {
    Locale(String),
    Currency(String),
    Horizon(u32),
    Expand(bool),
    Precision(Option<u8>),
    Color(bool),
    DataRoot(Option<PathBuf>),
}

impl Setting {
    fn parse(key: &str, value: &str) -> Result<Self, AppError> {
        let invalid = || AppError::usage(format!("invalid value `{value}` for `{key}`"));
        let setting = match key {
            "locale" => Setting::Locale(value.to_string()),
            "currency" => Setting::Currency(value.trim().to_uppercase()),
            "horizon" | "default_horizon_days" => {
                Setting::Horizon(value.parse().map_err(|_| invalid())?)
            }
            "expand" | "expand_recurring" => Setting::Expand(parse_bool(value).ok_or_else(invalid)?),
            "precision" | "currency_precision" => match value {
                "auto" | "none" => Setting::Precision(None),
                digits => Setting::Precision(Some(digits.parse().map_err(|_| invalid())?)),
            },
            "color" | "ui_color_enabled" => Setting::Color(parse_bool(value).ok_or_else(invalid)?),
            "data_root" => match value {
                "" | "default" => Setting::DataRoot(None),
                path => Setting::DataRoot(Some(PathBuf::from(path))),
            },
            other => return Err(AppError::usage(format!("unknown config key `{other}`"))),
        };
        Ok(setting)
    }

    fn apply(self, config: &mut Config) {
        match self {
            Setting::Locale(locale) => config.locale = locale,
            Setting::Currency(currency) => config.currency = currency,
            Setting::Horizon(days) => config.default_horizon_days = days,
            Setting::Expand(expand) => config.expand_recurring = expand,
            Setting::Precision(precision) => config.currency_precision = precision,
            Setting::Color(color) => config.ui_color_enabled = color,
            Setting::DataRoot(root) => config.data_root = root,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Shows the active configuration, or stores one `set <key> <value>` edit.
fn config<W: Write>(args: &[String], out: &mut W) -> Result<(), AppError> {
    let (setting, rest) = match args {
        [verb, key, value, rest @ ..] if verb == "set" => (Some(Setting::parse(key, value)?), rest),
        [verb, ..] if verb == "set" => {
            return Err(AppError::usage("config set expects <key> <value>"));
        }
        rest => (None, rest),
    };
    let options = parse_options(rest)?;
    if options.records.is_some() {
        return Err(AppError::usage("config does not take a records source"));
    }
    let manager = config_manager(&options)?;

    let config = match setting {
        Some(setting) => {
            let updated = manager.update(|config| setting.apply(config))?;
            tracing::info!(path = %manager.config_path().display(), "configuration updated");
            updated
        }
        None => manager.load()?,
    };
    serde_json::to_writer_pretty(&mut *out, &config)?;
    writeln!(out)?;
    Ok(())
}
