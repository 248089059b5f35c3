use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::anyhow;
use clap::Parser as ClapParser;
use clap::Subcommand;
use indexmap::IndexMap;
use std::time::Instant;
use tablehunter::extract_report;
use tablehunter::extractor::ExtractionOptions;
use tablehunter::notify::ConsoleNotifier;
use tablehunter::report::ExtractionReport;

#[derive(clap::Parser)]
#[command(name = "tablehunter")]
#[command(about = "Finds the tables, views and stored procedures used by SQL scripts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the extraction described by a key=value configuration file.
    Extract(ExtractCommand),
    /// Print the objects referenced by one or more SQL files.
    Scan(ScanCommand),
}

#[derive(clap::Args)]
struct ExtractCommand {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.txt")]
    config: PathBuf,
    /// Directory receiving the daily log file.
    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,
}

#[derive(clap::Args)]
struct ScanCommand {
    /// Path to the SQL file or directory containing SQL files.
    #[arg(value_name = "SQL_[FILE|DIR]")]
    sql: PathBuf,
    /// Comma separated words never reported as object names, on top of the built-in ones.
    #[arg(long, value_delimiter = ',')]
    reserved: Vec<String>,
    /// Print the reports as JSON.
    #[arg(long)]
    json: bool,
    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

fn init_file_logging(log_dir: &Path) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(log_dir).map_err(|err| {
        anyhow!(
            "Failed to create log directory {} due to error: {}",
            log_dir.display(),
            err
        )
    })?;
    let log_path = log_dir.join(format!(
        "sql_object_extraction_{}.log",
        chrono::Local::now().format("%Y%m%d")
    ));
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .map_err(|err| {
            anyhow!(
                "Failed to open log file {} due to error: {}",
                log_path.display(),
                err
            )
        })?;

    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} | {} | {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
                record.level(),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();
    Ok(log_path)
}

fn scan_file(sql_file_path: &Path, options: &ExtractionOptions) -> anyhow::Result<ExtractionReport> {
    let sql = std::fs::read_to_string(sql_file_path).map_err(|_| {
        anyhow!(
            "Failed to read sql file {}",
            sql_file_path.display().to_string()
        )
    })?;
    Ok(extract_report(&sql, options))
}

fn scan(scan_command: &ScanCommand) -> anyhow::Result<String> {
    let options = ExtractionOptions::default().with_extra_reserved_keywords(&scan_command.reserved);
    let sql_file_or_dir = &scan_command.sql;

    let mut file_reports: IndexMap<String, ExtractionReport> = IndexMap::new();
    if sql_file_or_dir.is_dir() {
        let mut sql_in_dir: Vec<_> = std::fs::read_dir(sql_file_or_dir)?
            .filter_map(|res| res.ok())
            .map(|entry| entry.path())
            .filter(|file| file.extension().is_some_and(|ext| ext == "sql"))
            .collect();
        sql_in_dir.sort();

        for sql_file in sql_in_dir {
            let report = scan_file(&sql_file, &options)?;
            file_reports.insert(
                std::path::absolute(sql_file)?.display().to_string(),
                report,
            );
        }
    } else {
        let report = scan_file(sql_file_or_dir, &options)?;
        file_reports.insert(
            std::path::absolute(sql_file_or_dir)?.display().to_string(),
            report,
        );
    }

    let out_str = if scan_command.json {
        if scan_command.pretty {
            serde_json::to_string_pretty(&file_reports)?
        } else {
            serde_json::to_string(&file_reports)?
        }
    } else {
        file_reports
            .iter()
            .map(|(file, report)| format!("{}\n{}", file, report.to_text()))
            .collect::<Vec<_>>()
            .join("\n")
    };
    Ok(out_str)
}

fn main() -> anyhow::Result<()> {
    let now = Instant::now();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Extract(extract_command) => {
            let log_path = init_file_logging(&extract_command.log_dir)?;
            tablehunter::run_with_notifier(&extract_command.config, &log_path, &ConsoleNotifier)
                .map_err(|_| anyhow!("Extraction failed, see {}", log_path.display()))?;
        }
        Commands::Scan(scan_command) => {
            env_logger::init();
            println!("{}", scan(scan_command)?);
        }
    }

    let elapsed = now.elapsed();
    log::info!("Elapsed: {:.2?}", elapsed);

    Ok(())
}
