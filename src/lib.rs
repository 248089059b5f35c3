//! # tablehunter
//!
//! A library for finding the tables, views and stored procedures a SQL script touches.
//!
//! # Features
//!
//! - Scan multi-statement scripts with block and line comments, without parsing them.
//! - Capture objects after `FROM`, `JOIN`, `UPDATE`, `INSERT INTO`, `MERGE INTO`, `DELETE FROM`,
//!   `TRUNCATE TABLE`, `ALTER TABLE`, `CREATE TABLE`, `CREATE VIEW` and `DROP TABLE`.
//! - Prefer `schema.table` over a bare `table` when a script uses both.
//! - Group objects by naming convention (`LP_`, `DDT_`, `E_`, `SA_`, `DW_`).
//! - Collect stored procedures from `CREATE PROCEDURE`, `EXEC`, `EXECUTE` and `CALL`.
//!
//! # Example
//!
//! ```rust
//! use tablehunter::{categorizer::Category, extract_report, extractor::ExtractionOptions};
//!
//! let sql = r#"
//!     use sales;
//!     /* nightly load */
//!     insert into sales.lp_orders select * from orders join dw_customers using (id);
//!     delete from lp_orders where loaded = 0; -- cleanup
//!     call etl.refresh_marts();
//! "#;
//! let report = extract_report(sql, &ExtractionOptions::default());
//!
//! assert_eq!(report.objects[&Category::Lp], vec!["SALES.LP_ORDERS"]);
//! assert_eq!(report.objects[&Category::Dw], vec!["DW_CUSTOMERS"]);
//! assert_eq!(report.objects[&Category::Other], vec!["ORDERS"]);
//! assert_eq!(report.procedures, vec!["ETL.REFRESH_MARTS"]);
//! ```
use std::path::{Path, PathBuf};

use crate::categorizer::categorize;
use crate::config::Config;
use crate::error::Error;
use crate::extractor::{ExtractionOptions, extract_objects};
use crate::normalizer::normalize_sql;
use crate::notify::Notifier;
use crate::procedures::extract_procedures;
use crate::report::ExtractionReport;
use crate::resolver::resolve_redundancy;

pub mod categorizer;
pub mod config;
pub mod error;
pub mod extractor;
pub mod normalizer;
pub mod notify;
pub mod procedures;
pub mod report;
pub mod resolver;
pub mod test_utils;

/// Runs every extraction stage over `sql`. Never fails: text without recognizable
/// statements gives an empty report.
pub fn extract_report(sql: &str, options: &ExtractionOptions) -> ExtractionReport {
    log::debug!("Scanning {}", sql.chars().take(50).collect::<String>());

    let normalized = normalize_sql(sql);
    let objects = extract_objects(&normalized, options);
    let found = objects.len();
    let objects = resolve_redundancy(objects);
    log::info!(
        "Found {} objects, {} after removing redundant names",
        found,
        objects.len()
    );

    ExtractionReport {
        objects: categorize(&objects),
        procedures: extract_procedures(&normalized),
    }
}

/// Reads the configured SQL file and writes its report. Returns the report path.
pub fn run(config: &Config) -> Result<PathBuf, Error> {
    std::fs::create_dir_all(&config.output_folder_path).map_err(|source| Error::OutputWrite {
        path: config.output_folder_path.clone(),
        source,
    })?;
    let output_path = config.output_path();

    log::info!("Reading SQL file: {}", config.input_file_path.display());
    let sql = std::fs::read_to_string(&config.input_file_path).map_err(|source| {
        Error::InputRead {
            path: config.input_file_path.clone(),
            source,
        }
    })?;

    let report = extract_report(&sql, &config.extraction_options());
    report.write_to(&output_path, config.output_format)?;
    log::info!("Output saved to: {}", output_path.display());
    Ok(output_path)
}

/// Loads `config_path`, runs the extraction and reports the outcome through `notifier`.
/// Failures are logged in full; the notifier only learns where the log is.
pub fn run_with_notifier(
    config_path: &Path,
    log_path: &Path,
    notifier: &dyn Notifier,
) -> Result<PathBuf, Error> {
    log::info!("SQL Object Extraction Started");
    let result = Config::from_file(config_path).and_then(|config| {
        log::info!("Config loaded successfully");
        run(&config)
    });

    match &result {
        Ok(output_path) => {
            notifier.on_success(output_path);
            log::info!("SQL Object Extraction Completed Successfully");
        }
        Err(err) => {
            log::error!("ERROR occurred during SQL Object Extraction");
            log::error!("{}", err);
            let mut source = std::error::Error::source(err);
            while let Some(cause) = source {
                log::error!("Caused by: {}", cause);
                source = std::error::Error::source(cause);
            }
            notifier.on_failure(log_path);
        }
    }
    result
}
