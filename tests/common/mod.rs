#![allow(dead_code)]

use std::path::PathBuf;

use fintrack::{Config, ConfigManager, UserRecords};
use fintrack_domain::{BalanceAdjustment, Bill, BillFrequency, Expense, Frequency, Income};
use fintrack_storage_json::save_records_to_path;
use tempfile::TempDir;

/// Isolated config file and records snapshot inside a temporary directory.
pub struct TestEnv {
    pub dir: TempDir,
    pub config_path: PathBuf,
    pub records_path: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let config_path = dir.path().join("config.json");
        let records_path = dir.path().join("records.json");

        let config = Config {
            ui_color_enabled: false,
            data_root: Some(dir.path().join("store")),
            ..Config::default()
        };
        ConfigManager::new(config_path.clone())
            .save(&config)
            .expect("save test config");
        save_records_to_path(&sample_records(), &records_path).expect("save test records");

        Self {
            dir,
            config_path,
            records_path,
        }
    }

    pub fn config(&self) -> &str {
        self.config_path.to_str().expect("utf8 config path")
    }

    pub fn records(&self) -> &str {
        self.records_path.to_str().expect("utf8 records path")
    }

    pub fn store_root(&self) -> PathBuf {
        self.dir.path().join("store")
    }
}

/// Starting balance 1000; salary +2000 on the 15th, rent -900 on the 1st,
/// groceries -120 on Jan 10 and a +50 correction on Jan 20 (all 2025).
pub fn sample_records() -> UserRecords {
    let mut records = UserRecords::new("alice", 1000.0);
    records
        .incomes
        .push(Income::new("Salary", 2000.0, "2025-01-15", Frequency::Monthly));
    records
        .bills
        .push(Bill::new("Rent", 900.0, "2025-01-01", BillFrequency::Monthly));
    records
        .expenses
        .push(Expense::new("Groceries", 120.0, "2025-01-10"));
    records
        .adjustments
        .push(BalanceAdjustment::new(50.0, "2025-01-20", "Bank correction"));
    records
}
