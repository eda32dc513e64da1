pub mod import;
pub mod init;
pub mod report;
pub mod status;
pub mod users;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "penny", about = "CSV transaction importer with dedup and auto-categorization.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up penny: choose a data directory and initialize the database.
    Init {
        /// Path for penny data (default: ~/Documents/penny)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Manage users.
    Users {
        #[command(subcommand)]
        command: UsersCommands,
    },
    /// Import a CSV of transactions, skipping rows already seen.
    Import {
        /// Path to the CSV file (default: sample.csv)
        file: Option<String>,
        /// Import against this user id instead of the default
        #[arg(long)]
        user: Option<i64>,
    },
    /// Generate reports.
    Report {
        #[command(subcommand)]
        command: ReportCommands,
    },
    /// Show current database and summary statistics.
    Status,
}

#[derive(Subcommand)]
pub enum ReportCommands {
    /// Income/expense/net and per-category totals for a period.
    Summary {
        /// Start date: YYYY-MM-DD (default: January 1 of this year)
        #[arg(long)]
        from: Option<String>,
        /// End date: YYYY-MM-DD, inclusive (default: today)
        #[arg(long)]
        to: Option<String>,
        /// Report on this user id instead of the default
        #[arg(long)]
        user: Option<i64>,
    },
    /// Month-by-month income/expenses/net for a year.
    Cashflow {
        /// Year: YYYY (default: current year)
        #[arg(long)]
        year: Option<i32>,
        /// Report on this user id instead of the default
        #[arg(long)]
        user: Option<i64>,
    },
}

#[derive(Subcommand)]
pub enum UsersCommands {
    /// Add a new user.
    Add {
        /// Display name, e.g. 'Alice'
        name: String,
        /// Email address
        #[arg(long)]
        email: Option<String>,
    },
    /// List all users.
    List,
}
