use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Write;

use crate::application::{LedgerService, ReportFormat};
use crate::config::Config;
use crate::domain::{Transaction, TransactionId, TransactionInput};
use crate::http::{self, AppState};
use crate::io::{Currency, Exporter};

/// Pocketbook - Personal Income & Expense Ledger
#[derive(Parser)]
#[command(name = "pocketbook")]
#[command(about = "Record income and expenses, track your balance, export monthly reports")]
#[command(version)]
pub struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, default_value = "pocketbook.toml", env = "POCKETBOOK_CONFIG")]
    pub config: String,

    /// Database file path (overrides config file)
    #[arg(short, long, env = "POCKETBOOK_DATABASE")]
    pub database: Option<String>,

    /// Log level (overrides config file)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API
    Serve {
        /// Address to bind (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config file)
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,
    },

    /// Record a transaction dated now
    Add {
        /// What the money was for
        description: String,

        /// Amount (e.g., "50.00" or "50")
        amount: String,

        /// income or expense
        #[arg(short = 't', long = "type")]
        kind: String,
    },

    /// List all transactions, newest first
    List,

    /// Show one transaction
    Show {
        /// Transaction ID
        id: TransactionId,
    },

    /// Replace a transaction's description, amount and type
    Edit {
        /// Transaction ID
        id: TransactionId,

        description: String,

        amount: String,

        /// income or expense
        #[arg(short = 't', long = "type")]
        kind: String,
    },

    /// Permanently delete a transaction
    Delete {
        /// Transaction ID
        id: TransactionId,
    },

    /// Show total income, total expenses and balance
    Summary,

    /// Generate a monthly report
    Report {
        year: i32,

        /// Month number, 1-12
        month: u32,

        #[arg(short, long, value_enum, default_value = "csv")]
        format: OutputFormat,

        /// Output file (csv and json default to stdout, pdf to monthly-report-YYYY-MM.pdf)
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Csv,
    Pdf,
}

impl Cli {
    /// Load the config file and apply command-line overrides.
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load(&self.config)?;
        if let Some(ref database) = self.database {
            config.database.path = database.clone();
        }
        if let Some(ref level) = self.log_level {
            config.logging.level = level.clone();
        }
        Ok(config)
    }

    pub async fn run(self, mut config: Config) -> Result<()> {
        let service = LedgerService::init(&config.database.path).await?;

        match self.command {
            Commands::Serve { host, port } => {
                if let Some(host) = host {
                    config.server.host = host;
                }
                if let Some(port) = port {
                    config.server.port = port;
                }
                let addr = config.listen_addr();
                http::serve(AppState::new(service, config.currency), &addr).await?;
            }

            Commands::Add {
                description,
                amount,
                kind,
            } => {
                let tx = service
                    .create_transaction(TransactionInput::new(description, amount, kind))
                    .await?;
                println!("Recorded transaction {}", tx.id);
                print_transaction(&tx, &config.currency);
            }

            Commands::List => {
                let transactions = service.list_transactions().await?;
                print_transactions(&transactions, &config.currency);
            }

            Commands::Show { id } => {
                let tx = service.get_transaction(id).await?;
                print_transaction(&tx, &config.currency);
            }

            Commands::Edit {
                id,
                description,
                amount,
                kind,
            } => {
                let tx = service
                    .update_transaction(id, TransactionInput::new(description, amount, kind))
                    .await?;
                println!("Updated transaction {}", tx.id);
                print_transaction(&tx, &config.currency);
            }

            Commands::Delete { id } => {
                service.delete_transaction(id).await?;
                println!("Deleted transaction {}", id);
            }

            Commands::Summary => {
                let summary = service.summary().await?;
                let currency = &config.currency;
                println!("Total Income:   {:>15}", currency.format(summary.income));
                println!("Total Expenses: {:>15}", currency.format(summary.expenses));
                println!("{}", "-".repeat(32));
                println!("Balance:        {:>15}", currency.format(summary.balance));
            }

            Commands::Report {
                year,
                month,
                format,
                output,
            } => {
                run_report_command(&service, &config.currency, year, month, format, output)
                    .await?;
            }
        }

        Ok(())
    }
}

async fn run_report_command(
    service: &LedgerService,
    currency: &Currency,
    year: i32,
    month: u32,
    format: OutputFormat,
    output: Option<String>,
) -> Result<()> {
    let exporter = Exporter::new(service, currency);
    let (bytes, default_path) = match format {
        OutputFormat::Json => {
            let report = service.monthly_report(year, month).await?;
            let mut json = serde_json::to_vec_pretty(&report)?;
            json.push(b'\n');
            (json, None)
        }
        OutputFormat::Csv => {
            let file = exporter.monthly(year, month, ReportFormat::Csv).await?;
            (file.bytes, None)
        }
        OutputFormat::Pdf => {
            let file = exporter.monthly(year, month, ReportFormat::Pdf).await?;
            (file.bytes, Some(file.file_name))
        }
    };

    match output.or(default_path) {
        Some(path) => {
            std::fs::write(&path, &bytes).with_context(|| format!("Failed to write {path}"))?;
            eprintln!("Wrote {} ({} bytes)", path, bytes.len());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&bytes)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn signed_amount(tx: &Transaction, currency: &Currency) -> String {
    format!("{}{}", tx.kind.sign(), currency.format(tx.amount))
}

fn print_transactions(transactions: &[Transaction], currency: &Currency) {
    if transactions.is_empty() {
        println!("No transactions found.");
        return;
    }

    println!(
        "{:<6} {:<12} {:<30} {:<8} {:>14}",
        "ID", "DATE", "DESCRIPTION", "TYPE", "AMOUNT"
    );
    println!("{}", "-".repeat(74));
    for tx in transactions {
        let description: String = if tx.description.chars().count() > 30 {
            tx.description.chars().take(27).chain("...".chars()).collect()
        } else {
            tx.description.clone()
        };
        println!(
            "{:<6} {:<12} {:<30} {:<8} {:>14}",
            tx.id,
            tx.date.format("%Y-%m-%d"),
            description,
            tx.kind.label(),
            signed_amount(tx, currency)
        );
    }
}

fn print_transaction(tx: &Transaction, currency: &Currency) {
    println!("Transaction {}", tx.id);
    println!("  Description:  {}", tx.description);
    println!("  Type:         {}", tx.kind.label());
    println!("  Amount:       {}", signed_amount(tx, currency));
    println!("  Date:         {}", tx.date.format("%Y-%m-%d %H:%M:%S"));
    println!("  Recorded:     {}", tx.created_at.format("%Y-%m-%d %H:%M:%S"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_report_command() {
        let cli = Cli::parse_from([
            "pocketbook", "--database", "x.db", "report", "2024", "3", "--format", "pdf",
        ]);
        assert_eq!(cli.database.as_deref(), Some("x.db"));
        match cli.command {
            Commands::Report {
                year,
                month,
                format,
                output,
            } => {
                assert_eq!((year, month), (2024, 3));
                assert_eq!(format, OutputFormat::Pdf);
                assert!(output.is_none());
            }
            _ => panic!("expected report command"),
        }
    }
}
