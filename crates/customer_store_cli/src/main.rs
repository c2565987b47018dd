//! Command-line caller for the customer store.
//!
//! # Responsibility
//! - Resolve configuration from flags and `CUSTOMER_STORE_*` variables.
//! - Run one service operation and print its result as JSON.
//! - Map service errors onto an error envelope and a process exit code.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use customer_store_core::{
    core_version, init_logging, Customer, CustomerRepository, CustomerService, ErrorKind,
    FieldError, FileCustomerRepository, PageRequest, PageResult, ServiceError, ServiceResult,
    StoreConfig, DEFAULT_PAGE_SIZE,
};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "customer-store")]
#[command(about = "Manage customers stored in a local JSON file")]
struct Cli {
    /// Data file; overrides CUSTOMER_STORE_DATA_FILE.
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,
    /// Log level; overrides CUSTOMER_STORE_LOG_LEVEL.
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// Absolute log directory; overrides CUSTOMER_STORE_LOG_DIR.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(flatten)]
    Store(StoreCommand),
    /// Print the core version.
    Version,
}

/// Operations that run against the data file.
#[derive(Clone, Subcommand)]
enum StoreCommand {
    /// List one page of customers.
    List {
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        size: u32,
    },
    /// Show one customer.
    Get { id: String },
    /// Create a customer; an id is generated unless given.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        id: Option<String>,
    },
    /// Replace name and email of an existing customer.
    Update {
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    /// Delete a customer.
    Delete { id: String },
}

/// Successful result printed to stdout.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Outcome {
    Page(PageResult<Customer>),
    Customer(Customer),
    Deleted { deleted: String },
}

/// Error body printed to stderr for failed operations.
#[derive(Debug, Serialize)]
struct ErrorEnvelope<'a> {
    status: u16,
    error: &'static str,
    message: String,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    errors: &'a [FieldError],
}

impl<'a> ErrorEnvelope<'a> {
    fn from_error(err: &'a ServiceError) -> Self {
        let kind = err.kind();
        Self {
            status: kind.status_code(),
            error: kind.reason(),
            message: err.to_string(),
            errors: err.field_errors(),
        }
    }
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let command = match &cli.command {
        Command::Store(command) => command.clone(),
        Command::Version => {
            println!("customer_store_core version={}", core_version());
            return Ok(ExitCode::SUCCESS);
        }
    };

    let config = resolve_config(&cli, StoreConfig::from_env());
    config.validate().context("invalid configuration")?;
    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, log_dir).context("failed to start logging")?;
    }

    let repo = FileCustomerRepository::open(&config.data_file).with_context(|| {
        format!("failed to open data file `{}`", config.data_file.display())
    })?;
    let service = CustomerService::new(repo);

    match execute(&service, command) {
        Ok(outcome) => {
            let body = serde_json::to_string_pretty(&outcome).context("failed to encode result")?;
            println!("{body}");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            let envelope = ErrorEnvelope::from_error(&err);
            eprintln!("{}", serde_json::to_string_pretty(&envelope)?);
            Ok(ExitCode::from(exit_code(err.kind())))
        }
    }
}

fn resolve_config(cli: &Cli, mut config: StoreConfig) -> StoreConfig {
    if let Some(data_file) = &cli.data_file {
        config.data_file = data_file.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(log_dir) = &cli.log_dir {
        config.log_dir = Some(log_dir.clone());
    }
    config
}

fn execute<R: CustomerRepository>(
    service: &CustomerService<R>,
    command: StoreCommand,
) -> ServiceResult<Outcome> {
    match command {
        StoreCommand::List { page, size } => service
            .list_customers_paged(PageRequest::new(page, size))
            .map(Outcome::Page),
        StoreCommand::Get { id } => service.get_customer(&id).map(Outcome::Customer),
        StoreCommand::Add { name, email, id } => {
            let candidate = match id {
                Some(id) => Customer::with_id(id, name, email),
                None => Customer::new(name, email),
            };
            service.add_customer(&candidate).map(Outcome::Customer)
        }
        StoreCommand::Update { id, name, email } => service
            .update_customer(&id, &Customer::new(name, email))
            .map(Outcome::Customer),
        StoreCommand::Delete { id } => {
            service.delete_customer(&id)?;
            Ok(Outcome::Deleted { deleted: id })
        }
    }
}

fn exit_code(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::BadRequest => 2,
        ErrorKind::NotFound => 3,
        ErrorKind::Internal => 1,
    }
}
