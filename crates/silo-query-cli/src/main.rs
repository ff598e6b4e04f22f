//! silo-query CLI
//!
//! Compiles a REST filter query string and prints the SQL with its bindings.

use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use silo_query_core::{Compiler, QueryParams};

/// Compile REST filter query strings into parameterized SQL.
#[derive(Parser)]
#[command(name = "silo-query")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Target database engine (postgres, mysql, sqlite, mssql).
    #[arg(short, long, env = "SILO_DB_CLIENT", default_value = "postgres")]
    dialect: String,

    /// Table to select from.
    table: String,

    /// Raw query string, e.g. `country=in.(US,UK)&age=gt.20&limit=10`.
    #[arg(default_value = "")]
    query: String,

    /// Print the compiled query as JSON.
    #[arg(long)]
    json: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Dialect errors surface here, before anything is compiled.
    let compiler = Compiler::new(&cli.dialect)?;
    info!(dialect = %compiler.dialect(), "compiler configured");

    let params = QueryParams::parse(&cli.query);
    let compiled = compiler.compile(&cli.table, &params)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&compiled)?);
    } else {
        println!("{}", compiled.sql);
        println!();
        for (i, value) in compiled.bindings.iter().enumerate() {
            println!("  ${} = {value:?}", i + 1);
        }
    }

    Ok(())
}
