use clap::Parser;
use colored::Colorize;
use human_panic::setup_panic;
use rollbook_lib::{Error, Roster, config::CoreConfig};
use sysexits::ExitCode;
use tracing_subscriber::EnvFilter;

mod student;

#[derive(Parser, Debug)]
#[command(name = "rollbook")]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: student::Command,

    /// Override the backend base URL
    #[arg(short, long, global = true)]
    backend: Option<String>,
}

fn main() -> ExitCode {
    setup_panic!();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let cfg = match CoreConfig::load() {
        Ok(cfg) => cfg,
        Err(err) => return fail(&err),
    };

    let roster = match &cli.backend {
        Some(url) => Roster::with_base_url(url),
        None => Roster::new(&cfg),
    };

    match student::handle(&roster, &cli.command) {
        Ok(()) => ExitCode::Ok,
        Err(err) => fail(&err),
    }
}

fn fail(err: &Error) -> ExitCode {
    eprintln!("{} {err}", "error:".red().bold());
    exit_code(err)
}

fn exit_code(err: &Error) -> ExitCode {
    match err {
        Error::Transport(_) => ExitCode::Unavailable,
        Error::Status { .. } => ExitCode::Protocol,
        Error::NoSuchStudent { .. }
        | Error::Unaddressable { .. }
        | Error::IdleSession
        | Error::InvalidAge(_) => ExitCode::DataErr,
        Error::ConfigRead { .. } | Error::ConfigParse { .. } => ExitCode::Config,
    }
}
