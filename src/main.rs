use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{run, wait};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "shipwatch")]
#[command(version = VERSION)]
#[command(about = "Trigger a model deployment and report its outcome to CI")]
struct Cli {
    /// Print the machine-readable JSON envelope on stdout
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deploy a model build and follow it to a terminal state
    Run(run::RunArgs),
    /// Follow an already-created deployment to a terminal state
    Wait(wait::WaitArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let (result, exit_code) = commands::run_json(cli.command);

    match result {
        Ok(value) => {
            if cli.json {
                if let Err(err) = output::print_json_result(Ok(value)) {
                    output::print_human_error(&err);
                    return std::process::ExitCode::from(1);
                }
            }
        }
        Err(err) => {
            if cli.json {
                if output::print_json_result(Err(err)).is_err() {
                    return std::process::ExitCode::from(1);
                }
            } else {
                output::print_human_error(&err);
            }
        }
    }

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
