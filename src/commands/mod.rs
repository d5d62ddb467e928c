//! Command layer: argument structs and handlers per subcommand.

pub type CmdResult<T> = shipwatch::Result<(T, i32)>;

pub mod run;
pub mod wait;

pub(crate) fn run_json(command: crate::Commands) -> (shipwatch::Result<serde_json::Value>, i32) {
    shipwatch::log_status!("cli", "shipwatch is working...");

    match command {
        crate::Commands::Run(args) => crate::output::map_cmd_result_to_json(run::run(&args)),
        crate::Commands::Wait(args) => crate::output::map_cmd_result_to_json(wait::run(&args)),
    }
}
