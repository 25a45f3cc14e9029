// src/main.rs

use std::process::ExitCode;

use env_logger::Env;
use log::error;

use sparse_calc::config::CalcConfig;
use sparse_calc::core::result_output::Presentation;
use sparse_calc::error::CliError;
use sparse_calc::matrix_cli;

fn main() -> ExitCode {
    match try_main() {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", matrix_cli::describe_error(&e));
            ExitCode::FAILURE
        }
    }
}

fn try_main() -> Result<Presentation, CliError> {
    let config = CalcConfig::load()?;

    // Initialize the logger
    let env = Env::default()
        .filter_or("SPARSE_CALC_LOG", config.log_level.as_str())
        .write_style_or("SPARSE_CALC_LOG_STYLE", "auto");
    env_logger::Builder::from_env(env).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    matrix_cli::run(&args, &config)
}
