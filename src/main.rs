use anyhow::Result;
use clap::Parser;

use pathbox::args::PathContext;
use pathbox::cli::Cli;
use pathbox::config::Config;
use pathbox::launch::{self, plan_launch};
use pathbox::logging::init_tracing;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    let mut config = Config::load_from(&cli.config_path())?;
    config.apply_env();
    cli.apply_to(&mut config);
    config.validate()?;

    let ctx = PathContext::from_env();
    let plan = plan_launch(&config, &cli.command, &ctx, cli.terminal_mode());
    for warning in &plan.warnings {
        tracing::warn!("{}", warning);
    }

    if cli.dry_run {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(0);
    }

    tracing::debug!(program = %plan.program, args = ?plan.args, "starting container");
    match launch::run(&plan) {
        Ok(code) => Ok(code),
        Err(err) => {
            eprintln!("Error: {}", err);
            Ok(err.exit_code())
        }
    }
}
