mod cli;
mod cmd;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands, ConfigAction, MealAction, PlanAction};
use platewise::core::profile::ValidationErrors;
use platewise::output;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let command = command_name(&cli.command);

    let result = match cli.command {
        Commands::Init { skip } => cmd::init::run(skip, cli.human),
        Commands::Plan { action } => match action {
            PlanAction::Compute { profile, dry_run } => {
                cmd::plan::run_compute(&profile, dry_run, cli.human)
            }
            PlanAction::Show => cmd::plan::run_show(cli.human),
            PlanAction::History { last } => cmd::plan::run_history(last, cli.human),
            PlanAction::SetGoal { calories } => cmd::plan::run_set_goal(calories, cli.human),
            PlanAction::Recompute => cmd::plan::run_recompute(cli.human),
            PlanAction::Reset => cmd::plan::run_reset(cli.human),
        },
        Commands::Calc { action } => cmd::calc::run(action, cli.human),
        Commands::Meal { action } => match action {
            MealAction::Add {
                name,
                grams,
                calories,
                protein,
                carbs,
                fat,
                confidence,
            } => cmd::meal::run_add(
                cmd::meal::NewItem {
                    name,
                    grams,
                    calories,
                    protein,
                    carbs,
                    fat,
                    confidence,
                },
                cli.date,
                cli.human,
            ),
            MealAction::Batch { json } => cmd::meal::run_batch(&json, cli.date, cli.human),
            MealAction::Show => cmd::meal::run_show(cli.date, cli.human),
            MealAction::Scale { item_id, grams } => {
                cmd::meal::run_scale(&item_id, grams, cli.human)
            }
            MealAction::Remove { meal_id } => cmd::meal::run_remove(&meal_id, cli.human),
        },
        Commands::Status => cmd::status::run(cli.date, cli.human),
        Commands::Config { action } => match action {
            ConfigAction::Show => cmd::config::run_show(cli.human),
            ConfigAction::Set { key, value } => cmd::config::run_set(&key, &value),
        },
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "platewise", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        let err = match e.downcast_ref::<ValidationErrors>() {
            Some(v) => output::validation_error(command, v),
            None => output::error(command, "general_error", &e.to_string()),
        };
        tracing::debug!(error = %e, "command failed");
        eprintln!("{}", err);
        process::exit(1);
    }
}

/// Logs go to stderr so stdout stays a single JSON document.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("PLATEWISE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn command_name(c: &Commands) -> &'static str {
    match c {
        Commands::Init { .. } => "init",
        Commands::Plan { .. } => "plan",
        Commands::Calc { .. } => "calc",
        Commands::Meal { .. } => "meal",
        Commands::Status => "status",
        Commands::Config { .. } => "config",
        Commands::Completions { .. } => "completions",
    }
}
