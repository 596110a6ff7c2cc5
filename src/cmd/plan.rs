use anyhow::Result;
use serde_json::json;

use platewise::core::plan;
use platewise::core::profile::ProfileDraft;
use platewise::core::session::Session;
use platewise::core::units::parse_feet_inches;
use platewise::db::Database;
use platewise::models::config::{Config, Units};
use platewise::models::plan::Plan;
use platewise::models::profile::{HeightUnit, WeightUnit};
use platewise::output;
use platewise::output::human;

use crate::cli::ProfileArgs;

/// Build an unvalidated draft from command-line profile arguments.
pub fn draft_from_args(args: &ProfileArgs, units: &Units) -> ProfileDraft {
    let height_unit = args.height_unit.unwrap_or(units.height);
    let weight_unit = args.weight_unit.unwrap_or(units.weight);

    let mut draft = ProfileDraft {
        name: args.name.clone(),
        age: args.age.clone(),
        sex: args.sex,
        height_unit,
        weight_unit,
        activity: args.activity,
        goal: args.goal,
        pace: args.pace,
        ..ProfileDraft::default()
    };

    match height_unit {
        HeightUnit::Metric => draft.height_cm = args.height.clone(),
        HeightUnit::Imperial => match parse_feet_inches(&args.height) {
            Some((feet, inches)) => {
                draft.height_feet = feet.to_string();
                draft.height_inches = inches.to_string();
            }
            // a bare number is read as feet
            None => draft.height_feet = args.height.clone(),
        },
    }
    match weight_unit {
        WeightUnit::Metric => draft.weight_kg = args.weight.clone(),
        WeightUnit::Imperial => draft.weight_lbs = args.weight.clone(),
    }
    draft
}

fn print_plan(p: &Plan, units: &Units, saved: bool, human_flag: bool) -> Result<()> {
    if human_flag {
        println!("{}", human::format_plan(p, units));
    } else {
        let out = output::success(
            "plan",
            json!({
                "plan": p,
                "bmi_category": platewise::core::body::bmi_category(p.bmi),
                "saved": saved
            }),
        );
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}

fn require_active(db: &Database) -> Result<Plan> {
    db.active_plan()?
        .ok_or_else(|| anyhow::anyhow!("no active plan; run `platewise plan compute` first"))
}

pub fn run_compute(args: &ProfileArgs, dry_run: bool, human_flag: bool) -> Result<()> {
    let config = Config::load()?;
    let profile = draft_from_args(args, &config.units).validate()?;
    let p = plan::compute_plan(&args.name, &profile);

    if !dry_run {
        let db = Database::open(&Config::db_path())?;
        db.save_plan(&p)?;
    }
    print_plan(&p, &config.units, !dry_run, human_flag)
}

pub fn run_show(human_flag: bool) -> Result<()> {
    let config = Config::load()?;
    let db = Database::open(&Config::db_path())?;
    let p = require_active(&db)?;
    print_plan(&p, &config.units, true, human_flag)
}

pub fn run_history(last: Option<u32>, human_flag: bool) -> Result<()> {
    let db = Database::open(&Config::db_path())?;
    let plans = db.list_plans(last)?;

    if human_flag {
        if plans.is_empty() {
            println!("No plans stored.");
        }
        for p in &plans {
            println!("{}", human::format_plan_line(p));
        }
    } else {
        let out = output::success("plan", json!({ "plans": plans }));
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}

/// Manual daily goal. With an active plan the macros follow the new figure;
/// without one the configured default goal is updated instead.
pub fn run_set_goal(calories: f64, human_flag: bool) -> Result<()> {
    let mut config = Config::load()?;
    let db = Database::open(&Config::db_path())?;

    let mut session = Session::new(config.goals.default_daily_calories);
    if let Some(active) = db.active_plan()? {
        session.apply_plan(active);
    }

    match session.update_daily_goal(calories).cloned() {
        Some(updated) => {
            db.save_plan(&updated)?;
            tracing::info!(calories = updated.target_calories, "manual daily goal applied");
            print_plan(&updated, &config.units, true, human_flag)
        }
        None => {
            config.goals.default_daily_calories = session.daily_goal();
            config.save()?;
            if human_flag {
                println!("Daily goal set to {:.0} kcal", session.daily_goal());
            } else {
                let out = output::success(
                    "plan",
                    json!({ "daily_goal": session.daily_goal(), "plan": null }),
                );
                println!("{}", serde_json::to_string(&out)?);
            }
            Ok(())
        }
    }
}

pub fn run_recompute(human_flag: bool) -> Result<()> {
    let config = Config::load()?;
    let db = Database::open(&Config::db_path())?;
    let fresh = plan::recompute(&require_active(&db)?);
    db.save_plan(&fresh)?;
    print_plan(&fresh, &config.units, true, human_flag)
}

pub fn run_reset(human_flag: bool) -> Result<()> {
    let db = Database::open(&Config::db_path())?;
    let removed = db.clear_plans()?;
    if human_flag {
        println!("Removed {} plan(s)", removed);
    } else {
        let out = output::success("plan", json!({ "removed": removed }));
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}
