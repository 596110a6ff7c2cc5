use anyhow::Result;
use chrono::{Local, NaiveDate};
use serde_json::json;

use platewise::core::session::Session;
use platewise::db::Database;
use platewise::models::config::Config;
use platewise::output;
use platewise::output::human;

pub fn run(date: Option<NaiveDate>, human_flag: bool) -> Result<()> {
    let config = Config::load()?;
    let db = Database::open(&Config::db_path())?;
    let day = date.unwrap_or_else(|| Local::now().date_naive());

    let mut session =
        Session::new(config.goals.default_daily_calories).with_meals(db.meals_by_date(day)?);
    if let Some(plan) = db.active_plan()? {
        session.apply_plan(plan);
    }
    let summary = session.summary();

    if human_flag {
        println!("{}", human::format_summary(&day.to_string(), &summary));
    } else {
        let out = output::success(
            "status",
            json!({
                "date": day.to_string(),
                "summary": summary,
                "plan_id": session.plan().map(|p| p.id.clone())
            }),
        );
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}
