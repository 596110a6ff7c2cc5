use anyhow::Result;
use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Deserialize;
use serde_json::json;

use platewise::core::session::Session;
use platewise::db::Database;
use platewise::models::config::Config;
use platewise::models::food::{FoodItem, MealEntry};
use platewise::output;
use platewise::output::human;

#[derive(Deserialize)]
pub struct NewItem {
    pub name: String,
    pub grams: f64,
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fat: f64,
    #[serde(default = "full_confidence")]
    pub confidence: f64,
}

fn full_confidence() -> f64 {
    1.0
}

impl NewItem {
    fn into_item(self) -> Result<FoodItem> {
        if self.name.trim().is_empty() {
            anyhow::bail!("item name must not be empty");
        }
        if !(self.grams > 0.0) {
            anyhow::bail!("grams must be positive: {}", self.grams);
        }
        for (field, value) in [
            ("calories", self.calories),
            ("protein", self.protein),
            ("carbs", self.carbs),
            ("fat", self.fat),
        ] {
            if !(value >= 0.0 && value.is_finite()) {
                anyhow::bail!("{} must not be negative: {}", field, value);
            }
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            anyhow::bail!("confidence must be between 0 and 1: {}", self.confidence);
        }
        let mut item = FoodItem::new(
            self.name.trim().to_string(),
            self.grams,
            self.calories,
            self.protein,
            self.carbs,
            self.fat,
        );
        item.confidence = self.confidence;
        Ok(item)
    }
}

/// Local noon on an overridden date, otherwise now.
fn meal_time(date: Option<NaiveDate>) -> DateTime<Utc> {
    date.and_then(|d| {
        Local
            .from_local_datetime(&d.and_time(NaiveTime::from_hms_opt(12, 0, 0)?))
            .earliest()
    })
    .map(|dt| dt.with_timezone(&Utc))
    .unwrap_or_else(Utc::now)
}

fn log_items(items: Vec<NewItem>, date: Option<NaiveDate>) -> Result<MealEntry> {
    let config = Config::load()?;
    let db = Database::open(&Config::db_path())?;

    let mut session = Session::new(config.goals.default_daily_calories);
    for i in items {
        session.add_detected_item(i.into_item()?);
    }
    let meal = session.commit_detected_items(meal_time(date))?;
    db.insert_meal(meal)?;
    Ok(meal.clone())
}

fn print_meal(meal: &MealEntry, human_flag: bool) -> Result<()> {
    if human_flag {
        for i in &meal.items {
            println!("Logged: {}", human::format_item(i));
        }
    } else {
        let out = output::success(
            "meal",
            json!({
                "meal": meal,
                "total_calories": meal.total_calories()
            }),
        );
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}

pub fn run_add(item: NewItem, date: Option<NaiveDate>, human_flag: bool) -> Result<()> {
    let meal = log_items(vec![item], date)?;
    print_meal(&meal, human_flag)
}

pub fn run_batch(batch_json: &str, date: Option<NaiveDate>, human_flag: bool) -> Result<()> {
    let items: Vec<NewItem> = serde_json::from_str(batch_json)?;
    let meal = log_items(items, date)?;
    print_meal(&meal, human_flag)
}

pub fn run_show(date: Option<NaiveDate>, human_flag: bool) -> Result<()> {
    let db = Database::open(&Config::db_path())?;
    let day = date.unwrap_or_else(|| Local::now().date_naive());
    let meals = db.meals_by_date(day)?;

    if human_flag {
        if meals.is_empty() {
            println!("No meals for {}", day);
        } else {
            println!("--- {} ---", day);
            println!("{}", human::format_meals(&meals));
        }
    } else {
        let out = output::success("meal", json!({ "date": day.to_string(), "meals": meals }));
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}

pub fn run_scale(item_id: &str, grams: f64, human_flag: bool) -> Result<()> {
    if !(grams > 0.0) {
        anyhow::bail!("grams must be positive: {}", grams);
    }
    let config = Config::load()?;
    let db = Database::open(&Config::db_path())?;

    let day = db
        .meal_date_for_item(item_id)?
        .ok_or_else(|| anyhow::anyhow!("item not found: {}", item_id))?;
    let mut session = Session::new(config.goals.default_daily_calories)
        .with_meals(db.meals_by_date(day)?);
    let meal_id = session
        .meal_for_item(item_id)
        .map(|m| m.id.clone())
        .ok_or_else(|| anyhow::anyhow!("item not found: {}", item_id))?;
    let updated = session
        .update_meal_item(&meal_id, item_id, grams)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("item not found: {}", item_id))?;
    db.update_meal_item(&updated)?;

    if human_flag {
        println!("Updated: {}", human::format_item(&updated));
    } else {
        let out = output::success("meal", json!({ "item": updated, "meal_id": meal_id }));
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}

pub fn run_remove(meal_id: &str, human_flag: bool) -> Result<()> {
    let db = Database::open(&Config::db_path())?;
    if !db.delete_meal(meal_id)? {
        anyhow::bail!("meal not found: {}", meal_id);
    }

    if human_flag {
        println!("Meal removed: {}", meal_id);
    } else {
        let out = output::success("meal", json!({ "removed": meal_id }));
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}
