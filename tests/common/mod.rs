#![allow(dead_code)]

use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use platewise::db::Database;
use platewise::models::food::FoodItem;
use platewise::models::profile::{ActivityLevel, BiometricProfile, Goal, Pace, Sex};
use tempfile::TempDir;

/// Create a temporary database for testing.
pub fn setup_db() -> (TempDir, Database) {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("test.db");
    let db = Database::open(&db_path).unwrap();
    (dir, db)
}

/// 32-year-old male, 188 cm, 82 kg, moderately active, losing at moderate pace.
pub fn sample_profile() -> BiometricProfile {
    BiometricProfile {
        age: 32,
        sex: Sex::Male,
        height_cm: 188.0,
        weight_kg: 82.0,
        activity: ActivityLevel::Moderate,
        goal: Goal::LoseWeight,
        pace: Pace::Moderate,
    }
}

pub fn item(name: &str, grams: f64, calories: f64, protein: f64, carbs: f64, fat: f64) -> FoodItem {
    FoodItem::new(name.to_string(), grams, calories, protein, carbs, fat)
}

/// Local noon on `date`, as stored.
pub fn noon(date: NaiveDate) -> DateTime<Utc> {
    let dt = date.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap());
    Local
        .from_local_datetime(&dt)
        .earliest()
        .unwrap()
        .with_timezone(&Utc)
}
