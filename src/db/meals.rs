use anyhow::Result;
use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use rusqlite::params;

use crate::models::food::{FoodItem, MealEntry};

use super::Database;

struct ItemRow {
    meal_id: String,
    item: FoodItem,
}

impl Database {
    pub fn insert_meal(&self, meal: &MealEntry) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO meals (id, timestamp) VALUES (?1, ?2)",
            params![meal.id, meal.timestamp.to_rfc3339()],
        )?;
        for (pos, item) in meal.items.iter().enumerate() {
            tx.execute(
                "INSERT INTO meal_items
                 (id, meal_id, position, name, confidence, grams, calories, protein, carbs, fat)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    item.id,
                    meal.id,
                    pos as i64,
                    item.name,
                    item.confidence,
                    item.grams,
                    item.calories,
                    item.protein,
                    item.carbs,
                    item.fat,
                ],
            )?;
        }
        tx.commit()?;
        tracing::info!(meal_id = %meal.id, items = meal.items.len(), "meal stored");
        Ok(())
    }

    /// Meals eaten on the local calendar day `date`, oldest first.
    pub fn meals_by_date(&self, date: NaiveDate) -> Result<Vec<MealEntry>> {
        self.meals_on_day(date, &Local)
    }

    /// Meals eaten on calendar day `date` in `tz`, oldest first.
    pub fn meals_on_day<Tz: TimeZone>(&self, date: NaiveDate, tz: &Tz) -> Result<Vec<MealEntry>> {
        let start = day_start(date, tz);
        let end = day_start(date.succ_opt().unwrap_or(date), tz);
        let (start, end) = (utc_key(&start), utc_key(&end));
        let mut stmt = self.conn.prepare(
            "SELECT id, timestamp FROM meals
             WHERE timestamp >= ?1 AND timestamp < ?2 ORDER BY timestamp",
        )?;
        let rows = stmt.query_map(params![start, end], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut meals = Vec::new();
        for row in rows {
            let (id, ts) = row?;
            let timestamp: DateTime<Utc> = DateTime::parse_from_rfc3339(&ts)?.with_timezone(&Utc);
            meals.push(MealEntry {
                id,
                timestamp,
                items: Vec::new(),
            });
        }

        for item in self.items_for_date(&start, &end)? {
            if let Some(meal) = meals.iter_mut().find(|m| m.id == item.meal_id) {
                meal.items.push(item.item);
            }
        }
        Ok(meals)
    }

    fn items_for_date(&self, start: &str, end: &str) -> Result<Vec<ItemRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT i.id, i.meal_id, i.name, i.confidence, i.grams, i.calories, i.protein, i.carbs, i.fat
             FROM meal_items i JOIN meals m ON m.id = i.meal_id
             WHERE m.timestamp >= ?1 AND m.timestamp < ?2
             ORDER BY i.meal_id, i.position",
        )?;
        let rows = stmt.query_map(params![start, end], |row| {
            Ok(ItemRow {
                meal_id: row.get(1)?,
                item: FoodItem {
                    id: row.get(0)?,
                    name: row.get(2)?,
                    confidence: row.get(3)?,
                    grams: row.get(4)?,
                    calories: row.get(5)?,
                    protein: row.get(6)?,
                    carbs: row.get(7)?,
                    fat: row.get(8)?,
                },
            })
        })?;

        let mut items = Vec::new();
        for row in rows {
            items.push(row?);
        }
        Ok(items)
    }

    /// Write back a rescaled item. Returns false when the item does not exist.
    pub fn update_meal_item(&self, item: &FoodItem) -> Result<bool> {
        let count = self.conn.execute(
            "UPDATE meal_items
             SET grams = ?2, calories = ?3, protein = ?4, carbs = ?5, fat = ?6
             WHERE id = ?1",
            params![
                item.id,
                item.grams,
                item.calories,
                item.protein,
                item.carbs,
                item.fat,
            ],
        )?;
        Ok(count > 0)
    }

    /// Local calendar date of the meal that owns `item_id`, if any.
    pub fn meal_date_for_item(&self, item_id: &str) -> Result<Option<NaiveDate>> {
        let mut stmt = self.conn.prepare(
            "SELECT m.timestamp FROM meals m JOIN meal_items i ON i.meal_id = m.id
             WHERE i.id = ?1",
        )?;
        let mut rows = stmt.query_map(params![item_id], |row| row.get::<_, String>(0))?;
        match rows.next() {
            Some(ts) => {
                let ts = DateTime::parse_from_rfc3339(&ts?)?.with_timezone(&Utc);
                Ok(Some(ts.with_timezone(&Local).date_naive()))
            }
            None => Ok(None),
        }
    }

    pub fn delete_meal(&self, meal_id: &str) -> Result<bool> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM meal_items WHERE meal_id = ?1", params![meal_id])?;
        let count = tx.execute("DELETE FROM meals WHERE id = ?1", params![meal_id])?;
        tx.commit()?;
        Ok(count > 0)
    }
}

/// First instant of `date` in `tz`. Falls back to UTC midnight when local
/// midnight does not exist.
fn day_start<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&midnight)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
}

/// Prefix comparable with stored RFC 3339 timestamps.
fn utc_key(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S").to_string()
}
