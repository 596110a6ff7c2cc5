use anyhow::Result;
use rusqlite::Connection;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS plans (
            id               TEXT PRIMARY KEY,
            created_at       TEXT NOT NULL,
            name             TEXT NOT NULL,
            age              INTEGER NOT NULL,
            sex              TEXT NOT NULL,
            height_cm        REAL NOT NULL,
            weight_kg        REAL NOT NULL,
            activity         TEXT NOT NULL,
            goal             TEXT NOT NULL,
            pace             TEXT NOT NULL,
            bmi              REAL NOT NULL,
            bmr              REAL NOT NULL,
            tdee             REAL NOT NULL,
            target_calories  INTEGER NOT NULL,
            protein_g        INTEGER NOT NULL,
            carbs_g          INTEGER NOT NULL,
            fat_g            INTEGER NOT NULL,
            metrics_stale    INTEGER NOT NULL DEFAULT 0,
            active           INTEGER NOT NULL DEFAULT 1
        );
        CREATE INDEX IF NOT EXISTS idx_plans_active ON plans(active, created_at);

        CREATE TABLE IF NOT EXISTS meals (
            id         TEXT PRIMARY KEY,
            timestamp  TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_meals_ts ON meals(timestamp);

        CREATE TABLE IF NOT EXISTS meal_items (
            id          TEXT PRIMARY KEY,
            meal_id     TEXT NOT NULL REFERENCES meals(id) ON DELETE CASCADE,
            position    INTEGER NOT NULL,
            name        TEXT NOT NULL,
            confidence  REAL NOT NULL,
            grams       REAL NOT NULL,
            calories    REAL NOT NULL,
            protein     REAL NOT NULL,
            carbs       REAL NOT NULL,
            fat         REAL NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_meal_items_meal ON meal_items(meal_id, position);",
    )?;
    Ok(())
}
