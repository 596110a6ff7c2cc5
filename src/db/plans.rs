use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::{Row, params};

use crate::models::plan::Plan;

use super::Database;

const PLAN_COLUMNS: &str = "id, created_at, name, age, sex, height_cm, weight_kg, activity, goal, pace,
     bmi, bmr, tdee, target_calories, protein_g, carbs_g, fat_g, metrics_stale";

struct PlanRow {
    id: String,
    created_at: String,
    name: String,
    age: i32,
    sex: String,
    height_cm: f64,
    weight_kg: f64,
    activity: String,
    goal: String,
    pace: String,
    bmi: f64,
    bmr: f64,
    tdee: f64,
    target_calories: u32,
    protein_g: u32,
    carbs_g: u32,
    fat_g: u32,
    metrics_stale: bool,
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<PlanRow> {
    Ok(PlanRow {
        id: row.get(0)?,
        created_at: row.get(1)?,
        name: row.get(2)?,
        age: row.get(3)?,
        sex: row.get(4)?,
        height_cm: row.get(5)?,
        weight_kg: row.get(6)?,
        activity: row.get(7)?,
        goal: row.get(8)?,
        pace: row.get(9)?,
        bmi: row.get(10)?,
        bmr: row.get(11)?,
        tdee: row.get(12)?,
        target_calories: row.get(13)?,
        protein_g: row.get(14)?,
        carbs_g: row.get(15)?,
        fat_g: row.get(16)?,
        metrics_stale: row.get(17)?,
    })
}

fn row_to_plan(r: PlanRow) -> Result<Plan> {
    let created_at: DateTime<Utc> =
        DateTime::parse_from_rfc3339(&r.created_at)?.with_timezone(&Utc);
    Ok(Plan {
        id: r.id,
        created_at,
        name: r.name,
        age: r.age,
        sex: r.sex.parse()?,
        height_cm: r.height_cm,
        weight_kg: r.weight_kg,
        activity: r.activity.parse()?,
        goal: r.goal.parse()?,
        pace: r.pace.parse()?,
        bmi: r.bmi,
        bmr: r.bmr,
        tdee: r.tdee,
        target_calories: r.target_calories,
        protein_g: r.protein_g,
        carbs_g: r.carbs_g,
        fat_g: r.fat_g,
        profile_metrics_stale: r.metrics_stale,
    })
}

impl Database {
    /// Store a plan as the active one. Earlier plans stay as inactive history.
    pub fn save_plan(&self, p: &Plan) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("UPDATE plans SET active = 0 WHERE active = 1", [])?;
        tx.execute(
            &format!(
                "INSERT INTO plans ({}, active)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, 1)",
                PLAN_COLUMNS
            ),
            params![
                p.id,
                p.created_at.to_rfc3339(),
                p.name,
                p.age,
                p.sex.to_string(),
                p.height_cm,
                p.weight_kg,
                p.activity.to_string(),
                p.goal.to_string(),
                p.pace.to_string(),
                p.bmi,
                p.bmr,
                p.tdee,
                p.target_calories,
                p.protein_g,
                p.carbs_g,
                p.fat_g,
                p.profile_metrics_stale,
            ],
        )?;
        tx.commit()?;
        tracing::info!(plan_id = %p.id, calories = p.target_calories, "plan saved");
        Ok(())
    }

    pub fn active_plan(&self) -> Result<Option<Plan>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM plans WHERE active = 1 ORDER BY created_at DESC, rowid DESC LIMIT 1",
            PLAN_COLUMNS
        ))?;
        let mut rows = stmt.query_map([], read_row)?;
        match rows.next() {
            Some(row) => Ok(Some(row_to_plan(row?)?)),
            None => Ok(None),
        }
    }

    /// All stored plans, newest first.
    pub fn list_plans(&self, limit: Option<u32>) -> Result<Vec<Plan>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM plans ORDER BY created_at DESC, rowid DESC LIMIT ?1",
            PLAN_COLUMNS
        ))?;
        let limit = limit.map(i64::from).unwrap_or(-1);
        let rows = stmt.query_map(params![limit], read_row)?;

        let mut plans = Vec::new();
        for row in rows {
            plans.push(row_to_plan(row?)?);
        }
        Ok(plans)
    }

    /// Delete every stored plan. Returns the number removed.
    pub fn clear_plans(&self) -> Result<usize> {
        let count = self.conn.execute("DELETE FROM plans", [])?;
        Ok(count)
    }
}
