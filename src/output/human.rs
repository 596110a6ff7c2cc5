use chrono::Local;
use colored::Colorize;
use comfy_table::{Cell, Table, presets::UTF8_FULL};

use crate::core::body::BmiCategory;
use crate::core::session::DaySummary;
use crate::core::units;
use crate::models::config::Units;
use crate::models::food::{FoodItem, MealEntry};
use crate::models::plan::Plan;
use crate::models::profile::{HeightUnit, WeightUnit};

/// Height in the user's preferred unit system.
pub fn format_height(cm: f64, u: &Units) -> String {
    match u.height {
        HeightUnit::Metric => format!("{:.0} cm", cm),
        HeightUnit::Imperial => {
            let (feet, inches) = units::centimeters_to_feet_inches(cm);
            format!("{}'{}\"", feet, inches)
        }
    }
}

pub fn format_weight(kg: f64, u: &Units) -> String {
    match u.weight {
        WeightUnit::Metric => format!("{:.1} kg", kg),
        WeightUnit::Imperial => format!("{:.1} lb", units::kilograms_to_pounds(kg)),
    }
}

fn colored_category(bmi: f64) -> String {
    let category = BmiCategory::from_bmi(bmi);
    match category {
        BmiCategory::Normal => category.label().green().to_string(),
        BmiCategory::Underweight | BmiCategory::Overweight => {
            category.label().yellow().to_string()
        }
        BmiCategory::Obese => category.label().red().to_string(),
    }
}

/// Pretty-print a plan.
pub fn format_plan(p: &Plan, u: &Units) -> String {
    let mut out = format!("=== Plan for {} ===\n", p.name);
    out.push_str(&format!(
        "{}, {} | {} | {}\n",
        p.age,
        p.sex.label(),
        format_height(p.height_cm, u),
        format_weight(p.weight_kg, u)
    ));
    out.push_str(&format!(
        "Activity: {} | Goal: {} ({} pace)\n\n",
        p.activity.label(),
        p.goal.label(),
        p.pace.label()
    ));

    let stale = if p.profile_metrics_stale {
        " (before manual goal)"
    } else {
        ""
    };
    out.push_str(&format!(
        "BMI: {:.2} ({}){}\nBMR: {:.0} kcal | TDEE: {:.0} kcal{}\n\n",
        p.bmi,
        colored_category(p.bmi),
        stale,
        p.bmr,
        p.tdee,
        stale
    ));

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Daily target", "Protein", "Carbs", "Fat"]);
    table.add_row(vec![
        Cell::new(format!("{} kcal", p.target_calories)),
        Cell::new(format!("{} g", p.protein_g)),
        Cell::new(format!("{} g", p.carbs_g)),
        Cell::new(format!("{} g", p.fat_g)),
    ]);
    out.push_str(&table.to_string());
    out
}

/// One line per stored plan, newest first.
pub fn format_plan_line(p: &Plan) -> String {
    let mut line = format!(
        "{} | {} | {} kcal (P {} / C {} / F {})",
        p.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
        p.name,
        p.target_calories,
        p.protein_g,
        p.carbs_g,
        p.fat_g
    );
    if p.profile_metrics_stale {
        line.push_str("  [manual]");
    }
    line
}

pub fn format_item(i: &FoodItem) -> String {
    format!(
        "{} {:.0} g: {:.0} kcal, P {:.1} g, C {:.1} g, F {:.1} g  ({})",
        i.name, i.grams, i.calories, i.protein, i.carbs, i.fat, i.id
    )
}

pub fn format_meals(meals: &[MealEntry]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Time", "Item", "Grams", "kcal", "P", "C", "F", "Id"]);
    for m in meals {
        for i in &m.items {
            table.add_row(vec![
                Cell::new(m.timestamp.with_timezone(&Local).format("%H:%M")),
                Cell::new(&i.name),
                Cell::new(format!("{:.0}", i.grams)),
                Cell::new(format!("{:.0}", i.calories)),
                Cell::new(format!("{:.1}", i.protein)),
                Cell::new(format!("{:.1}", i.carbs)),
                Cell::new(format!("{:.1}", i.fat)),
                Cell::new(&i.id),
            ]);
        }
    }
    table.to_string()
}

/// Pretty-print today's progress against the daily goal.
pub fn format_summary(date: &str, s: &DaySummary) -> String {
    let mut out = format!("=== {} ===\n", date);
    out.push_str(&format!(
        "Calories: {:.0} / {:.0} kcal ({:.0}%), {:.0} remaining\n",
        s.consumed.calories,
        s.daily_goal,
        s.progress * 100.0,
        s.remaining_calories
    ));
    match s.macro_targets {
        Some(t) => out.push_str(&format!(
            "Protein: {:.0}/{} g | Carbs: {:.0}/{} g | Fat: {:.0}/{} g",
            s.consumed.protein, t.protein, s.consumed.carbs, t.carbs, s.consumed.fat, t.fat
        )),
        None => out.push_str(&format!(
            "Protein: {:.0} g | Carbs: {:.0} g | Fat: {:.0} g (no plan yet)",
            s.consumed.protein, s.consumed.carbs, s.consumed.fat
        )),
    }
    if let Some(ref last) = s.last_meal {
        out.push_str(&format!("\nLast meal: {} ({:.0} kcal)", last.title, last.calories));
    }
    out
}
