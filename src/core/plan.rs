//! Plan calculation service.
//!
//! Runs the full pipeline over a validated profile:
//! BMI -> BMR -> TDEE -> goal-adjusted calories -> macro split.
//! Every step is a pure function; the returned [`Plan`] is a fresh value.

use chrono::Utc;
use uuid::Uuid;

use crate::core::{body, energy, goal, macros};
use crate::core::units::round_to;
use crate::models::plan::Plan;
use crate::models::profile::BiometricProfile;

/// Intermediate pipeline values, useful for previews before a plan is saved.
#[derive(Debug, Clone, Copy, serde::Serialize, PartialEq)]
pub struct PlanFigures {
    pub bmi: f64,
    pub bmi_category: &'static str,
    pub bmr: f64,
    pub tdee: f64,
    pub adjusted_calories: f64,
    pub target_calories: u32,
    pub macros: macros::MacroSplit,
}

pub fn figures(profile: &BiometricProfile) -> PlanFigures {
    let bmi = round_to(body::bmi(profile.weight_kg, profile.height_cm), 2);
    let bmr = body::bmr(profile.weight_kg, profile.height_cm, profile.age, profile.sex);
    let tdee = energy::tdee(bmr, profile.activity);
    let adjusted = goal::adjusted_calories(tdee, profile.goal, profile.pace);
    let target = adjusted.round() as u32;
    PlanFigures {
        bmi,
        bmi_category: body::bmi_category(bmi),
        bmr,
        tdee,
        adjusted_calories: adjusted,
        target_calories: target,
        macros: macros::macro_split(target as f64),
    }
}

/// Compute a complete plan for `name` from a validated profile.
pub fn compute_plan(name: &str, profile: &BiometricProfile) -> Plan {
    let f = figures(profile);
    tracing::debug!(
        bmi = f.bmi,
        bmr = f.bmr,
        tdee = f.tdee,
        calories = f.target_calories,
        "plan computed"
    );

    let mut plan = Plan::new(name.trim().to_string(), profile);
    plan.bmi = f.bmi;
    plan.bmr = f.bmr;
    plan.tdee = f.tdee;
    plan.target_calories = f.target_calories;
    plan.protein_g = f.macros.protein;
    plan.carbs_g = f.macros.carbs;
    plan.fat_g = f.macros.fat;
    plan
}

/// Recompute a plan from its own profile fields, clearing any manual override.
pub fn recompute(plan: &Plan) -> Plan {
    compute_plan(&plan.name, &plan.profile())
}

/// Replace the daily target with a manually chosen calorie figure.
///
/// The figure is bounded to the supported range and the macro targets are
/// regenerated from it. BMI, BMR and TDEE are carried over unchanged and the
/// plan is flagged so readers know they no longer explain the target.
/// The result is a new plan record with its own id.
pub fn override_daily_goal(plan: &Plan, calories: f64) -> Plan {
    let bounded = goal::bound_daily_goal(calories);
    let target = bounded.round() as u32;
    let split = macros::macro_split(target as f64);
    tracing::debug!(requested = calories, calories = target, "daily goal overridden");
    Plan {
        id: Uuid::new_v4().to_string(),
        created_at: Utc::now(),
        target_calories: target,
        protein_g: split.protein,
        carbs_g: split.carbs,
        fat_g: split.fat,
        profile_metrics_stale: true,
        ..plan.clone()
    }
}
