//! Mutable, user-facing state around the pure plan engine.
//!
//! A `Session` owns the active plan, the daily calorie goal, the day's meals
//! and the items waiting to be logged. Item edits always replace the stored
//! value with a rescaled copy.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::food::{self, NutritionTotals};
use crate::core::goal::bound_daily_goal;
use crate::core::macros::MacroSplit;
use crate::core::plan::override_daily_goal;
use crate::models::food::{FoodItem, MealEntry};
use crate::models::plan::Plan;

#[derive(Debug, Clone)]
pub struct Session {
    plan: Option<Plan>,
    daily_goal: f64,
    meals: Vec<MealEntry>,
    detected: Vec<FoodItem>,
}

#[derive(Debug, Serialize)]
pub struct DaySummary {
    pub daily_goal: f64,
    pub consumed: NutritionTotals,
    pub remaining_calories: f64,
    pub progress: f64,
    pub macro_targets: Option<MacroSplit>,
    pub meal_count: usize,
    pub last_meal: Option<LastMeal>,
}

#[derive(Debug, Serialize)]
pub struct LastMeal {
    pub title: String,
    pub calories: f64,
}

impl Session {
    /// Start a session on `default_goal`, bounded like a manual goal.
    pub fn new(default_goal: f64) -> Self {
        Self {
            plan: None,
            daily_goal: bound_daily_goal(default_goal),
            meals: Vec::new(),
            detected: Vec::new(),
        }
    }

    pub fn with_meals(mut self, meals: Vec<MealEntry>) -> Self {
        self.meals = meals;
        self
    }

    pub fn plan(&self) -> Option<&Plan> {
        self.plan.as_ref()
    }

    pub fn daily_goal(&self) -> f64 {
        self.daily_goal
    }

    pub fn meals(&self) -> &[MealEntry] {
        &self.meals
    }

    pub fn detected(&self) -> &[FoodItem] {
        &self.detected
    }

    /// Adopt a plan; the daily goal follows its target.
    pub fn apply_plan(&mut self, plan: Plan) {
        self.daily_goal = plan.target_calories as f64;
        self.plan = Some(plan);
    }

    /// Set the daily goal by hand. An active plan is replaced by its
    /// overridden copy, which is returned for persistence.
    pub fn update_daily_goal(&mut self, value: f64) -> Option<&Plan> {
        let bounded = bound_daily_goal(value);
        self.daily_goal = bounded;
        let updated = self.plan.as_ref().map(|p| override_daily_goal(p, bounded))?;
        self.plan = Some(updated);
        self.plan.as_ref()
    }

    pub fn add_detected_item(&mut self, item: FoodItem) {
        self.detected.push(item);
    }

    /// Rescale a pending item. Returns false when the id is unknown.
    pub fn update_detected_item(&mut self, item_id: &str, grams: f64) -> bool {
        match self.detected.iter_mut().find(|i| i.id == item_id) {
            Some(slot) => {
                *slot = slot.adjusted(grams);
                true
            }
            None => false,
        }
    }

    /// Rescale an item inside a logged meal, returning the new item.
    pub fn update_meal_item(&mut self, meal_id: &str, item_id: &str, grams: f64) -> Option<&FoodItem> {
        let meal = self.meals.iter_mut().find(|m| m.id == meal_id)?;
        let slot = meal.items.iter_mut().find(|i| i.id == item_id)?;
        *slot = slot.adjusted(grams);
        Some(&*slot)
    }

    /// Find the meal holding `item_id`.
    pub fn meal_for_item(&self, item_id: &str) -> Option<&MealEntry> {
        self.meals
            .iter()
            .find(|m| m.items.iter().any(|i| i.id == item_id))
    }

    /// Move all pending items into a new meal stamped `at`.
    pub fn commit_detected_items(&mut self, at: DateTime<Utc>) -> Result<&MealEntry> {
        if self.detected.is_empty() {
            anyhow::bail!("No items detected yet.");
        }
        let mut meal = MealEntry::new(std::mem::take(&mut self.detected));
        meal.timestamp = at;
        self.meals.push(meal);
        let idx = self.meals.len() - 1;
        Ok(&self.meals[idx])
    }

    pub fn remove_meal(&mut self, meal_id: &str) -> bool {
        let before = self.meals.len();
        self.meals.retain(|m| m.id != meal_id);
        self.meals.len() != before
    }

    pub fn consumed(&self) -> NutritionTotals {
        food::day_totals(&self.meals)
    }

    pub fn summary(&self) -> DaySummary {
        let consumed = self.consumed();
        let last_meal = self
            .meals
            .iter()
            .max_by_key(|m| m.timestamp)
            .map(|m| LastMeal {
                title: m.title(),
                calories: m.total_calories(),
            });
        DaySummary {
            daily_goal: self.daily_goal,
            consumed,
            remaining_calories: (self.daily_goal - consumed.calories).max(0.0),
            progress: food::calorie_progress(consumed.calories, self.daily_goal),
            macro_targets: self.plan.as_ref().map(|p| MacroSplit {
                protein: p.protein_g,
                carbs: p.carbs_g,
                fat: p.fat_g,
            }),
            meal_count: self.meals.len(),
            last_meal,
        }
    }
}
