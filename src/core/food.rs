use serde::Serialize;

use crate::models::food::MealEntry;

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct NutritionTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// Sum nutrients across a set of meals.
pub fn day_totals(meals: &[MealEntry]) -> NutritionTotals {
    meals.iter().fold(NutritionTotals::default(), |acc, m| NutritionTotals {
        calories: acc.calories + m.total_calories(),
        protein: acc.protein + m.total_protein(),
        carbs: acc.carbs + m.total_carbs(),
        fat: acc.fat + m.total_fat(),
    })
}

/// Fraction of the daily goal consumed, capped at 1. Zero for a non-positive goal.
pub fn calorie_progress(consumed: f64, goal: f64) -> f64 {
    if goal <= 0.0 {
        return 0.0;
    }
    (consumed / goal).min(1.0)
}
