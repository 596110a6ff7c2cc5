use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single food on a plate: serving size in grams plus the nutrients for that serving.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodItem {
    pub id: String,
    pub name: String,
    /// Detection confidence (0-1). Provenance only.
    pub confidence: f64,
    pub grams: f64,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl FoodItem {
    pub fn new(name: String, grams: f64, calories: f64, protein: f64, carbs: f64, fat: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            confidence: 1.0,
            grams,
            calories,
            protein,
            carbs,
            fat,
        }
    }

    pub fn calories_per_gram(&self) -> f64 {
        if self.grams == 0.0 {
            0.0
        } else {
            self.calories / self.grams
        }
    }

    /// Return a copy rescaled to `grams`, keeping every nutrient proportional.
    ///
    /// An item with a zero serving size has no ratio to scale by, so only the
    /// gram value changes.
    pub fn adjusted(&self, grams: f64) -> Self {
        let multiplier = if self.grams == 0.0 {
            1.0
        } else {
            grams / self.grams
        };
        Self {
            grams,
            calories: self.calories * multiplier,
            protein: self.protein * multiplier,
            carbs: self.carbs * multiplier,
            fat: self.fat * multiplier,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MealEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub items: Vec<FoodItem>,
}

impl MealEntry {
    pub fn new(items: Vec<FoodItem>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            items,
        }
    }

    pub fn total_calories(&self) -> f64 {
        self.items.iter().map(|i| i.calories).sum()
    }

    pub fn total_protein(&self) -> f64 {
        self.items.iter().map(|i| i.protein).sum()
    }

    pub fn total_carbs(&self) -> f64 {
        self.items.iter().map(|i| i.carbs).sum()
    }

    pub fn total_fat(&self) -> f64 {
        self.items.iter().map(|i| i.fat).sum()
    }

    /// Short title from the first two item names.
    pub fn title(&self) -> String {
        let names: Vec<&str> = self.items.iter().take(2).map(|i| i.name.as_str()).collect();
        if names.is_empty() {
            format!(
                "Meal at {}",
                self.timestamp.with_timezone(&Local).format("%H:%M")
            )
        } else {
            names.join(", ")
        }
    }
}
