use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::profile::{ActivityLevel, BiometricProfile, Goal, Pace, Sex};

/// A computed daily nutrition plan.
///
/// Field names on the wire follow the persisted record layout
/// (`heightCM`, `targetCalories`, `proteinG`, ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub name: String,
    pub age: i32,
    pub sex: Sex,
    #[serde(rename = "heightCM")]
    pub height_cm: f64,
    #[serde(rename = "weightKG")]
    pub weight_kg: f64,
    pub activity: ActivityLevel,
    pub goal: Goal,
    pub pace: Pace,
    pub bmi: f64,
    pub bmr: f64,
    pub tdee: f64,
    pub target_calories: u32,
    #[serde(rename = "proteinG")]
    pub protein_g: u32,
    #[serde(rename = "carbsG")]
    pub carbs_g: u32,
    #[serde(rename = "fatG")]
    pub fat_g: u32,
    /// Set after a manual daily-goal override: bmi/bmr/tdee no longer
    /// describe how `target_calories` was reached.
    #[serde(default)]
    pub profile_metrics_stale: bool,
}

impl Plan {
    pub fn new(name: String, profile: &BiometricProfile) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            name,
            age: profile.age,
            sex: profile.sex,
            height_cm: profile.height_cm,
            weight_kg: profile.weight_kg,
            activity: profile.activity,
            goal: profile.goal,
            pace: profile.pace,
            bmi: 0.0,
            bmr: 0.0,
            tdee: 0.0,
            target_calories: 0,
            protein_g: 0,
            carbs_g: 0,
            fat_g: 0,
            profile_metrics_stale: false,
        }
    }

    pub fn profile(&self) -> BiometricProfile {
        BiometricProfile {
            age: self.age,
            sex: self.sex,
            height_cm: self.height_cm,
            weight_kg: self.weight_kg,
            activity: self.activity,
            goal: self.goal,
            pace: self.pace,
        }
    }

    /// Energy implied by the macro targets (4/4/9 kcal per gram).
    pub fn macro_energy(&self) -> u64 {
        crate::core::macros::MacroSplit {
            protein: self.protein_g,
            carbs: self.carbs_g,
            fat: self.fat_g,
        }
        .energy()
    }
}
