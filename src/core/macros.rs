use serde::Serialize;

pub const PROTEIN_SHARE: f64 = 0.30;
pub const CARBS_SHARE: f64 = 0.40;
pub const FAT_SHARE: f64 = 0.30;

pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
pub const KCAL_PER_G_CARBS: f64 = 4.0;
pub const KCAL_PER_G_FAT: f64 = 9.0;

/// Daily macro targets in whole grams.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct MacroSplit {
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
}

impl MacroSplit {
    /// Energy implied by the gram targets. Summed in `u64` so any gram
    /// figure fits.
    pub fn energy(&self) -> u64 {
        u64::from(self.protein) * 4 + u64::from(self.carbs) * 4 + u64::from(self.fat) * 9
    }
}

/// Split a calorie budget 30/40/30 across protein, carbs and fat.
///
/// Grams are rounded half away from zero. Non-positive budgets give zeros;
/// a gram figure past `u32::MAX` saturates there.
pub fn macro_split(calories: f64) -> MacroSplit {
    let calories = if calories.is_nan() { 0.0 } else { calories.max(0.0) };
    MacroSplit {
        protein: to_grams(calories * PROTEIN_SHARE, KCAL_PER_G_PROTEIN),
        carbs: to_grams(calories * CARBS_SHARE, KCAL_PER_G_CARBS),
        fat: to_grams(calories * FAT_SHARE, KCAL_PER_G_FAT),
    }
}

fn to_grams(kcal: f64, kcal_per_gram: f64) -> u32 {
    (kcal / kcal_per_gram).round() as u32
}
