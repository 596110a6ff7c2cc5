use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
    Other,
}

impl Sex {
    pub const ALL: [Sex; 3] = [Sex::Male, Sex::Female, Sex::Other];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Male => write!(f, "male"),
            Self::Female => write!(f, "female"),
            Self::Other => write!(f, "other"),
        }
    }
}

impl FromStr for Sex {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            "other" => Ok(Self::Other),
            _ => anyhow::bail!("invalid sex: {} (expected male/female/other)", s),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
        ActivityLevel::VeryActive,
    ];

    /// TDEE multiplier applied to BMR.
    pub fn multiplier(&self) -> f64 {
        match self {
            Self::Sedentary => 1.2,
            Self::Light => 1.375,
            Self::Moderate => 1.55,
            Self::Active => 1.725,
            Self::VeryActive => 1.9,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Sedentary => "Sedentary",
            Self::Light => "Lightly Active",
            Self::Moderate => "Moderately Active",
            Self::Active => "Active",
            Self::VeryActive => "Very Active",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Sedentary => "Little or no exercise, mostly sitting or desk work.",
            Self::Light => "Light exercise or activity 1-3 days per week.",
            Self::Moderate => "Moderate exercise 3-5 days per week.",
            Self::Active => "Hard exercise 6-7 days per week.",
            Self::VeryActive => "Intense daily training or a physical job.",
        }
    }
}

impl std::fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sedentary => write!(f, "sedentary"),
            Self::Light => write!(f, "light"),
            Self::Moderate => write!(f, "moderate"),
            Self::Active => write!(f, "active"),
            Self::VeryActive => write!(f, "very_active"),
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "sedentary" => Ok(Self::Sedentary),
            "light" => Ok(Self::Light),
            "moderate" => Ok(Self::Moderate),
            "active" => Ok(Self::Active),
            "very_active" => Ok(Self::VeryActive),
            _ => anyhow::bail!(
                "invalid activity level: {} (expected sedentary/light/moderate/active/very_active)",
                s
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    LoseWeight,
    Maintain,
    GainMuscle,
}

impl Goal {
    pub const ALL: [Goal; 3] = [Goal::LoseWeight, Goal::Maintain, Goal::GainMuscle];

    pub fn label(&self) -> &'static str {
        match self {
            Self::LoseWeight => "Lose Weight",
            Self::Maintain => "Maintain",
            Self::GainMuscle => "Gain Muscle",
        }
    }
}

impl std::fmt::Display for Goal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LoseWeight => write!(f, "lose_weight"),
            Self::Maintain => write!(f, "maintain"),
            Self::GainMuscle => write!(f, "gain_muscle"),
        }
    }
}

impl FromStr for Goal {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "lose_weight" => Ok(Self::LoseWeight),
            "maintain" => Ok(Self::Maintain),
            "gain_muscle" => Ok(Self::GainMuscle),
            _ => anyhow::bail!(
                "invalid goal: {} (expected lose_weight/maintain/gain_muscle)",
                s
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Pace {
    Slow,
    Moderate,
    Fast,
}

impl Pace {
    pub const ALL: [Pace; 3] = [Pace::Slow, Pace::Moderate, Pace::Fast];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Slow => "Slow",
            Self::Moderate => "Moderate",
            Self::Fast => "Fast",
        }
    }
}

impl std::fmt::Display for Pace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Slow => write!(f, "slow"),
            Self::Moderate => write!(f, "moderate"),
            Self::Fast => write!(f, "fast"),
        }
    }
}

impl FromStr for Pace {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "slow" => Ok(Self::Slow),
            "moderate" => Ok(Self::Moderate),
            "fast" => Ok(Self::Fast),
            _ => anyhow::bail!("invalid pace: {} (expected slow/moderate/fast)", s),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HeightUnit {
    #[default]
    Metric,
    Imperial,
}

impl HeightUnit {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Metric => "cm",
            Self::Imperial => "ft / in",
        }
    }
}

impl std::fmt::Display for HeightUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Metric => write!(f, "metric"),
            Self::Imperial => write!(f, "imperial"),
        }
    }
}

impl FromStr for HeightUnit {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "metric" | "cm" => Ok(Self::Metric),
            "imperial" | "ft" => Ok(Self::Imperial),
            _ => anyhow::bail!("invalid height unit: {} (expected metric/imperial)", s),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WeightUnit {
    #[default]
    Metric,
    Imperial,
}

impl WeightUnit {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Metric => "kg",
            Self::Imperial => "lb",
        }
    }
}

impl std::fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Metric => write!(f, "metric"),
            Self::Imperial => write!(f, "imperial"),
        }
    }
}

impl FromStr for WeightUnit {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "metric" | "kg" => Ok(Self::Metric),
            "imperial" | "lb" | "lbs" => Ok(Self::Imperial),
            _ => anyhow::bail!("invalid weight unit: {} (expected metric/imperial)", s),
        }
    }
}

/// Validated biometric input to the plan pipeline. Height and weight are metric.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BiometricProfile {
    pub age: i32,
    pub sex: Sex,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub activity: ActivityLevel,
    pub goal: Goal,
    pub pace: Pace,
}
