use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use platewise::models::profile::{ActivityLevel, Goal, HeightUnit, Pace, Sex, WeightUnit};

#[derive(Parser)]
#[command(name = "platewise", version, about = "Nutrition plan engine and meal log")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as human-readable text instead of JSON
    #[arg(long = "human", short = 'H', global = true)]
    pub human: bool,

    /// Override date (YYYY-MM-DD)
    #[arg(long, global = true)]
    pub date: Option<NaiveDate>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up a profile interactively and compute the first plan
    Init {
        /// Skip interactive setup, only write default config
        #[arg(long)]
        skip: bool,
    },

    /// Compute, inspect or override the daily plan
    Plan {
        #[command(subcommand)]
        action: PlanAction,
    },

    /// Stateless access to the calculation engine
    Calc {
        #[command(subcommand)]
        action: CalcAction,
    },

    /// Log and edit meals
    Meal {
        #[command(subcommand)]
        action: MealAction,
    },

    /// Today's intake against the daily goal
    Status,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Print shell completions
    Completions {
        shell: Shell,
    },
}

#[derive(Args)]
pub struct ProfileArgs {
    /// Display name
    #[arg(long)]
    pub name: String,

    /// Age in years (13-90)
    #[arg(long)]
    pub age: String,

    #[arg(long, value_parser = parse_arg::<Sex>)]
    pub sex: Sex,

    /// Height: centimeters, or feet/inches such as 5'9" with --height-unit imperial
    #[arg(long)]
    pub height: String,

    /// Weight in kilograms, or pounds with --weight-unit imperial
    #[arg(long)]
    pub weight: String,

    /// Overrides the configured height unit
    #[arg(long, value_parser = parse_arg::<HeightUnit>)]
    pub height_unit: Option<HeightUnit>,

    /// Overrides the configured weight unit
    #[arg(long, value_parser = parse_arg::<WeightUnit>)]
    pub weight_unit: Option<WeightUnit>,

    #[arg(long, value_parser = parse_arg::<ActivityLevel>)]
    pub activity: ActivityLevel,

    #[arg(long, value_parser = parse_arg::<Goal>)]
    pub goal: Goal,

    #[arg(long, value_parser = parse_arg::<Pace>, default_value = "moderate")]
    pub pace: Pace,
}

#[derive(Subcommand)]
pub enum PlanAction {
    /// Validate a profile, compute a plan and make it active
    Compute {
        #[command(flatten)]
        profile: ProfileArgs,

        /// Print the plan without saving it
        #[arg(long)]
        dry_run: bool,
    },
    /// Show the active plan
    Show,
    /// List stored plans, newest first
    History {
        #[arg(long)]
        last: Option<u32>,
    },
    /// Set the daily calorie goal by hand
    SetGoal {
        /// Clamped to 1200-6000 kcal
        #[arg(allow_hyphen_values = true)]
        calories: f64,
    },
    /// Recompute the active plan from its profile, dropping any manual goal
    Recompute,
    /// Delete all stored plans
    Reset,
}

#[derive(Subcommand)]
pub enum CalcAction {
    /// Body mass index and category
    Bmi {
        #[arg(long)]
        weight: f64,
        #[arg(long)]
        height: f64,
    },
    /// Basal metabolic rate (Mifflin-St Jeor)
    Bmr {
        #[arg(long)]
        weight: f64,
        #[arg(long)]
        height: f64,
        #[arg(long, allow_hyphen_values = true)]
        age: i32,
        #[arg(long, value_parser = parse_arg::<Sex>)]
        sex: Sex,
    },
    /// Total daily energy expenditure from a BMR
    Tdee {
        #[arg(long)]
        bmr: f64,
        #[arg(long, value_parser = parse_arg::<ActivityLevel>)]
        activity: ActivityLevel,
    },
    /// Goal-adjusted daily calories from a TDEE
    Calories {
        #[arg(long, allow_hyphen_values = true)]
        tdee: f64,
        #[arg(long, value_parser = parse_arg::<Goal>)]
        goal: Goal,
        #[arg(long, value_parser = parse_arg::<Pace>)]
        pace: Pace,
    },
    /// Protein/carbs/fat grams for a calorie budget
    Macros {
        calories: f64,
    },
    /// Convert between metric and imperial body measurements
    Convert {
        /// Height in cm to express as feet and inches
        #[arg(long)]
        cm: Option<f64>,
        /// Height in feet and inches (e.g. 5'9") to express in cm
        #[arg(long)]
        feet_inches: Option<String>,
        /// Weight in kg to express in pounds
        #[arg(long)]
        kg: Option<f64>,
        /// Weight in pounds to express in kg
        #[arg(long)]
        lbs: Option<f64>,
    },
}

#[derive(Subcommand)]
pub enum MealAction {
    /// Log a meal of one item
    Add {
        name: String,
        #[arg(long)]
        grams: f64,
        #[arg(long)]
        calories: f64,
        #[arg(long, default_value_t = 0.0)]
        protein: f64,
        #[arg(long, default_value_t = 0.0)]
        carbs: f64,
        #[arg(long, default_value_t = 0.0)]
        fat: f64,
        /// Detection confidence (0-1)
        #[arg(long, default_value_t = 1.0)]
        confidence: f64,
    },
    /// Log several items as one meal from a JSON array
    Batch {
        json: String,
    },
    /// Show the day's meals
    Show,
    /// Change an item's serving size, rescaling its nutrients
    Scale {
        item_id: String,
        grams: f64,
    },
    /// Delete a meal
    Remove {
        meal_id: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set a config value
    Set {
        /// Config key (units.system, units.height, units.weight, goals.default_daily_calories)
        key: String,
        value: String,
    },
}

fn parse_arg<T>(s: &str) -> Result<T, String>
where
    T: std::str::FromStr<Err = anyhow::Error>,
{
    s.parse::<T>().map_err(|e| e.to_string())
}
