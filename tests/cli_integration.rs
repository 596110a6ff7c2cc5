/// CLI integration tests for platewise.
///
/// Each test runs the compiled binary with `PLATEWISE_HOME` pointing at a
/// fresh `TempDir`, keeping tests away from the real `~/.platewise` data.
use assert_cmd::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

// ── helpers ──────────────────────────────────────────────────────────────────

fn cmd_in(dir: &TempDir) -> assert_cmd::Command {
    let mut c = cargo_bin_cmd!("platewise");
    c.env("PLATEWISE_HOME", dir.path());
    c
}

fn parse_json(output: &assert_cmd::assert::Assert) -> Value {
    let bytes = output.get_output().stdout.clone();
    serde_json::from_slice(&bytes).expect("stdout is not valid JSON")
}

fn parse_stderr_json(output: &assert_cmd::assert::Assert) -> Value {
    let bytes = output.get_output().stderr.clone();
    serde_json::from_slice(&bytes).expect("stderr is not valid JSON")
}

const SAM: [&str; 18] = [
    "plan",
    "compute",
    "--name",
    "Sam",
    "--age",
    "32",
    "--sex",
    "male",
    "--height",
    "188",
    "--weight",
    "82",
    "--activity",
    "moderate",
    "--goal",
    "lose_weight",
    "--pace",
    "moderate",
];

fn compute_sam(dir: &TempDir) -> Value {
    let assert = cmd_in(dir).args(SAM).assert().success();
    parse_json(&assert)
}

fn log_toast(dir: &TempDir) -> Value {
    let assert = cmd_in(dir)
        .args([
            "--date",
            "2026-05-04",
            "meal",
            "add",
            "Toast",
            "--grams",
            "100",
            "--calories",
            "200",
            "--protein",
            "10",
            "--carbs",
            "30",
            "--fat",
            "5",
        ])
        .assert()
        .success();
    parse_json(&assert)
}

// ── init / config ────────────────────────────────────────────────────────────

#[test]
fn test_init_skip_creates_config_file() {
    let dir = TempDir::new().unwrap();
    cmd_in(&dir)
        .args(["init", "--skip"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config initialized"));
    assert!(dir.path().join("config.toml").exists());
}

#[test]
fn test_config_set_units_system() {
    let dir = TempDir::new().unwrap();
    cmd_in(&dir)
        .args(["config", "set", "units.system", "imperial"])
        .assert()
        .success();
    let assert = cmd_in(&dir).args(["config", "show"]).assert().success();
    let json = parse_json(&assert);
    assert_eq!(json["data"]["config"]["units"]["height"], "imperial");
    assert_eq!(json["data"]["config"]["units"]["weight"], "imperial");
}

#[test]
fn test_config_set_unknown_key_fails() {
    let dir = TempDir::new().unwrap();
    let assert = cmd_in(&dir)
        .args(["config", "set", "units.volume", "ml"])
        .assert()
        .failure();
    let err = parse_stderr_json(&assert);
    assert_eq!(err["status"], "error");
    assert_eq!(err["error"]["code"], "general_error");
}

// ── calc ─────────────────────────────────────────────────────────────────────

#[test]
fn test_calc_macros() {
    let dir = TempDir::new().unwrap();
    let assert = cmd_in(&dir).args(["calc", "macros", "2200"]).assert().success();
    let json = parse_json(&assert);
    assert_eq!(json["command"], "calc");
    assert_eq!(json["data"]["macros"]["protein"], 165);
    assert_eq!(json["data"]["macros"]["carbs"], 220);
    assert_eq!(json["data"]["macros"]["fat"], 73);
}

#[test]
fn test_calc_bmi() {
    let dir = TempDir::new().unwrap();
    let assert = cmd_in(&dir)
        .args(["calc", "bmi", "--weight", "72", "--height", "178"])
        .assert()
        .success();
    let json = parse_json(&assert);
    assert_eq!(json["data"]["bmi"], 22.72);
    assert_eq!(json["data"]["category"], "Normal");
}

#[test]
fn test_calc_calories_floor() {
    let dir = TempDir::new().unwrap();
    let assert = cmd_in(&dir)
        .args(["calc", "calories", "--tdee", "900", "--goal", "lose_weight", "--pace", "fast"])
        .assert()
        .success();
    let json = parse_json(&assert);
    assert_eq!(json["data"]["calories"], 1200.0);
}

#[test]
fn test_calc_convert_requires_input() {
    let dir = TempDir::new().unwrap();
    cmd_in(&dir)
        .args(["calc", "convert"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to convert"));
}

#[test]
fn test_calc_convert_feet_inches() {
    let dir = TempDir::new().unwrap();
    let assert = cmd_in(&dir)
        .args(["calc", "convert", "--feet-inches", "5'9\"", "--cm", "181.864"])
        .assert()
        .success();
    let json = parse_json(&assert);
    assert_eq!(json["data"]["cm"], 175.26);
    assert_eq!(json["data"]["feet"], 6);
    assert_eq!(json["data"]["inches"], 0);
}

#[test]
fn test_calc_rejects_unknown_activity() {
    let dir = TempDir::new().unwrap();
    cmd_in(&dir)
        .args(["calc", "tdee", "--bmr", "1800", "--activity", "couch"])
        .assert()
        .failure();
}

// ── plan ─────────────────────────────────────────────────────────────────────

#[test]
fn test_plan_compute_and_show() {
    let dir = TempDir::new().unwrap();
    let json = compute_sam(&dir);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["data"]["saved"], true);
    assert_eq!(json["data"]["plan"]["targetCalories"], 2427);
    assert_eq!(json["data"]["plan"]["proteinG"], 182);

    let assert = cmd_in(&dir).args(["plan", "show"]).assert().success();
    let shown = parse_json(&assert);
    assert_eq!(shown["data"]["plan"]["id"], json["data"]["plan"]["id"]);
    assert_eq!(shown["data"]["bmi_category"], "Normal");
}

#[test]
fn test_plan_compute_dry_run_does_not_save() {
    let dir = TempDir::new().unwrap();
    let mut args: Vec<&str> = SAM.to_vec();
    args.push("--dry-run");
    let assert = cmd_in(&dir).args(&args).assert().success();
    assert_eq!(parse_json(&assert)["data"]["saved"], false);
    cmd_in(&dir)
        .args(["plan", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no active plan"));
}

#[test]
fn test_plan_compute_imperial() {
    let dir = TempDir::new().unwrap();
    let assert = cmd_in(&dir)
        .args([
            "plan",
            "compute",
            "--name",
            "Taylor",
            "--age",
            "29",
            "--sex",
            "female",
            "--height",
            "5'9\"",
            "--height-unit",
            "imperial",
            "--weight",
            "170",
            "--weight-unit",
            "lb",
            "--activity",
            "light",
            "--goal",
            "maintain",
        ])
        .assert()
        .success();
    let json = parse_json(&assert);
    assert_eq!(json["data"]["plan"]["heightCM"], 175.26);
}

#[test]
fn test_plan_compute_invalid_age_reports_field() {
    let dir = TempDir::new().unwrap();
    let mut args: Vec<&str> = SAM.to_vec();
    args[5] = "9";
    let assert = cmd_in(&dir).args(&args).assert().failure();
    let err = parse_stderr_json(&assert);
    assert_eq!(err["error"]["code"], "validation_error");
    assert_eq!(err["error"]["fields"][0]["field"], "age");
    assert_eq!(err["error"]["fields"][0]["message"], "Enter an age 13-90.");
}

#[test]
fn test_plan_set_goal_is_bounded_and_marks_plan() {
    let dir = TempDir::new().unwrap();
    compute_sam(&dir);
    let assert = cmd_in(&dir)
        .args(["plan", "set-goal", "1000"])
        .assert()
        .success();
    let json = parse_json(&assert);
    assert_eq!(json["data"]["plan"]["targetCalories"], 1200);
    assert_eq!(json["data"]["plan"]["profileMetricsStale"], true);

    let assert = cmd_in(&dir).args(["plan", "history"]).assert().success();
    let history = parse_json(&assert);
    assert_eq!(history["data"]["plans"].as_array().unwrap().len(), 2);

    let assert = cmd_in(&dir).args(["plan", "recompute"]).assert().success();
    let fresh = parse_json(&assert);
    assert_eq!(fresh["data"]["plan"]["targetCalories"], 2427);
    assert_eq!(fresh["data"]["plan"]["profileMetricsStale"], false);
}

#[test]
fn test_plan_set_goal_without_plan_updates_config() {
    let dir = TempDir::new().unwrap();
    let assert = cmd_in(&dir)
        .args(["plan", "set-goal", "2500"])
        .assert()
        .success();
    let json = parse_json(&assert);
    assert_eq!(json["data"]["daily_goal"], 2500.0);
    assert!(json["data"]["plan"].is_null());

    let assert = cmd_in(&dir).args(["status"]).assert().success();
    assert_eq!(parse_json(&assert)["data"]["summary"]["daily_goal"], 2500.0);
}

#[test]
fn test_plan_reset() {
    let dir = TempDir::new().unwrap();
    compute_sam(&dir);
    let assert = cmd_in(&dir).args(["plan", "reset"]).assert().success();
    assert_eq!(parse_json(&assert)["data"]["removed"], 1);
}

#[test]
fn test_plan_show_human() {
    let dir = TempDir::new().unwrap();
    compute_sam(&dir);
    cmd_in(&dir)
        .args(["--human", "plan", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plan for Sam"))
        .stdout(predicate::str::contains("2427"));
}

// ── meals / status ───────────────────────────────────────────────────────────

#[test]
fn test_meal_add_show_and_scale() {
    let dir = TempDir::new().unwrap();
    let added = log_toast(&dir);
    assert_eq!(added["data"]["total_calories"], 200.0);
    let item_id = added["data"]["meal"]["items"][0]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let assert = cmd_in(&dir)
        .args(["--date", "2026-05-04", "meal", "show"])
        .assert()
        .success();
    let shown = parse_json(&assert);
    assert_eq!(shown["data"]["meals"].as_array().unwrap().len(), 1);

    let assert = cmd_in(&dir)
        .args(["meal", "scale", &item_id, "50"])
        .assert()
        .success();
    let scaled = parse_json(&assert);
    assert_eq!(scaled["data"]["item"]["calories"], 100.0);
    assert_eq!(scaled["data"]["item"]["fat"], 2.5);

    let assert = cmd_in(&dir)
        .args(["--date", "2026-05-04", "status"])
        .assert()
        .success();
    let status = parse_json(&assert);
    assert_eq!(status["data"]["summary"]["consumed"]["calories"], 100.0);
    assert_eq!(status["data"]["summary"]["meal_count"], 1);
}

#[test]
fn test_meal_scale_unknown_item() {
    let dir = TempDir::new().unwrap();
    cmd_in(&dir)
        .args(["meal", "scale", "nope", "50"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("item not found"));
}

#[test]
fn test_meal_batch_empty_fails() {
    let dir = TempDir::new().unwrap();
    cmd_in(&dir)
        .args(["meal", "batch", "[]"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No items detected yet."));
}

#[test]
fn test_meal_batch_logs_one_meal() {
    let dir = TempDir::new().unwrap();
    let batch = r#"[
        {"name": "Avocado Toast", "grams": 120, "calories": 260, "protein": 8, "carbs": 32, "fat": 12, "confidence": 0.9},
        {"name": "Eggs", "grams": 60, "calories": 90, "protein": 6, "carbs": 1, "fat": 7}
    ]"#;
    let assert = cmd_in(&dir)
        .args(["--date", "2026-05-04", "meal", "batch", batch])
        .assert()
        .success();
    let json = parse_json(&assert);
    assert_eq!(json["data"]["total_calories"], 350.0);
    assert_eq!(json["data"]["meal"]["items"][0]["confidence"], 0.9);
    assert_eq!(json["data"]["meal"]["items"][1]["confidence"], 1.0);
}

#[test]
fn test_meal_add_rejects_zero_grams() {
    let dir = TempDir::new().unwrap();
    cmd_in(&dir)
        .args(["meal", "add", "Air", "--grams", "0", "--calories", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("grams must be positive"));
}

#[test]
fn test_meal_remove() {
    let dir = TempDir::new().unwrap();
    let added = log_toast(&dir);
    let meal_id = added["data"]["meal"]["id"].as_str().unwrap().to_string();
    cmd_in(&dir).args(["meal", "remove", &meal_id]).assert().success();
    cmd_in(&dir)
        .args(["meal", "remove", &meal_id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("meal not found"));
}

#[test]
fn test_status_with_plan_reports_macro_targets() {
    let dir = TempDir::new().unwrap();
    compute_sam(&dir);
    log_toast(&dir);
    let assert = cmd_in(&dir)
        .args(["--date", "2026-05-04", "status"])
        .assert()
        .success();
    let json = parse_json(&assert);
    let summary = &json["data"]["summary"];
    assert_eq!(summary["daily_goal"], 2427.0);
    assert_eq!(summary["remaining_calories"], 2227.0);
    assert_eq!(summary["macro_targets"]["protein"], 182);
    assert_eq!(summary["last_meal"]["title"], "Toast");
}

#[test]
fn test_completions_bash() {
    let dir = TempDir::new().unwrap();
    cmd_in(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("platewise"));
}

// ── bounds and input checks ──────────────────────────────────────────────────

#[test]
fn test_calc_macros_huge_budget() {
    let dir = TempDir::new().unwrap();
    let assert = cmd_in(&dir).args(["calc", "macros", "5e9"]).assert().success();
    let json = parse_json(&assert);
    assert_eq!(json["data"]["energy"], 5_000_000_003u64);
}

#[test]
fn test_calc_convert_huge_height() {
    let dir = TempDir::new().unwrap();
    let assert = cmd_in(&dir)
        .args(["calc", "convert", "--cm", "130910603182.08"])
        .assert()
        .success();
    let json = parse_json(&assert);
    assert_eq!(json["data"]["feet"], u32::MAX);
    assert!(json["data"]["inches"].as_u64().unwrap() < 12);
}

#[test]
fn test_config_default_goal_low_value_is_clamped() {
    let dir = TempDir::new().unwrap();
    let assert = cmd_in(&dir)
        .args(["config", "set", "goals.default_daily_calories", "100"])
        .assert()
        .success();
    assert_eq!(
        parse_json(&assert)["data"]["config"]["goals"]["default_daily_calories"],
        1200.0
    );
    let assert = cmd_in(&dir).args(["status"]).assert().success();
    assert_eq!(parse_json(&assert)["data"]["summary"]["daily_goal"], 1200.0);
}

#[test]
fn test_config_default_goal_nan_rejected() {
    let dir = TempDir::new().unwrap();
    let assert = cmd_in(&dir)
        .args(["config", "set", "goals.default_daily_calories", "NaN"])
        .assert()
        .failure();
    assert_eq!(parse_stderr_json(&assert)["error"]["code"], "general_error");

    let assert = cmd_in(&dir).args(["status"]).assert().success();
    let summary = &parse_json(&assert)["data"]["summary"];
    assert_eq!(summary["daily_goal"], 2200.0);
    assert_eq!(summary["progress"], 0.0);
}

#[test]
fn test_plan_set_goal_negative_is_floored() {
    let dir = TempDir::new().unwrap();
    let assert = cmd_in(&dir)
        .args(["plan", "set-goal", "-100"])
        .assert()
        .success();
    assert_eq!(parse_json(&assert)["data"]["daily_goal"], 1200.0);
}

#[test]
fn test_meal_batch_rejects_negative_nutrients() {
    let dir = TempDir::new().unwrap();
    let batch = r#"[{"name": "Refund", "grams": 50, "calories": -400}]"#;
    cmd_in(&dir)
        .args(["meal", "batch", batch])
        .assert()
        .failure()
        .stderr(predicate::str::contains("calories must not be negative"));

    let batch = r#"[{"name": "Toast", "grams": 50, "calories": 120, "fat": -2}]"#;
    cmd_in(&dir)
        .args(["meal", "batch", batch])
        .assert()
        .failure()
        .stderr(predicate::str::contains("fat must not be negative"));
}

#[test]
fn test_init_interactive_lists_choices() {
    let dir = TempDir::new().unwrap();
    cmd_in(&dir)
        .arg("init")
        .write_stdin("Taylor\n29\nfemale\n168\n64\nmoderate\nmaintain\nmoderate\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("male/female/other"))
        .stdout(predicate::str::contains("very_active"))
        .stdout(predicate::str::contains("Intense daily training"))
        .stdout(predicate::str::contains("Target: 2145 kcal/day"));

    let assert = cmd_in(&dir).args(["plan", "show"]).assert().success();
    assert_eq!(parse_json(&assert)["data"]["plan"]["name"], "Taylor");
}

#[test]
fn test_init_reasks_invalid_age() {
    let dir = TempDir::new().unwrap();
    cmd_in(&dir)
        .arg("init")
        .write_stdin("Taylor\n9\nfemale\n168\n64\nmoderate\nmaintain\nmoderate\n29\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Enter an age 13-90."));
}
