use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn cli(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("expense_ledger_cli").unwrap();
    cmd.env("EXPENSE_LEDGER_HOME", home.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn stored(home: &TempDir) -> serde_json::Value {
    let raw = std::fs::read_to_string(home.path().join("ledgers").join("studentExpenses.json"))
        .expect("ledger file");
    serde_json::from_str(&raw).expect("ledger json")
}

fn add(home: &TempDir, name: &str, amount: &str, category: &str, date: &str) {
    cli(home)
        .args([
            "add",
            "--name",
            name,
            "--amount",
            amount,
            "--category",
            category,
            "--date",
            date,
        ])
        .assert()
        .success()
        .stdout(contains("Added expense"));
}

fn first_id(home: &TempDir) -> String {
    stored(home)["expenses"][0]["id"].to_string()
}

#[test]
fn add_then_list_shows_expense() {
    let home = TempDir::new().unwrap();
    add(&home, "Cà phê", "25000", "food", "2024-06-01");

    cli(&home)
        .arg("list")
        .assert()
        .success()
        .stdout(contains("Cà phê"))
        .stdout(contains("25.000 ₫"))
        .stdout(contains("01/06/2024"));

    let value = stored(&home);
    assert_eq!(value["schema_version"], 1);
    assert_eq!(value["expenses"][0]["amount"], 25000);
}

#[test]
fn add_rejects_non_numeric_amount() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["add", "--name", "Tea", "--amount", "abc", "--category", "food"])
        .assert()
        .failure()
        .stderr(contains("not a whole number"));
}

#[test]
fn add_rejects_unknown_category() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["add", "--name", "Tea", "--amount", "10", "--category", "snacks"])
        .assert()
        .failure()
        .stderr(contains("unknown category"));
}

#[test]
fn voting_updates_score() {
    let home = TempDir::new().unwrap();
    add(&home, "Bus", "7000", "transport", "2024-06-02");
    let id = first_id(&home);

    cli(&home)
        .args(["upvote", &id])
        .assert()
        .success()
        .stdout(contains("score: +1"));
    cli(&home).args(["downvote", &id]).assert().success();
    cli(&home)
        .args(["downvote", &id])
        .assert()
        .success()
        .stdout(contains("score: -1"));
    assert_eq!(stored(&home)["expenses"][0]["votes"], -1);
}

#[test]
fn missing_id_is_an_error() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["upvote", "123"])
        .assert()
        .failure()
        .stderr(contains("Expense 123 not found"));
}

#[test]
fn edit_keeps_unspecified_fields() {
    let home = TempDir::new().unwrap();
    add(&home, "Shirt", "150000", "clothing", "2024-06-03");
    let id = first_id(&home);

    cli(&home)
        .args(["edit", &id, "--amount", "120000"])
        .assert()
        .success()
        .stdout(contains("Updated expense"));
    let value = stored(&home);
    assert_eq!(value["expenses"][0]["amount"], 120000);
    assert_eq!(value["expenses"][0]["name"], "Shirt");
    assert_eq!(value["expenses"][0]["category"], "clothing");
}

#[test]
fn delete_and_clear_with_confirmation_flag() {
    let home = TempDir::new().unwrap();
    add(&home, "A", "1000", "food", "2024-06-01");
    add(&home, "B", "2000", "food", "2024-06-01");
    add(&home, "C", "3000", "food", "2024-06-01");
    let id = first_id(&home);

    cli(&home)
        .args(["delete", &id, "--yes"])
        .assert()
        .success()
        .stdout(contains("Deleted expense"));
    cli(&home)
        .args(["clear", "--yes"])
        .assert()
        .success()
        .stdout(contains("Cleared 2 expenses"));
    assert_eq!(stored(&home)["expenses"], serde_json::json!([]));
}

#[test]
fn list_filters_and_sorts() {
    let home = TempDir::new().unwrap();
    add(&home, "Rice", "10000", "food", "2024-06-01");
    add(&home, "Noodles", "20000", "food", "2024-06-02");
    add(&home, "Pen", "5000", "study", "2024-06-03");

    let output = cli(&home)
        .args(["list", "--category", "food", "--sort", "amount-desc"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(!stdout.contains("Pen"));
    let noodles = stdout.find("Noodles").expect("noodles row");
    let rice = stdout.find("Rice").expect("rice row");
    assert!(noodles < rice);
}

#[test]
fn dashboard_json_exposes_view_model() {
    let home = TempDir::new().unwrap();
    add(&home, "Rice", "10000", "food", "2024-06-01");
    add(&home, "Pen", "5000", "study", "2024-06-03");

    let output = cli(&home).args(["dashboard", "--json"]).output().unwrap();
    assert!(output.status.success());
    let view: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(view["stats"]["expense_count"], 2);
    assert_eq!(view["stats"]["total_spend"], "15.000 ₫");
    assert_eq!(view["category_breakdown"][0]["tag"], "food");
    assert!(view["top_voted"].is_null());
    assert_eq!(view["charts"]["trend"]["values"].as_array().unwrap().len(), 7);
}

#[test]
fn stats_on_empty_ledger() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .arg("stats")
        .assert()
        .success()
        .stdout(contains("0 ₫"))
        .stdout(contains("No expenses yet"));
}

#[test]
fn unknown_command_suggests_alternative() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .arg("lst")
        .assert()
        .failure()
        .stderr(contains("Did you mean `list`?"));
}

#[test]
fn version_prints_crate_version() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .arg("version")
        .assert()
        .success()
        .stdout(contains(env!("CARGO_PKG_VERSION")).and(contains("expense_ledger")));
}

#[test]
fn add_rejects_amount_above_cap() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args([
            "add",
            "--name",
            "Yacht",
            "--amount",
            "5000000000000000000",
            "--category",
            "other",
        ])
        .assert()
        .failure()
        .stderr(contains("must not exceed"));
}

#[test]
fn votes_lists_every_expense_with_score() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .arg("votes")
        .assert()
        .success()
        .stdout(contains("No expenses to vote on yet"));

    add(&home, "Bus", "7000", "transport", "2024-06-02");
    let id = first_id(&home);
    cli(&home).args(["downvote", &id]).assert().success();

    cli(&home)
        .arg("votes")
        .assert()
        .success()
        .stdout(contains("Bus"))
        .stdout(contains("Transport"))
        .stdout(contains("02/06/2024"))
        .stdout(contains("-1"));
}

#[test]
fn config_set_persists_and_validates() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["config", "set", "trend_days", "14"])
        .assert()
        .success()
        .stdout(contains("Set trend_days = 14"));

    cli(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(contains("trend_days:").and(contains("14")));

    cli(&home)
        .args(["config", "set", "trend_days", "1000"])
        .assert()
        .failure()
        .stderr(contains("trend_days must not exceed 366"));

    let raw = std::fs::read_to_string(home.path().join("config.json")).expect("config file");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("config json");
    assert_eq!(value["trend_days"], 14);
}
