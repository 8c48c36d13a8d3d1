//! Scenario: the `cart` binary drives a session file through a full
//! add / edit / remove / checkout cycle.
//!
//! # Invariants under test
//!
//! - State persists in the session file between invocations.
//! - Removing a line tombstones it until `show` (page load) compacts.
//! - Checkout prints slot-named fields and leaves `[]` in the session.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn cart(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("cart").unwrap();
    cmd.current_dir(dir)
        .env_remove("CART_CONFIG")
        .env_remove("CART_SESSION")
        .env("RUST_LOG", "warn")
        .arg("--session")
        .arg(dir.join("session.json"));
    cmd
}

fn add(dir: &Path, id: &str, quantity: &str) -> Command {
    let mut cmd = cart(dir);
    cmd.args([
        "add",
        "--product-id",
        id,
        "--name",
        "Cement",
        "--sku",
        "CEM",
        "--price",
        "10",
        "--measurement",
        "bag",
        "--quantity",
        quantity,
        "--option",
        "Grade=M500",
    ]);
    cmd
}

fn stored_cart(dir: &Path) -> String {
    let raw = std::fs::read_to_string(dir.join("session.json")).unwrap();
    let v: serde_json::Value = serde_json::from_str(&raw).unwrap();
    v["shoppingCart"].as_str().unwrap().to_string()
}

#[test]
fn add_edit_remove_checkout() {
    let dir = tempfile::tempdir().unwrap();
    let d = dir.path();

    add(d, "7", "2")
        .assert()
        .success()
        .stdout(predicate::str::contains("slot=0"))
        .stdout(predicate::str::contains("in_cart=2"))
        .stdout(predicate::str::contains("summary=1 позиции на сумму 20.00"));

    add(d, "8", "1")
        .assert()
        .success()
        .stdout(predicate::str::contains("slot=1"));

    cart(d)
        .args(["edit", "1", "--quantity", "3", "--text", "urgent"])
        .assert()
        .success()
        .stdout(predicate::str::contains("updated slot=1"))
        .stdout(predicate::str::contains("note=urgent"));

    cart(d)
        .args(["remove", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("removed_slot=0"))
        .stdout(predicate::str::contains("empty_alert_visible=false"));
    assert!(stored_cart(d).starts_with("[null,"));

    // page load compacts the tombstone
    cart(d)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("line slot=0 product_id=8"))
        .stdout(predicate::str::contains("lines=1"))
        .stdout(predicate::str::contains("summary=1 позиции на сумму 30.00"));
    assert!(stored_cart(d).starts_with("[{"));

    cart(d)
        .arg("checkout")
        .assert()
        .success()
        .stdout(predicate::str::contains("cart-0-product=8"))
        .stdout(predicate::str::contains("cart-0-options={\"Grade\":\"M500\"}"))
        .stdout(predicate::str::contains("reset=true"));
    assert_eq!(stored_cart(d), "[]");
}

#[test]
fn clone_and_badges() {
    let dir = tempfile::tempdir().unwrap();
    let d = dir.path();
    add(d, "7", "2").assert().success();

    cart(d)
        .args(["clone", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("appended slot=1"));

    cart(d)
        .arg("badge")
        .assert()
        .success()
        .stdout(predicate::str::contains("product_id=7 quantity=4 highlight=true"));

    cart(d)
        .args(["variants", "--product-id", "7", "--slot", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("variant slot=1 selected=true label=2 bag, Grade: M500"))
        .stdout(predicate::str::contains("selected_slot=1"));
}

#[test]
fn malformed_session_cart_reads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let d = dir.path();
    std::fs::write(d.join("session.json"), r#"{"shoppingCart":"not-json"}"#).unwrap();

    cart(d)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("lines=0"))
        .stdout(predicate::str::contains("empty_alert_visible=true"))
        .stderr(predicate::str::contains("invalid shopping cart data"));
    assert_eq!(stored_cart(d), "[]");
}

#[test]
fn forget_removes_the_key() {
    let dir = tempfile::tempdir().unwrap();
    let d = dir.path();
    add(d, "7", "1").assert().success();

    cart(d)
        .arg("forget")
        .assert()
        .success()
        .stdout(predicate::str::contains("forgotten=true key=shoppingCart"));

    let raw = std::fs::read_to_string(d.join("session.json")).unwrap();
    assert!(!raw.contains("shoppingCart"));
}
