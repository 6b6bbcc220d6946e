mod common;

use common::TestFixture;
use predicates::prelude::*;

#[test]
fn fresh_list_shows_default_catalog() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("## Beer and Cider  [+ Add Item]"))
        .stdout(predicate::str::contains("[ ] Ale"));

    assert!(fixture.data_dir().join("shoplist.sqlite3").exists());
    assert!(fixture.data_dir().join("logs").is_dir());
}

#[test]
fn summary_without_selection_reports_empty() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .arg("summary")
        .assert()
        .success()
        .stdout("No items selected.\n");
}

#[test]
fn added_item_persists_across_runs() {
    let fixture = TestFixture::new();
    fixture.run(&["add", "Grocery", "  Basmati  "]);

    fixture
        .command()
        .args(["list", "--section", "section-Grocery"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("## Grocery  [+ Add Item]"))
        .stdout(predicate::str::contains("[ ] Basmati\n"));
}

#[test]
fn duplicate_add_is_reported_on_stderr() {
    let fixture = TestFixture::new();
    fixture.run(&["add", "Grocery", "Basmati"]);

    fixture
        .command()
        .args(["--quiet", "add", "Grocery", "Basmati"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Item already exists in this section."));
}

#[test]
fn add_prompts_when_name_is_omitted() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .args(["--quiet", "add", "Grocery"])
        .write_stdin("Quinoa\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Enter new item name for Grocery:"));

    fixture
        .command()
        .args(["list", "--section", "Grocery"])
        .assert()
        .stdout(predicate::str::contains("Quinoa"));
}

#[test]
fn checked_items_show_in_summary() {
    let fixture = TestFixture::new();
    fixture.run(&["add", "Grocery", "Basmati"]);
    fixture.run(&["check", "Grocery", "Basmati"]);
    fixture.run(&["check", "Grocery", "0"]);

    fixture
        .command()
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Grocery:\n"))
        .stdout(predicate::str::contains("Basmati\n"));

    fixture.run(&["uncheck", "Grocery", "Basmati"]);
    fixture
        .command()
        .arg("summary")
        .assert()
        .stdout(predicate::str::contains("Basmati").not());
}

#[test]
fn summary_prints_sections_with_trailing_blank_line() {
    let fixture = TestFixture::new();
    fixture.run(&["check", "Beer and Cider", "Lager"]);
    fixture.run(&["check", "Beer and Cider", "Ale"]);

    fixture
        .command()
        .arg("summary")
        .assert()
        .success()
        .stdout("Beer and Cider:\nAle\nLager\n\n");
}

#[test]
fn delete_declined_keeps_item() {
    let fixture = TestFixture::new();
    fixture.run(&["add", "Grocery", "Basmati"]);

    fixture
        .command()
        .args(["--quiet", "delete", "Grocery", "0"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("[y/N]"))
        .stdout(predicate::str::contains("Cancelled."));

    fixture
        .command()
        .args(["list", "--section", "Grocery"])
        .assert()
        .stdout(predicate::str::contains("Basmati"));
}

#[test]
fn delete_with_yes_removes_item_and_selection() {
    let fixture = TestFixture::new();
    fixture.run(&["add", "Grocery", "Basmati"]);
    fixture.run(&["check", "Grocery", "Basmati"]);
    fixture.run(&["--yes", "delete", "Grocery", "0"]);

    fixture
        .command()
        .args(["list", "--section", "Grocery"])
        .assert()
        .stdout(predicate::str::contains("Basmati").not());
    fixture
        .command()
        .arg("summary")
        .assert()
        .stdout("No items selected.\n");
}

#[test]
fn unknown_section_fails() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .args(["add", "Hardware", "Nails"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown section"));
}

#[test]
fn unselect_all_clears_summary() {
    let fixture = TestFixture::new();
    fixture.run(&["add", "Grocery", "Basmati"]);
    fixture.run(&["check", "Grocery", "Basmati"]);
    fixture.run(&["--yes", "unselect-all"]);

    fixture
        .command()
        .arg("summary")
        .assert()
        .stdout("No items selected.\n");
}
