//! End-to-end tests for the `mesa` binary.

#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn mesa(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("mesa").unwrap();
    cmd.env("NO_COLOR", "1")
        .args(["-d", dir.path().to_str().unwrap(), "--seed", "7"]);
    cmd
}

/// A session with one warrior (Aria, 80 HP) and one goblin (30 HP, one bite).
fn test_table() -> TempDir {
    let dir = TempDir::new().unwrap();
    mesa(&dir)
        .args([
            "character",
            "create",
            "Aria",
            "-c",
            "warrior",
            "-a",
            "strength=20",
            "-a",
            "health=10",
            "-a",
            "agility=10",
        ])
        .assert()
        .success();
    mesa(&dir)
        .args(["enemy", "create", "Goblin", "--hp", "30", "--attack", "Bite:6:12"])
        .assert()
        .success();
    dir
}

// ---------------------------------------------------------------------------
// classes
// ---------------------------------------------------------------------------

#[test]
fn classes_lists_builtin_catalog() {
    let dir = TempDir::new().unwrap();
    mesa(&dir).arg("classes").assert().success().stdout(
        predicate::str::contains("Warrior")
            .and(predicate::str::contains("Mage"))
            .and(predicate::str::contains("sword_strike"))
            .and(predicate::str::contains("fireball")),
    );
}

#[test]
fn classes_fails_with_unreadable_catalog() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("classes.json");
    fs::write(&path, "not json").unwrap();

    mesa(&dir)
        .args(["--catalog", path.to_str().unwrap(), "classes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot load catalog"));
}

// ---------------------------------------------------------------------------
// character
// ---------------------------------------------------------------------------

#[test]
fn character_create_reports_max_hp() {
    let dir = TempDir::new().unwrap();
    mesa(&dir)
        .args([
            "character",
            "create",
            "Aria",
            "-c",
            "warrior",
            "-a",
            "strength=20",
            "-a",
            "health=10",
            "-a",
            "agility=10",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Created Aria the warrior")
                .and(predicate::str::contains("with 80 HP")),
        );
}

#[test]
fn character_create_rejects_unspent_points() {
    let dir = TempDir::new().unwrap();
    mesa(&dir)
        .args(["character", "create", "Aria", "-c", "warrior", "-a", "strength=35"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("remaining: 5"));
}

#[test]
fn character_create_rejects_unknown_class() {
    let dir = TempDir::new().unwrap();
    mesa(&dir)
        .args(["character", "create", "Aria", "-c", "bard", "-a", "luck=40"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("class not found: bard"));
}

#[test]
fn rust_log_enables_debug_events() {
    let dir = TempDir::new().unwrap();
    mesa(&dir)
        .env("RUST_LOG", "debug")
        .args(["character", "create", "Aria", "-c", "mage", "-a", "magic=40"])
        .assert()
        .success()
        .stderr(predicate::str::contains("created character"));
}

#[test]
fn default_log_level_hides_debug_events() {
    let dir = TempDir::new().unwrap();
    mesa(&dir)
        .env_remove("RUST_LOG")
        .args(["character", "create", "Aria", "-c", "mage", "-a", "magic=40"])
        .assert()
        .success()
        .stderr(predicate::str::contains("created character").not());
}

#[test]
fn character_list_empty() {
    let dir = TempDir::new().unwrap();
    mesa(&dir)
        .args(["character", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No characters yet."));
}

#[test]
fn character_list_shows_created() {
    let dir = test_table();
    mesa(&dir)
        .args(["character", "list"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Aria").and(predicate::str::contains("1 characters")),
        );
}

#[test]
fn character_damage_and_reset() {
    let dir = test_table();
    mesa(&dir)
        .args(["character", "damage", "Aria", "15", "-r", "Trap"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Aria is at 65/80 HP"));

    mesa(&dir)
        .args(["character", "reset", "aria"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Aria restored to 80/80 HP"));

    mesa(&dir)
        .args(["log"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Aria took 15 damage (Trap).")
                .and(predicate::str::contains("HP of Aria was restored.")),
        );
}

#[test]
fn character_damage_rejects_zero() {
    let dir = test_table();
    mesa(&dir)
        .args(["character", "damage", "Aria", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid amount"));
}

#[test]
fn character_delete_removes_it() {
    let dir = test_table();
    mesa(&dir)
        .args(["character", "delete", "Aria"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted Aria"));
    mesa(&dir)
        .args(["character", "show", "Aria"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("character not found: Aria"));
}

// ---------------------------------------------------------------------------
// enemy
// ---------------------------------------------------------------------------

#[test]
fn enemy_create_defaults_invalid_hp() {
    let dir = TempDir::new().unwrap();
    mesa(&dir)
        .args(["enemy", "create", "Slime", "--hp", "lots"])
        .assert()
        .success()
        .stdout(predicate::str::contains("with 50 HP and 0 attacks"));
}

#[test]
fn enemy_show_lists_attacks() {
    let dir = test_table();
    mesa(&dir)
        .args(["enemy", "show", "Goblin"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("30/30")
                .and(predicate::str::contains("1. Bite (6 dmg, 12/20)")),
        );
}

#[test]
fn enemy_toggle_flips_battle_flag() {
    let dir = test_table();
    mesa(&dir)
        .args(["enemy", "toggle", "Goblin"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Goblin joins the battle"));
    mesa(&dir)
        .args(["enemy", "toggle", "Goblin"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Goblin leaves the battle"));
}

// ---------------------------------------------------------------------------
// ability / attack
// ---------------------------------------------------------------------------

#[test]
fn ability_against_enemy_is_logged() {
    let dir = test_table();
    mesa(&dir)
        .args(["ability", "Aria", "sword_strike", "--enemy", "Goblin"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Aria used Sword Strike!"));
    mesa(&dir)
        .arg("log")
        .assert()
        .success()
        .stdout(predicate::str::contains("[ability]"));
}

#[test]
fn attack_ability_needs_enemy() {
    let dir = test_table();
    mesa(&dir)
        .args(["ability", "Aria", "sword_strike"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid target"));
}

#[test]
fn ability_rejects_unknown_key() {
    let dir = test_table();
    mesa(&dir)
        .args(["ability", "Aria", "fireball", "--enemy", "Goblin"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ability not found"));
}

#[test]
fn enemy_attack_is_logged() {
    let dir = test_table();
    mesa(&dir)
        .args(["attack", "Goblin", "1", "Aria"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Goblin used Bite against Aria!"));
}

#[test]
fn enemy_attack_numbering_starts_at_one() {
    let dir = test_table();
    mesa(&dir)
        .args(["attack", "Goblin", "0", "Aria"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("numbered from 1"));
    mesa(&dir)
        .args(["attack", "Goblin", "2", "Aria"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("attack not found"));
}

// ---------------------------------------------------------------------------
// battle
// ---------------------------------------------------------------------------

#[test]
fn battle_needs_characters() {
    let dir = TempDir::new().unwrap();
    mesa(&dir)
        .args(["battle", "start"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least one character"));
}

#[test]
fn battle_cycles_gm_and_players() {
    let dir = test_table();
    mesa(&dir)
        .args(["battle", "start"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Turn of GM"));
    mesa(&dir)
        .args(["battle", "next"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Turn of Aria"));
    mesa(&dir)
        .args(["battle", "next"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Turn of GM"));
    mesa(&dir)
        .args(["battle", "start"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already active"));
    mesa(&dir)
        .args(["battle", "end"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Battle ended."));
}

#[test]
fn battle_status_without_battle() {
    let dir = test_table();
    mesa(&dir)
        .args(["battle", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No battle is active."));
    mesa(&dir)
        .args(["battle", "next"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no battle is active"));
}

// ---------------------------------------------------------------------------
// roll / log
// ---------------------------------------------------------------------------

#[test]
fn roll_prints_dice() {
    let dir = TempDir::new().unwrap();
    mesa(&dir)
        .args(["roll", "d6", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3d6: ["));
    mesa(&dir)
        .arg("log")
        .assert()
        .success()
        .stdout(predicate::str::contains("GM rolled 3d6"));
}

#[test]
fn roll_clamps_dice_count() {
    let dir = TempDir::new().unwrap();
    mesa(&dir)
        .args(["roll", "d4", "50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("20d4: ["));
}

#[test]
fn roll_rejects_one_sided_die() {
    let dir = TempDir::new().unwrap();
    mesa(&dir)
        .args(["roll", "d1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown die"));
}

#[test]
fn log_clear_empties_it() {
    let dir = TempDir::new().unwrap();
    mesa(&dir).args(["roll", "d20"]).assert().success();
    mesa(&dir)
        .args(["log", "--clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Log cleared."));
    mesa(&dir)
        .arg("log")
        .assert()
        .success()
        .stdout(predicate::str::contains("The log is empty."));
}

// ---------------------------------------------------------------------------
// note / scenario / story
// ---------------------------------------------------------------------------

#[test]
fn notes_add_list_clear() {
    let dir = TempDir::new().unwrap();
    mesa(&dir)
        .args(["note", "add", "The", "bridge", "is", "trapped"])
        .assert()
        .success();
    mesa(&dir)
        .args(["note", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("The bridge is trapped"));
    mesa(&dir).args(["note", "clear"]).assert().success();
    mesa(&dir)
        .args(["note", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No notes."));
}

#[test]
fn scenario_defaults_then_updates() {
    let dir = TempDir::new().unwrap();
    mesa(&dir)
        .args(["scenario", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("assets/placeholder.svg"));
    mesa(&dir)
        .args(["scenario", "set", "assets/cave.png"])
        .assert()
        .success();
    mesa(&dir)
        .args(["scenario", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("assets/cave.png"));
    mesa(&dir)
        .arg("log")
        .assert()
        .success()
        .stdout(predicate::str::contains("Scenario updated by GM."));
}

#[test]
fn scenario_images_reads_manifest() {
    let dir = TempDir::new().unwrap();
    let manifest = dir.path().join("manifest.json");
    fs::write(
        &manifest,
        r#"{"images": [{"name": "Cave", "path": "assets/cave.png"}]}"#,
    )
    .unwrap();

    mesa(&dir)
        .args(["scenario", "images", "-m", manifest.to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Cave").and(predicate::str::contains("assets/cave.png")),
        );
}

#[test]
fn story_hides_gm_notes_by_default() {
    let dir = TempDir::new().unwrap();
    let story = dir.path().join("story.json");
    fs::write(
        &story,
        r#"{
  "title": "The Sunken Keep",
  "version": "1",
  "summary": "A keep swallowed by the marsh.",
  "parts": [
    {"id": "p1", "title": "Arrival", "description": "Fog everywhere.", "gm_notes": "The ferryman lies."}
  ]
}"#,
    )
    .unwrap();

    mesa(&dir)
        .args(["story", "-p", story.to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("The Sunken Keep")
                .and(predicate::str::contains("Arrival"))
                .and(predicate::str::contains("The ferryman lies.").not()),
        );
    mesa(&dir)
        .args(["story", "-p", story.to_str().unwrap(), "--gm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("The ferryman lies."));
}

#[test]
fn story_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    mesa(&dir)
        .args(["story", "-p", dir.path().join("nope.json").to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no readable story"));
}
