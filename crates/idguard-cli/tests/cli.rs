use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

const CARD: &str = "Government of India\n\
                    Name: Priya Sharma\n\
                    DOB: 14/03/1992\n\
                    Female\n\
                    4821 0937 5566\n";

fn idguard(config_dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("idguard").unwrap();
    // Never pick up the user's own configuration
    cmd.arg("--config").arg(config_dir.path().join("config.json"));
    cmd
}

fn with_default_config() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    idguard(&dir).args(["config", "init"]).assert().success();
    dir
}

#[test]
fn process_stdin_as_json() {
    let dir = with_default_config();
    let output = idguard(&dir)
        .args(["process", "-"])
        .write_stdin(CARD)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["source"], "stdin");
    assert_eq!(json["fields"]["is_identity_document"], true);
    assert_eq!(json["fields"]["name"]["value"], "Priya Sharma");
    assert_eq!(json["fields"]["id_number"]["value"], "4821 0937 5566");
    assert!(!json["masked_text"].as_str().unwrap().contains("4821"));
}

#[test]
fn process_text_shows_fields_for_identity_card() {
    let dir = with_default_config();
    idguard(&dir)
        .args(["process", "--format", "text"])
        .write_stdin(CARD)
        .assert()
        .success()
        .stdout(predicate::str::contains("Full Name: Priya Sharma"))
        .stdout(predicate::str::contains("Gender: Female"))
        .stdout(predicate::str::contains("Masked text").not());
}

#[test]
fn process_text_shows_masked_text_for_other_documents() {
    let dir = with_default_config();
    idguard(&dir)
        .args(["process", "--format", "text"])
        .write_stdin("Contact me at jane@example.com or 9876543210")
        .assert()
        .success()
        .stdout(predicate::str::contains("No identity document detected"))
        .stdout(predicate::str::contains(
            "Masked text:\nContact me at ██████████ or ██████████",
        ));
}

#[test]
fn process_blank_transcript() {
    let dir = with_default_config();
    idguard(&dir)
        .args(["process", "--format", "csv"])
        .write_stdin("   \n")
        .assert()
        .success()
        .stderr(predicate::str::contains("No text could be extracted"))
        .stdout(predicate::str::contains(",,,,false,0"));
}

#[test]
fn process_missing_input_fails() {
    let dir = with_default_config();
    idguard(&dir)
        .args(["process", "no-such-transcript.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn mask_to_stdout() {
    let dir = with_default_config();
    idguard(&dir)
        .arg("mask")
        .write_stdin("Contact me at jane@example.com or 9876543210")
        .assert()
        .success()
        .stdout("Contact me at ██████████ or ██████████");
}

#[test]
fn mask_writes_default_download_name() {
    let dir = with_default_config();
    let input = dir.path().join("card.txt");
    fs::write(&input, CARD).unwrap();

    idguard(&dir)
        .current_dir(dir.path())
        .arg("mask")
        .arg(&input)
        .arg("--output")
        .assert()
        .success();

    let masked = fs::read_to_string(dir.path().join("masked-text.txt")).unwrap();
    assert!(masked.starts_with("Government of India\n"));
    assert!(!masked.contains("Priya"));
    assert!(!masked.contains("14/03/1992"));
}

#[test]
fn mask_uses_configured_token() {
    let dir = with_default_config();
    idguard(&dir)
        .args(["config", "set", "masking.redaction_char", "*"])
        .assert()
        .success();
    idguard(&dir)
        .args(["config", "set", "masking.redaction_width", "3"])
        .assert()
        .success();

    idguard(&dir)
        .arg("mask")
        .write_stdin("mail a@b.io")
        .assert()
        .success()
        .stdout("mail ***");
}

#[test]
fn config_rejects_invalid_values() {
    let dir = with_default_config();
    idguard(&dir)
        .args(["config", "set", "masking.redaction_width", "0"])
        .assert()
        .failure();
    idguard(&dir)
        .args(["config", "set", "masking.no_such_key", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration key not found"));

    idguard(&dir)
        .args(["config", "get", "masking.redaction_width"])
        .assert()
        .success()
        .stdout("10\n");
}

#[test]
fn batch_writes_outputs_and_summary() {
    let dir = with_default_config();
    let scans = dir.path().join("scans");
    let out = dir.path().join("out");
    fs::create_dir_all(&scans).unwrap();
    fs::write(scans.join("card.txt"), CARD).unwrap();
    fs::write(scans.join("note.txt"), "call 9876543210").unwrap();

    let pattern = format!("{}/*.txt", scans.display());
    idguard(&dir)
        .args(["batch", &pattern, "--summary", "-j", "2", "--format", "text"])
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed 2 files"));

    let card = fs::read_to_string(out.join("card.txt")).unwrap();
    assert!(card.contains("Full Name: Priya Sharma"));

    let note = fs::read_to_string(out.join("note.txt")).unwrap();
    assert!(note.contains("Masked text:\ncall ██████████"));

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert!(summary.starts_with("filename,status,is_identity_document"));
    assert!(summary.contains("card.txt,success,true"));
    assert!(summary.contains("note.txt,success,false"));
}

#[test]
fn invalid_utf8_input_is_decoded_lossily() {
    let dir = with_default_config();
    let bytes = b"\xff\xfe call 9876543210".to_vec();

    idguard(&dir)
        .arg("mask")
        .write_stdin(bytes.clone())
        .assert()
        .success()
        .stdout("\u{fffd}\u{fffd} call ██████████");

    let scans = dir.path().join("scans");
    fs::create_dir_all(&scans).unwrap();
    fs::write(scans.join("garbled.txt"), &bytes).unwrap();

    idguard(&dir)
        .args(["process", "--format", "text"])
        .arg(scans.join("garbled.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("call ██████████"));

    let pattern = format!("{}/*.txt", scans.display());
    idguard(&dir)
        .args(["batch", &pattern, "--summary"])
        .arg("--output-dir")
        .arg(dir.path().join("out"))
        .assert()
        .success();

    let summary = fs::read_to_string(dir.path().join("out").join("summary.csv")).unwrap();
    assert!(summary.contains("garbled.txt,success,false"));
}

#[test]
fn rust_log_overrides_verbosity() {
    let dir = with_default_config();

    idguard(&dir)
        .env("RUST_LOG", "debug")
        .arg("mask")
        .write_stdin("call 9876543210")
        .assert()
        .success()
        .stderr(predicate::str::contains("redacted spans"));

    idguard(&dir)
        .env_remove("RUST_LOG")
        .arg("mask")
        .write_stdin("call 9876543210")
        .assert()
        .success()
        .stderr(predicate::str::contains("redacted spans").not());
}
