use assert_cmd::Command;
use predicates::prelude::*;

fn omr_scan() -> Command {
    Command::cargo_bin("omr-scan").expect("binary built")
}

#[test]
fn help_lists_options() {
    omr_scan()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--page-type"))
        .stdout(predicate::str::contains("--config"));
}

#[test]
fn missing_image_prints_error_json() {
    let assert = omr_scan()
        .arg("/definitely/not/here.png")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty());

    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    let body: serde_json::Value = serde_json::from_str(stderr.trim()).expect("error json");
    assert_eq!(
        body["error"],
        "Image file not found: /definitely/not/here.png"
    );
}

#[test]
fn log_level_flag_is_parsed() {
    omr_scan()
        .args(["/definitely/not/here.png", "--log-level", "debug"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Image file not found"));

    omr_scan()
        .args(["page.png", "--log-level", "chatty"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("chatty"));
}

#[test]
fn unknown_page_type_is_rejected() {
    omr_scan()
        .args(["page.png", "--page-type", "invoice"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invoice"));
}

#[test]
fn engine_failure_is_reported_as_json() {
    let dir = tempfile::tempdir().expect("tempdir");
    let page = dir.path().join("page.png");
    image::GrayImage::from_pixel(64, 64, image::Luma([255]))
        .save(&page)
        .expect("save");
    let cfg = dir.path().join("scan.json");
    std::fs::write(
        &cfg,
        r#"{ "ocr": { "program": "/definitely/not/tesseract" } }"#,
    )
    .expect("write config");

    omr_scan()
        .arg(&page)
        .arg("--config")
        .arg(&cfg)
        .arg("--pretty")
        .assert()
        .failure()
        .stderr(predicate::str::contains("\"error\""))
        .stderr(predicate::str::contains("failed to launch OCR engine"));
}
