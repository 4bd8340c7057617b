use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

fn cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_kalandkonyv-cli"))
        .args(args)
        .env_remove("BOOK_TOTAL_PAGES")
        .output()
        .expect("run kalandkonyv-cli")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn scratch_site(name: &str, pages: &[&str]) -> PathBuf {
    let root = std::env::temp_dir().join(format!("kalandkonyv-cli-{name}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&root);
    fs::create_dir_all(root.join("pages")).expect("create site");
    for page in pages {
        fs::write(root.join(page), "<html></html>").expect("write page");
    }
    root
}

#[test]
fn precache_lists_every_page() {
    let output = cli(&["precache", "--total-pages", "3"]);
    assert!(output.status.success());
    let manifest: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("json");
    let urls = manifest["urls"].as_array().expect("urls");
    let pages: Vec<&str> = urls
        .iter()
        .filter_map(|url| url.as_str())
        .filter(|url| url.starts_with("pages/"))
        .collect();
    assert_eq!(
        pages,
        vec!["pages/borito.html", "pages/1.html", "pages/2.html", "pages/3.html"]
    );
    assert_eq!(manifest["total_pages"], 3);
}

#[test]
fn check_passes_for_complete_site() {
    let root = scratch_site(
        "complete",
        &["pages/borito.html", "pages/1.html", "pages/2.html"],
    );
    let output = cli(&["check", "--root", root.to_str().expect("utf8"), "--total-pages", "2"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout(&output).contains("all 3 files present"));
    let _ = fs::remove_dir_all(&root);
}

#[test]
fn check_reports_missing_pages() {
    let root = scratch_site("partial", &["pages/borito.html", "pages/1.html"]);
    let output = cli(&["check", "--root", root.to_str().expect("utf8"), "--total-pages", "2"]);
    assert!(!output.status.success());
    assert!(stdout(&output).contains("missing: pages/2.html"));
    let _ = fs::remove_dir_all(&root);
}

#[test]
fn seeded_roll_is_repeatable() {
    let first = cli(&["roll", "--seed", "42", "--json"]);
    let second = cli(&["roll", "--seed", "42", "--json"]);
    assert!(first.status.success());
    assert_eq!(stdout(&first), stdout(&second));

    let report: serde_json::Value = serde_json::from_str(&stdout(&first)).expect("json");
    let faces = report["faces"].as_array().expect("faces");
    assert_eq!(faces.len(), 3);
    for face in faces {
        let value = face.as_u64().expect("face");
        assert!((1..=6).contains(&value));
    }
    assert!(report["label"].as_str().expect("label").ends_with("Siker"));
}

#[test]
fn roll_rejects_threshold_above_six() {
    let output = cli(&["roll", "--threshold", "7"]);
    assert!(!output.status.success());
}
