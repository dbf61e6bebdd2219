//! Tests that run the softproof binary.

mod common;

use std::fs;

use common::{read_png, softproof};

#[test]
fn test_init_then_render_samples() {
    let dir = tempfile::tempdir().unwrap();

    let init = softproof(dir.path()).arg("init").output().unwrap();
    assert!(init.status.success());
    let stdout = String::from_utf8_lossy(&init.stdout);
    assert!(stdout.contains("Extracted 5 files"), "{stdout}");
    assert!(dir.path().join("softproof.yaml").exists());

    // A 1 mm square of the sample sheet, picked up from ./softproof.yaml.
    let render = softproof(dir.path())
        .args(["-x", "1", "-y", "1", "-o", "sample"])
        .output()
        .unwrap();
    assert!(
        render.status.success(),
        "{}",
        String::from_utf8_lossy(&render.stderr)
    );
    let png = read_png(&dir.path().join("sample.png"));
    assert_eq!((png.width, png.height), (50, 50));
}

#[test]
fn test_init_skips_existing_files() {
    let dir = tempfile::tempdir().unwrap();
    assert!(softproof(dir.path()).arg("init").status().unwrap().success());

    let again = softproof(dir.path()).arg("init").output().unwrap();
    assert!(again.status.success());
    let stdout = String::from_utf8_lossy(&again.stdout);
    assert!(stdout.contains("Skipped 5 existing files"), "{stdout}");
}

#[test]
fn test_init_list() {
    let dir = tempfile::tempdir().unwrap();
    let list = softproof(dir.path()).args(["init", "--list"]).output().unwrap();
    let stdout = String::from_utf8_lossy(&list.stdout);
    for name in ["paper.p", "ink.i", "light.l", "proof.scr", "softproof.yaml"] {
        assert!(stdout.contains(name), "{name} missing from {stdout}");
    }
    assert!(!dir.path().join("paper.p").exists());
}

#[test]
fn test_batch_script_with_cumulative_options() {
    let dir = tempfile::tempdir().unwrap();
    assert!(softproof(dir.path()).arg("init").status().unwrap().success());
    fs::write(
        dir.path().join("small.scr"),
        "# two models, one size\n-x 0.6 -y 0.4 -o plain -P\n-o glossy -B --facets cook -I\n",
    )
    .unwrap();

    let batch = softproof(dir.path())
        .args(["batch", "small.scr"])
        .output()
        .unwrap();
    assert!(
        batch.status.success(),
        "{}",
        String::from_utf8_lossy(&batch.stderr)
    );

    for name in ["plain.png", "glossy.png"] {
        let png = read_png(&dir.path().join(name));
        assert_eq!((png.width, png.height), (30, 20), "{name}");
    }
}

#[test]
fn test_missing_batch_script_fails() {
    let dir = tempfile::tempdir().unwrap();
    let batch = softproof(dir.path()).arg("batch").output().unwrap();
    assert!(!batch.status.success());
    assert!(String::from_utf8_lossy(&batch.stderr).contains("proof.scr"));
}

#[test]
fn test_missing_paper_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let render = softproof(dir.path())
        .args(["render", "-p", "nowhere"])
        .output()
        .unwrap();
    assert!(!render.status.success());
    assert_eq!(render.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&render.stderr);
    assert!(stderr.contains("Could not set up proof picture.png"), "stderr: {stderr}");
    assert!(stderr.contains("nowhere.p"), "stderr: {stderr}");
    assert!(!dir.path().join("picture.png").exists());
}

#[test]
fn test_render_failure_is_reported_as_render_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(softproof(dir.path()).arg("init").status().unwrap().success());
    let render = softproof(dir.path())
        .args(["render", "-V", "120"])
        .output()
        .unwrap();
    assert_eq!(render.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&render.stderr);
    assert!(stderr.contains("Could not render proof picture.png"), "stderr: {stderr}");
    assert!(!dir.path().join("picture.png").exists());
}

#[test]
fn test_swatch_lists_curves() {
    let dir = tempfile::tempdir().unwrap();
    assert!(softproof(dir.path()).arg("init").status().unwrap().success());

    let swatch = softproof(dir.path()).args(["swatch", "-I"]).output().unwrap();
    assert!(swatch.status.success());
    let stdout = String::from_utf8_lossy(&swatch.stdout);
    for name in ["paper diffuse", "ink diffuse", "light direct"] {
        assert!(stdout.contains(name), "{name} missing from {stdout}");
    }
}
