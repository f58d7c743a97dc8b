//! End-to-end tests of the `classform_release` binary.
//!
//! The real packager and renderer are Python tools; these tests point
//! `release.toml` at small shell scripts with the same observable contract
//! (write the executable / HTML file where asked).

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn write(path: &Path, content: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn release_cmd(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("classform_release").unwrap();
    cmd.arg("--root")
        .arg(root)
        .env("NO_COLOR", "1")
        .env("CLICOLOR", "0")
        .env_remove("CLASSFORM_RELEASE_ROOT")
        .env_remove("CLASSFORM_RELEASE_OUTPUT_DIR");
    cmd
}

/// Project sources as the widget repository lays them out.
fn project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(&root.join("src/class_form.py"), "from states import State\n");
    write(&root.join("src/states.py"), "class State: ...\n");
    write(&root.join("src/__pycache__/states.cpython-312.pyc"), "bytecode");
    write(&root.join("config.json"), "{\"透明度\": 0.8}\n");
    write(&root.join("README.md"), "# class_form\n\nA desktop timetable.\n");
    dir
}

#[test]
fn dry_run_prints_plan_without_touching_files() {
    let dir = tempfile::tempdir().unwrap();

    release_cmd(dir.path())
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("Release plan"))
        .stdout(predicate::str::contains("python -m nuitka"))
        .stdout(predicate::str::contains("--onefile-no-compression"))
        .stdout(predicate::str::contains("python -m markdown -f"))
        .stdout(predicate::str::contains("Dry run"));

    assert!(!dir.path().join("dist").exists());
}

#[test]
fn dry_run_honors_skip_and_version() {
    let dir = tempfile::tempdir().unwrap();

    release_cmd(dir.path())
        .args(["--dry-run", "--skip", "compile", "--release-version", "2.0.1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nuitka").not())
        .stdout(predicate::str::contains("class_form-2.0.1.zip"));
}

#[test]
fn conflicting_flags_are_rejected() {
    let dir = tempfile::tempdir().unwrap();

    release_cmd(dir.path())
        .args(["--clean", "--skip", "compile"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("--clean cannot be combined"));
}

#[test]
fn missing_config_fails_before_any_step() {
    let dir = project();
    std::fs::remove_file(dir.path().join("config.json")).unwrap();

    release_cmd(dir.path())
        .args(["--skip", "compile", "--skip", "readme"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing config file"));

    assert!(!dir.path().join("dist").exists());
}

#[test]
fn skipped_compile_without_executable_fails_before_any_step() {
    let dir = project();

    release_cmd(dir.path())
        .args(["--skip", "compile", "--skip", "readme"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("missing executable"))
        .stderr(predicate::str::contains("remove its --skip"));

    assert!(!dir.path().join("dist").exists());
}

#[test]
fn broken_manifest_is_reported() {
    let dir = project();
    write(&dir.path().join("release.toml"), "[compile]\nonefil = true\n");

    release_cmd(dir.path())
        .arg("--dry-run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("release.toml"));
}

#[cfg(unix)]
mod with_fake_tools {
    use super::*;
    use std::io::Read;
    use std::os::unix::fs::PermissionsExt;

    const PACKAGER: &str = r#"#!/bin/sh
out=""
for arg in "$@"; do
  case "$arg" in
    --output-dir=*) out="${arg#--output-dir=}" ;;
  esac
done
printf 'MZ fake executable' > "$out/class_form.exe"
"#;

    const RENDERER: &str = r#"#!/bin/sh
{ echo "<html><body>"; cat "$1"; echo "</body></html>"; } > "$2"
"#;

    fn script(path: &Path, body: &str) {
        write(path, body);
        let mut perms = std::fs::metadata(path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(path, perms).unwrap();
    }

    fn manifest(root: &Path, packager: &str) {
        let tools = root.join("tools");
        script(&tools.join("packager.sh"), packager);
        script(&tools.join("renderer.sh"), RENDERER);

        write(
            &root.join("release.toml"),
            &format!(
                r#"
[package]
version = "1.0.0"

[compile]
program = "{packager}"
args = []
executable = "class_form.exe"

[render]
program = "{renderer}"
args = ["{{{{input}}}}", "{{{{output}}}}"]
"#,
                packager = tools.join("packager.sh").display(),
                renderer = tools.join("renderer.sh").display(),
            ),
        );
    }

    #[test]
    fn full_release_produces_archive_and_checksum() {
        let dir = project();
        let root = dir.path();
        manifest(root, PACKAGER);

        release_cmd(root)
            .assert()
            .success()
            .stdout(predicate::str::contains("class_form-1.0.0.zip"));

        let dist = root.join("dist");
        assert_eq!(
            std::fs::read_to_string(dist.join("config.json")).unwrap(),
            "{\"透明度\": 0.8}\n"
        );
        let html = std::fs::read_to_string(dist.join("README.html")).unwrap();
        assert!(html.contains("A desktop timetable."));

        let archive = dist.join("class_form-1.0.0.zip");
        let mut zip = zip::ZipArchive::new(std::fs::File::open(&archive).unwrap()).unwrap();
        let names: Vec<String> = zip.file_names().map(String::from).collect();
        for expected in [
            "class_form.exe",
            "config.json",
            "README.html",
            "src/class_form.py",
            "src/states.py",
        ] {
            assert!(names.iter().any(|n| n == expected), "missing {expected} in {names:?}");
        }
        assert!(!names.iter().any(|n| n.ends_with(".pyc")));

        let mut exe = String::new();
        zip.by_name("class_form.exe")
            .unwrap()
            .read_to_string(&mut exe)
            .unwrap();
        assert_eq!(exe, "MZ fake executable");

        let sidecar = std::fs::read_to_string(dist.join("class_form-1.0.0.zip.sha256")).unwrap();
        assert!(sidecar.ends_with("  class_form-1.0.0.zip\n"));
        assert_eq!(sidecar.split_whitespace().next().unwrap().len(), 64);
    }

    #[test]
    fn failing_packager_stops_every_later_step() {
        let dir = project();
        let root = dir.path();
        manifest(root, "#!/bin/sh\nexit 7\n");

        release_cmd(root)
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("exited with code 7"));

        assert!(!root.join("dist/config.json").exists());
        assert!(!root.join("dist/README.html").exists());
        assert!(!root.join("dist/class_form-1.0.0.zip").exists());
    }

    #[test]
    fn packager_that_writes_nothing_is_caught() {
        let dir = project();
        let root = dir.path();
        manifest(root, "#!/bin/sh\nexit 0\n");

        release_cmd(root)
            .assert()
            .failure()
            .stderr(predicate::str::contains("expected executable was not produced"));
    }

    #[test]
    fn skipped_compile_reuses_existing_executable() {
        let dir = project();
        let root = dir.path();
        manifest(root, "#!/bin/sh\nexit 99\n");
        write(&root.join("dist/class_form.exe"), "MZ from an earlier build");

        release_cmd(root)
            .args(["--skip", "compile", "--archive", "out/release.zip"])
            .assert()
            .success();

        let archive = root.join("out/release.zip");
        let zip = zip::ZipArchive::new(std::fs::File::open(&archive).unwrap()).unwrap();
        assert!(zip.file_names().any(|n| n == "class_form.exe"));
        assert!(root.join("out/release.zip.sha256").exists());
    }
}
