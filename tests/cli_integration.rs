#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

struct Vault {
    temp: TempDir,
}

impl Vault {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("work")).unwrap();
        Self { temp }
    }

    fn home(&self) -> PathBuf {
        self.temp.path().join("home")
    }

    fn work(&self) -> PathBuf {
        self.temp.path().join("work")
    }

    fn library(&self, name: &str) -> PathBuf {
        self.home().join("libraries").join(format!("{name}.md"))
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::new(cargo_bin("studyvault"));
        cmd.env("STUDYVAULT_HOME", self.home())
            .env("NO_COLOR", "1")
            .env_remove("STUDYVAULT_LOG")
            .current_dir(self.work());
        cmd
    }

    fn run(&self, args: &[&str]) {
        self.cmd().args(args).assert().success();
    }

    fn read(&self, name: &str) -> String {
        fs::read_to_string(self.library(name)).unwrap()
    }
}

#[test]
fn create_and_list() {
    let vault = Vault::new();

    vault
        .cmd()
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No libraries found"));
    assert!(vault.home().join("libraries").is_dir());

    vault
        .cmd()
        .args(["create", "bio"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[+] Loaded library: bio.md"));
    assert_eq!(vault.read("bio"), "# bio Library\n");

    vault
        .cmd()
        .args(["create", "bio"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("already exists"));

    vault.run(&["create", "chem"]);
    vault
        .cmd()
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains(" 1] bio.md").and(predicate::str::contains(" 2] chem.md")));
}

#[test]
fn store_then_index() {
    let vault = Vault::new();
    vault.run(&["create", "bio"]);
    vault.run(&["store", "bio", "Cells", "Cells", "are", "small"]);
    vault
        .cmd()
        .args(["store", "bio", "Genes"])
        .write_stdin("line one\nline two\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Content appended to"));

    assert_eq!(
        vault.read("bio"),
        "# bio Library\n\n\n## Cells\nCells are small\n\n\n## Genes\nline one\nline two\n"
    );

    vault
        .cmd()
        .args(["index", "bio"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("1. Cells  (line 4)")
                .and(predicate::str::contains("2. Genes  (line 8)")),
        );

    vault
        .cmd()
        .args(["index", "bio", "--show", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("  line one\n  line two\n"));

    vault
        .cmd()
        .args(["index", "bio", "--show", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid selection"));
}

#[test]
fn search_sections_and_lines() {
    let vault = Vault::new();
    vault.run(&["create", "bio"]);
    vault.run(&["store", "bio", "Cells", "Mitosis splits cells"]);
    vault.run(&["store", "bio", "Genes", "DNA"]);

    vault
        .cmd()
        .args(["search", "bio", "mitosis"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Found 1 section(s) containing 'mitosis':")
                .and(predicate::str::contains(" Mitosis splits cells"))
                .and(predicate::str::contains("DNA").not()),
        );

    vault
        .cmd()
        .args(["search", "bio", "dna", "--lines"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Matches found (1):").and(predicate::str::contains("9: DNA")));

    vault
        .cmd()
        .args(["search", "bio", "ribosome"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[*] No sections contain this keyword."));
}

#[test]
fn update_replaces_first_occurrence() {
    let vault = Vault::new();
    vault.run(&["create", "bio"]);
    vault.run(&["store", "bio", "Notes", "cell cell"]);

    vault
        .cmd()
        .args(["update", "bio", "cell", "Cell"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Content successfully updated."));
    assert!(vault.read("bio").contains("Cell cell\n"));

    vault.run(&[
        "update",
        "bio",
        "--command",
        r#"Update: "Notes" with: "Biology notes""#,
    ]);
    assert!(vault.read("bio").contains("## Biology notes\n"));

    let before = vault.read("bio");
    vault
        .cmd()
        .args(["update", "bio", "missing", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("was not found"));
    assert_eq!(vault.read("bio"), before);

    vault
        .cmd()
        .args(["update", "bio", "--command", "Update: cell with: x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid format"));
}

#[test]
fn delete_lists_candidates_then_edits_selected_lines() {
    let vault = Vault::new();
    vault.run(&["create", "bio"]);
    vault.run(&["store", "bio", "Notes", "remove me"]);

    vault
        .cmd()
        .args(["delete", "bio", "me"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Lines containing the keyword:")
                .and(predicate::str::contains("5: remove me"))
                .and(predicate::str::contains("--lines")),
        );
    assert!(vault.read("bio").contains("remove me"));

    vault
        .cmd()
        .args(["delete", "bio", " me", "--lines", "2,5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Keyword deleted from selected lines."));
    assert!(vault.read("bio").ends_with("## Notes\nremove\n"));

    vault
        .cmd()
        .args(["delete", "bio", "zzz", "--lines", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Keyword was not found"));
}

#[test]
fn insert_with_yes_writes() {
    let vault = Vault::new();
    vault.run(&["create", "bio"]);
    vault
        .cmd()
        .args(["store", "bio", "Cells"])
        .write_stdin("one\ntwo\nthree\n")
        .assert()
        .success();

    vault
        .cmd()
        .args([
            "insert", "bio", "Cells", "--at", "line", "--line", "1", "--yes", "zero",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("+ zero")
                .and(predicate::str::contains("Content appended successfully.")),
        );
    assert!(vault.read("bio").ends_with("## Cells\nzero\none\ntwo\nthree\n"));
}

#[test]
fn insert_declined_leaves_file_untouched() {
    let vault = Vault::new();
    vault.run(&["create", "bio"]);
    vault.run(&["store", "bio", "Cells", "one"]);
    let before = vault.read("bio");

    vault
        .cmd()
        .args(["insert", "bio", "Cells", "--at", "end", "last"])
        .write_stdin("no\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Operation cancelled."));
    assert_eq!(vault.read("bio"), before);

    vault
        .cmd()
        .args(["insert", "bio", "Cells", "--at", "end", "last"])
        .write_stdin("yes\n")
        .assert()
        .success();
    assert!(vault.read("bio").ends_with("## Cells\none\nlast\n"));
}

#[test]
fn insert_errors() {
    let vault = Vault::new();
    vault.run(&["create", "bio"]);
    vault.run(&["store", "bio", "Cells", "one"]);

    vault
        .cmd()
        .args(["insert", "bio", "Genes", "--at", "start", "-y", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Section not found: Genes"));

    vault
        .cmd()
        .args(["insert", "bio", "Cells", "--at", "line", "--line", "4", "-y", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid line number"));

    vault
        .cmd()
        .args(["insert", "bio", "Cells", "--at", "line", "-y", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--line is required"));
}

#[test]
fn export_writes_pdf() {
    let vault = Vault::new();
    vault.run(&["create", "bio"]);
    vault.run(&["store", "bio", "Cells", "Cells are small"]);

    vault
        .cmd()
        .args(["export", "bio"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported to PDF:"));

    let pdf = fs::read(vault.work().join("exports").join("bio.pdf")).unwrap();
    assert!(pdf.starts_with(b"%PDF"));

    vault.run(&["export", "bio", "--output", "summary"]);
    assert!(vault.work().join("exports").join("summary.pdf").exists());
}

#[test]
fn missing_library_is_an_error() {
    let vault = Vault::new();
    vault
        .cmd()
        .args(["index", "nope"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("[!] Library not found"));
}

#[test]
fn config_round_trip() {
    let vault = Vault::new();
    let libs = vault.temp.path().join("elsewhere");

    vault
        .cmd()
        .args(["config", "library-dir", libs.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("library-dir set to"));

    vault
        .cmd()
        .args(["config"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains(libs.to_str().unwrap())
                .and(predicate::str::contains("export-dir  = (default)")),
        );

    vault.run(&["create", "bio"]);
    assert!(libs.join("bio.md").exists());
    assert!(!vault.library("bio").exists());

    vault
        .cmd()
        .args(["config", "colour", "red"])
        .assert()
        .failure();
}

#[test]
fn library_dir_flag_overrides_config() {
    let vault = Vault::new();
    let libs = vault.temp.path().join("flagged");
    vault
        .cmd()
        .args(["--library-dir", libs.to_str().unwrap(), "create", "bio"])
        .assert()
        .success();
    assert!(libs.join("bio.md").exists());
}

#[test]
fn shell_session_from_stdin() {
    let vault = Vault::new();
    let script = "create\nbio\nstore\nCells\nsmall cells\n\nindex\n1\nexit\nexit\n";

    vault
        .cmd()
        .write_stdin(script)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("StudyVault Main Menu")
                .and(predicate::str::contains("Library Loaded: bio.md"))
                .and(predicate::str::contains("Content appended to"))
                .and(predicate::str::contains("  small cells\n"))
                .and(predicate::str::contains("Goodbye!")),
        );
    assert_eq!(vault.read("bio"), "# bio Library\n\n\n## Cells\nsmall cells\n");
}

#[test]
fn shell_keeps_going_after_errors_and_stops_at_eof() {
    let vault = Vault::new();
    vault.run(&["create", "bio"]);

    vault
        .cmd()
        .arg("shell")
        .write_stdin("bogus\nlist\n1\nsearch\nnothing\nupdate\nnot a command\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Loaded library: bio.md")
                .and(predicate::str::contains("No sections contain this keyword.")),
        )
        .stderr(
            predicate::str::contains("Unknown command")
                .and(predicate::str::contains("Invalid format")),
        );
}
