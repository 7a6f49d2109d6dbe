use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use rusqlite::Connection;
use tempfile::TempDir;

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_cardbook"))
}

/// Isolated XDG config/data homes so tests never touch the real user files.
struct Sandbox {
    root: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir_all(root.path().join("c")).expect("create config dir");
        std::fs::create_dir_all(root.path().join("d")).expect("create data dir");
        Self { root }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.root.path().join(name)
    }

    fn ledger_path(&self) -> PathBuf {
        self.path("cards.db")
    }

    fn config_path(&self) -> PathBuf {
        self.root.path().join("c").join("cardbook").join("config.toml")
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(bin());
        cmd.env("XDG_CONFIG_HOME", self.root.path().join("c"))
            .env("XDG_DATA_HOME", self.root.path().join("d"))
            .env_remove("CARDBOOK_PATH")
            .env_remove("CARDBOOK_CONFIG")
            .env_remove("CARDBOOK_USER")
            .env_remove("RUST_LOG");
        cmd
    }

    fn run(&self, args: &[&str]) -> Output {
        self.command().args(args).output().expect("run cardbook")
    }

    fn run_with_stdin(&self, args: &[&str], input: &str) -> Output {
        let mut child = self
            .command()
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("spawn cardbook");
        child
            .stdin
            .take()
            .expect("stdin")
            .write_all(input.as_bytes())
            .expect("write stdin");
        child.wait_with_output().expect("wait cardbook")
    }

    fn init(&self, extra: &[&str]) {
        let ledger = self.ledger_path();
        let mut args = vec!["init", ledger.to_str().expect("utf-8 path")];
        args.extend_from_slice(extra);
        let output = self.run(&args);
        assert!(
            output.status.success(),
            "init failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn write_file(path: &Path, contents: &str) {
    std::fs::write(path, contents).expect("write file");
}

#[test]
fn test_init_writes_ledger_and_config() {
    let sandbox = Sandbox::new();
    let ledger = sandbox.ledger_path();

    let output = sandbox.run(&[
        "init",
        ledger.to_str().unwrap(),
        "--authorized-user",
        "42",
        "--diff-mode",
        "target",
    ]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Initialized new ledger at"));
    assert!(ledger.exists());

    let config = std::fs::read_to_string(sandbox.config_path()).expect("config written");
    assert!(config.contains("authorized_users"));
    assert!(config.contains("42"));
    assert!(config.contains("diff_mode = \"target\""));

    let again = sandbox.run(&["init", ledger.to_str().unwrap()]);
    assert_eq!(again.status.code(), Some(4));
}

#[test]
fn test_missing_ledger_exits_not_found() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["search", "island"]);

    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains("No ledger found at"));
    assert!(stderr(&output).contains("cardbook init"));
}

#[test]
fn test_add_remove_search_flow() {
    let sandbox = Sandbox::new();
    sandbox.init(&[]);

    let output = sandbox.run(&["add", "Island,4"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "Added 'Island' with quantity 4\n");

    let output = sandbox.run(&["add", "island,", "2"]);
    assert_eq!(stdout(&output), "Updated 'island': quantity 4 -> 6\n");

    let output = sandbox.run(&["search", "isl"]);
    assert_eq!(stdout(&output), "Found island -> you have 6\n");

    let output = sandbox.run(&["remove", "ISLAND,6"]);
    assert_eq!(stdout(&output), "Removed ISLAND\n");

    let output = sandbox.run(&["search", "isl"]);
    assert_eq!(stdout(&output), "No results...\n");

    let output = sandbox.run(&["remove", "island,1"]);
    assert_eq!(
        stdout(&output),
        "No record found for 'island' to subtract the quantity.\n"
    );
}

#[test]
fn test_bad_record_prints_format_hint() {
    let sandbox = Sandbox::new();
    sandbox.init(&[]);

    let output = sandbox.run(&["add", "Island"]);

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "An error occurred. Check your query format: [card,quantity]!\n"
    );
}

#[test]
fn test_block_commands_from_stdin_and_file() {
    let sandbox = Sandbox::new();
    sandbox.init(&[]);

    let output = sandbox.run_with_stdin(&["add-file"], "Island,4\nMountain,2\nbad line\n");
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "Added \"Island\": quantity 4\nAdded \"Mountain\": quantity 2\n"
    );

    let wants = sandbox.path("wants.txt");
    write_file(&wants, "Island,6\nForest,3\nMountain,1\n");
    let output = sandbox.run(&["compare", wants.to_str().unwrap()]);
    assert_eq!(
        stdout(&output),
        "Found \"Island\": you need 2\nFound \"Mountain\": you need 0\n"
    );

    let output = sandbox.run_with_stdin(&["remove-file", "-"], "Forest,1\n");
    assert_eq!(stdout(&output), "No cards removed.\n");

    let output = sandbox.run_with_stdin(&["remove-file"], "Mountain,5\n");
    assert_eq!(stdout(&output), "Removed \"Mountain\": quantity 5\n");
}

#[test]
fn test_diff_follows_configured_mode() {
    let sandbox = Sandbox::new();
    sandbox.init(&["--diff-mode", "target"]);
    sandbox.run(&["add", "island,4"]);

    let output = sandbox.run_with_stdin(&["diff"], "Island,10\nSwamp,2\n");
    assert_eq!(
        stdout(&output),
        "Updated \"Island\": quantity 4 -> 10\nAdded \"Swamp\": quantity 2\n"
    );

    let output = sandbox.run(&["export"]);
    assert_eq!(stdout(&output), "island,10\nswamp,2\n");
}

#[test]
fn test_diff_delta_mode_stores_difference() {
    let sandbox = Sandbox::new();
    sandbox.init(&[]);
    sandbox.run(&["add", "island,4"]);

    sandbox.run_with_stdin(&["diff"], "island,10\n");

    let output = sandbox.run(&["search", "island"]);
    assert_eq!(stdout(&output), "Found island -> you have 6\n");
}

#[test]
fn test_export_to_file_and_empty_sentinel() {
    let sandbox = Sandbox::new();
    sandbox.init(&[]);

    let output = sandbox.run(&["export"]);
    assert_eq!(stdout(&output), "No inventory to write.\n");

    sandbox.run(&["add", "island,4"]);
    sandbox.run(&["add", "forest,1"]);
    let target = sandbox.path("inventory.txt");
    let output = sandbox.run(&["export", "--output", target.to_str().unwrap()]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let written = std::fs::read_to_string(&target).expect("export written");
    assert_eq!(written, "island,4\nforest,1\n");
}

#[test]
fn test_json_reply() {
    let sandbox = Sandbox::new();
    sandbox.init(&[]);

    let output = sandbox.run(&["--json", "add", "island,4"]);
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json reply");

    assert_eq!(value["lines"][0], "Added 'island' with quantity 4");
}

#[test]
fn test_import_csv_merges_rows() {
    let sandbox = Sandbox::new();
    sandbox.init(&[]);
    let csv = sandbox.path("collection.csv");
    write_file(
        &csv,
        "name,quantity\nIsland,4\n\"Borborygmos, Enraged\",1\nisland,2\nSwamp,lots\n",
    );

    let output = sandbox.run(&["import", csv.to_str().unwrap()]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Imported 3 rows (1 skipped)"));
    assert!(stderr(&output).contains("Skipped line 5"));

    let output = sandbox.run(&["search", "o"]);
    assert_eq!(stdout(&output), "Found borborygmos, enraged -> you have 1\n");
    let output = sandbox.run(&["search", "island"]);
    assert_eq!(stdout(&output), "Found island -> you have 6\n");
}

#[test]
fn test_convert_deck_list() {
    let sandbox = Sandbox::new();
    let input = sandbox.path("deck.txt");
    write_file(&input, "4 Lightning Bolt\nSideboard\n2 Fire // Ice\n");
    let output_path = sandbox.path("converted.txt");

    let output = sandbox.run(&[
        "convert",
        input.to_str().unwrap(),
        "--output",
        output_path.to_str().unwrap(),
    ]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let converted = std::fs::read_to_string(&output_path).expect("converted file");
    assert_eq!(converted, "Lightning Bolt, 4\nFire // Ice, 2");
}

#[test]
fn test_chat_session_with_blocks() {
    let sandbox = Sandbox::new();
    sandbox.init(&[]);

    let session = "/start\n/add Island, 4\n/addfile\nMountain,2\nForest,1\n.\n/comparefile\nIsland,5\n.\n/search\n/trade x\n/export\n";
    let output = sandbox.run_with_stdin(&["chat", "--user", "7"], session);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let expected = [
        "Hello! Use /search <query> to search.",
        "Added 'Island' with quantity 4",
        "Added \"Mountain\": quantity 2",
        "Added \"Forest\": quantity 1",
        "Found \"Island\": you need 1",
        "Please provide a query.",
        "Unknown command: /trade. Use /help to list commands.",
        "island,4",
        "mountain,2",
        "forest,1",
    ];
    assert_eq!(stdout(&output), format!("{}\n", expected.join("\n")));
}

#[test]
fn test_chat_rejects_users_outside_allow_list() {
    let sandbox = Sandbox::new();
    sandbox.init(&["--authorized-user", "1"]);

    let output = sandbox.run_with_stdin(&["chat", "--user", "2"], "/add island,4\n");

    assert_eq!(output.status.code(), Some(5));
    assert_eq!(stdout(&output), "You are not authorized to use this bot.\n");

    let output = sandbox.run(&["search", "island"]);
    assert_eq!(stdout(&output), "No results...\n");

    let output = sandbox.run_with_stdin(&["chat", "--user", "1"], "/add island,4\n");
    assert!(output.status.success());
    assert_eq!(stdout(&output), "Added 'island' with quantity 4\n");
}

#[test]
fn test_check_ok_and_failure() {
    let sandbox = Sandbox::new();
    sandbox.init(&[]);
    sandbox.run(&["add", "island,4"]);

    let output = sandbox.run(&["check"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Integrity check: OK"));

    // Older files have no CHECK constraint on quantity.
    let legacy = sandbox.path("legacy.db");
    let conn = Connection::open(&legacy).expect("open legacy db");
    conn.execute_batch(
        "CREATE TABLE cards (name TEXT PRIMARY KEY, quantity INTEGER);
         INSERT INTO cards (name, quantity) VALUES ('island', 0);",
    )
    .expect("seed legacy db");
    drop(conn);

    let output = sandbox.run(&["--ledger", legacy.to_str().unwrap(), "check"]);
    assert_eq!(output.status.code(), Some(6));
    assert!(stderr(&output).contains("Integrity check: FAILED"));
}

#[test]
fn test_completions() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["completions", "bash"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("cardbook"));
}
