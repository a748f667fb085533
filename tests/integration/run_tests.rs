use dupe_remover::actions::{ConsolePrompt, InputError, Prompt};
use dupe_remover::config::Config;
use dupe_remover::error::ExitCode;
use dupe_remover::signal::ShutdownHandler;
use std::cell::RefCell;
use std::fs;
use std::io::{self, Cursor};
use std::path::Path;
use std::rc::Rc;
use tempfile::tempdir;

/// Prompt that keeps a shared copy of everything written.
struct Recorder {
    answers: ConsolePrompt<Cursor<Vec<u8>>, Vec<u8>>,
    lines: Rc<RefCell<Vec<String>>>,
}

impl Recorder {
    fn new(answers: &str) -> (Self, Rc<RefCell<Vec<String>>>) {
        let lines = Rc::new(RefCell::new(Vec::new()));
        let recorder = Self {
            answers: ConsolePrompt::new(Cursor::new(answers.as_bytes().to_vec()), Vec::new()),
            lines: Rc::clone(&lines),
        };
        (recorder, lines)
    }
}

impl Prompt for Recorder {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.lines.borrow_mut().push(line.to_string());
        Ok(())
    }

    fn read_integer(&mut self) -> Result<i64, InputError> {
        self.answers.read_integer()
    }
}

fn config_for(root: &Path, delete: bool) -> Config {
    Config {
        delete_duplicates: delete,
        dir_path: root.to_path_buf(),
        follow_symlinks: false,
        exit_delay_secs: 0,
    }
}

fn write(root: &Path, rel: &str, content: &[u8]) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn test_run_lists_groups_without_deleting() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a/report.txt", &[0; 10]);
    write(dir.path(), "b/report.txt", &[0; 10]);
    write(dir.path(), "c/report.txt", &[0; 99]);

    let (prompt, lines) = Recorder::new("2\n");
    let code = dupe_remover::run(&config_for(dir.path(), false), prompt, &ShutdownHandler::new())
        .unwrap();

    assert_eq!(code, ExitCode::Success);
    let lines = lines.borrow();
    assert_eq!(lines.iter().filter(|l| l.contains("Found copies")).count(), 1);
    assert!(lines.iter().any(|l| l.starts_with("1. report.txt")
        && l.ends_with(&dir.path().join("a").display().to_string())));
    assert!(lines.iter().any(|l| l.starts_with("2. report.txt")
        && l.ends_with(&dir.path().join("b").display().to_string())));
    assert!(!lines
        .iter()
        .any(|l| l.ends_with(&dir.path().join("c").display().to_string())));
    assert!(dir.path().join("b/report.txt").exists());
}

#[test]
fn test_run_deletes_selected_copy() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a/report.txt", &[0; 10]);
    write(dir.path(), "b/report.txt", &[0; 10]);

    let (prompt, lines) = Recorder::new("2\n");
    let code = dupe_remover::run(&config_for(dir.path(), true), prompt, &ShutdownHandler::new())
        .unwrap();

    assert_eq!(code, ExitCode::Success);
    assert!(dir.path().join("a/report.txt").exists());
    assert!(!dir.path().join("b/report.txt").exists());
    assert!(lines
        .borrow()
        .iter()
        .any(|l| l.contains("Deleted 1 file(s)")));
}

#[test]
fn test_run_missing_root_reports_scan_failure() {
    let dir = tempdir().unwrap();
    let (prompt, lines) = Recorder::new("");

    let code = dupe_remover::run(
        &config_for(&dir.path().join("missing"), true),
        prompt,
        &ShutdownHandler::new(),
    )
    .unwrap();

    assert_eq!(code, ExitCode::ScanFailed);
    assert_ne!(code.as_i32(), 0);
    let lines = lines.borrow();
    assert!(lines
        .iter()
        .any(|l| l.contains("Can't read directory. App will close in 0 seconds.")));
    assert!(!lines.iter().any(|l| l.contains("Found copies")));
}

#[cfg(unix)]
#[test]
fn test_run_unreadable_root_reports_no_groups() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let root = dir.path().join("root");
    write(&root, "a/report.txt", b"x");
    write(&root, "b/report.txt", b"x");
    fs::set_permissions(&root, fs::Permissions::from_mode(0o000)).unwrap();

    // Permission bits do not apply to privileged users
    if fs::read_dir(&root).is_ok() {
        fs::set_permissions(&root, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let (prompt, lines) = Recorder::new("");
    let code = dupe_remover::run(&config_for(&root, false), prompt, &ShutdownHandler::new());
    fs::set_permissions(&root, fs::Permissions::from_mode(0o755)).unwrap();

    assert_eq!(code.unwrap(), ExitCode::ScanFailed);
    assert!(!lines.borrow().iter().any(|l| l.contains("Found copies")));
}

#[test]
fn test_run_interrupted_before_scan() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a/report.txt", b"x");
    write(dir.path(), "b/report.txt", b"x");

    let shutdown = ShutdownHandler::new();
    shutdown.request_shutdown();
    let (prompt, lines) = Recorder::new("");

    let code = dupe_remover::run(&config_for(dir.path(), false), prompt, &shutdown).unwrap();

    assert_eq!(code, ExitCode::Interrupted);
    assert!(lines.borrow().is_empty());
}
