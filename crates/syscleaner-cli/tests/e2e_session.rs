/// End-to-end tests for the interactive session.
///
/// Answers are scripted through a `Cursor`, output is captured in a shared
/// buffer, and memory reclamation is pinned to an unsupported platform so no
/// test ever shells out to `sudo`.
use parking_lot::Mutex;
use std::fs;
use std::io::{self, Cursor, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use syscleaner_cli::{Session, SessionOutcome};
use syscleaner_core::monitor::{MetricsSample, MetricsSource};
use syscleaner_core::reclaim::ReclaimCommand;
use syscleaner_core::{CancelToken, Config, MemorySink, MetricsError};
use tempfile::TempDir;

const MB: u64 = 1024 * 1024;

// ── Helpers ──────────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

struct FixedSource;

impl MetricsSource for FixedSource {
    fn sample(&mut self) -> Result<MetricsSample, MetricsError> {
        Ok(MetricsSample {
            cpu_percent: 50.0,
            memory_used: 4_000_000_000,
            memory_total: 16_000_000_000,
        })
    }
}

fn junk_dir(base: &Path) -> PathBuf {
    let junk = base.join("cache");
    fs::create_dir_all(junk.join("nested")).unwrap();
    fs::write(junk.join("a.tmp"), vec![0u8; 40]).unwrap();
    fs::write(junk.join("nested/b.tmp"), vec![0u8; 24]).unwrap();
    junk
}

fn config(roots: Vec<PathBuf>) -> Config {
    Config {
        cleanup_paths: roots,
        monitor_seconds: 0,
        ..Config::default()
    }
}

struct Run {
    outcome: SessionOutcome,
    output: String,
    sink: Arc<MemorySink>,
}

fn run(config: &Config, answers: &str, cancel: CancelToken) -> Run {
    colored::control::set_override(false);
    let sink = Arc::new(MemorySink::new());
    let out = SharedBuffer::default();
    let mut input = Cursor::new(answers.as_bytes().to_vec());

    let outcome = Session::new(config, sink.clone(), cancel)
        .with_reclaim(ReclaimCommand::for_os("plan9"))
        .with_metrics_source(Box::new(FixedSource))
        .run(&mut input, &mut out.clone());

    Run {
        outcome,
        output: out.text(),
        sink,
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// An empty junk root ends the session right after the report.
#[test]
fn clean_system_short_circuits() {
    let tmp = TempDir::new().unwrap();
    let run = run(&config(vec![tmp.path().to_path_buf()]), "", CancelToken::new());

    assert_eq!(run.outcome, SessionOutcome::NothingToDo);
    assert!(run.output.contains("No junk files found"));
    assert!(!run.output.contains("(yes/no)"), "no prompt may be shown");
    assert!(!run.output.contains("Optimizing Memory"));
    assert!(run.output.ends_with("Thank you for using System Cleaner Pro!\n"));
}

/// Declining both prompts leaves the junk in place and still reclaims memory.
#[test]
fn declining_keeps_files() {
    let tmp = TempDir::new().unwrap();
    let junk = junk_dir(tmp.path());

    let run = run(&config(vec![junk.clone()]), "no\nn\n", CancelToken::new());

    assert_eq!(run.outcome, SessionOutcome::Completed);
    assert!(junk.join("a.tmp").exists());
    assert!(run.output.contains("Total Junk Size: 64 B in 2 files"));
    assert!(!run.output.contains("Deleting junk files"));
    assert!(run.output.contains("Optimizing Memory"));
    assert!(run.output.contains("unsupported operating system: plan9"));
    assert!(run.sink.contains("Error optimizing memory"));
}

/// Accepting the clean removes files but keeps directories.
#[test]
fn accepting_cleans_junk() {
    let tmp = TempDir::new().unwrap();
    let junk = junk_dir(tmp.path());

    let run = run(&config(vec![junk.clone()]), "YES\nno\n", CancelToken::new());

    assert_eq!(run.outcome, SessionOutcome::Completed);
    assert!(!junk.join("a.tmp").exists());
    assert!(!junk.join("nested/b.tmp").exists());
    assert!(junk.join("nested").is_dir());
    assert!(run.output.contains("removed 2 files, freed 64 B"));
}

/// The large-file scan lists only files above the threshold, biggest first.
#[test]
fn scan_lists_largest_files() {
    let tmp = TempDir::new().unwrap();
    let junk = junk_dir(tmp.path());
    let media = tmp.path().join("media");
    fs::create_dir_all(&media).unwrap();
    fs::File::create(media.join("movie.mkv")).unwrap().set_len(300 * MB).unwrap();
    fs::File::create(media.join("song.mp3")).unwrap().set_len(5 * MB).unwrap();
    fs::File::create(media.join("disk.img")).unwrap().set_len(120 * MB).unwrap();

    let mut cfg = config(vec![junk]);
    cfg.max_file_size = 100 * MB;
    cfg.top_files = 5;
    let answers = format!("no\ny\n{}\n", media.display());

    let run = run(&cfg, &answers, CancelToken::new());

    assert_eq!(run.outcome, SessionOutcome::Completed);
    let movie = run.output.find("movie.mkv → 300.0 MB").expect("movie listed");
    let disk = run.output.find("disk.img → 120.0 MB").expect("disk listed");
    assert!(movie < disk);
    assert!(!run.output.contains("song.mp3"));
    assert!(run.output.contains("✅ Analyzing files..."));
}

/// A blank directory answer skips the scan without failing the session.
#[test]
fn blank_directory_skips_scan() {
    let tmp = TempDir::new().unwrap();
    let junk = junk_dir(tmp.path());

    let run = run(&config(vec![junk]), "no\nyes\n\n", CancelToken::new());

    assert_eq!(run.outcome, SessionOutcome::Completed);
    assert!(run.output.contains("No directory entered"));
    assert!(!run.output.contains("Analyzing files"));
}

/// A missing scan directory is reported and the session carries on.
#[test]
fn missing_scan_directory_is_reported() {
    let tmp = TempDir::new().unwrap();
    let junk = junk_dir(tmp.path());
    let answers = format!("no\nyes\n{}\n", tmp.path().join("nowhere").display());

    let run = run(&config(vec![junk]), &answers, CancelToken::new());

    assert_eq!(run.outcome, SessionOutcome::Completed);
    assert!(run.output.contains("❌ Could not scan"));
    assert!(run.sink.contains("Error scanning for large files"));
    assert!(run.output.contains("Optimizing Memory"));
}

/// The live monitor runs alongside reclamation and is joined before the farewell.
#[test]
fn monitor_runs_before_farewell() {
    let tmp = TempDir::new().unwrap();
    let junk = junk_dir(tmp.path());
    let mut cfg = config(vec![junk]);
    cfg.monitor_seconds = 1;
    cfg.monitor_interval_ms = 100;

    let run = run(&cfg, "no\nno\n", CancelToken::new());

    assert_eq!(run.outcome, SessionOutcome::Completed);
    let readout = run.output.find("CPU Usage: 50.00%").expect("monitor sampled");
    let farewell = run.output.find("Thank you for using").unwrap();
    assert!(readout < farewell);
}

/// Cancellation before the session starts skips every step after the report.
#[test]
fn cancelled_session_is_interrupted() {
    let tmp = TempDir::new().unwrap();
    let junk = junk_dir(tmp.path());
    let cancel = CancelToken::new();
    cancel.cancel();

    let run = run(&config(vec![junk.clone()]), "yes\nyes\n/\n", cancel);

    assert_eq!(run.outcome, SessionOutcome::Interrupted);
    assert_eq!(run.outcome.exit_code(), 130);
    assert!(junk.join("a.tmp").exists());
    assert!(!run.output.contains("(yes/no)"));
    assert!(!run.output.contains("Optimizing Memory"));
    assert!(run.output.contains("Interrupted"));
    assert!(run.output.ends_with("Thank you for using System Cleaner Pro!\n"));
}
