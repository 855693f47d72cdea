/// End-to-end tests for the large-file scanner.
///
/// Large sizes are produced with `File::set_len`, which creates sparse files
/// on every mainstream filesystem, so a "500 MB" fixture costs no disk space.
use parking_lot::Mutex;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;
use syscleaner_core::large_files::{LargeFileScanner, SCAN_MESSAGE};
use syscleaner_core::walker::DirectoryWalker;
use syscleaner_core::{CancelToken, MemorySink, ScanError};
use tempfile::TempDir;

const MB: u64 = 1024 * 1024;

// ── Helpers ──────────────────────────────────────────────────────────────────

/// Clonable in-memory writer so the test can read what the spinner drew.
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

fn sized_file(path: &Path, len: u64) {
    fs::File::create(path).unwrap().set_len(len).unwrap();
}

fn scanner(cancel: CancelToken) -> LargeFileScanner {
    LargeFileScanner::new(DirectoryWalker::new(Arc::new(MemorySink::new()), cancel))
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// 1 MB, 500 MB and 2 MB against a 10 MB threshold: only one file qualifies,
/// so asking for the top 2 returns exactly one entry.
#[test]
fn fewer_than_top_n_qualify() {
    let tmp = TempDir::new().unwrap();
    sized_file(&tmp.path().join("small.bin"), MB);
    sized_file(&tmp.path().join("huge.iso"), 500 * MB);
    sized_file(&tmp.path().join("medium.bin"), 2 * MB);

    let out = SharedBuffer::default();
    let result = scanner(CancelToken::new())
        .scan_with_progress(tmp.path(), 10 * MB, 2, out.clone())
        .unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(result.qualifying, 1);
    assert_eq!(result.entries[0].path, tmp.path().join("huge.iso"));
    assert_eq!(result.entries[0].size, 500 * MB);
    assert!(
        out.text().ends_with(&format!("\r✅ {SCAN_MESSAGE}\n")),
        "spinner must have drawn its success frame before scan returned: {:?}",
        out.text()
    );
}

/// Results are sorted descending, truncated to N, and all strictly above θ.
#[test]
fn results_are_sorted_truncated_and_above_threshold() {
    let tmp = TempDir::new().unwrap();
    let nested = tmp.path().join("deep/er");
    fs::create_dir_all(&nested).unwrap();
    sized_file(&tmp.path().join("f30"), 30 * MB);
    sized_file(&nested.join("f50"), 50 * MB);
    sized_file(&tmp.path().join("deep/f40"), 40 * MB);
    sized_file(&tmp.path().join("f20"), 20 * MB);
    // Exactly at the threshold: must be excluded.
    sized_file(&tmp.path().join("f10"), 10 * MB);

    let result = scanner(CancelToken::new())
        .scan_with_progress(tmp.path(), 10 * MB, 3, io::sink())
        .unwrap();

    let sizes: Vec<u64> = result.entries.iter().map(|e| e.size).collect();
    assert_eq!(sizes, vec![50 * MB, 40 * MB, 30 * MB]);
    assert_eq!(result.qualifying, 4);
    assert!(result.entries.iter().all(|e| e.size > result.min_size));
}

/// A top-N of zero returns nothing but still counts qualifying files.
#[test]
fn zero_top_n_returns_empty() {
    let tmp = TempDir::new().unwrap();
    sized_file(&tmp.path().join("a"), 5 * MB);

    let result = scanner(CancelToken::new())
        .scan_with_progress(tmp.path(), 0, 0, io::sink())
        .unwrap();

    assert!(result.is_empty());
    assert_eq!(result.qualifying, 1);
}

/// Directories are never ranked, however much they contain.
#[test]
fn directories_are_never_ranked() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("bulky");
    fs::create_dir_all(&dir).unwrap();
    for i in 0..4 {
        sized_file(&dir.join(format!("part{i}")), 3 * MB);
    }

    let result = scanner(CancelToken::new())
        .scan_with_progress(tmp.path(), 5 * MB, 10, io::sink())
        .unwrap();

    assert!(result.is_empty(), "12 MB directory must not appear: {result:?}");
}

/// A missing directory fails before any spinner output and yields no result.
#[test]
fn missing_directory_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let out = SharedBuffer::default();

    let err = scanner(CancelToken::new())
        .scan_with_progress(&tmp.path().join("absent"), 0, 5, out.clone())
        .unwrap_err();

    assert!(matches!(err, ScanError::Walk(_)));
    assert!(out.text().is_empty());
}

/// An unreadable directory aborts the scan instead of ranking nothing.
#[cfg(unix)]
#[test]
fn unreadable_directory_is_an_error() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("locked");
    fs::create_dir_all(&dir).unwrap();
    sized_file(&dir.join("big"), 50 * MB);
    fs::set_permissions(&dir, fs::Permissions::from_mode(0o000)).unwrap();
    if fs::read_dir(&dir).is_ok() {
        // Running as root: permissions are not enforced.
        fs::set_permissions(&dir, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }
    let out = SharedBuffer::default();

    let result = scanner(CancelToken::new()).scan_with_progress(&dir, 0, 5, out.clone());
    fs::set_permissions(&dir, fs::Permissions::from_mode(0o755)).unwrap();

    assert!(matches!(result, Err(ScanError::Walk(_))));
    assert!(out.text().is_empty());
}

/// Cancellation aborts the scan with no partial result.
#[test]
fn cancelled_scan_returns_no_result() {
    let tmp = TempDir::new().unwrap();
    sized_file(&tmp.path().join("big"), 50 * MB);
    let cancel = CancelToken::new();
    cancel.cancel();

    let err = scanner(cancel)
        .scan_with_progress(tmp.path(), 0, 5, io::sink())
        .unwrap_err();

    assert!(matches!(err, ScanError::Cancelled { .. }));
}
