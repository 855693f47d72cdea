/// Console rendering: glyphs, colours and the report layouts.
///
/// Every function writes to a caller-supplied `Write` so the session can be
/// pointed at stdout or at an in-memory buffer. Write errors are ignored: a
/// closed terminal must not abort a cleanup that is already under way.
use colored::Colorize;
use std::io::{self, Write};
use syscleaner_core::model::size::{format_count, format_size};
use syscleaner_core::model::{CleanReport, JunkReport, ScanResult};

pub const APP_TITLE: &str = "System Cleaner Pro";

/// `Write` handle to the process stdout that can be cloned into background
/// threads. Each write locks stdout for its own duration only.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stdout;

impl Write for Stdout {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stdout().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()
    }
}

pub fn banner<W: Write>(out: &mut W) {
    let title = format!("🚀 {APP_TITLE} - v{} 🚀", env!("CARGO_PKG_VERSION"));
    let _ = writeln!(out, "{}", title.bold());
    let _ = writeln!(out, "=================================");
}

pub fn farewell<W: Write>(out: &mut W) {
    let _ = writeln!(out, "\n👋 Thank you for using {APP_TITLE}!");
    let _ = out.flush();
}

pub fn heading<W: Write>(out: &mut W, text: &str) {
    let _ = writeln!(out, "\n{}", text.bold());
}

pub fn success<W: Write>(out: &mut W, text: &str) {
    let _ = writeln!(out, "{}", format!("✅ {text}").green());
}

pub fn warn<W: Write>(out: &mut W, text: &str) {
    let _ = writeln!(out, "{}", format!("⚠️  {text}").yellow());
}

pub fn error<W: Write>(out: &mut W, text: &str) {
    let _ = writeln!(out, "{}", format!("❌ {text}").red());
}

pub fn junk_report<W: Write>(out: &mut W, report: &JunkReport) {
    for root in &report.roots {
        match &root.error {
            Some(err) if root.bytes == 0 => warn(out, &format!("{}: {err}", root.root.display())),
            _ => {
                let _ = writeln!(
                    out,
                    "📂 {} → {}",
                    root.root.display(),
                    format_size(root.bytes).cyan()
                );
            }
        }
    }
}

pub fn junk_total<W: Write>(out: &mut W, report: &JunkReport) {
    let line = format!(
        "🚨 Total Junk Size: {} in {} files 🚨",
        format_size(report.total_bytes()),
        format_count(report.total_files())
    );
    let _ = writeln!(out, "\n{}", line.red().bold());
}

pub fn clean_report<W: Write>(out: &mut W, report: &CleanReport) {
    success(
        out,
        &format!(
            "Junk files cleaned: removed {} files, freed {}",
            format_count(report.removed()),
            format_size(report.bytes_freed())
        ),
    );
    if report.failed() > 0 {
        warn(
            out,
            &format!(
                "{} files could not be removed (see log)",
                format_count(report.failed())
            ),
        );
    }
}

pub fn scan_result<W: Write>(out: &mut W, result: &ScanResult) {
    if result.is_empty() {
        let _ = writeln!(
            out,
            "\nNo files larger than {} found.",
            format_size(result.min_size)
        );
        return;
    }

    heading(
        out,
        &format!(
            "📂 Top {} largest files (of {} over {}):",
            result.len(),
            format_count(result.qualifying as u64),
            format_size(result.min_size)
        ),
    );
    for entry in &result.entries {
        let _ = writeln!(
            out,
            "📄 {} → {}",
            entry.path.display(),
            format_size(entry.size).cyan()
        );
    }
}
