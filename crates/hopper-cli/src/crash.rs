//! Durable crash reporting.
//!
//! Unexpected failures (panics and unclassified fatal errors) are the only
//! conditions that end a run. Each one appends a timestamped report to a
//! crash file in the working directory so the operator has something to
//! attach to a bug report.

use std::fs::OpenOptions;
use std::io::Write;

use hopper_core::error::HopperError;

/// Crash report file, appended to in the working directory
pub const CRASH_LOG: &str = "hopper-crash.txt";

/// Install a panic hook that writes a crash report before the process dies
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|panic_info| {
        let _ = append_entry(&panic_info.to_string());
        eprintln!("hopper crashed! This is a bug.");
        eprintln!("A crash report has been saved to '{}'.", CRASH_LOG);
        eprintln!("Error: {}", panic_info);
    }));
}

/// Record a fatal error and notify the operator
pub fn log_fatal(error: &HopperError) {
    let _ = append_entry(&format!("{:?}", error));
    eprintln!("[CRITICAL] An unexpected error occurred: {}", error);
    if let Some(suggestion) = error.suggestion() {
        eprintln!("  hint: {}", suggestion);
    }
    eprintln!("A crash report has been saved to '{}'.", CRASH_LOG);
}

/// Append a timestamped report block to the crash file
fn append_entry(context: &str) -> std::io::Result<()> {
    let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    let mut file = OpenOptions::new().create(true).append(true).open(CRASH_LOG)?;
    writeln!(file, "--- CRASH LOG: {} ---", now)?;
    writeln!(file, "{}", context)?;
    writeln!(file, "--- END OF LOG ---")?;
    writeln!(file)?;
    Ok(())
}
