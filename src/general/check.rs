use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use std::io::Write;

static BANNER_PRINTED: AtomicBool = AtomicBool::new(false);

// Frame counters for the exit summary
static FRAMES_SENT: AtomicU64 = AtomicU64::new(0);
static FRAMES_FAILED: AtomicU64 = AtomicU64::new(0);

pub fn mark_frame_sent() {
    FRAMES_SENT.fetch_add(1, Ordering::SeqCst);
}

pub fn mark_frame_failed() {
    FRAMES_FAILED.fetch_add(1, Ordering::SeqCst);
}

pub fn frames_sent() -> u64 {
    FRAMES_SENT.load(Ordering::SeqCst)
}

pub fn frames_failed() -> u64 {
    FRAMES_FAILED.load(Ordering::SeqCst)
}

fn print_colored(color: Color, line: &str) {
    let mut stdout = StandardStream::stdout(ColorChoice::Always);
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(color)).set_intense(true));
    let _ = writeln!(&mut stdout, "{}", line);
    let _ = stdout.reset();
}

// Print the quick help line in blue (works on Windows CMD via termcolor)
pub fn print_quick_help() {
    print_colored(Color::Blue, "Paste a JSON array of cells to send a frame, 'help' for commands, 'exit' to quit");
}

/// Only the first banner of a run is printed.
fn claim_banner() -> bool {
    BANNER_PRINTED
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_ok()
}

pub fn print_publisher_ready(target_addr: &str) {
    if !claim_banner() {
        return;
    }
    print_colored(Color::Green, &format!("OSC publisher ready | Sending grid to {}", target_addr));
    print_quick_help();
}

pub fn print_publisher_failed(reason: &str) {
    if !claim_banner() {
        return;
    }
    print_colored(Color::Red, &format!("OSC publisher not started | {}", reason));
}

pub fn print_exit_summary() {
    let sent = frames_sent();
    let failed = frames_failed();
    let color = if failed == 0 { Color::Green } else { Color::Yellow };
    print_colored(color, &format!("Frames sent: {} | failed: {}", sent, failed));
}
