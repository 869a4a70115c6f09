use std::io::{self, stdin, BufRead};
use std::thread;

use crate::cell::CellData;
use crate::remote::osc_sender::{GridOscPublisher, Transport};

/// What the read loop should do after a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Continue,
    Exit,
}

/// Handle one console line. Lines starting with `[` are a JSON array of
/// cells and go out as one bundle; everything else is a command.
/// Publish errors are reported and the loop keeps going.
pub fn handle_line<T: Transport>(line: &str, publisher: &GridOscPublisher<T>) -> Command {
    let cmd = line.trim();
    if cmd.is_empty() {
        return Command::Exit;
    }
    if cmd.eq_ignore_ascii_case("exit") || cmd.eq_ignore_ascii_case("quit") || cmd.eq_ignore_ascii_case("q") {
        return Command::Exit;
    }

    if cmd.starts_with('[') {
        let cells: Vec<CellData> = match serde_json::from_str(cmd) {
            Ok(cells) => cells,
            Err(err) => {
                eprintln!("[GRID] Invalid frame: {}", err);
                crate::general::check::mark_frame_failed();
                return Command::Continue;
            }
        };
        match publisher.publish(&cells) {
            Ok(()) => {
                crate::general::check::mark_frame_sent();
                if crate::is_debug_enabled() {
                    println!("[OSC] Sent {} cells ({} messages) to {}", cells.len(), cells.len() * 8, publisher.target_addr());
                }
            }
            Err(err) => {
                crate::general::check::mark_frame_failed();
                eprintln!("[OSC] Failed to send to {}: {}", publisher.target_addr(), err);
            }
        }
        return Command::Continue;
    }

    if cmd.eq_ignore_ascii_case("debug on") || cmd.eq_ignore_ascii_case("debug enable") {
        crate::set_debug_enabled(true);
        println!("Debug enabled");
        return Command::Continue;
    }
    if cmd.eq_ignore_ascii_case("debug off") || cmd.eq_ignore_ascii_case("debug disable") {
        crate::set_debug_enabled(false);
        println!("Debug disabled");
        return Command::Continue;
    }
    if cmd.eq_ignore_ascii_case("help") || cmd.eq_ignore_ascii_case("h") {
        println!("Commands:");
        println!("  [ {{cell}}, ... ]  - Send one frame (JSON array of cells)");
        println!("  debug on/off     - Enable/Disable verbose debug prints");
        println!("  help/h           - Show this help");
        println!("  exit/quit/q      - Exit program");
        return Command::Continue;
    }

    println!("Unrecognized command: '{}'. Type 'help' for available commands.", cmd);
    Command::Continue
}

/// Spawn a thread that reads stdin line by line until EOF, an empty line or 'exit'.
pub fn spawn_stdin_handler<T>(publisher: GridOscPublisher<T>) -> thread::JoinHandle<()>
where
    T: Transport + Send + 'static,
{
    thread::spawn(move || {
        let stdin = stdin();
        let mut lock = stdin.lock();
        let mut line = String::new();
        loop {
            line.clear();
            match lock.read_line(&mut line) {
                Ok(0) | Err(_) => break,
                Ok(_) => {}
            }
            if handle_line(&line, &publisher) == Command::Exit {
                break;
            }
        }
    })
}

/// Wait for the stdin thread. A panic in it becomes an error instead of a clean exit.
pub fn join_stdin_handler(handle: thread::JoinHandle<()>) -> io::Result<()> {
    handle
        .join()
        .map_err(|_| io::Error::other("stdin handler thread panicked"))
}
