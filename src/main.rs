use std::env;
use std::process::ExitCode;

use webcam_osc::config::{parse_config_path, AppConfig};
use webcam_osc::general::{check, stdin_handler};
use webcam_osc::GridOscPublisher;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let config_path = parse_config_path(&args);
    let config = AppConfig::load(&config_path)?;
    webcam_osc::set_debug_enabled(config.debug);

    if webcam_osc::is_debug_enabled() {
        println!("Loaded config from {}: {:?}", config_path, config);
    }

    let publisher = match GridOscPublisher::new(&config.osc) {
        Ok(p) => p,
        Err(err) => {
            check::print_publisher_failed(&err.to_string());
            return Err(err.into());
        }
    };

    if webcam_osc::is_debug_enabled() {
        if let Ok(local_addr) = publisher.transport().local_addr() {
            println!("[OSC] Publisher bound on {} -> target {}", local_addr, publisher.target_addr());
        }
    }
    check::print_publisher_ready(publisher.target_addr());

    let stdin_handle = stdin_handler::spawn_stdin_handler(publisher);
    stdin_handler::join_stdin_handler(stdin_handle)?;

    check::print_exit_summary();
    Ok(())
}
