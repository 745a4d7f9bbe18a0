//! Smoke sequence for the Aim TTi LD400P: 1 kHz transient in constant
//! current, level A at 1 A, input on for five seconds, bump the level to
//! 2.5 A, read back frequency and identification, input off.
//!
//! Pass the port as the first argument, or pick one interactively.

use std::env;

use inquire::Select;

use bench_scpi::delay::sleep_with_progress;
use bench_scpi::ld400::{Ld400, Ld400Mode};
use bench_scpi::port;
use bench_scpi::types::State;

fn main() {
    env_logger::init();

    let port_name = env::args().nth(1).unwrap_or_else(|| {
        let ports = serialport::available_ports().expect("Failed to enumerate serial ports");
        if ports.is_empty() {
            eprintln!("No serial ports found!");
            std::process::exit(1);
        }
        let port_names: Vec<String> = ports.iter().map(|p| p.port_name.clone()).collect();
        Select::new("Select a serial port:", port_names)
            .prompt()
            .expect("Failed to select port")
    });

    println!("Using port: {}", port_name);

    let interface =
        port::open(&port_name, port::DEFAULT_BAUD).expect("Failed to open serial port");
    let mut ld400: Ld400<_> = Ld400::open(interface).expect("Port probe failed");

    ld400.set_frequency_hz(1000).expect("FREQ failed");
    ld400.set_mode(Ld400Mode::ConstantCurrent).expect("MODE failed");
    ld400.set_level_a(1.0).expect("Level A failed");
    ld400.set_input_state(State::On).expect("Input on failed");

    sleep_with_progress(5);

    ld400.set_level_a(2.5).expect("Level A failed");
    println!(
        "FREQ: {}",
        ld400.get_frequency_hz().expect("Frequency query failed")
    );
    println!("IDN:  {}", ld400.ident().expect("No identification reply"));

    ld400.set_input_state(State::Off).expect("Input off failed");
}
