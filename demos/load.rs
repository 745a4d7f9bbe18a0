//! Smoke sequence for the Tenma 72-13210 DC load: identify, take the three
//! measurements, then drop into short-circuit mode.
//!
//! Pass the port as the first argument, or pick one interactively.

use std::env;

use inquire::Select;

use bench_scpi::load::{LoadFunction, Tenma7213210};
use bench_scpi::port;

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
    let mut load: Tenma7213210<_> = Tenma7213210::open(interface).expect("Port probe failed");

    println!("IDN:     {}", load.ident().expect("No identification reply"));
    println!("Voltage: {}", load.read_voltage().expect("Voltage query failed"));
    println!("Current: {}", load.read_current().expect("Current query failed"));
    println!("Power:   {}", load.read_power().expect("Power query failed"));

    load.set_function(LoadFunction::ShortCircuit)
        .expect("Failed to select short-circuit");
    println!(
        "Mode:    {}",
        load.get_function().expect("Mode query failed")
    );
}
