//! Console countdown helper for interactive bench scripts.

use std::io::Write as _;
use std::thread;
use std::time::Duration;

/// Sleep for `seconds`, redrawing a one-line countdown on stdout.
///
/// Each second is split into ten ticks so the dotted bar grows while the
/// current second elapses. Print overhead makes the total drift slightly
/// long; this is a convenience for watching a supply settle, not a timing
/// primitive.
pub fn sleep_with_progress(seconds: u32) {
    let tick = Duration::from_millis(100);
    for second in 0..seconds {
        for dots in 0..10usize {
            print!("\r{:>5} secs {:.<dots$}", second, "");
            let _ = std::io::stdout().flush();
            thread::sleep(tick);
        }
    }
    if seconds > 0 {
        println!();
    }
}
