//! Basic emulator check example.
//!
//! Evaluates a recorded snapshot of a stock Android emulator image, then the
//! live system, and prints both reports.
//!
//! Run: `cargo run --example basic`

use emucheck_core::{EmulatorDetector, StaticProbe, SystemProbe};

fn main() {
    let detector = EmulatorDetector::default();

    // A stock SDK image: no conclusive hardware marker, but a generic board.
    let snapshot = StaticProbe::new()
        .with_property("ro.hardware", "ranchu")
        .with_property("ro.build.flavor", "aosp_x86_64-userdebug")
        .with_property("ro.product.board", "goldfish_x86_64")
        .with_sensor_count(5);

    match detector.check(&snapshot) {
        Ok(eval) => {
            println!("--- snapshot ---");
            println!("{}", eval.report.render_text());
        }
        Err(e) => eprintln!("snapshot check failed: {e}"),
    }

    match detector.check(&SystemProbe::default()) {
        Ok(eval) => {
            println!("\n--- this machine ---");
            println!("{}", eval.report.render_text());
        }
        Err(e) => eprintln!("live check failed: {e}"),
    }
}
