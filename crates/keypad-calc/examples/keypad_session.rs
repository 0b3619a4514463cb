//! Keypad Session Demo
//!
//! Clicks through a scientific session button by button, then runs the
//! shared behaviour checks against both drivers.
//!
//! Run with: cargo run --example keypad_session

use keypad_calc::driver::{run_full_specification, CalculatorDriver, KeypadDriver};
use keypad_calc::prelude::*;

fn main() -> CalcResult<()> {
    println!("╔══════════════════════════════════════════════════╗");
    println!("║         Keypad Calculator - Scientific Demo      ║");
    println!("╚══════════════════════════════════════════════════╝");
    println!();

    let mut driver = KeypadDriver::scientific();
    print!("{}", driver.keypad().render_text(AngleMode::Degrees));
    println!();

    let session = [
        "btn-1", "btn-8", "btn-0", "btn-sin", "btn-add", "btn-4", "btn-5", "btn-tan",
        "btn-equals", "btn-angle-mode", "btn-0", "btn-cos",
    ];
    for id in session {
        driver.press_button(id)?;
        let label = driver.button_label(id).unwrap_or_default();
        println!("  {label:>5}  →  {:<20} {:?}", driver.display(), driver.angle_mode());
    }
    println!();

    println!("Running behaviour checks:");
    run_full_specification(&mut Evaluator::scientific())?;
    println!("  ✓ Evaluator (scientific)");
    run_full_specification(&mut KeypadDriver::basic())?;
    println!("  ✓ KeypadDriver (basic)");
    run_full_specification(&mut driver)?;
    println!("  ✓ KeypadDriver (scientific)");
    Ok(())
}
