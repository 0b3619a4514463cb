//! Unified calculator driver
//!
//! Every front end drives the evaluator through [`CalculatorDriver`], so one
//! set of behavioural checks (`verify_*`) runs unchanged against the bare
//! [`Evaluator`] and against a [`KeypadDriver`] that clicks buttons by id.

use crate::core::{AngleMode, CalcError, CalcResult, Event, Evaluator, Variant};
use crate::keypad::Keypad;

/// Abstract driver for calculator interactions
///
/// # Example
///
/// ```rust
/// use keypad_calc::driver::{verify_chaining, CalculatorDriver, KeypadDriver};
///
/// let mut driver = KeypadDriver::basic();
/// driver.enter_tokens("6 + 4 × 2 =").unwrap();
/// assert_eq!(driver.display(), "20");
///
/// driver.clear();
/// verify_chaining(&mut driver).unwrap();
/// ```
pub trait CalculatorDriver {
    /// Dispatches one event
    fn press(&mut self, event: Event);

    /// Clicks a keypad button by element id
    fn press_button(&mut self, id: &str) -> CalcResult<()>;

    /// Current display text
    fn display(&self) -> String;

    /// Current angle mode, `None` on the basic calculator
    fn angle_mode(&self) -> Option<AngleMode>;

    /// Resets the calculator with the AC key
    fn clear(&mut self) {
        self.press(Event::Clear);
    }

    /// Parses whitespace-separated tokens and presses each in turn
    ///
    /// Nothing is pressed if any token fails to parse.
    fn enter_tokens(&mut self, tokens: &str) -> CalcResult<()> {
        let events = tokens
            .split_whitespace()
            .map(str::parse)
            .collect::<CalcResult<Vec<Event>>>()?;
        for event in events {
            self.press(event);
        }
        Ok(())
    }
}

impl CalculatorDriver for Evaluator {
    fn press(&mut self, event: Event) {
        Self::press(self, event);
    }

    fn press_button(&mut self, id: &str) -> CalcResult<()> {
        let event = Keypad::for_variant(self.variant())
            .handle_click(id)
            .ok_or_else(|| CalcError::unknown_button(id))?;
        Self::press(self, event);
        Ok(())
    }

    fn display(&self) -> String {
        Self::display(self).to_string()
    }

    fn angle_mode(&self) -> Option<AngleMode> {
        Self::angle_mode(self)
    }
}

/// Driver that routes every event through a keypad button
#[derive(Debug, Clone)]
pub struct KeypadDriver {
    keypad: Keypad,
    evaluator: Evaluator,
    clicks: Vec<String>,
}

impl Default for KeypadDriver {
    fn default() -> Self {
        Self::basic()
    }
}

impl KeypadDriver {
    /// Creates a driver for the basic keypad
    #[must_use]
    pub fn basic() -> Self {
        Self::with_evaluator(Evaluator::new())
    }

    /// Creates a driver for the scientific keypad
    #[must_use]
    pub fn scientific() -> Self {
        Self::with_evaluator(Evaluator::scientific())
    }

    /// Wraps an existing evaluator with the keypad for its variant
    #[must_use]
    pub fn with_evaluator(evaluator: Evaluator) -> Self {
        Self {
            keypad: Keypad::for_variant(evaluator.variant()),
            evaluator,
            clicks: Vec::new(),
        }
    }

    /// Returns the keypad
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Returns the wrapped evaluator
    #[must_use]
    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Button ids clicked so far, oldest first
    #[must_use]
    pub fn clicks(&self) -> &[String] {
        &self.clicks
    }

    /// Label of a button as currently rendered
    #[must_use]
    pub fn button_label(&self, id: &str) -> Option<String> {
        let mode = self.evaluator.state().angle_mode();
        self.keypad.find_button_by_id(id).map(|b| b.label(mode))
    }
}

impl CalculatorDriver for KeypadDriver {
    fn press(&mut self, event: Event) {
        let Some(button) = self.keypad.find_button_by_event(event) else {
            tracing::warn!(%event, "no button on this keypad");
            return;
        };
        self.clicks.push(button.id.clone());
        self.evaluator.press(event);
    }

    fn press_button(&mut self, id: &str) -> CalcResult<()> {
        let event = self
            .keypad
            .handle_click(id)
            .ok_or_else(|| CalcError::unknown_button(id))?;
        self.clicks.push(id.to_string());
        self.evaluator.press(event);
        Ok(())
    }

    fn display(&self) -> String {
        self.evaluator.display().to_string()
    }

    fn angle_mode(&self) -> Option<AngleMode> {
        self.evaluator.angle_mode()
    }
}

// ===== Unified Behaviour Checks =====
// These run against ANY CalculatorDriver implementation

fn expect_display<D: CalculatorDriver>(driver: &mut D, tokens: &str, expected: &str) -> CalcResult<()> {
    driver.clear();
    driver.enter_tokens(tokens)?;
    check(tokens, expected, &driver.display())
}

fn check(input: &str, expected: &str, actual: &str) -> CalcResult<()> {
    if actual == expected {
        Ok(())
    } else {
        Err(CalcError::mismatch(input, expected, actual))
    }
}

fn check_mode(input: &str, expected: Option<AngleMode>, actual: Option<AngleMode>) -> CalcResult<()> {
    let label = |mode: Option<AngleMode>| mode.map_or_else(|| "none".to_string(), |m| m.to_string());
    check(input, &label(expected), &label(actual))
}

/// Verifies the four binary operators
pub fn verify_basic_arithmetic<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    expect_display(driver, "2 + 3 =", "5")?;
    expect_display(driver, "1 0 - 4 =", "6")?;
    expect_display(driver, "6 × 7 =", "42")?;
    expect_display(driver, "2 0 ÷ 4 =", "5")?;
    expect_display(driver, "3 - 5 =", "-2")
}

/// Verifies strict left-to-right chaining and operator replacement
pub fn verify_chaining<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    expect_display(driver, "6 + 4 × 2 =", "20")?;
    expect_display(driver, "1 + 2 + 3 + 4 =", "10")?;
    expect_display(driver, "5 + + 3 =", "8")?;
    expect_display(driver, "5 + × 3 =", "15")?;

    // The running total shows as soon as the next operator is pressed
    driver.clear();
    driver.enter_tokens("2 + 3 ×")?;
    check("2 + 3 ×", "5", &driver.display())
}

/// Verifies that division by zero displays 0
pub fn verify_divide_by_zero<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    expect_display(driver, "7 ÷ 0 =", "0")?;
    expect_display(driver, "7 ÷ 0 + 2 =", "2")
}

/// Verifies digit and decimal-point entry
pub fn verify_decimal_entry<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    expect_display(driver, "0 0 7", "7")?;
    expect_display(driver, "1 . 5 . 2", "1.52")?;
    expect_display(driver, ". 5", "0.5")?;
    expect_display(driver, "0 . 1 + 0 . 2 =", "0.30000000000000004")?;
    expect_display(driver, "2 + . 5 =", "2.5")
}

/// Verifies that AC restores the initial display and drops pending work
pub fn verify_clear<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    driver.enter_tokens("9 + 9")?;
    driver.clear();
    check("9 + 9 AC", "0", &driver.display())?;
    driver.enter_tokens("4 =")?;
    check("9 + 9 AC 4 =", "4", &driver.display())
}

/// Verifies trig evaluation and noise snapping (scientific drivers only)
pub fn verify_trig_snapping<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    if driver.angle_mode().is_none() {
        return Err(CalcError::RequiresScientific {
            event: "sin".to_string(),
        });
    }
    if driver.angle_mode() == Some(AngleMode::Radians) {
        driver.press(Event::ToggleAngleMode);
    }
    expect_display(driver, "1 8 0 sin", "0")?;
    expect_display(driver, "9 0 cos", "0")?;
    expect_display(driver, "9 0 sin", "1")?;
    expect_display(driver, "3 0 sin + 1 =", "1.5")?;
    expect_display(driver, "0 cos", "1")
}

/// Verifies the DEG/RAD toggle and that AC keeps the mode
pub fn verify_angle_toggle<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    let Some(start) = driver.angle_mode() else {
        return Err(CalcError::RequiresScientific {
            event: Event::ToggleAngleMode.to_string(),
        });
    };
    driver.press(Event::ToggleAngleMode);
    check_mode("mode", Some(start.toggled()), driver.angle_mode())?;
    driver.clear();
    check_mode("mode AC", Some(start.toggled()), driver.angle_mode())?;
    driver.press(Event::ToggleAngleMode);
    check_mode("mode AC mode", Some(start), driver.angle_mode())
}

/// Runs every check that applies to the driver's variant
pub fn run_full_specification<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    verify_basic_arithmetic(driver)?;
    verify_chaining(driver)?;
    verify_divide_by_zero(driver)?;
    verify_decimal_entry(driver)?;
    verify_clear(driver)?;
    if driver.angle_mode().is_some() {
        verify_trig_snapping(driver)?;
        verify_angle_toggle(driver)?;
    }
    driver.clear();
    Ok(())
}

/// Runs the full check suite against a fresh evaluator of `variant`
pub fn verify_variant(variant: Variant) -> CalcResult<()> {
    run_full_specification(&mut Evaluator::with_variant(variant))?;
    run_full_specification(&mut KeypadDriver::with_evaluator(Evaluator::with_variant(
        variant,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BinaryOp, TrigFunction};

    // ===== Evaluator as driver =====

    #[test]
    fn test_evaluator_press_button() {
        let mut eval = Evaluator::new();
        CalculatorDriver::press_button(&mut eval, "btn-4").unwrap();
        CalculatorDriver::press_button(&mut eval, "btn-multiply").unwrap();
        CalculatorDriver::press_button(&mut eval, "btn-2").unwrap();
        CalculatorDriver::press_button(&mut eval, "btn-equals").unwrap();
        assert_eq!(CalculatorDriver::display(&eval), "8");
    }

    #[test]
    fn test_evaluator_rejects_scientific_button_on_basic() {
        let mut eval = Evaluator::new();
        let result = CalculatorDriver::press_button(&mut eval, "btn-sin");
        assert!(matches!(result, Err(CalcError::UnknownButton { .. })));
    }

    #[test]
    fn test_enter_tokens_is_all_or_nothing() {
        let mut eval = Evaluator::new();
        let result = eval.enter_tokens("1 2 sqrt");
        assert!(matches!(result, Err(CalcError::UnknownToken { .. })));
        assert_eq!(CalculatorDriver::display(&eval), "0");
    }

    // ===== KeypadDriver =====

    #[test]
    fn test_keypad_driver_default_is_basic() {
        let driver = KeypadDriver::default();
        assert_eq!(driver.keypad().button_count(), 17);
        assert_eq!(driver.angle_mode(), None);
    }

    #[test]
    fn test_keypad_driver_records_clicks() {
        let mut driver = KeypadDriver::basic();
        driver.enter_tokens("1 + 2 =").unwrap();
        assert_eq!(driver.clicks(), ["btn-1", "btn-add", "btn-2", "btn-equals"]);
        assert_eq!(driver.display(), "3");
    }

    #[test]
    fn test_keypad_driver_unknown_button() {
        let mut driver = KeypadDriver::scientific();
        let result = driver.press_button("btn-sqrt");
        assert!(matches!(result, Err(CalcError::UnknownButton { id }) if id == "btn-sqrt"));
        assert!(driver.clicks().is_empty());
    }

    #[test]
    fn test_keypad_driver_skips_missing_buttons() {
        let mut driver = KeypadDriver::basic();
        driver.press(Event::digit(9).unwrap());
        driver.press(Event::TrigFunction(TrigFunction::Sin));
        assert_eq!(driver.display(), "9");
        assert_eq!(driver.clicks(), ["btn-9"]);
    }

    #[test]
    fn test_keypad_driver_angle_label_tracks_mode() {
        let mut driver = KeypadDriver::scientific();
        assert_eq!(driver.button_label("btn-angle-mode").as_deref(), Some("DEG"));
        driver.press_button("btn-angle-mode").unwrap();
        assert_eq!(driver.button_label("btn-angle-mode").as_deref(), Some("RAD"));
        assert_eq!(driver.angle_mode(), Some(AngleMode::Radians));
    }

    #[test]
    fn test_keypad_driver_operator_button() {
        let mut driver = KeypadDriver::basic();
        driver.press(Event::digit(8).unwrap());
        driver.press(Event::Operator(BinaryOp::Divide));
        assert_eq!(driver.clicks().last().map(String::as_str), Some("btn-divide"));
        assert_eq!(
            driver.evaluator().state().pending_operator(),
            Some(BinaryOp::Divide)
        );
    }

    // ===== Unified checks: basic =====

    #[test]
    fn test_unified_basic_arithmetic() {
        verify_basic_arithmetic(&mut Evaluator::new()).unwrap();
        verify_basic_arithmetic(&mut KeypadDriver::basic()).unwrap();
    }

    #[test]
    fn test_unified_chaining() {
        verify_chaining(&mut Evaluator::new()).unwrap();
        verify_chaining(&mut KeypadDriver::basic()).unwrap();
    }

    #[test]
    fn test_unified_divide_by_zero() {
        verify_divide_by_zero(&mut KeypadDriver::basic()).unwrap();
    }

    #[test]
    fn test_unified_decimal_entry() {
        verify_decimal_entry(&mut Evaluator::new()).unwrap();
    }

    #[test]
    fn test_unified_clear() {
        verify_clear(&mut KeypadDriver::basic()).unwrap();
    }

    // ===== Unified checks: scientific =====

    #[test]
    fn test_unified_trig_snapping() {
        verify_trig_snapping(&mut Evaluator::scientific()).unwrap();
        verify_trig_snapping(&mut KeypadDriver::scientific()).unwrap();
    }

    #[test]
    fn test_trig_check_switches_back_to_degrees() {
        let mut driver = KeypadDriver::scientific();
        driver.press(Event::ToggleAngleMode);
        verify_trig_snapping(&mut driver).unwrap();
    }

    #[test]
    fn test_unified_angle_toggle() {
        verify_angle_toggle(&mut KeypadDriver::scientific()).unwrap();
    }

    #[test]
    fn test_scientific_checks_refuse_basic() {
        assert!(matches!(
            verify_trig_snapping(&mut Evaluator::new()),
            Err(CalcError::RequiresScientific { .. })
        ));
        assert!(verify_angle_toggle(&mut KeypadDriver::basic()).is_err());
    }

    // ===== Mismatches are errors =====

    /// Driver whose display is stuck at "0"
    #[derive(Debug, Default)]
    struct FrozenDriver {
        presses: usize,
    }

    impl CalculatorDriver for FrozenDriver {
        fn press(&mut self, _event: Event) {
            self.presses += 1;
        }

        fn press_button(&mut self, _id: &str) -> CalcResult<()> {
            self.presses += 1;
            Ok(())
        }

        fn display(&self) -> String {
            "0".to_string()
        }

        fn angle_mode(&self) -> Option<AngleMode> {
            Some(AngleMode::Degrees)
        }
    }

    #[test]
    fn test_verify_reports_mismatch_as_error() {
        let mut driver = FrozenDriver::default();
        let err = verify_basic_arithmetic(&mut driver).unwrap_err();
        assert!(matches!(
            err,
            CalcError::Mismatch { ref input, ref expected, ref actual }
                if input == "2 + 3 =" && expected == "5" && actual == "0"
        ));
        assert!(driver.presses > 0);
    }

    #[test]
    fn test_angle_toggle_mismatch_is_error() {
        let err = verify_angle_toggle(&mut FrozenDriver::default()).unwrap_err();
        assert!(matches!(err, CalcError::Mismatch { ref input, .. } if input == "mode"));
    }

    #[test]
    fn test_full_suite_returns_error_not_panic() {
        assert!(run_full_specification(&mut FrozenDriver::default()).is_err());
    }

    #[test]
    fn test_keypad_driver_press_records_clicked_buttons() {
        let mut driver = KeypadDriver::scientific();
        driver.press(Event::ToggleAngleMode);
        driver.press(Event::TrigFunction(TrigFunction::Cos));
        assert_eq!(driver.clicks(), ["btn-angle-mode", "btn-cos"]);
        assert_eq!(driver.display(), "1");
    }

    #[test]
    fn test_full_suite_both_variants() {
        verify_variant(Variant::Basic).unwrap();
        verify_variant(Variant::Scientific).unwrap();
    }
}
