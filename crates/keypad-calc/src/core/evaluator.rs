//! Keypad evaluator state machine
//!
//! [`CalculatorState`] holds everything the calculator knows and
//! [`CalculatorState::next`] is the single transition function over it. An
//! [`Evaluator`] owns one state plus the [`Variant`] chosen at construction and
//! is the only long-lived handle a presentation layer needs.
//!
//! Binary operations resolve strictly left to right: pressing an operator
//! while another is pending evaluates the pending one first, so
//! `6 + 4 × 2 =` shows `20`.

use super::format::{format_number, is_display_text, parse_number};
use super::{AngleMode, BinaryOp, CalcError, CalcResult, Digit, Event, TrigFunction};
use serde::{Deserialize, Deserializer, Serialize};

/// Which keypad the evaluator serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Four operators, no trig, no angle mode
    #[default]
    Basic,
    /// Basic plus sin/cos/tan and a degrees/radians toggle
    Scientific,
}

impl Variant {
    /// Returns true if trig and angle-mode events are honoured
    #[must_use]
    pub const fn has_trig(self) -> bool {
        matches!(self, Self::Scientific)
    }
}

/// What the last event did to the display
///
/// Anything other than `Typing` means the next digit starts a fresh operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Entry {
    /// Digits extend the display
    #[default]
    Typing,
    /// An operator was just pressed; another operator replaces it
    AfterOperator,
    /// The display holds an `=` or trig result
    AfterResult,
}

/// The complete calculator state
///
/// Deserializing goes through [`CalculatorState::validated`], so a snapshot
/// can only describe a state the transition function could have produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalculatorState {
    display: String,
    pending_operand: Option<String>,
    pending_operator: Option<BinaryOp>,
    entry: Entry,
    angle_mode: AngleMode,
}

/// Unchecked wire form of [`CalculatorState`]
#[derive(Deserialize)]
struct StateSnapshot {
    display: String,
    #[serde(default)]
    pending_operand: Option<String>,
    #[serde(default)]
    pending_operator: Option<BinaryOp>,
    #[serde(default)]
    entry: Entry,
    #[serde(default)]
    angle_mode: AngleMode,
}

impl<'de> Deserialize<'de> for CalculatorState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let snapshot = StateSnapshot::deserialize(deserializer)?;
        Self::validated(snapshot).map_err(serde::de::Error::custom)
    }
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self::with_angle_mode(AngleMode::default())
    }
}

impl CalculatorState {
    /// Creates the initial state with a given angle mode
    #[must_use]
    pub fn with_angle_mode(angle_mode: AngleMode) -> Self {
        Self {
            display: "0".to_string(),
            pending_operand: None,
            pending_operator: None,
            entry: Entry::Typing,
            angle_mode,
        }
    }

    fn validated(snapshot: StateSnapshot) -> CalcResult<Self> {
        if !is_display_text(&snapshot.display) {
            return Err(CalcError::invalid_state(format!(
                "display {:?} is not a number",
                snapshot.display
            )));
        }
        if let Some(operand) = snapshot.pending_operand.as_deref() {
            if !is_display_text(operand) {
                return Err(CalcError::invalid_state(format!(
                    "pending operand {operand:?} is not a number"
                )));
            }
        }
        if snapshot.pending_operand.is_some() != snapshot.pending_operator.is_some() {
            return Err(CalcError::invalid_state(
                "pending operand and operator must be set together",
            ));
        }
        if snapshot.entry == Entry::AfterOperator && snapshot.pending_operator.is_none() {
            return Err(CalcError::invalid_state(
                "an operator was just pressed but none is pending",
            ));
        }
        Ok(Self {
            display: snapshot.display,
            pending_operand: snapshot.pending_operand,
            pending_operator: snapshot.pending_operator,
            entry: snapshot.entry,
            angle_mode: snapshot.angle_mode,
        })
    }

    /// Current display text
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Left operand captured by the last operator press
    #[must_use]
    pub fn pending_operand(&self) -> Option<&str> {
        self.pending_operand.as_deref()
    }

    /// Operator waiting for its right operand
    #[must_use]
    pub fn pending_operator(&self) -> Option<BinaryOp> {
        self.pending_operator
    }

    /// True if the next digit starts a new number
    #[must_use]
    pub fn awaiting_fresh_operand(&self) -> bool {
        self.entry != Entry::Typing
    }

    /// Current angle mode
    #[must_use]
    pub fn angle_mode(&self) -> AngleMode {
        self.angle_mode
    }

    /// Applies one event and returns the following state
    ///
    /// Total over every state and event. Trig and angle-mode events leave a
    /// basic calculator's state untouched.
    #[must_use]
    pub fn next(mut self, event: Event, variant: Variant) -> Self {
        match event {
            Event::Digit(digit) => self.input_digit(digit),
            Event::DecimalPoint => self.input_decimal(),
            Event::Clear => self.clear(),
            Event::Operator(op) => self.input_operator(op),
            Event::Equals => self.calculate(),
            Event::TrigFunction(function) if variant.has_trig() => self.apply_trig(function),
            Event::ToggleAngleMode if variant.has_trig() => {
                self.angle_mode = self.angle_mode.toggled();
            }
            Event::TrigFunction(_) | Event::ToggleAngleMode => {
                tracing::warn!(%event, "ignored on the basic calculator");
            }
        }
        self
    }

    fn input_digit(&mut self, digit: Digit) {
        if self.awaiting_fresh_operand() {
            self.display = digit.to_string();
            self.entry = Entry::Typing;
        } else if self.display == "0" {
            self.display = digit.to_string();
        } else {
            self.display.push(digit.as_char());
        }
    }

    fn input_decimal(&mut self) {
        if self.awaiting_fresh_operand() {
            self.display = "0.".to_string();
            self.entry = Entry::Typing;
        } else if !self.display.contains('.') {
            self.display.push('.');
        }
    }

    fn clear(&mut self) {
        *self = Self::with_angle_mode(self.angle_mode);
    }

    fn input_operator(&mut self, op: BinaryOp) {
        // A second operator in a row only changes which operator is pending
        if self.entry == Entry::AfterOperator && self.pending_operator.is_some() {
            self.pending_operator = Some(op);
            return;
        }

        match self.pending_operand.as_deref() {
            None => self.pending_operand = Some(self.display.clone()),
            Some(left) => {
                if let Some(pending) = self.pending_operator {
                    let result = format_number(evaluate(left, pending, &self.display));
                    tracing::trace!(%left, op = %pending, right = %self.display, %result, "chained");
                    self.display = result.clone();
                    self.pending_operand = Some(result);
                }
            }
        }

        self.pending_operator = Some(op);
        self.entry = Entry::AfterOperator;
    }

    fn calculate(&mut self) {
        let (Some(left), Some(op)) = (self.pending_operand.as_deref(), self.pending_operator)
        else {
            return;
        };
        let result = evaluate(left, op, &self.display);
        self.display = format_number(result);
        self.pending_operand = None;
        self.pending_operator = None;
        self.entry = Entry::AfterResult;
    }

    fn apply_trig(&mut self, function: TrigFunction) {
        let value = function.evaluate(parse_number(&self.display), self.angle_mode);
        self.display = format_number(value);
        self.entry = Entry::AfterResult;
    }
}

fn evaluate(left: &str, op: BinaryOp, right: &str) -> f64 {
    op.apply(parse_number(left), parse_number(right))
}

/// Event-driven calculator
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    variant: Variant,
    state: CalculatorState,
}

impl Evaluator {
    /// Creates a basic four-operator calculator
    #[must_use]
    pub fn new() -> Self {
        Self::with_variant(Variant::Basic)
    }

    /// Creates a scientific calculator in degrees mode
    #[must_use]
    pub fn scientific() -> Self {
        Self::with_variant(Variant::Scientific)
    }

    /// Creates a calculator of the given variant
    #[must_use]
    pub fn with_variant(variant: Variant) -> Self {
        Self {
            variant,
            state: CalculatorState::default(),
        }
    }

    /// Creates a calculator from an explicit starting state
    #[must_use]
    pub fn from_state(variant: Variant, state: CalculatorState) -> Self {
        Self { variant, state }
    }

    /// Feeds one event through the state machine
    pub fn press(&mut self, event: Event) -> &CalculatorState {
        let state = std::mem::take(&mut self.state);
        self.state = state.next(event, self.variant);
        tracing::debug!(
            %event,
            display = %self.state.display,
            awaiting = self.state.awaiting_fresh_operand(),
            "event applied"
        );
        &self.state
    }

    /// Feeds a sequence of events, in order
    pub fn press_all(&mut self, events: impl IntoIterator<Item = Event>) -> &CalculatorState {
        for event in events {
            self.press(event);
        }
        &self.state
    }

    /// Current display text
    #[must_use]
    pub fn display(&self) -> &str {
        self.state.display()
    }

    /// Current angle mode, or `None` on the basic calculator
    #[must_use]
    pub fn angle_mode(&self) -> Option<AngleMode> {
        self.variant.has_trig().then_some(self.state.angle_mode)
    }

    /// The variant chosen at construction
    #[must_use]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Full state, for inspection
    #[must_use]
    pub fn state(&self) -> &CalculatorState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events(tokens: &str) -> Vec<Event> {
        tokens
            .split_whitespace()
            .map(|t| t.parse().unwrap())
            .collect()
    }

    fn run(variant: Variant, tokens: &str) -> Evaluator {
        let mut eval = Evaluator::with_variant(variant);
        eval.press_all(events(tokens));
        eval
    }

    fn basic(tokens: &str) -> String {
        run(Variant::Basic, tokens).display().to_string()
    }

    fn scientific(tokens: &str) -> String {
        run(Variant::Scientific, tokens).display().to_string()
    }

    // ===== Initial state =====

    #[test]
    fn test_initial_state() {
        let eval = Evaluator::new();
        assert_eq!(eval.display(), "0");
        assert_eq!(eval.state().pending_operand(), None);
        assert_eq!(eval.state().pending_operator(), None);
        assert!(!eval.state().awaiting_fresh_operand());
        assert_eq!(eval.angle_mode(), None);
    }

    #[test]
    fn test_scientific_initial_angle_mode() {
        let eval = Evaluator::scientific();
        assert_eq!(eval.angle_mode(), Some(AngleMode::Degrees));
        assert_eq!(eval.variant(), Variant::Scientific);
    }

    // ===== Digit entry =====

    #[test]
    fn test_digits_concatenate() {
        assert_eq!(basic("1 2 3"), "123");
    }

    #[test]
    fn test_leading_zeros_collapse() {
        assert_eq!(basic("0 0 7"), "7");
        assert_eq!(basic("0 0"), "0");
    }

    #[test]
    fn test_zero_before_decimal_kept() {
        assert_eq!(basic("0 . 5"), "0.5");
    }

    // ===== Decimal point =====

    #[test]
    fn test_decimal_point_appends_once() {
        assert_eq!(basic("1 . . 5"), "1.5");
        assert_eq!(basic("1 . 5 . 2"), "1.52");
    }

    #[test]
    fn test_decimal_point_twice_from_zero() {
        assert_eq!(basic("."), "0.");
        assert_eq!(basic(". ."), "0.");
    }

    #[test]
    fn test_decimal_point_after_operator_starts_fresh() {
        assert_eq!(basic("7 + ."), "0.");
        assert_eq!(basic("7 + . 5 ="), "7.5");
    }

    // ===== Operators and equals =====

    #[test]
    fn test_simple_operations() {
        assert_eq!(basic("2 + 3 ="), "5");
        assert_eq!(basic("1 0 - 4 ="), "6");
        assert_eq!(basic("6 × 7 ="), "42");
        assert_eq!(basic("2 0 ÷ 4 ="), "5");
    }

    #[test]
    fn test_negative_result() {
        assert_eq!(basic("3 - 5 ="), "-2");
    }

    #[test]
    fn test_chaining_is_left_to_right() {
        assert_eq!(basic("6 + 4 × 2 ="), "20");
    }

    #[test]
    fn test_chaining_shows_intermediate_result() {
        let eval = run(Variant::Basic, "6 + 4 ×");
        assert_eq!(eval.display(), "10");
        assert_eq!(eval.state().pending_operand(), Some("10"));
        assert_eq!(eval.state().pending_operator(), Some(BinaryOp::Multiply));
        assert!(eval.state().awaiting_fresh_operand());
    }

    #[test]
    fn test_repeated_operator_keeps_last() {
        assert_eq!(basic("5 + + 3 ="), "8");
        assert_eq!(basic("5 + × 3 ="), "15");
    }

    #[test]
    fn test_repeated_operator_leaves_display() {
        let eval = run(Variant::Basic, "5 + +");
        assert_eq!(eval.display(), "5");
        assert_eq!(eval.state().pending_operand(), Some("5"));
    }

    #[test]
    fn test_equals_without_pending_is_noop() {
        let eval = run(Variant::Basic, "4 2 =");
        assert_eq!(eval.display(), "42");
        assert!(!eval.state().awaiting_fresh_operand());
    }

    #[test]
    fn test_equals_clears_pending() {
        let eval = run(Variant::Basic, "2 + 3 =");
        assert_eq!(eval.state().pending_operand(), None);
        assert_eq!(eval.state().pending_operator(), None);
        assert!(eval.state().awaiting_fresh_operand());
    }

    #[test]
    fn test_equals_right_after_operator_reuses_display() {
        assert_eq!(basic("5 + ="), "10");
    }

    #[test]
    fn test_second_equals_is_noop() {
        assert_eq!(basic("2 + 3 = ="), "5");
    }

    #[test]
    fn test_digit_after_equals_starts_fresh() {
        assert_eq!(basic("2 + 3 = 7"), "7");
    }

    #[test]
    fn test_operator_after_equals_continues_from_result() {
        assert_eq!(basic("2 + 3 = × 4 ="), "20");
    }

    #[test]
    fn test_decimal_arithmetic_shortest_text() {
        assert_eq!(basic(". 1 + . 2 ="), "0.30000000000000004");
    }

    // ===== Division by zero =====

    #[test]
    fn test_divide_by_zero_shows_zero() {
        assert_eq!(basic("9 ÷ 0 ="), "0");
    }

    #[test]
    fn test_divide_by_zero_mid_chain() {
        assert_eq!(basic("9 ÷ 0 + 5 ="), "5");
    }

    // ===== Clear =====

    #[test]
    fn test_clear_resets_state() {
        let eval = run(Variant::Basic, "6 + 4 × 2 AC");
        assert_eq!(eval.state(), &CalculatorState::default());
    }

    #[test]
    fn test_clear_keeps_angle_mode() {
        let eval = run(Variant::Scientific, "mode 4 5 + AC");
        assert_eq!(eval.display(), "0");
        assert_eq!(eval.angle_mode(), Some(AngleMode::Radians));
        assert_eq!(
            eval.state(),
            &CalculatorState::with_angle_mode(AngleMode::Radians)
        );
    }

    // ===== Trig functions =====

    #[test]
    fn test_sin_180_degrees_displays_zero() {
        assert_eq!(scientific("1 8 0 sin"), "0");
    }

    #[test]
    fn test_sin_30_degrees() {
        let value: f64 = scientific("3 0 sin").parse().unwrap();
        assert!((value - 0.5).abs() < 1e-15);
    }

    #[test]
    fn test_cos_zero_radians() {
        assert_eq!(scientific("mode 0 cos"), "1");
    }

    #[test]
    fn test_tan_90_degrees_is_large_not_error() {
        let value: f64 = scientific("9 0 tan").parse().unwrap();
        assert!(value.is_finite());
        assert!(value.abs() > 1e15);
    }

    #[test]
    fn test_trig_result_starts_fresh_operand() {
        let eval = run(Variant::Scientific, "9 0 sin");
        assert!(eval.state().awaiting_fresh_operand());
        assert_eq!(scientific("9 0 sin 5"), "5");
    }

    #[test]
    fn test_trig_mid_chain_becomes_right_operand() {
        // 2 + sin(90°) = 3
        assert_eq!(scientific("2 + 9 0 sin ="), "3");
        let eval = run(Variant::Scientific, "2 + 9 0 sin");
        assert_eq!(eval.state().pending_operand(), Some("2"));
        assert_eq!(eval.state().pending_operator(), Some(BinaryOp::Add));
    }

    #[test]
    fn test_operator_after_trig_evaluates_pending() {
        assert_eq!(scientific("2 + 9 0 sin ×"), "3");
    }

    #[test]
    fn test_trig_on_pending_operand_display() {
        // display still shows the left operand right after the operator
        assert_eq!(scientific("9 0 + sin ="), "91");
    }

    #[test]
    fn test_trig_ignored_on_basic() {
        let eval = run(Variant::Basic, "1 8 0 sin");
        assert_eq!(eval.display(), "180");
        assert!(!eval.state().awaiting_fresh_operand());
    }

    // ===== Angle mode =====

    #[test]
    fn test_toggle_angle_mode_flips() {
        let mut eval = Evaluator::scientific();
        eval.press(Event::ToggleAngleMode);
        assert_eq!(eval.angle_mode(), Some(AngleMode::Radians));
        eval.press(Event::ToggleAngleMode);
        assert_eq!(eval.angle_mode(), Some(AngleMode::Degrees));
    }

    #[test]
    fn test_toggle_leaves_arithmetic_state() {
        let before = run(Variant::Scientific, "1 2 + 3");
        let mut after = before.clone();
        after.press(Event::ToggleAngleMode);
        assert_eq!(after.display(), before.display());
        assert_eq!(after.state().pending_operand(), before.state().pending_operand());
        assert_eq!(after.state().pending_operator(), before.state().pending_operator());
        assert_eq!(
            after.state().awaiting_fresh_operand(),
            before.state().awaiting_fresh_operand()
        );
    }

    #[test]
    fn test_toggle_between_operators_keeps_replacement() {
        assert_eq!(scientific("5 + mode × 3 ="), "15");
    }

    #[test]
    fn test_toggle_ignored_on_basic() {
        let eval = run(Variant::Basic, "mode");
        assert_eq!(eval.state().angle_mode(), AngleMode::Degrees);
        assert_eq!(eval.angle_mode(), None);
    }

    #[test]
    fn test_radians_sin() {
        let mut eval = Evaluator::from_state(
            Variant::Scientific,
            CalculatorState::with_angle_mode(AngleMode::Radians),
        );
        eval.press_all(events("1 sin"));
        assert_eq!(eval.display(), format_number(1.0_f64.sin()));
    }

    // ===== Non-finite results stay displayable =====

    #[test]
    fn test_overflow_displays_infinity_and_recovers() {
        let mut eval = Evaluator::new();
        eval.press_all(events("9 ×"));
        for _ in 0..310 {
            eval.press(Event::digit(9).unwrap());
        }
        eval.press(Event::Equals);
        assert_eq!(eval.display(), "Infinity");
        eval.press_all(events("× 0 ="));
        assert_eq!(eval.display(), "NaN");
        eval.press_all(events("AC 4"));
        assert_eq!(eval.display(), "4");
    }

    // ===== Pure transition =====

    #[test]
    fn test_next_is_pure() {
        let state = CalculatorState::default();
        let a = state.clone().next(Event::digit(4).unwrap(), Variant::Basic);
        let b = state.next(Event::digit(4).unwrap(), Variant::Basic);
        assert_eq!(a, b);
        assert_eq!(a.display(), "4");
    }

    #[test]
    fn test_state_serde_round_trip() {
        let eval = run(Variant::Scientific, "6 + 4 ×");
        let json = serde_json::to_string(eval.state()).unwrap();
        let back: CalculatorState = serde_json::from_str(&json).unwrap();
        assert_eq!(&back, eval.state());
    }

    // ===== Snapshot validation =====

    fn snapshot(display: &str, operand: Option<&str>, operator: Option<&str>) -> String {
        serde_json::json!({
            "display": display,
            "pending_operand": operand,
            "pending_operator": operator,
            "entry": "typing",
            "angle_mode": "degrees",
        })
        .to_string()
    }

    #[test]
    fn test_snapshot_rejects_malformed_display() {
        let err = serde_json::from_str::<CalculatorState>(&snapshot("1.2.3", None, None))
            .unwrap_err();
        assert!(err.to_string().contains("1.2.3"));
    }

    #[test]
    fn test_snapshot_rejects_malformed_pending_operand() {
        let json = snapshot("1", Some("abc"), Some("add"));
        assert!(serde_json::from_str::<CalculatorState>(&json).is_err());
    }

    #[test]
    fn test_snapshot_rejects_unpaired_pending() {
        assert!(serde_json::from_str::<CalculatorState>(&snapshot("1", Some("2"), None)).is_err());
        assert!(serde_json::from_str::<CalculatorState>(&snapshot("1", None, Some("add"))).is_err());
    }

    #[test]
    fn test_snapshot_rejects_operator_entry_without_operator() {
        let json = r#"{"display":"5","entry":"after_operator"}"#;
        assert!(serde_json::from_str::<CalculatorState>(json).is_err());
    }

    #[test]
    fn test_snapshot_accepts_reachable_states() {
        let state: CalculatorState =
            serde_json::from_str(&snapshot("0.5", Some("1e+21"), Some("divide"))).unwrap();
        assert_eq!(state.pending_operand(), Some("1e+21"));
        let minimal: CalculatorState = serde_json::from_str(r#"{"display":"NaN"}"#).unwrap();
        assert_eq!(minimal.angle_mode(), AngleMode::Degrees);
    }

    #[test]
    fn test_restored_snapshot_keeps_evaluating() {
        let state: CalculatorState =
            serde_json::from_str(&snapshot("12.5", Some("2"), Some("multiply"))).unwrap();
        let mut eval = Evaluator::from_state(Variant::Basic, state);
        eval.press_all(events("= + 1 ="));
        assert_eq!(eval.display(), "26");
    }
}
