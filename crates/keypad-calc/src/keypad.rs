//! Keypad model shared by every front end
//!
//! A presentation layer renders these buttons however it likes and, on a
//! click, turns the button id back into an [`Event`] with
//! [`Keypad::handle_click`]. Ids are stable (`btn-7`, `btn-add`,
//! `btn-angle-mode`) so tests can address buttons without a renderer.

use crate::core::{AngleMode, BinaryOp, Event, TrigFunction, Variant};
use std::fmt::Write as _;

/// A single keypad button definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButton {
    /// The event this button emits
    pub event: Event,
    /// Stable element id
    pub id: String,
    /// Grid row of the top-left cell (0-indexed)
    pub row: usize,
    /// Grid column of the top-left cell (0-indexed)
    pub col: usize,
    /// Number of rows covered
    pub row_span: usize,
    /// Number of columns covered
    pub col_span: usize,
}

impl KeypadButton {
    /// Creates a one-cell button
    #[must_use]
    pub fn new(event: Event, row: usize, col: usize) -> Self {
        Self {
            id: button_id(&event),
            event,
            row,
            col,
            row_span: 1,
            col_span: 1,
        }
    }

    /// Widens the button across `cols` columns
    #[must_use]
    pub fn wide(mut self, cols: usize) -> Self {
        self.col_span = cols;
        self
    }

    /// Stretches the button down across `rows` rows
    #[must_use]
    pub fn tall(mut self, rows: usize) -> Self {
        self.row_span = rows;
        self
    }

    /// Returns true if the button covers the given cell
    #[must_use]
    pub fn covers(&self, row: usize, col: usize) -> bool {
        (self.row..self.row + self.row_span).contains(&row)
            && (self.col..self.col + self.col_span).contains(&col)
    }

    /// Returns the text printed on the button
    ///
    /// The angle-mode button shows the mode currently in effect.
    #[must_use]
    pub fn label(&self, angle_mode: AngleMode) -> String {
        match self.event {
            Event::ToggleAngleMode => angle_mode.label().to_string(),
            event => event.token(),
        }
    }
}

fn button_id(event: &Event) -> String {
    match event {
        Event::Digit(d) => format!("btn-{d}"),
        Event::DecimalPoint => "btn-decimal".to_string(),
        Event::Clear => "btn-clear".to_string(),
        Event::Operator(op) => format!("btn-{}", op.name()),
        Event::Equals => "btn-equals".to_string(),
        Event::TrigFunction(f) => format!("btn-{}", f.name()),
        Event::ToggleAngleMode => "btn-angle-mode".to_string(),
    }
}

/// Keypad layout
///
/// Basic:
/// ```text
/// [  AC  ] [ ÷ ] [ × ]
/// [ 7 ] [ 8 ] [ 9 ] [ - ]
/// [ 4 ] [ 5 ] [ 6 ] [ + ]
/// [ 1 ] [ 2 ] [ 3 ] [ = ]
/// [    0   ] [ . ] [   ]
/// ```
/// Scientific adds `[ sin ] [ cos ] [ tan ] [ DEG ]` above.
#[derive(Debug, Clone)]
pub struct Keypad {
    buttons: Vec<KeypadButton>,
    rows: usize,
    cols: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::basic()
    }
}

impl Keypad {
    /// The four-operator keypad
    #[must_use]
    pub fn basic() -> Self {
        Self::with_offset(Vec::new(), 0)
    }

    /// The keypad with a trig row on top
    #[must_use]
    pub fn scientific() -> Self {
        let mut top: Vec<KeypadButton> = TrigFunction::ALL
            .iter()
            .enumerate()
            .map(|(col, f)| KeypadButton::new(Event::TrigFunction(*f), 0, col))
            .collect();
        top.push(KeypadButton::new(Event::ToggleAngleMode, 0, 3));
        Self::with_offset(top, 1)
    }

    /// The keypad matching a calculator variant
    #[must_use]
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Basic => Self::basic(),
            Variant::Scientific => Self::scientific(),
        }
    }

    fn with_offset(mut buttons: Vec<KeypadButton>, offset: usize) -> Self {
        let digit = |d: u8, row: usize, col: usize| {
            Event::digit(d).ok().map(|e| KeypadButton::new(e, row + offset, col))
        };
        let op = |op: BinaryOp, row: usize, col: usize| {
            KeypadButton::new(Event::Operator(op), row + offset, col)
        };

        buttons.push(KeypadButton::new(Event::Clear, offset, 0).wide(2));
        buttons.push(op(BinaryOp::Divide, 0, 2));
        buttons.push(op(BinaryOp::Multiply, 0, 3));
        buttons.extend([digit(7, 1, 0), digit(8, 1, 1), digit(9, 1, 2)].into_iter().flatten());
        buttons.push(op(BinaryOp::Subtract, 1, 3));
        buttons.extend([digit(4, 2, 0), digit(5, 2, 1), digit(6, 2, 2)].into_iter().flatten());
        buttons.push(op(BinaryOp::Add, 2, 3));
        buttons.extend([digit(1, 3, 0), digit(2, 3, 1), digit(3, 3, 2)].into_iter().flatten());
        buttons.push(KeypadButton::new(Event::Equals, 3 + offset, 3).tall(2));
        buttons.extend(digit(0, 4, 0).map(|b| b.wide(2)));
        buttons.push(KeypadButton::new(Event::DecimalPoint, 4 + offset, 2));

        Self {
            buttons,
            rows: 5 + offset,
            cols: 4,
        }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Gets all button definitions
    #[must_use]
    pub fn buttons(&self) -> &[KeypadButton] {
        &self.buttons
    }

    /// Gets the button covering a grid cell
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.covers(row, col))
    }

    /// Finds a button by element id
    #[must_use]
    pub fn find_button_by_id(&self, id: &str) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// Finds the button that emits an event
    #[must_use]
    pub fn find_button_by_event(&self, event: Event) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.event == event)
    }

    /// Processes a button click and returns the event to dispatch
    #[must_use]
    pub fn handle_click(&self, id: &str) -> Option<Event> {
        self.find_button_by_id(id).map(|b| b.event)
    }

    /// Renders the grid as plain text, one keypad row per line
    #[must_use]
    pub fn render_text(&self, angle_mode: AngleMode) -> String {
        const CELL: usize = 6;
        let mut out = String::new();
        for row in 0..self.rows {
            let mut line = String::new();
            let mut col = 0;
            while col < self.cols {
                match self.get_button_at(row, col) {
                    Some(btn) if btn.row == row && btn.col == col => {
                        let width = CELL * btn.col_span;
                        let label = format!("[{}]", btn.label(angle_mode));
                        let _ = write!(line, "{label:^width$}");
                        col += btn.col_span;
                    }
                    Some(btn) => {
                        // Lower half of a tall button
                        let _ = write!(line, "{:width$}", "", width = CELL * btn.col_span);
                        col += btn.col_span;
                    }
                    None => {
                        let _ = write!(line, "{:CELL$}", "");
                        col += 1;
                    }
                }
            }
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}
