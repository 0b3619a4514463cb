//! Recorded key sequences and their replay
//!
//! A [`Tape`] is an ordered list of events, written as whitespace-separated
//! tokens (`1 2 + 3 =`). Lines starting with `#` are comments. Replaying a
//! tape produces a [`Transcript`] holding the display after every event,
//! which serializes to JSON or YAML and can be re-verified later.

use crate::core::{
    AngleMode, CalcError, CalcResult, CalculatorState, Evaluator, Event, Variant,
};
use serde::{Deserialize, Serialize};

/// Version of the transcript format
pub const TRANSCRIPT_FORMAT_VERSION: u32 = 1;

/// An ordered sequence of key presses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tape {
    events: Vec<Event>,
}

impl Tape {
    /// Creates an empty tape
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a tape from events
    #[must_use]
    pub fn from_events(events: impl IntoIterator<Item = Event>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    /// Parses whitespace-separated tokens, skipping `#` comment lines
    pub fn parse(text: &str) -> CalcResult<Self> {
        let events = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.starts_with('#'))
            .flat_map(str::split_whitespace)
            .map(str::parse)
            .collect::<CalcResult<Vec<Event>>>()?;
        Ok(Self { events })
    }

    /// Appends one event
    pub fn push(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Returns the events in order
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Returns the number of events
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if the tape holds no events
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Fails on the first event the variant would ignore
    pub fn check_variant(&self, variant: Variant) -> CalcResult<()> {
        if variant.has_trig() {
            return Ok(());
        }
        match self.events.iter().find(|e| e.requires_scientific()) {
            Some(event) => Err(CalcError::RequiresScientific {
                event: event.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Plays every event into `evaluator`, recording each resulting display
    pub fn replay(&self, evaluator: &mut Evaluator) -> Transcript {
        let mut transcript = Transcript::new(evaluator.variant(), evaluator.state().clone());
        for event in &self.events {
            evaluator.press(*event);
            transcript.steps.push(Observation {
                event: *event,
                display: evaluator.display().to_string(),
                angle_mode: evaluator.angle_mode(),
            });
        }
        tracing::debug!(steps = transcript.steps.len(), "tape replayed");
        transcript
    }

    /// Renders the tape back to canonical tokens
    #[must_use]
    pub fn to_tokens(&self) -> String {
        self.events
            .iter()
            .map(Event::token)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl FromIterator<Event> for Tape {
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self {
        Self::from_events(iter)
    }
}

/// The calculator's visible state after one event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// The event applied
    pub event: Event,
    /// Display text afterwards
    pub display: String,
    /// Angle mode afterwards (scientific only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle_mode: Option<AngleMode>,
}

/// A replayed tape with every intermediate display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    /// Format version
    pub version: u32,
    /// Variant the tape was replayed on
    pub variant: Variant,
    /// Evaluator state before the first event
    pub initial_state: CalculatorState,
    /// One observation per event
    pub steps: Vec<Observation>,
}

impl Transcript {
    /// Creates an empty transcript
    #[must_use]
    pub fn new(variant: Variant, initial_state: CalculatorState) -> Self {
        Self {
            version: TRANSCRIPT_FORMAT_VERSION,
            variant,
            initial_state,
            steps: Vec::new(),
        }
    }

    /// Display after the last event, or the starting display if there were none
    #[must_use]
    pub fn final_display(&self) -> &str {
        self.steps
            .last()
            .map_or(self.initial_state.display(), |s| s.display.as_str())
    }

    /// The events that produced this transcript
    #[must_use]
    pub fn tape(&self) -> Tape {
        self.steps.iter().map(|s| s.event).collect()
    }

    /// Replays the events from the recorded starting state and returns the
    /// index of the first step whose observation differs, if any
    #[must_use]
    pub fn first_divergence(&self) -> Option<usize> {
        let mut evaluator = Evaluator::from_state(self.variant, self.initial_state.clone());
        let replayed = self.tape().replay(&mut evaluator);
        self.steps
            .iter()
            .zip(&replayed.steps)
            .position(|(recorded, actual)| recorded != actual)
    }

    /// Serializes to pretty JSON
    pub fn to_json(&self) -> CalcResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serializes to YAML
    pub fn to_yaml(&self) -> CalcResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Deserializes from JSON, rejecting unknown format versions
    pub fn from_json(json: &str) -> CalcResult<Self> {
        let transcript: Self = serde_json::from_str(json)?;
        if transcript.version > TRANSCRIPT_FORMAT_VERSION {
            return Err(CalcError::config(format!(
                "transcript version {} is newer than supported version {}",
                transcript.version, TRANSCRIPT_FORMAT_VERSION
            )));
        }
        Ok(transcript)
    }
}
