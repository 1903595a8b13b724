//! The calculation cycle
//!
//! ```text
//! Idle ──edit──▶ Idle
//!   │
//!   └─Calculate─▶ Evaluating ─ok──▶ IdleWithResult  (history recorded, buffer = result)
//!                            └err─▶ IdleWithError   (buffer untouched, error shown)
//! ```
//!
//! Every action runs to completion before the next one is accepted.

use tracing::{debug, trace};

use crate::action::Action;
use crate::config::CalculatorConfig;
use crate::core::buffer::InputBuffer;
use crate::core::evaluator::{format_result, Evaluator};
use crate::core::history::HistoryLog;
use crate::core::FailureKind;
use crate::display::DisplaySink;

/// Where the cycle settled after the last action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Buffer is empty or being edited
    #[default]
    Idle,
    /// Buffer holds the text of the last successful result
    IdleWithResult,
    /// Last evaluation failed; buffer is as the user left it
    IdleWithError,
}

/// Outcome of dispatching one action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cycle {
    /// The buffer was edited
    Edited,
    /// The expression evaluated successfully
    Evaluated {
        /// The expression as entered
        expression: String,
        /// The normalized result, now loaded into the buffer
        result: String,
    },
    /// Evaluation failed
    Failed(FailureKind),
    /// The event did not map to any action, or its action changed nothing
    Ignored,
}

/// Calculator state owned by the event-handling layer
#[derive(Debug)]
pub struct Calculator<S: DisplaySink> {
    buffer: InputBuffer,
    history: HistoryLog,
    evaluator: Evaluator,
    config: CalculatorConfig,
    phase: Phase,
    sink: S,
}

impl<S: DisplaySink> Calculator<S> {
    /// Creates a calculator with the default configuration
    pub fn new(sink: S) -> Self {
        Self::with_config(sink, CalculatorConfig::default())
    }

    /// Creates a calculator with the given configuration
    pub fn with_config(sink: S, config: CalculatorConfig) -> Self {
        Self {
            buffer: InputBuffer::new(),
            history: HistoryLog::with_capacity(config.history_capacity),
            evaluator: Evaluator::new(),
            config,
            phase: Phase::Idle,
            sink,
        }
    }

    /// Resolves a button click and dispatches it
    pub fn press_button(&mut self, data_action: Option<&str>, label: &str) -> Cycle {
        match Action::from_button(data_action, label) {
            Some(action) => self.dispatch(action),
            None => {
                trace!(?data_action, label, "unmapped button");
                Cycle::Ignored
            }
        }
    }

    /// Resolves a keyboard key and dispatches it
    pub fn press_key(&mut self, key: &str) -> Cycle {
        match Action::from_key(key) {
            Some(action) => self.dispatch(action),
            None => {
                trace!(key, "unmapped key");
                Cycle::Ignored
            }
        }
    }

    /// Applies one action to the cycle
    pub fn dispatch(&mut self, action: Action) -> Cycle {
        trace!(?action, expression = self.buffer.current(), "dispatch");

        let edited = match action {
            Action::Calculate => return self.calculate(),
            Action::Clear => {
                self.buffer.clear();
                true
            }
            Action::Delete => {
                self.buffer.delete_last();
                true
            }
            Action::Sqrt => {
                self.buffer.wrap_sqrt();
                true
            }
            other => other
                .token()
                .is_some_and(|token| self.buffer.append(&token)),
        };

        if !edited {
            trace!(?action, "action left the buffer unchanged");
            return Cycle::Ignored;
        }

        self.phase = Phase::Idle;
        self.sink.update_display(self.buffer.current());
        Cycle::Edited
    }

    fn calculate(&mut self) -> Cycle {
        let expression = self.buffer.current().to_string();

        match self.evaluator.evaluate(&expression) {
            Ok(value) => {
                let result = format_result(value);
                debug!(%expression, %result, "calculation succeeded");

                self.history.record(&expression, &result);
                self.sink.render_history(&self.history.rendered());

                let loaded = self.buffer.set_expression(&result);
                debug_assert!(loaded, "formatted result {result:?} left the buffer alphabet");
                self.sink.update_display(self.buffer.current());

                self.phase = Phase::IdleWithResult;
                Cycle::Evaluated { expression, result }
            }
            Err(err) => {
                let kind = err.kind();
                debug!(%expression, error = %err, ?kind, "calculation failed");

                self.sink.show_error(
                    self.config.message_for(kind),
                    self.config.error_clear_delay(),
                );

                self.phase = Phase::IdleWithError;
                Cycle::Failed(kind)
            }
        }
    }

    /// Returns the current expression text
    #[must_use]
    pub fn expression(&self) -> &str {
        self.buffer.current()
    }

    /// Replaces the expression, e.g. to recall an earlier result.
    /// Returns false if the text contains characters outside the buffer alphabet.
    pub fn set_expression(&mut self, text: &str) -> bool {
        let loaded = self.buffer.set_expression(text);
        if loaded {
            self.phase = Phase::Idle;
            self.sink.update_display(self.buffer.current());
        }
        loaded
    }

    /// Returns the history log
    #[must_use]
    pub const fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Returns where the cycle settled
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the active configuration
    #[must_use]
    pub const fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Returns the display collaborator
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Returns the display collaborator mutably
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}
