//! Discrete input events from buttons and the keyboard
//!
//! Every button click or key press maps to exactly one [`Action`], which
//! the [`Calculator`](crate::calculator::Calculator) dispatches.

use crate::core::Operation;

/// One named operation on the calculation cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Insert a digit (0-9)
    Digit(u8),
    /// Insert a decimal point
    Decimal,
    /// Insert `+`
    Add,
    /// Insert `-`
    Subtract,
    /// Insert the multiply glyph
    Multiply,
    /// Insert the divide glyph
    Divide,
    /// Divide the preceding operand by 100 (appends `/100`)
    Percent,
    /// Wrap the whole expression in `sqrt(...)`
    Sqrt,
    /// Insert `**`
    Power,
    /// Reset the expression
    Clear,
    /// Remove the last character
    Delete,
    /// Evaluate the expression
    Calculate,
}

impl Action {
    /// Resolves a button click.
    ///
    /// Buttons without a `data-action` attribute insert their label,
    /// which must be a single digit or `.`.
    #[must_use]
    pub fn from_button(data_action: Option<&str>, label: &str) -> Option<Self> {
        match data_action {
            Some(name) => Self::from_name(name),
            None => Self::from_char(single_char(label.trim())?),
        }
    }

    /// Resolves a button `data-action` name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "clear" => Some(Self::Clear),
            "delete" => Some(Self::Delete),
            "add" => Some(Self::Add),
            "subtract" => Some(Self::Subtract),
            "multiply" => Some(Self::Multiply),
            "divide" => Some(Self::Divide),
            "percent" => Some(Self::Percent),
            "sqrt" => Some(Self::Sqrt),
            "power" => Some(Self::Power),
            "calculate" => Some(Self::Calculate),
            _ => None,
        }
    }

    /// Maps a keyboard `key` value to an action.
    ///
    /// Only single-character digits, `.`, the four operators, `Enter`
    /// and `Backspace` are recognised.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Enter" => Some(Self::Calculate),
            "Backspace" => Some(Self::Delete),
            other => match single_char(other)? {
                '+' => Some(Self::Add),
                '-' => Some(Self::Subtract),
                '*' => Some(Self::Multiply),
                '/' => Some(Self::Divide),
                ch => Self::from_char(ch),
            },
        }
    }

    fn from_char(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(Self::Decimal),
            _ => ch.to_digit(10).map(|d| Self::Digit(d as u8)),
        }
    }

    /// Returns the `data-action` name, or None for label-only buttons
    #[must_use]
    pub const fn name(&self) -> Option<&'static str> {
        match self {
            Self::Digit(_) | Self::Decimal => None,
            Self::Clear => Some("clear"),
            Self::Delete => Some("delete"),
            Self::Add => Some("add"),
            Self::Subtract => Some("subtract"),
            Self::Multiply => Some("multiply"),
            Self::Divide => Some("divide"),
            Self::Percent => Some("percent"),
            Self::Sqrt => Some("sqrt"),
            Self::Power => Some("power"),
            Self::Calculate => Some("calculate"),
        }
    }

    /// Returns the button label
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::Decimal => ".".to_string(),
            Self::Add => Operation::Add.glyph().to_string(),
            Self::Subtract => Operation::Subtract.glyph().to_string(),
            Self::Multiply => Operation::Multiply.glyph().to_string(),
            Self::Divide => Operation::Divide.glyph().to_string(),
            Self::Percent => "%".to_string(),
            Self::Sqrt => "√".to_string(),
            Self::Power => "xʸ".to_string(),
            Self::Clear => "C".to_string(),
            Self::Delete => "DEL".to_string(),
            Self::Calculate => "=".to_string(),
        }
    }

    /// Returns the text appended to the buffer, for actions that append
    #[must_use]
    pub fn token(&self) -> Option<String> {
        match self {
            Self::Digit(d) => char::from_digit(u32::from(*d), 10).map(String::from),
            Self::Decimal => Some(".".to_string()),
            Self::Add => Some(Operation::Add.glyph().to_string()),
            Self::Subtract => Some(Operation::Subtract.glyph().to_string()),
            Self::Multiply => Some(Operation::Multiply.glyph().to_string()),
            Self::Divide => Some(Operation::Divide.glyph().to_string()),
            Self::Power => Some(Operation::Power.glyph().to_string()),
            Self::Percent => Some("/100".to_string()),
            Self::Sqrt | Self::Clear | Self::Delete | Self::Calculate => None,
        }
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Some(ch),
        _ => None,
    }
}

/// A single keypad button definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButton {
    /// The action this button performs
    pub action: Action,
    /// The DOM element ID for this button
    pub id: String,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Grid column (0-indexed)
    pub col: usize,
}

impl KeypadButton {
    /// Creates a new button definition
    #[must_use]
    pub fn new(action: Action, row: usize, col: usize) -> Self {
        let id = match action {
            Action::Digit(d) => format!("btn-{d}"),
            Action::Decimal => "btn-decimal".to_string(),
            other => format!("btn-{}", other.name().unwrap_or("op")),
        };
        Self {
            action,
            id,
            row,
            col,
        }
    }
}

/// Keypad layout
///
/// ```text
/// [ C ] [DEL] [ % ] [ ÷ ]
/// [ 7 ] [ 8 ] [ 9 ] [ × ]
/// [ 4 ] [ 5 ] [ 6 ] [ - ]
/// [ 1 ] [ 2 ] [ 3 ] [ + ]
/// [ 0 ] [ . ] [ √ ] [xʸ ]
/// [ = ]
/// ```
#[derive(Debug, Clone)]
pub struct Keypad {
    buttons: Vec<KeypadButton>,
    cols: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard keypad
    #[must_use]
    pub fn new() -> Self {
        let grid = [
            [Action::Clear, Action::Delete, Action::Percent, Action::Divide],
            [Action::Digit(7), Action::Digit(8), Action::Digit(9), Action::Multiply],
            [Action::Digit(4), Action::Digit(5), Action::Digit(6), Action::Subtract],
            [Action::Digit(1), Action::Digit(2), Action::Digit(3), Action::Add],
            [Action::Digit(0), Action::Decimal, Action::Sqrt, Action::Power],
        ];

        let mut buttons: Vec<KeypadButton> = grid
            .iter()
            .enumerate()
            .flat_map(|(row, actions)| {
                actions
                    .iter()
                    .enumerate()
                    .map(move |(col, action)| KeypadButton::new(*action, row, col))
            })
            .collect();
        buttons.push(KeypadButton::new(Action::Calculate, grid.len(), 0));

        Self { buttons, cols: 4 }
    }

    /// Gets all button definitions
    #[must_use]
    pub fn buttons(&self) -> &[KeypadButton] {
        &self.buttons
    }

    /// Returns the number of columns
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Finds a button by element ID
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// Resolves a click on the element with the given ID
    #[must_use]
    pub fn handle_click(&self, element_id: &str) -> Option<Action> {
        self.find_by_id(element_id).map(|btn| btn.action)
    }
}
