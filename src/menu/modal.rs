use std::fmt;

pub const MODAL_MAX_CHARS: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    Empty,
    NotANumber(String),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::Empty => write!(f, "Nothing entered"),
            InputError::NotANumber(raw) => write!(f, "'{raw}' is not a whole number"),
        }
    }
}

/// Whole, non-negative number. Surrounding whitespace is ignored; anything
/// else that isn't a digit is rejected.
pub fn parse_amount(raw: &str) -> Result<u64, InputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }
    trimmed
        .parse::<u64>()
        .map_err(|_| InputError::NotANumber(trimmed.to_string()))
}

/// A one-line text prompt that owns the keyboard until submitted or
/// cancelled. `P` says what the number is for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalInput<P> {
    pub prompt: String,
    pub buffer: String,
    pub purpose: P,
}

impl<P> ModalInput<P> {
    pub fn new(prompt: impl Into<String>, default_value: &str, purpose: P) -> Self {
        Self {
            prompt: prompt.into(),
            buffer: default_value.to_string(),
            purpose,
        }
    }

    pub fn push_str(&mut self, typed: &str) {
        for c in typed.chars() {
            if self.buffer.chars().count() >= MODAL_MAX_CHARS {
                break;
            }
            if !c.is_control() {
                self.buffer.push(c);
            }
        }
    }

    pub fn backspace(&mut self) {
        self.buffer.pop();
    }

    pub fn submit(&self) -> Result<u64, InputError> {
        parse_amount(&self.buffer)
    }

    pub fn display(&self) -> String {
        format!("{}\n> {}_\n(ENTER to submit, ESC to cancel)", self.prompt, self.buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(" 42 "), Ok(42));
        assert_eq!(parse_amount(""), Err(InputError::Empty));
        assert_eq!(parse_amount("12abc"), Err(InputError::NotANumber("12abc".into())));
        assert!(parse_amount("-5").is_err());
    }

    #[test]
    fn test_editing_buffer() {
        let mut modal = ModalInput::new("Amount", "10", ());
        modal.backspace();
        modal.backspace();
        modal.push_str("7x");
        assert_eq!(modal.buffer, "7x");
        assert!(modal.submit().is_err());
        modal.backspace();
        assert_eq!(modal.submit(), Ok(7));
    }

    #[test]
    fn test_buffer_is_capped() {
        let mut modal = ModalInput::new("Price", "", ());
        modal.push_str("12345678901234567890");
        assert_eq!(modal.buffer.len(), MODAL_MAX_CHARS);
    }
}
