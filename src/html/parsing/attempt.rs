//! Outcome of trying one grammar alternative

use super::error::ParseError;

/// Result of an alternative that may decline without failing.
///
/// `NoMatch` means the input does not start with this construct; the caller tries the next
/// alternative from the same position. Hard failures travel as `Err(ParseError)` instead.
#[derive(Debug, Clone, PartialEq)]
pub enum Attempt<T> {
    Parsed(T),
    NoMatch,
}

pub type AttemptResult<T> = Result<Attempt<T>, ParseError>;

impl<T> Attempt<T> {
    pub fn is_parsed(&self) -> bool {
        matches!(self, Attempt::Parsed(_))
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Attempt<U> {
        match self {
            Attempt::Parsed(value) => Attempt::Parsed(f(value)),
            Attempt::NoMatch => Attempt::NoMatch,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Attempt::Parsed(value) => Some(value),
            Attempt::NoMatch => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_and_into_option() {
        assert_eq!(Attempt::Parsed(2).map(|v| v * 2).into_option(), Some(4));
        assert_eq!(Attempt::<i32>::NoMatch.map(|v| v * 2).into_option(), None);
        assert!(!Attempt::<()>::NoMatch.is_parsed());
    }
}
