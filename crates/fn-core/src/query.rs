use crate::error::Error;
use crate::protocol::WordsRequest;

/// Minimum generated-word length. The UI offers exactly these two choices;
/// anything else is rejected before it can reach the query state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MinWordLen {
    /// Words of three letters or more (the default).
    #[default]
    Three,
    /// Words of four letters or more.
    Four,
}

impl MinWordLen {
    /// The numeric value sent on the wire.
    pub fn as_u8(self) -> u8 {
        match self {
            Self::Three => 3,
            Self::Four => 4,
        }
    }

    /// Flip between the two offered values.
    pub fn toggle(self) -> Self {
        match self {
            Self::Three => Self::Four,
            Self::Four => Self::Three,
        }
    }
}

impl TryFrom<u8> for MinWordLen {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Error> {
        match value {
            3 => Ok(Self::Three),
            4 => Ok(Self::Four),
            other => Err(Error::InvalidOption(other)),
        }
    }
}

/// The letters-to-words query state: the free-form letters text and the
/// minimum word length. Letters may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LettersQuery {
    letters: String,
    min: MinWordLen,
}

impl LettersQuery {
    /// An empty query with the default minimum.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current letters text.
    pub fn letters(&self) -> &str {
        &self.letters
    }

    /// The current minimum word length.
    pub fn min(&self) -> MinWordLen {
        self.min
    }

    /// Replace the letters text.
    pub fn set_letters(&mut self, text: impl Into<String>) {
        self.letters = text.into();
    }

    /// Append one letter (key-driven editing).
    pub fn push_letter(&mut self, c: char) {
        self.letters.push(c);
    }

    /// Remove the last letter, if any.
    pub fn pop_letter(&mut self) {
        self.letters.pop();
    }

    /// Set the minimum word length.
    pub fn set_min(&mut self, min: MinWordLen) {
        self.min = min;
    }

    /// Snapshot the query as a request body.
    pub fn to_request(&self) -> WordsRequest {
        WordsRequest {
            letters: self.letters.clone(),
            min: self.min.as_u8(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_accepts_only_the_offered_values() {
        assert_eq!(MinWordLen::try_from(3), Ok(MinWordLen::Three));
        assert_eq!(MinWordLen::try_from(4), Ok(MinWordLen::Four));
        for bad in [0, 1, 2, 5, 9, 255] {
            assert_eq!(MinWordLen::try_from(bad), Err(Error::InvalidOption(bad)));
        }
    }

    #[test]
    fn toggle_stays_within_the_offered_set() {
        assert_eq!(MinWordLen::Three.toggle(), MinWordLen::Four);
        assert_eq!(MinWordLen::Four.toggle(), MinWordLen::Three);
        assert_eq!(MinWordLen::Three.toggle().toggle(), MinWordLen::Three);
    }

    #[test]
    fn new_query_is_empty_with_min_three() {
        let query = LettersQuery::new();
        assert_eq!(query.letters(), "");
        assert_eq!(query.min(), MinWordLen::Three);
    }

    #[test]
    fn letter_editing() {
        let mut query = LettersQuery::new();
        query.push_letter('a');
        query.push_letter('c');
        query.push_letter('t');
        assert_eq!(query.letters(), "act");
        query.pop_letter();
        assert_eq!(query.letters(), "ac");
        query.pop_letter();
        query.pop_letter();
        query.pop_letter();
        assert_eq!(query.letters(), "");
    }

    #[test]
    fn to_request_snapshots_the_current_state() {
        let mut query = LettersQuery::new();
        query.set_letters("act");
        query.set_min(MinWordLen::Four);
        let request = query.to_request();
        assert_eq!(request.letters, "act");
        assert_eq!(request.min, 4);

        // Edits after the snapshot do not leak into it.
        query.set_letters("cab");
        assert_eq!(request.letters, "act");
    }
}
