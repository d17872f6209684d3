use super::text::DeliveryClass;
use thiserror::Error;

const EMPTIED_MESSAGE: &str = "You empty the nets into the cargo hold.";
const LOCAL_CATCH: &str = "You catch ";
const CREW_CATCH: &str = " catches ";
// Bonus catches are reported again in a separate, already-counted line.
const BONUS_MARKER: &str = "Trawler's Trust";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuantityError {
    #[error("catch quantity '{token}' is not a known number word")]
    InvalidQuantityToken { token: String },
}

/// Catch-count evidence extracted from a chat line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatchMessage {
    Emptied,
    Caught { token: String },
}

pub fn word_to_number(token: &str) -> Result<u32, QuantityError> {
    let value = match token.to_lowercase().as_str() {
        "a" => 1,
        "two" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        "seven" => 7,
        "eight" => 8,
        "nine" => 9,
        "ten" => 10,
        _ => {
            return Err(QuantityError::InvalidQuantityToken {
                token: token.to_string(),
            });
        }
    };
    Ok(value)
}

/// Classifies a markup-free chat line as a catch or an emptied-nets notice.
pub fn classify_catch(class: DeliveryClass, text: &str) -> Option<CatchMessage> {
    if !matches!(class, DeliveryClass::Game | DeliveryClass::Spam) {
        return None;
    }
    if text == EMPTIED_MESSAGE {
        return Some(CatchMessage::Emptied);
    }

    // A bonus line is only skipped on the local branch; a crew catch
    // inside it still counts.
    let rest = if text.contains(LOCAL_CATCH) && !text.contains(BONUS_MARKER) {
        let start = text.find(LOCAL_CATCH)? + LOCAL_CATCH.len();
        &text[start..]
    } else {
        let start = text.find(CREW_CATCH)? + CREW_CATCH.len();
        &text[start..]
    };

    let token = rest.split(' ').next().unwrap_or_default();
    if token.is_empty() {
        return None;
    }
    Some(CatchMessage::Caught {
        token: token.to_lowercase(),
    })
}

/// Running count of fish in the nets since they were last emptied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuantityCounter {
    value: i64,
}

impl QuantityCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn on_reset_message(&mut self) {
        self.value = 0;
    }

    /// Adds the catch named by `token`; an unknown word leaves the count untouched.
    pub fn on_catch_message(&mut self, token: &str) -> Result<i64, QuantityError> {
        self.value += i64::from(word_to_number(token)?);
        Ok(self.value)
    }

    pub fn apply(&mut self, message: &CatchMessage) -> Result<i64, QuantityError> {
        match message {
            CatchMessage::Emptied => {
                self.on_reset_message();
                Ok(self.value)
            }
            CatchMessage::Caught { token } => self.on_catch_message(token),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_after_reset() {
        let mut counter = QuantityCounter::new();
        counter.on_catch_message("a").unwrap();
        counter.on_reset_message();
        counter.on_catch_message("two").unwrap();
        counter.on_catch_message("three").unwrap();
        assert_eq!(counter.value(), 5);
    }

    #[test]
    fn unknown_word_is_a_hard_error() {
        let mut counter = QuantityCounter::new();
        counter.on_catch_message("four").unwrap();
        let err = counter.on_catch_message("eleven").unwrap_err();
        assert_eq!(
            err,
            QuantityError::InvalidQuantityToken {
                token: "eleven".into()
            }
        );
        assert_eq!(counter.value(), 4);
    }

    #[test]
    fn classifies_local_and_crew_catches() {
        assert_eq!(
            classify_catch(DeliveryClass::Game, "You catch three haddock."),
            Some(CatchMessage::Caught {
                token: "three".into()
            })
        );
        assert_eq!(
            classify_catch(DeliveryClass::Spam, "Brine catches A giant krill."),
            Some(CatchMessage::Caught { token: "a".into() })
        );
        assert_eq!(
            classify_catch(DeliveryClass::Game, EMPTIED_MESSAGE),
            Some(CatchMessage::Emptied)
        );
    }

    #[test]
    fn bonus_lines_are_not_counted() {
        assert_eq!(
            classify_catch(
                DeliveryClass::Game,
                "Trawler's Trust: You catch two extra halibut."
            ),
            None
        );
    }

    #[test]
    fn bonus_line_falls_through_to_crew_catch() {
        assert_eq!(
            classify_catch(
                DeliveryClass::Game,
                "Trawler's Trust: You catch as Brine catches two extra halibut."
            ),
            Some(CatchMessage::Caught {
                token: "two".into()
            })
        );
    }

    #[test]
    fn other_classes_and_chatter_are_ignored() {
        assert_eq!(
            classify_catch(DeliveryClass::Other, "You catch two haddock."),
            None
        );
        assert_eq!(
            classify_catch(DeliveryClass::Game, "The wind picks up."),
            None
        );
    }
}
