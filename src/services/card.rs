//! Card entry field transforms for the loan assessment form.
//!
//! DESIGN
//! ======
//! Every transform is total: malformed input degrades to the unchanged value
//! or a shorter one, never an error. Card state lives only in the session
//! workspace and is never persisted or forwarded.

use serde::{Deserialize, Serialize};

/// Maximum characters accepted by the card number field (16 digits + 3 spaces).
pub const CARD_NUMBER_MAX_LEN: usize = 19;
pub const EXPIRY_MAX_LEN: usize = 5;
pub const CVV_MAX_LEN: usize = 3;

const MIN_DIGIT_RUN: usize = 4;
const MAX_DIGIT_RUN: usize = 16;
const GROUP: usize = 4;

pub const CARD_NUMBER_PLACEHOLDER: &str = "#### #### #### ####";
pub const CARD_NAME_PLACEHOLDER: &str = "FULL NAME";
pub const EXPIRY_PLACEHOLDER: &str = "MM/YY";
const CVV_MASK_CHAR: char = '•';

/// Group the digits of `raw` into space-separated blocks of four.
///
/// Non-digits are dropped and at most 16 digits are kept. Inputs with fewer
/// than four digits are returned unchanged.
#[must_use]
pub fn format_card_number(raw: &str) -> String {
    let digits: Vec<char> = raw
        .chars()
        .filter(char::is_ascii_digit)
        .take(MAX_DIGIT_RUN)
        .collect();
    if digits.len() < MIN_DIGIT_RUN {
        return raw.to_owned();
    }

    digits
        .chunks(GROUP)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Mask an expiry entry as `MM/YY`.
///
/// A slash is appended once two characters are typed, unless the previous
/// value was three characters long (the user is deleting the slash).
#[must_use]
pub fn format_expiry(previous: &str, value: &str) -> String {
    let value: String = value.chars().take(EXPIRY_MAX_LEN).collect();
    if value.chars().count() == 2 && !value.contains('/') && previous.chars().count() != 3 {
        return format!("{value}/");
    }
    value
}

/// Keep only digits, at most three.
#[must_use]
pub fn sanitize_cvv(value: &str) -> String {
    value
        .chars()
        .filter(char::is_ascii_digit)
        .take(CVV_MAX_LEN)
        .collect()
}

/// Partial update from the card form. Absent fields keep their value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CardUpdate {
    pub card_number: Option<String>,
    pub card_name: Option<String>,
    pub expiry_date: Option<String>,
    pub cvv: Option<String>,
}

/// Transient values of the card form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CardInputState {
    pub card_number: String,
    pub card_name: String,
    pub expiry_date: String,
    pub cvv: String,
}

impl CardInputState {
    /// Apply an update through the field transforms.
    pub fn apply(&mut self, update: CardUpdate) {
        if let Some(raw) = update.card_number {
            let raw: String = raw.chars().take(CARD_NUMBER_MAX_LEN).collect();
            self.card_number = format_card_number(&raw);
        }
        if let Some(name) = update.card_name {
            self.card_name = name;
        }
        if let Some(expiry) = update.expiry_date {
            self.expiry_date = format_expiry(&self.expiry_date, &expiry);
        }
        if let Some(cvv) = update.cvv {
            self.cvv = sanitize_cvv(&cvv);
        }
    }

    /// What the card preview shows.
    #[must_use]
    pub fn display(&self) -> CardDisplay {
        CardDisplay {
            card_number: or_placeholder(&self.card_number, CARD_NUMBER_PLACEHOLDER),
            card_holder: or_placeholder(&self.card_name, CARD_NAME_PLACEHOLDER),
            expiry: or_placeholder(&self.expiry_date, EXPIRY_PLACEHOLDER),
            cvv: std::iter::repeat_n(CVV_MASK_CHAR, self.cvv.chars().count()).collect(),
        }
    }
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.is_empty() { placeholder.to_owned() } else { value.to_owned() }
}

/// Rendered card preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardDisplay {
    pub card_number: String,
    pub card_holder: String,
    pub expiry: String,
    pub cvv: String,
}

#[cfg(test)]
#[path = "card_test.rs"]
mod tests;
