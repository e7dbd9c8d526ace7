//! Parsing raw participant answers.
//!
//! Answers arrive as untyped JSON from whatever sits in the seat. Every
//! shape check happens here, once, so actions only ever deal with indices
//! that are known to be in range.

use serde_json::Value;
use smallvec::SmallVec;
use thiserror::Error;

use crate::core::PlayerId;

/// Sorted, distinct hand indices.
pub type CardIndices = SmallVec<[usize; 4]>;

/// Why an answer could not be used.
///
/// Actions treat every variant the same way ("no choice"); the detail is
/// for logs.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("no answer was given")]
    Missing,

    #[error("expected {expected}, got {found}")]
    Shape {
        expected: &'static str,
        found: &'static str,
    },

    #[error("selection is empty")]
    Empty,

    #[error("index {index} is outside 0..{len}")]
    OutOfRange { index: i64, len: usize },

    #[error("index {0} selected more than once")]
    Duplicate(usize),
}

/// A card played at a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CardUse {
    /// Index into the player's hand.
    pub card_index: usize,
    /// Who the card is played at.
    pub object: PlayerId,
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

fn checked_index(item: &Value, len: usize) -> Result<usize, InputError> {
    let index = item.as_i64().ok_or(InputError::Shape {
        expected: "an integer index",
        found: json_kind(item),
    })?;

    usize::try_from(index)
        .ok()
        .filter(|&i| i < len)
        .ok_or(InputError::OutOfRange { index, len })
}

/// Parse a non-empty list of hand indices.
///
/// ```
/// use ccg_dispatch::participant::{parse_card_indices, InputError};
/// use serde_json::json;
///
/// let indices = parse_card_indices(Some(&json!([2, 0])), 3).unwrap();
/// assert_eq!(indices.as_slice(), &[0, 2]);
///
/// assert_eq!(parse_card_indices(Some(&json!([])), 3), Err(InputError::Empty));
/// ```
pub fn parse_card_indices(answer: Option<&Value>, hand_size: usize) -> Result<CardIndices, InputError> {
    let answer = answer.ok_or(InputError::Missing)?;
    let items = answer.as_array().ok_or(InputError::Shape {
        expected: "a list of card indices",
        found: json_kind(answer),
    })?;
    if items.is_empty() {
        return Err(InputError::Empty);
    }

    let mut indices = CardIndices::with_capacity(items.len());
    for item in items {
        let index = checked_index(item, hand_size)?;
        if indices.contains(&index) {
            return Err(InputError::Duplicate(index));
        }
        indices.push(index);
    }
    indices.sort_unstable();

    Ok(indices)
}

/// Parse a `[card_index, player_index]` pair.
pub fn parse_use_card(
    answer: Option<&Value>,
    hand_size: usize,
    player_count: usize,
) -> Result<CardUse, InputError> {
    let answer = answer.ok_or(InputError::Missing)?;
    let shape = InputError::Shape {
        expected: "a [card_index, player_index] pair",
        found: json_kind(answer),
    };

    match answer.as_array().map(Vec::as_slice) {
        Some([card, object]) => {
            let card_index = checked_index(card, hand_size)?;
            let object = checked_index(object, player_count)?;
            Ok(CardUse {
                card_index,
                object: PlayerId::new(object as u8),
            })
        }
        _ => Err(shape),
    }
}
