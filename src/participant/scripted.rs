//! A participant that answers from a script.

use std::collections::VecDeque;

use serde_json::Value;
use tracing::trace;

use super::{Participant, Prompt};
use crate::core::Card;

/// Canned answers and reveal rules.
///
/// - Answers are handed out in order, one per prompt. An exhausted script
///   answers `None`.
/// - When a `Hidden` card is revealed and queued faces remain, the next face
///   replaces it. This is how a mirrored seat learns its own draws.
/// - Substitution rules then rewrite any card matching `from`. The first
///   matching rule wins.
///
/// ```
/// use ccg_dispatch::core::Card;
/// use ccg_dispatch::participant::{Participant, Prompt, Scripted};
/// use serde_json::json;
///
/// let mut seat = Scripted::new()
///     .answering(json!([0]))
///     .revealing([Card::Graze]);
///
/// assert_eq!(seat.reveal(vec![Card::Hidden, Card::Hidden]), vec![Card::Graze, Card::Hidden]);
///
/// let prompt = Prompt::UseCard { hand_size: 1, player_count: 2 };
/// assert_eq!(seat.user_input(prompt), Some(json!([0])));
/// assert_eq!(seat.user_input(prompt), None);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Scripted {
    answers: VecDeque<Option<Value>>,
    faces: VecDeque<Card>,
    substitutions: Vec<(Card, Card)>,
}

impl Scripted {
    /// An empty script: no answers, reveals unchanged.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an answer (builder pattern).
    #[must_use]
    pub fn answering(mut self, answer: Value) -> Self {
        self.answers.push_back(Some(answer));
        self
    }

    /// Queue an explicit "no answer" (builder pattern).
    #[must_use]
    pub fn declining(mut self) -> Self {
        self.answers.push_back(None);
        self
    }

    /// Queue faces for upcoming `Hidden` reveals (builder pattern).
    #[must_use]
    pub fn revealing(mut self, faces: impl IntoIterator<Item = Card>) -> Self {
        self.faces.extend(faces);
        self
    }

    /// Show every `from` card as `to` (builder pattern).
    #[must_use]
    pub fn substituting(mut self, from: Card, to: Card) -> Self {
        self.substitutions.push((from, to));
        self
    }

    /// Queue an answer on an existing script.
    pub fn push_answer(&mut self, answer: Option<Value>) {
        self.answers.push_back(answer);
    }

    /// Answers not yet handed out.
    #[must_use]
    pub fn remaining_answers(&self) -> usize {
        self.answers.len()
    }

    fn see(&mut self, card: Card) -> Card {
        if card.is_hidden() {
            if let Some(face) = self.faces.pop_front() {
                return face;
            }
        }
        self.substitutions
            .iter()
            .find(|(from, _)| *from == card)
            .map_or(card, |(_, to)| *to)
    }
}

impl Participant for Scripted {
    fn reveal(&mut self, cards: Vec<Card>) -> Vec<Card> {
        cards.into_iter().map(|card| self.see(card)).collect()
    }

    fn user_input(&mut self, prompt: Prompt) -> Option<Value> {
        let answer = self.answers.pop_front().flatten();
        trace!(target: "participant::scripted", prompt = %prompt, answered = answer.is_some(), "prompt answered");
        answer
    }
}
