//! Property tests.
//!
//! - Identical construction and identical input give identical results and
//!   identical state, byte for byte
//! - Handler edits compose in registration order
//! - Discarding always ends at or under the hand limit

use ccg_dispatch::actions::{ActionStage, DrawCards, DropCardStage};
use ccg_dispatch::core::{Card, MatchConfig, MatchState, PlayerId};
use ccg_dispatch::engine::{Action, EventHandler, EventKind, Game, Payload, Side};
use ccg_dispatch::participant::{Participant, Scripted};
use proptest::prelude::*;
use serde_json::json;

fn play_turns(seed: u64, plays: &[(usize, usize)], turns: usize) -> (Vec<bool>, Vec<u8>) {
    let config = MatchConfig::new(2).with_seed(seed);
    let answers = |offset: usize| {
        plays
            .iter()
            .skip(offset)
            .fold(Scripted::new(), |seat, &(card, object)| seat.answering(json!([card, object])))
    };
    let seats = vec![
        Box::new(answers(0)) as Box<dyn Participant>,
        Box::new(answers(1)) as Box<dyn Participant>,
    ];
    let mut game = Game::from_config(Side::Authoritative, &config, seats).unwrap();

    let mut results = Vec::new();
    for turn in 0..turns {
        let current = PlayerId::new((turn % 2) as u8);
        results.push(game.process_action(DrawCards::stage(current, 2)));
        results.push(game.process_action(ActionStage::new(current)));
        results.push(game.process_action(DropCardStage::new(current)));
    }

    (results, game.snapshot().unwrap())
}

/// Applies `op` to every `DrawCards` amount it sees during `ActionBefore`.
struct Rewrite {
    op: (bool, usize),
}

impl EventHandler for Rewrite {
    fn interested(&self, kind: EventKind, payload: &Payload<'_>) -> bool {
        kind == EventKind::ActionBefore && payload.is_action::<DrawCards>()
    }

    fn handle<'a>(&mut self, _kind: EventKind, mut payload: Payload<'a>, _state: &MatchState) -> Payload<'a> {
        if let Some(draw) = payload.action_mut().and_then(|a| a.downcast_mut::<DrawCards>()) {
            let (add, n) = self.op;
            draw.amount = if add { draw.amount + n } else { draw.amount * n };
        }
        payload
    }
}

proptest! {
    #[test]
    fn prop_identical_runs_are_identical(
        seed in any::<u64>(),
        plays in prop::collection::vec((0usize..6, 0usize..3), 0..12),
        turns in 1usize..6,
    ) {
        let first = play_turns(seed, &plays, turns);
        let second = play_turns(seed, &plays, turns);

        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_handler_edits_compose_in_order(
        ops in prop::collection::vec((any::<bool>(), 0usize..4), 0..6),
        start in 0usize..4,
    ) {
        let config = MatchConfig::new(1);
        let seats = vec![Box::new(Scripted::new()) as Box<dyn Participant>];
        let mut game = Game::from_config(Side::Mirrored, &config, seats).unwrap();
        for &op in &ops {
            game.register_handler(Rewrite { op });
        }

        let expected = ops
            .iter()
            .fold(start, |amount, &(add, n)| if add { amount + n } else { amount * n });

        let dispatched = game.dispatch(Box::new(DrawCards::new(PlayerId::new(0), start)));
        prop_assert!(dispatched.succeeded());
        prop_assert_eq!(dispatched.downcast::<DrawCards>().map(|d| d.amount), Some(expected));
        prop_assert_eq!(game.player_state(PlayerId::new(0)).hand_size(), expected);
    }

    #[test]
    fn prop_drop_stage_respects_hand_limit(
        life in -3i64..6,
        hand in prop::collection::vec(prop::sample::select(Card::DEALABLE.to_vec()), 0..10),
        answer in prop::collection::vec(0usize..10, 0..4),
    ) {
        let config = MatchConfig::new(2);
        let seats = vec![
            Box::new(Scripted::new().answering(json!(answer))) as Box<dyn Participant>,
            Box::new(Scripted::new()) as Box<dyn Participant>,
        ];
        let mut game = Game::from_config(Side::Authoritative, &config, seats).unwrap();
        let player = PlayerId::new(0);
        game.state_mut().player_mut(player).state.life = life;
        game.state_mut().player_mut(player).state.cards.extend(hand.iter().copied());

        let stage = DropCardStage::new(player);
        prop_assert_eq!(stage.name(), "DropCardStage");
        prop_assert!(game.process_action(stage));

        let limit = usize::try_from(life).unwrap_or(0);
        prop_assert_eq!(game.player_state(player).hand_size(), hand.len().min(limit));
    }
}
