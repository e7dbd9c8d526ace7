//! Ruleset tests.
//!
//! These tests play the basic ruleset through a real `Game`:
//! - Attack composition (graze or damage)
//! - Turn stages (draw, play, discard)
//! - Hidden information on the mirrored side
//! - Malformed player input

use std::cell::RefCell;
use std::rc::Rc;

use ccg_dispatch::actions::{
    ActionStage, Attack, CardCondition, ChooseCard, Damage, DrawCards, DropCardStage, Heal,
};
use ccg_dispatch::core::{Card, MatchConfig, PlayerId};
use ccg_dispatch::engine::{Game, Side};
use ccg_dispatch::handlers::{ActionJournal, Journal, Veto};
use ccg_dispatch::participant::{Participant, Prompt, Scripted};
use serde_json::{json, Value};

const P0: PlayerId = PlayerId::new(0);
const P1: PlayerId = PlayerId::new(1);
const P2: PlayerId = PlayerId::new(2);

fn game_with(side: Side, seats: Vec<Box<dyn Participant>>) -> Game {
    let config = MatchConfig::new(seats.len()).with_seed(2024);
    Game::from_config(side, &config, seats).unwrap()
}

fn scripted(seats: Vec<Scripted>) -> Vec<Box<dyn Participant>> {
    seats.into_iter().map(|s| Box::new(s) as Box<dyn Participant>).collect()
}

fn journaled(game: &mut Game) -> Journal {
    let journal = ActionJournal::new();
    let log = journal.journal();
    game.register_handler(journal);
    log
}

fn give(game: &mut Game, player: PlayerId, cards: &[Card]) {
    game.state_mut().player_mut(player).state.cards.extend(cards.iter().copied());
}

fn hand(game: &Game, player: PlayerId) -> Vec<Card> {
    game.player_state(player).cards.iter().copied().collect()
}

/// Counts reveals and prompts, answering from a list.
struct Observer {
    reveals: Rc<RefCell<usize>>,
    prompts: Rc<RefCell<Vec<&'static str>>>,
    answers: Vec<Value>,
}

impl Participant for Observer {
    fn reveal(&mut self, cards: Vec<Card>) -> Vec<Card> {
        *self.reveals.borrow_mut() += 1;
        cards
    }

    fn user_input(&mut self, prompt: Prompt) -> Option<Value> {
        self.prompts.borrow_mut().push(prompt.kind());
        if self.answers.is_empty() {
            None
        } else {
            Some(self.answers.remove(0))
        }
    }
}

// =============================================================================
// Attack
// =============================================================================

#[test]
fn test_attack_without_graze_deals_damage_once() {
    let mut game = game_with(Side::Authoritative, scripted(vec![Scripted::new(), Scripted::new()]));
    let log = journaled(&mut game);

    assert!(game.process_action(Attack::new(P1, 2).with_source(P0)));

    assert_eq!(log.count("Damage"), 1);
    assert_eq!(log.count("DropCardIndex"), 0);
    assert_eq!(game.player_state(P1).life, 2);
}

#[test]
fn test_attack_with_graze_drops_once_and_deals_nothing() {
    let defender = Scripted::new().answering(json!([0]));
    let mut game = game_with(Side::Authoritative, scripted(vec![Scripted::new(), defender]));
    give(&mut game, P1, &[Card::Graze, Card::Heal]);
    let log = journaled(&mut game);

    assert!(!game.process_action(Attack::new(P1, 2).with_source(P0)));

    assert_eq!(log.count("Damage"), 0);
    assert_eq!(log.count("DropCardIndex"), 1);
    assert_eq!(game.player_state(P1).life, 4);
    assert_eq!(hand(&game, P1), vec![Card::Heal]);
}

#[test]
fn test_graze_is_revealed_to_every_other_player() {
    let reveals = Rc::new(RefCell::new(0));
    let prompts = Rc::new(RefCell::new(Vec::new()));
    let observer = |answers: Vec<Value>| {
        Box::new(Observer {
            reveals: Rc::clone(&reveals),
            prompts: Rc::clone(&prompts),
            answers,
        }) as Box<dyn Participant>
    };
    let seats = vec![observer(vec![]), observer(vec![json!([0])]), observer(vec![])];
    let mut game = game_with(Side::Authoritative, seats);
    give(&mut game, P1, &[Card::Graze]);

    assert!(!game.process_action(Attack::new(P1, 1)));

    // Two observers, once for the choice and once for the drop.
    assert_eq!(*reveals.borrow(), 4);
    assert_eq!(*prompts.borrow(), vec!["choose_card"]);
}

#[test]
fn test_vetoed_damage_makes_attack_fail() {
    let mut game = game_with(Side::Authoritative, scripted(vec![Scripted::new(), Scripted::new()]));
    game.register_handler(Veto::deny(|action, _state| action.is::<Damage>()));

    assert!(!game.process_action(Attack::new(P1, 1)));
    assert_eq!(game.player_state(P1).life, 4);
}

#[test]
fn test_handler_can_force_a_graze_choice() {
    // A house rule that strips the target's choice: the choose step always
    // fails, so every attack lands.
    let defender = Scripted::new().answering(json!([0]));
    let mut game = game_with(Side::Authoritative, scripted(vec![Scripted::new(), defender]));
    give(&mut game, P1, &[Card::Graze]);
    game.register_handler(Veto::cancel(|action, _state| {
        action
            .downcast_ref::<ChooseCard>()
            .is_some_and(|choose| choose.condition == CardCondition::ExactlyOne(Card::Graze))
    }));

    assert!(game.process_action(Attack::new(P1, 1)));
    assert_eq!(game.player_state(P1).life, 3);
    assert_eq!(hand(&game, P1), vec![Card::Graze]);
}

#[test]
fn test_attack_resolves_identically_on_both_sides() {
    for side in [Side::Authoritative, Side::Mirrored] {
        let defender = Scripted::new().answering(json!([1]));
        let mut game = game_with(side, scripted(vec![Scripted::new(), defender]));
        give(&mut game, P1, &[Card::Attack, Card::Graze]);

        assert!(!game.process_action(Attack::new(P1, 1)));
        assert_eq!(hand(&game, P1), vec![Card::Attack]);
    }
}

// =============================================================================
// Turn stages
// =============================================================================

#[test]
fn test_full_turn() {
    let current = Scripted::new()
        .answering(json!([0, 1]))
        .declining()
        .answering(json!([0]));
    let mut game = game_with(Side::Authoritative, scripted(vec![current, Scripted::new()]));
    game.state_mut().player_mut(P0).state.life = 1;
    give(&mut game, P0, &[Card::Attack]);
    let log = journaled(&mut game);

    let amount = game.state().stage_draw_amount();
    assert!(game.process_action(DrawCards::stage(P0, amount)));
    assert_eq!(hand(&game, P0).len(), 3);

    assert!(game.process_action(ActionStage::new(P0)));
    assert_eq!(game.player_state(P1).life, 3);
    assert_eq!(hand(&game, P0).len(), 2);

    assert!(game.process_action(DropCardStage::new(P0)));
    assert_eq!(hand(&game, P0).len(), 1);

    assert_eq!(log.count("DrawCardStage"), 1);
    assert_eq!(log.count("DropUsedCard"), 1);
    assert_eq!(log.count("Attack"), 1);
    assert_eq!(log.count("DropCardStage"), 1);
}

#[test]
fn test_drop_stage_discards_down_to_life() {
    let mut game = game_with(Side::Authoritative, scripted(vec![Scripted::new(), Scripted::new()]));
    game.state_mut().player_mut(P0).state.life = 1;
    give(&mut game, P0, &[Card::Heal, Card::Attack, Card::Graze]);

    assert!(game.process_action(DropCardStage::new(P0)));
    assert_eq!(hand(&game, P0), vec![Card::Graze]);
}

#[test]
fn test_action_stage_heal_targets_chosen_player() {
    let current = Scripted::new().answering(json!([0, 2]));
    let mut game = game_with(
        Side::Authoritative,
        scripted(vec![Scripted::new(), current, Scripted::new()]),
    );
    game.state_mut().player_mut(P2).state.life = 1;
    give(&mut game, P1, &[Card::Heal]);
    let log = journaled(&mut game);

    assert!(game.process_action(ActionStage::new(P1)));

    assert_eq!(game.player_state(P2).life, 2);
    assert_eq!(log.names(), vec!["DropUsedCard", "Heal", "ActionStage"]);
}

#[test]
fn test_action_stage_continues_after_vetoed_card() {
    let current = Scripted::new().answering(json!([0, 1])).answering(json!([0, 1]));
    let mut game = game_with(Side::Authoritative, scripted(vec![current, Scripted::new()]));
    give(&mut game, P0, &[Card::Heal, Card::Attack]);
    game.register_handler(Veto::deny(|action, _state| action.is::<Heal>()));

    assert!(game.process_action(ActionStage::new(P0)));

    // The heal was dropped but did nothing; the attack landed.
    assert!(hand(&game, P0).is_empty());
    assert_eq!(game.player_state(P1).life, 3);
}

// =============================================================================
// Hidden information
// =============================================================================

#[test]
fn test_mirrored_opponent_draw_stays_hidden() {
    let mut game = game_with(Side::Mirrored, scripted(vec![Scripted::new(), Scripted::new()]));

    assert!(game.process_action(DrawCards::new(P1, 2)));
    assert_eq!(hand(&game, P1), vec![Card::Hidden, Card::Hidden]);
    assert_eq!(game.player_state(P1).hand_size(), 2);
}

#[test]
fn test_mirrored_and_authoritative_agree_after_reveal() {
    let mut server = game_with(Side::Authoritative, scripted(vec![Scripted::new(), Scripted::new()]));
    let dealt = server
        .dispatch(Box::new(DrawCards::new(P0, 2)))
        .downcast::<DrawCards>()
        .map(|draw| draw.cards.clone())
        .unwrap();

    // The client's own seat is told the faces the server dealt.
    let me = Scripted::new().revealing(dealt.clone());
    let mut client = game_with(Side::Mirrored, scripted(vec![me, Scripted::new()]));
    assert!(client.process_action(DrawCards::new(P0, 2)));

    assert_eq!(hand(&client, P0), dealt);
    assert_eq!(hand(&server, P0), dealt);
}

#[test]
fn test_mirrored_draw_does_not_advance_rng() {
    let mut game = game_with(Side::Mirrored, scripted(vec![Scripted::new(), Scripted::new()]));
    let before = game.state().snapshot().rng;

    game.process_action(DrawCards::new(P0, 5));

    assert_eq!(game.state().snapshot().rng, before);
}

// =============================================================================
// Malformed input
// =============================================================================

#[test]
fn test_malformed_answers_are_no_choice() {
    let answers = [
        json!(null),
        json!("graze"),
        json!([]),
        json!(["0"]),
        json!([0.0]),
        json!([-1]),
        json!([1]),
        json!([0, 0]),
        json!({ "indices": [0] }),
    ];

    for answer in answers {
        let defender = Scripted::new().answering(answer.clone());
        let mut game = game_with(Side::Authoritative, scripted(vec![Scripted::new(), defender]));
        give(&mut game, P1, &[Card::Graze]);

        assert!(game.process_action(Attack::new(P1, 1)), "answer {answer} should not graze");
        assert_eq!(hand(&game, P1), vec![Card::Graze]);
    }
}

#[test]
fn test_malformed_play_ends_action_stage() {
    for answer in [json!([0]), json!([0, 1, 2]), json!(["0", 1]), json!([0, 9]), json!(0)] {
        let current = Scripted::new().answering(answer).answering(json!([0, 1]));
        let mut game = game_with(Side::Authoritative, scripted(vec![current, Scripted::new()]));
        give(&mut game, P0, &[Card::Attack]);

        assert!(game.process_action(ActionStage::new(P0)));
        assert_eq!(hand(&game, P0), vec![Card::Attack]);
        assert_eq!(game.player_state(P1).life, 4);
    }
}

#[test]
fn test_heal_category_is_visible_to_user_scope() {
    let mut game = game_with(Side::Authoritative, scripted(vec![Scripted::new(), Scripted::new()]));
    let journal = ActionJournal::new().with_scope(ccg_dispatch::engine::CategorySet::USER_ACTIONS);
    let log = journal.journal();
    game.register_handler(journal);

    game.process_action(Heal::new(P0, 1));
    game.process_action(Damage::new(P0, 1));

    assert_eq!(log.names(), vec!["Heal"]);
}
