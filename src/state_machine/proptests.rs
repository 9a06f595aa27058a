//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::effect::CallKind;
use super::*;
use crate::oracle::{
    Answer, AnswerReply, Character, ConfirmReply, LearningQuestion, NewCharacter, OracleError,
    Question, SessionId, StartReply, Stats,
};
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_answer() -> impl Strategy<Value = Answer> {
    prop::sample::select(Answer::ALL.to_vec())
}

fn arb_question() -> impl Strategy<Value = Question> {
    (1i64..500, "[A-Za-z ]{1,30}\\?").prop_map(|(id, text)| Question { id, text })
}

fn arb_character() -> impl Strategy<Value = Character> {
    (1i64..500, "[A-Z][a-z]{2,10}", proptest::option::of("[a-z ]{0,20}")).prop_map(
        |(id, name, description)| Character {
            id,
            name,
            description,
            image_url: None,
        },
    )
}

fn arb_session() -> impl Strategy<Value = Session> {
    ("[a-f0-9]{8}", arb_question(), 1u32..30).prop_map(|(id, question, question_count)| Session {
        id: SessionId::new(id),
        question,
        question_count,
    })
}

fn arb_state() -> impl Strategy<Value = GameState> {
    prop_oneof![
        Just(GameState::Idle),
        arb_session().prop_map(|session| GameState::Playing { session }),
        (arb_session(), arb_character())
            .prop_map(|(session, candidate)| GameState::Guessing { session, candidate }),
        arb_session().prop_map(|session| GameState::Learning { session }),
    ]
}

fn arb_new_character() -> impl Strategy<Value = NewCharacter> {
    (
        "[A-Za-z ]{0,12}",
        proptest::collection::btree_map("[a-z_]{3,10}", arb_answer(), 0..5),
    )
        .prop_map(|(name, attributes)| NewCharacter {
            name,
            description: String::new(),
            attributes,
        })
}

fn arb_player_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        Just(Event::Start),
        arb_answer().prop_map(|answer| Event::Answer { answer }),
        any::<bool>().prop_map(|accepted| Event::Confirm { accepted }),
        arb_new_character().prop_map(|character| Event::SubmitCharacter { character }),
        Just(Event::SkipLearning),
    ]
}

fn arb_answer_reply(max_count: u32) -> impl Strategy<Value = AnswerReply> {
    prop_oneof![
        6 => (arb_question(), proptest::option::of(0..max_count + 2), 0.0f64..100.0, proptest::option::of(0u32..200))
            .prop_map(|(question, question_count, progress, candidates_remaining)| {
                AnswerReply::Question { question, question_count, progress, candidates_remaining }
            }),
        2 => (arb_character(), proptest::option::of(0..max_count + 2))
            .prop_map(|(character, question_count)| AnswerReply::Guess { character, question_count }),
        1 => Just(AnswerReply::GiveUp { message: None }),
    ]
}

fn arb_call_kind() -> impl Strategy<Value = CallKind> {
    prop_oneof![
        Just(CallKind::StartGame),
        Just(CallKind::Answer),
        any::<bool>().prop_map(|correct| CallKind::ConfirmGuess { correct }),
        Just(CallKind::AddCharacter),
        Just(CallKind::ListQuestions),
        Just(CallKind::Stats),
    ]
}

/// Any event, including oracle replies that may not match the state
fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        4 => arb_player_event(),
        1 => Just(Event::Reset),
        1 => (arb_question(), "[a-f0-9]{8}").prop_map(|(question, id)| Event::GameStarted {
            reply: StartReply {
                session_id: SessionId::new(id),
                question,
                progress: 0.0,
                candidates_remaining: None,
            },
        }),
        2 => arb_answer_reply(40).prop_map(|reply| Event::Answered { reply }),
        1 => (any::<bool>(), proptest::option::of(1u32..40))
            .prop_map(|(accepted, questions_used)| Event::GuessConfirmed {
                accepted,
                reply: ConfirmReply { questions_used },
            }),
        1 => "[A-Za-z]{1,10}".prop_map(|name| Event::CharacterAdded { name }),
        1 => proptest::collection::vec(
                ("[a-z ]{3,20}", "[a-z_]{3,10}")
                    .prop_map(|(text, attribute_key)| LearningQuestion { text, attribute_key }),
                0..15,
            )
            .prop_map(|questions| Event::QuestionsListed { questions }),
        1 => Just(Event::StatsLoaded { stats: Stats::default() }),
        1 => (arb_call_kind(), "[a-z ]{1,20}").prop_map(|(call, message)| Event::OracleFailed {
            call,
            error: OracleError::rejected(message),
        }),
    ]
}

/// Player events each state accepts
fn permits(state: &GameState, event: &Event) -> bool {
    match (state, event) {
        (GameState::Idle, Event::Start)
        | (GameState::Playing { .. }, Event::Answer { .. })
        | (GameState::Guessing { .. }, Event::Confirm { .. })
        | (GameState::Learning { .. }, Event::SkipLearning) => true,
        (GameState::Learning { .. }, Event::SubmitCharacter { character }) => {
            !character.name.trim().is_empty()
        }
        _ => false,
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Player events outside their state are rejected and the state is
    /// left exactly as it was
    #[test]
    fn prop_invalid_player_events_rejected(state in arb_state(), event in arb_player_event()) {
        let before = state.clone();
        let allowed = permits(&state, &event);
        let is_blank_submit = matches!(
            (&state, &event),
            (GameState::Learning { .. }, Event::SubmitCharacter { character }) if character.name.trim().is_empty()
        );

        match transition(&state, event) {
            Ok(result) => {
                prop_assert!(allowed, "unexpected transition from {}", before.name());
                // Player events that call the oracle do not move the state by
                // themselves; only a rejected guess and skipping do.
                let moved = (before.name(), result.new_state.name());
                if moved.0 != moved.1 {
                    prop_assert!(
                        moved == ("guessing", "learning") || moved == ("learning", "idle"),
                        "unexpected move {:?}",
                        moved
                    );
                }
            }
            Err(TransitionError::MissingName) => prop_assert!(is_blank_submit),
            Err(TransitionError::InvalidTransition(_)) => prop_assert!(!allowed && !is_blank_submit),
        }
        prop_assert_eq!(state, before);
    }

    /// Question count never decreases inside a session and restarts at 1
    #[test]
    fn prop_question_count_monotonic(events in proptest::collection::vec(arb_event(), 1..60)) {
        let mut state = GameState::Idle;
        for event in events {
            let starts_session = matches!(event, Event::GameStarted { .. });
            let Ok(result) = transition(&state, event) else { continue };
            let before = state.session().map(|s| (s.id.clone(), s.question_count));
            let after = result.new_state.session().map(|s| (s.id.clone(), s.question_count));

            match (before, after) {
                (Some((old_id, old_count)), Some((new_id, new_count))) => {
                    prop_assert_eq!(old_id, new_id);
                    prop_assert!(new_count >= old_count);
                }
                (None, Some((_, new_count))) => {
                    prop_assert!(starts_session);
                    prop_assert_eq!(new_count, 1);
                }
                _ => {}
            }
            state = result.new_state;
        }
    }

    /// Confetti is launched only by an accepted guess confirmed by the oracle
    #[test]
    fn prop_confetti_only_on_confirmed_guess(state in arb_state(), event in arb_event()) {
        let is_accepted_confirmation = matches!(
            (&state, &event),
            (GameState::Guessing { .. }, Event::GuessConfirmed { accepted: true, .. })
        );
        if let Ok(result) = transition(&state, event) {
            let launches = result.effects.iter().filter(|e| **e == Effect::LaunchConfetti).count();
            prop_assert_eq!(launches, usize::from(is_accepted_confirmation));
        }
    }

    /// A rejected guess never launches confetti, whatever the oracle says later
    #[test]
    fn prop_rejected_guess_never_celebrates(
        session in arb_session(),
        candidate in arb_character(),
        followups in proptest::collection::vec(arb_event(), 0..10),
    ) {
        let state = GameState::Guessing { session, candidate };
        let result = transition(&state, Event::Confirm { accepted: false }).unwrap();
        prop_assert!(!result.effects.contains(&Effect::LaunchConfetti));

        let mut state = result.new_state;
        for event in followups {
            if matches!(event, Event::Answered { .. } | Event::GameStarted { .. } | Event::Start | Event::Reset) {
                break;
            }
            if let Ok(result) = transition(&state, event) {
                prop_assert!(!result.effects.contains(&Effect::LaunchConfetti));
                state = result.new_state;
            }
        }
    }

    /// Only the guessing state carries a candidate
    #[test]
    fn prop_candidate_only_while_guessing(events in proptest::collection::vec(arb_event(), 1..60)) {
        let mut state = GameState::Idle;
        for event in events {
            if let Ok(result) = transition(&state, event) {
                state = result.new_state;
            }
            prop_assert_eq!(state.candidate().is_some(), state.name() == "guessing");
        }
    }
}
