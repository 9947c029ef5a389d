//! End-to-end flow of the chat screen's collaborators: classify user input
//! with the responder, persist both turns, respect the retention window.

use saathi_core::responder::{Responder, ResponseCategory, WELCOME_MESSAGE};
use saathi_storage::{ConversationLog, ConversationTurn, MemoryStore};

#[test]
fn chat_exchange_is_persisted_in_order() {
    let mut responder = Responder::with_seed(42);
    let mut log = ConversationLog::new(MemoryStore::new());

    log.push(ConversationTurn::from_companion(WELCOME_MESSAGE))
        .unwrap();

    let input = "I have an exam tomorrow and I'm so stressed";
    let reply = responder.respond_full(input);
    assert_eq!(reply.category, ResponseCategory::AcademicStress);

    log.push(ConversationTurn::from_user(input)).unwrap();
    log.push(ConversationTurn::from_companion(&reply.text))
        .unwrap();

    let turns = log.recent().unwrap();
    assert_eq!(turns.len(), 3);
    assert_eq!(turns[0].text, WELCOME_MESSAGE);
    assert!(!turns[0].is_from_user);
    assert_eq!(turns[1].text, input);
    assert!(turns[1].is_from_user);
    assert_eq!(turns[2].text, reply.text);
}

#[test]
fn long_conversation_keeps_only_recent_turns() {
    let mut responder = Responder::with_seed(7);
    let mut log = ConversationLog::new(MemoryStore::new());

    for i in 0..30 {
        let input = format!("message number {i}");
        let reply = responder.respond(&input);
        log.push(ConversationTurn::from_user(&input)).unwrap();
        log.push(ConversationTurn::from_companion(reply)).unwrap();
    }

    // 60 turns pushed, 50 retained
    let turns = log.recent().unwrap();
    assert_eq!(turns.len(), 50);
    assert_eq!(turns[0].text, "message number 5");
}

#[test]
fn crisis_reply_survives_persistence_verbatim() {
    let mut responder = Responder::with_seed(0);
    let mut log = ConversationLog::new(MemoryStore::new());

    let reply = responder.respond("I want to kill myself");
    log.push(ConversationTurn::from_companion(&reply)).unwrap();

    let turns = log.recent().unwrap();
    assert_eq!(turns[0].text, saathi_core::responder::CRISIS_RESPONSE);
}
