use super::*;

const CHAR: Millis = Millis(50);
const PAUSE: Millis = Millis(2000);

fn typist(messages: &[&str]) -> (TargetStore, TargetId, Typist) {
    let mut store = TargetStore::default();
    let t = store.insert("telemetry");
    let typist = Typist::new(
        t,
        messages.iter().map(|m| m.to_string()).collect(),
        CHAR,
        PAUSE,
    )
    .unwrap();
    (store, t, typist)
}

#[test]
fn message_is_complete_at_tick_l_then_clears_after_pause() {
    let msg = "Color grading complete...";
    let (mut store, target, mut t) = typist(&[msg, "Finals ready. Same day."]);
    assert_eq!(t.start(&mut store), CHAR);
    assert_eq!(store.text(target), "");

    let l = msg.chars().count();
    let mut elapsed = 0u64;
    let mut delay = CHAR;
    for tick in 1..=l {
        elapsed += delay.0;
        delay = t.tick(&mut store);
        assert_eq!(store.text(target), &msg[..tick]);
    }
    assert_eq!(elapsed, l as u64 * CHAR.0);
    assert_eq!(store.text(target), msg);
    assert_eq!(t.phase(), TypistPhase::Holding);
    assert_eq!(delay, PAUSE);

    // One pause is pause_ticks character periods long.
    let pause_ticks = PAUSE.0 / CHAR.0;
    elapsed += delay.0;
    assert_eq!(elapsed, (l as u64 + pause_ticks) * CHAR.0);
    assert_eq!(t.tick(&mut store), CHAR);
    assert_eq!(store.text(target), "");
    assert_eq!(t.message_index(), 1);
}

#[test]
fn message_index_wraps() {
    let (mut store, _, mut t) = typist(&["ab", "c"]);
    // "ab": 2 ticks, hold, "c": 1 tick, hold -> back to 0
    for _ in 0..(2 + 1 + 1 + 1) {
        t.tick(&mut store);
    }
    assert_eq!(t.message_index(), 0);
    assert_eq!(t.revealed(), 0);
    assert_eq!(t.phase(), TypistPhase::Typing);
}

#[test]
fn multibyte_messages_reveal_whole_characters() {
    let (mut store, target, mut t) = typist(&["né→"]);
    t.tick(&mut store);
    t.tick(&mut store);
    assert_eq!(store.text(target), "né");
    t.tick(&mut store);
    assert_eq!(store.text(target), "né→");
    assert_eq!(t.phase(), TypistPhase::Holding);
}

#[test]
fn invalid_configuration_is_rejected() {
    let mut store = TargetStore::default();
    let id = store.insert("t");
    assert!(Typist::new(id, vec![], CHAR, PAUSE).is_err());
    assert!(Typist::new(id, vec![String::new()], CHAR, PAUSE).is_err());
    assert!(Typist::new(id, vec!["x".into()], Millis(0), PAUSE).is_err());
}
