//! Presence envelope vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use pubwire_core::presence::{decode_presence, encode_presence, PresenceAction};

mod vector_loader;
use vector_loader::load;

const OK_VECTORS: [&str; 5] = [
    "presence_join.json",
    "presence_leave.json",
    "presence_timeout.json",
    "presence_state_change.json",
    "presence_interval.json",
];

const ERR_VECTORS: [&str; 8] = [
    "presence_missing_occupancy.json",
    "presence_missing_action.json",
    "presence_missing_timestamp.json",
    "presence_occupancy_wrong_type.json",
    "presence_occupancy_negative.json",
    "presence_unknown_action.json",
    "presence_join_wrong_type.json",
    "presence_refresh_wrong_type.json",
];

fn strings(v: &serde_json::Value) -> Vec<String> {
    v.as_array()
        .unwrap()
        .iter()
        .map(|s| s.as_str().unwrap().to_string())
        .collect()
}

#[test]
fn presence_vectors() {
    for f in OK_VECTORS.iter().chain(ERR_VECTORS.iter()) {
        let v = load(f);
        let res = decode_presence(&v.input_bytes());

        if let Some(err) = v.expect_error {
            let e = res.expect_err("expected error");
            assert_eq!(e.code().as_str(), err.code, "vector={}", v.description);
            continue;
        }

        let ev = res.expect("expected ok event");
        let ex = v.expect.expect("missing expect block");

        assert_eq!(ev.action.as_str(), ex["action"].as_str().unwrap(), "vector={}", v.description);
        assert_eq!(ev.occupancy as u64, ex["occupancy"].as_u64().unwrap(), "vector={}", v.description);
        assert_eq!(ev.timestamp, ex["timestamp"].as_u64().unwrap(), "vector={}", v.description);
        assert_eq!(ev.uuid.as_deref(), ex["uuid"].as_str(), "vector={}", v.description);
        assert_eq!(ev.refresh_here_now, ex["here_now_refresh"].as_bool().unwrap(), "vector={}", v.description);
        assert_eq!(ev.state.is_some(), ex["has_state"].as_bool().unwrap(), "vector={}", v.description);
        assert_eq!(ev.join, strings(&ex["join"]), "vector={}", v.description);
        assert_eq!(ev.leave, strings(&ex["leave"]), "vector={}", v.description);
        assert_eq!(ev.timeout, strings(&ex["timeout"]), "vector={}", v.description);
    }
}

#[test]
fn decode_encode_decode_is_stable() {
    for f in OK_VECTORS {
        let v = load(f);
        let first = decode_presence(&v.input_bytes()).unwrap();
        let wire = encode_presence(&first).unwrap();
        let second = decode_presence(wire.as_bytes()).unwrap();
        assert_eq!(first, second, "vector={}", v.description);
    }
}

#[test]
fn encode_always_emits_lists_and_refresh_flag() {
    let ev = decode_presence(br#"{"action":"join","timestamp":5,"occupancy":1}"#).unwrap();
    let wire: serde_json::Value = serde_json::from_str(&encode_presence(&ev).unwrap()).unwrap();

    assert_eq!(wire["here_now_refresh"], serde_json::json!(false));
    assert_eq!(wire["join"], serde_json::json!([]));
    assert_eq!(wire["leave"], serde_json::json!([]));
    assert_eq!(wire["timeout"], serde_json::json!([]));
    assert!(wire.get("uuid").is_none());
    assert!(wire.get("data").is_none());
}

#[test]
fn all_actions_use_wire_names() {
    for (name, action) in [
        ("join", PresenceAction::Join),
        ("leave", PresenceAction::Leave),
        ("timeout", PresenceAction::Timeout),
        ("state-change", PresenceAction::StateChange),
        ("interval", PresenceAction::Interval),
    ] {
        let raw = format!(r#"{{"action":"{name}","timestamp":1,"occupancy":0}}"#);
        let ev = decode_presence(raw.as_bytes()).unwrap();
        assert_eq!(ev.action, action);
        assert_eq!(action.to_string(), name);
    }
}
