use crate::Message;

use chrono::{TimeZone, Utc};

#[test]
fn given_message_when_serialized_then_received_at_is_iso8601_utc() {
    let message = Message {
        id: 7,
        content: "hello".to_string(),
        received_at: Utc.with_ymd_and_hms(2019, 10, 1, 12, 30, 0).unwrap(),
    };

    let json = serde_json::to_value(&message).unwrap();

    assert_eq!(json["id"], 7);
    assert_eq!(json["content"], "hello");
    assert_eq!(json["received_at"], "2019-10-01T12:30:00Z");
}

#[test]
fn given_serialized_message_when_deserialized_then_round_trips() {
    let json = r#"{"id":1,"content":"x","received_at":"2019-10-01T12:30:00.123Z"}"#;

    let message: Message = serde_json::from_str(json).unwrap();

    assert_eq!(message.id, 1);
    assert_eq!(message.content, "x");
    assert_eq!(message.received_at.timestamp_subsec_millis(), 123);
}
