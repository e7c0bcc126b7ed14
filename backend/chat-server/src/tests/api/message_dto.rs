use crate::MessageDto;

use chat_core::Message;

use chrono::{TimeZone, Utc};

#[test]
fn test_message_dto_formats_received_at_as_utc_rfc3339() {
    let message = Message {
        id: 7,
        content: "hello".into(),
        received_at: Utc.with_ymd_and_hms(2019, 10, 1, 12, 30, 0).unwrap(),
    };

    let json = serde_json::to_value(MessageDto::from(message)).unwrap();

    assert_eq!(json["id"], 7);
    assert_eq!(json["content"], "hello");
    assert_eq!(json["received_at"], "2019-10-01T12:30:00Z");
}
