use crate::NewMessage;

use chrono::Utc;

#[test]
fn given_content_when_now_then_stamped_with_current_time() {
    let before = Utc::now();
    let message = NewMessage::now("hello");
    let after = Utc::now();

    assert_eq!(message.content, "hello");
    assert!(message.received_at >= before);
    assert!(message.received_at <= after);
}
