use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CodeMessage {
    /// Optional on the wire; the socket's authenticated id is authoritative.
    #[serde(default)]
    pub id: Option<String>,
    pub editor: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SelectMessage {
    pub id: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct PingMessage {}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EditorMessage {
    pub editor: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PongMessage {
    pub date: String,
}

/// Frames accepted on the general (student) channel.
#[derive(Serialize, Deserialize, Debug)]
#[serde(tag = "type")]
pub enum StudentMessage {
    #[serde(rename = "code")]
    Code(CodeMessage),
    #[serde(rename = "ping")]
    Ping(PingMessage),
}

/// Frames accepted on the teacher channel.
#[derive(Serialize, Deserialize, Debug)]
#[serde(tag = "type")]
pub enum TeacherMessage {
    #[serde(rename = "select")]
    Select(SelectMessage),
    #[serde(rename = "ping")]
    Ping(PingMessage),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum SendMessage {
    #[serde(rename = "code")]
    Code(EditorMessage),
    #[serde(rename = "pong")]
    Pong(PongMessage),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_code_frame_with_and_without_id() {
        let with_id: StudentMessage =
            serde_json::from_str(r#"{"type":"code","id":"42","editor":"x = 1"}"#).unwrap();
        let without_id: StudentMessage =
            serde_json::from_str(r#"{"type":"code","editor":"x = 1"}"#).unwrap();

        match with_id {
            StudentMessage::Code(msg) => {
                assert_eq!(msg.id.as_deref(), Some("42"));
                assert_eq!(msg.editor, "x = 1");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(without_id, StudentMessage::Code(CodeMessage { id: None, .. })));
    }

    #[test]
    fn parses_select_and_ping_frames() {
        let select: TeacherMessage = serde_json::from_str(r#"{"type":"select","id":"7"}"#).unwrap();
        let ping: TeacherMessage = serde_json::from_str(r#"{"type":"ping"}"#).unwrap();

        assert!(matches!(select, TeacherMessage::Select(SelectMessage { ref id }) if id == "7"));
        assert!(matches!(ping, TeacherMessage::Ping(_)));
    }

    #[test]
    fn rejects_teacher_frames_on_student_channel() {
        let parsed = serde_json::from_str::<StudentMessage>(r#"{"type":"select","id":"7"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn code_event_serializes_editor_only() {
        let msg = SendMessage::Code(EditorMessage { editor: "abc".into() });
        let json = serde_json::to_value(&msg).unwrap();

        assert_eq!(json, serde_json::json!({"type": "code", "editor": "abc"}));
    }
}
