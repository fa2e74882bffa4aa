//! Translation of an agent's structured reply into an [`ActionCommand`].
//!
//! Accepted payloads (optionally wrapped in a code fence):
//!
//! ```text
//! { "mode": "move", "steps": [ { "dir": "up", "times": 3 }, { "dir": "left" } ] }
//! { "mode": "talk", "content": "hello" }
//! ```
//!
//! Direction words map `up` to north (+y), `down` to south, `left` to west
//! and `right` to east, the same axes the keyboard bindings use.
use serde::Deserialize;
use serde_json::Value;

use super::{ActionCommand, CardinalDirection, MoveStep};

const FENCE: &str = "```";

/// Largest `times` a single move step may carry.
///
/// A whole `Move` is queued within one tick, so each step is kept to a
/// handful of map-crossings.
pub const MAX_REPEAT: u32 = 64;

/// Failure to turn a reply into `Move` or `Talk`.
///
/// Both variants are recovered locally by [`interpret`] and surfaced as an
/// [`ActionCommand::Error`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ReplyError {
    /// Payload is not a parseable JSON document.
    #[error("unparseable reply: {reason}")]
    Schema { payload: String, reason: String },

    /// Payload parsed but a field is missing or invalid.
    #[error("{reason}: {payload}")]
    Validation { payload: String, reason: String },
}

impl ReplyError {
    fn validation(payload: &str, reason: impl Into<String>) -> Self {
        ReplyError::Validation {
            payload: payload.to_string(),
            reason: reason.into(),
        }
    }

    /// Text shown on the error surface.
    ///
    /// Unparseable payloads are shown verbatim; validation failures carry a
    /// diagnostic in front of the offending payload.
    pub fn display_text(&self) -> String {
        match self {
            ReplyError::Schema { payload, .. } => payload.clone(),
            ReplyError::Validation { .. } => self.to_string(),
        }
    }
}

/// Direction vocabulary of `move` replies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
enum ReplyDirection {
    Up,
    Down,
    Left,
    Right,
}

impl From<ReplyDirection> for CardinalDirection {
    fn from(value: ReplyDirection) -> Self {
        match value {
            ReplyDirection::Up => CardinalDirection::North,
            ReplyDirection::Down => CardinalDirection::South,
            ReplyDirection::Left => CardinalDirection::West,
            ReplyDirection::Right => CardinalDirection::East,
        }
    }
}

#[derive(Deserialize)]
struct MoveReply {
    steps: Vec<RawStep>,
}

#[derive(Deserialize)]
struct RawStep {
    dir: String,
    #[serde(default)]
    times: Option<i64>,
}

#[derive(Deserialize)]
struct TalkReply {
    content: String,
}

/// Removes a surrounding code fence (with optional language tag) and whitespace.
pub fn strip_fences(raw: &str) -> &str {
    let mut body = raw.trim();
    if let Some(rest) = body.strip_prefix(FENCE) {
        let tag_len = rest
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(rest.len());
        body = rest[tag_len..].trim_start();
    }
    if let Some(rest) = body.trim_end().strip_suffix(FENCE) {
        body = rest;
    }
    body.trim()
}

/// Parses and validates a reply into `Move` or `Talk`.
pub fn parse_reply(raw: &str) -> Result<ActionCommand, ReplyError> {
    let payload = strip_fences(raw);

    let document: Value = serde_json::from_str(payload).map_err(|e| ReplyError::Schema {
        payload: payload.to_string(),
        reason: e.to_string(),
    })?;

    let mode = match document.get("mode") {
        Some(Value::String(mode)) => mode.as_str(),
        Some(_) => return Err(ReplyError::validation(payload, "reply mode is not a string")),
        None => return Err(ReplyError::validation(payload, "reply has no mode")),
    };

    match mode {
        "move" => parse_move(payload, document),
        "talk" => {
            let reply: TalkReply = serde_json::from_value(document).map_err(|e| {
                ReplyError::validation(payload, format!("malformed talk reply ({e})"))
            })?;
            Ok(ActionCommand::Talk {
                content: reply.content,
            })
        }
        other => Err(ReplyError::validation(
            payload,
            format!("unsupported reply mode \"{other}\""),
        )),
    }
}

fn parse_move(payload: &str, document: Value) -> Result<ActionCommand, ReplyError> {
    let reply: MoveReply = serde_json::from_value(document)
        .map_err(|e| ReplyError::validation(payload, format!("malformed move reply ({e})")))?;

    let steps = reply
        .steps
        .into_iter()
        .map(|step| {
            let direction = step
                .dir
                .parse::<ReplyDirection>()
                .map_err(|_| {
                    ReplyError::validation(payload, format!("unknown direction \"{}\"", step.dir))
                })?
                .into();
            let times = match step.times {
                None => 1,
                Some(times) => u32::try_from(times)
                    .ok()
                    .filter(|times| (1..=MAX_REPEAT).contains(times))
                    .ok_or_else(|| {
                        ReplyError::validation(
                            payload,
                            format!("invalid repeat count {times} (expected 1..={MAX_REPEAT})"),
                        )
                    })?,
            };
            Ok(MoveStep::new(direction, times))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ActionCommand::Move { steps })
}

/// Total translation of a raw reply: always yields exactly one command.
pub fn interpret(raw: &str) -> ActionCommand {
    parse_reply(raw).unwrap_or_else(|error| ActionCommand::Error {
        content: error.display_text(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fenced_talk_reply() {
        let raw = "```json\n{\"mode\":\"talk\",\"content\":\"你好\"}\n```";
        assert_eq!(interpret(raw), ActionCommand::talk("你好"));

        let bare_fence = "```{\"mode\":\"talk\",\"content\":\"你好\"}```";
        assert_eq!(interpret(bare_fence), ActionCommand::talk("你好"));

        let unfenced = "{\"mode\":\"talk\",\"content\":\"你好\"}";
        assert_eq!(interpret(unfenced), ActionCommand::talk("你好"));
    }

    #[test]
    fn move_reply_expands_with_default_times() {
        let raw = r#"{"mode":"move","steps":[{"dir":"up","times":3},{"dir":"right"}]}"#;
        assert_eq!(
            interpret(raw),
            ActionCommand::Move {
                steps: vec![
                    MoveStep::new(CardinalDirection::North, 3),
                    MoveStep::new(CardinalDirection::East, 1),
                ]
            }
        );
    }

    #[test]
    fn vocabulary_maps_to_axes() {
        for (word, direction) in [
            ("up", CardinalDirection::North),
            ("down", CardinalDirection::South),
            ("left", CardinalDirection::West),
            ("right", CardinalDirection::East),
        ] {
            let raw = format!(r#"{{"mode":"move","steps":[{{"dir":"{word}"}}]}}"#);
            let command = interpret(&raw);
            assert_eq!(command.expand().collect::<Vec<_>>(), vec![direction]);
        }
    }

    #[test]
    fn unknown_direction_is_validation_error() {
        let raw = r#"{"mode":"move","steps":[{"dir":"up"},{"dir":"north"}]}"#;
        let error = parse_reply(raw).unwrap_err();
        assert!(matches!(error, ReplyError::Validation { .. }));

        match interpret(raw) {
            ActionCommand::Error { content } => {
                assert!(content.contains("unknown direction \"north\""));
                assert!(content.contains(raw));
            }
            other => panic!("expected error, got {other:?}"),
        }
    }

    #[test]
    fn zero_or_negative_times_rejected() {
        for times in ["0", "-2"] {
            let raw = format!(r#"{{"mode":"move","steps":[{{"dir":"up","times":{times}}}]}}"#);
            assert!(matches!(
                parse_reply(&raw),
                Err(ReplyError::Validation { .. })
            ));
        }
    }

    #[test]
    fn oversized_times_rejected() {
        let at_limit = format!(r#"{{"mode":"move","steps":[{{"dir":"up","times":{MAX_REPEAT}}}]}}"#);
        assert_eq!(interpret(&at_limit).expand().count(), MAX_REPEAT as usize);

        for times in [
            (MAX_REPEAT + 1).to_string(),
            "300000000".to_string(),
            u32::MAX.to_string(),
            i64::MAX.to_string(),
        ] {
            let raw = format!(
                r#"{{"mode":"move","steps":[{{"dir":"left"}},{{"dir":"up","times":{times}}}]}}"#
            );
            match interpret(&raw) {
                ActionCommand::Error { content } => {
                    assert!(content.starts_with(&format!("invalid repeat count {times}")));
                }
                other => panic!("expected error for times={times}, got {other:?}"),
            }
        }
    }

    #[test]
    fn garbage_is_preserved_verbatim() {
        let raw = "I'd rather not move right now.";
        assert_eq!(interpret(raw), ActionCommand::error(raw));
        assert_eq!(interpret(""), ActionCommand::error(""));
        assert_eq!(interpret("```\n```"), ActionCommand::error(""));
    }

    #[test]
    fn unsupported_or_missing_mode() {
        for raw in [
            r#"{"mode":"dance"}"#,
            r#"{"content":"hi"}"#,
            r#"{"mode":3}"#,
            r#"[1,2,3]"#,
        ] {
            assert!(
                matches!(interpret(raw), ActionCommand::Error { .. }),
                "{raw} should be an error"
            );
        }
    }

    #[test]
    fn malformed_fields_are_errors() {
        for raw in [
            r#"{"mode":"talk"}"#,
            r#"{"mode":"talk","content":7}"#,
            r#"{"mode":"move"}"#,
            r#"{"mode":"move","steps":"up"}"#,
        ] {
            assert!(matches!(
                parse_reply(raw),
                Err(ReplyError::Validation { .. })
            ));
        }
    }

    #[test]
    fn empty_step_list_is_a_valid_move() {
        let raw = r#"{"mode":"move","steps":[]}"#;
        assert_eq!(interpret(raw), ActionCommand::Move { steps: vec![] });
    }

    #[test]
    fn strip_fences_handles_partial_wrapping() {
        assert_eq!(strip_fences("  ```json\n{}\n"), "{}");
        assert_eq!(strip_fences("{}\n```  "), "{}");
        assert_eq!(strip_fences("{\"a\":\"```\"}"), "{\"a\":\"```\"}");
    }
}
