// src/api.rs

use super::error::ServiceError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /api/tarot` as it arrives on the wire.
///
/// `cards` stays untyped here so that "not an array" can be reported with the
/// same 400 body as "missing" or "empty". `spreadType` is untyped so a number
/// there is rendered rather than rejected.
#[derive(Deserialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TarotRequest {
    pub question: Option<String>,
    pub spread_type: Option<Value>,
    pub cards: Option<Value>,
}

/// One drawn card. Every field is optional; gaps are filled with fallback
/// labels when the prompt is rendered.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct CardDraw {
    pub position: Option<String>,
    pub name: Option<String>,
    pub cn_name: Option<String>,
    pub orientation: Option<String>,
}

impl CardDraw {
    /// Lenient conversion, field by field. A field that is not a scalar counts
    /// as absent without affecting the others; a non-object is an empty card.
    pub fn from_value(value: Value) -> Self {
        CardDraw {
            position: scalar_text(value.get("position")),
            name: scalar_text(value.get("name")),
            cn_name: scalar_text(value.get("cnName")),
            orientation: scalar_text(value.get("orientation")),
        }
    }

    pub fn position(&self) -> Option<&str> {
        non_empty(&self.position)
    }

    /// Localized name first, then the plain name.
    pub fn display_name(&self) -> Option<&str> {
        non_empty(&self.cn_name).or_else(|| non_empty(&self.name))
    }

    /// Passed through verbatim; only an absent orientation falls back.
    pub fn orientation(&self) -> Option<&str> {
        self.orientation.as_deref()
    }
}

/// A request that passed validation. Card order is the spread layout and is
/// kept exactly as submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingRequest {
    pub question: String,
    pub spread_type: Option<String>,
    pub cards: Vec<CardDraw>,
}

impl ReadingRequest {
    pub fn spread_type(&self) -> Option<&str> {
        non_empty(&self.spread_type)
    }
}

impl TryFrom<TarotRequest> for ReadingRequest {
    type Error = ServiceError;

    fn try_from(raw: TarotRequest) -> Result<Self, Self::Error> {
        let question = match raw.question {
            Some(q) if !q.is_empty() => q,
            _ => {
                return Err(ServiceError::Validation(
                    "question and cards are required: question is missing or empty".to_string(),
                ));
            }
        };

        let cards = match raw.cards {
            Some(Value::Array(items)) if !items.is_empty() => {
                items.into_iter().map(CardDraw::from_value).collect()
            }
            Some(Value::Array(_)) => {
                return Err(ServiceError::Validation(
                    "question and cards are required: cards is empty".to_string(),
                ));
            }
            Some(_) => {
                return Err(ServiceError::Validation(
                    "question and cards are required: cards must be an array".to_string(),
                ));
            }
            None => {
                return Err(ServiceError::Validation(
                    "question and cards are required: cards is missing".to_string(),
                ));
            }
        };

        Ok(ReadingRequest {
            question,
            spread_type: scalar_text(raw.spread_type.as_ref()),
            cards,
        })
    }
}

/// Reply body for a reading. Exactly one of `answer` or `error` is present.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct ReadingResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ReadingResponse {
    pub fn answer(text: impl Into<String>) -> Self {
        Self {
            ok: true,
            answer: Some(text.into()),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            answer: None,
            error: Some(message.into()),
        }
    }
}

/// Text of a scalar JSON value. Numbers and booleans keep their JSON spelling;
/// null, arrays and objects count as absent.
fn scalar_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(body: Value) -> TarotRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn accepts_minimal_request() {
        let reading = ReadingRequest::try_from(raw(json!({
            "question": "Will I get the job?",
            "cards": [{"position": "Past", "name": "The Fool", "orientation": "upright"}]
        })))
        .unwrap();

        assert_eq!(reading.question, "Will I get the job?");
        assert_eq!(reading.spread_type(), None);
        assert_eq!(reading.cards.len(), 1);
        assert_eq!(reading.cards[0].display_name(), Some("The Fool"));
    }

    #[test]
    fn rejects_missing_or_empty_question() {
        for body in [
            json!({"cards": [{"name": "The Sun"}]}),
            json!({"question": "", "cards": [{"name": "The Sun"}]}),
            json!({"question": null, "cards": [{"name": "The Sun"}]}),
        ] {
            let err = ReadingRequest::try_from(raw(body)).unwrap_err();
            assert!(matches!(err, ServiceError::Validation(_)));
        }
    }

    #[test]
    fn whitespace_question_is_not_empty() {
        let reading = ReadingRequest::try_from(raw(json!({
            "question": "   ",
            "cards": [{"name": "The Sun"}]
        })))
        .unwrap();
        assert_eq!(reading.question, "   ");
    }

    #[test]
    fn numeric_spread_type_is_rendered_as_text() {
        let reading = ReadingRequest::try_from(raw(json!({
            "question": "q",
            "spreadType": 3,
            "cards": [{"name": "The Sun"}]
        })))
        .unwrap();
        assert_eq!(reading.spread_type(), Some("3"));

        let reading = ReadingRequest::try_from(raw(json!({
            "question": "q",
            "spreadType": {"name": "Celtic Cross"},
            "cards": [{"name": "The Sun"}]
        })))
        .unwrap();
        assert_eq!(reading.spread_type(), None);
    }

    #[test]
    fn rejects_missing_empty_or_non_array_cards() {
        for body in [
            json!({"question": "q"}),
            json!({"question": "q", "cards": []}),
            json!({"question": "q", "cards": {"name": "The Sun"}}),
            json!({"question": "q", "cards": "The Sun"}),
            json!({"question": "q", "cards": null}),
        ] {
            let err = ReadingRequest::try_from(raw(body)).unwrap_err();
            assert!(matches!(err, ServiceError::Validation(_)));
        }
    }

    #[test]
    fn keeps_card_order_and_duplicates() {
        let reading = ReadingRequest::try_from(raw(json!({
            "question": "q",
            "cards": [{"name": "B"}, {"name": "A"}, {"name": "B"}]
        })))
        .unwrap();

        let names: Vec<_> = reading.cards.iter().map(|c| c.display_name()).collect();
        assert_eq!(names, vec![Some("B"), Some("A"), Some("B")]);
    }

    #[test]
    fn prefers_localized_name_and_tolerates_odd_cards() {
        let card = CardDraw::from_value(json!({"name": "The Fool", "cnName": "愚者"}));
        assert_eq!(card.display_name(), Some("愚者"));

        let card = CardDraw::from_value(json!({"name": "The Fool", "cnName": ""}));
        assert_eq!(card.display_name(), Some("The Fool"));

        let card = CardDraw::from_value(json!("not a card"));
        assert_eq!(card, CardDraw::default());
    }

    #[test]
    fn mistyped_field_does_not_drop_the_rest_of_the_card() {
        let card = CardDraw::from_value(json!({
            "position": 1,
            "name": "The Fool",
            "orientation": "upright"
        }));
        assert_eq!(card.position(), Some("1"));
        assert_eq!(card.display_name(), Some("The Fool"));
        assert_eq!(card.orientation(), Some("upright"));

        let card = CardDraw::from_value(json!({
            "position": ["Past"],
            "name": "The Fool",
            "cnName": null,
            "orientation": true
        }));
        assert_eq!(card.position(), None);
        assert_eq!(card.display_name(), Some("The Fool"));
        assert_eq!(card.orientation(), Some("true"));
    }

    #[test]
    fn empty_orientation_is_kept_verbatim() {
        let card = CardDraw::from_value(json!({"name": "The Fool", "orientation": ""}));
        assert_eq!(card.orientation(), Some(""));

        let card = CardDraw::from_value(json!({"name": "The Fool"}));
        assert_eq!(card.orientation(), None);
    }

    #[test]
    fn response_serializes_only_one_of_answer_or_error() {
        let ok = serde_json::to_value(ReadingResponse::answer("hi")).unwrap();
        assert_eq!(ok, json!({"ok": true, "answer": "hi"}));

        let failed = serde_json::to_value(ReadingResponse::failure("boom")).unwrap();
        assert_eq!(failed, json!({"ok": false, "error": "boom"}));
    }
}
