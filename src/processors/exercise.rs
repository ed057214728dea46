use super::{parse_payload, ContentParser};
use crate::types::{ContentKind, Exercise};
use crate::Result;

const SHAPE_MESSAGE: &str = "Generated content is not a valid exercise array structure.";

/// Exercise output: a non-empty array of `{type, instruction, content, solution}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExerciseParser;

impl ContentParser for ExerciseParser {
    type Payload = Vec<Exercise>;

    fn kind(&self) -> ContentKind {
        ContentKind::Exercise
    }

    fn parse(&self, raw: &str) -> Result<Self::Payload> {
        parse_payload(ContentKind::Exercise, raw, SHAPE_MESSAGE, |items: &Vec<Exercise>| {
            !items.is_empty()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_exercises() {
        let raw = r#"```
[{"type": "sentence-translation", "instruction": "Translate", "content": "I am tired.", "solution": "Ich bin müde."}]
```"#;
        let items = ExerciseParser.parse(raw).unwrap();
        assert_eq!(items[0].exercise_type, "sentence-translation");
        assert_eq!(items[0].solution, "Ich bin müde.");
    }

    #[test]
    fn missing_type_is_a_shape_error() {
        let raw = r#"[{"instruction": "i", "content": "c", "solution": "s"}]"#;
        let err = ExerciseParser.parse(raw).unwrap_err();
        assert!(err.to_string().starts_with(SHAPE_MESSAGE));
    }

    #[test]
    fn empty_array_is_rejected() {
        assert!(ExerciseParser.parse("[]").is_err());
    }

    #[test]
    fn truncated_output_is_invalid_json() {
        let err = ExerciseParser.parse(r#"[{"type": "x""#).unwrap_err();
        assert!(err
            .to_string()
            .starts_with("Invalid JSON format from AI for exercise:"));
    }
}
