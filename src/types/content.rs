//! Content kinds and their payload shapes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three kinds of generated content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Quiz,
    Exercise,
    Study,
}

impl ContentKind {
    pub const ALL: [ContentKind; 3] = [ContentKind::Quiz, ContentKind::Exercise, ContentKind::Study];

    /// Short name, also the response body key and the route segment.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Quiz => "quiz",
            ContentKind::Exercise => "exercise",
            ContentKind::Study => "study",
        }
    }

    /// Store collection holding documents of this kind.
    pub fn namespace(&self) -> &'static str {
        match self {
            ContentKind::Quiz => "quizzes",
            ContentKind::Exercise => "exercises",
            ContentKind::Study => "studies",
        }
    }

    /// Human-readable label used in not-found messages.
    pub fn label(&self) -> &'static str {
        match self {
            ContentKind::Quiz => "Quiz",
            ContentKind::Exercise => "Exercise",
            ContentKind::Study => "Study material",
        }
    }

    pub fn not_found_message(&self) -> String {
        format!("{} not found", self.label())
    }

    /// Render this kind's prompt template.
    pub fn render_prompt(&self, title: &str, description: &str, level: &str) -> String {
        match self {
            ContentKind::Quiz => crate::prompts::quiz_prompt(title, description, level),
            ContentKind::Exercise => crate::prompts::exercise_prompt(title, description, level),
            ContentKind::Study => crate::prompts::study_prompt(title, description, level),
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "quiz" => Ok(ContentKind::Quiz),
            "exercise" => Ok(ContentKind::Exercise),
            "study" => Ok(ContentKind::Study),
            other => Err(format!("unknown content kind: {other}")),
        }
    }
}

/// One multiple-choice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// One practice exercise (fill-in-the-blanks, translation, dialogue completion, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    #[serde(rename = "type")]
    pub exercise_type: String,
    pub instruction: String,
    pub content: String,
    pub solution: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyMaterial {
    pub summary: String,
    pub key_concepts: Vec<String>,
    pub examples: Vec<String>,
    pub tips: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kind_names_and_namespaces() {
        assert_eq!(ContentKind::Quiz.namespace(), "quizzes");
        assert_eq!(ContentKind::Exercise.namespace(), "exercises");
        assert_eq!(ContentKind::Study.namespace(), "studies");
        assert_eq!(ContentKind::Study.not_found_message(), "Study material not found");
        assert_eq!("Quiz".parse::<ContentKind>().unwrap(), ContentKind::Quiz);
        assert!("poem".parse::<ContentKind>().is_err());
    }

    #[test]
    fn exercise_uses_type_key_on_the_wire() {
        let ex: Exercise = serde_json::from_value(json!({
            "type": "fill-in-the-blanks",
            "instruction": "Fill it",
            "content": "Der Hund ist ___.",
            "solution": "groß"
        }))
        .unwrap();
        assert_eq!(ex.exercise_type, "fill-in-the-blanks");
        assert_eq!(serde_json::to_value(&ex).unwrap()["type"], "fill-in-the-blanks");
    }

    #[test]
    fn study_material_is_camel_case() {
        let study = StudyMaterial {
            summary: "Greetings".into(),
            key_concepts: vec!["Hallo".into()],
            examples: vec!["Hallo, wie geht's?".into()],
            tips: vec!["Practice daily".into()],
        };
        let value = serde_json::to_value(&study).unwrap();
        assert!(value.get("keyConcepts").is_some());
        assert!(value.get("key_concepts").is_none());
    }
}
