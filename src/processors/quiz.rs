use super::{parse_payload, ContentParser};
use crate::types::{ContentKind, QuizQuestion};
use crate::Result;

const SHAPE_MESSAGE: &str = "Generated content is not a valid quiz array structure.";

/// Quiz output: a non-empty array of questions, each with exactly four options.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuizParser;

impl ContentParser for QuizParser {
    type Payload = Vec<QuizQuestion>;

    fn kind(&self) -> ContentKind {
        ContentKind::Quiz
    }

    fn parse(&self, raw: &str) -> Result<Self::Payload> {
        parse_payload(ContentKind::Quiz, raw, SHAPE_MESSAGE, |questions: &Vec<QuizQuestion>| {
            !questions.is_empty() && questions.iter().all(|q| q.options.len() == 4)
        })
    }
}
