use super::{parse_payload, ContentParser};
use crate::types::{ContentKind, StudyMaterial};
use crate::Result;

const SHAPE_MESSAGE: &str = "Generated content is not a valid study object structure.";

/// Study output: one object whose three lists each hold at least one entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct StudyParser;

impl ContentParser for StudyParser {
    type Payload = StudyMaterial;

    fn kind(&self) -> ContentKind {
        ContentKind::Study
    }

    fn parse(&self, raw: &str) -> Result<Self::Payload> {
        parse_payload(ContentKind::Study, raw, SHAPE_MESSAGE, |s: &StudyMaterial| {
            !s.key_concepts.is_empty() && !s.examples.is_empty() && !s.tips.is_empty()
        })
    }
}
