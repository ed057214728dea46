//! Prompt templates, one per content kind.
//!
//! Each template takes `(title, description, level)` and asks the model for
//! bare JSON. Levels are CEFR strings such as `A2` or `B1`; callers fill in
//! [`DEFAULT_LEVEL`](crate::types::DEFAULT_LEVEL) when none is given.

pub fn quiz_prompt(title: &str, description: &str, level: &str) -> String {
    format!(
        "Generate a JSON array with 10 multiple-choice questions for German learners at level {level}. Topic: \"{title}\".\n\
Use the following context: {description}.\n\
Each question must be an object with:\n\
- \"question\": string\n\
- \"options\": array of 4 strings including the correct answer\n\
- \"answer\": correct answer string from the options\n\
- \"explanation\": string explaining the answer\n\
Only return JSON — no text outside of JSON."
    )
}

pub fn exercise_prompt(title: &str, description: &str, level: &str) -> String {
    format!(
        "Generate a JSON array with 3 practical German language exercises for learners at level {level}. Topic: \"{title}\".\n\
Use the following context: {description}.\n\
Each exercise must be an object with:\n\
- \"type\": string (e.g., \"fill-in-the-blanks\", \"sentence-translation\", \"dialogue-completion\")\n\
- \"instruction\": string\n\
- \"content\": string (the exercise text, e.g., a sentence with blanks, a dialogue)\n\
- \"solution\": string (the correct answer or completed content)\n\
Only return JSON — no explanation, no text outside of JSON."
    )
}

pub fn study_prompt(title: &str, description: &str, level: &str) -> String {
    format!(
        "Generate a JSON object containing key study points for German learners at level {level}. Topic: \"{title}\".\n\
Use the following context: {description}.\n\
The object must have:\n\
- \"summary\": string (a concise overview)\n\
- \"keyConcepts\": array of strings (important terms/ideas)\n\
- \"examples\": array of strings (illustrative sentences/phrases)\n\
- \"tips\": array of strings (learning tips)\n\
Only return JSON — no explanation, no text outside of JSON."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ContentKind;

    #[test]
    fn templates_interpolate_all_inputs() {
        for kind in ContentKind::ALL {
            let p = kind.render_prompt("Dativ", "Prepositions with dative", "A2");
            assert!(p.contains("level A2"), "{kind}: {p}");
            assert!(p.contains("Topic: \"Dativ\""), "{kind}");
            assert!(p.contains("context: Prepositions with dative."), "{kind}");
            assert!(p.ends_with("text outside of JSON."), "{kind}");
        }
    }

    #[test]
    fn each_template_names_its_fields() {
        let quiz = quiz_prompt("t", "d", "B1");
        assert!(quiz.starts_with("Generate a JSON array with 10 multiple-choice questions"));
        assert!(quiz.contains("\"options\": array of 4 strings"));

        let exercise = exercise_prompt("t", "d", "B1");
        assert!(exercise.contains("3 practical German language exercises"));
        assert!(exercise.contains("\"solution\""));

        let study = study_prompt("t", "d", "B1");
        assert!(study.starts_with("Generate a JSON object"));
        assert!(study.contains("\"keyConcepts\""));
    }
}
