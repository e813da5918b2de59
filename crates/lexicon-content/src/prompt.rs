//! Prompts and response schemas for the two content operations.
//!
//! Schemas use the provider's OpenAPI-subset dialect (`OBJECT`, `ARRAY`,
//! upper-case scalar type names).

use serde_json::json;

use crate::provider::GenerationRequest;

pub fn context_request(word: &str, definition: &str) -> GenerationRequest {
  GenerationRequest {
    prompt: format!(
      "Word: {word}\n\
       Definition: {definition}\n\
       \n\
       Task: Provide 3 distinct example sentences, 3 synonyms, and a brief \
       etymology/origin fact."
    ),
    schema: json!({
      "type": "OBJECT",
      "properties": {
        "examples": {
          "type": "ARRAY",
          "items": { "type": "STRING" },
          "description": "3 example sentences using the word.",
        },
        "synonyms": {
          "type": "ARRAY",
          "items": { "type": "STRING" },
          "description": "3 synonyms for the word.",
        },
        "etymology": {
          "type": "STRING",
          "description": "A brief, fun fact about the word's origin.",
        },
      },
      "required": ["examples", "synonyms", "etymology"],
    }),
  }
}

pub fn evaluation_request(word: &str, definition: &str, sentence: &str) -> GenerationRequest {
  GenerationRequest {
    prompt: format!(
      "Word: {word}\n\
       Definition: {definition}\n\
       User's Sentence: {sentence}\n\
       \n\
       Task: Analyze if the user used the word correctly based on the \
       definition. Provide strict but helpful feedback. Return JSON."
    ),
    schema: json!({
      "type": "OBJECT",
      "properties": {
        "isCorrect": {
          "type": "BOOLEAN",
          "description": "True if the word is used correctly in the sentence.",
        },
        "feedback": {
          "type": "STRING",
          "description": "Constructive feedback explaining why it is correct or incorrect.",
        },
        "betterSentence": {
          "type": "STRING",
          "description": "An improved or alternative version of the sentence.",
        },
      },
      "required": ["isCorrect", "feedback", "betterSentence"],
    }),
  }
}
