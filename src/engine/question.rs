use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub image_key: String,
    pub prompt: String,
    pub correct_answer: bool,
}

impl Question {
    pub fn new(image_key: impl Into<String>, prompt: impl Into<String>, correct_answer: bool) -> Self {
        Self {
            image_key: image_key.into(),
            prompt: prompt.into(),
            correct_answer,
        }
    }

    pub fn is_correct(&self, choice: bool) -> bool {
        self.correct_answer == choice
    }
}
