use serde::{Deserialize, Serialize};

/// The two kinds of votable items.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Question,
    Answer,
}

impl ItemKind {
    /// Selects the item kind from the vote route's `item_type` segment.
    ///
    /// `"question"` targets questions; any other value targets answers.
    pub fn from_route_segment(value: &str) -> Self {
        if value == "question" {
            ItemKind::Question
        } else {
            ItemKind::Answer
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ItemKind::Question => "question",
            ItemKind::Answer => "answer",
        }
    }
}
