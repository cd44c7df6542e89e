//! Fixed instructions sent ahead of every question.

/// Keeps answers short: no long lists, definitions, or sectioned replies.
pub const STYLE_INSTRUCTION: &str = "You are a concise, helpful, and direct AI assistant. \
Answer the user's question as briefly as possible, but with sufficient detail. \
Do not include long lists, extensive definitions, or multiple sections.";
