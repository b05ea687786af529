//! Keyword-based question routing.
//!
//! Decides which records a question needs: deadlines, the timetable, both,
//! or (for anything unrecognised) both as a general fallback.

use serde::{Deserialize, Serialize};

const TASK_KEYWORDS: &[&str] = &[
    "rightnow",
    "right now",
    "task",
    "assignment",
    "homework",
    "due",
    "deadline",
    "canvas",
    "todo",
    "what should i do",
    "what do i need to do",
    "urgent",
    "priority",
    "focus",
    "work on",
];

const SCHEDULE_KEYWORDS: &[&str] = &[
    "schedule",
    "timetable",
    "class",
    "lecture",
    "tutorial",
    "lab",
    "nusmods",
    "module",
    "when is",
    "what time",
    "next class",
    "today's class",
    "tomorrow's class",
    "venue",
    "location",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QuestionIntent {
    RightNow,
    Schedule,
    Both,
    General,
}

impl QuestionIntent {
    /// Whether answering needs the user's tasks.
    pub fn wants_tasks(self) -> bool {
        !matches!(self, QuestionIntent::Schedule)
    }

    /// Whether answering needs the user's timetable.
    pub fn wants_schedule(self) -> bool {
        !matches!(self, QuestionIntent::RightNow)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            QuestionIntent::RightNow => "RIGHTNOW",
            QuestionIntent::Schedule => "SCHEDULE",
            QuestionIntent::Both => "BOTH",
            QuestionIntent::General => "GENERAL",
        }
    }
}

/// Case-insensitive substring match against both keyword lists.
pub fn analyze_intent(question: &str) -> QuestionIntent {
    let question = question.to_lowercase();
    let mentions = |keywords: &[&str]| keywords.iter().any(|k| question.contains(k));

    match (mentions(TASK_KEYWORDS), mentions(SCHEDULE_KEYWORDS)) {
        (true, true) => QuestionIntent::Both,
        (true, false) => QuestionIntent::RightNow,
        (false, true) => QuestionIntent::Schedule,
        (false, false) => QuestionIntent::General,
    }
}
