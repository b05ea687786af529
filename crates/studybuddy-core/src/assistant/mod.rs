//! Grounded question answering.
//!
//! A question is routed by [`analyze_intent`], the matching records are
//! loaded from the store and rendered by [`format_context`], and the result
//! is handed to a [`ChatModel`] together with the grounding rules.

mod chat;
pub mod credentials;
mod prompt;

pub use chat::{ChatModel, OpenAiChat, EMPTY_REPLY};
pub use prompt::{build_system_prompt, NO_INFORMATION_REPLY};

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::context::format_context;
use crate::error::Result;
use crate::intent::{analyze_intent, QuestionIntent};
use crate::storage::{AssistantConfig, StudyDb};

/// Everything sent to the model for one question.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreparedPrompt {
    pub intent: QuestionIntent,
    pub system: String,
    pub user: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub intent: QuestionIntent,
    pub reply: String,
}

/// Answers questions from one store through one model.
pub struct StudyAssistant<'a, M> {
    db: &'a StudyDb,
    model: M,
    task_limit: u32,
}

impl<'a, M: ChatModel> StudyAssistant<'a, M> {
    pub fn new(db: &'a StudyDb, model: M, config: &AssistantConfig) -> Self {
        Self {
            db,
            model,
            task_limit: config.context_task_limit,
        }
    }

    /// Build the prompt for `question` without calling the model.
    pub fn prepare(&self, user_id: &str, question: &str, now: NaiveDateTime) -> Result<PreparedPrompt> {
        let intent = analyze_intent(question);
        let tasks = if intent.wants_tasks() {
            self.db.list_tasks(user_id, Some(self.task_limit))?
        } else {
            Vec::new()
        };
        let events = if intent.wants_schedule() {
            self.db.list_events(user_id, None)?
        } else {
            Vec::new()
        };
        tracing::debug!(
            user_id,
            intent = intent.as_str(),
            tasks = tasks.len(),
            events = events.len(),
            "assembled grounding context"
        );

        let context = format_context(&tasks, &events, now);
        Ok(PreparedPrompt {
            intent,
            system: build_system_prompt(&context, now),
            user: question.to_string(),
        })
    }

    /// Answer `question` for `user_id`.
    ///
    /// # Errors
    /// Store failures and model failures (`CoreError::Chat`) are returned as is.
    pub async fn ask(&self, user_id: &str, question: &str, now: NaiveDateTime) -> Result<Answer> {
        let prompt = self.prepare(user_id, question, now)?;
        let reply = self.model.complete(&prompt.system, &prompt.user).await?;
        Ok(Answer {
            intent: prompt.intent,
            reply,
        })
    }
}
