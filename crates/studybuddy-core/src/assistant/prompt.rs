use chrono::NaiveDateTime;
use indoc::formatdoc;

/// What the model must say when the context does not cover a question.
pub const NO_INFORMATION_REPLY: &str = "I don't have that information in your schedule or tasks.";

/// Grounding instructions followed by the user's records and the current time.
pub fn build_system_prompt(context: &str, now: NaiveDateTime) -> String {
    formatdoc! {"
        You are a helpful study assistant for students. You have access to the user's study tasks and class schedule.

        IMPORTANT RULES:
        1. Only use information from the context provided below.
        2. Do NOT make up or invent tasks, due dates, class times, or module information.
        3. If the user asks about something not in the context, say \"{NO_INFORMATION_REPLY}\"
        4. Be helpful and concise in your responses.
        5. When referencing times or dates, use the information exactly as provided in the context.

        CONTEXT (User's Data):
        {context}

        Current Time: {now} UTC",
        now = now.format("%Y-%m-%d %H:%M:%S"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn prompt_embeds_rules_context_and_time() {
        let now = NaiveDate::from_ymd_opt(2024, 3, 11)
            .unwrap()
            .and_hms_opt(9, 5, 0)
            .unwrap();
        let prompt = build_system_prompt("=== USER'S STUDY TASKS ===\n- No tasks found.", now);

        assert!(prompt.starts_with("You are a helpful study assistant"));
        assert!(prompt.contains("say \"I don't have that information in your schedule or tasks.\""));
        assert!(prompt.contains("CONTEXT (User's Data):\n=== USER'S STUDY TASKS ===\n- No tasks found."));
        assert!(prompt.ends_with("Current Time: 2024-03-11 09:05:00 UTC"));
    }
}
