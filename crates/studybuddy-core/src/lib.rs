//! # StudyBuddy Core Library
//!
//! This library provides the core logic behind the StudyBuddy study assistant.
//! Every feature is reachable from the standalone CLI binary; any other front
//! end is a thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Planning core**: pure functions over task and timetable lists. They take
//!   the current time as an argument and never fail; malformed records are
//!   skipped, never reported.
//! - **Storage**: SQLite-based record storage and TOML-based configuration
//! - **Assistant**: intent routing plus grounded prompts for an
//!   OpenAI-compatible chat model
//!
//! ## Key Components
//!
//! - [`right_now`]: the single most useful thing to do now
//! - [`schedule_summary`]: clashes and the next class in one response
//! - [`format_context`]: plain-text grounding for the chat model
//! - [`StudyDb`]: task and event persistence
//! - [`Config`]: application configuration management

pub mod advisor;
pub mod assistant;
pub mod clock;
pub mod context;
pub mod error;
pub mod intent;
pub mod model;
pub mod schedule;
pub mod storage;
pub mod urgency;

pub use advisor::{right_now, right_now_with_policy, AdvisorPolicy, RightNow, SuggestionData, SuggestionKind};
pub use assistant::{ChatModel, OpenAiChat, StudyAssistant};
pub use context::format_context;
pub use error::{ChatError, ConfigError, CoreError, DatabaseError, ValidationError};
pub use intent::{analyze_intent, QuestionIntent};
pub use model::{ScheduleEvent, Task};
pub use schedule::{detect_clashes, find_next_class, schedule_summary, Clash, NextClassInfo, ScheduleSummary};
pub use storage::{Config, StudyDb};
pub use urgency::{most_urgent, RankedTask, UrgencyTier};
