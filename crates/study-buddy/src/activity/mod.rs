//! Study-session schedule, dashboard partitions, and the conversation inbox.

pub mod dashboard;
pub mod messages;
pub mod schedule;

pub use dashboard::DashboardSummary;
pub use messages::{ConversationSummary, Inbox, Message, MessageId};
pub use schedule::{SessionMode, StudySchedule, StudySession, StudySessionDraft, StudySessionId};
