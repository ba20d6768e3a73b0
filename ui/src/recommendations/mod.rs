//! Recommendation list, pair exploration and the local assistant.

mod chat;
mod detail;
mod exploration;
mod view;

pub use chat::{canned_reply, retry_reply, ChatKind, ChatLog, ChatMessage, NO_RECOMMENDATION_REPLY};
pub use detail::open_detail;
pub use exploration::{run_exploration, validate_pair, ExplorationError};
pub use view::RecommendationsPage;
