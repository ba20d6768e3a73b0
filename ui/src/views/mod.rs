mod analytics;
mod collaboration;
mod home;

pub use analytics::Analytics;
pub use collaboration::CollaborationAnalysis;
pub use home::Home;
