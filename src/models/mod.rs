pub mod git;
pub mod hook;
pub mod report;
pub mod session;

pub use git::GitHead;
pub use hook::HookJson;
pub use report::StatusReport;
pub use session::SessionRecord;
