// Downstream collaborators
//
// Both services degrade instead of failing: an unconfigured or unreachable
// backend yields mock fixtures, an unavailable LLM yields a canned answer at
// the call site. A downstream outage never fails a request.

pub mod data;
pub mod llm;

pub use data::DataService;
pub use llm::LlmService;
