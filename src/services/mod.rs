//! Service layer: orchestration over the pure domain and the adapters.

pub mod pool;
pub mod review;
pub mod session_flow;

#[cfg(test)]
mod tests_review;

pub use pool::CardPoolManager;
pub use review::{CardRating, ReviewEntry, ReviewSheet};
pub use session_flow::SessionFlowService;
