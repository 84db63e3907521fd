pub mod accumulator;
pub mod engine;
pub mod filter;
pub mod limit;
pub mod visited;

pub use accumulator::ResultAccumulator;
pub use engine::Engine;
pub use filter::LinkFilter;
pub use limit::{Admission, LimitController};
pub use visited::VisitedSet;
