pub mod fundamentals;
pub mod provider;

pub use fundamentals::*;
pub use provider::*;
