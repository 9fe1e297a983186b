/**
* filename : mod
* author : HAMA
* date: 2025. 6. 5.
* description:
**/

pub mod classifier;
pub mod screening;
pub mod signal_types;

pub use classifier::*;
pub use screening::*;
pub use signal_types::*;
