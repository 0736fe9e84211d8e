//! Core traits shared by the store, the selection schemes and the transport.
mod adder;
mod batch;
mod scheme;

pub use adder::{Adder, GenerateCallback, OneStepAdder};
pub use batch::{BatchData, Transition};
pub use scheme::{RemovalScheme, SampleScheme, SampledIds};
