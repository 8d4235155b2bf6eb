//! Built-in pipeline phases, in execution order.

mod build;
mod marshal;
mod mixins;
mod print;

pub use build::BuildPhase;
pub use marshal::MarshalPhase;
pub use mixins::MixinPhase;
pub use print::PrintPhase;
