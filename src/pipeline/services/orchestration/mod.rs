pub mod instrumented_step;

pub use instrumented_step::{InstrumentLayer, Instrumented, RequestId};
