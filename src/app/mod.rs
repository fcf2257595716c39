mod state;
mod ui;

pub use state::{run_job, AnalysisJob, App, AppWrapper, ChartTextures, SlotResult};
