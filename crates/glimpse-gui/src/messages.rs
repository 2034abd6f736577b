use std::path::PathBuf;

use glimpse_core::source::ImageInfo;

/// Steps sent from the step reader to the step worker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepCommand {
    /// Show the image at `path`, replacing any open viewer.
    Open { path: PathBuf },

    /// Close the viewer if one is open.
    Close,

    /// End of run: close everything and stop taking steps.
    Teardown,

    /// A line that is not a step this viewer knows.
    Unknown { line: String },
}

/// Results sent from the step worker back to the UI thread.
pub enum StepResult {
    Opened { info: ImageInfo },
    Closed,
    TornDown,
    Error { message: String },
    Log { message: String },
}
