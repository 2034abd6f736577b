use glimpse_core::source::ImageInfo;

/// Overall UI state of the control window.
#[derive(Default)]
pub struct UIState {
    /// Image shown by the open viewer (None = closed).
    pub current: Option<ImageInfo>,

    /// Step counters.
    pub steps_run: usize,
    pub steps_failed: usize,

    /// Set once the step worker has torn the session down.
    pub torn_down: bool,

    /// Log messages.
    pub log_messages: Vec<String>,
}

impl UIState {
    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }

    pub fn status_label(&self) -> String {
        match (&self.current, self.torn_down) {
            (_, true) => "Finished".to_string(),
            (Some(info), false) => format!(
                "Showing {} ({}x{})",
                info.requested.display(),
                info.width,
                info.height
            ),
            (None, false) => "Waiting for steps".to_string(),
        }
    }
}
