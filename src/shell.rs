//! Services the editor core consumes from its host application.

use crate::model::ImageSize;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
}

/// A user-facing message the host should surface (dialog, toast, status bar).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Info,
            title: title.into(),
            message: message.into(),
        }
    }
    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Warning,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Prompts, notices and image loading. `None` from a prompt means the user cancelled.
pub trait Shell {
    fn prompt_weight(&mut self, initial: &str) -> Option<String>;
    fn prompt_label(&mut self, initial: &str) -> Option<String>;
    fn notify(&mut self, notice: Notice);

    /// Size of the image at `path`. Hosts without image support keep the default.
    fn load_image(&mut self, path: &str) -> Result<ImageSize, String> {
        Err(format!("cannot load '{}': images are not supported by this host", path))
    }
}
