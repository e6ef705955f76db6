use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Error,
}

impl FlashLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            FlashLevel::Success => "success",
            FlashLevel::Error => "error",
        }
    }
}

/// A one-shot notice shown on the next rendered page.
///
/// Across redirects it rides in the query string of the target URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            message: message.into(),
        }
    }

    /// `path` with this notice appended as query parameters.
    pub fn redirect_target(&self, path: &str) -> String {
        match serde_urlencoded::to_string(self) {
            Ok(query) => format!("{path}?{query}"),
            Err(_) => path.to_string(),
        }
    }
}

/// Query-string side of [`Flash::redirect_target`]. Unknown levels and partial
/// queries are ignored rather than rejected.
#[derive(Debug, Default, Deserialize)]
pub struct FlashQuery {
    pub level: Option<String>,
    pub message: Option<String>,
}

impl FlashQuery {
    pub fn into_flash(self) -> Option<Flash> {
        let level = match self.level.as_deref() {
            Some("success") => FlashLevel::Success,
            Some("error") => FlashLevel::Error,
            _ => return None,
        };
        self.message.map(|message| Flash { level, message })
    }
}
