// core/src/session.rs
use serde::Serialize;

use crate::config::ChartOptions;
use crate::error::SessionError;

/// State of one operator's working session.
///
/// Holds what used to live in process-wide UI flags: whether the uploaded
/// workbook was already imported, and the current chart settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    user: String,
    file_saved: bool,
    pub options: ChartOptions,
}

impl Session {
    pub fn new(user: &str) -> Result<Self, SessionError> {
        let user = user.trim();
        if user.is_empty() {
            return Err(SessionError::MissingUserName);
        }
        Ok(Self {
            user: user.to_string(),
            file_saved: false,
            options: ChartOptions::default(),
        })
    }

    pub fn with_options(mut self, options: ChartOptions) -> Self {
        self.options = options;
        self
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    /// Name of the user's save location, `perfs_<user>`.
    pub fn save_name(&self) -> String {
        format!("perfs_{}", self.user)
    }

    /// An upload should be copied into the store only once per session,
    /// until the operator asks for a new import.
    pub fn needs_import(&self) -> bool {
        !self.file_saved
    }

    pub fn mark_imported(&mut self) {
        self.file_saved = true;
    }

    pub fn reset_import(&mut self) {
        self.file_saved = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_user_is_rejected() {
        assert_eq!(Session::new("   "), Err(SessionError::MissingUserName));
    }

    #[test]
    fn import_flag_lifecycle() {
        let mut s = Session::new(" Alex ").unwrap();
        assert_eq!(s.user(), "Alex");
        assert_eq!(s.save_name(), "perfs_Alex");
        assert!(s.needs_import());
        s.mark_imported();
        assert!(!s.needs_import());
        s.reset_import();
        assert!(s.needs_import());
    }
}
