//! Transient Notifications
//!
//! Toast queue shown in the corner of the screen.

/// How long a toast stays up before it is dismissed automatically
pub const NOTICE_TIMEOUT_MS: u32 = 4_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

impl NoticeLevel {
    pub fn css_class(self) -> &'static str {
        match self {
            NoticeLevel::Success => "notice notice-success",
            NoticeLevel::Error => "notice notice-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: u32,
    pub level: NoticeLevel,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Notices {
    next_id: u32,
    items: Vec<Notice>,
}

impl Notices {
    fn push(&mut self, level: NoticeLevel, message: impl Into<String>) -> u32 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Notice { id, level, message: message.into() });
        id
    }

    pub fn success(&mut self, message: impl Into<String>) -> u32 {
        self.push(NoticeLevel::Success, message)
    }

    pub fn error(&mut self, message: impl Into<String>) -> u32 {
        self.push(NoticeLevel::Error, message)
    }

    /// Unknown IDs are ignored
    pub fn dismiss(&mut self, id: u32) {
        self.items.retain(|notice| notice.id != id);
    }

    pub fn items(&self) -> &[Notice] {
        &self.items
    }

    #[cfg(test)]
    pub fn latest(&self) -> Option<&Notice> {
        self.items.last()
    }
}
