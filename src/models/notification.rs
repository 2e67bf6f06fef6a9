//! User-facing notifications

use serenity::builder::CreateEmbed;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Outcome of a screen action, rendered as one embed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn error(description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: "Ошибка".to_string(),
            description: description.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == NotificationKind::Success
    }

    pub fn to_embed(&self) -> CreateEmbed {
        let (icon, color): (&str, u32) = match self.kind {
            NotificationKind::Success => ("✅", 0x00ff00),
            NotificationKind::Error => ("❌", 0xff3333),
        };

        CreateEmbed::default()
            .title(format!("{} {}", icon, self.title))
            .description(&self.description)
            .color(color)
    }
}
