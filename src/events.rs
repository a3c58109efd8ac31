use serde::Serialize;
use crate::model::{ItemId, OrderId, Projectile, ProjectileId, Tab};


#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Haptic {
    Light,
    Medium,
    Heavy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeIcon {
    None,
    Success,
}

// Transient toast shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub text: String,
    pub icon: NoticeIcon,
}

impl Notice {
    pub fn plain(text: impl Into<String>) -> Self {
        Self { text: text.into(), icon: NoticeIcon::None }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self { text: text.into(), icon: NoticeIcon::Success }
    }
}

// Request for the notification or haptic collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Feedback {
    Notify(Notice),
    Vibrate(Haptic),
}

// Everything the screen reports to its renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ScreenEvent {
    Notify(Notice),
    Vibrate(Haptic),
    TabChanged(Tab),
    CartChanged { total: u32 },
    CartBounce(bool),
    ProjectileLaunched(Projectile),
    ProjectileMoved(Projectile),
    ProjectileLanded { id: ProjectileId, item_id: ItemId },
    OrderPlaced(OrderId),
    LineDone { order_id: OrderId, line: usize },
    OrderDone(OrderId),
    VoiceChanged { recording: bool, cancel_pending: bool },
    Detached,
}

impl From<Feedback> for ScreenEvent {
    fn from(value: Feedback) -> Self {
        match value {
            Feedback::Notify(notice) => ScreenEvent::Notify(notice),
            Feedback::Vibrate(haptic) => ScreenEvent::Vibrate(haptic),
        }
    }
}
