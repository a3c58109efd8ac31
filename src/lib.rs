// Client-side state machine of a food ordering screen: catalog browsing,
// cart accumulation with a flying-ball affordance, order submission with
// simulated per-item cooking, and a hold-to-talk voice gesture.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod events;
pub mod kitchen;
pub mod model;
pub mod projectile;
pub mod screen;
pub mod timers;
pub mod utils;
pub mod voice;

pub use catalog::Catalog;
pub use config::{load_settings, Settings, Timing};
pub use error::{ConfigError, OrderError};
pub use events::{Feedback, Haptic, Notice, NoticeIcon, ScreenEvent};
pub use screen::{FixedLayout, Layout, OrderScreen, ScreenSnapshot, ScreenView};
pub use voice::{VoiceOutcome, VoicePhase};
