pub mod client;
pub mod core;
pub mod infrastructure;
pub mod schedule;
pub mod workflows;

pub use crate::client::DimoraClient;
pub use crate::core::config::{ClientOptions, Delays, BASE_URL};
pub use crate::core::error::{Error, Result};
pub use crate::core::models::{ChannelType, ScheduleFilter};
pub use crate::core::session::SessionData;
pub use crate::schedule::ScheduleItem;
pub use crate::workflows::login::{CaptchaChallenge, LoginChallenger};
