//! Content-management core for the folio portfolio site.
//!
//! The crate owns the editable site content (`AppData`), persists it to a
//! local key-value store after every change, and reports each outcome through
//! a short-lived notification queue.

pub mod assist;
pub mod clock;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod storage;

pub use assist::{spawn_generation, GeminiConfig, GeminiGenerator, TextGenerator};
pub use clock::{Clock, ManualClock, SystemClock};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::content::{
    Achievement, AppData, DashboardStats, HeroSlide, NewProject, Profile, ProfileUpdate, Project,
    ProjectUpdate, RecordId, Service, SocialLinks, SocialLinksUpdate,
};
pub use model::defaults::default_app_data;
pub use model::icon::ServiceIcon;
pub use model::notification::{Notification, NotificationId, NotificationKind};
pub use repo::content_repo::{ContentRepository, KvContentRepository, RepoError, RepoResult};
pub use service::content_store::{Confirm, ContentStore};
pub use service::image_intake::ImageIntakeError;
pub use service::notification_queue::{NotificationQueue, NOTIFICATION_TTL_MS};
pub use service::session::AdminSession;
pub use storage::{KvStore, MemoryKvStore, SqliteKvStore, StorageError, StorageResult};
