//! Content Store: sole owner and mutator of the content aggregate.
//!
//! # Responsibility
//! - Load the aggregate once at open, falling back to the default dataset.
//! - Apply every mutation as a pure transform of the previous aggregate.
//! - Persist the full aggregate after every transition.
//! - Report each outcome through the notification queue.
//!
//! # Invariants
//! - Opening never fails: unreadable or absent content means defaults.
//! - A failed write never rolls back the in-memory transition; it raises the
//!   storage-limit error notification instead.
//! - Updates and deletes by an unknown id are silent no-ops that still report
//!   their usual notification.
//! - Record ids are assigned here and never rewritten by an update.

use crate::clock::{Clock, SystemClock};
use crate::model::content::{
    new_record_id, Achievement, AppData, HeroSlide, NewProject, ProfileUpdate, ProjectUpdate,
    RecordId, Service,
};
use crate::model::defaults::default_app_data;
use crate::model::notification::{Notification, NotificationId, NotificationKind};
use crate::repo::content_repo::{ContentRepository, KvContentRepository};
use crate::service::notification_queue::NotificationQueue;
use crate::storage::KvStore;
use log::{debug, error, info, warn};

/// Error message raised when the aggregate could not be written.
pub const STORAGE_LIMIT_MESSAGE: &str = "Storage limit reached! Changes may not be saved.";
/// Question asked before discarding all custom content.
pub const RESET_CONFIRM_PROMPT: &str = "Are you sure? All custom changes will be lost.";

/// Interactive yes/no confirmation.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Process-wide content store. Construct once and pass it to consumers.
pub struct ContentStore<R: ContentRepository, C: Clock = SystemClock> {
    repo: R,
    clock: C,
    data: AppData,
    notifications: NotificationQueue,
}

impl<S: KvStore, C: Clock> ContentStore<KvContentRepository<S>, C> {
    /// Opens a store persisting through a key-value storage backend.
    pub fn with_storage(storage: S, clock: C) -> Self {
        Self::open(KvContentRepository::new(storage), clock)
    }
}

impl<R: ContentRepository, C: Clock> ContentStore<R, C> {
    /// Loads the persisted aggregate (or defaults) and writes it back once.
    pub fn open(repo: R, clock: C) -> Self {
        let data = match repo.load() {
            Ok(Some(data)) => {
                info!("event=content_load module=store status=ok source=storage");
                data
            }
            Ok(None) => {
                info!("event=content_load module=store status=ok source=defaults reason=absent");
                default_app_data()
            }
            Err(err) => {
                warn!(
                    "event=content_load module=store status=error source=defaults error_code=content_unreadable error={err}"
                );
                default_app_data()
            }
        };

        let mut store = Self {
            repo,
            clock,
            data,
            notifications: NotificationQueue::new(),
        };
        store.persist();
        store
    }

    /// Current aggregate.
    pub fn data(&self) -> &AppData {
        &self.data
    }

    /// Underlying repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Live notifications at the current clock time, oldest first.
    pub fn notifications(&self) -> Vec<&Notification> {
        self.notifications.active_at(self.clock.now_ms())
    }

    /// Drops notifications whose display window has elapsed.
    pub fn prune_notifications(&mut self) -> usize {
        self.notifications.prune_expired(self.clock.now_ms())
    }

    /// Enqueues a notification at the current clock time.
    pub fn add_notification(
        &mut self,
        message: impl Into<String>,
        kind: NotificationKind,
    ) -> NotificationId {
        let now_ms = self.clock.now_ms();
        self.notifications.enqueue(message, kind, now_ms)
    }

    /// Dismisses one notification early. Unknown ids are ignored.
    pub fn remove_notification(&mut self, id: NotificationId) {
        self.notifications.dismiss(id);
    }

    /// Merges supplied profile fields; socials merge link-by-link.
    pub fn update_profile(&mut self, update: ProfileUpdate) {
        self.transition(
            "update_profile",
            |prev| AppData {
                profile: prev.profile.merged(update),
                ..prev.clone()
            },
            "Profile updated successfully",
            NotificationKind::Success,
        );
    }

    /// Replaces the hero slide sequence wholesale.
    pub fn update_hero_slides(&mut self, slides: Vec<HeroSlide>) {
        self.transition(
            "update_hero_slides",
            |prev| AppData {
                hero_slides: slides,
                ..prev.clone()
            },
            "Slideshow updated",
            NotificationKind::Success,
        );
    }

    /// Creates a project with a fresh id and places it first.
    pub fn add_project(&mut self, project: NewProject) -> RecordId {
        let mut id = new_record_id();
        while self.data.project(&id).is_some() {
            id = new_record_id();
        }
        let record = project.into_project(id.clone());

        self.transition(
            "add_project",
            |prev| {
                let mut projects = Vec::with_capacity(prev.projects.len() + 1);
                projects.push(record);
                projects.extend(prev.projects.iter().cloned());
                AppData {
                    projects,
                    ..prev.clone()
                }
            },
            "Project added",
            NotificationKind::Success,
        );
        id
    }

    /// Merges supplied fields into the project with `id`, if any.
    pub fn update_project(&mut self, id: &str, update: ProjectUpdate) {
        if self.data.project(id).is_none() {
            debug!("event=content_mutation module=store op=update_project status=noop reason=unknown_id");
        }
        self.transition(
            "update_project",
            |prev| AppData {
                projects: prev
                    .projects
                    .iter()
                    .map(|project| {
                        if project.id == id {
                            project.merged(&update)
                        } else {
                            project.clone()
                        }
                    })
                    .collect(),
                ..prev.clone()
            },
            "Project updated",
            NotificationKind::Success,
        );
    }

    /// Removes the project with `id`, if any.
    pub fn delete_project(&mut self, id: &str) {
        self.transition(
            "delete_project",
            |prev| AppData {
                projects: prev
                    .projects
                    .iter()
                    .filter(|project| project.id != id)
                    .cloned()
                    .collect(),
                ..prev.clone()
            },
            "Project deleted",
            NotificationKind::Info,
        );
    }

    /// Replaces the service sequence wholesale.
    pub fn update_services(&mut self, services: Vec<Service>) {
        self.transition(
            "update_services",
            |prev| AppData {
                services,
                ..prev.clone()
            },
            "Services updated",
            NotificationKind::Success,
        );
    }

    /// Replaces the achievement sequence wholesale.
    pub fn update_achievements(&mut self, achievements: Vec<Achievement>) {
        self.transition(
            "update_achievements",
            |prev| AppData {
                achievements,
                ..prev.clone()
            },
            "Achievements updated",
            NotificationKind::Success,
        );
    }

    /// Replaces everything with the default dataset after confirmation.
    ///
    /// Returns whether the reset happened. Declining changes nothing and
    /// raises nothing.
    pub fn reset_to_defaults(&mut self, confirm: &mut impl Confirm) -> bool {
        if !confirm.confirm(RESET_CONFIRM_PROMPT) {
            info!("event=content_mutation module=store op=reset_to_defaults status=declined");
            return false;
        }
        self.transition(
            "reset_to_defaults",
            |_| default_app_data(),
            "Reset to defaults",
            NotificationKind::Info,
        );
        true
    }

    fn transition(
        &mut self,
        op: &str,
        transform: impl FnOnce(&AppData) -> AppData,
        message: &str,
        kind: NotificationKind,
    ) {
        self.data = transform(&self.data);
        info!("event=content_mutation module=store op={op} status=ok");
        self.add_notification(message, kind);
        self.persist();
    }

    fn persist(&mut self) -> bool {
        match self.repo.save(&self.data) {
            Ok(()) => {
                debug!("event=content_persist module=store status=ok");
                true
            }
            Err(err) => {
                let error_code = if err.is_quota_exceeded() {
                    "quota_exceeded"
                } else {
                    "write_failed"
                };
                error!(
                    "event=content_persist module=store status=error error_code={error_code} error={err}"
                );
                self.add_notification(STORAGE_LIMIT_MESSAGE, NotificationKind::Error);
                false
            }
        }
    }
}
