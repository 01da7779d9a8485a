//! Portfolio content aggregate.
//!
//! # Responsibility
//! - Define `AppData` and every record type it contains.
//! - Define partial-update shapes and their merge rules.
//!
//! # Invariants
//! - Record ids are unique within their collection and never rewritten by an
//!   update; merges never touch `id`.
//! - Serialized field names are camelCase so persisted copies stay readable by
//!   the site front-end.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque record identifier. Defaults use short literals, created records use
/// UUID v4 text.
pub type RecordId = String;

/// Generates a fresh record identifier.
pub fn new_record_id() -> RecordId {
    Uuid::new_v4().to_string()
}

/// Social profile links. Every link is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
}

/// Site owner profile. Exactly one instance lives in `AppData`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub title: String,
    pub bio: String,
    pub email: String,
    /// URL or embedded `data:` reference.
    pub avatar_url: String,
    pub socials: SocialLinks,
}

/// One hero carousel slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroSlide {
    pub id: RecordId,
    pub title: String,
    pub subtitle: String,
    pub image_url: String,
    pub cta_text: String,
    pub cta_link: String,
}

/// One portfolio project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: RecordId,
    pub title: String,
    pub category: String,
    pub description: String,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// One offered service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: RecordId,
    pub title: String,
    pub description: String,
    /// Icon identifier; see `model::icon::ServiceIcon` for the supported set.
    pub icon: String,
}

/// One achievement entry. `date` is free text ("2023", "Spring 2022").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: RecordId,
    pub title: String,
    pub organization: String,
    pub date: String,
    pub description: String,
}

/// The single persisted content aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppData {
    pub profile: Profile,
    pub hero_slides: Vec<HeroSlide>,
    pub projects: Vec<Project>,
    pub services: Vec<Service>,
    pub achievements: Vec<Achievement>,
}

impl AppData {
    /// Looks up one project by id.
    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    /// Counts used by the admin overview.
    pub fn stats(&self) -> DashboardStats {
        DashboardStats {
            projects: self.projects.len(),
            services: self.services.len(),
            achievements: self.achievements.len(),
            hero_slides: self.hero_slides.len(),
        }
    }
}

/// Collection sizes shown on the admin overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStats {
    pub projects: usize,
    pub services: usize,
    pub achievements: usize,
    pub hero_slides: usize,
}

/// Partial social-links update. `None` leaves the stored link untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinksUpdate {
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
}

impl SocialLinksUpdate {
    pub fn is_empty(&self) -> bool {
        self.github.is_none() && self.linkedin.is_none() && self.twitter.is_none()
    }
}

/// Partial profile update. `None` leaves the stored field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub socials: Option<SocialLinksUpdate>,
}

impl Profile {
    /// Returns a copy with the supplied fields overwritten.
    ///
    /// Socials merge link-by-link: a link absent from the update keeps its
    /// stored value.
    pub fn merged(&self, update: ProfileUpdate) -> Profile {
        let ProfileUpdate {
            name,
            title,
            bio,
            email,
            avatar_url,
            socials,
        } = update;
        let socials = match socials {
            Some(links) => SocialLinks {
                github: links.github.or_else(|| self.socials.github.clone()),
                linkedin: links.linkedin.or_else(|| self.socials.linkedin.clone()),
                twitter: links.twitter.or_else(|| self.socials.twitter.clone()),
            },
            None => self.socials.clone(),
        };

        Profile {
            name: name.unwrap_or_else(|| self.name.clone()),
            title: title.unwrap_or_else(|| self.title.clone()),
            bio: bio.unwrap_or_else(|| self.bio.clone()),
            email: email.unwrap_or_else(|| self.email.clone()),
            avatar_url: avatar_url.unwrap_or_else(|| self.avatar_url.clone()),
            socials,
        }
    }
}

/// Project input for creation; the id is generated by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub title: String,
    pub category: String,
    pub description: String,
    pub image_url: String,
    #[serde(default)]
    pub link: Option<String>,
}

impl NewProject {
    /// Attaches an identifier, producing a storable record.
    pub fn into_project(self, id: RecordId) -> Project {
        Project {
            id,
            title: self.title,
            category: self.category,
            description: self.description,
            image_url: self.image_url,
            link: self.link,
        }
    }
}

/// Partial project update. `None` leaves the stored field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

impl Project {
    /// Returns a copy with the supplied fields overwritten. `id` is kept.
    pub fn merged(&self, update: &ProjectUpdate) -> Project {
        Project {
            id: self.id.clone(),
            title: update.title.clone().unwrap_or_else(|| self.title.clone()),
            category: update
                .category
                .clone()
                .unwrap_or_else(|| self.category.clone()),
            description: update
                .description
                .clone()
                .unwrap_or_else(|| self.description.clone()),
            image_url: update
                .image_url
                .clone()
                .unwrap_or_else(|| self.image_url.clone()),
            link: update.link.clone().or_else(|| self.link.clone()),
        }
    }
}
