//! Fixed default dataset.
//!
//! Used on first run, whenever the persisted aggregate is missing or
//! unreadable, and by the confirmed reset operation.

use super::content::{Achievement, AppData, HeroSlide, Profile, Project, Service, SocialLinks};

/// Builds the default content aggregate.
pub fn default_app_data() -> AppData {
    AppData {
        profile: Profile {
            name: "Alex Morgan".to_string(),
            title: "Senior Full Stack Developer".to_string(),
            bio: "I craft robust, scalable, and aesthetically pleasing digital experiences. \
                  With over 8 years of industry experience, I specialize in React, Node.js, \
                  and cloud architectures. I believe in clean code and user-centric design."
                .to_string(),
            email: "hello@alexmorgan.dev".to_string(),
            avatar_url: "https://picsum.photos/id/64/400/400".to_string(),
            socials: SocialLinks {
                github: Some("https://github.com".to_string()),
                linkedin: Some("https://linkedin.com".to_string()),
                twitter: Some("https://twitter.com".to_string()),
            },
        },
        hero_slides: vec![
            slide(
                "1",
                "Building Digital Excellence",
                "Transforming ideas into powerful web applications.",
                "https://picsum.photos/id/180/1920/1080",
                "View My Work",
                "#projects",
            ),
            slide(
                "2",
                "Modern UI/UX Design",
                "Creating intuitive interfaces that users love.",
                "https://picsum.photos/id/1/1920/1080",
                "Contact Me",
                "#contact",
            ),
        ],
        projects: vec![
            project(
                "p1",
                "E-Commerce Dashboard",
                "Web App",
                "A comprehensive analytics dashboard for online retailers featuring real-time data visualization.",
                "https://picsum.photos/id/119/800/600",
            ),
            project(
                "p2",
                "FinTech Mobile App",
                "Mobile Design",
                "UI/UX design for a next-generation banking application focusing on security and ease of use.",
                "https://picsum.photos/id/20/800/600",
            ),
            project(
                "p3",
                "Travel Blog Platform",
                "Content Management",
                "A headless CMS integration for a high-traffic travel blog with automated SEO optimization.",
                "https://picsum.photos/id/48/800/600",
            ),
        ],
        services: vec![
            service(
                "s1",
                "Web Development",
                "Full-cycle web development using the latest React stack.",
                "Code",
            ),
            service(
                "s2",
                "UI/UX Design",
                "Wireframing, prototyping, and high-fidelity interface design.",
                "Palette",
            ),
            service(
                "s3",
                "Technical Consulting",
                "Architecture review, performance optimization, and tech strategy.",
                "Terminal",
            ),
        ],
        achievements: vec![
            Achievement {
                id: "a1".to_string(),
                title: "Best Developer Award".to_string(),
                organization: "TechConf 2023".to_string(),
                date: "2023".to_string(),
                description: "Recognized for outstanding contributions to open source community."
                    .to_string(),
            },
            Achievement {
                id: "a2".to_string(),
                title: "Certified Cloud Architect".to_string(),
                organization: "AWS".to_string(),
                date: "2022".to_string(),
                description:
                    "Professional certification for designing distributed systems on AWS."
                        .to_string(),
            },
        ],
    }
}

fn slide(
    id: &str,
    title: &str,
    subtitle: &str,
    image_url: &str,
    cta_text: &str,
    cta_link: &str,
) -> HeroSlide {
    HeroSlide {
        id: id.to_string(),
        title: title.to_string(),
        subtitle: subtitle.to_string(),
        image_url: image_url.to_string(),
        cta_text: cta_text.to_string(),
        cta_link: cta_link.to_string(),
    }
}

fn project(id: &str, title: &str, category: &str, description: &str, image_url: &str) -> Project {
    Project {
        id: id.to_string(),
        title: title.to_string(),
        category: category.to_string(),
        description: description.to_string(),
        image_url: image_url.to_string(),
        link: Some("#".to_string()),
    }
}

fn service(id: &str, title: &str, description: &str, icon: &str) -> Service {
    Service {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::default_app_data;
    use crate::model::icon::ServiceIcon;
    use std::collections::HashSet;

    #[test]
    fn default_ids_are_unique_per_collection() {
        let data = default_app_data();
        let project_ids: HashSet<_> = data.projects.iter().map(|p| p.id.as_str()).collect();
        let slide_ids: HashSet<_> = data.hero_slides.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(project_ids.len(), data.projects.len());
        assert_eq!(slide_ids.len(), data.hero_slides.len());
    }

    #[test]
    fn default_services_use_supported_icons() {
        for service in default_app_data().services {
            assert!(
                ServiceIcon::from_name(&service.icon).is_some(),
                "unsupported icon {}",
                service.icon
            );
        }
    }
}
