//! Command handlers for the `folio` admin tool.
//!
//! Every handler runs against one `App`: the content store and the session
//! gate opened over the same database file.

use crate::cli::{
    Collection, Command, GenerateArgs, GenerateTarget, ImageArgs, ProfileArgs, ProjectCommand,
};
use anyhow::{bail, Context, Result};
use folio_core::model::icon::symbol_for;
use folio_core::service::image_intake::{
    display_reference, reference_from_file, reference_from_url,
};
use folio_core::{
    spawn_generation, AdminSession, AppData, ContentStore, GeminiConfig, GeminiGenerator,
    KvContentRepository, NewProject, NotificationKind, ProfileUpdate, ProjectUpdate,
    ServiceIcon, SocialLinksUpdate, SqliteKvStore, SystemClock,
};
use log::info;
use serde::de::DeserializeOwned;
use std::io::{BufRead, Write};
use std::path::Path;
use std::sync::{mpsc, Arc};

const DB_FILE_NAME: &str = "folio.sqlite3";

pub type Store = ContentStore<KvContentRepository<SqliteKvStore>, SystemClock>;

/// Open handles for one command invocation.
pub struct App {
    pub store: Store,
    pub session: AdminSession<SqliteKvStore>,
}

impl App {
    pub fn open(data_dir: &Path, quota_bytes: u64) -> Result<Self> {
        let db_path = data_dir.join(DB_FILE_NAME);
        let content = SqliteKvStore::open(&db_path, Some(quota_bytes))
            .with_context(|| format!("failed to open `{}`", db_path.display()))?;
        let auth = SqliteKvStore::open(&db_path, Some(quota_bytes))
            .with_context(|| format!("failed to open `{}`", db_path.display()))?;
        Ok(Self {
            store: ContentStore::with_storage(content, SystemClock),
            session: AdminSession::new(auth),
        })
    }

    fn require_admin(&self) -> Result<()> {
        if !self.session.is_authenticated() {
            bail!("admin commands are locked; run `folio login` first");
        }
        Ok(())
    }
}

/// Runs one command and writes its output to `out`.
pub fn run(app: &mut App, command: Command, out: &mut impl Write) -> Result<()> {
    match command {
        Command::Status => status(app, out)?,
        Command::Show { json } => {
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(app.store.data())?)?;
            } else {
                show(app.store.data(), out)?;
            }
        }
        Command::Login { password } => {
            let password = match password {
                Some(password) => password,
                None => prompt_line("Password: ")?,
            };
            if !app.session.login(&password)? {
                bail!("Incorrect password.");
            }
            writeln!(out, "Logged in.")?;
        }
        Command::Logout => {
            app.session.logout()?;
            writeln!(out, "Logged out.")?;
        }
        Command::Profile(args) => {
            app.require_admin()?;
            let update = profile_update(args)?;
            app.store.update_profile(update);
        }
        Command::Project(command) => project(app, command, out)?,
        Command::Replace { collection, file } => {
            app.require_admin()?;
            match collection {
                Collection::Slides => app.store.update_hero_slides(read_json(&file)?),
                Collection::Services => app.store.update_services(read_json(&file)?),
                Collection::Achievements => app.store.update_achievements(read_json(&file)?),
            }
        }
        Command::Export { output } => {
            let text = serde_json::to_string_pretty(app.store.data())?;
            match output {
                Some(path) => std::fs::write(&path, text)
                    .with_context(|| format!("failed to write `{}`", path.display()))?,
                None => writeln!(out, "{text}")?,
            }
        }
        Command::Reset { yes } => {
            app.require_admin()?;
            let mut confirm = |prompt: &str| {
                yes || prompt_line(&format!("{prompt} [y/N] "))
                    .map(|answer| matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
                    .unwrap_or(false)
            };
            if !app.store.reset_to_defaults(&mut confirm) {
                writeln!(out, "Reset cancelled.")?;
            }
        }
        Command::Icons => {
            for icon in ServiceIcon::ALL {
                writeln!(out, "{:<4} {icon}", icon.symbol())?;
            }
        }
        Command::Generate(args) => {
            app.require_admin()?;
            generate(app, args, out)?;
        }
    }

    print_notifications(&app.store, out)?;
    Ok(())
}

fn status(app: &App, out: &mut impl Write) -> Result<()> {
    let data = app.store.data();
    let stats = data.stats();
    writeln!(out, "{} - {}", data.profile.name, data.profile.title)?;
    writeln!(out, "projects:     {}", stats.projects)?;
    writeln!(out, "services:     {}", stats.services)?;
    writeln!(out, "achievements: {}", stats.achievements)?;
    writeln!(out, "hero slides:  {}", stats.hero_slides)?;
    let session = if app.session.is_authenticated() {
        "unlocked"
    } else {
        "locked"
    };
    writeln!(out, "admin:        {session}")?;
    Ok(())
}

fn show(data: &AppData, out: &mut impl Write) -> Result<()> {
    let profile = &data.profile;
    writeln!(out, "{}", profile.name)?;
    writeln!(out, "{}", profile.title)?;
    writeln!(out, "{}", profile.email)?;
    if let Some(avatar) = display_reference(&profile.avatar_url) {
        writeln!(out, "  avatar: {avatar}")?;
    }
    for (label, link) in [
        ("github", &profile.socials.github),
        ("linkedin", &profile.socials.linkedin),
        ("twitter", &profile.socials.twitter),
    ] {
        if let Some(link) = link {
            writeln!(out, "  {label}: {link}")?;
        }
    }
    writeln!(out, "\n{}", profile.bio)?;

    writeln!(out, "\n== Highlights")?;
    for slide in &data.hero_slides {
        writeln!(
            out,
            "- {}: {} [{} -> {}]",
            slide.title, slide.subtitle, slide.cta_text, slide.cta_link
        )?;
        if let Some(image) = display_reference(&slide.image_url) {
            writeln!(out, "  {image}")?;
        }
    }

    writeln!(out, "\n== Projects")?;
    for project in &data.projects {
        writeln!(out, "- {} ({})", project.title, project.category)?;
        writeln!(out, "  {}", project.description)?;
        if let Some(image) = display_reference(&project.image_url) {
            writeln!(out, "  image: {image}")?;
        }
        if let Some(link) = &project.link {
            writeln!(out, "  {link}")?;
        }
    }

    writeln!(out, "\n== Services")?;
    for service in &data.services {
        writeln!(
            out,
            "{:<4} {}: {}",
            symbol_for(&service.icon),
            service.title,
            service.description
        )?;
    }

    writeln!(out, "\n== Achievements")?;
    for achievement in &data.achievements {
        writeln!(
            out,
            "- {} ({}, {})",
            achievement.title, achievement.organization, achievement.date
        )?;
        writeln!(out, "  {}", achievement.description)?;
    }
    Ok(())
}

fn project(app: &mut App, command: ProjectCommand, out: &mut impl Write) -> Result<()> {
    if !matches!(command, ProjectCommand::List) {
        app.require_admin()?;
    }

    match command {
        ProjectCommand::List => {
            for project in &app.store.data().projects {
                let image = display_reference(&project.image_url).unwrap_or("-");
                writeln!(
                    out,
                    "{}\t{}\t{}\t{image}",
                    project.id, project.title, project.category
                )?;
            }
        }
        ProjectCommand::Add {
            title,
            category,
            description,
            image,
            link,
        } => {
            let image_url = resolve_image(image)?.unwrap_or_default();
            let id = app.store.add_project(NewProject {
                title,
                category,
                description,
                image_url,
                link,
            });
            writeln!(out, "{id}")?;
        }
        ProjectCommand::Update {
            id,
            title,
            category,
            description,
            image,
            link,
        } => {
            let image_url = resolve_image(image)?;
            app.store.update_project(
                &id,
                ProjectUpdate {
                    title,
                    category,
                    description,
                    image_url,
                    link,
                },
            );
        }
        ProjectCommand::Delete { id } => app.store.delete_project(&id),
    }
    Ok(())
}

fn profile_update(args: ProfileArgs) -> Result<ProfileUpdate> {
    let avatar_url = resolve_image(ImageArgs {
        image_url: args.avatar_url,
        image_file: args.avatar_file,
    })?;
    let socials = SocialLinksUpdate {
        github: args.github,
        linkedin: args.linkedin,
        twitter: args.twitter,
    };
    Ok(ProfileUpdate {
        name: args.name,
        title: args.title,
        bio: args.bio,
        email: args.email,
        avatar_url,
        socials: (!socials.is_empty()).then_some(socials),
    })
}

/// Converts image flags into a stored reference. Oversized files abort the
/// command before any mutation.
fn resolve_image(image: ImageArgs) -> Result<Option<String>> {
    match (image.image_url, image.image_file) {
        (Some(url), _) => Ok(Some(reference_from_url(&url))),
        (None, Some(path)) => Ok(Some(reference_from_file(path)?)),
        (None, None) => Ok(None),
    }
}

fn generate(app: &mut App, args: GenerateArgs, out: &mut impl Write) -> Result<()> {
    let config = GeminiConfig {
        api_key: args.api_key,
        model: args.model,
        ..GeminiConfig::default()
    };
    let generator = Arc::new(GeminiGenerator::new(config)?);

    let (tx, rx) = mpsc::channel();
    let _detached = spawn_generation(generator, args.task, args.context, move |text| {
        // The receiver only disappears when the command is already exiting.
        let _ = tx.send(text);
    });
    let text = rx.recv().context("text generation stopped without a result")?;
    writeln!(out, "{text}")?;

    if let Some(field) = args.apply_to {
        info!("event=assist_apply module=cli status=ok field={field:?}");
        let update = match field {
            GenerateTarget::Bio => ProfileUpdate {
                bio: Some(text),
                ..ProfileUpdate::default()
            },
            GenerateTarget::Title => ProfileUpdate {
                title: Some(text),
                ..ProfileUpdate::default()
            },
        };
        app.store.update_profile(update);
    }
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read `{}`", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid JSON in `{}`", path.display()))
}

fn print_notifications(store: &Store, out: &mut impl Write) -> Result<()> {
    for notification in store.notifications() {
        let tag = match notification.kind {
            NotificationKind::Success => "ok",
            NotificationKind::Error => "error",
            NotificationKind::Info => "info",
        };
        writeln!(out, "[{tag}] {}", notification.message)?;
    }
    Ok(())
}

fn prompt_line(prompt: &str) -> Result<String> {
    let mut stderr = std::io::stderr();
    write!(stderr, "{prompt}")?;
    stderr.flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

#[cfg(test)]
mod tests {
    use super::{run, App};
    use crate::cli::{Cli, Command};
    use clap::Parser;
    use folio_core::assist::gemini::MISSING_API_KEY_MESSAGE;
    use folio_core::service::image_intake::{
        EMBEDDED_IMAGE_LABEL, FILE_TOO_LARGE_MESSAGE, MAX_IMAGE_FILE_BYTES,
    };
    use folio_core::storage::DEFAULT_QUOTA_BYTES;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Command {
        Cli::try_parse_from(std::iter::once("folio").chain(args.iter().copied()))
            .expect("valid arguments")
            .command
    }

    fn exec(app: &mut App, args: &[&str]) -> anyhow::Result<String> {
        let mut out = Vec::new();
        run(app, parse(args), &mut out)?;
        Ok(String::from_utf8(out).expect("utf-8 output"))
    }

    fn open_app() -> (TempDir, App) {
        let dir = tempfile::tempdir().expect("temp dir");
        let app = App::open(dir.path(), DEFAULT_QUOTA_BYTES).expect("open app");
        (dir, app)
    }

    fn logged_in_app() -> (TempDir, App) {
        let (dir, mut app) = open_app();
        exec(&mut app, &["login", "--password", "admin123"]).expect("login");
        (dir, app)
    }

    #[test]
    fn admin_commands_are_locked_before_login() {
        let (_dir, mut app) = open_app();
        let err = exec(&mut app, &["project", "delete", "p1"]).expect_err("locked");
        assert!(err.to_string().contains("locked"));
        assert_eq!(app.store.data().projects.len(), 3);
    }

    #[test]
    fn wrong_password_is_reported() {
        let (_dir, mut app) = open_app();
        let err = exec(&mut app, &["login", "--password", "nope"]).expect_err("rejected");
        assert_eq!(err.to_string(), "Incorrect password.");
        assert!(!app.session.is_authenticated());
    }

    #[test]
    fn add_project_prints_id_and_outcome() {
        let (_dir, mut app) = logged_in_app();
        let output = exec(
            &mut app,
            &[
                "project",
                "add",
                "--title",
                "X",
                "--category",
                "Y",
                "--description",
                "Z",
                "--image-url",
                "u",
            ],
        )
        .expect("add");

        let first = &app.store.data().projects[0];
        assert!(output.starts_with(&first.id));
        assert!(output.contains("[ok] Project added"));
        assert_eq!(first.image_url, "u");
        assert_eq!(app.store.data().projects.len(), 4);
    }

    #[test]
    fn content_survives_reopen_of_data_dir() {
        let (dir, mut app) = logged_in_app();
        exec(&mut app, &["profile", "--name", "Sam Lee", "--github", "https://github.com/sam"])
            .expect("profile");
        drop(app);

        let reopened = App::open(dir.path(), DEFAULT_QUOTA_BYTES).expect("reopen");
        let profile = &reopened.store.data().profile;
        assert_eq!(profile.name, "Sam Lee");
        assert_eq!(profile.socials.github.as_deref(), Some("https://github.com/sam"));
        assert_eq!(profile.socials.twitter.as_deref(), Some("https://twitter.com"));
        assert!(reopened.session.is_authenticated());
    }

    #[test]
    fn oversized_image_file_aborts_without_mutation() {
        let (dir, mut app) = logged_in_app();
        let path = dir.path().join("big.png");
        std::fs::write(&path, vec![1u8; MAX_IMAGE_FILE_BYTES as usize + 1]).expect("write");

        let err = exec(
            &mut app,
            &["project", "update", "p1", "--image-file", path.to_str().expect("utf-8")],
        )
        .expect_err("too large");

        assert_eq!(err.to_string(), FILE_TOO_LARGE_MESSAGE);
        assert_eq!(
            app.store.data().projects[0].image_url,
            "https://picsum.photos/id/119/800/600"
        );
    }

    #[test]
    fn replace_services_from_json_file() {
        let (dir, mut app) = logged_in_app();
        let path = dir.path().join("services.json");
        std::fs::write(
            &path,
            r#"[{"id":"s7","title":"Mentoring","description":"1:1 sessions","icon":"Rocket"}]"#,
        )
        .expect("write");

        let output = exec(
            &mut app,
            &["replace", "services", path.to_str().expect("utf-8")],
        )
        .expect("replace");
        assert!(output.contains("[ok] Services updated"));

        let shown = exec(&mut app, &["show"]).expect("show");
        assert!(shown.contains("[*]  Mentoring: 1:1 sessions"));
    }

    #[test]
    fn embedded_images_are_listed_as_placeholders() {
        let (dir, mut app) = logged_in_app();
        let path = dir.path().join("shot.png");
        std::fs::write(&path, b"tiny png").expect("write");

        exec(
            &mut app,
            &["project", "update", "p2", "--image-file", path.to_str().expect("utf-8")],
        )
        .expect("update");
        assert!(app.store.data().projects[1].image_url.starts_with("data:image/png;base64,"));

        let listed = exec(&mut app, &["project", "list"]).expect("list");
        let shown = exec(&mut app, &["show"]).expect("show");
        for output in [&listed, &shown] {
            assert!(output.contains(EMBEDDED_IMAGE_LABEL));
            assert!(!output.contains("data:"));
        }
        assert!(listed.contains("https://picsum.photos/id/119/800/600"));
    }

    #[test]
    fn reset_with_yes_restores_defaults() {
        let (_dir, mut app) = logged_in_app();
        exec(&mut app, &["project", "delete", "p1"]).expect("delete");
        let output = exec(&mut app, &["reset", "--yes"]).expect("reset");
        assert!(output.contains("[info] Reset to defaults"));
        assert_eq!(app.store.data().projects.len(), 3);
    }

    #[test]
    fn generate_without_key_applies_fallback_text() {
        let (_dir, mut app) = logged_in_app();
        let output = exec(
            &mut app,
            &["generate", "--api-key", " ", "--context", "bio", "--apply-to", "bio"],
        )
        .expect("generate");
        assert!(output.starts_with(MISSING_API_KEY_MESSAGE));
        assert_eq!(app.store.data().profile.bio, MISSING_API_KEY_MESSAGE);
    }

    #[test]
    fn status_reports_counts_and_lock_state() {
        let (_dir, mut app) = open_app();
        let output = exec(&mut app, &["status"]).expect("status");
        assert!(output.contains("projects:     3"));
        assert!(output.contains("admin:        locked"));
    }
}
