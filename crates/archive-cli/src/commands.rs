//! Subcommand handlers.

use std::io::Write;

use anyhow::{Context, Result};
use tracing::{debug, info};

use archive_client::{ArchiveClient, SessionStore};
use archive_models::{extract_auth_code, extract_facets, CatalogView, Session};

use crate::cli::{Command, FilterArgs, UploadArgs};
use crate::config::CliConfig;
use crate::render;

/// Execute a parsed command, writing user-facing output to `out`.
pub async fn run<W: Write>(command: Command, config: &CliConfig, out: &mut W) -> Result<()> {
    let client = ArchiveClient::new(config.client.clone()).context("Failed to build HTTP client")?;
    let sessions = config.session_store();

    match command {
        Command::List { filter, json } => list(&client, &filter, json, out).await,
        Command::Facets { json } => facets(&client, json, out).await,
        Command::Upload(args) => upload(&client, &args, out).await,
        Command::Login {
            callback_url,
            code,
            force,
        } => login(&client, &sessions, callback_url, code, force, out).await,
        Command::Logout => logout(&sessions, out).await,
        Command::Whoami => whoami(&sessions, out).await,
        Command::Status => status(&client, out).await,
    }
}

async fn list<W: Write>(client: &ArchiveClient, filter: &FilterArgs, json: bool, out: &mut W) -> Result<()> {
    let videos = client.list_videos().await.context("Failed to fetch videos")?;
    let view = CatalogView::with_criteria(videos, filter.to_criteria());
    debug!(
        total = view.all().len(),
        visible = view.visible_count(),
        "Filtered catalog"
    );

    if json {
        let visible: Vec<_> = view.visible().collect();
        serde_json::to_writer_pretty(&mut *out, &visible)?;
        writeln!(out)?;
    } else {
        render::catalog(out, &view, client.base_url())?;
    }
    Ok(())
}

async fn facets<W: Write>(client: &ArchiveClient, json: bool, out: &mut W) -> Result<()> {
    let videos = client.list_videos().await.context("Failed to fetch videos")?;
    let facets = extract_facets(&videos);

    if json {
        serde_json::to_writer_pretty(&mut *out, &facets)?;
        writeln!(out)?;
    } else {
        render::facets(out, &facets)?;
    }
    Ok(())
}

async fn upload<W: Write>(client: &ArchiveClient, args: &UploadArgs, out: &mut W) -> Result<()> {
    let record = client
        .upload_video(&args.file, &args.to_form())
        .await
        .with_context(|| format!("Failed to upload {}", args.file.display()))?;

    writeln!(out, "Uploaded {}", record.id)?;
    render::video(out, &record, client.base_url())?;
    Ok(())
}

async fn login<W: Write>(
    client: &ArchiveClient,
    sessions: &SessionStore,
    callback_url: Option<String>,
    code: Option<String>,
    force: bool,
    out: &mut W,
) -> Result<()> {
    if !force {
        if let Some(session) = sessions.load().await? {
            write!(out, "Already signed in as ")?;
            render::session(out, &session)?;
            return Ok(());
        }
    }

    let code = match (callback_url, code) {
        (Some(url), _) => Some(extract_auth_code(&url)?),
        (None, Some(code)) => Some(code),
        (None, None) => None,
    };

    let Some(code) = code else {
        let url = client
            .google_auth_url()
            .await
            .context("Failed to get Google sign-in URL")?;
        writeln!(out, "Open this URL to sign in with Google:")?;
        writeln!(out, "  {}", url)?;
        writeln!(
            out,
            "Then run: archive login --callback-url '<the URL you were redirected to>'"
        )?;
        return Ok(());
    };

    let user = client
        .exchange_google_code(&code)
        .await
        .context("Google sign-in failed")?;
    let session = Session::new(user);
    sessions.save(&session).await?;
    info!(email = %session.user.email, "Signed in");

    write!(out, "Signed in as ")?;
    render::session(out, &session)?;
    Ok(())
}

async fn logout<W: Write>(sessions: &SessionStore, out: &mut W) -> Result<()> {
    if sessions.clear().await? {
        writeln!(out, "Signed out")?;
    } else {
        writeln!(out, "Not signed in")?;
    }
    Ok(())
}

async fn whoami<W: Write>(sessions: &SessionStore, out: &mut W) -> Result<()> {
    match sessions.load().await? {
        Some(session) => render::session(out, &session)?,
        None => writeln!(out, "Not signed in")?,
    }
    Ok(())
}

async fn status<W: Write>(client: &ArchiveClient, out: &mut W) -> Result<()> {
    if client.check_connectivity().await? {
        writeln!(out, "Archive API at {} is reachable", client.base_url())?;
    } else {
        anyhow::bail!("Archive API at {} is not reachable", client.base_url());
    }
    Ok(())
}
