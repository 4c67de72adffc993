//! Shared utility functions used across command modules.

use std::io::Read;
use std::path::{Path, PathBuf};

use livyctl_core::config::ConfigManager;
use livyctl_core::{LivySession, LivySettings, ReqwestHttpClient, SessionSnapshot};
use serde_json::Value;

use crate::cli::{CodeSource, SessionTarget};
use crate::error::CliError;

/// Options shared by every command
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalOptions<'a> {
    /// Custom configuration directory
    pub config: Option<&'a Path>,
    /// Endpoint overriding the configuration file
    pub endpoint: Option<&'a str>,
    /// Language overriding the configuration file
    pub language: Option<&'a str>,
}

/// Creates a `ConfigManager` using the optional custom config directory
/// from CLI args.
pub fn create_config_manager(config_path: Option<&Path>) -> Result<ConfigManager, CliError> {
    match config_path {
        Some(path) => Ok(ConfigManager::with_config_dir(path.to_path_buf())),
        None => ConfigManager::new()
            .map_err(|e| CliError::Config(format!("Failed to initialize config: {e}"))),
    }
}

/// Loads settings and applies the command-line overrides
pub fn load_settings(opts: &GlobalOptions<'_>) -> Result<LivySettings, CliError> {
    let mut settings = create_config_manager(opts.config)?.load_settings()?;
    if let Some(endpoint) = opts.endpoint {
        settings.endpoint = Some(endpoint.to_string());
    }
    if let Some(language) = opts.language {
        settings.language = language.to_string();
    }
    settings.validate()?;
    Ok(settings)
}

/// Creates a controller for a new session
pub fn fresh_session(settings: &LivySettings) -> Result<LivySession, CliError> {
    let client = ReqwestHttpClient::from_settings(settings)?;
    Ok(LivySession::fresh(
        Box::new(client),
        &settings.language,
        settings.timings()?,
    )?)
}

/// Creates a controller for an existing session chosen by id or snapshot
///
/// A snapshot's endpoint is used unless one was given on the command line.
pub fn open_session(
    opts: &GlobalOptions<'_>,
    target: &SessionTarget,
) -> Result<LivySession, CliError> {
    let mut settings = load_settings(opts)?;

    if let Some(ref path) = target.session {
        let snapshot = read_snapshot(path)?;
        if opts.endpoint.is_none()
            && let Some(Value::String(endpoint)) = snapshot.transport.get("endpoint")
        {
            settings.endpoint = Some(endpoint.clone());
        }
        let client = ReqwestHttpClient::from_settings(&settings)?;
        return Ok(LivySession::from_snapshot(
            Box::new(client),
            &snapshot,
            settings.timings()?,
        )?);
    }

    let id = target
        .id
        .ok_or_else(|| CliError::Config("either --id or --session is required".to_string()))?;
    let client = ReqwestHttpClient::from_settings(&settings)?;
    Ok(LivySession::adopt(
        Box::new(client),
        &settings.language,
        id,
        false,
        settings.timings()?,
    )?)
}

/// Returns the code to run from the argument, the file, or stdin
pub fn read_code(source: &CodeSource) -> Result<String, CliError> {
    if let Some(ref code) = source.code {
        return Ok(code.clone());
    }
    if let Some(ref file) = source.file {
        let path = expand_path(file);
        return std::fs::read_to_string(&path).map_err(|e| {
            CliError::Config(format!("Failed to read code from {}: {e}", path.display()))
        });
    }
    let mut code = String::new();
    std::io::stdin().read_to_string(&mut code)?;
    Ok(code)
}

/// Serializes a session snapshot as pretty JSON
pub fn snapshot_json(session: &LivySession) -> Result<String, CliError> {
    serde_json::to_string_pretty(&Value::Object(session.serialize()))
        .map_err(|e| CliError::Snapshot(e.to_string()))
}

/// Writes a session snapshot to `path`
pub fn write_snapshot(path: &Path, session: &LivySession) -> Result<(), CliError> {
    let path = expand_path(path);
    let json = snapshot_json(session)?;
    std::fs::write(&path, json)
        .map_err(|e| CliError::Snapshot(format!("{}: {e}", path.display())))
}

/// Reads a session snapshot from `path`
pub fn read_snapshot(path: &Path) -> Result<SessionSnapshot, CliError> {
    let path = expand_path(path);
    let text = std::fs::read_to_string(&path)
        .map_err(|e| CliError::Snapshot(format!("{}: {e}", path.display())))?;
    SessionSnapshot::from_json(&text).map_err(|e| CliError::Snapshot(e.to_string()))
}

/// Starts a fresh session
///
/// When the server assigned an id but the start still failed, the session
/// is deleted before the error is returned.
pub fn start_session(session: &mut LivySession) -> Result<(), CliError> {
    if let Err(e) = session.start() {
        if !session.id().is_not_started() {
            discard(session);
        }
        return Err(e.into());
    }
    Ok(())
}

/// Deletes a session that is being abandoned after a failure
pub fn discard(session: &mut LivySession) {
    if let Err(e) = session.delete() {
        tracing::warn!(session_id = %session.id(), error = %e, "Failed to delete session");
    }
}

fn expand_path(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(raw) => PathBuf::from(shellexpand::tilde(raw).into_owned()),
        None => path.to_path_buf(),
    }
}
