// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow};
use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "PAINEL_LOG";

/// Routes tracing output to `path`. The terminal belongs to the shell, so
/// nothing is written to stdout or stderr once this returns.
pub fn init(path: &Path, default_filter: &str) -> Result<()> {
    let file = open_log_file(path)?;
    let filter = resolve_filter(std::env::var(LOG_ENV).ok().as_deref(), default_filter)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(true)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|error| anyhow!("install log subscriber: {error}"))
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| {
            format!(
                "open log file {}; set [logging].file to a writable path or disable logging",
                path.display()
            )
        })
}

fn resolve_filter(env_value: Option<&str>, default_filter: &str) -> Result<EnvFilter> {
    match env_value.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => EnvFilter::try_new(value)
            .with_context(|| format!("invalid {LOG_ENV} filter {value:?}")),
        None => EnvFilter::try_new(default_filter)
            .with_context(|| format!("invalid [logging].filter {default_filter:?}")),
    }
}
