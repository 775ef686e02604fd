// Copyright (c) 2026 Ripple Contributors. Licensed under AGPLv3.
//! Append-only audit trail.
//!
//! One human-readable line per significant event. Write-only: the node
//! never reads this file back, and a failed append must never affect the
//! operation being audited.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{SecondsFormat, Utc};

use crate::errors::NodeResult;

pub struct AuditLog {
    writer: BufWriter<File>,
    server_id: String,
}

impl AuditLog {
    pub fn open<P: AsRef<Path>>(path: P, server_id: &str) -> NodeResult<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            server_id: server_id.to_string(),
        })
    }

    /// Append one `timestamp - SERVER <id> - <message>` line. Append
    /// failures are logged and swallowed here so no call site has to care.
    pub fn record(&mut self, message: &str) {
        let line = format!(
            "{} - SERVER {} - {}\n",
            Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            self.server_id,
            message
        );
        if let Err(e) = self
            .writer
            .write_all(line.as_bytes())
            .and_then(|_| self.writer.flush())
        {
            tracing::warn!("audit append failed: {}", e);
        }
    }
}
