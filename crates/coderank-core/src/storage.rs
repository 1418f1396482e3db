use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use crate::error::{CoderankError, Result};
use crate::model::{EnrichedModel, StoredBundle, SCHEMA_VERSION};

/// The stored leaderboard bundle: one JSON file, replaced whole on every save.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `models` as a new bundle stamped with the current time.
    ///
    /// The JSON goes to a temp file beside the destination which is then
    /// renamed over it, so a reader sees either the previous bundle or this
    /// one, never a partial write.
    pub fn save(&self, models: &[EnrichedModel], source_label: &str) -> Result<StoredBundle> {
        let bundle = StoredBundle {
            models: models.to_vec(),
            fetched_at: Utc::now(),
            source_label: source_label.to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
        };

        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        serde_json::to_writer_pretty(&mut tmp, &bundle)?;
        tmp.flush()?;
        tmp.persist(&self.path)
            .map_err(|e| CoderankError::Io(format!("{}: {}", self.path.display(), e.error)))?;

        info!(path = %self.path.display(), models = bundle.models.len(), "saved model data");
        Ok(bundle)
    }

    /// The stored bundle, or `None` when there is nothing usable on disk.
    ///
    /// A missing file, a file that doesn't parse, and a file from another
    /// schema version all read as `None`. Only real IO failures are errors.
    pub fn load(&self) -> Result<Option<StoredBundle>> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no stored model data");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let bundle: StoredBundle = match serde_json::from_str(&text) {
            Ok(bundle) => bundle,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring unreadable model data");
                return Ok(None);
            }
        };

        if bundle.schema_version != SCHEMA_VERSION {
            warn!(
                path = %self.path.display(),
                found = %bundle.schema_version,
                expected = SCHEMA_VERSION,
                "ignoring model data from another schema version"
            );
            return Ok(None);
        }

        Ok(Some(bundle))
    }

    /// True when nothing is stored or the stored bundle is at least `max_age` old.
    pub fn is_stale(&self, max_age: Duration) -> Result<bool> {
        Ok(match self.load()? {
            Some(bundle) => Utc::now() - bundle.fetched_at >= max_age,
            None => true,
        })
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("{n} {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}

/// "5 minutes ago", "1 hour ago", "2 days ago". Days are used only past 24
/// whole hours. Future timestamps count as zero.
pub fn data_age(fetched_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = (now - fetched_at).max(Duration::zero());
    let hours = elapsed.num_hours();
    if hours > 24 {
        plural(hours / 24, "day")
    } else if hours > 0 {
        plural(hours, "hour")
    } else {
        plural(elapsed.num_minutes(), "minute")
    }
}
