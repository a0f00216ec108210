//! Scoped resources for tests and bootstrap imports.
//!
//! Both guards release what they acquired on every exit path, panics
//! included.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use tracing::level_filters::LevelFilter;
use tracing::subscriber::DefaultGuard;

/// Switch the process working directory until the guard drops, then
/// restore the previous one.
#[derive(Debug)]
pub struct ScopedCwd {
    prev: PathBuf,
}

impl ScopedCwd {
    pub fn new(dir: &Path) -> io::Result<ScopedCwd> {
        let prev = env::current_dir()?;
        env::set_current_dir(dir)?;
        Ok(ScopedCwd { prev })
    }

    /// The directory that will be restored on drop.
    pub fn prev(&self) -> &Path {
        &self.prev
    }
}

impl Drop for ScopedCwd {
    fn drop(&mut self) {
        if let Err(e) = env::set_current_dir(&self.prev) {
            tracing::error!(target: "scoped", error = %e, "failed to restore working directory");
        }
    }
}

/// Raise the log threshold for the current thread until the guard drops:
/// only events at `max` or above pass. `LevelFilter::OFF` silences
/// everything; dropping the guard restores the prior subscriber.
#[must_use = "the threshold is restored when the guard drops"]
pub fn quiet_logs(max: LevelFilter) -> DefaultGuard {
    let subscriber = tracing_subscriber::fmt().with_max_level(max).finish();
    tracing::subscriber::set_default(subscriber)
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use tempfile::tempdir;
    use tracing::level_filters::LevelFilter;

    use super::{ScopedCwd, quiet_logs};

    // One test only: the working directory is process-global, and two
    // guards in concurrently running tests would trample each other.
    #[test]
    fn cwd_is_restored_on_every_exit_path() -> Result<()> {
        let dir = tempdir()?;
        let before = std::env::current_dir()?;
        {
            let _guard = ScopedCwd::new(dir.path())?;
            assert_eq!(std::env::current_dir()?, dir.path().canonicalize()?);
        }
        assert_eq!(std::env::current_dir()?, before);

        let path = dir.path().to_path_buf();
        let result = std::panic::catch_unwind(move || {
            let _guard = ScopedCwd::new(&path).unwrap();
            panic!("boom");
        });
        assert!(result.is_err());
        assert_eq!(std::env::current_dir()?, before);
        Ok(())
    }

    #[test]
    fn quiet_logs_scopes_the_threshold() {
        {
            let _guard = quiet_logs(LevelFilter::OFF);
            // silenced: must not panic or leak through the default output
            tracing::error!(target: "scoped", "suppressed");
        }
        tracing::debug!(target: "scoped", "back to the prior subscriber");
    }
}
