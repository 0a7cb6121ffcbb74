//! Configuration base and derived file locations.
//!
//! Responsibilities:
//! - Derive the identity name, configuration base and log file from an
//!   optional network name and an optional explicit configuration base.
//! - Locate the server file and per-host files below the base.
//!
//! Does NOT handle:
//! - Reading any file (see `parser`).
//! - Command-line parsing; callers pass the already-parsed options in.
//!
//! Invariants:
//! - An explicit configuration base always wins over one derived from the
//!   network name.

use std::path::{Path, PathBuf};

use crate::constants::{CONFDIR, HOSTS_DIR, IDENT_BASE, LOCALSTATEDIR, SERVER_CONFIG_FILE};

/// File locations for one configured network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    netname: Option<String>,
    identname: String,
    confbase: PathBuf,
    logfile: PathBuf,
}

impl ConfigPaths {
    /// Derives all locations from the network name and configuration base.
    pub fn resolve(netname: Option<&str>, confbase: Option<PathBuf>) -> Self {
        let identname = match netname {
            Some(net) => format!("{IDENT_BASE}.{net}"),
            None => IDENT_BASE.to_string(),
        };

        let confbase = match (netname, confbase) {
            (Some(_), Some(base)) => {
                tracing::info!(
                    confbase = %base.display(),
                    "Both netname and configuration directory given, using the latter..."
                );
                base
            }
            (None, Some(base)) => base,
            (Some(net), None) => Path::new(CONFDIR).join(IDENT_BASE).join(net),
            (None, None) => Path::new(CONFDIR).join(IDENT_BASE),
        };

        let logfile = Path::new(LOCALSTATEDIR)
            .join("log")
            .join(format!("{identname}.log"));

        Self {
            netname: netname.map(str::to_string),
            identname,
            confbase,
            logfile,
        }
    }

    /// Overrides the derived log file location.
    pub fn with_logfile(mut self, logfile: PathBuf) -> Self {
        self.logfile = logfile;
        self
    }

    pub fn netname(&self) -> Option<&str> {
        self.netname.as_deref()
    }

    /// `tinc` or `tinc.<netname>`; used for syslog identity and file names.
    pub fn identname(&self) -> &str {
        &self.identname
    }

    pub fn confbase(&self) -> &Path {
        &self.confbase
    }

    pub fn logfile(&self) -> &Path {
        &self.logfile
    }

    pub fn server_config_path(&self) -> PathBuf {
        self.confbase.join(SERVER_CONFIG_FILE)
    }

    pub fn host_config_path(&self, name: &str) -> PathBuf {
        self.confbase.join(HOSTS_DIR).join(name)
    }
}
