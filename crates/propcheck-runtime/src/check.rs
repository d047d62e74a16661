//! Startup check over a list of configuration files.
//!
//! Runs every location through a [`CompositeLoader`], gathers the property
//! sets and empty-value findings, and applies a [`CheckPolicy`].

use std::io;
use std::path::{Path, PathBuf};

use propcheck_core::{
    CompositeLoader, FileResource, Finding, LoadError, MergePolicy, MergedProperties,
    PropertySet, StrategyRegistry, merge,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::CheckConfig;
use crate::error::{RuntimeError, RuntimeResult};

/// What a startup check does with empty values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckPolicy {
    /// Report findings and carry on.
    #[default]
    Warn,
    /// Fail the check if there is any finding.
    Deny,
}

/// Outcome for a single location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    /// At least one strategy produced property sets.
    Loaded,
    /// No strategy claimed the file, or it held no entries.
    Empty,
    /// The file does not exist and missing files are ignored.
    Missing,
}

/// Per-location summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    pub path: PathBuf,
    pub status: FileStatus,
    pub property_sets: usize,
    pub findings: usize,
}

/// Everything a startup check loaded, in location order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckReport {
    pub property_sets: Vec<PropertySet>,
    pub findings: Vec<Finding>,
    pub files: Vec<FileSummary>,
}

impl CheckReport {
    /// Returns `true` if no empty value was found.
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    /// Merges every loaded property set into one mapping.
    pub fn merged(&self, policy: MergePolicy) -> MergedProperties {
        merge(&self.property_sets, policy)
    }

    /// Applies `policy` to the findings.
    pub fn enforce(&self, policy: CheckPolicy) -> RuntimeResult<()> {
        match policy {
            CheckPolicy::Deny if !self.is_clean() => Err(RuntimeError::EmptyValues {
                count: self.findings.len(),
            }),
            _ => Ok(()),
        }
    }

    /// Renders the report as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Loads a fixed list of configuration files at startup.
///
/// ```rust,ignore
/// use propcheck_runtime::{CheckPolicy, StartupCheck};
///
/// let report = StartupCheck::discover()
///     .location("config/application.properties")
///     .location("config/application.yml")
///     .policy(CheckPolicy::Deny)
///     .run()?;
/// ```
#[derive(Debug)]
pub struct StartupCheck {
    loader: CompositeLoader,
    locations: Vec<PathBuf>,
    policy: CheckPolicy,
    ignore_missing: bool,
}

impl StartupCheck {
    /// Creates a check that loads through `loader`.
    pub fn new(loader: CompositeLoader) -> Self {
        Self {
            loader,
            locations: Vec::new(),
            policy: CheckPolicy::default(),
            ignore_missing: false,
        }
    }

    /// Creates a check over every registered strategy.
    pub fn discover() -> Self {
        Self::new(CompositeLoader::new())
    }

    /// Creates a check from the `[check]` section of the checker
    /// configuration, using every registered strategy.
    pub fn from_config(config: &CheckConfig) -> RuntimeResult<Self> {
        let loader = CompositeLoader::builder()
            .registry(&StrategyRegistry::discover())
            .match_mode(config.match_mode)
            .build()?;

        Ok(Self::new(loader)
            .locations(config.locations.iter().cloned())
            .policy(config.policy)
            .ignore_missing(config.ignore_missing))
    }

    /// Appends a location.
    pub fn location(mut self, path: impl Into<PathBuf>) -> Self {
        self.locations.push(path.into());
        self
    }

    /// Appends several locations.
    pub fn locations<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.locations.extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn policy(mut self, policy: CheckPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Skip locations that do not exist instead of failing.
    pub fn ignore_missing(mut self, ignore: bool) -> Self {
        self.ignore_missing = ignore;
        self
    }

    pub fn loader(&self) -> &CompositeLoader {
        &self.loader
    }

    pub fn configured_locations(&self) -> &[PathBuf] {
        &self.locations
    }

    /// Loads every location in order.
    ///
    /// The first load error aborts the check. Under [`CheckPolicy::Deny`] any
    /// finding fails the check once all locations are loaded.
    pub fn run(&self) -> RuntimeResult<CheckReport> {
        let mut report = CheckReport::default();

        for path in &self.locations {
            let summary = self.check_location(path, &mut report)?;
            report.files.push(summary);
        }

        info!(
            files = report.files.len(),
            property_sets = report.property_sets.len(),
            findings = report.findings.len(),
            "Startup check finished"
        );

        report.enforce(self.policy)?;
        Ok(report)
    }

    fn check_location(&self, path: &Path, report: &mut CheckReport) -> RuntimeResult<FileSummary> {
        let name = source_name(path);
        let resource = FileResource::new(path);

        let loaded = match self.loader.load_report(&name, &resource) {
            Ok(loaded) => loaded,
            Err(LoadError::Io { source, .. })
                if self.ignore_missing && source.kind() == io::ErrorKind::NotFound =>
            {
                warn!(path = %path.display(), "Configuration file not found, skipping");
                return Ok(FileSummary {
                    path: path.to_path_buf(),
                    status: FileStatus::Missing,
                    property_sets: 0,
                    findings: 0,
                });
            }
            Err(err) => return Err(err.into()),
        };

        let status = if loaded.property_sets.is_empty() {
            debug!(path = %path.display(), "No property sets loaded");
            FileStatus::Empty
        } else {
            info!(
                path = %path.display(),
                property_sets = loaded.property_sets.len(),
                findings = loaded.findings.len(),
                "Loaded configuration file"
            );
            FileStatus::Loaded
        };

        let summary = FileSummary {
            path: path.to_path_buf(),
            status,
            property_sets: loaded.property_sets.len(),
            findings: loaded.findings.len(),
        };
        report.property_sets.extend(loaded.property_sets);
        report.findings.extend(loaded.findings);
        Ok(summary)
    }
}

/// Property sets are named after the file they came from.
fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use propcheck_core::{LoadResult, LoaderStrategy, NullSink, RawSource};
    use std::fs;
    use tempfile::TempDir;

    /// `key=value` lines.
    struct Pairs;

    impl LoaderStrategy for Pairs {
        fn file_extensions(&self) -> &[&str] {
            &["pairs"]
        }

        fn parse(&self, name: &str, source: RawSource<'_>) -> LoadResult<Vec<PropertySet>> {
            let mut builder = PropertySet::builder(name);
            for line in source.text(name)?.lines() {
                let (key, value) = line.split_once('=').unwrap_or((line, ""));
                builder.insert(key, value);
            }
            Ok(vec![builder.build()])
        }
    }

    fn check() -> StartupCheck {
        let loader = CompositeLoader::builder()
            .strategy(Pairs)
            .sink(NullSink)
            .build()
            .unwrap();
        StartupCheck::new(loader)
    }

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_report_in_location_order() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a.pairs", "x=1\ny=\n");
        let b = write(&dir, "b.pairs", "x=2\n");
        let other = write(&dir, "c.txt", "z=\n");

        let report = check().locations([&a, &b, &other]).run().unwrap();

        let names: Vec<_> = report.property_sets.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["a.pairs", "b.pairs"]);
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].key, "y");

        let statuses: Vec<_> = report.files.iter().map(|f| f.status).collect();
        assert_eq!(
            statuses,
            vec![FileStatus::Loaded, FileStatus::Loaded, FileStatus::Empty]
        );

        let merged = report.merged(MergePolicy::LastWriteWins);
        assert_eq!(merged.get("x").and_then(|v| v.as_str()), Some("2"));
    }

    #[test]
    fn test_deny_policy() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "a.pairs", "x=\ny= \n");

        let result = check().location(&path).policy(CheckPolicy::Deny).run();
        assert!(matches!(result, Err(RuntimeError::EmptyValues { count: 2 })));

        let clean = write(&dir, "b.pairs", "x=1\n");
        let report = check()
            .location(&clean)
            .policy(CheckPolicy::Deny)
            .run()
            .unwrap();
        assert!(report.is_clean());
    }

    #[test]
    fn test_missing_location() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent.pairs");

        let result = check().location(&missing).run();
        assert!(matches!(result, Err(RuntimeError::Load(LoadError::Io { .. }))));

        let report = check()
            .location(&missing)
            .ignore_missing(true)
            .run()
            .unwrap();
        assert_eq!(report.files[0].status, FileStatus::Missing);
        assert!(report.property_sets.is_empty());
    }

    #[test]
    fn test_parse_error_aborts() {
        let dir = TempDir::new().unwrap();
        let good = write(&dir, "a.pairs", "x=1\n");
        let bad = dir.path().join("b.pairs");
        fs::write(&bad, [0xff, 0xfe]).unwrap();

        let result = check().locations([&good, &bad]).run();
        assert!(matches!(result, Err(RuntimeError::Load(ref e)) if e.is_parse()));
    }

    #[test]
    fn test_report_json() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "a.pairs", "x=\n");

        let json = check().location(&path).run().unwrap().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["findings"][0]["key"], "x");
        assert_eq!(value["files"][0]["status"], "loaded");
    }
}
