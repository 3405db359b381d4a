//! Breadth-first dependency-closure update engine.
//!
//! Seeds a FIFO queue from the identified local archives, then drains it one
//! identity at a time: list versions, select the best compatible one, apply
//! it (download in live mode, log intent in dry-run), and append any
//! newly-discovered required dependencies to the back of the queue. A seen
//! set guarantees each identity is enqueued at most once, so the loop
//! terminates after at most one iteration per distinct identity, cycles
//! included.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use camino::Utf8PathBuf;
use tracing::{debug, info, warn};

use hopper_core::types::{
    CompatibilityTarget, LocalArchive, OutcomeStatus, ProjectIdentity, UpdateReport,
};
use hopper_registry::{RegistryClient, Version};

use crate::identity::IdentityResolver;
use crate::select::select_best;

/// Whether the run mutates the mods directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Report what would happen; never touch the downloader
    DryRun,
    /// Download selected files into the mods directory
    Live,
}

/// Drives a full identification-and-resolution pass.
pub struct UpdateEngine {
    client: Arc<RegistryClient>,
    identity: IdentityResolver,
    target: CompatibilityTarget,
    mode: RunMode,
    mods_dir: Utf8PathBuf,
}

impl UpdateEngine {
    /// Create an engine for one run
    pub fn new(
        client: Arc<RegistryClient>,
        identity: IdentityResolver,
        target: CompatibilityTarget,
        mode: RunMode,
        mods_dir: Utf8PathBuf,
    ) -> Self {
        Self {
            client,
            identity,
            target,
            mode,
            mods_dir,
        }
    }

    /// Run the pass: identify every archive, drain the dependency closure,
    /// and return one outcome row per distinct identity (or per filename
    /// where identification failed). Nothing is ever silently omitted.
    pub async fn run(&self, archives: &[LocalArchive]) -> UpdateReport {
        let mut report = UpdateReport::new();
        let mut queue: VecDeque<ProjectIdentity> = VecDeque::new();
        let mut seen: HashSet<ProjectIdentity> = HashSet::new();

        info!(count = archives.len(), "identifying local mods");
        for archive in archives {
            match self.identity.resolve(archive).await {
                Some(project) => {
                    let identity = ProjectIdentity::from(project.slug);
                    if seen.insert(identity.clone()) {
                        info!(title = %project.title, "queued");
                        report.insert_queued(identity.as_str(), project.title);
                        queue.push_back(identity);
                    }
                }
                None => {
                    info!(filename = %archive.filename, "could not identify on the registry");
                    report.insert_not_found(archive.filename.clone());
                }
            }
        }

        while let Some(identity) = queue.pop_front() {
            let title = report
                .get(identity.as_str())
                .map(|r| r.title.clone())
                .unwrap_or_else(|| identity.to_string());
            info!(mod_ = %title, "processing");

            // A failed listing only fails this one identity, never the run:
            // the original tool aborted everything here, discarding all
            // pending outcomes.
            let versions = match self.client.list_versions(identity.as_str()).await {
                Ok(versions) => versions,
                Err(e) => {
                    warn!(identity = %identity, error = %e, "version listing unreachable");
                    report.resolve(identity.as_str(), OutcomeStatus::NotFound, None);
                    continue;
                }
            };

            let Some(best) = select_best(&versions, &self.target) else {
                info!(mod_ = %title, "no compatible version");
                report.resolve(identity.as_str(), OutcomeStatus::NoUpdate, None);
                continue;
            };

            info!(
                mod_ = %title,
                version = %best.version_number,
                channel = ?best.version_type,
                "best version found"
            );

            let status = self.apply(best).await;
            let version = (status != OutcomeStatus::NoUpdate)
                .then(|| best.version_number.clone());
            report.resolve(identity.as_str(), status, version);

            self.enqueue_required_dependencies(best, &mut queue, &mut seen, &mut report)
                .await;
        }

        debug_assert!(report.is_settled());
        report
    }

    /// Apply the selected version. Dry-run records intent only; live mode
    /// downloads the primary file. A missing primary file or failed download
    /// degrades this one row to No Update.
    async fn apply(&self, version: &Version) -> OutcomeStatus {
        let Some(primary) = version.primary_file() else {
            warn!(version = %version.version_number, "version has no primary file");
            return OutcomeStatus::NoUpdate;
        };

        if self.mode == RunMode::DryRun {
            info!(file = %primary.filename, "dry run: would download");
            return OutcomeStatus::WouldUpdate;
        }

        match self.client.download_file(primary, &self.mods_dir).await {
            Ok(dest) => {
                info!(file = %primary.filename, dest = %dest, "downloaded");
                OutcomeStatus::Updated
            }
            Err(e) => {
                warn!(file = %primary.filename, error = %e, "download failed");
                OutcomeStatus::NoUpdate
            }
        }
    }

    /// Append unseen required dependencies of the selected version to the
    /// queue, breadth-first. The title lookup is best-effort: an unreachable
    /// project page still gets enqueued under its bare identity rather than
    /// being silently dropped.
    async fn enqueue_required_dependencies(
        &self,
        version: &Version,
        queue: &mut VecDeque<ProjectIdentity>,
        seen: &mut HashSet<ProjectIdentity>,
        report: &mut UpdateReport,
    ) {
        for dependency in &version.dependencies {
            if !dependency.dependency_type.is_required() {
                debug!(
                    kind = ?dependency.dependency_type,
                    target = ?dependency.project_id,
                    "skipping non-required dependency"
                );
                continue;
            }

            let Some(dep_identity) = &dependency.project_id else {
                continue;
            };
            let dep_identity = ProjectIdentity::from(dep_identity.as_str());
            if !seen.insert(dep_identity.clone()) {
                continue;
            }

            let title = match self.client.fetch_project(dep_identity.as_str()).await {
                Ok(Some(project)) => project.title,
                Ok(None) => dep_identity.to_string(),
                Err(e) => {
                    warn!(identity = %dep_identity, error = %e, "dependency title lookup failed");
                    dep_identity.to_string()
                }
            };

            info!(dependency = %title, "required mod added to queue");
            report.insert_queued(dep_identity.as_str(), title);
            queue.push_back(dep_identity);
        }
    }
}
