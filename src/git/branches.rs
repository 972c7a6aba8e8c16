//! git::branches
//!
//! Branches with recent commits, local first, optionally across remotes.
//!
//! # Algorithm
//!
//! 1. List `refs/heads` with each tip's committer date.
//! 2. If remotes are wanted, list `refs/remotes` (or `refs/remotes/<remote>`).
//! 3. Drop every ref whose tip is strictly older than the cutoff.
//! 4. Stable-sort by commit date, newest first. Ties keep enumeration
//!    order, so a local branch precedes a remote one with the same date.
//! 5. Drop repeated `(name, type)` pairs, keeping the first.
//!
//! Tags are never listed. Symbolic `refs/remotes/<remote>/HEAD` entries are
//! skipped: they point at a branch that is already listed on its own.

use std::collections::HashSet;

use chrono::{DateTime, TimeZone, Utc};
use tracing::trace;

use super::interface::{Git, GitError};
use super::runner::CommandRunner;
use crate::core::types::{Oid, Ref, RefName, RefType};

/// `for-each-ref` format: ref path, tip sha, raw committer date
/// (`<epoch> <tz>`), then the symref target, empty for ordinary refs.
const RECENT_FORMAT: &str = "--format=%(refname) %(objectname) %(committerdate:raw) %(symref)";

/// A ref paired with the commit date of its tip.
#[derive(Debug, Clone)]
struct RefDateCommit {
    reference: Ref,
    committed: DateTime<Utc>,
}

impl<R: CommandRunner> Git<R> {
    /// Branches whose tip commit is no older than `since`.
    ///
    /// With `include_remotes`, remote-tracking branches are added after the
    /// local ones; a non-empty `remote_filter` restricts them to one remote.
    /// A filter naming no existing remote simply contributes nothing.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use chrono::{Duration, Utc};
    /// use reflens::git::Git;
    ///
    /// let git = Git::open(".")?;
    /// for r in git.recent_branches(Utc::now() - Duration::days(7), true, "origin")? {
    ///     println!("{} {}", r.sha.short(7), r.name);
    /// }
    /// # Ok::<(), reflens::git::GitError>(())
    /// ```
    pub fn recent_branches(
        &self,
        since: DateTime<Utc>,
        include_remotes: bool,
        remote_filter: &str,
    ) -> Result<Vec<Ref>, GitError> {
        let mut candidates = self.refs_with_dates(RefType::LOCAL_PREFIX.trim_end_matches('/'))?;

        if include_remotes {
            let pattern = if remote_filter.is_empty() {
                RefType::REMOTE_PREFIX.trim_end_matches('/').to_string()
            } else {
                format!("{}{}", RefType::REMOTE_PREFIX, remote_filter)
            };
            candidates.extend(self.refs_with_dates(&pattern)?);
        }

        Ok(select_recent(candidates, since))
    }

    fn refs_with_dates(&self, pattern: &str) -> Result<Vec<RefDateCommit>, GitError> {
        let args = ["for-each-ref", RECENT_FORMAT, pattern];
        let stdout = self.run(&args)?;

        let mut refs = Vec::new();
        for line in stdout.lines().filter(|l| !l.trim().is_empty()) {
            if let Some(entry) = self.parse_dated_ref(&args, line)? {
                refs.push(entry);
            }
        }
        Ok(refs)
    }

    /// Parse one `for-each-ref` line. Returns `None` for symbolic refs.
    fn parse_dated_ref(
        &self,
        args: &[&str],
        line: &str,
    ) -> Result<Option<RefDateCommit>, GitError> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let (full, sha, epoch) = match fields.as_slice() {
            [full, sha, epoch, _tz] => (*full, *sha, *epoch),
            [full, _sha, _epoch, _tz, target] => {
                trace!(%full, %target, "skipping symbolic ref");
                return Ok(None);
            }
            _ => {
                return Err(self.malformed(
                    args,
                    line,
                    "expected <ref> <sha> <epoch> <tz> [<symref>]",
                ))
            }
        };

        let full = RefName::new(full).map_err(|e| self.malformed(args, line, e.to_string()))?;
        let sha = Oid::new(sha).map_err(|e| self.malformed(args, line, e.to_string()))?;
        let committed = epoch
            .parse::<i64>()
            .ok()
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
            .ok_or_else(|| self.malformed(args, line, "commit date is not a unix timestamp"))?;

        Ok(Some(RefDateCommit {
            reference: Ref::from_full_name(&full, sha),
            committed,
        }))
    }
}

/// Apply the cutoff, order newest first and drop duplicates.
fn select_recent(candidates: Vec<RefDateCommit>, since: DateTime<Utc>) -> Vec<Ref> {
    let mut recent: Vec<RefDateCommit> = candidates
        .into_iter()
        .filter(|c| {
            let keep = c.committed >= since;
            trace!(name = %c.reference.name, committed = %c.committed, keep, "recency check");
            keep
        })
        .collect();

    // `sort_by` is stable: equal dates keep enumeration order.
    recent.sort_by(|a, b| b.committed.cmp(&a.committed));

    let mut seen: HashSet<(String, RefType)> = HashSet::new();
    recent
        .into_iter()
        .filter(|c| {
            let fresh = seen.insert((c.reference.name.clone(), c.reference.ref_type));
            if !fresh {
                trace!(name = %c.reference.name, "dropping duplicate ref");
            }
            fresh
        })
        .map(|c| c.reference)
        .collect()
}
