//! Bounded-concurrency dispatch over the dependency DAG

use crate::{DependencyTable, ScheduleError, SectionDrafter};
use quill_domain::{Section, SectionDocument, Verdict};
use quill_evidence::{AuditTrail, EvidenceStore};
use quill_validator::{extract, Validator};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Lifecycle of one section task within a dispatch run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Waiting for dependencies
    Pending,

    /// Dependencies satisfied, not yet started
    Ready,

    /// Drafting in progress
    Running,

    /// Drafted successfully
    Completed,

    /// The drafter returned an error
    Failed,

    /// A dependency failed or was itself blocked
    Blocked,
}

/// Final outcome of one section task
#[derive(Debug)]
pub struct TaskOutcome {
    /// Terminal status
    pub status: TaskStatus,

    /// The drafted document, present when status is `Completed`
    pub document: Option<SectionDocument>,

    /// Post-run validation verdict, present when status is `Completed`
    pub verdict: Option<Verdict>,

    /// Drafter error message, present when status is `Failed`
    pub error: Option<String>,
}

/// Cooperative cancellation handle
///
/// Checked before each new dispatch; tasks already running are left to
/// finish.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Create an unset flag
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// The section scheduler
pub struct Scheduler {
    table: DependencyTable,
    validator: Validator,
    max_concurrent: usize,
    cancel: CancelFlag,
}

/// Default bound on concurrently running draft tasks
pub const DEFAULT_MAX_CONCURRENT: usize = 3;

impl Scheduler {
    /// Create a scheduler over a dependency table
    ///
    /// # Errors
    ///
    /// Returns `ScheduleError::DependencyCycle` if the table loops; the
    /// check runs here, once, so dispatch never has to.
    pub fn new(
        table: DependencyTable,
        validator: Validator,
        max_concurrent: usize,
    ) -> Result<Self, ScheduleError> {
        table.check_acyclic()?;
        Ok(Self {
            table,
            validator,
            max_concurrent: max_concurrent.max(1),
            cancel: CancelFlag::new(),
        })
    }

    /// The cancellation handle for this scheduler
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Draft the given sections, respecting dependencies
    ///
    /// `completed` holds sections already accepted by the ledger; they
    /// satisfy dependencies without being re-drafted. A failed section
    /// blocks its transitive dependents but running siblings finish. A
    /// dependency that is neither scheduled nor completed blocks its
    /// dependents outright. After all tasks settle, each completed
    /// section is validated and the verdict attached.
    pub async fn dispatch(
        &self,
        sections: &[Section],
        completed: &BTreeSet<Section>,
        drafter: Arc<dyn SectionDrafter>,
        store: &EvidenceStore,
        trail: &AuditTrail,
    ) -> BTreeMap<Section, TaskOutcome> {
        let mut status: BTreeMap<Section, TaskStatus> = sections
            .iter()
            .map(|&s| (s, TaskStatus::Pending))
            .collect();
        let mut bodies: BTreeMap<Section, String> = BTreeMap::new();
        let mut errors: BTreeMap<Section, String> = BTreeMap::new();

        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));
        let mut join_set: JoinSet<(Section, Result<String, crate::DraftError>)> = JoinSet::new();
        let mut running: HashMap<tokio::task::Id, Section> = HashMap::new();

        loop {
            self.settle(&mut status, completed);

            if !self.cancel.is_cancelled() {
                let ready: Vec<Section> = status
                    .iter()
                    .filter(|(_, &st)| st == TaskStatus::Ready)
                    .map(|(&s, _)| s)
                    .collect();
                for section in ready {
                    status.insert(section, TaskStatus::Running);
                    let drafter = Arc::clone(&drafter);
                    let semaphore = Arc::clone(&semaphore);
                    let handle = join_set.spawn(async move {
                        let _permit = semaphore.acquire_owned().await.ok();
                        let result = drafter.draft(section).await;
                        (section, result)
                    });
                    running.insert(handle.id(), section);
                    tracing::debug!(section = section.as_str(), "section dispatched");
                }
            }

            match join_set.join_next_with_id().await {
                Some(Ok((id, (section, result)))) => {
                    running.remove(&id);
                    match result {
                        Ok(body) => {
                            status.insert(section, TaskStatus::Completed);
                            bodies.insert(section, body);
                            tracing::info!(section = section.as_str(), "section drafted");
                        }
                        Err(e) => {
                            status.insert(section, TaskStatus::Failed);
                            tracing::warn!(section = section.as_str(), error = %e, "draft failed");
                            errors.insert(section, e.to_string());
                        }
                    }
                }
                Some(Err(join_err)) => {
                    if let Some(section) = running.remove(&join_err.id()) {
                        status.insert(section, TaskStatus::Failed);
                        errors.insert(section, "draft task panicked".to_string());
                        tracing::error!(section = section.as_str(), "draft task panicked");
                    }
                }
                None => break,
            }
        }

        self.settle(&mut status, completed);

        let mut outcomes = BTreeMap::new();
        for (&section, &st) in &status {
            // Ready survives only a cancelled run; report it as never
            // having started
            let st = if st == TaskStatus::Ready {
                TaskStatus::Pending
            } else {
                st
            };
            let mut outcome = TaskOutcome {
                status: st,
                document: None,
                verdict: None,
                error: errors.remove(&section),
            };
            if st == TaskStatus::Completed {
                if let Some(body) = bodies.remove(&section) {
                    let mut doc = extract::section_document(section, &body);
                    let verdict = self.validator.validate_section(&doc, store, trail);
                    doc.mark(verdict.passed());
                    outcome.document = Some(doc);
                    outcome.verdict = Some(verdict);
                }
            }
            outcomes.insert(section, outcome);
        }
        outcomes
    }

    /// Promote pending tasks whose dependencies are satisfied and block
    /// those whose dependencies can never be, to a fixpoint
    fn settle(&self, status: &mut BTreeMap<Section, TaskStatus>, completed: &BTreeSet<Section>) {
        loop {
            let mut changed = false;
            let pending: Vec<Section> = status
                .iter()
                .filter(|(_, &st)| st == TaskStatus::Pending)
                .map(|(&s, _)| s)
                .collect();
            for section in pending {
                let mut satisfied = true;
                let mut blocked = false;
                for dep in self.table.deps_of(section) {
                    if completed.contains(dep) {
                        continue;
                    }
                    match status.get(dep) {
                        Some(TaskStatus::Completed) => {}
                        Some(TaskStatus::Failed) | Some(TaskStatus::Blocked) => {
                            blocked = true;
                            break;
                        }
                        // Not scheduled and not completed: unreachable dep
                        None => {
                            blocked = true;
                            break;
                        }
                        _ => satisfied = false,
                    }
                }
                if blocked {
                    status.insert(section, TaskStatus::Blocked);
                    changed = true;
                } else if satisfied {
                    status.insert(section, TaskStatus::Ready);
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DraftError;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use quill_validator::ValidationConfig;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    struct MockDrafter {
        calls: Mutex<Vec<Section>>,
        fail: BTreeSet<Section>,
        body: String,
    }

    impl MockDrafter {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail: BTreeSet::new(),
                body: "Drafted section body.".to_string(),
            }
        }

        fn failing(sections: &[Section]) -> Self {
            Self {
                fail: sections.iter().copied().collect(),
                ..Self::new()
            }
        }
    }

    #[async_trait]
    impl SectionDrafter for MockDrafter {
        async fn draft(&self, section: Section) -> Result<String, DraftError> {
            self.calls.lock().push(section);
            if self.fail.contains(&section) {
                return Err(DraftError(format!("cannot draft {}", section)));
            }
            Ok(self.body.clone())
        }
    }

    fn scheduler(max_concurrent: usize) -> Scheduler {
        Scheduler::new(
            DependencyTable::standard(),
            Validator::new(ValidationConfig::permissive()),
            max_concurrent,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_dependencies_respected() {
        let sched = scheduler(3);
        let drafter = Arc::new(MockDrafter::new());
        let store = EvidenceStore::in_memory();
        let trail = AuditTrail::in_memory();

        let outcomes = sched
            .dispatch(
                &Section::ALL,
                &BTreeSet::new(),
                drafter.clone(),
                &store,
                &trail,
            )
            .await;

        for outcome in outcomes.values() {
            assert_eq!(outcome.status, TaskStatus::Completed);
        }

        let calls = drafter.calls.lock();
        let position = |s: Section| calls.iter().position(|&c| c == s).unwrap();
        assert!(position(Section::Methods) < position(Section::Results));
        assert!(position(Section::Results) < position(Section::Discussion));
        assert_eq!(position(Section::Abstract), calls.len() - 1);
    }

    #[tokio::test]
    async fn test_failure_blocks_transitive_dependents_only() {
        let sched = scheduler(3);
        let drafter = Arc::new(MockDrafter::failing(&[Section::Methods]));
        let store = EvidenceStore::in_memory();
        let trail = AuditTrail::in_memory();

        let sections = [
            Section::Methods,
            Section::Results,
            Section::Discussion,
            Section::Availability,
        ];
        let outcomes = sched
            .dispatch(&sections, &BTreeSet::new(), drafter, &store, &trail)
            .await;

        assert_eq!(outcomes[&Section::Methods].status, TaskStatus::Failed);
        assert!(outcomes[&Section::Methods].error.is_some());
        assert_eq!(outcomes[&Section::Results].status, TaskStatus::Blocked);
        assert_eq!(outcomes[&Section::Discussion].status, TaskStatus::Blocked);
        assert_eq!(outcomes[&Section::Availability].status, TaskStatus::Completed);
    }

    #[tokio::test]
    async fn test_ledger_completed_sections_satisfy_deps() {
        let sched = scheduler(3);
        let drafter = Arc::new(MockDrafter::new());
        let store = EvidenceStore::in_memory();
        let trail = AuditTrail::in_memory();

        let completed: BTreeSet<Section> = [Section::Methods].into_iter().collect();
        let outcomes = sched
            .dispatch(&[Section::Results], &completed, drafter.clone(), &store, &trail)
            .await;

        assert_eq!(outcomes[&Section::Results].status, TaskStatus::Completed);
        // Methods itself was not re-drafted
        assert_eq!(drafter.calls.lock().as_slice(), &[Section::Results]);
    }

    #[tokio::test]
    async fn test_unreachable_dependency_blocks() {
        let sched = scheduler(3);
        let drafter = Arc::new(MockDrafter::new());
        let store = EvidenceStore::in_memory();
        let trail = AuditTrail::in_memory();

        let outcomes = sched
            .dispatch(&[Section::Results], &BTreeSet::new(), drafter, &store, &trail)
            .await;

        assert_eq!(outcomes[&Section::Results].status, TaskStatus::Blocked);
    }

    struct CountingDrafter {
        current: AtomicUsize,
        peak: AtomicUsize,
    }

    #[async_trait]
    impl SectionDrafter for CountingDrafter {
        async fn draft(&self, _section: Section) -> Result<String, DraftError> {
            let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.current.fetch_sub(1, Ordering::SeqCst);
            Ok("body".to_string())
        }
    }

    #[tokio::test]
    async fn test_concurrency_bound_holds() {
        let sched = scheduler(2);
        let drafter = Arc::new(CountingDrafter {
            current: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        });
        let store = EvidenceStore::in_memory();
        let trail = AuditTrail::in_memory();

        // All three are dependency-free and eligible at once
        let sections = [Section::Introduction, Section::Methods, Section::Availability];
        sched
            .dispatch(&sections, &BTreeSet::new(), drafter.clone(), &store, &trail)
            .await;

        assert!(drafter.peak.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn test_cancel_prevents_new_dispatch() {
        let sched = scheduler(3);
        sched.cancel_flag().cancel();
        let drafter = Arc::new(MockDrafter::new());
        let store = EvidenceStore::in_memory();
        let trail = AuditTrail::in_memory();

        let outcomes = sched
            .dispatch(&[Section::Methods], &BTreeSet::new(), drafter.clone(), &store, &trail)
            .await;

        assert!(drafter.calls.lock().is_empty());
        assert_ne!(outcomes[&Section::Methods].status, TaskStatus::Completed);
    }

    #[tokio::test]
    async fn test_verdict_attached_after_run() {
        let sched = scheduler(3);
        let drafter = Arc::new(MockDrafter::new());
        let store = EvidenceStore::in_memory();
        let trail = AuditTrail::in_memory();

        let outcomes = sched
            .dispatch(&[Section::Methods], &BTreeSet::new(), drafter, &store, &trail)
            .await;

        let outcome = &outcomes[&Section::Methods];
        let verdict = outcome.verdict.as_ref().unwrap();
        assert!(verdict.passed());
        let doc = outcome.document.as_ref().unwrap();
        assert_eq!(doc.state, quill_domain::DocumentState::Passed);
    }

    #[tokio::test]
    async fn test_unknown_citation_in_draft_fails_revalidation() {
        let sched = scheduler(3);
        let drafter = Arc::new(MockDrafter {
            calls: Mutex::new(Vec::new()),
            fail: BTreeSet::new(),
            body: "Relies on [ghost2020] heavily.".to_string(),
        });
        let store = EvidenceStore::in_memory();
        let trail = AuditTrail::in_memory();

        let outcomes = sched
            .dispatch(&[Section::Methods], &BTreeSet::new(), drafter, &store, &trail)
            .await;

        let outcome = &outcomes[&Section::Methods];
        assert_eq!(outcome.status, TaskStatus::Completed);
        assert!(!outcome.verdict.as_ref().unwrap().passed());
        assert_eq!(
            outcome.document.as_ref().unwrap().state,
            quill_domain::DocumentState::Failed
        );
    }

    #[test]
    fn test_cycle_rejected_at_construction() {
        let mut table = DependencyTable::empty();
        table.add(Section::Methods, Section::Results);
        table.add(Section::Results, Section::Methods);

        let result = Scheduler::new(table, Validator::new(ValidationConfig::default()), 3);
        assert!(matches!(result, Err(ScheduleError::DependencyCycle)));
    }
}
