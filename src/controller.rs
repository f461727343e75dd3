//! Schedule controller.
//!
//! Owns the store, the view state, the current placement and the conflict
//! overlay, and drives one-way refresh cycles:
//!
//! ```text
//! fetch → EntityStore::replace → ViewEngine::place → ConflictOverlay::apply
//! ```
//!
//! # Load states
//! Each domain (teachers, classrooms, courses, schedule) is `Idle`,
//! `Loading`, `Ready` or `Error`. The aggregate is `Loading` while any
//! domain is idle or loading, otherwise `Error` with the earliest failure
//! still standing, otherwise `Ready`.
//!
//! Nothing is placed until every domain has completed (or failed) once, so
//! a partial first load never renders. After that, a refetch in flight does
//! not block view changes: they place against whatever snapshot is current.
//!
//! # Stale responses
//! Every fetch takes a [`FetchTicket`] with a per-domain sequence number.
//! A response whose ticket is not the latest one issued for its domain is
//! dropped, so a slow old response can never overwrite a newer one.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

use crate::api::{decode_records, ApiResult, ScheduleApi};
use crate::config::{ViewerConfig, ViewerSettings};
use crate::error::ScheduleError;
use crate::grid::{self, CellAddress};
use crate::models::EntityId;
use crate::overlay::{ConflictOverlay, ConflictStatus, OverlayResult};
use crate::render::GridView;
use crate::stats::ScheduleStats;
use crate::store::{Domain, EntityStore};
use crate::validation::validate_snapshot;
use crate::view::{CellLabel, FilterOption, Placement, ViewEngine, ViewMode, ViewState};

/// Load state of one domain, or of all of them together.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState {
    /// Never requested.
    #[default]
    Idle,
    Loading,
    Ready,
    Error(ScheduleError),
}

/// Handle for one in-flight fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub domain: Domain,
    pub seq: u64,
}

/// What happened to a completed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response was the latest for its domain and is now in the store.
    Applied,
    /// A newer fetch was issued; the response was dropped.
    Stale,
}

/// Severity of a user-visible notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A transient message for the user (snackbar, toast).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// Everything a detail popup shows for one entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryDetail {
    pub entry_id: EntityId,
    pub label: CellLabel,
    pub cell: CellAddress,
    pub day: String,
    pub time_slot: String,
    /// Named by a pair of the last conflict report.
    pub in_conflict: bool,
}

/// Read-only view of the controller for rendering.
#[derive(Debug, Clone)]
pub struct RenderSnapshot {
    pub state: LoadState,
    pub view: ViewState,
    pub placement: Placement,
    pub conflict_status: ConflictStatus,
    pub conflict_count: usize,
    /// Cells to highlight right now (empty while highlights are hidden).
    pub highlighted: BTreeSet<CellAddress>,
    pub counts: ScheduleStats,
}

#[derive(Debug, Clone, Default)]
struct DomainSlot {
    state: LoadState,
    latest: u64,
    settled: bool,
    // Order in which the current error was recorded, for "first failure".
    failed_at: u64,
}

/// Orchestrates fetches, placement and the conflict overlay.
#[derive(Debug)]
pub struct ScheduleController<A> {
    api: A,
    settings: ViewerSettings,
    store: EntityStore,
    view: ViewState,
    overlay: ConflictOverlay,
    placement: Placement,
    slots: [DomainSlot; 4],
    failures: u64,
    notices: Vec<Notice>,
}

impl<A: ScheduleApi> ScheduleController<A> {
    /// Creates a controller with default settings.
    pub fn new(api: A) -> Self {
        Self::with_config(api, &ViewerConfig::default())
    }

    /// Creates a controller starting from a configuration.
    pub fn with_config(api: A, config: &ViewerConfig) -> Self {
        let view = config.initial_view();
        Self {
            api,
            settings: config.viewer.clone(),
            store: EntityStore::new(),
            view,
            overlay: ConflictOverlay::new(view.show_conflicts),
            placement: Placement::default(),
            slots: Default::default(),
            failures: 0,
            notices: Vec::new(),
        }
    }

    // ==================== Fetching ====================

    /// Loads all four domains concurrently and renders once all complete.
    pub async fn load(&mut self) {
        let tickets = Domain::ALL.map(|d| self.begin_fetch(d));
        let api = &self.api;
        let (teachers, classrooms, courses, schedule) = tokio::join!(
            api.list(Domain::Teachers),
            api.list(Domain::Classrooms),
            api.list(Domain::Courses),
            api.list(Domain::Schedule),
        );

        for (ticket, result) in tickets
            .into_iter()
            .zip([teachers, classrooms, courses, schedule])
        {
            self.complete_fetch(ticket, result);
        }
        self.after_data_change().await;
    }

    /// Refetches schedule entries only.
    pub async fn refresh(&mut self) {
        self.invalidate(Domain::Schedule).await;
    }

    /// Refetches one domain after something outside the core changed it
    /// (an import, a CRUD dialog).
    pub async fn invalidate(&mut self, domain: Domain) {
        let ticket = self.begin_fetch(domain);
        let result = self.api.list(domain).await;
        if self.complete_fetch(ticket, result) == FetchOutcome::Applied {
            self.after_data_change().await;
        }
    }

    /// Issues a ticket for a new fetch of `domain`.
    pub fn begin_fetch(&mut self, domain: Domain) -> FetchTicket {
        let slot = self.slot_mut(domain);
        slot.latest += 1;
        slot.state = LoadState::Loading;
        debug!(%domain, seq = slot.latest, "fetch issued");
        FetchTicket {
            domain,
            seq: slot.latest,
        }
    }

    /// Applies a fetch response, unless a newer fetch of the same domain has
    /// been issued since.
    pub fn complete_fetch(&mut self, ticket: FetchTicket, result: ApiResult<Value>) -> FetchOutcome {
        let domain = ticket.domain;
        if ticket.seq != self.slot(domain).latest {
            debug!(
                %domain,
                seq = ticket.seq,
                latest = self.slot(domain).latest,
                "discarding stale response"
            );
            return FetchOutcome::Stale;
        }

        match result {
            Ok(body) => {
                let decoded = decode_records(domain, body);
                if let Some(warning) = decoded.warning {
                    self.notify(NoticeLevel::Warning, warning.to_string());
                }
                info!(%domain, records = decoded.records.len(), "snapshot replaced");
                self.store.replace(decoded.records);
                self.overlay.reset();
                self.slot_mut(domain).state = LoadState::Ready;
            }
            Err(err) => {
                let err = ScheduleError::FetchFailure {
                    domain,
                    message: err.to_string(),
                };
                warn!(error = %err, "fetch failed");
                self.notify(NoticeLevel::Error, err.to_string());
                self.failures += 1;
                let order = self.failures;
                let slot = self.slot_mut(domain);
                slot.state = LoadState::Error(err);
                slot.failed_at = order;
            }
        }
        self.slot_mut(domain).settled = true;

        if self.can_render() {
            if let Err(issues) = validate_snapshot(&self.store) {
                warn!(issues = issues.len(), "snapshot has integrity issues");
            }
            self.rerender();
        }
        FetchOutcome::Applied
    }

    async fn after_data_change(&mut self) {
        if self.settings.check_conflicts_on_refresh && self.load_state() == LoadState::Ready {
            self.check_conflicts().await;
        }
    }

    // ==================== Remote actions ====================

    /// Fetches the conflict report and merges it onto the grid.
    pub async fn check_conflicts(&mut self) -> OverlayResult {
        match self.api.check_conflicts().await {
            Ok(response) if response.success => {
                let result = self.overlay.apply(&response.data);
                if result.count > 0 {
                    self.notify(
                        NoticeLevel::Warning,
                        format!("found {} conflicts", result.count),
                    );
                } else {
                    self.notify(NoticeLevel::Info, "no conflicts found");
                }
                result
            }
            Ok(response) => {
                self.overlay.fail();
                let message = response
                    .message
                    .unwrap_or_else(|| "conflict check failed".to_string());
                self.notify(NoticeLevel::Error, message);
                self.overlay.result()
            }
            Err(err) => {
                warn!(error = %err, "conflict check failed");
                self.overlay.fail();
                self.notify(NoticeLevel::Error, format!("conflict check failed: {err}"));
                self.overlay.result()
            }
        }
    }

    /// Asks the service to generate a schedule, then reloads entries.
    ///
    /// Returns whether generation succeeded.
    pub async fn auto_schedule(&mut self) -> bool {
        match self.api.auto_schedule().await {
            Ok(response) if response.success => {
                self.notify(NoticeLevel::Success, "schedule generated");
                self.refresh().await;
                true
            }
            Ok(response) => {
                let message = response
                    .message
                    .unwrap_or_else(|| "auto-schedule failed".to_string());
                self.notify(NoticeLevel::Error, message);
                false
            }
            Err(err) => {
                warn!(error = %err, "auto-schedule failed");
                self.notify(NoticeLevel::Error, format!("auto-schedule failed: {err}"));
                false
            }
        }
    }

    // ==================== View changes (no fetching) ====================

    /// Switches the grouping dimension; clears the filter.
    pub fn set_view(&mut self, mode: ViewMode) {
        self.view = self.view.with_mode(mode);
        self.rerender();
    }

    /// Narrows the view to one teacher or classroom, or clears the filter.
    pub fn set_filter(&mut self, filter: Option<EntityId>) {
        self.view = self.view.with_filter(filter);
        self.rerender();
    }

    /// Shows or hides conflict highlights. The marked set is kept.
    pub fn set_conflict_visible(&mut self, visible: bool) {
        self.view = self.view.with_conflicts_shown(visible);
        self.overlay.set_visible(visible);
    }

    /// Shows or hides cells with no placed entry.
    pub fn set_empty_visible(&mut self, visible: bool) {
        self.view = self.view.with_empty_shown(visible);
    }

    fn rerender(&mut self) {
        if self.can_render() {
            self.placement = ViewEngine::place(&self.store, &self.view);
        }
    }

    // ==================== Read access ====================

    /// Aggregate load state over all domains.
    pub fn load_state(&self) -> LoadState {
        if self
            .slots
            .iter()
            .any(|s| matches!(s.state, LoadState::Idle | LoadState::Loading))
        {
            return LoadState::Loading;
        }
        self.slots
            .iter()
            .filter(|s| matches!(s.state, LoadState::Error(_)))
            .min_by_key(|s| s.failed_at)
            .map(|s| s.state.clone())
            .unwrap_or(LoadState::Ready)
    }

    /// Load state of one domain.
    pub fn domain_state(&self, domain: Domain) -> &LoadState {
        &self.slot(domain).state
    }

    /// Whether every domain has completed at least once.
    pub fn can_render(&self) -> bool {
        self.slots.iter().all(|s| s.settled)
    }

    /// Snapshot for rendering.
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            state: self.load_state(),
            view: self.view,
            placement: self.placement.clone(),
            conflict_status: self.overlay.status(),
            conflict_count: self.overlay.count(),
            highlighted: self.overlay.visible_cells(),
            counts: ScheduleStats::calculate(&self.store, &self.placement, &self.overlay),
        }
    }

    /// Presentation rows for the current state.
    pub fn grid_view(&self) -> GridView {
        GridView::build(&self.placement, &self.overlay, &self.view)
    }

    /// Resolved details of an entry; `None` if unknown, dangling or off-grid.
    pub fn entry_detail(&self, entry_id: EntityId) -> Option<EntryDetail> {
        let entry = self.store.entry(entry_id)?;
        let label = ViewEngine::label_for(&self.store, entry)?;
        let cell = grid::cell_for(entry.day, &entry.time_slot).ok()?;
        Some(EntryDetail {
            entry_id,
            label,
            cell,
            day: cell.day.label().to_string(),
            time_slot: cell.slot.label(),
            in_conflict: self.overlay.involves(entry_id),
        })
    }

    /// Filter selector options for the current view mode.
    pub fn filter_options(&self) -> Vec<FilterOption> {
        ViewEngine::filter_options(&self.store, self.view.mode)
    }

    /// Takes the pending notices.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    pub fn overlay(&self) -> &ConflictOverlay {
        &self.overlay
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notices.push(Notice::new(level, message));
    }

    fn slot(&self, domain: Domain) -> &DomainSlot {
        &self.slots[domain as usize]
    }

    fn slot_mut(&mut self, domain: Domain) -> &mut DomainSlot {
        &mut self.slots[domain as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ActionResponse, ApiError, ConflictResponse, LocalApi};
    use crate::grid::{Day, TimeSlot};
    use crate::models::ConflictPair;
    use serde_json::json;

    fn teachers() -> Value {
        json!([
            {"id": 5, "name": "Zhang Wei", "title": "Professor"},
            {"id": 6, "name": "Li Na"}
        ])
    }

    fn classrooms() -> Value {
        json!([{"id": 2, "name": "A-101", "capacity": 60, "building": "A"}])
    }

    fn courses() -> Value {
        json!([{"id": 9, "name": "Calculus", "code": "MA101", "credits": 4.0, "hours": 64}])
    }

    fn entries(ids: &[EntityId]) -> Value {
        Value::Array(
            ids.iter()
                .map(|id| {
                    json!({
                        "id": id,
                        "course_id": 9,
                        "teacher_id": 5,
                        "classroom_id": 2,
                        "day": 1,
                        "time_slot": "S1"
                    })
                })
                .collect(),
        )
    }

    fn local_api(schedule: Value) -> LocalApi {
        LocalApi::new()
            .with_list(Domain::Teachers, teachers())
            .with_list(Domain::Classrooms, classrooms())
            .with_list(Domain::Courses, courses())
            .with_list(Domain::Schedule, schedule)
    }

    fn mon_s1() -> CellAddress {
        CellAddress::new(Day::Monday, TimeSlot::S1)
    }

    #[tokio::test]
    async fn test_load_places_and_checks() {
        let mut ctl = ScheduleController::new(local_api(entries(&[1])));
        ctl.load().await;

        assert_eq!(ctl.load_state(), LoadState::Ready);
        assert_eq!(ctl.placement().placed_count(), 1);
        assert_eq!(ctl.placement().entries_at(mon_s1()).len(), 1);
        assert_eq!(ctl.api().conflict_calls(), 1);

        let snap = ctl.snapshot();
        assert_eq!(snap.conflict_status, ConflictStatus::CheckedEmpty);
        assert_eq!(snap.counts.teachers, 2);
        assert_eq!(snap.counts.placed, 1);
    }

    #[tokio::test]
    async fn test_filter_scenario() {
        let mut ctl = ScheduleController::new(local_api(entries(&[1])));
        ctl.load().await;

        ctl.set_filter(Some(6));
        assert_eq!(ctl.placement().placed_count(), 0);
        ctl.set_filter(None);
        assert_eq!(ctl.placement().placed_count(), 1);
    }

    #[test]
    fn test_partial_load_not_rendered() {
        let mut ctl = ScheduleController::new(LocalApi::new());
        let tickets = Domain::ALL.map(|d| ctl.begin_fetch(d));

        ctl.complete_fetch(tickets[3], Ok(entries(&[1])));
        ctl.complete_fetch(tickets[0], Ok(teachers()));
        ctl.complete_fetch(tickets[1], Ok(classrooms()));
        assert_eq!(ctl.load_state(), LoadState::Loading);
        assert!(!ctl.can_render());
        assert_eq!(ctl.placement().placed_count(), 0);

        ctl.complete_fetch(tickets[2], Ok(courses()));
        assert_eq!(ctl.load_state(), LoadState::Ready);
        assert_eq!(ctl.placement().placed_count(), 1);
    }

    #[test]
    fn test_stale_response_discarded() {
        let mut ctl = ScheduleController::new(LocalApi::new());
        for d in [Domain::Teachers, Domain::Classrooms, Domain::Courses] {
            let t = ctl.begin_fetch(d);
            let body = match d {
                Domain::Teachers => teachers(),
                Domain::Classrooms => classrooms(),
                _ => courses(),
            };
            ctl.complete_fetch(t, Ok(body));
        }

        let n = ctl.begin_fetch(Domain::Schedule);
        let n1 = ctl.begin_fetch(Domain::Schedule);
        assert_eq!(n1.seq, n.seq + 1);

        assert_eq!(ctl.complete_fetch(n1, Ok(entries(&[2, 3]))), FetchOutcome::Applied);
        assert_eq!(ctl.complete_fetch(n, Ok(entries(&[1]))), FetchOutcome::Stale);

        let ids: Vec<_> = ctl.store().entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 3]);
        assert_eq!(ctl.placement().placed_count(), 2);
    }

    #[tokio::test]
    async fn test_view_change_during_refresh_uses_current_snapshot() {
        let mut ctl = ScheduleController::new(local_api(entries(&[1])));
        ctl.load().await;

        let ticket = ctl.begin_fetch(Domain::Schedule);
        assert_eq!(ctl.load_state(), LoadState::Loading);

        ctl.set_filter(Some(6));
        assert_eq!(ctl.placement().placed_count(), 0);
        ctl.set_filter(Some(5));
        assert_eq!(ctl.placement().placed_count(), 1);

        ctl.complete_fetch(ticket, Ok(entries(&[1, 2])));
        assert_eq!(ctl.placement().placed_count(), 2);
    }

    #[tokio::test]
    async fn test_view_changes_do_not_fetch() {
        let mut ctl = ScheduleController::new(local_api(entries(&[1, 2])));
        ctl.load().await;

        ctl.set_view(ViewMode::Classroom);
        ctl.set_filter(Some(2));
        ctl.set_view(ViewMode::Course);
        ctl.set_conflict_visible(false);
        ctl.set_empty_visible(false);

        for d in Domain::ALL {
            assert_eq!(ctl.api().list_calls(d), 1);
        }
        assert_eq!(ctl.api().conflict_calls(), 1);
        assert_eq!(ctl.view().filter, None);
        assert_eq!(ctl.placement().placed_count(), 2);
    }

    #[tokio::test]
    async fn test_conflict_toggle_reproduces_marks() {
        let api = local_api(entries(&[1, 2])).with_conflicts(vec![ConflictPair::new(1, "S1", 1, 2)]);
        let mut ctl = ScheduleController::new(api);
        ctl.load().await;

        let before = ctl.snapshot();
        assert_eq!(before.conflict_count, 1);
        assert_eq!(before.highlighted, BTreeSet::from([mon_s1()]));

        ctl.set_conflict_visible(false);
        assert!(ctl.snapshot().highlighted.is_empty());
        assert!(!ctl.grid_view().cell(mon_s1()).highlighted);

        ctl.set_conflict_visible(true);
        assert_eq!(ctl.snapshot().highlighted, before.highlighted);
        assert_eq!(ctl.api().conflict_calls(), 1);
        assert!(ctl.entry_detail(1).unwrap().in_conflict);
    }

    #[tokio::test]
    async fn test_first_failure_retained() {
        let api = local_api(entries(&[1]));
        api.set_list(Domain::Teachers, Err(ApiError::Network("offline".into())));
        api.set_list(
            Domain::Classrooms,
            Err(ApiError::Server {
                status: 500,
                message: "boom".into(),
            }),
        );
        let mut ctl = ScheduleController::new(api);
        ctl.load().await;

        match ctl.load_state() {
            LoadState::Error(ScheduleError::FetchFailure { domain, .. }) => {
                assert_eq!(domain, Domain::Teachers)
            }
            other => panic!("unexpected state: {other:?}"),
        }
        assert_eq!(ctl.api().conflict_calls(), 0);
        assert_eq!(ctl.placement().placed_count(), 0);
        let notices = ctl.drain_notices();
        assert_eq!(
            notices.iter().filter(|n| n.level == NoticeLevel::Error).count(),
            2
        );

        ctl.api().set_list(Domain::Teachers, Ok(teachers()));
        ctl.invalidate(Domain::Teachers).await;
        match ctl.load_state() {
            LoadState::Error(ScheduleError::FetchFailure { domain, .. }) => {
                assert_eq!(domain, Domain::Classrooms)
            }
            other => panic!("unexpected state: {other:?}"),
        }

        ctl.api().set_list(Domain::Classrooms, Ok(classrooms()));
        ctl.invalidate(Domain::Classrooms).await;
        assert_eq!(ctl.load_state(), LoadState::Ready);
        assert_eq!(ctl.placement().placed_count(), 1);
        assert_eq!(ctl.api().conflict_calls(), 1);
    }

    #[tokio::test]
    async fn test_malformed_schedule_is_empty() {
        let mut ctl = ScheduleController::new(local_api(json!({"detail": "oops"})));
        ctl.load().await;

        assert_eq!(ctl.load_state(), LoadState::Ready);
        assert!(ctl.store().entries().is_empty());
        let notices = ctl.drain_notices();
        assert!(notices.iter().any(|n| n.level == NoticeLevel::Warning
            && n.message.contains("malformed schedule response")));
        assert!(ctl.drain_notices().is_empty());
    }

    #[tokio::test]
    async fn test_bad_records_keep_valid_siblings() {
        let body = json!([
            {"id": 1, "course_id": 9, "teacher_id": 5, "classroom_id": 2, "day": 1, "time_slot": "S1"},
            {"id": 2, "course_id": 9, "teacher_id": 5, "classroom_id": 2, "day": 2, "time_slot": 3},
            {"id": 3, "course_id": 9, "teacher_id": 5, "classroom_id": 2, "day": 3, "time_slot": {"p": 1}},
            {"id": 4, "course_id": 9, "teacher_id": 5, "classroom_id": 2, "day": 9, "time_slot": "S1"}
        ]);
        let api = local_api(body).with_list(
            Domain::Classrooms,
            json!([
                {"id": 2, "name": "A-101", "capacity": 60, "building": null},
                {"id": 3, "name": "B-204", "capacity": 30, "building": "B"}
            ]),
        );
        let mut ctl = ScheduleController::new(api);
        ctl.load().await;

        assert_eq!(ctl.load_state(), LoadState::Ready);
        assert_eq!(ctl.store().classrooms().len(), 2);
        assert_eq!(ctl.store().entries().len(), 3);
        assert_eq!(ctl.placement().placed_count(), 2);
        assert_eq!(
            ctl.placement().cell_of(2),
            Some(CellAddress::new(Day::Tuesday, TimeSlot::S3))
        );
        assert_eq!(ctl.placement().skipped.invalid_cell, 1);

        let warnings: Vec<_> = ctl
            .drain_notices()
            .into_iter()
            .filter(|n| n.level == NoticeLevel::Warning)
            .collect();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("malformed schedule response"));
        assert!(warnings[0].message.contains("skipped 1 of 4 records"));
    }

    #[tokio::test]
    async fn test_conflict_check_failure_is_unchecked() {
        let api = local_api(entries(&[1, 2])).with_conflicts(vec![ConflictPair::new(1, "S1", 1, 2)]);
        let mut ctl = ScheduleController::new(api);
        ctl.load().await;
        assert_eq!(ctl.overlay().status(), ConflictStatus::CheckedWithConflicts);

        ctl.api()
            .set_conflicts(Err(ApiError::Network("timeout".into())));
        let result = ctl.check_conflicts().await;
        assert_eq!(result.count, 0);
        assert!(result.marked_cells.is_empty());
        assert_eq!(ctl.overlay().status(), ConflictStatus::Unchecked);

        ctl.api().set_conflicts(Ok(ConflictResponse {
            success: false,
            data: Vec::new(),
            message: Some("database unavailable".into()),
        }));
        ctl.drain_notices();
        ctl.check_conflicts().await;
        assert_eq!(ctl.overlay().status(), ConflictStatus::Unchecked);
        assert_eq!(
            ctl.drain_notices(),
            vec![Notice::new(NoticeLevel::Error, "database unavailable")]
        );
    }

    #[tokio::test]
    async fn test_refresh_fetches_entries_only() {
        let mut ctl = ScheduleController::new(local_api(entries(&[1])));
        ctl.load().await;

        ctl.api().set_list(Domain::Schedule, Ok(entries(&[1, 2, 3])));
        ctl.refresh().await;

        assert_eq!(ctl.api().list_calls(Domain::Schedule), 2);
        assert_eq!(ctl.api().list_calls(Domain::Teachers), 1);
        assert_eq!(ctl.api().list_calls(Domain::Classrooms), 1);
        assert_eq!(ctl.api().list_calls(Domain::Courses), 1);
        assert_eq!(ctl.placement().placed_count(), 3);
        assert_eq!(ctl.api().conflict_calls(), 2);
    }

    #[tokio::test]
    async fn test_refresh_discards_conflicts_without_recheck() {
        let config = ViewerConfig::from_toml_str("[viewer]\ncheck_conflicts_on_refresh = false\n").unwrap();
        let api = local_api(entries(&[1, 2])).with_conflicts(vec![ConflictPair::new(1, "S1", 1, 2)]);
        let mut ctl = ScheduleController::with_config(api, &config);
        ctl.load().await;
        assert_eq!(ctl.overlay().status(), ConflictStatus::Unchecked);

        ctl.check_conflicts().await;
        assert_eq!(ctl.overlay().count(), 1);

        ctl.refresh().await;
        assert_eq!(ctl.overlay().status(), ConflictStatus::Unchecked);
        assert_eq!(ctl.snapshot().conflict_count, 0);
    }

    #[tokio::test]
    async fn test_auto_schedule_reloads_entries() {
        let mut ctl = ScheduleController::new(local_api(entries(&[])));
        ctl.load().await;
        ctl.api().set_auto_schedule(
            Ok(ActionResponse {
                success: true,
                message: None,
            }),
            Some(entries(&[7, 8])),
        );

        assert!(ctl.auto_schedule().await);
        assert_eq!(ctl.placement().placed_count(), 2);
        assert_eq!(ctl.api().list_calls(Domain::Schedule), 2);
        assert_eq!(ctl.api().list_calls(Domain::Teachers), 1);
        assert!(ctl
            .drain_notices()
            .iter()
            .any(|n| n.level == NoticeLevel::Success));
    }

    #[tokio::test]
    async fn test_auto_schedule_failure_skips_refresh() {
        let mut ctl = ScheduleController::new(local_api(entries(&[1])));
        ctl.load().await;
        ctl.api().set_auto_schedule(
            Ok(ActionResponse {
                success: false,
                message: Some("no free classroom".into()),
            }),
            None,
        );

        assert!(!ctl.auto_schedule().await);
        assert_eq!(ctl.api().list_calls(Domain::Schedule), 1);
        assert!(ctl
            .drain_notices()
            .contains(&Notice::new(NoticeLevel::Error, "no free classroom")));
    }

    #[tokio::test]
    async fn test_entry_detail() {
        let body = json!([
            {"id": 1, "course_id": 9, "teacher_id": 5, "classroom_id": 2, "day": 3, "time_slot": "S2"},
            {"id": 2, "course_id": 9, "teacher_id": 99, "classroom_id": 2, "day": 3, "time_slot": "S2"}
        ]);
        let mut ctl = ScheduleController::new(local_api(body));
        ctl.load().await;

        let detail = ctl.entry_detail(1).unwrap();
        assert_eq!(detail.label.teacher, "Zhang Wei");
        assert_eq!(detail.day, "Wed");
        assert_eq!(detail.time_slot, "S2 (10:00-11:40)");
        assert!(!detail.in_conflict);

        assert!(ctl.entry_detail(2).is_none());
        assert!(ctl.entry_detail(42).is_none());
    }

    #[tokio::test]
    async fn test_filter_options_follow_view() {
        let mut ctl = ScheduleController::new(local_api(entries(&[])));
        ctl.load().await;

        assert_eq!(ctl.filter_options().len(), 2);
        ctl.set_view(ViewMode::Classroom);
        assert_eq!(ctl.filter_options()[0].name, "A-101");
        ctl.set_view(ViewMode::Course);
        assert!(ctl.filter_options().is_empty());
    }

    #[tokio::test]
    async fn test_config_initial_view() {
        let config = ViewerConfig::from_toml_str("[viewer]\ndefault_view = \"course\"\nshow_empty = false\n").unwrap();
        let mut ctl = ScheduleController::with_config(local_api(entries(&[1])), &config);
        ctl.load().await;

        assert_eq!(ctl.view().mode, ViewMode::Course);
        let grid = ctl.grid_view();
        assert_eq!(grid.visible_cells().count(), 1);
    }
}
