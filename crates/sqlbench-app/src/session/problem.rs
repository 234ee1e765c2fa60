//! ProblemSession - controller for one open practice problem
//!
//! Owns the draft, the per-action result slots, hint/solution state, the
//! schema and the next-problem pointer. All of it is reinitialized whenever
//! the problem id changes; the draft cell and the shortcut listener survive
//! for as long as the session stays mounted.

use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use sqlbench_core::{is_blank, GradeOutcome, Problem, Row, SchemaInfo};

use crate::request_gate::{RequestGate, RequestTicket};
use crate::shortcuts::{DraftShortcuts, ShortcutGuard, ShortcutRegistry};

use super::slot::ActionSlot;

pub const EMPTY_RUN_MESSAGE: &str = "Please enter a SELECT query.";
pub const EMPTY_GRADE_MESSAGE: &str = "Please enter a SELECT query before grading.";

/// Outer state of the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum ProblemPhase {
    Loading,
    Ready,
    /// Terminal: the problem itself failed to load
    NotFound { message: String },
}

/// Tickets for the three fetches issued when a problem id becomes active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTickets {
    pub problem: RequestTicket,
    pub next_id: RequestTicket,
    pub schema: RequestTicket,
}

/// Hint verbs plus their visibility.
///
/// Once loaded, toggling only flips `visible`.
#[derive(Debug, Clone, Default)]
pub struct HintState {
    pub slot: ActionSlot<Vec<String>>,
    pub visible: bool,
}

/// What a hint toggle should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintToggle {
    /// Content already loaded; visibility flipped locally
    Toggled,
    /// A fetch is already in flight
    AlreadyLoading,
    /// Fetch the hint with this ticket
    Fetch(RequestTicket),
}

#[derive(Debug)]
pub struct ProblemSession {
    id: String,
    epoch: u64,
    pub phase: ProblemPhase,
    pub problem: Option<Problem>,
    pub next_id: Option<String>,
    pub schema: SchemaInfo,
    pub run: ActionSlot<Vec<Row>>,
    pub grade: ActionSlot<GradeOutcome>,
    pub hint: HintState,
    pub solution: ActionSlot<String>,
    use_starter_query: bool,
    load: RequestGate,
    next_gate: RequestGate,
    schema_gate: RequestGate,
    draft: watch::Sender<String>,
    _shortcuts: ShortcutGuard,
}

impl ProblemSession {
    /// Mount a session for `id` and install its shortcut listener.
    pub fn mount(
        id: impl Into<String>,
        epoch: u64,
        shortcuts: &ShortcutRegistry,
        use_starter_query: bool,
    ) -> (Self, LoadTickets) {
        let (draft, draft_rx) = watch::channel(String::new());
        let guard = shortcuts.install(DraftShortcuts::new(draft_rx));

        let mut session = Self {
            id: String::new(),
            epoch,
            phase: ProblemPhase::Loading,
            problem: None,
            next_id: None,
            schema: SchemaInfo::default(),
            run: ActionSlot::new(epoch),
            grade: ActionSlot::new(epoch),
            hint: HintState::default(),
            solution: ActionSlot::new(epoch),
            use_starter_query,
            load: RequestGate::new(epoch),
            next_gate: RequestGate::new(epoch),
            schema_gate: RequestGate::new(epoch),
            draft,
            _shortcuts: guard,
        };
        let tickets = session.reset_for(id, epoch);
        (session, tickets)
    }

    /// Switch to another problem id: every transient field is dropped and
    /// every outstanding ticket becomes stale.
    pub fn reset_for(&mut self, id: impl Into<String>, epoch: u64) -> LoadTickets {
        self.id = id.into();
        self.epoch = epoch;
        self.phase = ProblemPhase::Loading;
        self.problem = None;
        self.next_id = None;
        self.schema = SchemaInfo::default();
        self.run.reset(epoch);
        self.grade.reset(epoch);
        self.hint.slot.reset(epoch);
        self.hint.visible = false;
        self.solution.reset(epoch);
        self.load.reset(epoch);
        self.next_gate.reset(epoch);
        self.schema_gate.reset(epoch);
        self.draft.send_replace(String::new());

        info!("Loading problem '{}' (epoch {})", self.id, epoch);
        LoadTickets {
            problem: self.load.issue(),
            next_id: self.next_gate.issue(),
            schema: self.schema_gate.issue(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_ready(&self) -> bool {
        self.phase == ProblemPhase::Ready
    }

    // ─────────────────────────────────────────────────────────
    // Loading
    // ─────────────────────────────────────────────────────────

    /// Apply the problem fetch. Returns false for a stale ticket.
    pub fn problem_loaded(
        &mut self,
        ticket: RequestTicket,
        result: std::result::Result<Problem, String>,
    ) -> bool {
        if !self.load.is_current(ticket) {
            debug!("Discarding stale problem response for '{}'", self.id);
            return false;
        }
        match result {
            Ok(problem) => {
                let draft = match (&problem.starter_sql, self.use_starter_query) {
                    (Some(starter), true) => starter.clone(),
                    _ => String::new(),
                };
                self.draft.send_replace(draft);
                self.run.reset(self.epoch);
                self.grade.reset(self.epoch);
                self.hint.slot.reset(self.epoch);
                self.hint.visible = false;
                self.solution.reset(self.epoch);
                self.problem = Some(problem);
                self.phase = ProblemPhase::Ready;
                info!("Problem '{}' ready", self.id);
            }
            Err(message) => {
                warn!("Problem '{}' failed to load: {}", self.id, message);
                self.next_gate.invalidate();
                self.schema_gate.invalidate();
                self.phase = ProblemPhase::NotFound { message };
            }
        }
        true
    }

    /// Tolerated: a failed lookup arrives here as `None`.
    pub fn next_id_loaded(&mut self, ticket: RequestTicket, next_id: Option<String>) -> bool {
        if !self.next_gate.is_current(ticket) {
            debug!("Discarding stale next-id response");
            return false;
        }
        self.next_id = next_id;
        true
    }

    /// Tolerated: a failed lookup arrives here as an empty schema.
    pub fn schema_loaded(&mut self, ticket: RequestTicket, schema: SchemaInfo) -> bool {
        if !self.schema_gate.is_current(ticket) {
            debug!("Discarding stale schema response");
            return false;
        }
        self.schema = schema;
        true
    }

    // ─────────────────────────────────────────────────────────
    // Draft
    // ─────────────────────────────────────────────────────────

    /// Current draft text
    pub fn draft(&self) -> String {
        self.draft.borrow().clone()
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft.send_replace(text.into());
    }

    /// Auto-format the draft in place
    pub fn format_draft(&mut self) {
        let formatted = sqlbench_core::format_sql(&self.draft.borrow());
        self.draft.send_replace(formatted);
    }

    // ─────────────────────────────────────────────────────────
    // Actions
    // ─────────────────────────────────────────────────────────

    /// Start a run. `None` means it was refused locally.
    pub fn start_run(&mut self) -> Option<(RequestTicket, String)> {
        let sql = self.draft();
        if is_blank(&sql) {
            self.run.reject(EMPTY_RUN_MESSAGE);
            return None;
        }
        Some((self.run.begin(), sql))
    }

    pub fn start_grade(&mut self) -> Option<(RequestTicket, String)> {
        let sql = self.draft();
        if is_blank(&sql) {
            self.grade.reject(EMPTY_GRADE_MESSAGE);
            return None;
        }
        Some((self.grade.begin(), sql))
    }

    pub fn toggle_hint(&mut self) -> HintToggle {
        if self.hint.slot.value().is_some() {
            self.hint.visible = !self.hint.visible;
            return HintToggle::Toggled;
        }
        if self.hint.slot.is_pending() {
            return HintToggle::AlreadyLoading;
        }
        self.hint.visible = true;
        HintToggle::Fetch(self.hint.slot.begin())
    }

    /// Each trigger re-fetches and replaces the previous solution
    pub fn start_solution(&mut self) -> RequestTicket {
        self.solution.begin()
    }

    /// Hint visible with content
    pub fn hint_shown(&self) -> Option<&[String]> {
        match self.hint.slot.value() {
            Some(verbs) if self.hint.visible => Some(verbs),
            _ => None,
        }
    }
}
