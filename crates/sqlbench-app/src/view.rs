//! Read-only projections of session state
//!
//! Views are derived purely from current state; nothing is cached between
//! derivations. Each is serializable so the headless driver can emit it as-is.

use serde::Serialize;

use sqlbench_core::{
    ActorSuggestion, ColumnDescriptor, DifficultyGroup, GradeOutcome, MovieSummary, Problem,
    ResultTable,
};

use crate::catalog::CatalogState;
use crate::session::{ProblemPhase, ProblemSession, SlotState};
use crate::suggestor::{DetailTarget, DetailView, MovieFilters, SuggestorSession};

/// Shown in place of columns for a table the schema lookup did not cover
pub const NO_SCHEMA_INFO: &str = "no schema info";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogView {
    pub groups: SlotState<Vec<DifficultyGroup>>,
}

impl CatalogView {
    pub fn derive(catalog: &CatalogState) -> Self {
        Self {
            groups: catalog.state.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSchemaView {
    pub name: String,
    pub columns: Vec<ColumnDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HintView {
    pub visible: bool,
    pub verbs: SlotState<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProblemView {
    pub id: String,
    #[serde(flatten)]
    pub phase: ProblemPhase,
    pub problem: Option<Problem>,
    pub draft: String,
    /// "Next" is disabled while this is absent
    pub next_id: Option<String>,
    pub schema: Vec<TableSchemaView>,
    pub run: SlotState<ResultTable>,
    pub grade: SlotState<GradeOutcome>,
    pub hint: HintView,
    pub solution: SlotState<String>,
}

impl ProblemView {
    pub fn derive(session: &ProblemSession) -> Self {
        let schema = session
            .problem
            .as_ref()
            .map(|problem| {
                problem
                    .tables
                    .iter()
                    .map(|table| {
                        let columns = session.schema.columns_for(table).to_vec();
                        let note = columns.is_empty().then_some(NO_SCHEMA_INFO);
                        TableSchemaView {
                            name: table.clone(),
                            columns,
                            note,
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            id: session.id().to_string(),
            phase: session.phase.clone(),
            problem: session.problem.clone(),
            draft: session.draft(),
            next_id: session.next_id.clone(),
            schema,
            run: session.run.state().map(|rows| ResultTable::derive(rows)),
            grade: session.grade.state().clone(),
            hint: HintView {
                visible: session.hint.visible,
                verbs: session.hint.slot.state().clone(),
            },
            solution: session.solution.state().clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActorSearchView {
    pub query: String,
    pub resolved_id: Option<String>,
    pub suggestions: Vec<ActorSuggestion>,
    pub open: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoviePageView {
    pub filters: MovieFilters,
    pub page: usize,
    pub items: Vec<MovieSummary>,
    pub has_more: bool,
    pub can_go_back: bool,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailPanelView {
    pub target: Option<DetailTarget>,
    pub view: Option<DetailView>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestorView {
    pub genres: Vec<String>,
    pub genre: Option<String>,
    pub year: Option<String>,
    pub actor: ActorSearchView,
    pub movies: MoviePageView,
    pub detail: DetailPanelView,
}

impl SuggestorView {
    pub fn derive(session: &SuggestorSession) -> Self {
        let search = &session.actor_search;
        let browser = &session.browser;
        let detail = &session.detail;
        Self {
            genres: session.genres().to_vec(),
            genre: session.genre.clone(),
            year: session.year.clone(),
            actor: ActorSearchView {
                query: search.query().to_string(),
                resolved_id: search.resolved_id().map(str::to_string),
                suggestions: search.suggestions().to_vec(),
                open: search.is_open(),
                error: search.error().map(str::to_string),
            },
            movies: MoviePageView {
                filters: browser.applied_filters().clone(),
                page: browser.page(),
                items: browser.items().to_vec(),
                has_more: browser.has_more(),
                can_go_back: browser.can_go_back(),
                loading: browser.is_loading(),
                error: browser.error().map(str::to_string),
            },
            detail: DetailPanelView {
                target: detail.target().cloned(),
                view: detail.view().cloned(),
                loading: detail.is_loading(),
                error: detail.error().map(str::to_string),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shortcuts::ShortcutRegistry;
    use serde_json::json;
    use sqlbench_core::{Difficulty, SchemaInfo};
    use std::collections::BTreeMap;

    fn problem() -> Problem {
        Problem {
            id: "p1".to_string(),
            title: "Top rated".to_string(),
            description: String::new(),
            difficulty: Difficulty::Easy,
            tables: vec!["title_basics".to_string(), "title_ratings".to_string()],
            starter_sql: None,
        }
    }

    #[test]
    fn test_missing_table_schema_is_annotated() {
        let registry = ShortcutRegistry::new();
        let (mut session, tickets) = ProblemSession::mount("p1", 1, &registry, false);
        session.problem_loaded(tickets.problem, Ok(problem()));

        let mut tables = BTreeMap::new();
        tables.insert(
            "title_basics".to_string(),
            vec![ColumnDescriptor {
                name: "tconst".to_string(),
                type_tag: "text".to_string(),
                nullable: false,
            }],
        );
        session.schema_loaded(tickets.schema, SchemaInfo::new(tables));

        let view = ProblemView::derive(&session);
        assert_eq!(view.schema.len(), 2);
        assert_eq!(view.schema[0].note, None);
        assert_eq!(view.schema[1].note, Some(NO_SCHEMA_INFO));
    }

    #[test]
    fn test_run_rows_project_to_table() {
        let registry = ShortcutRegistry::new();
        let (mut session, tickets) = ProblemSession::mount("p1", 1, &registry, false);
        session.problem_loaded(tickets.problem, Ok(problem()));
        session.set_draft("SELECT * FROM title_basics;");
        let (ticket, _) = session.start_run().unwrap();
        let row = json!({"tconst": "tt1", "primaryTitle": "Heat"});
        let serde_json::Value::Object(row) = row else {
            unreachable!()
        };
        session.run.complete(ticket, Ok(vec![row]));

        let view = ProblemView::derive(&session);
        let SlotState::Done { value: table } = view.run else {
            panic!("expected rows");
        };
        assert_eq!(table.columns, vec!["primaryTitle"]);
        assert_eq!(table.rows, vec![vec!["Heat".to_string()]]);
    }

    #[test]
    fn test_problem_view_serializes_phase_inline() {
        let registry = ShortcutRegistry::new();
        let (session, _) = ProblemSession::mount("p1", 1, &registry, false);
        let value = serde_json::to_value(ProblemView::derive(&session)).unwrap();
        assert_eq!(value["phase"], "loading");
        assert_eq!(value["run"]["status"], "idle");
    }
}
