//! Message types for the application (TEA pattern)

use sqlbench_core::{
    ActorDetail, ActorSuggestion, GradeOutcome, MovieDetail, MovieSummary, Problem, Row,
    SchemaInfo,
};

use crate::input_key::InputKey;
use crate::request_gate::RequestTicket;

/// Completion payload of a fallible request; errors travel as display text
pub type Fetched<T> = std::result::Result<T, String>;

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard accelerator
    Key(InputKey),

    /// Stop the engine
    Quit,

    // ─────────────────────────────────────────────────────────
    // Catalog Messages
    // ─────────────────────────────────────────────────────────
    /// (Re)load the problem list
    LoadCatalog,

    CatalogLoaded {
        ticket: RequestTicket,
        result: Fetched<Vec<Problem>>,
    },

    // ─────────────────────────────────────────────────────────
    // Problem Session Messages
    // ─────────────────────────────────────────────────────────
    /// Open a problem; mounts the problem session or switches its id
    OpenProblem { id: String },

    /// Unmount the problem session
    CloseProblem,

    ProblemLoaded {
        ticket: RequestTicket,
        result: Fetched<Problem>,
    },

    /// Tolerated lookup: failures arrive as `None`
    NextProblemIdLoaded {
        ticket: RequestTicket,
        next_id: Option<String>,
    },

    /// Tolerated lookup: failures arrive as an empty schema
    SchemaLoaded {
        ticket: RequestTicket,
        schema: SchemaInfo,
    },

    /// Replace the draft text
    EditDraft { text: String },

    /// Auto-format the draft
    FormatDraft,

    RunQuery,

    QueryFinished {
        ticket: RequestTicket,
        result: Fetched<Vec<Row>>,
    },

    GradeQuery,

    GradeFinished {
        ticket: RequestTicket,
        result: Fetched<GradeOutcome>,
    },

    ToggleHint,

    HintLoaded {
        ticket: RequestTicket,
        result: Fetched<Vec<String>>,
    },

    ShowSolution,

    SolutionLoaded {
        ticket: RequestTicket,
        result: Fetched<String>,
    },

    /// Follow the next-problem pointer, if any
    NextProblem,

    // ─────────────────────────────────────────────────────────
    // Suggestor Messages
    // ─────────────────────────────────────────────────────────
    /// Mount the suggestor session
    OpenSuggestor,

    /// Unmount the suggestor session
    CloseSuggestor,

    /// Tolerated lookup: failures arrive as an empty list
    GenresLoaded {
        ticket: RequestTicket,
        genres: Vec<String>,
    },

    /// Actor input edited
    ActorInput { text: String },

    /// Quiet period elapsed for the edit that issued `ticket`
    ActorLookupDue { ticket: RequestTicket },

    ActorSuggestionsLoaded {
        ticket: RequestTicket,
        result: Fetched<Vec<ActorSuggestion>>,
    },

    ActorFocus,

    ActorBlur,

    /// Blur grace delay elapsed
    ActorBlurElapsed { ticket: RequestTicket },

    SelectActorSuggestion { index: usize },

    /// `None` clears the filter
    SetGenre { genre: Option<String> },

    /// `None` clears the filter
    SetYear { year: Option<String> },

    SearchMovies,

    NextPage,

    PreviousPage,

    MoviesLoaded {
        ticket: RequestTicket,
        result: Fetched<Vec<MovieSummary>>,
    },

    OpenMovie { id: String },

    /// Drill from a cast member into their actor detail
    OpenActor { id: String },

    MovieLoaded {
        ticket: RequestTicket,
        result: Fetched<MovieDetail>,
    },

    ActorLoaded {
        ticket: RequestTicket,
        result: Fetched<ActorDetail>,
    },

    CloseDetail,
}
