//! MissionRDM Game Engine
//!
//! Platform-agnostic core logic for the MissionRDM narrative escape room.
//! This crate provides the per-level progression machines, the shared
//! session state, and hint-step inference without UI or platform-specific
//! dependencies: rendering, audio, localization, and network persistence
//! stay behind small collaborator traits and side-effect descriptors.

pub mod calls;
pub mod effects;
pub mod hints;
pub mod leaderboard;
pub mod levels;
pub mod session;
pub mod state;

// Re-export commonly used types
pub use calls::{CallBoard, CallDirection, Character, mark_called};
pub use effects::{
    CallScript, DelayedEffect, DelayedRequest, ErrorOverlay, FEEDBACK_EXPIRY_MS, FeedbackKind,
    MessageNote, OverlayContent, OverlayNote, SideEffect, SoundId,
};
pub use hints::{StepLabel, current_step, hint_key, solution_key};
pub use leaderboard::{LeaderboardError, MemoryLeaderboard, SessionId};
pub use levels::{ElementId, LevelLogic, logic_for};
pub use session::{CompletionData, GameSession, SystemClock};
pub use state::{Flag, LevelId, Locale, Scenario, SessionState};

/// Trait for the external leaderboard/session service.
/// Platform-specific implementations should provide this; writes are
/// best-effort and must never gate game progress.
pub trait Leaderboard {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Create a server-side session for a player.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be created.
    fn create_session(&mut self, player_name: &str) -> Result<leaderboard::SessionId, Self::Error>;

    /// Record a level completion time, in milliseconds.
    ///
    /// # Errors
    ///
    /// Returns an error if the time cannot be recorded.
    fn save_level_time(
        &mut self,
        session: &leaderboard::SessionId,
        level: state::LevelId,
        time_spent_ms: u64,
    ) -> Result<(), Self::Error>;

    /// Running average completion time for a level, if any run was recorded.
    ///
    /// # Errors
    ///
    /// Returns an error if the average cannot be read.
    fn average_time(&self, level: state::LevelId) -> Result<Option<u64>, Self::Error>;
}

/// Source of "now" for level timing. Swappable for tests.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Optional external countdown/stopwatch whose reading wins over the
/// wall-clock delta when a level completes.
pub trait GameTimer {
    fn elapsed_seconds(&self) -> u64;
}
