//! Level session coordination: timing, completion, and level hand-off.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::calls::Character;
use crate::effects::{DelayedRequest, SideEffect};
use crate::hints::{self, StepLabel};
use crate::leaderboard::SessionId;
use crate::levels::{self, ElementId};
use crate::state::{LevelId, Locale, SessionState};
use crate::{Clock, GameTimer, Leaderboard};

/// Result of finishing a level, kept on the state for the congrats screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionData {
    pub time_spent_ms: u64,
    pub average_ms: Option<u64>,
    /// Whether this run beat the running average. `None` without an average.
    pub is_above_average: Option<bool>,
}

/// Wall-clock source backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_millis() as u64)
    }
}

/// One playthrough: owns the per-level state and drives the six level
/// machines, finalizing timing and leaderboard writes when a level-complete
/// side effect comes back.
pub struct GameSession<L, C = SystemClock>
where
    L: Leaderboard,
    C: Clock,
{
    state: SessionState,
    leaderboard: L,
    clock: C,
    timer: Option<Box<dyn GameTimer>>,
    player_name: String,
    session_id: Option<SessionId>,
    finished: bool,
}

impl<L, C> GameSession<L, C>
where
    L: Leaderboard,
    C: Clock,
{
    #[must_use]
    pub fn new(locale: Locale, leaderboard: L, clock: C) -> Self {
        Self {
            state: SessionState::new(LevelId::One, locale),
            leaderboard,
            clock,
            timer: None,
            player_name: String::new(),
            session_id: None,
            finished: false,
        }
    }

    /// Register the player with the leaderboard collaborator. Without this
    /// (or on failure) the game still runs; completion data just stays
    /// local.
    ///
    /// # Errors
    ///
    /// Returns the collaborator's error when the session cannot be created.
    pub fn register_player(&mut self, name: &str) -> Result<SessionId, L::Error> {
        let id = self.leaderboard.create_session(name)?;
        self.player_name = name.to_string();
        self.session_id = Some(id.clone());
        Ok(id)
    }

    /// Inject an external timer whose reading takes precedence over the
    /// wall-clock delta when a level completes.
    pub fn set_timer(&mut self, timer: Box<dyn GameTimer>) {
        self.timer = Some(timer);
    }

    /// Reset state for the given level and start its clock.
    pub fn start_level(&mut self, level: LevelId) {
        self.state.level = level;
        self.state.reset_after_level();
        self.state.level_start_ms = Some(self.clock.now_ms());
        self.finished = false;
    }

    pub fn submit_code(&mut self, code: &str) -> Vec<SideEffect> {
        let effects = levels::submit_code(&mut self.state, code);
        self.post_process(&effects);
        effects
    }

    pub fn click_element(&mut self, element: ElementId) -> Vec<SideEffect> {
        let effects = levels::click_element(&mut self.state, element);
        self.post_process(&effects);
        effects
    }

    pub fn call_character(&mut self, who: Character) -> Vec<SideEffect> {
        let effects = levels::call_character(&mut self.state, who);
        self.post_process(&effects);
        effects
    }

    /// Answer whichever mandatory call is pending, if any.
    pub fn answer_pending_call(&mut self) -> Vec<SideEffect> {
        match self.state.calls.pending_character() {
            Some(who) => self.call_character(who),
            None => Vec::new(),
        }
    }

    /// Fire a cooperative timer scheduled by an earlier effect. Requests
    /// from a previous session generation are dropped.
    pub fn fire_delayed(&mut self, request: &DelayedRequest) -> Vec<SideEffect> {
        if request.generation != self.state.generation {
            log::debug!(
                "dropping stale delayed effect (generation {} != {})",
                request.generation,
                self.state.generation
            );
            return Vec::new();
        }
        levels::apply_delayed(&mut self.state, &request.effect)
    }

    /// External trigger from the riddle widget.
    pub fn mark_riddle_solved(&mut self) {
        levels::mark_riddle_solved(&mut self.state);
    }

    pub fn mark_message_read(&mut self) {
        self.state.mark_message_read();
    }

    pub fn end_call(&mut self) {
        self.state.active_call = None;
    }

    /// Close the congrats screen and move to the next level's fresh state.
    /// Returns the new level, or `None` once the game is over. The next
    /// level's clock starts on [`Self::start_level`].
    pub fn advance_level(&mut self) -> Option<LevelId> {
        self.state.congrats_open = false;
        let next = self.state.level.next();
        self.state.reset_after_level();
        match next {
            Some(level) => {
                self.state.level = level;
                Some(level)
            }
            None => {
                self.finished = true;
                None
            }
        }
    }

    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    #[must_use]
    pub fn current_step(&self) -> StepLabel {
        hints::current_step(&self.state)
    }

    #[must_use]
    pub fn hint_key(&self) -> String {
        hints::hint_key(&self.state)
    }

    #[must_use]
    pub fn solution_key(&self) -> String {
        hints::solution_key(&self.state)
    }

    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    pub const fn state_mut(&mut self) -> &mut SessionState {
        &mut self.state
    }

    #[must_use]
    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    #[must_use]
    pub const fn session_id(&self) -> Option<&SessionId> {
        self.session_id.as_ref()
    }

    /// Consume the session, returning the underlying state.
    #[must_use]
    pub fn into_state(self) -> SessionState {
        self.state
    }

    fn post_process(&mut self, effects: &[SideEffect]) {
        for effect in effects {
            if let SideEffect::CompleteLevel { level } = effect {
                self.finalize_completion(*level);
            }
        }
    }

    /// Compute the elapsed time (preferring the injected timer, at whole
    /// second granularity) and forward it to the leaderboard, best effort.
    /// Failures are logged and leave the average empty; they never block
    /// the completion flow.
    fn finalize_completion(&mut self, level: LevelId) {
        let Some(started) = self.state.level_start_ms else {
            log::debug!("level {level} completed without a started clock");
            return;
        };
        let elapsed_seconds = match &self.timer {
            Some(timer) => timer.elapsed_seconds(),
            None => {
                let delta = self.clock.now_ms().saturating_sub(started);
                (delta + 500) / 1_000
            }
        };
        let time_spent_ms = elapsed_seconds * 1_000;

        let mut completion = CompletionData {
            time_spent_ms,
            average_ms: None,
            is_above_average: None,
        };
        if let Some(session_id) = &self.session_id {
            match self
                .leaderboard
                .save_level_time(session_id, level, time_spent_ms)
            {
                Ok(()) => match self.leaderboard.average_time(level) {
                    Ok(average) => {
                        completion.average_ms = average;
                        completion.is_above_average =
                            average.map(|average| time_spent_ms < average);
                    }
                    Err(err) => {
                        log::warn!("failed to read level {level} average: {err}");
                    }
                },
                Err(err) => {
                    log::warn!("failed to record level {level} time: {err}");
                }
            }
        }
        self.state.completion = Some(completion);
    }
}
