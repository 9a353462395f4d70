//! Engine controller implementation.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};

use log::{debug, warn};
use parking_lot::{Mutex, MutexGuard};

use crate::board::{GameKind, Rules, SearchLimits, SearchResult, SearchState};
use crate::game::Game;

/// Search thread stack size (32 MB)
const SEARCH_STACK_SIZE: usize = 32 * 1024 * 1024;

/// A search running on its own thread
pub struct SearchJob {
    stop: Arc<AtomicBool>,
    handle: JoinHandle<SearchResult>,
}

impl SearchJob {
    /// Ask the search to finish; the last completed iteration is kept
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Block until the search is done and return its result
    #[must_use]
    pub fn wait(self) -> SearchResult {
        match self.handle.join() {
            Ok(result) => result,
            Err(_) => {
                warn!("search thread panicked");
                SearchResult::default()
            }
        }
    }

    /// Signal stop and wait for the thread to finish
    #[must_use]
    pub fn stop_and_wait(self) -> SearchResult {
        self.stop();
        self.wait()
    }
}

/// Engine controller owning the game being played
pub struct Engine {
    game: Arc<Mutex<Game>>,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new(crate::tt::DEFAULT_TT_MB)
    }
}

impl Engine {
    #[must_use]
    pub fn new(tt_mb: usize) -> Self {
        let game = Game::with_search_state(
            Rules::Default,
            GameKind::Normal,
            SearchState::new(tt_mb),
        );
        Engine {
            game: Arc::new(Mutex::new(game)),
        }
    }

    /// Lock the game. Blocks while a search is running.
    pub fn game(&self) -> MutexGuard<'_, Game> {
        self.game.lock()
    }

    /// Lock the game only if no search holds it
    pub fn try_game(&self) -> Option<MutexGuard<'_, Game>> {
        self.game.try_lock()
    }

    pub fn new_game(&self, rules: Rules, kind: GameKind) {
        self.game.lock().restart(rules, kind);
    }

    /// Replace the transposition table with one of `mb` megabytes
    pub fn resize_hash(&self, mb: usize) {
        self.game.lock().search_state_mut().reset_tables(mb);
    }

    /// Start searching the current position. Nothing is played; the caller
    /// decides what to do with the result.
    ///
    /// Returns once the search thread holds the game, so a command issued
    /// after this call never runs ahead of the search.
    pub fn start_search(&self, limits: &SearchLimits) -> io::Result<SearchJob> {
        let stop = Arc::new(AtomicBool::new(false));
        let limits = limits.clone().with_stop(Arc::clone(&stop));
        let game = Arc::clone(&self.game);
        let (locked_tx, locked_rx) = mpsc::channel();

        let handle = thread::Builder::new()
            .name("search".to_string())
            .stack_size(SEARCH_STACK_SIZE)
            .spawn(move || {
                let mut guard = game.lock();
                let _ = locked_tx.send(());
                let result = guard.hint(&limits);
                debug!(
                    "search finished: depth {} score {} nodes {}",
                    result.depth, result.score, result.nodes
                );
                result
            })?;

        // Err only if the thread died before locking; wait() reports that
        let _ = locked_rx.recv();
        Ok(SearchJob { stop, handle })
    }

    /// Search on the worker thread and wait for the result
    pub fn think(&self, limits: &SearchLimits) -> io::Result<SearchResult> {
        Ok(self.start_search(limits)?.wait())
    }
}
