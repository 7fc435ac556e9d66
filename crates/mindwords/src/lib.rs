//! Mindwords library - word-guessing sessions over remote word services
//!
//! # Architecture
//!
//! - **Round engine**: [`mindwords_round`], pure and synchronous
//! - **Session**: level, total and solved counters across rounds
//! - **Services**: random words, tips and the dreamlo leaderboard over HTTP
//! - **Driver**: async fetches with generation-tagged results
//! - **Play**: line-oriented terminal front end
//!
//! # Example
//!
//! ```
//! use mindwords::{MemoryStore, Session, SessionEvent, WordDelivery};
//! use mindwords_round::RoundRules;
//!
//! let mut session = Session::new(MemoryStore::new(), RoundRules::default());
//! let request = session.request_word();
//! assert_eq!(
//!     session.receive_word(request.generation, Ok("hello".to_string())),
//!     WordDelivery::Started
//! );
//!
//! let turn = session.guess("hello").expect("Active round");
//! assert!(matches!(turn.events[0], SessionEvent::Solved { score: 100, .. }));
//! assert_eq!(session.level().get(), 2);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod driver;
mod levels;
mod play;
mod services;
mod session;
mod store;

// Crate-level exports - Configuration
pub use config::{AppConfig, ConfigError, DREAMLO_PRIVATE_ENV, DREAMLO_PUBLIC_ENV, NINJAS_KEY_ENV};

// Crate-level exports - Levels
pub use levels::{LengthRange, Level};

// Crate-level exports - Local store
pub use store::{FileStore, LocalStore, MemoryStore, StoreError};

// Crate-level exports - Services
pub use services::{
    DEFAULT_PLAYER_NAME, DatamuseTipClient, DreamloClient, Leaderboard, LeaderboardError,
    MAX_NAME_LEN, RandomWordClient, ScoreRow, Tip, TipSource, WordSource, WordSourceError,
    WordSourceErrorKind, fetch_word_with_retries, http_client, parse_leaderboard, rank_scores,
    sanitize_name,
};

// Crate-level exports - Session
pub use session::{
    Session, SessionError, SessionEvent, SessionPhase, Turn, WordDelivery, WordRequest,
};

// Crate-level exports - Driver
pub use driver::{Applied, DriverMessage, GameDriver};

// Crate-level exports - Terminal front end
pub use play::{
    CommandError, HELP, PlayerCommand, format_board, format_status, guess_problem,
    parse_command, run_play,
};
