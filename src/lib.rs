//! Keyboard-driven arithmetic calculator engine.
//!
//! The host renders the display and forwards key presses or button clicks;
//! this crate owns everything else:
//! - building the input expression with operator and decimal-point rules
//! - evaluating it with a dedicated arithmetic parser
//! - formatting results with thousand separators
//! - keeping a write-through history of successful calculations
//!
//! ```
//! use keycalc::{Calculator, Key, MemoryStore, StoreRepository};
//!
//! let mut calc = Calculator::new(StoreRepository::new(MemoryStore::new()));
//! for c in "1200*3".chars() {
//!     calc.press(&Key::Char(c));
//! }
//! calc.press(&Key::Enter);
//! assert_eq!(calc.view().result, "3,600");
//! ```

pub mod calculator;
pub mod config;
pub mod history;
pub mod keyboard;
pub mod keypad;
pub mod logging;
pub mod session;

pub use calculator::{CalcResult, ERROR_SENTINEL, EvalError, InputBuffer, evaluate_expression};
pub use config::{Config, ConfigError};
pub use history::{
    FileStore, HISTORY_KEY, History, HistoryEntry, HistoryError, HistoryRepository,
    KeyValueStore, MemoryStore, StoreRepository,
};
pub use keyboard::{Dispatch, Key, dispatch};
pub use keypad::{Button, KEYPAD};
pub use session::{Calculator, Command, Outcome, View};
