pub mod context;
pub mod editing;
pub mod format;
pub mod io;
pub mod keys;
pub mod rewriter;
pub mod timestamp;

// Re-export key types for easier usage
pub use context::TimeBullets;
pub use editing::{Cursor, Document, DocumentAccess, LineEdit, Marker};
pub use format::{FormatError, ParseError, TimeFormat};
pub use keys::{Key, KeyEvent, Modifiers, Trigger};
pub use rewriter::TRIGGER_TOKEN;
pub use timestamp::{Clock, FixedClock, INVALID_FORMAT_TEXT, SystemClock, generate_timestamp};
pub use time_bullet_config::Config;
