//! Command handlers.
//!
//! One module per subcommand. Handlers own the terminal output; the
//! counting semantics live in `headway-workers`.

pub mod cancel;
pub mod count;
pub mod observe;
pub mod quotes;
