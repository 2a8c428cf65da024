//! Run parameters.
//!
//! Parameters start from built-in defaults and can be overridden by a JSON
//! object file:
//!
//! ```json
//! { "delimiter": ";" }
//! ```
//!
//! | Parameter     | Default | Description |
//! |---------------|---------|-------------|
//! | `delimiter`   | `,`     | Field separator used when parsing the gene matrix |
//! | `random_seed` | `4711`  | Recorded for reproducibility, always set by the run |

pub mod parameters;

pub use parameters::{ConfigError, Parameters, RANDOM_SEED};
