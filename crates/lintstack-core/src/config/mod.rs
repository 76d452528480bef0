//! Configuration files for lintstack
//!
//! A config file carries the option tree and any extra fragments the user wants
//! appended after the generated ones:
//!
//! ```jsonc
//! {
//!   // domain options: false, true, or an object
//!   "options": {
//!     "typescript": true,
//!     "vue": { "a11y": true },
//!     "yaml": { "overrides": { "yml/plain-scalar": "off" } }
//!   },
//!   "fragments": [
//!     { "name": "user/scripts", "files": ["scripts/**"], "rules": { "no-console": "off" } }
//!   ]
//! }
//! ```
//!
//! Supported files, searched upward from the start directory:
//! `.lintstackrc.json`, `lintstack.json`, `lintstack.jsonc`, `lintstack.yaml`,
//! `lintstack.yml` and `lintstack.toml`.

mod loader;

pub use loader::{CONFIG_FILE_NAMES, ConfigFile, ConfigLoader};
