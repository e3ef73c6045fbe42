//! Encryption of the serialized journal.
//!
//! Journals can optionally be sealed with AES-256-GCM under a key taken
//! directly from the user's password.
//!
//! # Module Structure
//!
//! - `cipher`: key derivation and the seal/open pair
//! - `password`: reading passwords from the terminal or a preset value
//!
//! # Example
//!
//! ```
//! use daybook::crypto::{open, seal, JournalKey};
//!
//! let key = JournalKey::from_password("correct horse");
//! let sealed = seal(&key, b"{\"days\":[]}")?;
//! let opened = open(&key, &sealed)?;
//! assert_eq!(opened, b"{\"days\":[]}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cipher;
pub mod password;

pub use self::cipher::{open, seal, JournalKey};
pub use self::password::{confirm_new_password, obtain_existing_key, obtain_new_key};
