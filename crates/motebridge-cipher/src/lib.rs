//! Extension-register obfuscation.
//!
//! Once the host writes a 16-byte key into the extension's key registers and
//! enables encryption, every extension byte leaving the emulated device is
//! transformed with a per-connection [`CipherState`]:
//!
//! ```text
//! encode: out = (plain - mask[(addr + i) % 8]) ^ shift[(addr + i) % 8]
//! decode: out = (cipher ^ shift[(addr + i) % 8]) + mask[(addr + i) % 8]
//! ```
//!
//! All arithmetic wraps. The state is derived from the key with a set of
//! answer and substitution tables ([`CipherTables`]). The first ten key bytes,
//! read in reverse, act as a random seed; the last six, also reversed, are a
//! check value. Derivation searches the seven answer rows for one whose
//! generated check value matches and builds the state from that row.
//!
//! ```
//! use motebridge_cipher::CipherTables;
//!
//! let tables = CipherTables::builtin();
//! let key = tables.key_material([1, 2, 3, 4, 5, 6, 7, 8, 9, 10], 3);
//! let state = tables.derive(&key).ok_or("underivable key")?;
//!
//! let mut buf = *b"extension bytes!";
//! state.encode(&mut buf, 0x08);
//! state.decode(&mut buf, 0x08);
//! assert_eq!(&buf, b"extension bytes!");
//! # Ok::<(), &'static str>(())
//! ```

#![deny(static_mut_refs)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod state;
pub mod tables;

pub use error::CipherError;
pub use state::CipherState;
pub use tables::{ANSWER_ROWS, CipherTables, KEY_LEN, RAW_LEN, SBOX_COUNT};

/// Derive a cipher state from key material using the built-in tables.
///
/// Returns `None` when no answer row matches the key's check value.
pub fn derive(key: &[u8; KEY_LEN]) -> Option<CipherState> {
    CipherTables::builtin().derive(key)
}
