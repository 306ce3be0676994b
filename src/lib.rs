//! Textbook RSA over text files.
//!
//! Key-pair generation with Miller-Rabin prime search, a base64-backed
//! text codec, and raw-exponentiation encrypt/decrypt of one message at
//! a time.
//!
//! This is an educational implementation and is **not** a secure
//! encryption scheme: there is no padding (no OAEP or PKCS#1 v1.5), the
//! arithmetic is not constant-time, and the private exponent is written
//! to disk unencrypted. Do not use it to protect real data.

pub mod error;
pub mod rsa;
pub mod util;

pub use error::{CryptoError, KeyFileError};
pub use rsa::{decrypt, encrypt, KeyPair, Sealed};
