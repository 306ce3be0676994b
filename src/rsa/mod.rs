// RSA Module - Main module file
// Exports key generation, the text codec, and the encrypt/decrypt pipeline

pub mod bigint;
pub mod cipher;
pub mod codec;
pub mod keygen;
pub mod prime;

pub use cipher::{decrypt, encrypt, Sealed};
pub use keygen::{KeyPair, PUBLIC_EXPONENT};
