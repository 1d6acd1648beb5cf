pub mod cursor;
pub mod fingerprint;
