use rand::Rng;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

const TOKEN_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const TOKEN_LENGTH: usize = 6;

/// Counter code a beneficiary presents to the offerer.
///
/// Anyone holding the code can mark the booking as used, so `Debug` and `Display`
/// mask it. Serialization writes the real value; callers decide when to expose it.
#[derive(Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct BookingToken(String);

impl BookingToken {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Draw a fresh 6-character code
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let code = (0..TOKEN_LENGTH)
            .map(|_| TOKEN_ALPHABET[rng.gen_range(0..TOKEN_ALPHABET.len())] as char)
            .collect();
        Self(code)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BookingToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BookingToken(******)")
    }
}

impl fmt::Display for BookingToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "******")
    }
}

impl Serialize for BookingToken {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}
