//! Room code generation.
//!
//! Codes are short strings two players exchange out of band (read aloud,
//! typed on a phone), so the alphabet is Crockford's Base32: no characters
//! that are easy to mishear or mistype.

use rand::distributions::Uniform;
use rand::prelude::*;
use rand::rngs::OsRng;

const CROCKFORD: &[u8] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ"; // no I, L, O, U
const CODE_LEN: usize = 6;

/// Generate a six-character room code.
pub fn generate_room_code() -> String {
    let mut rng = OsRng;
    let dist = Uniform::from(0..CROCKFORD.len());

    let mut code = String::with_capacity(CODE_LEN);
    for _ in 0..CODE_LEN {
        code.push(CROCKFORD[dist.sample(&mut rng)] as char);
    }
    code
}
