//! Random key generation for activation codes and generated passwords

use rand::{Rng, distributions::Alphanumeric};

/// Length of passwords generated by the reset flow
pub const GENERATED_PASSWORD_LENGTH: usize = 12;

/// Length of activation codes
pub const ACTIVATION_CODE_LENGTH: usize = 32;

/// Generate a random alphanumeric key of the given length
pub fn random_key(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}
