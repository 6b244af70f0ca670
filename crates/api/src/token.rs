// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use leasehold_domain::InviteToken;

/// Generates a fresh invitation token.
///
/// The token is 256 bits of randomness rendered as 64 lowercase hex
/// characters.
#[must_use]
pub fn generate_invite_token() -> InviteToken {
    let token: String = format!(
        "{:016x}{:016x}{:016x}{:016x}",
        rand::random::<u64>(),
        rand::random::<u64>(),
        rand::random::<u64>(),
        rand::random::<u64>()
    );
    InviteToken::new(&token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_is_64_lowercase_hex_characters() {
        let token: InviteToken = generate_invite_token();

        assert_eq!(token.value().len(), 64);
        assert!(
            token
                .value()
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        );
    }

    #[test]
    fn test_tokens_differ() {
        assert_ne!(generate_invite_token(), generate_invite_token());
    }
}
