//! Generation of random part boundaries.

/// Generate a fresh boundary token.
///
/// The token is shaped like a version 4 UUID (8-4-4-4-12 lowercase hex
/// groups, version and variant bits forced) so that it is unlikely to occur
/// inside part content, but it makes no uniqueness or security guarantees
/// beyond that.
pub(crate) fn generate() -> String {
    generate_with(&mut fastrand::Rng::new())
}

fn generate_with(rng: &mut fastrand::Rng) -> String {
    format!(
        "{:04x}{:04x}-{:04x}-{:04x}-{:04x}-{:04x}{:04x}{:04x}",
        rng.u16(..),
        rng.u16(..),
        rng.u16(..),
        (rng.u16(..) & 0x0fff) | 0x4000,
        (rng.u16(..) & 0x3fff) | 0x8000,
        rng.u16(..),
        rng.u16(..),
        rng.u16(..),
    )
}
