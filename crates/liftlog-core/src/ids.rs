//! ID prefix constants.
//!
//! IDs are generated by the store as `{prefix}-{16 lowercase hex chars}`.

/// Prefix for workout log entries.
pub const PREFIX_WORKOUT: &str = "wkl";

/// Number of random bytes behind each generated ID.
pub const ID_RANDOM_BYTES: usize = 8;

/// Every prefix the store may be asked to generate.
pub const ALL_PREFIXES: &[&str] = &[PREFIX_WORKOUT];

/// Check that `id` has the `{prefix}-{hex}` shape produced by the store.
#[must_use]
pub fn is_well_formed(id: &str, prefix: &str) -> bool {
    id.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
        .is_some_and(|hex| {
            hex.len() == ID_RANDOM_BYTES * 2
                && hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_store_shaped_ids() {
        assert!(is_well_formed("wkl-00ff12ab34cd56ef", PREFIX_WORKOUT));
    }

    #[test]
    fn rejects_wrong_prefix_or_length() {
        assert!(!is_well_formed("tsk-00ff12ab34cd56ef", PREFIX_WORKOUT));
        assert!(!is_well_formed("wkl-00ff12ab", PREFIX_WORKOUT));
        assert!(!is_well_formed("wkl00ff12ab34cd56ef", PREFIX_WORKOUT));
        assert!(!is_well_formed("wkl-00FF12AB34CD56EF", PREFIX_WORKOUT));
    }
}
