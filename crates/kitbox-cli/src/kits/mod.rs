//! Kits bundled with the `kit` binary.
//!
//! - [`memkit`] -- remember short notes for the session.
//! - [`textkit`] -- small text transformations.

pub mod memkit;
pub mod textkit;

use kitbox_types::{Kit, Result};

/// Every bundled kit, in registration order.
pub fn bundled() -> Result<Vec<Kit>> {
    Ok(vec![memkit::kit()?, textkit::kit()?])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_kits_are_valid_and_unique() {
        let kits = bundled().unwrap();
        let ids: Vec<&str> = kits.iter().map(|k| k.id()).collect();
        assert_eq!(ids, vec!["memkit", "textkit"]);
        assert!(kits.iter().all(|k| !k.commands().is_empty()));
    }
}
