pub mod picker;

use anyhow::{Result, bail, ensure};

use self::picker::Picker;

/// Wrapper around the `termenu` picker that keeps the UX consistent across the
/// tool. Items are converted into `String`s so callers do not have to worry
/// about ownership.
pub fn choose_one<S: ToString>(title: &str, items: Vec<S>) -> Result<String> {
    let display_items: Vec<String> = items.into_iter().map(|s| s.to_string()).collect();
    ensure!(!display_items.is_empty(), "nothing to choose for '{title}'");

    match Picker::new(title, display_items).pick()? {
        Some(choice) => Ok(choice),
        None => bail!("No selection made"),
    }
}

/// Instance types offered when none was given.
///
/// Instance types are free-form, so this is a convenience list covering both
/// capability classes, not a whitelist.
pub fn instance_type_options() -> Vec<&'static str> {
    vec![
        "t2.medium",
        "t3.large",
        "m5.large",
        "m5.xlarge",
        "c5.xlarge",
        "p2.xlarge",
        "p3.2xlarge",
        "g3.4xlarge",
        "g4dn.xlarge",
    ]
}
