use std::collections::HashMap;

/// Id of the catalog used when nothing else is configured.
pub const DEFAULT_CATALOG: &str = "magebot";

pub fn builtin_catalogs() -> HashMap<&'static str, &'static str> {
    HashMap::from([(
        DEFAULT_CATALOG,
        include_str!("../content/spells/magebot.json"),
    )])
}
