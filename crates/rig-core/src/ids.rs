//! ID prefixes for database records.
//!
//! IDs are generated by the database layer as `<prefix>-<8 hex chars>`.

pub const PREFIX_REPO: &str = "rep";
pub const PREFIX_SCRIPT: &str = "scr";
pub const PREFIX_USER: &str = "usr";
pub const PREFIX_BRAND: &str = "brd";
pub const PREFIX_EQUIPMENT_TYPE: &str = "etp";
pub const PREFIX_LIBRARY: &str = "lib";
pub const PREFIX_LOCATION: &str = "loc";
pub const PREFIX_SCOPE: &str = "scp";
pub const PREFIX_NETWORK: &str = "net";
pub const PREFIX_CREDENTIAL_TYPE: &str = "ctp";
pub const PREFIX_EQUIPMENT: &str = "eqp";
pub const PREFIX_CREDENTIAL: &str = "crd";

pub const ALL_PREFIXES: &[&str] = &[
    PREFIX_REPO,
    PREFIX_SCRIPT,
    PREFIX_USER,
    PREFIX_BRAND,
    PREFIX_EQUIPMENT_TYPE,
    PREFIX_LIBRARY,
    PREFIX_LOCATION,
    PREFIX_SCOPE,
    PREFIX_NETWORK,
    PREFIX_CREDENTIAL_TYPE,
    PREFIX_EQUIPMENT,
    PREFIX_CREDENTIAL,
];

/// Returns `true` if `id` has the shape `<known prefix>-<8 lowercase hex>`.
#[must_use]
pub fn is_well_formed(id: &str) -> bool {
    let Some((prefix, suffix)) = id.split_once('-') else {
        return false;
    };
    ALL_PREFIXES.contains(&prefix)
        && suffix.len() == 8
        && suffix
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}
