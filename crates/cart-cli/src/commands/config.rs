use anyhow::Result;
use cart_config::{load_layered_yaml, report_unused_keys, CartConfig, UnusedKeyPolicy};

/// Print the layered config hash and canonical JSON.
///
/// `strict` fails on keys nothing reads; otherwise they are listed.
pub fn config_hash(paths: &[String], strict: bool) -> Result<()> {
    let path_refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
    let loaded = load_layered_yaml(&path_refs)?;

    let policy = if strict {
        UnusedKeyPolicy::Fail
    } else {
        UnusedKeyPolicy::Warn
    };
    let report = report_unused_keys(&loaded.config_json, policy)?;
    // typed parse validates values, not just key names
    CartConfig::from_config_json(&loaded.config_json)?;

    println!("config_hash={}", loaded.config_hash);
    for pointer in &report.unused_leaf_pointers {
        println!("unused_key={pointer}");
    }
    println!("{}", loaded.canonical_json);
    Ok(())
}
