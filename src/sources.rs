use anyhow::Result;

use crate::catalog::Catalog;

/// Print the external-source catalog as a status table.
///
/// A source is considered reachable when it carries a URL; sources shipped
/// as local files are reported by their path instead.
pub fn list_sources(catalog: &Catalog) -> Result<()> {
    println!(
        "{:<20} {:<16} {:<32} LOCATION",
        "ID", "TYPE", "NAME"
    );

    for source in &catalog.external_sources {
        let location = source
            .url
            .as_deref()
            .or(source.local_path.as_deref())
            .unwrap_or("NOT AVAILABLE");
        println!(
            "{:<20} {:<16} {:<32} {}",
            source.id,
            source.source_type.as_str(),
            source.name,
            location
        );
    }

    println!();
    println!("{} external sources in catalog", catalog.external_sources.len());

    Ok(())
}
