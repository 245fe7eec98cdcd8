//! Re-derive header fields from stored module docs without touching disk.

use rig_core::responses::BackfillResponse;
use rig_db::repos::ScriptFilter;
use rig_db::service::RigService;
use rig_parser::{HeaderFields, extract_fields};

use crate::error::CatalogError;

/// Recompute description, topology, and author for every cataloged row.
///
/// Rows whose derived fields already match are left untouched.
///
/// # Errors
///
/// Returns `CatalogError::Database` if a row cannot be read or written.
pub async fn backfill_fields(service: &RigService) -> Result<BackfillResponse, CatalogError> {
    let scripts = service.list_scripts(&ScriptFilter::default()).await?;
    let mut updated = 0;
    for script in &scripts {
        let HeaderFields {
            description,
            topology,
            author,
        } = extract_fields(script.module_doc.as_deref().unwrap_or_default());
        if description == script.description
            && topology == script.topology
            && author == script.author
        {
            continue;
        }
        service
            .update_script_fields(
                &script.id,
                description.as_deref(),
                topology.as_deref(),
                author.as_deref(),
            )
            .await?;
        updated += 1;
    }
    tracing::info!(scanned = scripts.len(), updated, "backfill finished");
    Ok(BackfillResponse {
        scanned: scripts.len(),
        updated,
    })
}
