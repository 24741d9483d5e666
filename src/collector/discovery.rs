use tracing::{debug, info};

use crate::error::{AppError, AppResult, ValidationError};
use crate::metrics::{ResourceId, SecondaryIndexSet};

use super::ports::ResourceDiscovery;

/// Resolves the tables to collect and their secondary indexes.
///
/// An explicit table list skips listing; indexes are always described. Any
/// discovery failure fails the pass.
///
/// # Errors
///
/// Returns an error when tables cannot be listed or described, or when an
/// explicit table name is empty.
pub async fn discover(
    discovery: &dyn ResourceDiscovery,
    explicit: Option<&[String]>,
) -> AppResult<(Vec<ResourceId>, SecondaryIndexSet)> {
    let resources = match explicit {
        Some(tables) => tables
            .iter()
            .map(|table| {
                let table = table.trim();
                if table.is_empty() {
                    Err(AppError::validation(ValidationError::EmptyTableName))
                } else {
                    Ok(ResourceId::new(table))
                }
            })
            .collect::<AppResult<Vec<_>>>()?,
        None => discovery.list_resources().await?,
    };

    let mut entries = Vec::with_capacity(resources.len());
    for resource in &resources {
        let indexes = discovery.list_secondary_indexes(resource).await?;
        debug!("{} has {} secondary indexes", resource, indexes.len());
        entries.push((resource.clone(), indexes));
    }
    let index_map: SecondaryIndexSet = entries.into_iter().collect();
    info!(
        "Discovered {} tables ({} with index info)",
        resources.len(),
        index_map.len()
    );
    Ok((resources, index_map))
}
