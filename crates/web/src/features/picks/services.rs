use p10_storage::{
    error::{Result, StorageError},
    models::{NewPick, Pick, PickChange, PickFilter, PickPage},
    repository::PickStore,
};

/// List picks matching the filter, with the total match count
pub async fn list_picks(store: &dyn PickStore, filter: &PickFilter) -> Result<PickPage> {
    store.list(filter).await
}

/// Create a new pick
pub async fn create_pick(store: &dyn PickStore, pick: &NewPick) -> Result<Pick> {
    let created = store.insert(pick).await?;
    tracing::info!(pick_id = %created.pick_id, "Pick created");
    Ok(created)
}

/// Get pick by id
pub async fn get_pick(store: &dyn PickStore, pick_id: &str) -> Result<Pick> {
    store.find(pick_id).await
}

/// Overwrite every mutable field of a pick
pub async fn replace_pick(store: &dyn PickStore, pick_id: &str, pick: &NewPick) -> Result<Pick> {
    let replaced = store.replace(pick_id, pick).await?;
    tracing::info!(pick_id = %replaced.pick_id, "Pick replaced");
    Ok(replaced)
}

/// Write only the given fields of a pick
pub async fn update_pick(
    store: &dyn PickStore,
    pick_id: &str,
    changes: &[PickChange],
) -> Result<Pick> {
    let updated = store.update(pick_id, changes).await?;
    tracing::info!(
        pick_id = %updated.pick_id,
        fields = changes.len(),
        "Pick updated"
    );
    Ok(updated)
}

/// Delete a pick
pub async fn delete_pick(store: &dyn PickStore, pick_id: &str) -> Result<()> {
    match store.delete(pick_id).await? {
        0 => Err(StorageError::NotFound),
        _ => {
            tracing::info!(pick_id, "Pick deleted");
            Ok(())
        }
    }
}
