//! Import, listing and removal of stored records.

use super::parse_id;
use crate::error::CommandError;
use crate::state::AppState;
use bench_core::{normalize_tags, ConsultantProfile, JobRequirement, VendorRecord};
use bench_store::{Collection, Document, Repository};
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

/// One line of the bench hotlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HotlistEntry {
    /// Consultant id
    pub id: String,
    /// Consultant name
    pub name: String,
    /// Formatted hotlist line
    pub line: String,
    /// Days on the bench as of the report date
    pub bench_days: i64,
}

/// Import records from JSON text, either one object or an array of them.
///
/// Existing records with the same id are replaced. Returns the ids written.
pub async fn import_records(
    state: &AppState,
    collection: Collection,
    json: &str,
) -> Result<Vec<String>, CommandError> {
    let value: Value = serde_json::from_str(json)?;
    let items = match value {
        Value::Array(items) => items,
        single => vec![single],
    };

    let ids = match collection {
        Collection::Consultants => {
            import_into(&state.consultants(), items, ConsultantProfile::normalized).await?
        }
        Collection::Jobs => {
            import_into(&state.jobs(), items, |mut job: JobRequirement| {
                job.skills = normalize_tags(&job.skills);
                job
            })
            .await?
        }
        Collection::Vendors => import_into(&state.vendors(), items, |v: VendorRecord| v).await?,
    };

    info!(%collection, imported = ids.len(), "imported records");
    Ok(ids)
}

/// Decode every item before writing any, so a bad item leaves the store untouched.
async fn import_into<T, F>(
    repo: &Repository<T>,
    items: Vec<Value>,
    prepare: F,
) -> Result<Vec<String>, CommandError>
where
    T: Document,
    F: Fn(T) -> T,
{
    let records = items
        .into_iter()
        .map(|item| serde_json::from_value::<T>(item).map(&prepare))
        .collect::<Result<Vec<_>, _>>()?;

    let mut ids = Vec::with_capacity(records.len());
    for record in &records {
        repo.save(record).await?;
        ids.push(record.record_id().to_string());
    }
    Ok(ids)
}

/// Every record in a collection as JSON, in insertion order.
pub async fn list_records(
    state: &AppState,
    collection: Collection,
) -> Result<Vec<Value>, CommandError> {
    let values = match collection {
        Collection::Consultants => to_values(&state.consultants().list().await?)?,
        Collection::Jobs => to_values(&state.jobs().list().await?)?,
        Collection::Vendors => to_values(&state.vendors().list().await?)?,
    };
    Ok(values)
}

fn to_values<T: Serialize>(records: &[T]) -> Result<Vec<Value>, CommandError> {
    records
        .iter()
        .map(|r| serde_json::to_value(r).map_err(CommandError::from))
        .collect()
}

/// One record as JSON.
pub async fn get_record(
    state: &AppState,
    collection: Collection,
    id: &str,
) -> Result<Value, CommandError> {
    let id = parse_id(id)?;
    let value = match collection {
        Collection::Consultants => serde_json::to_value(state.consultants().require(&id).await?)?,
        Collection::Jobs => serde_json::to_value(state.jobs().require(&id).await?)?,
        Collection::Vendors => serde_json::to_value(state.vendors().require(&id).await?)?,
    };
    Ok(value)
}

/// Remove a record. Returns whether it existed.
pub async fn delete_record(
    state: &AppState,
    collection: Collection,
    id: &str,
) -> Result<bool, CommandError> {
    let id = parse_id(id)?;
    let removed = match collection {
        Collection::Consultants => state.consultants().delete(&id).await?,
        Collection::Jobs => state.jobs().delete(&id).await?,
        Collection::Vendors => state.vendors().delete(&id).await?,
    };
    info!(%collection, %id, removed, "deleted record");
    Ok(removed)
}

/// Bench hotlist: every consultant, longest on the bench first.
pub async fn hotlist(state: &AppState, today: NaiveDate) -> Result<Vec<HotlistEntry>, CommandError> {
    let mut entries: Vec<HotlistEntry> = state
        .consultants()
        .list()
        .await?
        .into_iter()
        .map(ConsultantProfile::normalized)
        .map(|profile| HotlistEntry {
            id: profile.id.to_string(),
            bench_days: profile.bench_days(today),
            line: profile.hotlist_line(),
            name: profile.full_name,
        })
        .collect();
    entries.sort_by(|a, b| b.bench_days.cmp(&a.bench_days));
    Ok(entries)
}
