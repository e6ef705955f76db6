use crate::descriptor::SelectOption;
use crate::error::StoreResult;
use crate::statement::Statement;
use crate::store::RecordStore;
use crate::value::Record;

/// Identity columns checked in order; the first one present labels the row.
const IDENTITY_COLUMNS: &[&str] = &["member_user_id", "caregiver_user_id", "job_id"];

/// Runs a lookup query and turns its rows into select options, in result order.
pub async fn resolve_options(store: &dyn RecordStore, query: &str) -> StoreResult<Vec<SelectOption>> {
    let rows = store.fetch_all(&Statement::new(query)).await?;
    Ok(rows.iter().filter_map(option_for_row).collect())
}

/// Projects one row: users get `"<id> - <given> <surname>"`, other identities
/// their id, anything else its first column. Empty rows yield nothing.
pub fn option_for_row(row: &Record) -> Option<SelectOption> {
    if let Some(id) = row.get("user_id") {
        let label = format!(
            "{} - {} {}",
            id,
            row.text("given_name"),
            row.text("surname")
        );
        return Some(SelectOption::new(id.to_string(), label));
    }
    let value = IDENTITY_COLUMNS
        .iter()
        .find_map(|column| row.get(column))
        .or_else(|| row.first())?;
    Some(SelectOption::new(value.to_string(), value.to_string()))
}
