pub mod agents;
pub mod branches;
pub mod console;
pub mod session;
pub mod tenants;
pub mod users;

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::str::FromStr;
use tenantdesk_application::Banners;
use tenantdesk_core::ConsoleError;
use tenantdesk_core::listing::{ListQuery, SortDirection};

use crate::ListArgs;

/// Form dates default to the local calendar day.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Overlays the fields of a JSON object onto `base`.
///
/// Keys use the form's wire names (`TenantName`, `AgentId`, ...). Keys the
/// form does not have are rejected rather than silently dropped.
pub fn merge_form<T: Serialize + DeserializeOwned>(base: &T, data: &str) -> Result<T> {
    let overlay: Value = serde_json::from_str(data).context("--data is not valid JSON")?;
    let Value::Object(overlay) = overlay else {
        bail!("--data must be a JSON object");
    };

    let mut merged = serde_json::to_value(base)?;
    let Some(fields) = merged.as_object_mut() else {
        bail!("form does not serialize to an object");
    };
    for (key, value) in overlay {
        if !fields.contains_key(&key) {
            let known: Vec<&str> = fields.keys().map(String::as_str).collect();
            bail!("unknown field '{}' (expected one of: {})", key, known.join(", "));
        }
        fields.insert(key, value);
    }

    serde_json::from_value(merged).context("--data has a field of the wrong type")
}

/// Reads one string field from a `--data` object without building a form.
pub fn data_field(data: &str, key: &str) -> Result<Option<String>> {
    let value: Value = serde_json::from_str(data).context("--data is not valid JSON")?;
    Ok(value
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string))
}

/// Applies `--search`, `--sort` and `--desc` to a screen's query.
pub fn apply_list_args<F>(query: &mut ListQuery<F>, args: &ListArgs) -> Result<()>
where
    F: FromStr<Err = ConsoleError>,
{
    if let Some(search) = &args.search {
        query.search = search.clone();
    }
    if let Some(sort) = &args.sort {
        query.sort_by = sort.parse()?;
    }
    if args.desc {
        query.direction = SortDirection::Desc;
    }
    Ok(())
}

/// Prints the success banner left by a mutation, and a refetch failure if
/// one followed it.
pub fn report(banners: &Banners) {
    if let Some(success) = &banners.success {
        println!("{}", success);
    }
    if let Some(error) = &banners.error {
        eprintln!("warning: {}", error);
    }
}
