use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Clone, Debug)]
pub struct AbilityRow {
    pub name: String,
    pub ability: String,
    pub trigger: String,
    pub weight: i32,
}

#[derive(Clone, Debug, Deserialize)]
struct RawRow {
    #[serde(default)]
    name: String,
    #[serde(default)]
    ability: String,
    #[serde(default)]
    trigger: String,
    #[serde(default)]
    weight: Value,
}

pub(super) fn parse_rows(raw: &str) -> Result<Vec<AbilityRow>> {
    let parsed: Value = serde_json::from_str(raw).context("invalid JSON in data file")?;
    let entries = parsed
        .as_array()
        .ok_or_else(|| anyhow!("expected a JSON array of row objects"))?;

    let mut rows = Vec::with_capacity(entries.len());
    for entry in entries {
        let Some(object) = entry.as_object() else {
            continue;
        };

        let mut lowered = Map::with_capacity(object.len());
        for (key, value) in object {
            lowered.insert(key.to_ascii_lowercase(), value.clone());
        }

        let raw_row =
            RawRow::deserialize(Value::Object(lowered)).context("invalid row object in data file")?;

        let name = raw_row.name.trim().to_string();
        if name.is_empty() {
            continue;
        }

        rows.push(AbilityRow {
            name,
            ability: raw_row.ability,
            trigger: raw_row.trigger,
            weight: parse_weight(&raw_row.weight),
        });
    }

    if rows.is_empty() {
        Err(anyhow!("no usable rows found in data file"))
    } else {
        Ok(rows)
    }
}

fn parse_weight(value: &Value) -> i32 {
    match value {
        Value::String(text) => text.trim().parse().unwrap_or(0),
        Value::Number(number) => number.as_i64().unwrap_or(0) as i32,
        _ => 0,
    }
}
