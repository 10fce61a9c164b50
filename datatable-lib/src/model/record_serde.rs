//! Custom serialization for Record.
//!
//! ## Read Format (Deserialization)
//!
//! Records arrive as flat JSON objects, optionally carrying an `attributes`
//! annotation:
//!
//! ```json
//! {"attributes": {"type": "Account", "url": "/services/data/..."}, "Id": "001...", "Name": "Acme"}
//! ```
//!
//! The annotation is consumed into [`Record::object_type`]; every other key
//! becomes a field. Parent relationship objects (`"Owner": {"Name": ...}`)
//! are kept as [`Value::Json`].
//!
//! ## Write Format (Serialization)
//!
//! Records serialize back to a flat JSON object without the annotation, so
//! the synthesized `urlLink` field is visible to the rendering layer.

use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::MapAccess;
use serde::de::Visitor;
use serde::ser::SerializeMap;

use super::Record;
use super::Value;

const ATTRIBUTES_KEY: &str = "attributes";

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RecordVisitor)
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map representing a record")
    }

    fn visit_map<M>(self, mut map: M) -> Result<Record, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut record = Record::new();

        while let Some(key) = map.next_key::<String>()? {
            let value: serde_json::Value = map.next_value()?;

            if key == ATTRIBUTES_KEY {
                record.object_type = value
                    .get("type")
                    .and_then(serde_json::Value::as_str)
                    .map(str::to_string);
            } else {
                record.fields.insert(key, Value::from(value));
            }
        }

        Ok(record)
    }
}
