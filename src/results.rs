use crate::error::Result;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// One entity extracted from a panel tile
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    /// Primary label of the entity
    pub name: String,

    /// Secondary attributes (year, artist, duration...), never containing `name`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Vec<String>>,

    /// Absolute search link for the entity
    pub link: String,

    /// Data URI or direct image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Record {
    /// Build a record, dropping optional fields that resolved to nothing
    pub fn new(
        name: String,
        extensions: Vec<String>,
        link: String,
        image: Option<String>,
    ) -> Self {
        Self {
            name,
            extensions: Some(extensions).filter(|e| !e.is_empty()),
            link,
            image: image.filter(|i| !i.is_empty()),
        }
    }
}

/// Records sharing one entity-type tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityGroup {
    pub tag: String,
    pub records: Vec<Record>,
}

/// Extraction result for one document: tags in first-appearance order,
/// records in document order within each tag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    groups: Vec<EntityGroup>,
}

impl Extraction {
    pub fn groups(&self) -> &[EntityGroup] {
        &self.groups
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.tag.as_str())
    }

    /// Records for `tag`, if any survived
    pub fn get(&self, tag: &str) -> Option<&[Record]> {
        self.groups
            .iter()
            .find(|g| g.tag == tag)
            .map(|g| g.records.as_slice())
    }

    /// Number of tags
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn record_count(&self) -> usize {
        self.groups.iter().map(|g| g.records.len()).sum()
    }

    /// Pretty JSON (two-space indent) followed by a newline
    pub fn to_pretty_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}

impl FromIterator<(String, Record)> for Extraction {
    fn from_iter<I: IntoIterator<Item = (String, Record)>>(iter: I) -> Self {
        let mut groups: Vec<EntityGroup> = Vec::new();
        for (tag, record) in iter {
            match groups.iter_mut().find(|g| g.tag == tag) {
                Some(group) => group.records.push(record),
                None => groups.push(EntityGroup {
                    tag,
                    records: vec![record],
                }),
            }
        }
        Self { groups }
    }
}

impl Serialize for Extraction {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for group in &self.groups {
            map.serialize_entry(&group.tag, &group.records)?;
        }
        map.end()
    }
}
