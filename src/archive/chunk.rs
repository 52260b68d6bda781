//! XML-chunkfragmenten in het archiefformaat van de host.
//!
//! Een fragment volgt de structuur
//! `<chunk name="…"><items><item name="…">…</item></items><chunks>…</chunks></chunk>`.
//! Item- en chunknamen worden hoofdletterongevoelig opgezocht; onbekende
//! attributen in aangeleverde fragmenten worden genegeerd.

use serde::{Deserialize, Serialize};

use super::{ArchiveError, ArchiveResult};

/// Eén benoemd chunk met tekstitems en eventueel geneste chunks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename = "chunk")]
pub struct ArchiveChunk {
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "@index", default, skip_serializing_if = "Option::is_none")]
    index: Option<usize>,
    #[serde(default)]
    items: ChunkItems,
    #[serde(default)]
    chunks: ChunkList,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ChunkItems {
    #[serde(default, rename = "item")]
    items: Vec<ChunkItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ChunkList {
    #[serde(default, rename = "chunk")]
    chunks: Vec<ArchiveChunk>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ChunkItem {
    #[serde(rename = "@name")]
    name: String,
    #[serde(default, rename = "$text")]
    value: String,
}

impl ArchiveChunk {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            index: None,
            items: ChunkItems::default(),
            chunks: ChunkList::default(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Zet een tekstitem; een bestaand item met dezelfde naam wordt
    /// overschreven.
    pub fn set_string(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(item) = self
            .items
            .items
            .iter_mut()
            .find(|item| item.name.eq_ignore_ascii_case(name))
        {
            item.value = value;
        } else {
            self.items.items.push(ChunkItem {
                name: name.to_owned(),
                value,
            });
        }
    }

    #[must_use]
    pub fn get_string(&self, name: &str) -> Option<&str> {
        self.items
            .items
            .iter()
            .find(|item| item.name.eq_ignore_ascii_case(name))
            .map(|item| item.value.as_str())
    }

    /// Alle items in schrijfvolgorde.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.items
            .items
            .iter()
            .map(|item| (item.name.as_str(), item.value.as_str()))
    }

    pub fn push_child(&mut self, child: ArchiveChunk) {
        self.chunks.chunks.push(child);
    }

    #[must_use]
    pub fn find_child(&self, name: &str) -> Option<&ArchiveChunk> {
        self.chunks
            .chunks
            .iter()
            .find(|chunk| chunk.name.eq_ignore_ascii_case(name))
    }

    pub fn children(&self) -> impl Iterator<Item = &ArchiveChunk> {
        self.chunks.chunks.iter()
    }

    /// Serialiseert het chunk naar een XML-fragment.
    ///
    /// # Errors
    /// `ArchiveError::Chunk` wanneer de serializer faalt.
    pub fn to_xml(&self) -> ArchiveResult<String> {
        quick_xml::se::to_string(self).map_err(ArchiveError::from)
    }

    /// Leest een chunk uit een XML-fragment.
    ///
    /// # Errors
    /// `ArchiveError::Chunk` bij misvormde XML.
    pub fn from_xml(input: &str) -> ArchiveResult<Self> {
        quick_xml::de::from_str(input).map_err(ArchiveError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::ArchiveChunk;

    #[test]
    fn set_and_get_are_case_insensitive() {
        let mut chunk = ArchiveChunk::new("Component");
        chunk.set_string("Options", "{\"Visible\":true}");
        assert_eq!(chunk.get_string("options"), Some("{\"Visible\":true}"));
        // Overschrijven behoudt het aantal items.
        chunk.set_string("OPTIONS", "{\"Visible\":false}");
        assert_eq!(chunk.entries().count(), 1);
        assert_eq!(chunk.get_string("Options"), Some("{\"Visible\":false}"));
    }

    #[test]
    fn xml_round_trip_keeps_items_and_children() {
        let mut inner = ArchiveChunk::new("Selection");
        inner.set_string("NickName", "hoogte");

        let mut chunk = ArchiveChunk::new("Component");
        chunk.set_string("Options", r#"{"Visible":true,"Bakable":false}"#);
        chunk.push_child(inner);

        let xml = chunk.to_xml().unwrap();
        assert!(xml.contains(r#"<chunk name="Component">"#));
        assert!(xml.contains(r#"<item name="Options">"#));

        let parsed = ArchiveChunk::from_xml(&xml).unwrap();
        assert_eq!(
            parsed.get_string("Options"),
            Some(r#"{"Visible":true,"Bakable":false}"#)
        );
        let child = parsed.find_child("selection").expect("genest chunk");
        assert_eq!(child.get_string("nickname"), Some("hoogte"));
    }

    #[test]
    fn reads_host_style_fragments_with_extra_attributes() {
        let xml = r#"<chunk name="Object" index="3">
  <items count="2">
    <item name="GUID" type_name="gh_guid" type_code="9">1b99b61b-34e7-4912-955e-54fd914b4200</item>
    <item name="Name" type_name="gh_string" type_code="10">Objectify</item>
  </items>
</chunk>"#;
        let chunk = ArchiveChunk::from_xml(xml).unwrap();
        assert_eq!(chunk.name(), "Object");
        assert_eq!(chunk.index(), Some(3));
        assert_eq!(
            chunk.get_string("guid"),
            Some("1b99b61b-34e7-4912-955e-54fd914b4200")
        );
        assert_eq!(chunk.get_string("Name"), Some("Objectify"));
    }

    #[test]
    fn missing_text_reads_as_empty_string() {
        let chunk = ArchiveChunk::from_xml(r#"<chunk name="C"><items><item name="leeg"/></items></chunk>"#)
            .unwrap();
        assert_eq!(chunk.get_string("leeg"), Some(""));
    }

    #[test]
    fn malformed_xml_is_an_error() {
        assert!(ArchiveChunk::from_xml("<chunk name=\"open\">").is_err());
    }
}
