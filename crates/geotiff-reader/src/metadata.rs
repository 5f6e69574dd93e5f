//! GDAL metadata (TIFF tag 42112) parsing.
//!
//! GDAL stores dataset and band metadata as a small XML document:
//!
//! ```xml
//! <GDALMetadata>
//!   <Item name="DESCRIPTION" sample="0" role="description">red</Item>
//!   <Item name="SCALE" sample="0" role="scale">0.0001</Item>
//! </GDALMetadata>
//! ```

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{GeoTiffError, GeoTiffResult};

/// TIFF tag holding the GDAL metadata XML.
pub const TAG_GDAL_METADATA: u16 = 42112;

/// TIFF tag holding the GDAL nodata value as ASCII.
pub const TAG_GDAL_NODATA: u16 = 42113;

/// One `<Item>` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataItem {
    pub name: String,
    /// Zero-based band index; `None` for dataset-level items
    pub sample: Option<usize>,
    pub role: Option<String>,
    pub value: String,
}

/// Parsed GDAL metadata document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GdalMetadata {
    pub items: Vec<MetadataItem>,
}

impl GdalMetadata {
    /// Parse the XML payload of the GDAL metadata tag.
    pub fn parse(xml: &str) -> GeoTiffResult<Self> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        let mut items = Vec::new();
        let mut current: Option<MetadataItem> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) if e.name().as_ref() == b"Item" => {
                    current = Some(item_from_attributes(&e)?);
                }
                Ok(Event::Text(t)) => {
                    if let Some(item) = current.as_mut() {
                        let text = t
                            .unescape()
                            .map_err(|e| GeoTiffError::Metadata(e.to_string()))?;
                        item.value.push_str(&text);
                    }
                }
                Ok(Event::End(e)) if e.name().as_ref() == b"Item" => {
                    if let Some(item) = current.take() {
                        items.push(item);
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    return Err(GeoTiffError::Metadata(format!(
                        "at position {}: {}",
                        reader.buffer_position(),
                        e
                    )))
                }
            }
        }

        Ok(Self { items })
    }

    /// Per-band descriptions for a raster with `band_count` bands.
    ///
    /// Bands without a `DESCRIPTION` item get `None`.
    pub fn band_descriptions(&self, band_count: usize) -> Vec<Option<String>> {
        let mut descriptions = vec![None; band_count];
        for item in &self.items {
            let is_description = item.name.eq_ignore_ascii_case("DESCRIPTION")
                || item.role.as_deref() == Some("description");
            if !is_description {
                continue;
            }
            if let Some(slot) = item.sample.and_then(|s| descriptions.get_mut(s)) {
                *slot = Some(item.value.clone());
            }
        }
        descriptions
    }

    /// Dataset-level item value by name.
    pub fn dataset_item(&self, name: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|i| i.sample.is_none() && i.name == name)
            .map(|i| i.value.as_str())
    }
}

fn item_from_attributes(e: &BytesStart<'_>) -> GeoTiffResult<MetadataItem> {
    let mut item = MetadataItem {
        name: String::new(),
        sample: None,
        role: None,
        value: String::new(),
    };

    for attr in e.attributes() {
        let attr = attr.map_err(|e| GeoTiffError::Metadata(e.to_string()))?;
        let value = attr
            .unescape_value()
            .map_err(|e| GeoTiffError::Metadata(e.to_string()))?;
        match attr.key.as_ref() {
            b"name" => item.name = value.into_owned(),
            b"role" => item.role = Some(value.into_owned()),
            b"sample" => {
                item.sample = Some(value.trim().parse().map_err(|_| {
                    GeoTiffError::Metadata(format!("invalid sample index '{}'", value))
                })?)
            }
            _ => {}
        }
    }

    Ok(item)
}

/// Parse the GDAL nodata tag (`"-9999"`, `"nan"`, ...).
pub fn parse_nodata(s: &str) -> Option<f64> {
    s.trim_end_matches('\0').trim().parse().ok()
}
