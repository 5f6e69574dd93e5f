//! Band-name resolution.

use crate::source::RasterSource;

/// Column label for each band of `source`.
///
/// If any band carries a non-empty description, the descriptions are used
/// verbatim in band order, with an empty label for undescribed bands.
/// Otherwise the labels are `band_0 .. band_{n-1}`.
pub fn resolve_band_names<S: RasterSource + ?Sized>(source: &S) -> Vec<String> {
    let count = source.band_count();
    let mut descriptions = source.descriptions();
    descriptions.resize(count, None);

    let described = descriptions
        .iter()
        .any(|d| d.as_deref().is_some_and(|s| !s.is_empty()));

    if described {
        descriptions
            .into_iter()
            .map(Option::unwrap_or_default)
            .collect()
    } else {
        generated_band_names(count)
    }
}

/// `band_0 .. band_{count-1}`.
pub fn generated_band_names(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("band_{}", i)).collect()
}
