//! Core traits for the resolution pipeline.
//!
//! This module defines the FieldCollector trait through which the field
//! resolver asks the input surface for values the label did not yield.

use wine_types::Vintage;

/// Source of user-supplied values for fields identification missed.
///
/// Collectors are cooperative: returning `None` means "no answer yet",
/// which leaves the record incomplete until the next call. They are only
/// invoked for fields that are actually absent.
pub trait FieldCollector {
    /// Ask for the producer name
    fn collect_winery(&mut self) -> Option<String>;

    /// Ask for the vintage year; range checking happens when the
    /// input surface builds the `Vintage`
    fn collect_vintage(&mut self) -> Option<Vintage>;
}

/// Adapts a pair of closures into a FieldCollector.
///
/// ## Usage
/// ```ignore
/// let mut collector = FnCollector::new(
///     || Some("Clos du Pic".to_string()),
///     || Vintage::new(2018).ok(),
/// );
/// let resolution = resolve(record, WineCategory::StillRed, &mut collector)?;
/// ```
pub struct FnCollector<W, V> {
    winery: W,
    vintage: V,
}

impl<W, V> FnCollector<W, V>
where
    W: FnMut() -> Option<String>,
    V: FnMut() -> Option<Vintage>,
{
    pub fn new(winery: W, vintage: V) -> Self {
        Self { winery, vintage }
    }
}

impl<W, V> FieldCollector for FnCollector<W, V>
where
    W: FnMut() -> Option<String>,
    V: FnMut() -> Option<Vintage>,
{
    fn collect_winery(&mut self) -> Option<String> {
        (self.winery)()
    }

    fn collect_vintage(&mut self) -> Option<Vintage> {
        (self.vintage)()
    }
}
