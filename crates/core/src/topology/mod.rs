//! Sector topology and name codec
//!
//! Pure data describing the operating floor, plus the text codec used for
//! diagnostics and for configuration files that name sectors.

mod sector;

pub use sector::{Area, Sector, UnknownSector};

/// Encode a sector as its canonical name (total)
pub fn sector_to_name(sector: Sector) -> &'static str {
    sector.name()
}

/// Decode a sector name
///
/// Unknown names yield [`Sector::Error`]; callers must check for the sentinel
/// before using the result as a position.
pub fn name_to_sector(name: &str) -> Sector {
    Sector::from_name(name).unwrap_or(Sector::Error)
}
