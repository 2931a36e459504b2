// src/region.rs
//! The 32 federal entities offered by the search form's state filter.
//!
//! Names are the exact visible option texts; they double as store directory
//! names and as the first half of a completion-log key.

use std::{fmt, str::FromStr};

use crate::error::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    Aguascalientes,
    BajaCalifornia,
    BajaCaliforniaSur,
    Campeche,
    Chiapas,
    Chihuahua,
    CiudadDeMexico,
    Coahuila,
    Colima,
    Durango,
    Guanajuato,
    Guerrero,
    Hidalgo,
    Jalisco,
    Michoacan,
    Morelos,
    Mexico,
    Nayarit,
    NuevoLeon,
    Oaxaca,
    Puebla,
    Queretaro,
    QuintanaRoo,
    SanLuisPotosi,
    Sinaloa,
    Sonora,
    Tabasco,
    Tamaulipas,
    Tlaxcala,
    Veracruz,
    Yucatan,
    Zacatecas,
}

impl Region {
    /// Form order. The crawl walks regions in this order.
    pub const ALL: [Region; 32] = [
        Region::Aguascalientes,
        Region::BajaCalifornia,
        Region::BajaCaliforniaSur,
        Region::Campeche,
        Region::Chiapas,
        Region::Chihuahua,
        Region::CiudadDeMexico,
        Region::Coahuila,
        Region::Colima,
        Region::Durango,
        Region::Guanajuato,
        Region::Guerrero,
        Region::Hidalgo,
        Region::Jalisco,
        Region::Michoacan,
        Region::Morelos,
        Region::Mexico,
        Region::Nayarit,
        Region::NuevoLeon,
        Region::Oaxaca,
        Region::Puebla,
        Region::Queretaro,
        Region::QuintanaRoo,
        Region::SanLuisPotosi,
        Region::Sinaloa,
        Region::Sonora,
        Region::Tabasco,
        Region::Tamaulipas,
        Region::Tlaxcala,
        Region::Veracruz,
        Region::Yucatan,
        Region::Zacatecas,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Region::Aguascalientes => "Aguascalientes",
            Region::BajaCalifornia => "Baja California",
            Region::BajaCaliforniaSur => "Baja California Sur",
            Region::Campeche => "Campeche",
            Region::Chiapas => "Chiapas",
            Region::Chihuahua => "Chihuahua",
            Region::CiudadDeMexico => "Ciudad de México",
            Region::Coahuila => "Coahuila",
            Region::Colima => "Colima",
            Region::Durango => "Durango",
            Region::Guanajuato => "Guanajuato",
            Region::Guerrero => "Guerrero",
            Region::Hidalgo => "Hidalgo",
            Region::Jalisco => "Jalisco",
            Region::Michoacan => "Michoacán",
            Region::Morelos => "Morelos",
            Region::Mexico => "México",
            Region::Nayarit => "Nayarit",
            Region::NuevoLeon => "Nuevo León",
            Region::Oaxaca => "Oaxaca",
            Region::Puebla => "Puebla",
            Region::Queretaro => "Querétaro",
            Region::QuintanaRoo => "Quintana Roo",
            Region::SanLuisPotosi => "San Luis Potosí",
            Region::Sinaloa => "Sinaloa",
            Region::Sonora => "Sonora",
            Region::Tabasco => "Tabasco",
            Region::Tamaulipas => "Tamaulipas",
            Region::Tlaxcala => "Tlaxcala",
            Region::Veracruz => "Veracruz",
            Region::Yucatan => "Yucatán",
            Region::Zacatecas => "Zacatecas",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Region {
    type Err = Error;

    /// Exact display name match; store directories and log keys round-trip.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .iter()
            .copied()
            .find(|r| r.name() == s)
            .ok_or_else(|| Error::UnknownRegion(s.to_string()))
    }
}

/// `region/id`: the identity of one listing in the store and the log.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListingKey {
    pub region: Region,
    pub id: String,
}

impl ListingKey {
    pub fn new(region: Region, id: impl Into<String>) -> Self {
        Self { region, id: id.into() }
    }

    /// Parse `region/id`. A trailing `.html` (older logs stored file names) is dropped.
    pub fn parse(s: &str) -> Result<Self, Error> {
        let (region, id) = s
            .split_once('/')
            .ok_or_else(|| Error::UnknownRegion(s.to_string()))?;
        let id = id.strip_suffix(".html").unwrap_or(id);
        if !is_listing_id(id) {
            return Err(Error::InvalidListingId(id.to_string()));
        }
        Ok(Self::new(region.parse()?, id))
    }
}

impl fmt::Display for ListingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.region, self.id)
    }
}

/// Ids name files in the store: ASCII letters, digits, `_` and `-` only.
pub fn is_listing_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Listing id from a detail URL: the text after the last `=`.
pub fn listing_id_from_url(url: &str) -> Option<&str> {
    let (_, id) = url.rsplit_once('=')?;
    let id = id.trim();
    is_listing_id(id).then_some(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_regions_round_trip_through_names() {
        assert_eq!(Region::ALL.len(), 32);
        for r in Region::ALL {
            assert_eq!(r.name().parse::<Region>().unwrap(), r);
        }
        assert!("Atlantis".parse::<Region>().is_err());
    }

    #[test]
    fn listing_key_display_and_parse() {
        let k = ListingKey::new(Region::NuevoLeon, "4521");
        assert_eq!(k.to_string(), "Nuevo León/4521");
        assert_eq!(ListingKey::parse("Nuevo León/4521").unwrap(), k);
        assert_eq!(ListingKey::parse("Nuevo León/4521.html").unwrap(), k);
        assert!(ListingKey::parse("no-slash").is_err());
    }

    #[test]
    fn id_is_trailing_segment() {
        assert_eq!(
            listing_id_from_url("https://vun.empleo.gob.mx/detalleOferta.do?method=init&id_oferta_empleo=98765"),
            Some("98765")
        );
        assert_eq!(listing_id_from_url("https://x/y?id="), None);
        assert_eq!(listing_id_from_url("https://x/y"), None);
    }

    #[test]
    fn ids_that_would_leave_the_region_dir_are_rejected() {
        assert_eq!(listing_id_from_url("https://x/y?id=x/8"), None);
        assert_eq!(listing_id_from_url("https://x/y?id=..\\8"), None);
        assert_eq!(listing_id_from_url("https://x/y?id=.."), None);
        assert_eq!(listing_id_from_url("https://x/y?id=7\u{0}"), None);
        assert_eq!(listing_id_from_url("https://x/y?id=ab-12_c"), Some("ab-12_c"));

        assert!(matches!(ListingKey::parse("Sonora/x/8"), Err(Error::InvalidListingId(_))));
        assert!(matches!(ListingKey::parse("Sonora/../8"), Err(Error::InvalidListingId(_))));
    }
}
