//! Known Bedwars map names.
//!
//! `GET /polsu/bedwars/map` only answers for maps in this set, so the client
//! accepts a [`BedwarsMapName`] rather than a free-form string.

use seraph_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every Bedwars map name Polsu knows about, lowercase.
pub const KNOWN_BEDWARS_MAPS: &[&str] = &[
    "acropolis",
    "airshow",
    "amazon",
    "apollo",
    "aqil",
    "ashfire",
    "babylon",
    "bio hazard",
    "blossom",
    "cascade",
    "casita",
    "cliffside",
    "crogorm",
    "crypt",
    "deadwood",
    "dragonstar",
    "dockyard",
    "gateway",
    "glacier",
    "harvest",
    "hollow",
    "ironclad",
    "lighthouse",
    "lightstone",
    "lotus",
    "lucky rush",
    "meso",
    "mirage",
    "orbit",
    "orchestra",
    "pavilion",
    "pernicious",
    "playground",
    "polygon",
    "rooftop",
    "rooted",
    "scorched sands",
    "serenity",
    "siege",
    "sky rise",
    "solace",
    "speedway",
    "steampunk",
    "toro",
    "waterfall",
    "yue",
    "zarzul",
    "aquarium",
    "archway",
    "artemis",
    "ashore",
    "boletum",
    "build site",
    "carapace",
    "catalyst",
    "chained",
    "daolong",
    "deposit",
    "dreamgrove",
    "eastwood",
    "enchanted",
    "extinction",
    "fang outpost",
    "fort doon",
    "frogiton",
    "graveship",
    "holmgang",
    "horizon",
    "invasion",
    "jurassic",
    "katsu",
    "kubo",
    "lectus",
    "obelisk",
    "paladin",
    "paradox",
    "pharaoh",
    "planet 98",
    "pool party",
    "relic",
    "rise",
    "stilted",
    "stonekeep",
    "sky festival",
    "swashbuckle",
    "temple",
    "tigris",
    "terminal",
    "treenan",
    "unturned",
    "zen plaza",
    "cryptic",
    "frost",
    "gardens",
    "lions temple",
    "picnic",
    "ruins",
    "castle",
    "sandcastle",
    "frosted",
    "loft",
    "santa's rush",
    "gingerbread",
    "snowkeep",
    "comet",
    "blitzen",
    "fireplace",
    "lotice",
];

/// A map name from [`KNOWN_BEDWARS_MAPS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BedwarsMapName(&'static str);

impl BedwarsMapName {
    /// Look up a map by name, ignoring case and surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] if the map is not a known Bedwars map.
    pub fn new(name: &str) -> Result<Self> {
        let wanted = name.trim().to_lowercase();
        KNOWN_BEDWARS_MAPS
            .iter()
            .find(|known| **known == wanted)
            .map(|known| Self(*known))
            .ok_or_else(|| Error::InvalidRequest(format!("Unknown Bedwars map: {name}")))
    }

    /// The canonical lowercase name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }

    /// Iterate over every known map.
    pub fn all() -> impl Iterator<Item = Self> {
        KNOWN_BEDWARS_MAPS.iter().map(|name| Self(*name))
    }
}

impl FromStr for BedwarsMapName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for BedwarsMapName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(&value)
    }
}

impl From<BedwarsMapName> for String {
    fn from(map: BedwarsMapName) -> Self {
        map.0.to_string()
    }
}

impl fmt::Display for BedwarsMapName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}
