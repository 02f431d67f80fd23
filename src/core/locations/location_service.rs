// Location vocabulary - maps the directory service's free-text data center,
// world, and housing zone names onto the bot's internal enums.
//
// Matching is exact and case-insensitive. An unmatched name is a hard
// failure: it means either a new game region or a data entry error upstream,
// and both need a human to look at them rather than a silent drop.

use thiserror::Error;

use crate::core::venues::Location;

#[derive(Debug, Error)]
pub enum LocationError {
    #[error("unknown data center `{0}`")]
    UnknownDataCenter(String),
    #[error("unknown world `{0}`")]
    UnknownWorld(String),
    #[error("unknown housing zone `{0}`")]
    UnknownZone(String),
}

// ============================================================================
// DATA CENTERS
// ============================================================================

/// Physical region a data center is hosted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    NorthAmerica,
    Europe,
    Japan,
    Oceania,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataCenter {
    Aether,
    Crystal,
    Dynamis,
    Primal,
    Chaos,
    Light,
    Elemental,
    Gaia,
    Mana,
    Meteor,
    Materia,
}

const DATA_CENTERS: &[(DataCenter, &str, Region)] = &[
    (DataCenter::Aether, "Aether", Region::NorthAmerica),
    (DataCenter::Crystal, "Crystal", Region::NorthAmerica),
    (DataCenter::Dynamis, "Dynamis", Region::NorthAmerica),
    (DataCenter::Primal, "Primal", Region::NorthAmerica),
    (DataCenter::Chaos, "Chaos", Region::Europe),
    (DataCenter::Light, "Light", Region::Europe),
    (DataCenter::Elemental, "Elemental", Region::Japan),
    (DataCenter::Gaia, "Gaia", Region::Japan),
    (DataCenter::Mana, "Mana", Region::Japan),
    (DataCenter::Meteor, "Meteor", Region::Japan),
    (DataCenter::Materia, "Materia", Region::Oceania),
];

impl DataCenter {
    pub fn all() -> impl Iterator<Item = DataCenter> {
        DATA_CENTERS.iter().map(|(dc, _, _)| *dc)
    }

    pub fn as_str(self) -> &'static str {
        DATA_CENTERS
            .iter()
            .find(|(dc, _, _)| *dc == self)
            .map(|(_, name, _)| *name)
            .expect("every data center has a table row")
    }

    pub fn region(self) -> Region {
        DATA_CENTERS
            .iter()
            .find(|(dc, _, _)| *dc == self)
            .map(|(_, _, region)| *region)
            .expect("every data center has a table row")
    }

    pub fn from_name(name: &str) -> Result<DataCenter, LocationError> {
        let name = name.trim();
        DATA_CENTERS
            .iter()
            .find(|(_, label, _)| name.eq_ignore_ascii_case(label))
            .map(|(dc, _, _)| *dc)
            .ok_or_else(|| LocationError::UnknownDataCenter(name.to_string()))
    }

    /// The data center a world belongs to. Total: every world is in exactly
    /// one group of the partition table below.
    pub fn from_world(world: World) -> DataCenter {
        world.data_center()
    }
}

impl std::fmt::Display for DataCenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// WORLDS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum World {
    Adamantoise,
    Cactuar,
    Faerie,
    Gilgamesh,
    Jenova,
    Midgardsormr,
    Sargatanas,
    Siren,
    Balmung,
    Brynhildr,
    Coeurl,
    Diabolos,
    Goblin,
    Malboro,
    Mateus,
    Zalera,
    Cuchulainn,
    Golem,
    Halicarnassus,
    Kraken,
    Maduin,
    Marilith,
    Rafflesia,
    Seraph,
    Behemoth,
    Excalibur,
    Exodus,
    Famfrit,
    Hyperion,
    Lamia,
    Leviathan,
    Ultros,
    Cerberus,
    Louisoix,
    Moogle,
    Omega,
    Phantom,
    Ragnarok,
    Sagittarius,
    Spriggan,
    Alpha,
    Lich,
    Odin,
    Phoenix,
    Raiden,
    Shiva,
    Twintania,
    Zodiark,
    Aegis,
    Atomos,
    Carbuncle,
    Garuda,
    Gungnir,
    Kujata,
    Tonberry,
    Typhon,
    Alexander,
    Bahamut,
    Durandal,
    Fenrir,
    Ifrit,
    Ridill,
    Tiamat,
    Ultima,
    Anima,
    Asura,
    Chocobo,
    Hades,
    Ixion,
    Masamune,
    Pandaemonium,
    Titan,
    Belias,
    Mandragora,
    Ramuh,
    Shinryu,
    Unicorn,
    Valefor,
    Yojimbo,
    Zeromus,
    Bismarck,
    Ravana,
    Sephirot,
    Sophia,
    Zurvan,
}

/// The world roster as one explicit (world, name, data center) row per
/// world. This is the table to keep in sync with the game's server list:
/// adding a world is a one-line edit here, nothing else changes.
const WORLDS: &[(World, &str, DataCenter)] = &[
    (World::Adamantoise, "Adamantoise", DataCenter::Aether),
    (World::Cactuar, "Cactuar", DataCenter::Aether),
    (World::Faerie, "Faerie", DataCenter::Aether),
    (World::Gilgamesh, "Gilgamesh", DataCenter::Aether),
    (World::Jenova, "Jenova", DataCenter::Aether),
    (World::Midgardsormr, "Midgardsormr", DataCenter::Aether),
    (World::Sargatanas, "Sargatanas", DataCenter::Aether),
    (World::Siren, "Siren", DataCenter::Aether),
    (World::Balmung, "Balmung", DataCenter::Crystal),
    (World::Brynhildr, "Brynhildr", DataCenter::Crystal),
    (World::Coeurl, "Coeurl", DataCenter::Crystal),
    (World::Diabolos, "Diabolos", DataCenter::Crystal),
    (World::Goblin, "Goblin", DataCenter::Crystal),
    (World::Malboro, "Malboro", DataCenter::Crystal),
    (World::Mateus, "Mateus", DataCenter::Crystal),
    (World::Zalera, "Zalera", DataCenter::Crystal),
    (World::Cuchulainn, "Cuchulainn", DataCenter::Dynamis),
    (World::Golem, "Golem", DataCenter::Dynamis),
    (World::Halicarnassus, "Halicarnassus", DataCenter::Dynamis),
    (World::Kraken, "Kraken", DataCenter::Dynamis),
    (World::Maduin, "Maduin", DataCenter::Dynamis),
    (World::Marilith, "Marilith", DataCenter::Dynamis),
    (World::Rafflesia, "Rafflesia", DataCenter::Dynamis),
    (World::Seraph, "Seraph", DataCenter::Dynamis),
    (World::Behemoth, "Behemoth", DataCenter::Primal),
    (World::Excalibur, "Excalibur", DataCenter::Primal),
    (World::Exodus, "Exodus", DataCenter::Primal),
    (World::Famfrit, "Famfrit", DataCenter::Primal),
    (World::Hyperion, "Hyperion", DataCenter::Primal),
    (World::Lamia, "Lamia", DataCenter::Primal),
    (World::Leviathan, "Leviathan", DataCenter::Primal),
    (World::Ultros, "Ultros", DataCenter::Primal),
    (World::Cerberus, "Cerberus", DataCenter::Chaos),
    (World::Louisoix, "Louisoix", DataCenter::Chaos),
    (World::Moogle, "Moogle", DataCenter::Chaos),
    (World::Omega, "Omega", DataCenter::Chaos),
    (World::Phantom, "Phantom", DataCenter::Chaos),
    (World::Ragnarok, "Ragnarok", DataCenter::Chaos),
    (World::Sagittarius, "Sagittarius", DataCenter::Chaos),
    (World::Spriggan, "Spriggan", DataCenter::Chaos),
    (World::Alpha, "Alpha", DataCenter::Light),
    (World::Lich, "Lich", DataCenter::Light),
    (World::Odin, "Odin", DataCenter::Light),
    (World::Phoenix, "Phoenix", DataCenter::Light),
    (World::Raiden, "Raiden", DataCenter::Light),
    (World::Shiva, "Shiva", DataCenter::Light),
    (World::Twintania, "Twintania", DataCenter::Light),
    (World::Zodiark, "Zodiark", DataCenter::Light),
    (World::Aegis, "Aegis", DataCenter::Elemental),
    (World::Atomos, "Atomos", DataCenter::Elemental),
    (World::Carbuncle, "Carbuncle", DataCenter::Elemental),
    (World::Garuda, "Garuda", DataCenter::Elemental),
    (World::Gungnir, "Gungnir", DataCenter::Elemental),
    (World::Kujata, "Kujata", DataCenter::Elemental),
    (World::Tonberry, "Tonberry", DataCenter::Elemental),
    (World::Typhon, "Typhon", DataCenter::Elemental),
    (World::Alexander, "Alexander", DataCenter::Gaia),
    (World::Bahamut, "Bahamut", DataCenter::Gaia),
    (World::Durandal, "Durandal", DataCenter::Gaia),
    (World::Fenrir, "Fenrir", DataCenter::Gaia),
    (World::Ifrit, "Ifrit", DataCenter::Gaia),
    (World::Ridill, "Ridill", DataCenter::Gaia),
    (World::Tiamat, "Tiamat", DataCenter::Gaia),
    (World::Ultima, "Ultima", DataCenter::Gaia),
    (World::Anima, "Anima", DataCenter::Mana),
    (World::Asura, "Asura", DataCenter::Mana),
    (World::Chocobo, "Chocobo", DataCenter::Mana),
    (World::Hades, "Hades", DataCenter::Mana),
    (World::Ixion, "Ixion", DataCenter::Mana),
    (World::Masamune, "Masamune", DataCenter::Mana),
    (World::Pandaemonium, "Pandaemonium", DataCenter::Mana),
    (World::Titan, "Titan", DataCenter::Mana),
    (World::Belias, "Belias", DataCenter::Meteor),
    (World::Mandragora, "Mandragora", DataCenter::Meteor),
    (World::Ramuh, "Ramuh", DataCenter::Meteor),
    (World::Shinryu, "Shinryu", DataCenter::Meteor),
    (World::Unicorn, "Unicorn", DataCenter::Meteor),
    (World::Valefor, "Valefor", DataCenter::Meteor),
    (World::Yojimbo, "Yojimbo", DataCenter::Meteor),
    (World::Zeromus, "Zeromus", DataCenter::Meteor),
    (World::Bismarck, "Bismarck", DataCenter::Materia),
    (World::Ravana, "Ravana", DataCenter::Materia),
    (World::Sephirot, "Sephirot", DataCenter::Materia),
    (World::Sophia, "Sophia", DataCenter::Materia),
    (World::Zurvan, "Zurvan", DataCenter::Materia),
];

impl World {
    pub fn all() -> impl Iterator<Item = World> {
        WORLDS.iter().map(|(world, _, _)| *world)
    }

    pub fn as_str(self) -> &'static str {
        WORLDS
            .iter()
            .find(|(world, _, _)| *world == self)
            .map(|(_, name, _)| *name)
            .expect("every world has a table row")
    }

    pub fn data_center(self) -> DataCenter {
        WORLDS
            .iter()
            .find(|(world, _, _)| *world == self)
            .map(|(_, _, dc)| *dc)
            .expect("every world has a table row")
    }

    pub fn from_name(name: &str) -> Result<World, LocationError> {
        let name = name.trim();
        WORLDS
            .iter()
            .find(|(_, label, _)| name.eq_ignore_ascii_case(label))
            .map(|(world, _, _)| *world)
            .ok_or_else(|| LocationError::UnknownWorld(name.to_string()))
    }
}

impl std::fmt::Display for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// HOUSING ZONES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HousingZone {
    Mist,
    LavenderBeds,
    Goblet,
    Shirogane,
    Empyreum,
}

impl HousingZone {
    pub const ALL: &'static [HousingZone] = &[
        HousingZone::Mist,
        HousingZone::LavenderBeds,
        HousingZone::Goblet,
        HousingZone::Shirogane,
        HousingZone::Empyreum,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HousingZone::Mist => "Mist",
            HousingZone::LavenderBeds => "Lavender Beds",
            HousingZone::Goblet => "Goblet",
            HousingZone::Shirogane => "Shirogane",
            HousingZone::Empyreum => "Empyreum",
        }
    }

    pub fn from_name(name: &str) -> Result<HousingZone, LocationError> {
        let name = name.trim();
        // The only multi-word zone name folds onto the single LavenderBeds
        // identifier; everything else matches its identifier directly.
        if name.eq_ignore_ascii_case("Lavender Beds")
            || name.eq_ignore_ascii_case("LavenderBeds")
        {
            return Ok(HousingZone::LavenderBeds);
        }
        match name {
            n if n.eq_ignore_ascii_case("Mist") => Ok(HousingZone::Mist),
            n if n.eq_ignore_ascii_case("Goblet") => Ok(HousingZone::Goblet),
            n if n.eq_ignore_ascii_case("Shirogane") => Ok(HousingZone::Shirogane),
            n if n.eq_ignore_ascii_case("Empyreum") => Ok(HousingZone::Empyreum),
            _ => Err(LocationError::UnknownZone(name.to_string())),
        }
    }
}

impl std::fmt::Display for HousingZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// NORMALIZATION
// ============================================================================

/// A venue location with its name fields resolved onto the internal enums.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedLocation {
    pub data_center: Option<DataCenter>,
    pub world: Option<World>,
    pub zone: Option<HousingZone>,
    pub ward: Option<u32>,
    pub plot: Option<u32>,
    pub apartment: Option<u32>,
    pub room: Option<u32>,
    pub subdivision: bool,
    pub override_label: Option<String>,
}

/// Resolve a raw location's free-text names onto the internal enums. When
/// the data center is absent but the world is known, the data center is
/// derived from the partition table. Any unmatched name is an error; whether
/// to skip the record or abort the batch is the caller's call.
pub fn normalize(raw: &Location) -> Result<NormalizedLocation, LocationError> {
    let world = raw
        .world
        .as_deref()
        .map(World::from_name)
        .transpose()?;

    let data_center = match raw.data_center.as_deref() {
        Some(name) => Some(DataCenter::from_name(name)?),
        None => world.map(DataCenter::from_world),
    };

    let zone = raw
        .zone
        .as_deref()
        .map(HousingZone::from_name)
        .transpose()?;

    Ok(NormalizedLocation {
        data_center,
        world,
        zone,
        ward: raw.ward,
        plot: raw.plot,
        apartment: raw.apartment,
        room: raw.room,
        subdivision: raw.subdivision,
        override_label: raw.override_label.clone(),
    })
}

impl NormalizedLocation {
    /// Human-readable address for embeds, e.g.
    /// "Jenova, Lavender Beds, Ward 12, Plot 34 (subdivision)". Returns the
    /// override label unchanged when the venue set one.
    pub fn address(&self) -> Option<String> {
        if let Some(label) = &self.override_label {
            return Some(label.clone());
        }

        let mut parts = Vec::new();
        if let Some(world) = self.world {
            parts.push(world.to_string());
        }
        if let Some(zone) = self.zone {
            parts.push(zone.to_string());
        }
        if let Some(ward) = self.ward {
            parts.push(format!("Ward {ward}"));
        }
        if let Some(apartment) = self.apartment {
            parts.push(format!("Apartment {apartment}"));
        } else if let Some(plot) = self.plot {
            parts.push(format!("Plot {plot}"));
        }
        if let Some(room) = self.room {
            parts.push(format!("Room {room}"));
        }
        if parts.is_empty() {
            return None;
        }

        let mut address = parts.join(", ");
        if self.subdivision {
            address.push_str(" (subdivision)");
        }
        Some(address)
    }
}
