#![allow(clippy::too_many_lines)]
//! Ranked USPS street suffix table and suffix resolution.
//!
//! The table is tried in order and the first entry found on token
//! boundaries wins. Entries are ordered longest first so that multi-word
//! suffixes like `"TERRACE PLACE"` are tried before `"TERRACE"` or
//! `"PLACE"`, and two-letter abbreviations like `"ST"` are only reached
//! once every longer candidate has failed.

use maptools_address_models::SuffixMatch;

/// USPS Publication 28 (Appendix C) street suffixes, both abbreviations and
/// full words, sorted by descending length then declaration order.
pub const USPS_STREET_SUFFIXES: &[&str] = &[
    "TERRACE PLACE",
    "TRAFFICWAY",
    "THROUGHWAY",
    "EXTENSIONS",
    "EXPRESSWAY",
    "CROSSROADS",
    "CONCOURSE",
    "BOULEVARD",
    "STRAVENUE",
    "CROSSROAD",
    "EXTENSION",
    "JUNCTIONS",
    "MOUNTAINS",
    "UNDERPASS",
    "CROSSING",
    "JUNCTION",
    "TURNPIKE",
    "PARKWAYS",
    "BROADWAY",
    "MOUNTAIN",
    "VILLIAGE",
    "MOTORWAY",
    "VILLAGES",
    "OVERPASS",
    "CRESCENT",
    "CAUSEWAY",
    "CENTERS",
    "STRAVEN",
    "SPRINGS",
    "EXPRESS",
    "ESTATES",
    "RANCHES",
    "TUNNELS",
    "VIADUCT",
    "VALLEYS",
    "GARDENS",
    "HARBORS",
    "PASSAGE",
    "HIGHWAY",
    "JUNCTON",
    "MISSION",
    "ISLANDS",
    "HEIGHTS",
    "ORCHARD",
    "MOUNTIN",
    "PRAIRIE",
    "PARKWAY",
    "FREEWAY",
    "FORESTS",
    "STREETS",
    "CORNERS",
    "COMMONS",
    "STATION",
    "TERRACE",
    "SQUARES",
    "TRAILER",
    "STRVNUE",
    "CIRCLES",
    "LANDING",
    "HOLLOWS",
    "GATEWAY",
    "VILLAGE",
    "MEADOWS",
    "DRIVES",
    "CRSSNG",
    "BLUFFS",
    "BROOKS",
    "ARCADE",
    "DIVIDE",
    "RIDGES",
    "RADIEL",
    "SHORES",
    "STRAVN",
    "CLIFFS",
    "EXTNSN",
    "SHOARS",
    "SHOALS",
    "RAPIDS",
    "MANORS",
    "MNTAIN",
    "HIGHWY",
    "MEDOWS",
    "JUNCTN",
    "AVENUE",
    "LIGHTS",
    "KNOLLS",
    "GROVES",
    "ISLNDS",
    "HARBOR",
    "ORCHRD",
    "STREAM",
    "TURNPK",
    "TUNNEL",
    "ESTATE",
    "FOREST",
    "RADIAL",
    "TRACKS",
    "CORNER",
    "CIRCLE",
    "SQUARE",
    "TRACES",
    "SKYWAY",
    "SPRNGS",
    "STREET",
    "SPRING",
    "COURTS",
    "COURSE",
    "CRSENT",
    "COMMON",
    "BYPASS",
    "CANYON",
    "BRIDGE",
    "CAUSWA",
    "CENTER",
    "BRANCH",
    "SUMITT",
    "SUMMIT",
    "CENTRE",
    "BOTTOM",
    "STREME",
    "TRAILS",
    "JCTION",
    "MEADOW",
    "VILLAG",
    "ISLAND",
    "GREENS",
    "VALLEY",
    "POINTS",
    "PLAINS",
    "PARKWY",
    "GATEWY",
    "FORGES",
    "GATWAY",
    "FREEWY",
    "FIELDS",
    "HOLLOW",
    "GARDEN",
    "UNIONS",
    "VIADCT",
    "CURVE",
    "SPRNG",
    "SPNGS",
    "RNCHS",
    "RIVER",
    "ROADS",
    "SHORE",
    "SHOAR",
    "SHOAL",
    "CRSNT",
    "SPURS",
    "CRCLE",
    "COVES",
    "CREST",
    "BOULV",
    "CENTR",
    "SUMIT",
    "TRLRS",
    "TRNPK",
    "TUNEL",
    "TUNLS",
    "STRVN",
    "WELLS",
    "ALLEY",
    "ALLEE",
    "ANNEX",
    "BEACH",
    "TRAIL",
    "BLUFF",
    "BOTTM",
    "BROOK",
    "BRNCH",
    "CNTER",
    "COURT",
    "DRIVE",
    "CLIFF",
    "BRDGE",
    "BURGS",
    "BYPAS",
    "CANYN",
    "TRACK",
    "TRACE",
    "STRAV",
    "STATN",
    "CIRCL",
    "CREEK",
    "RANCH",
    "FORDS",
    "ROUTE",
    "RIDGE",
    "HAVEN",
    "HARBR",
    "FRWAY",
    "HOLWS",
    "TUNNL",
    "UNION",
    "VALLY",
    "FORKS",
    "GTWAY",
    "PKWYS",
    "PLAIN",
    "GARDN",
    "FLATS",
    "FIELD",
    "FALLS",
    "FERRY",
    "PORTS",
    "PLACE",
    "PLAZA",
    "POINT",
    "PKWAY",
    "PINES",
    "PIKES",
    "PATHS",
    "GLENS",
    "FORGE",
    "GRDEN",
    "RAPID",
    "GREEN",
    "GRDNS",
    "HRBOR",
    "MOUNT",
    "MNTNS",
    "HILLS",
    "ISLES",
    "ISLND",
    "PARKS",
    "GROVE",
    "MILLS",
    "MISSN",
    "HIWAY",
    "MANOR",
    "INLET",
    "KNOLL",
    "JCTNS",
    "LIGHT",
    "LAKES",
    "LNDNG",
    "LOCKS",
    "LODGE",
    "LOOPS",
    "AVENU",
    "WALKS",
    "BAYOU",
    "BAYOO",
    "AVNUE",
    "VIEWS",
    "VILLE",
    "VILLG",
    "VISTA",
    "DALE",
    "VLLY",
    "VLGS",
    "VIST",
    "VILL",
    "VLYS",
    "VIEW",
    "WALK",
    "VSTA",
    "LAKE",
    "JCTN",
    "JCTS",
    "AVEN",
    "KEYS",
    "KNLS",
    "LOCK",
    "LOAF",
    "LANE",
    "LAND",
    "LCKS",
    "LDGE",
    "HWAY",
    "KNOL",
    "MALL",
    "MDWS",
    "LODG",
    "LOOP",
    "HIWY",
    "FRWY",
    "ORCH",
    "NECK",
    "MSSN",
    "MTIN",
    "GROV",
    "HLLW",
    "INLT",
    "PARK",
    "ISLE",
    "OVAL",
    "MEWS",
    "HILL",
    "MILL",
    "MNRS",
    "MNTN",
    "LNDG",
    "PLZA",
    "PNES",
    "PORT",
    "FRST",
    "FRRY",
    "FRKS",
    "PASS",
    "PATH",
    "FLAT",
    "FALL",
    "GLEN",
    "GDNS",
    "VDCT",
    "FORT",
    "GTWY",
    "HARB",
    "FORK",
    "FORG",
    "HOLW",
    "GRDN",
    "EXTS",
    "PIKE",
    "PKWY",
    "PINE",
    "BLVD",
    "BLUF",
    "TRLR",
    "BOUL",
    "TRLS",
    "TUNL",
    "STRM",
    "STRT",
    "ANEX",
    "DRIV",
    "SHLS",
    "EXPW",
    "EXPY",
    "EXTN",
    "CRSE",
    "CRCL",
    "CORS",
    "COVE",
    "SQRS",
    "SQRE",
    "CSWY",
    "RPDS",
    "PRTS",
    "ROAD",
    "RDGE",
    "SHRS",
    "RDGS",
    "REST",
    "RIVR",
    "RNCH",
    "FORD",
    "FLTS",
    "RAMP",
    "FLDS",
    "RADL",
    "ESTS",
    "EXPR",
    "PLNS",
    "ALLY",
    "XING",
    "ANNX",
    "WALL",
    "BURG",
    "CNYN",
    "BYPS",
    "CAMP",
    "BYPA",
    "BEND",
    "WELL",
    "WAYS",
    "TRAK",
    "TRCE",
    "TRKS",
    "STRA",
    "CAPE",
    "CENT",
    "TERR",
    "SLIP",
    "SPGS",
    "CNTR",
    "SPUR",
    "SPNG",
    "CLUB",
    "CLFS",
    "CRES",
    "CIRC",
    "DAM",
    "ARC",
    "PRK",
    "PKY",
    "GRV",
    "GLN",
    "VST",
    "VWS",
    "LDG",
    "VLY",
    "AVE",
    "AVN",
    "VIS",
    "VLG",
    "FRD",
    "VIA",
    "NCK",
    "MTN",
    "GRN",
    "HLS",
    "FWY",
    "FRY",
    "OVL",
    "HBR",
    "JCT",
    "ISS",
    "MNT",
    "MNR",
    "LKS",
    "LGT",
    "KYS",
    "LCK",
    "HWY",
    "MDW",
    "HTS",
    "HVN",
    "KNL",
    "KEY",
    "FRG",
    "FRK",
    "FLD",
    "FRT",
    "COR",
    "RST",
    "RUE",
    "SQR",
    "DIV",
    "EXT",
    "SHL",
    "RVR",
    "RUN",
    "SHR",
    "FLT",
    "DVD",
    "PLZ",
    "RDG",
    "PLN",
    "EXP",
    "EST",
    "ROW",
    "RPD",
    "PRR",
    "PRT",
    "RAD",
    "PTS",
    "RIV",
    "RDS",
    "FLS",
    "CPE",
    "CRK",
    "DRV",
    "SQU",
    "STN",
    "STR",
    "CEN",
    "SMT",
    "SPG",
    "CTR",
    "CTS",
    "CLF",
    "CMP",
    "CLB",
    "CIR",
    "BRG",
    "BRK",
    "BTM",
    "BYP",
    "STA",
    "BOT",
    "TER",
    "BLF",
    "TRL",
    "BCH",
    "BND",
    "TRK",
    "ALY",
    "WLS",
    "WAY",
    "ANX",
    "DM",
    "DL",
    "AV",
    "VW",
    "WY",
    "ST",
    "SQ",
    "PT",
    "RD",
    "PR",
    "PL",
    "UN",
    "MT",
    "LN",
    "LF",
    "LK",
    "KY",
    "HT",
    "IS",
    "HL",
    "FT",
    "CV",
    "DR",
    "DV",
    "CT",
    "CP",
    "BR",
    "VL",
];

/// An immutable, ranked street suffix table.
///
/// Construct once with [`SuffixTable::usps`] and share by reference (or
/// behind an `Arc`) with every parser and worker that needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixTable {
    entries: Vec<String>,
}

impl SuffixTable {
    /// Builds a table from arbitrary entries.
    ///
    /// Entries are trimmed and upper-cased; empty entries and duplicates
    /// are dropped (first declaration wins). The remainder is stable-sorted
    /// by descending length, so declaration order breaks length ties.
    #[must_use]
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ranked: Vec<String> = Vec::new();
        for entry in entries {
            let entry = entry.as_ref().trim().to_ascii_uppercase();
            if !entry.is_empty() && !ranked.contains(&entry) {
                ranked.push(entry);
            }
        }
        ranked.sort_by_key(|e| std::cmp::Reverse(e.len()));

        Self { entries: ranked }
    }

    /// Builds the standard USPS suffix table.
    #[must_use]
    pub fn usps() -> Self {
        Self::new(USPS_STREET_SUFFIXES)
    }

    /// Entries in match order.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finds the highest-ranked suffix in a normalized street fragment.
    ///
    /// `fragment` must already be trimmed and upper-cased (see
    /// [`crate::parse::normalize_street`]). An entry only matches where it
    /// is bounded on both sides by the edge of the fragment or a
    /// non-alphanumeric character, so `"ST"` is not found inside
    /// `"LIVINGSTON"`.
    ///
    /// Returns `None` if no entry matches; this is logged as a warning but is
    /// not an error.
    #[must_use]
    pub fn resolve(&self, fragment: &str) -> Option<SuffixMatch> {
        let found = self.entries.iter().find_map(|entry| {
            find_bounded(fragment, entry).map(|index| SuffixMatch {
                suffix: entry.clone(),
                index,
            })
        });

        if found.is_none() {
            log::warn!("Could not find street type in {fragment}");
        }

        found
    }
}

/// Finds the highest-ranked suffix in `fragment` using `table`.
///
/// Equivalent to [`SuffixTable::resolve`].
#[must_use]
pub fn resolve_suffix(table: &SuffixTable, fragment: &str) -> Option<SuffixMatch> {
    table.resolve(fragment)
}

/// Returns the street type (USPS suffix) of a raw street, or an empty
/// string if none is recognized.
///
/// Unlike [`SuffixTable::resolve`], `street` does not need to be
/// normalized first.
#[must_use]
pub fn street_type(table: &SuffixTable, street: &str) -> String {
    let normalized = crate::parse::normalize_street(street).to_ascii_uppercase();
    table
        .resolve(&normalized)
        .map(|m| m.suffix)
        .unwrap_or_default()
}

/// Byte offset of the first occurrence of `needle` in `haystack` that sits
/// on token boundaries.
fn find_bounded(haystack: &str, needle: &str) -> Option<usize> {
    let bytes = haystack.as_bytes();
    let mut from = 0;

    while let Some(offset) = haystack[from..].find(needle) {
        let start = from + offset;
        let end = start + needle.len();

        let bounded_left = start == 0 || !bytes[start - 1].is_ascii_alphanumeric();
        let bounded_right = end == bytes.len() || !bytes[end].is_ascii_alphanumeric();
        if bounded_left && bounded_right {
            return Some(start);
        }

        from = start + needle.chars().next().map_or(1, char::len_utf8);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(fragment: &str) -> Option<(String, usize)> {
        SuffixTable::usps()
            .resolve(fragment)
            .map(|m| (m.suffix, m.index))
    }

    #[test]
    fn embedded_table_is_ranked_longest_first() {
        for pair in USPS_STREET_SUFFIXES.windows(2) {
            assert!(
                pair[0].len() >= pair[1].len(),
                "{:?} ranked before longer {:?}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn embedded_table_is_canonical() {
        let table = SuffixTable::usps();
        assert_eq!(table.len(), USPS_STREET_SUFFIXES.len());
        assert_eq!(table.entries()[0], "TERRACE PLACE");
        for (entry, expected) in table.entries().iter().zip(USPS_STREET_SUFFIXES) {
            assert_eq!(entry, expected);
            assert_eq!(entry.trim(), entry);
        }
    }

    #[test]
    fn new_sorts_trims_and_dedupes() {
        let table = SuffixTable::new(["ST", "dam ", "AVENUE", "DAM", "", "RD"]);
        assert_eq!(table.entries(), ["AVENUE", "DAM", "ST", "RD"]);
    }

    #[test]
    fn multi_word_suffix_wins() {
        assert_eq!(
            resolve("MAIN TERRACE PLACE"),
            Some(("TERRACE PLACE".to_string(), 5))
        );
    }

    #[test]
    fn finds_trailing_abbreviation() {
        assert_eq!(resolve("W 22 ST"), Some(("ST".to_string(), 5)));
        assert_eq!(resolve("100 N STATE ST"), Some(("ST".to_string(), 12)));
    }

    #[test]
    fn ignores_matches_inside_words() {
        assert_eq!(resolve("179 LIVINGSTON ST"), Some(("ST".to_string(), 15)));
    }

    #[test]
    fn finds_broadway() {
        assert_eq!(resolve("55 BROADWAY"), Some(("BROADWAY".to_string(), 3)));
    }

    #[test]
    fn longer_entry_outranks_position() {
        // "WALL" is a USPS suffix and is tried before "ST".
        assert_eq!(resolve("42 WALL ST"), Some(("WALL".to_string(), 3)));
    }

    #[test]
    fn equal_length_ties_follow_table_order() {
        let table = SuffixTable::new(["RD", "ST"]);
        let m = table.resolve("MAIN ST RD").unwrap();
        assert_eq!(m.suffix, "RD");
        assert_eq!(m.index, 8);
    }

    #[test]
    fn boundary_may_be_punctuation() {
        assert_eq!(resolve("12 OAK AVE."), Some(("AVE".to_string(), 7)));
    }

    #[test]
    fn non_ascii_entries_skip_unbounded_occurrences() {
        let table = SuffixTable::new(["É"]);
        let m = table.resolve("XÉ É").unwrap();
        assert_eq!(m.suffix, "É");
        assert_eq!(m.index, 4);
    }

    #[test]
    fn no_suffix_is_none() {
        assert_eq!(resolve("123 MAIN"), None);
        assert_eq!(resolve(""), None);
    }

    #[test]
    fn street_type_normalizes_input() {
        let table = SuffixTable::usps();
        assert_eq!(street_type(&table, "  w 22   st "), "ST");
        assert_eq!(street_type(&table, "Main Terrace Place"), "TERRACE PLACE");
        assert_eq!(street_type(&table, "123 Main"), "");
    }

    #[test]
    fn resolve_suffix_matches_method() {
        let table = SuffixTable::usps();
        assert_eq!(
            resolve_suffix(&table, "350 5 AVE"),
            table.resolve("350 5 AVE")
        );
    }
}
