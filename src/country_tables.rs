//! Static reconciliation data shipped with the dashboard.

use crate::names::Continent::{self, *};

/// World Bank country names whose boundary feature carries a different name.
pub const GEO_RENAMES: &[(&str, &str)] = &[
    ("Bahamas, The", "The Bahamas"),
    ("Brunei Darussalam", "Brunei"),
    ("Congo, Dem. Rep.", "Democratic Republic of the Congo"),
    ("Congo, Rep.", "Republic of the Congo"),
    ("Cote d'Ivoire", "Ivory Coast"),
    ("Czechia", "Czech Republic"),
    ("Egypt, Arab Rep.", "Egypt"),
    ("Eswatini", "Swaziland"),
    ("Gambia, The", "Gambia"),
    ("Guinea-Bissau", "Guinea Bissau"),
    ("Hong Kong SAR, China", "Hong Kong"),
    ("Iran, Islamic Rep.", "Iran"),
    ("Korea, Dem. People's Rep.", "North Korea"),
    ("Korea, Rep.", "South Korea"),
    ("Kyrgyz Republic", "Kyrgyzstan"),
    ("Lao PDR", "Laos"),
    ("Macao SAR, China", "Macau"),
    ("Macedonia, FYR", "Macedonia"),
    ("Micronesia, Fed. Sts.", "Micronesia"),
    ("North Macedonia", "Macedonia"),
    ("Russian Federation", "Russia"),
    ("Serbia", "Republic of Serbia"),
    ("Slovak Republic", "Slovakia"),
    ("Syrian Arab Republic", "Syria"),
    ("Tanzania", "United Republic of Tanzania"),
    ("Timor-Leste", "East Timor"),
    ("Turkiye", "Turkey"),
    ("United Kingdom", "England"),
    ("United States", "USA"),
    ("Venezuela, RB", "Venezuela"),
    ("Viet Nam", "Vietnam"),
    ("Virgin Islands (U.S.)", "U.S. Virgin Islands"),
    ("West Bank and Gaza", "West Bank"),
    ("Yemen, Rep.", "Yemen"),
];

/// Case-insensitive patterns that mark aggregate and regional rows.
pub const AGGREGATE_PATTERNS: &[&str] = &[
    r"\bincome\b",
    r"\bworld\b",
    r"\bunion\b",
    r"\boecd\b",
    r"\bdividend\b",
    r"\barea\b",
    r"\btotal\b",
    r"\bmembers\b",
    r"\bsmall states\b",
    r"\bida\b",
    r"\bibrd\b",
    r"\bexcluding\b",
    r"\bfragile\b",
    r"\bheavily indebted\b",
    r"\bleast developed\b",
    r"\bnot classified\b",
    r"&",
    r"^sub-saharan africa",
    r"^africa (eastern|western)",
    r"^central europe and the baltics$",
    r"^(north america|south asia|latin america|middle east)",
];

/// ISO3 code -> continent, one entry per code.
pub const CONTINENTS: &[(&str, Continent)] = &[
    // Africa
    ("DZA", Africa), ("AGO", Africa), ("BEN", Africa), ("BWA", Africa), ("BFA", Africa),
    ("BDI", Africa), ("CMR", Africa), ("CPV", Africa), ("CAF", Africa), ("TCD", Africa),
    ("COM", Africa), ("COD", Africa), ("COG", Africa), ("CIV", Africa), ("DJI", Africa),
    ("EGY", Africa), ("GNQ", Africa), ("ERI", Africa), ("ETH", Africa), ("GAB", Africa),
    ("GMB", Africa), ("GHA", Africa), ("GIN", Africa), ("GNB", Africa), ("KEN", Africa),
    ("LSO", Africa), ("LBR", Africa), ("LBY", Africa), ("MDG", Africa), ("MWI", Africa),
    ("MLI", Africa), ("MRT", Africa), ("MUS", Africa), ("MAR", Africa), ("MOZ", Africa),
    ("NAM", Africa), ("NER", Africa), ("NGA", Africa), ("RWA", Africa), ("STP", Africa),
    ("SEN", Africa), ("SYC", Africa), ("SLE", Africa), ("SOM", Africa), ("ZAF", Africa),
    ("SSD", Africa), ("SDN", Africa), ("SWZ", Africa), ("TZA", Africa), ("TGO", Africa),
    ("TUN", Africa), ("UGA", Africa), ("ZMB", Africa), ("ZWE", Africa), ("ESH", Africa),
    // Asia
    ("AFG", Asia), ("ARM", Asia), ("AZE", Asia), ("BHR", Asia), ("BGD", Asia),
    ("BTN", Asia), ("BRN", Asia), ("KHM", Asia), ("CHN", Asia), ("CYP", Asia),
    ("GEO", Asia), ("IND", Asia), ("IDN", Asia), ("IRN", Asia), ("IRQ", Asia),
    ("ISR", Asia), ("JPN", Asia), ("JOR", Asia), ("KAZ", Asia), ("KWT", Asia),
    ("KGZ", Asia), ("LAO", Asia), ("LBN", Asia), ("MYS", Asia), ("MDV", Asia),
    ("MNG", Asia), ("MMR", Asia), ("NPL", Asia), ("OMN", Asia), ("PAK", Asia),
    ("PSE", Asia), ("PHL", Asia), ("QAT", Asia), ("SAU", Asia), ("SGP", Asia),
    ("LKA", Asia), ("SYR", Asia), ("TJK", Asia), ("THA", Asia), ("TLS", Asia),
    ("TUR", Asia), ("TKM", Asia), ("ARE", Asia), ("UZB", Asia), ("VNM", Asia),
    ("YEM", Asia), ("KOR", Asia), ("PRK", Asia), ("HKG", Asia), ("MAC", Asia),
    // Europe
    ("ALB", Europe), ("AND", Europe), ("AUT", Europe), ("BLR", Europe), ("BEL", Europe),
    ("BIH", Europe), ("BGR", Europe), ("HRV", Europe), ("CZE", Europe), ("DNK", Europe),
    ("EST", Europe), ("FRO", Europe), ("FIN", Europe), ("FRA", Europe), ("DEU", Europe),
    ("GIB", Europe), ("GRC", Europe), ("HUN", Europe), ("ISL", Europe), ("IRL", Europe),
    ("IMN", Europe), ("ITA", Europe), ("XKX", Europe), ("LVA", Europe), ("LIE", Europe),
    ("LTU", Europe), ("LUX", Europe), ("MKD", Europe), ("MLT", Europe), ("MDA", Europe),
    ("MCO", Europe), ("MNE", Europe), ("NLD", Europe), ("NOR", Europe), ("POL", Europe),
    ("PRT", Europe), ("ROU", Europe), ("RUS", Europe), ("SMR", Europe), ("SRB", Europe),
    ("SVK", Europe), ("SVN", Europe), ("ESP", Europe), ("SWE", Europe), ("CHE", Europe),
    ("UKR", Europe), ("GBR", Europe), ("VAT", Europe), ("CHI", Europe),
    // North America
    ("AIA", NorthAmerica), ("ATG", NorthAmerica), ("BHS", NorthAmerica), ("BRB", NorthAmerica),
    ("BLZ", NorthAmerica), ("BMU", NorthAmerica), ("VGB", NorthAmerica), ("CAN", NorthAmerica),
    ("CYM", NorthAmerica), ("CRI", NorthAmerica), ("CUB", NorthAmerica), ("DMA", NorthAmerica),
    ("DOM", NorthAmerica), ("SLV", NorthAmerica), ("GRL", NorthAmerica), ("GRD", NorthAmerica),
    ("GLP", NorthAmerica), ("GTM", NorthAmerica), ("HTI", NorthAmerica), ("HND", NorthAmerica),
    ("JAM", NorthAmerica), ("MTQ", NorthAmerica), ("MEX", NorthAmerica), ("MSR", NorthAmerica),
    ("KNA", NorthAmerica), ("NIC", NorthAmerica), ("PAN", NorthAmerica), ("PRI", NorthAmerica),
    ("LCA", NorthAmerica), ("SPM", NorthAmerica), ("VCT", NorthAmerica), ("TTO", NorthAmerica),
    ("TCA", NorthAmerica), ("USA", NorthAmerica), ("VIR", NorthAmerica), ("ABW", NorthAmerica),
    ("CUW", NorthAmerica), ("SXM", NorthAmerica), ("MAF", NorthAmerica),
    // Oceania
    ("ASM", Oceania), ("AUS", Oceania), ("COK", Oceania), ("FJI", Oceania), ("PYF", Oceania),
    ("GUM", Oceania), ("KIR", Oceania), ("MHL", Oceania), ("FSM", Oceania), ("NRU", Oceania),
    ("NCL", Oceania), ("NZL", Oceania), ("NIU", Oceania), ("NFK", Oceania), ("MNP", Oceania),
    ("PLW", Oceania), ("PNG", Oceania), ("PCN", Oceania), ("WSM", Oceania), ("SLB", Oceania),
    ("TKL", Oceania), ("TON", Oceania), ("TUV", Oceania), ("VUT", Oceania), ("WLF", Oceania),
    // South America
    ("ARG", SouthAmerica), ("BOL", SouthAmerica), ("BRA", SouthAmerica), ("CHL", SouthAmerica),
    ("COL", SouthAmerica), ("ECU", SouthAmerica), ("FLK", SouthAmerica), ("GUF", SouthAmerica),
    ("GUY", SouthAmerica), ("PRY", SouthAmerica), ("PER", SouthAmerica), ("SUR", SouthAmerica),
    ("URY", SouthAmerica), ("VEN", SouthAmerica),
];
