use crate::models::Area;

/// Keywords per area, checked top to bottom
///
/// Order is significant: keyword lists overlap (`"bally"` is a substring of
/// `"ballygunge"`, `"sector"` appears in Salt Lake and New Town addresses alike)
/// and the first area with a matching keyword wins.
pub const AREA_KEYWORDS: &[(Area, &[&str])] = &[
    (
        Area::North,
        &[
            "shyambazar",
            "bagbazar",
            "kumartuli",
            "shobhabazar",
            "hatibagan",
            "ahiritola",
            "baranagar",
            "belgachia",
            "north kolkata",
        ],
    ),
    (
        Area::South,
        &[
            "gariahat",
            "ballygunge",
            "kalighat",
            "tollygunge",
            "behala",
            "jadavpur",
            "bhowanipore",
            "chetla",
            "santoshpur",
            "south kolkata",
        ],
    ),
    (
        Area::Central,
        &[
            "college street",
            "sealdah",
            "bowbazar",
            "esplanade",
            "park street",
            "maniktala",
            "central kolkata",
        ],
    ),
    (
        Area::SaltLake,
        &["salt lake", "saltlake", "bidhannagar", "sector"],
    ),
    (
        Area::NewTown,
        &["new town", "newtown", "rajarhat", "action area"],
    ),
    (Area::Howrah, &["howrah", "shibpur", "bally", "salkia"]),
    (Area::DumDum, &["dum dum", "dumdum", "nagerbazar", "lake town"]),
];

/// Classify a free-text address into an area
///
/// Falls back to [`Area::Other`] when no keyword matches. This is a heuristic:
/// an ambiguous substring can land an address in the wrong area.
pub fn classify(address: &str) -> Area {
    let address = address.to_lowercase();

    AREA_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| address.contains(keyword)))
        .map(|(area, _)| *area)
        .unwrap_or(Area::Other)
}
