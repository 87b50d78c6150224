// Static lookup data: query aliases and per-site model mappings.
// Keys of ALIASES are stored uppercased; lookups fold the query to uppercase first.

pub const ALIASES: &[(&str, &str)] = &[
    ("VFR800", "VFR800"),
    ("VFR 800", "VFR800"),
    ("VFR", "VFR800"),
    ("ВФР", "VFR800"),
    ("ВФР800", "VFR800"),
    ("ВЫФЕР", "VFR800"),
    ("ВЫФЕРЬ", "VFR800"),
    ("R6", "R6"),
    ("YZF-R6", "R6"),
    ("YZFR6", "R6"),
    ("Р6", "R6"),
    ("ЭР6", "R6"),
    ("ЭРШЕСТЬ", "R6"),
];

/// auto.ru catalogue path and model id.
pub fn auto_ru_model(model: &str) -> Option<(&'static str, &'static str)> {
    match model {
        "VFR800" => Some(("used/honda/vfr/", "7889")),
        "R6" => Some(("used/yamaha/yzf-r6/", "9605")),
        _ => None,
    }
}

/// avito.ru free-text search term.
pub fn avito_model(model: &str) -> Option<&'static str> {
    match model {
        "VFR800" => Some("honda vfr 800"),
        "R6" => Some("yamaha yzf-r6"),
        _ => None,
    }
}
