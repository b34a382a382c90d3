//! Fixed option lists offered by the treatment-log form: the terminal's
//! vessels, ballast tanks and treatment dye colors.

use crate::core::validation::parse_positive;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Vessel {
    pub id: &'static str,
    pub name: &'static str,
    pub imo: &'static str,
    pub kind: &'static str,
    pub flag: &'static str,
    pub capacity: &'static str,
    pub status: &'static str,
    pub last_treatment: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

pub const VESSELS: &[Vessel] = &[
    Vessel {
        id: "vessel-001",
        name: "MV Atlantic Pioneer",
        imo: "IMO9876543",
        kind: "Container Ship",
        flag: "Panama",
        capacity: "15,000 m³",
        status: "Active",
        last_treatment: "2025-07-14 08:30",
    },
    Vessel {
        id: "vessel-002",
        name: "MV Pacific Explorer",
        imo: "IMO9876544",
        kind: "Bulk Carrier",
        flag: "Liberia",
        capacity: "22,000 m³",
        status: "Active",
        last_treatment: "2025-07-13 14:15",
    },
    Vessel {
        id: "vessel-003",
        name: "MV Nordic Star",
        imo: "IMO9876545",
        kind: "Tanker",
        flag: "Marshall Islands",
        capacity: "18,500 m³",
        status: "Pending",
        last_treatment: "2025-07-12 10:45",
    },
];

pub const TANKS: &[SelectOption] = &[
    SelectOption { value: "tank-1", label: "Tank 1 - Port Forward" },
    SelectOption { value: "tank-2", label: "Tank 2 - Starboard Forward" },
    SelectOption { value: "tank-3", label: "Tank 3 - Port Aft" },
    SelectOption { value: "tank-4", label: "Tank 4 - Starboard Aft" },
    SelectOption { value: "tank-5", label: "Tank 5 - Center" },
    SelectOption { value: "tank-6", label: "Tank 6 - Double Bottom" },
];

pub const DYE_COLORS: &[SelectOption] = &[
    SelectOption { value: "red", label: "Red Dye" },
    SelectOption { value: "blue", label: "Blue Dye" },
    SelectOption { value: "green", label: "Green Dye" },
    SelectOption { value: "yellow", label: "Yellow Dye" },
    SelectOption { value: "purple", label: "Purple Dye" },
    SelectOption { value: "orange", label: "Orange Dye" },
];

/// Share of the discharged volume injected as dye (0.5 %).
pub const DYE_RATIO: f64 = 0.005;

pub fn find_vessel(id: &str) -> Option<&'static Vessel> {
    VESSELS.iter().find(|v| v.id == id)
}

pub fn tank_label(value: &str) -> Option<&'static str> {
    TANKS.iter().find(|t| t.value == value).map(|t| t.label)
}

pub fn dye_label(value: &str) -> Option<&'static str> {
    DYE_COLORS.iter().find(|d| d.value == value).map(|d| d.label)
}

/// Estimated litres of dye injected, from the raw form values, rounded to
/// two decimals like the stored column. Zero unless both the discharge rate
/// and the quantity are finite positive numbers.
pub fn estimated_dye(discharge_rate: &str, quantity_discharged: &str) -> f64 {
    match (parse_positive(discharge_rate), parse_positive(quantity_discharged)) {
        (Some(_), Some(quantity)) => (quantity * DYE_RATIO * 100.0).round() / 100.0,
        _ => 0.0,
    }
}
