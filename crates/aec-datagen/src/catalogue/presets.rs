//! Built-in catalogues.
//!
//! Element id offsets keep the familiar Revit-style low digits but are spaced
//! ten million apart so every type can hold millions of assets without its
//! element ids running into the next type's range.

use super::{AssetTypeDef, BuilderKind, CatalogueError, RelationshipCategory, TypeCatalogue};

const LEVELS: [&str; 5] = ["Level 1", "Level 2", "Level 3", "Level 4", "Level 5"];

const DEPARTMENTS: [&str; 5] = ["Administration", "Engineering", "Sales", "Operations", "IT"];
const OCCUPANCY_TYPES: [&str; 5] = ["Office", "Conference", "Storage", "Lobby", "Break Room"];

fn walls(tag: &str, type_id: &str, category: &str, weight: f64, start: u64) -> AssetTypeDef {
    AssetTypeDef::new(tag, BuilderKind::Wall, type_id, category, weight, start)
        .with_id_prefix("wall")
        .with_family("Exterior Wall", &["Brick on CMU", "Concrete - 12\"", "Metal Panel"])
        .with_family("Interior Wall", &["Generic - 6\"", "Generic - 4\"", "Gypsum - 5\""])
}

fn doors(tag: &str, type_id: &str, category: &str, weight: f64, start: u64) -> AssetTypeDef {
    AssetTypeDef::new(tag, BuilderKind::Door, type_id, category, weight, start)
        .with_id_prefix("door")
        .with_family("Single-Flush", &["36\" x 84\"", "32\" x 80\"", "30\" x 80\""])
        .with_family("Double-Flush", &["72\" x 84\"", "60\" x 84\""])
}

fn windows(tag: &str, type_id: &str, category: &str, weight: f64, start: u64) -> AssetTypeDef {
    AssetTypeDef::new(tag, BuilderKind::Window, type_id, category, weight, start)
        .with_id_prefix("window")
        .with_family("Fixed", &["48\" x 72\"", "36\" x 60\"", "24\" x 48\""])
        .with_family("Casement", &["36\" x 48\"", "24\" x 36\""])
}

fn rooms(tag: &str, type_id: &str, category: &str, weight: f64, start: u64) -> AssetTypeDef {
    AssetTypeDef::new(tag, BuilderKind::Room, type_id, category, weight, start)
        .with_id_prefix("room")
        .with_room_choices(&DEPARTMENTS, &OCCUPANCY_TYPES)
}

fn mep(tag: &str, type_id: &str, category: &str, weight: f64, start: u64) -> AssetTypeDef {
    AssetTypeDef::new(tag, BuilderKind::Generic, type_id, category, weight, start)
        .with_family("VAV Terminal", &["VAV w/ Reheat - 350 CFM", "VAV w/ Reheat - 500 CFM"])
        .with_family("Diffuser", &["4-Way - 24x24", "2-Way - 24x12"])
}

fn structural(tag: &str, type_id: &str, category: &str, weight: f64, start: u64) -> AssetTypeDef {
    AssetTypeDef::new(tag, BuilderKind::Generic, type_id, category, weight, start)
        .with_family("W-Wide Flange", &["W12X26", "W14X30", "W16X40"])
        .with_family("HSS-Hollow Structural Section", &["HSS8X8X1/2", "HSS6X6X3/8"])
}

fn furniture(tag: &str, type_id: &str, category: &str, weight: f64, start: u64) -> AssetTypeDef {
    AssetTypeDef::new(tag, BuilderKind::Generic, type_id, category, weight, start)
        .with_family("Desk", &["60\" x 30\"", "72\" x 36\"", "48\" x 24\""])
        .with_family("Chair", &["Task Chair", "Executive Chair", "Guest Chair"])
        .with_family("Table", &["Conference - 96\" x 48\"", "Break Room - 48\" x 30\""])
}

fn fixtures(tag: &str, type_id: &str, category: &str, weight: f64, start: u64) -> AssetTypeDef {
    AssetTypeDef::new(tag, BuilderKind::Generic, type_id, category, weight, start)
        .with_family("Troffer Light", &["2x4 LED - 40W", "2x2 LED - 28W"])
        .with_family("Pendant", &["LED - 15W", "LED - 25W"])
}

/// The single-model catalogue: eight Revit categories and four relationship
/// categories, weighted like a typical office building export.
pub fn standard() -> Result<TypeCatalogue, CatalogueError> {
    TypeCatalogue::builder()
        .asset_type(walls("walls", "autodesk.revit:wall-2.0.0", "OST_Walls", 0.23, 316_000))
        .asset_type(doors("doors", "autodesk.revit:door-2.0.0", "OST_Doors", 0.04, 10_318_000))
        .asset_type(windows(
            "windows",
            "autodesk.revit:window-2.0.0",
            "OST_Windows",
            0.06,
            20_319_000,
        ))
        .asset_type(rooms("rooms", "autodesk.revit:room-2.0.0", "OST_Rooms", 0.085, 30_320_000))
        .asset_type(mep(
            "mepComponents",
            "autodesk.mep:hvac-terminal-1.0.0",
            "OST_DuctTerminal",
            0.20,
            40_325_000,
        ))
        .asset_type(structural(
            "structuralElements",
            "autodesk.revit:structural-framing-2.0.0",
            "OST_StructuralFraming",
            0.115,
            50_330_000,
        ))
        .asset_type(furniture(
            "furniture",
            "autodesk.revit:furniture-2.0.0",
            "OST_Furniture",
            0.23,
            60_340_000,
        ))
        .asset_type(fixtures(
            "fixtures",
            "autodesk.revit:lighting-fixture-2.0.0",
            "OST_LightingFixtures",
            0.04,
            70_350_000,
        ))
        .relationship(RelationshipCategory::new(
            "hosted",
            "autodesk.revit:hosted-1.0.0",
            &["doors", "windows"],
            &["walls"],
            0.4,
        ))
        .relationship(RelationshipCategory::new(
            "roomBounding",
            "autodesk.revit:roomBounding-1.0.0",
            &["rooms"],
            &["walls"],
            0.3,
        ))
        .relationship(RelationshipCategory::new(
            "serves",
            "autodesk.mep:serves-1.0.0",
            &["mepComponents"],
            &["rooms"],
            0.2,
        ))
        .relationship(RelationshipCategory::new(
            "contains",
            "autodesk.revit:contains-1.0.0",
            &["rooms"],
            &["furniture", "fixtures"],
            0.1,
        ))
        .levels(&LEVELS)
        .phases(&["New Construction", "Existing", "Demolition", "Future"])
        .build()
}

/// The large-scale multi-tenant catalogue: singular tags, workload weights and
/// six equally weighted relationship categories.
pub fn revit_workload() -> Result<TypeCatalogue, CatalogueError> {
    TypeCatalogue::builder()
        .asset_type(walls("wall", "autodesk.revit:wall-2.0.0", "OST_Walls", 0.23, 1_000_000))
        .asset_type(mep(
            "mep",
            "autodesk.revit:mep-component-2.0.0",
            "OST_MEP",
            0.20,
            11_000_000,
        ))
        .asset_type(furniture(
            "furniture",
            "autodesk.revit:furniture-2.0.0",
            "OST_Furniture",
            0.23,
            21_000_000,
        ))
        .asset_type(structural(
            "structural",
            "autodesk.revit:structural-2.0.0",
            "OST_Structural",
            0.115,
            31_000_000,
        ))
        .asset_type(rooms("room", "autodesk.revit:room-2.0.0", "OST_Rooms", 0.085, 41_000_000))
        .asset_type(windows(
            "window",
            "autodesk.revit:window-2.0.0",
            "OST_Windows",
            0.06,
            51_000_000,
        ))
        .asset_type(doors("door", "autodesk.revit:door-2.0.0", "OST_Doors", 0.04, 61_000_000))
        .asset_type(fixtures(
            "fixture",
            "autodesk.revit:fixture-2.0.0",
            "OST_Fixtures",
            0.04,
            71_000_000,
        ))
        .relationship(RelationshipCategory::new(
            "hosted",
            "autodesk.revit:hosted-1.0.0",
            &["door", "window"],
            &["wall"],
            1.0,
        ))
        .relationship(RelationshipCategory::new(
            "roomBounding",
            "autodesk.revit:roomBounding-1.0.0",
            &["room"],
            &["wall"],
            1.0,
        ))
        .relationship(RelationshipCategory::new(
            "serves",
            "autodesk.mep:serves-1.0.0",
            &["mep"],
            &["room"],
            1.0,
        ))
        .relationship(RelationshipCategory::new(
            "connects",
            "autodesk.mep:connects-1.0.0",
            &["mep"],
            &["mep"],
            1.0,
        ))
        .relationship(RelationshipCategory::new(
            "contains",
            "autodesk.revit:contains-1.0.0",
            &["room"],
            &["furniture", "fixture"],
            1.0,
        ))
        .relationship(RelationshipCategory::new(
            "supports",
            "autodesk.revit:supports-1.0.0",
            &["structural"],
            &["wall", "structural"],
            1.0,
        ))
        .levels(&LEVELS)
        .phases(&["Existing", "Phase 1", "Phase 2", "Phase 3"])
        .build()
}
