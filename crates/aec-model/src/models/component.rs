//! Component trees: the schema-free property bag carried by every asset.
//!
//! A node is either a scalar leaf tagged with its value kind, or a group with a
//! `typeId` and an ordered map of named children. Groups come in two flavours
//! matching the wire format: `staticChildren` (fixed shape) and `insertions`
//! (open-ended maps such as parameter bags).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// A point `[x, y, z]` in model units (feet).
pub type Point3d = [f64; 3];

/// Ordered mapping of child name to node.
pub type ChildMap = IndexMap<String, ComponentNode>;

/// Declared kind of a leaf value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    String,
    Float64,
    Int32,
    Bool,
    Point3d,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::String => "String",
            ValueKind::Float64 => "Float64",
            ValueKind::Int32 => "Int32",
            ValueKind::Bool => "Bool",
            ValueKind::Point3d => "Point3d",
        }
    }
}

/// A scalar leaf. Serializes as `{"typeId": "Float64", "value": 12.5}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "typeId", content = "value")]
pub enum LeafValue {
    String(String),
    Float64(f64),
    Int32(i32),
    Bool(bool),
    Point3d(Point3d),
}

impl LeafValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            LeafValue::String(_) => ValueKind::String,
            LeafValue::Float64(_) => ValueKind::Float64,
            LeafValue::Int32(_) => ValueKind::Int32,
            LeafValue::Bool(_) => ValueKind::Bool,
            LeafValue::Point3d(_) => ValueKind::Point3d,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            LeafValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            LeafValue::Float64(v) => Some(*v),
            LeafValue::Int32(v) => Some(f64::from(*v)),
            _ => None,
        }
    }

    pub fn as_point(&self) -> Option<Point3d> {
        match self {
            LeafValue::Point3d(p) => Some(*p),
            _ => None,
        }
    }
}

/// Children of a group, keyed by the wire field they serialize under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Children {
    #[serde(rename = "staticChildren")]
    Static(ChildMap),
    #[serde(rename = "insertions")]
    Insertions(ChildMap),
}

impl Children {
    pub fn map(&self) -> &ChildMap {
        match self {
            Children::Static(map) | Children::Insertions(map) => map,
        }
    }
}

/// A typed group of named child nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    #[serde(rename = "typeId")]
    pub type_id: String,
    #[serde(flatten)]
    pub children: Children,
}

/// One node of a component tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComponentNode {
    Leaf(LeafValue),
    Group(Group),
}

impl ComponentNode {
    pub fn string(value: impl Into<String>) -> Self {
        ComponentNode::Leaf(LeafValue::String(value.into()))
    }

    pub fn float(value: f64) -> Self {
        ComponentNode::Leaf(LeafValue::Float64(value))
    }

    pub fn int(value: i32) -> Self {
        ComponentNode::Leaf(LeafValue::Int32(value))
    }

    pub fn boolean(value: bool) -> Self {
        ComponentNode::Leaf(LeafValue::Bool(value))
    }

    pub fn point(value: Point3d) -> Self {
        ComponentNode::Leaf(LeafValue::Point3d(value))
    }

    /// Creates a group whose children serialize under `staticChildren`.
    pub fn group<K, I>(type_id: impl Into<String>, children: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, ComponentNode)>,
    {
        ComponentNode::Group(Group {
            type_id: type_id.into(),
            children: Children::Static(collect_children(children)),
        })
    }

    /// Creates a group whose children serialize under `insertions`.
    pub fn insertions<K, I>(type_id: impl Into<String>, children: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, ComponentNode)>,
    {
        ComponentNode::Group(Group {
            type_id: type_id.into(),
            children: Children::Insertions(collect_children(children)),
        })
    }

    pub fn as_leaf(&self) -> Option<&LeafValue> {
        match self {
            ComponentNode::Leaf(leaf) => Some(leaf),
            ComponentNode::Group(_) => None,
        }
    }

    pub fn type_id(&self) -> &str {
        match self {
            ComponentNode::Leaf(leaf) => leaf.kind().as_str(),
            ComponentNode::Group(group) => &group.type_id,
        }
    }

    pub fn children(&self) -> Option<&ChildMap> {
        match self {
            ComponentNode::Leaf(_) => None,
            ComponentNode::Group(group) => Some(group.children.map()),
        }
    }

    pub fn child(&self, name: &str) -> Option<&ComponentNode> {
        self.children().and_then(|children| children.get(name))
    }
}

fn collect_children<K, I>(children: I) -> ChildMap
where
    K: Into<String>,
    I: IntoIterator<Item = (K, ComponentNode)>,
{
    children
        .into_iter()
        .map(|(name, node)| (name.into(), node))
        .collect()
}

/// Root of an asset's component tree (`components.insertions`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Components {
    pub insertions: ChildMap,
}

impl Components {
    /// Follows a path of child names from the root.
    pub fn get(&self, path: &[&str]) -> Option<&ComponentNode> {
        let (first, rest) = path.split_first()?;
        let mut node = self.insertions.get(*first)?;
        for name in rest {
            node = node.child(name)?;
        }
        Some(node)
    }

    /// Like [`Components::get`] but requires a leaf at the end of the path.
    pub fn leaf(&self, path: &[&str]) -> Result<&LeafValue, ModelError> {
        self.get(path)
            .and_then(ComponentNode::as_leaf)
            .ok_or_else(|| ModelError::MissingComponent(path.join(".")))
    }

    /// The `properties.properties` parameter map shared by every asset type.
    pub fn parameters(&self) -> Option<&ChildMap> {
        self.get(&["properties", "properties"])
            .and_then(ComponentNode::children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_leaf_wire_shape() {
        let node = ComponentNode::float(12.5);
        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            json!({"typeId": "Float64", "value": 12.5})
        );

        let node = ComponentNode::point([1.0, 2.0, 0.0]);
        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            json!({"typeId": "Point3d", "value": [1.0, 2.0, 0.0]})
        );
    }

    #[test]
    fn test_group_wire_shape() {
        let node = ComponentNode::group(
            "autodesk.revit.parameter:area-1.0.0",
            [
                ("value", ComponentNode::float(42.0)),
                ("unit", ComponentNode::string("sqft")),
            ],
        );
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["typeId"], "autodesk.revit.parameter:area-1.0.0");
        assert_eq!(value["staticChildren"]["unit"]["value"], "sqft");

        let bag = ComponentNode::insertions("map<autodesk.parameter:parameter-2.0.0>", Vec::<(String, ComponentNode)>::new());
        assert_eq!(
            serde_json::to_value(&bag).unwrap(),
            json!({"typeId": "map<autodesk.parameter:parameter-2.0.0>", "insertions": {}})
        );
    }

    #[test]
    fn test_nested_tree_parses_back() {
        let node = ComponentNode::group(
            "autodesk.aec:component.propertyGroup-1.1.0",
            [(
                "properties",
                ComponentNode::insertions(
                    "map<autodesk.parameter:parameter-2.0.0>",
                    [(
                        "height",
                        ComponentNode::group(
                            "autodesk.revit.parameter:height-1.0.0",
                            [("value", ComponentNode::float(7.0))],
                        ),
                    )],
                ),
            )],
        );

        let text = serde_json::to_string(&node).unwrap();
        let parsed: ComponentNode = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, node);
        assert_eq!(
            parsed
                .child("properties")
                .and_then(|p| p.child("height"))
                .and_then(|h| h.child("value"))
                .and_then(ComponentNode::as_leaf)
                .and_then(LeafValue::as_f64),
            Some(7.0)
        );
    }

    #[test]
    fn test_components_leaf_path() {
        let mut components = Components::default();
        components.insertions.insert(
            "metadata".to_string(),
            ComponentNode::group(
                "autodesk.revit:element-metadata-1.0.0",
                [("elementId", ComponentNode::string("316000"))],
            ),
        );

        let leaf = components.leaf(&["metadata", "elementId"]).unwrap();
        assert_eq!(leaf.as_str(), Some("316000"));
        assert!(matches!(
            components.leaf(&["metadata", "categoryId"]),
            Err(ModelError::MissingComponent(path)) if path == "metadata.categoryId"
        ));
    }
}
