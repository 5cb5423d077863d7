//! GeoJSON feature model.
//!
//! Only the subset of GeoJSON the feature service actually returns is
//! modelled. Positions may carry a third (elevation) ordinate, which is
//! ignored.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::coord::{point_in_ring, Extent, LonLat};

/// Attribute map of a feature.
pub type Properties = Map<String, Value>;

type Position = Vec<f64>;

fn to_lonlat(pos: &[f64]) -> Option<LonLat> {
    match pos {
        [lon, lat, ..] => Some(LonLat::new(*lon, *lat)),
        _ => None,
    }
}

fn ring_points(ring: &[Position]) -> Vec<LonLat> {
    ring.iter().filter_map(|p| to_lonlat(p)).collect()
}

/// Feature geometry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: Position },
    MultiPoint { coordinates: Vec<Position> },
    LineString { coordinates: Vec<Position> },
    MultiLineString { coordinates: Vec<Vec<Position>> },
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
}

impl Geometry {
    /// Convenience constructor for a point geometry.
    pub fn point(p: LonLat) -> Self {
        Geometry::Point {
            coordinates: vec![p.lon, p.lat],
        }
    }

    /// Convenience constructor for a single-ring polygon.
    pub fn polygon(ring: &[LonLat]) -> Self {
        Geometry::Polygon {
            coordinates: vec![ring.iter().map(|p| vec![p.lon, p.lat]).collect()],
        }
    }

    /// All vertices of the geometry, in document order.
    pub fn vertices(&self) -> Vec<LonLat> {
        match self {
            Geometry::Point { coordinates } => to_lonlat(coordinates).into_iter().collect(),
            Geometry::MultiPoint { coordinates } | Geometry::LineString { coordinates } => {
                ring_points(coordinates)
            }
            Geometry::MultiLineString { coordinates } | Geometry::Polygon { coordinates } => {
                coordinates.iter().flat_map(|r| ring_points(r)).collect()
            }
            Geometry::MultiPolygon { coordinates } => coordinates
                .iter()
                .flat_map(|poly| poly.iter().flat_map(|r| ring_points(r)))
                .collect(),
        }
    }

    pub fn extent(&self) -> Option<Extent> {
        Extent::from_points(self.vertices())
    }

    /// Hit test against the geometry.
    ///
    /// Points and lines match within `tolerance` degrees of a vertex;
    /// polygons match when `p` lies inside the outer ring and outside every
    /// hole.
    pub fn hit(&self, p: LonLat, tolerance: f64) -> bool {
        match self {
            Geometry::Point { .. }
            | Geometry::MultiPoint { .. }
            | Geometry::LineString { .. }
            | Geometry::MultiLineString { .. } => self
                .vertices()
                .iter()
                .any(|v| v.degree_distance(&p) <= tolerance),
            Geometry::Polygon { coordinates } => polygon_contains(coordinates, p),
            Geometry::MultiPolygon { coordinates } => {
                coordinates.iter().any(|poly| polygon_contains(poly, p))
            }
        }
    }
}

fn polygon_contains(rings: &[Vec<Position>], p: LonLat) -> bool {
    let mut iter = rings.iter();
    let Some(outer) = iter.next() else {
        return false;
    };
    point_in_ring(p, &ring_points(outer)) && !iter.any(|hole| point_in_ring(p, &ring_points(hole)))
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Properties, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Properties>::deserialize(deserializer)?.unwrap_or_default())
}

/// One feature of a feature collection.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub properties: Properties,
}

impl Feature {
    pub fn new(geometry: Option<Geometry>, properties: Properties) -> Self {
        Self {
            id: None,
            geometry,
            properties,
        }
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// First non-empty string value found under any of `keys`.
    ///
    /// The feature services are inconsistent about attribute spelling
    /// (`Maintenance` vs `maintenance`, `TYPE_OF_WB` vs `wb_type`), so
    /// lookups take a list of candidates.
    pub fn str_property(&self, keys: &[&str]) -> Option<&str> {
        keys.iter()
            .filter_map(|k| self.properties.get(*k))
            .filter_map(Value::as_str)
            .map(str::trim)
            .find(|s| !s.is_empty())
    }

    /// First numeric value found under any of `keys`. Numeric strings count.
    pub fn number_property(&self, keys: &[&str]) -> Option<f64> {
        keys.iter()
            .filter_map(|k| self.properties.get(*k))
            .find_map(|v| match v {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().parse::<f64>().ok(),
                _ => None,
            })
            .filter(|n| n.is_finite())
    }

    /// Truthy interpretation of a yes/no style attribute.
    pub fn flag_property(&self, keys: &[&str]) -> bool {
        keys.iter()
            .filter_map(|k| self.properties.get(*k))
            .any(|v| match v {
                Value::Bool(b) => *b,
                Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
                Value::String(s) => matches!(
                    s.trim().to_lowercase().as_str(),
                    "yes" | "true" | "1" | "y"
                ),
                _ => false,
            })
    }

    /// Identifier as a string: the feature id, or a `uid`/`id` attribute.
    pub fn id_string(&self) -> Option<String> {
        let value = self
            .id
            .as_ref()
            .or_else(|| self.properties.get("uid"))
            .or_else(|| self.properties.get("id"))?;
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn extent(&self) -> Option<Extent> {
        self.geometry.as_ref().and_then(Geometry::extent)
    }

    /// A representative position: the point itself or the extent center.
    pub fn anchor(&self) -> Option<LonLat> {
        match self.geometry.as_ref()? {
            Geometry::Point { coordinates } => to_lonlat(coordinates),
            other => other.extent().map(|e| e.center()),
        }
    }

    pub fn hit(&self, p: LonLat, tolerance: f64) -> bool {
        self.geometry
            .as_ref()
            .is_some_and(|g| g.hit(p, tolerance))
    }
}

/// A GeoJSON feature collection as returned by the feature service.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Parse a GeoJSON `FeatureCollection` document.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_collection_with_mixed_geometry() {
        let body = json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "id": "settlement.1",
                    "geometry": {"type": "Point", "coordinates": [77.5, 12.9, 0.0]},
                    "properties": {"sett_name": "Rampur"}
                },
                {
                    "type": "Feature",
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0], [0.0, 0.0]]]
                    },
                    "properties": null
                }
            ]
        });

        let fc = FeatureCollection::from_slice(body.to_string().as_bytes()).unwrap();
        assert_eq!(fc.features.len(), 2);
        assert_eq!(fc.features[0].id_string().as_deref(), Some("settlement.1"));
        assert_eq!(fc.features[0].anchor(), Some(LonLat::new(77.5, 12.9)));
        assert!(fc.features[1].properties.is_empty());
        assert_eq!(fc.features[1].anchor(), Some(LonLat::new(1.0, 1.0)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(FeatureCollection::from_slice(b"<html>502</html>").is_err());
    }

    #[test]
    fn test_tolerant_property_lookup() {
        let mut props = Properties::new();
        props.insert("Maintenance".into(), json!("Yes"));
        props.insert("depth".into(), json!("-3.5"));
        let feature = Feature::new(None, props);

        assert!(feature.flag_property(&["maintenance", "Maintenance"]));
        assert_eq!(feature.number_property(&["depth"]), Some(-3.5));
        assert_eq!(feature.str_property(&["missing"]), None);
    }

    #[test]
    fn test_polygon_hole_excluded() {
        let geometry = Geometry::Polygon {
            coordinates: vec![
                vec![
                    vec![0.0, 0.0],
                    vec![4.0, 0.0],
                    vec![4.0, 4.0],
                    vec![0.0, 4.0],
                ],
                vec![
                    vec![1.0, 1.0],
                    vec![3.0, 1.0],
                    vec![3.0, 3.0],
                    vec![1.0, 3.0],
                ],
            ],
        };
        assert!(geometry.hit(LonLat::new(0.5, 0.5), 0.0));
        assert!(!geometry.hit(LonLat::new(2.0, 2.0), 0.0));
    }

    #[test]
    fn test_point_hit_tolerance() {
        let feature = Feature::new(Some(Geometry::point(LonLat::new(10.0, 10.0))), Properties::new());
        assert!(feature.hit(LonLat::new(10.0005, 10.0), 0.001));
        assert!(!feature.hit(LonLat::new(10.01, 10.0), 0.001));
    }
}
