use geo::{Area, BoundingRect, Geometry, MultiPolygon, Polygon, Rect};
use geojson::GeoJson;
use tracing::debug;

use crate::error::Result;

/// Parts smaller than this share of the largest part are dropped for display.
const SLIVER_RATIO: f64 = 0.20;

/// One named country outline from the boundary source.
#[derive(Clone, Debug)]
pub struct BoundaryFeature {
    pub name: String,
    pub shape: MultiPolygon<f64>,
}

impl BoundaryFeature {
    pub fn bounds(&self) -> Option<Rect<f64>> {
        self.shape.bounding_rect()
    }
}

fn feature_name(properties: Option<&geojson::JsonObject>) -> String {
    properties
        .and_then(|p| p.get("name").or_else(|| p.get("ADMIN")))
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string()
}

/// Removes small islands and slivers when a shape has several parts.
fn drop_slivers(shape: MultiPolygon<f64>) -> MultiPolygon<f64> {
    if shape.0.len() <= 1 {
        return shape;
    }
    let max_area = shape.0.iter().map(|p| p.unsigned_area()).fold(0.0, f64::max);
    let threshold = max_area * SLIVER_RATIO;
    let kept: Vec<Polygon<f64>> = shape
        .0
        .iter()
        .filter(|p| p.unsigned_area() >= threshold)
        .cloned()
        .collect();
    if kept.is_empty() { shape } else { MultiPolygon(kept) }
}

/// Named polygon features of a GeoJSON FeatureCollection. Features without a
/// polygonal geometry are skipped.
pub fn features_from_geojson(raw: GeoJson) -> Result<Vec<BoundaryFeature>> {
    let mut out = Vec::new();
    let mut skipped = 0usize;

    if let GeoJson::FeatureCollection(fc) = raw {
        for feature in fc.features {
            let name = feature_name(feature.properties.as_ref());
            let Some(gj) = feature.geometry else {
                skipped += 1;
                continue;
            };
            let geom: Geometry<f64> = gj.value.try_into()?;
            let shape = match geom {
                Geometry::Polygon(p) => MultiPolygon(vec![p]),
                Geometry::MultiPolygon(m) => m,
                _ => {
                    skipped += 1;
                    continue;
                }
            };
            out.push(BoundaryFeature { name, shape: drop_slivers(shape) });
        }
    }

    debug!(features = out.len(), skipped, "boundary features read");
    Ok(out)
}

/// Bounding box over every feature, as `([min_x, max_x], [min_y, max_y])`.
pub fn extent(features: &[BoundaryFeature]) -> Option<([f64; 2], [f64; 2])> {
    features.iter().filter_map(BoundaryFeature::bounds).fold(None, |acc, r| {
        let (lo, hi) = (r.min(), r.max());
        Some(match acc {
            None => ([lo.x, hi.x], [lo.y, hi.y]),
            Some(([x0, x1], [y0, y1])) => ([x0.min(lo.x), x1.max(hi.x)], [y0.min(lo.y), y1.max(hi.y)]),
        })
    })
}
