//! Snap points on projection geometry.

use serde::{Deserialize, Serialize};
use sheetkit_core::{Drawing, DrawingView, Point, ViewId};
use sheetkit_settings::SnapSettings;
use std::collections::hash_map::{DefaultHasher, Entry};
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};

/// Candidates on the same grid cell of this size are treated as one.
const MERGE_DISTANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnapKind {
    Endpoint,
    Midpoint,
    Intersection,
}

/// A snap candidate in view-local coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapPoint {
    pub point: Point,
    pub kind: SnapKind,
}

/// Snap found under the cursor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    pub snap: SnapPoint,
    pub view_id: ViewId,
    pub view_position: Point,
}

impl SnapResult {
    /// Snap location in paper space.
    pub fn paper_point(&self) -> Point {
        self.view_position + self.snap.point
    }
}

type MergeKey = (i64, i64);

fn merge_key(p: Point) -> MergeKey {
    (
        (p.x / MERGE_DISTANCE).round() as i64,
        (p.y / MERGE_DISTANCE).round() as i64,
    )
}

/// Candidate list with duplicate points merged.
#[derive(Default)]
struct Candidates {
    points: Vec<SnapPoint>,
    seen: HashSet<MergeKey>,
}

impl Candidates {
    fn push(&mut self, point: Point, kind: SnapKind) {
        if point.is_finite() && self.seen.insert(merge_key(point)) {
            self.points.push(SnapPoint { point, kind });
        }
    }
}

/// Snap candidates of one view, view-local.
///
/// Endpoints come first, then midpoints, then pairwise intersections;
/// a point already present keeps its earlier kind.
pub fn snap_candidates(view: &DrawingView, settings: &SnapSettings) -> Vec<SnapPoint> {
    let segments: Vec<_> = view.local_lines().map(|(s, _)| s).collect();
    let mut out = Candidates {
        points: Vec::with_capacity(segments.len() * 3),
        seen: HashSet::with_capacity(segments.len() * 3),
    };

    for s in &segments {
        out.push(s.start, SnapKind::Endpoint);
        out.push(s.end, SnapKind::Endpoint);
    }

    if settings.include_midpoints {
        for s in segments.iter().filter(|s| !s.is_degenerate()) {
            out.push(s.midpoint(), SnapKind::Midpoint);
        }
    }

    if settings.include_intersections {
        for (i, a) in segments.iter().enumerate() {
            for b in &segments[i + 1..] {
                if let Some(p) = a.segment_intersection(b) {
                    out.push(p, SnapKind::Intersection);
                }
            }
        }
    }

    out.points
}

/// Fingerprint of everything a view's candidate list depends on.
fn geometry_stamp(view: &DrawingView, settings: &SnapSettings) -> u64 {
    let mut h = DefaultHasher::new();
    settings.include_midpoints.hash(&mut h);
    settings.include_intersections.hash(&mut h);
    let bbox = &view.projection.bounding_box;
    for p in [bbox.min, bbox.max] {
        p.x.to_bits().hash(&mut h);
        p.y.to_bits().hash(&mut h);
    }
    view.projection.lines.len().hash(&mut h);
    for line in &view.projection.lines {
        for p in [line.start, line.end] {
            p.x.to_bits().hash(&mut h);
            p.y.to_bits().hash(&mut h);
        }
    }
    h.finish()
}

#[derive(Debug, Clone)]
struct CachedCandidates {
    stamp: u64,
    points: Vec<SnapPoint>,
}

/// Per-view snap candidates kept across pointer events.
///
/// An entry is rebuilt when its view's lines or the snap settings change;
/// entries of views that left the drawing are dropped on the next lookup.
#[derive(Debug, Clone, Default)]
pub struct SnapCache {
    views: HashMap<ViewId, CachedCandidates>,
}

impl SnapCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of views with cached candidates.
    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn clear(&mut self) {
        self.views.clear();
    }

    /// Candidates of `view`, computed on first use.
    pub fn candidates(&mut self, view: &DrawingView, settings: &SnapSettings) -> &[SnapPoint] {
        let stamp = geometry_stamp(view, settings);
        match self.views.entry(view.id) {
            Entry::Occupied(entry) => {
                let cached = entry.into_mut();
                if cached.stamp != stamp {
                    tracing::debug!(view = %view.id, "snap candidates rebuilt");
                    cached.stamp = stamp;
                    cached.points = snap_candidates(view, settings);
                }
                &cached.points
            }
            Entry::Vacant(entry) => {
                let points = snap_candidates(view, settings);
                &entry.insert(CachedCandidates { stamp, points }).points
            }
        }
    }

    /// Nearest candidate across all visible views within `settings.radius_mm`.
    ///
    /// Views whose box, grown by the radius, does not hold the cursor are
    /// skipped without building their candidates.
    pub fn find(
        &mut self,
        drawing: &Drawing,
        cursor: Point,
        settings: &SnapSettings,
    ) -> Option<SnapResult> {
        if !settings.enabled {
            return None;
        }
        self.views.retain(|id, _| drawing.view(*id).is_some());

        let mut best: Option<(SnapResult, f64)> = None;
        for view in drawing.visible_views() {
            let local = view.paper_to_local(cursor);
            if !view.local_bounds().inflate(settings.radius_mm).contains(local) {
                continue;
            }
            for snap in self.candidates(view, settings) {
                let d = local.distance_to(&snap.point);
                if d < settings.radius_mm && best.as_ref().map_or(true, |(_, b)| d < *b) {
                    best = Some((
                        SnapResult {
                            snap: *snap,
                            view_id: view.id,
                            view_position: view.position,
                        },
                        d,
                    ));
                }
            }
        }

        if let Some((result, d)) = &best {
            tracing::debug!(kind = ?result.snap.kind, distance = d, "snap");
        }
        best.map(|(result, _)| result)
    }
}

/// One-off lookup without a cache; see [`SnapCache::find`].
pub fn find_snap(drawing: &Drawing, cursor: Point, settings: &SnapSettings) -> Option<SnapResult> {
    SnapCache::new().find(drawing, cursor, settings)
}
