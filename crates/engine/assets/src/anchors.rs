//! Anchor regions
//!
//! A loaded model is partitioned into three spatial regions ordered left to
//! right. The camera visits one region per scroll segment, so any model gets
//! a three-stop tour without hand-authored waypoints.
//!
//! # Selection
//!
//! - **Up to three surfaces**: each surface is its own region, sorted by
//!   center x. Missing regions repeat the rightmost one.
//! - **More than three surfaces**: one-dimensional k-means (k = 3) on the
//!   surface center x. Each cluster's boxes are unioned into one region.
//! - **Degenerate clustering** (fewer than three non-empty clusters): the
//!   three surfaces with the widest x extent are used instead. This is a
//!   heuristic for models whose surfaces share one x position, not a
//!   geometric guarantee.
//!
//! All paths are deterministic and yield exactly three regions for any
//! non-empty input.

use crate::bounds::Aabb;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use showcase_core::SEGMENT_COUNT;
use std::cmp::Ordering;

/// Maximum k-means refinement passes
const MAX_ITERATIONS: usize = 10;

/// Centroid movement below which clustering is considered converged
const CONVERGENCE_TOLERANCE: f32 = 1e-4;

/// One camera waypoint derived from model geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorRegion {
    /// Center of the region's bounding box
    pub center: Vec3,
    /// Extent of the region's bounding box
    pub size: Vec3,
    pub bounds: Aabb,
}

impl AnchorRegion {
    pub fn from_bounds(bounds: Aabb) -> Self {
        Self {
            center: bounds.center(),
            size: bounds.size(),
            bounds,
        }
    }
}

/// Exactly three anchor regions, sorted by center x
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchors([AnchorRegion; SEGMENT_COUNT]);

impl Anchors {
    /// Region for a scroll segment; indices past the end saturate
    pub fn get(&self, segment: usize) -> &AnchorRegion {
        &self.0[segment.min(SEGMENT_COUNT - 1)]
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnchorRegion> {
        self.0.iter()
    }

    pub fn as_array(&self) -> &[AnchorRegion; SEGMENT_COUNT] {
        &self.0
    }

    /// Build from regions in any order, sorting them left to right
    fn sorted(mut regions: [AnchorRegion; SEGMENT_COUNT]) -> Self {
        regions.sort_by(|a, b| cmp_x(a.center, b.center));
        Self(regions)
    }
}

fn cmp_x(a: Vec3, b: Vec3) -> Ordering {
    a.x.total_cmp(&b.x)
}

/// Derive the three anchor regions from per-surface bounding boxes
///
/// Returns `None` only for an empty surface list.
pub fn derive_anchors(surfaces: &[Aabb]) -> Option<Anchors> {
    let anchors = match surfaces.len() {
        0 => return None,
        n if n <= SEGMENT_COUNT => direct_selection(surfaces),
        _ => cluster_by_x(surfaces).unwrap_or_else(|| {
            tracing::debug!(
                surfaces = surfaces.len(),
                "clustering collapsed, falling back to widest surfaces"
            );
            widest_surfaces(surfaces)
        }),
    };
    Some(anchors)
}

/// Each surface becomes a region; pad by repeating the rightmost
fn direct_selection(surfaces: &[Aabb]) -> Anchors {
    let mut regions: Vec<AnchorRegion> = surfaces
        .iter()
        .take(SEGMENT_COUNT)
        .copied()
        .map(AnchorRegion::from_bounds)
        .collect();
    regions.sort_by(|a, b| cmp_x(a.center, b.center));

    let last = regions[regions.len() - 1];
    let pick = |i: usize| regions.get(i).copied().unwrap_or(last);
    Anchors([pick(0), pick(1), pick(2)])
}

/// One-dimensional k-means on center x
///
/// Returns `None` if any cluster ends up empty.
fn cluster_by_x(surfaces: &[Aabb]) -> Option<Anchors> {
    let xs: Vec<f32> = surfaces.iter().map(|bounds| bounds.center().x).collect();

    let mut sorted = xs.clone();
    sorted.sort_by(f32::total_cmp);
    let mut centroids = [sorted[0], sorted[sorted.len() / 2], sorted[sorted.len() - 1]];

    let mut assignment = vec![0usize; xs.len()];
    let mut changed = true;
    let mut iteration = 0;
    while iteration < MAX_ITERATIONS && changed {
        for (slot, &x) in assignment.iter_mut().zip(&xs) {
            *slot = nearest_centroid(x, &centroids);
        }

        changed = false;
        for (cluster, centroid) in centroids.iter_mut().enumerate() {
            let (sum, count) = xs
                .iter()
                .zip(&assignment)
                .filter(|(_, &assigned)| assigned == cluster)
                .fold((0.0f32, 0usize), |(sum, count), (&x, _)| (sum + x, count + 1));
            if count == 0 {
                continue;
            }
            let mean = sum / count as f32;
            if (mean - *centroid).abs() > CONVERGENCE_TOLERANCE {
                *centroid = mean;
                changed = true;
            }
        }
        iteration += 1;
    }

    tracing::trace!(iterations = iteration, ?centroids, "k-means finished");

    let mut groups = [Aabb::EMPTY; SEGMENT_COUNT];
    let mut counts = [0usize; SEGMENT_COUNT];
    for (bounds, &cluster) in surfaces.iter().zip(&assignment) {
        groups[cluster] = groups[cluster].union(bounds);
        counts[cluster] += 1;
    }
    if counts.contains(&0) {
        return None;
    }

    Some(Anchors::sorted(groups.map(AnchorRegion::from_bounds)))
}

/// Nearest centroid, ties going to the lowest cluster index
fn nearest_centroid(x: f32, centroids: &[f32; SEGMENT_COUNT]) -> usize {
    let mut best = 0;
    let mut best_distance = (x - centroids[0]).abs();
    for (cluster, centroid) in centroids.iter().enumerate().skip(1) {
        let distance = (x - centroid).abs();
        if distance < best_distance {
            best = cluster;
            best_distance = distance;
        }
    }
    best
}

/// The three surfaces with the largest x extent, sorted left to right
fn widest_surfaces(surfaces: &[Aabb]) -> Anchors {
    let mut by_width: Vec<&Aabb> = surfaces.iter().collect();
    // Stable sort keeps declaration order among equally wide surfaces
    by_width.sort_by(|a, b| b.size().x.total_cmp(&a.size().x));
    let regions = [0, 1, 2].map(|i| AnchorRegion::from_bounds(*by_width[i]));
    Anchors::sorted(regions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn box_at(x: f32, width: f32) -> Aabb {
        Aabb::from_center_size(Vec3::new(x, 0.0, 0.0), Vec3::new(width, 1.0, 1.0))
    }

    fn centers(anchors: &Anchors) -> Vec<f32> {
        anchors.iter().map(|region| region.center.x).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(derive_anchors(&[]).is_none());
    }

    #[test]
    fn test_single_surface_repeated() {
        let surface = box_at(1.5, 2.0);
        let anchors = derive_anchors(&[surface]).unwrap();
        for region in anchors.iter() {
            assert_eq!(region.bounds, surface);
            assert_eq!(region.center, surface.center());
            assert_eq!(region.size, surface.size());
        }
    }

    #[test]
    fn test_two_surfaces_pad_with_rightmost() {
        let anchors = derive_anchors(&[box_at(4.0, 1.0), box_at(-1.0, 1.0)]).unwrap();
        assert_eq!(centers(&anchors), vec![-1.0, 4.0, 4.0]);
    }

    #[test]
    fn test_three_surfaces_sorted() {
        let anchors =
            derive_anchors(&[box_at(2.0, 1.0), box_at(-2.0, 1.0), box_at(0.0, 1.0)]).unwrap();
        assert_eq!(centers(&anchors), vec![-2.0, 0.0, 2.0]);
    }

    #[test]
    fn test_five_surfaces_cluster_contiguously() {
        let xs = [-3.0, -1.0, 0.0, 1.0, 3.0];
        let surfaces: Vec<Aabb> = xs.iter().map(|&x| box_at(x, 0.5)).collect();
        let anchors = derive_anchors(&surfaces).unwrap();

        // Initial centroids -3, 0, 3 are already stable
        let regions = anchors.as_array();
        assert_eq!(regions[0].center.x, -3.0);
        assert_eq!(regions[1].center.x, 0.0);
        assert_eq!(regions[2].center.x, 3.0);
        assert!((regions[1].size.x - 2.5).abs() < 1e-6);

        // Groups do not overlap and together span every surface
        assert!(regions[0].bounds.max.x < regions[1].bounds.min.x);
        assert!(regions[1].bounds.max.x < regions[2].bounds.min.x);
        assert_eq!(regions[0].bounds.min.x, -3.25);
        assert_eq!(regions[2].bounds.max.x, 3.25);
    }

    #[test]
    fn test_clustering_moves_centroids() {
        // Outer pairs pull the edge centroids inward on the second pass
        let xs = [-10.0, -9.0, -1.0, 0.0, 1.0, 9.0, 10.0];
        let surfaces: Vec<Aabb> = xs.iter().map(|&x| box_at(x, 0.2)).collect();
        let anchors = derive_anchors(&surfaces).unwrap();
        let c = centers(&anchors);
        assert!((c[0] + 9.5).abs() < 1e-4);
        assert!(c[1].abs() < 1e-4);
        assert!((c[2] - 9.5).abs() < 1e-4);
    }

    #[test]
    fn test_tie_prefers_lower_cluster() {
        assert_eq!(nearest_centroid(0.0, &[-1.0, 1.0, 5.0]), 0);
        assert_eq!(nearest_centroid(2.0, &[-5.0, 1.0, 3.0]), 1);
        assert_eq!(nearest_centroid(0.0, &[-1.0, 5.0, 1.0]), 0);
    }

    #[test]
    fn test_degenerate_falls_back_to_widest() {
        // Every surface centered at x = 0: one cluster only
        let surfaces = [
            box_at(0.0, 1.0),
            box_at(0.0, 4.0),
            box_at(0.0, 2.0),
            box_at(0.0, 3.0),
        ];
        let anchors = derive_anchors(&surfaces).unwrap();
        let mut widths: Vec<f32> = anchors.iter().map(|region| region.size.x).collect();
        widths.sort_by(f32::total_cmp);
        assert_eq!(widths, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_fallback_sorted_by_center() {
        // Two distinct x positions: the max centroid duplicates one side
        let surfaces = [
            box_at(5.0, 3.0),
            box_at(5.0, 1.0),
            box_at(-5.0, 2.0),
            box_at(-5.0, 0.5),
        ];
        let anchors = derive_anchors(&surfaces).unwrap();
        let c = centers(&anchors);
        assert!(c.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn test_deterministic() {
        let surfaces: Vec<Aabb> = (0..20)
            .map(|i| box_at(((i * 7) % 13) as f32 - 6.0, 0.3 + (i % 4) as f32 * 0.1))
            .collect();
        let first = derive_anchors(&surfaces).unwrap();
        for _ in 0..10 {
            assert_eq!(derive_anchors(&surfaces).unwrap(), first);
        }
    }

    #[test]
    fn test_always_three_sorted_anchors() {
        for count in 1..30 {
            let surfaces: Vec<Aabb> = (0..count)
                .map(|i| box_at((i as f32 * 1.7).sin() * 4.0, 0.5))
                .collect();
            let anchors = derive_anchors(&surfaces).unwrap();
            assert_eq!(anchors.iter().count(), 3);
            let c = centers(&anchors);
            assert!(c.windows(2).all(|pair| pair[0] <= pair[1]), "count={count}");
        }
    }

    #[test]
    fn test_get_saturates() {
        let anchors = derive_anchors(&[box_at(0.0, 1.0)]).unwrap();
        assert_eq!(anchors.get(7), anchors.get(2));
    }
}
