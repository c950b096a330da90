//! Site registry
//!
//! Owns the input sites, keeps them in insertion order (their index) and
//! hands them out in sweep order (ascending y, then x).

use std::collections::HashMap;

use glam::DVec2;

use crate::error::{MapError, Result};
use crate::geometry::compare_y_then_x;

/// Index of a site, equal to its position in the input list
pub type SiteIdx = usize;

/// An input point that generates one Voronoi region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Site {
    pub index: SiteIdx,
    pub coord: DVec2,
    /// Opaque payload carried through untouched
    pub color: u32,
}

/// Bit pattern key; `-0.0` folds onto `0.0` so they count as one coordinate
#[inline]
fn coord_key(p: DVec2) -> (u64, u64) {
    ((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits())
}

#[derive(Debug, Clone)]
pub struct SiteList {
    sites: Vec<Site>,
    sweep_order: Vec<SiteIdx>,
    by_coord: HashMap<(u64, u64), SiteIdx>,
}

impl SiteList {
    /// Register sites in input order
    ///
    /// # Errors
    ///
    /// Fails on an empty list, a non-finite coordinate, an exact duplicate
    /// coordinate or a color list of the wrong length.
    pub fn new(points: &[DVec2], colors: Option<&[u32]>) -> Result<Self> {
        if points.is_empty() {
            return Err(MapError::EmptySiteSet);
        }
        if let Some(colors) = colors {
            if colors.len() != points.len() {
                return Err(MapError::ColorCountMismatch {
                    points: points.len(),
                    colors: colors.len(),
                });
            }
        }

        let mut sites = Vec::with_capacity(points.len());
        let mut by_coord = HashMap::with_capacity(points.len());
        for (index, &coord) in points.iter().enumerate() {
            if !coord.is_finite() {
                return Err(MapError::InvalidSite {
                    index,
                    x: coord.x,
                    y: coord.y,
                });
            }
            if let Some(&first) = by_coord.get(&coord_key(coord)) {
                return Err(MapError::DuplicateSite {
                    index,
                    first,
                    x: coord.x,
                    y: coord.y,
                });
            }
            by_coord.insert(coord_key(coord), index);
            sites.push(Site {
                index,
                coord,
                color: colors.map_or(0, |c| c[index]),
            });
        }

        let mut sweep_order: Vec<SiteIdx> = (0..sites.len()).collect();
        sweep_order.sort_by(|&a, &b| compare_y_then_x(sites[a].coord, sites[b].coord));

        Ok(Self {
            sites,
            sweep_order,
            by_coord,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    #[inline]
    pub fn get(&self, index: SiteIdx) -> &Site {
        &self.sites[index]
    }

    /// Sites in input (index) order
    #[inline]
    pub fn as_slice(&self) -> &[Site] {
        &self.sites
    }

    /// Sites in sweep order
    pub fn sorted(&self) -> impl Iterator<Item = &Site> + '_ {
        self.sweep_order.iter().map(move |&i| &self.sites[i])
    }

    /// Look up a site by its exact input coordinate
    pub fn index_at(&self, p: DVec2) -> Option<SiteIdx> {
        self.by_coord.get(&coord_key(p)).copied()
    }

    /// `(min, max)` corners of the sites' bounding box
    pub fn data_bounds(&self) -> (DVec2, DVec2) {
        self.sites.iter().fold(
            (DVec2::splat(f64::INFINITY), DVec2::splat(f64::NEG_INFINITY)),
            |(lo, hi), s| (lo.min(s.coord), hi.max(s.coord)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(f64, f64)]) -> Vec<DVec2> {
        coords.iter().map(|&(x, y)| DVec2::new(x, y)).collect()
    }

    #[test]
    fn test_sweep_order() {
        let list = SiteList::new(&pts(&[(5.0, 2.0), (1.0, 2.0), (3.0, 0.5), (0.0, 9.0)]), None)
            .unwrap();

        let order: Vec<SiteIdx> = list.sorted().map(|s| s.index).collect();
        assert_eq!(order, vec![2, 1, 0, 3]);
        assert_eq!(list.sorted().next().map(|s| s.coord), Some(DVec2::new(3.0, 0.5)));
    }

    #[test]
    fn test_indices_are_input_order() {
        let list = SiteList::new(&pts(&[(5.0, 2.0), (1.0, 2.0)]), Some(&[7, 9])).unwrap();
        assert_eq!(list.get(0).coord, DVec2::new(5.0, 2.0));
        assert_eq!(list.get(1).color, 9);
        assert_eq!(list.index_at(DVec2::new(1.0, 2.0)), Some(1));
        assert_eq!(list.index_at(DVec2::new(1.0, 3.0)), None);
    }

    #[test]
    fn test_duplicate_rejected() {
        let err = SiteList::new(&pts(&[(1.0, 1.0), (2.0, 2.0), (1.0, 1.0)]), None).unwrap_err();
        assert_eq!(
            err,
            MapError::DuplicateSite {
                index: 2,
                first: 0,
                x: 1.0,
                y: 1.0
            }
        );

        let negative_zero = SiteList::new(&pts(&[(0.0, 1.0), (-0.0, 1.0)]), None);
        assert!(negative_zero.is_err());
    }

    #[test]
    fn test_invalid_input() {
        assert_eq!(SiteList::new(&[], None).unwrap_err(), MapError::EmptySiteSet);
        assert!(matches!(
            SiteList::new(&pts(&[(f64::NAN, 1.0)]), None),
            Err(MapError::InvalidSite { index: 0, .. })
        ));
        assert!(matches!(
            SiteList::new(&pts(&[(1.0, 1.0)]), Some(&[1, 2])),
            Err(MapError::ColorCountMismatch { points: 1, colors: 2 })
        ));
    }

    #[test]
    fn test_data_bounds() {
        let list = SiteList::new(&pts(&[(5.0, 2.0), (1.0, 7.0), (3.0, 0.5)]), None).unwrap();
        let (lo, hi) = list.data_bounds();
        assert_eq!(lo, DVec2::new(1.0, 0.5));
        assert_eq!(hi, DVec2::new(5.0, 7.0));
    }
}
