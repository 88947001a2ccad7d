//! 2-d tree over projected pixel positions
//!
//! Pixel positions are separated from nodes; nodes hold only indices into
//! the position slice, so query results index straight back into the
//! caller's point list.

use super::projection::Pixel;

pub struct KDTree {
    /// All positions in the tree
    pub pixels: Vec<Pixel>,
    /// Root node of the tree
    pub root: Option<Box<KDTreeNode>>,
}

/// A node in the 2-d tree
pub struct KDTreeNode {
    /// Index of the position associated with this node
    pub pixel_id: usize,
    /// Indices of positions equal to this node's position
    pub equal_ids: Vec<usize>,

    split: usize,
    left: Option<Box<KDTreeNode>>,
    right: Option<Box<KDTreeNode>>,
}

impl KDTree {
    /// Finds every position within `radius` (inclusive) of `pt`
    ///
    /// Indices come back in tree order, not input order. To avoid
    /// allocation, the `nodes` vector can be re-used across calls.
    pub fn in_range(&self, pt: &Pixel, radius: f64, mut nodes: Vec<usize>) -> Vec<usize> {
        if radius < 0.0 || radius.is_nan() {
            return nodes;
        }
        self.in_range_recursive(self.root.as_deref(), pt, radius, &mut nodes);
        nodes
    }

    fn in_range_recursive(
        &self,
        t: Option<&KDTreeNode>,
        pt: &Pixel,
        r: f64,
        nodes: &mut Vec<usize>,
    ) {
        let t = match t {
            None => return,
            Some(t) => t,
        };

        let here = &self.pixels[t.pixel_id];
        let diff = pt.0[t.split] - here.0[t.split];

        let (this_side, other_side) = if diff < 0.0 {
            (t.left.as_deref(), t.right.as_deref())
        } else {
            (t.right.as_deref(), t.left.as_deref())
        };

        self.in_range_recursive(this_side, pt, r, nodes);
        // The splitting line is the closest the other side can get
        if diff.abs() <= r {
            if here.distance(pt) <= r {
                nodes.push(t.pixel_id);
                nodes.extend_from_slice(&t.equal_ids);
            }
            self.in_range_recursive(other_side, pt, r, nodes);
        }
    }

    /// Returns the height of the tree
    #[allow(dead_code)] // Part of public API, exercised by the tree tests
    pub fn height(&self) -> usize {
        self.root.as_ref().map_or(0, |r| r.height())
    }
}

impl KDTreeNode {
    fn height(&self) -> usize {
        let lht = self.left.as_ref().map_or(0, |l| l.height());
        let rht = self.right.as_ref().map_or(0, |r| r.height());
        lht.max(rht) + 1
    }
}

/// Creates a balanced tree from the given positions
pub fn new_kd_tree(pixels: Vec<Pixel>) -> KDTree {
    let mut result = KDTree { pixels, root: None };

    if !result.pixels.is_empty() {
        let sorted = pre_sort(&result.pixels);
        result.root = build_tree(0, &result.pixels, sorted);
    }

    result
}

/// Builds a node from the median position and recurses into both halves
fn build_tree(depth: usize, pixels: &[Pixel], nodes: PreSorted) -> Option<Box<KDTreeNode>> {
    let split = depth % 2;
    match nodes.cur[split].len() {
        0 => None,
        1 => Some(Box::new(KDTreeNode {
            pixel_id: nodes.cur[split][0],
            equal_ids: Vec::new(),
            split,
            left: None,
            right: None,
        })),
        _ => {
            let (med, equal, left, right) = nodes.split_med(pixels, split);
            Some(Box::new(KDTreeNode {
                pixel_id: med,
                equal_ids: equal,
                split,
                left: build_tree(depth + 1, pixels, left),
                right: build_tree(depth + 1, pixels, right),
            }))
        }
    }
}

/// Position ids sorted on each dimension
struct PreSorted {
    cur: [Vec<usize>; 2],
}

fn pre_sort(pixels: &[Pixel]) -> PreSorted {
    let mut p = PreSorted {
        cur: [Vec::new(), Vec::new()],
    };
    for (i, cur) in p.cur.iter_mut().enumerate() {
        *cur = (0..pixels.len()).collect();
        // Ties on one axis are broken by the other, so equal positions are adjacent
        cur.sort_by(|&a, &b| {
            pixels[a].0[i]
                .total_cmp(&pixels[b].0[i])
                .then(pixels[a].0[1 - i].total_cmp(&pixels[b].0[1 - i]))
        });
    }
    p
}

impl PreSorted {
    /// Returns the median id on `dim`, the ids of positions equal to it, and
    /// the ids (still sorted on both dimensions) strictly below and at or
    /// above the median value.
    fn split_med(&self, pixels: &[Pixel], dim: usize) -> (usize, Vec<usize>, PreSorted, PreSorted) {
        let ids = &self.cur[dim];
        let mut m = ids.len() / 2;
        while m > 0 && pixels[ids[m - 1]].0[dim] == pixels[ids[m]].0[dim] {
            m -= 1;
        }
        let mut mh = m;
        while mh < ids.len() - 1 && pixels[ids[mh + 1]] == pixels[ids[m]] {
            mh += 1;
        }
        let med = ids[m];
        let equal = ids[m + 1..=mh].to_vec();
        let pivot = pixels[med].0[dim];

        let mut left = PreSorted {
            cur: [Vec::new(), Vec::new()],
        };
        left.cur[dim] = ids[..m].to_vec();

        let mut right = PreSorted {
            cur: [Vec::new(), Vec::new()],
        };
        right.cur[dim] = ids[mh + 1..].to_vec();

        let other = 1 - dim;
        for &n in &self.cur[other] {
            if n == med || equal.contains(&n) {
                continue;
            }
            if pixels[n].0[dim] < pivot {
                left.cur[other].push(n);
            } else {
                right.cur[other].push(n);
            }
        }

        (med, equal, left, right)
    }
}
