//! [BSP](https://en.wikipedia.org/wiki/Binary_space_partitioning) tree node structure and operations

use crate::plane::Plane;
use crate::polygon::Polygon;
use std::fmt::Debug;

/// A BSP tree node: an optional partition plane, the polygons resident on
/// that plane, plus optional front/back subtrees.
///
/// A node with `plane == None` is the empty tree: it has no children and no
/// polygons, and clipping against it returns the input unchanged. Every
/// other node partitions space; the *absence* of a back child means the
/// entire back half-space is solid interior.
#[derive(Debug, Clone)]
pub struct Node<S: Clone> {
    /// Partition plane for this node, `None` for the empty tree.
    pub plane: Option<Plane>,

    /// Subtree in the *front* half-space.
    pub front: Option<Box<Node<S>>>,

    /// Subtree in the *back* half-space.
    pub back: Option<Box<Node<S>>>,

    /// Polygons coplanar with `plane`.
    pub polygons: Vec<Polygon<S>>,
}

impl<S: Clone + Send + Sync + Debug> Default for Node<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone + Send + Sync + Debug> Node<S> {
    /// Create a new empty BSP node.
    pub const fn new() -> Self {
        Self {
            plane: None,
            front: None,
            back: None,
            polygons: Vec::new(),
        }
    }

    /// Create a new BSP node from polygons.
    pub fn from_polygons(polygons: &[Polygon<S>]) -> Self {
        let mut node = Self::new();
        if !polygons.is_empty() {
            node.build(polygons);
        }
        node
    }

    /// Convert solid space to empty space and empty space to solid space:
    /// flip every resident polygon and plane, recurse, then swap the
    /// front/back subtrees.
    pub fn invert(&mut self) {
        self.polygons.iter_mut().for_each(|p| p.flip());
        if let Some(ref mut plane) = self.plane {
            plane.flip();
        }

        if let Some(ref mut front) = self.front {
            front.invert();
        }
        if let Some(ref mut back) = self.back {
            back.invert();
        }

        std::mem::swap(&mut self.front, &mut self.back);
    }

    /// Recursively remove all portions of `polygons` that are inside this
    /// BSP tree.
    ///
    /// Coplanar fragments are routed front or back by the winding sign
    /// test in [`Plane::split_polygon`]. Front fragments reaching a node
    /// without a front child survive as-is; back fragments reaching a node
    /// without a back child are discarded — an undivided back half-space
    /// is solid interior, so everything behind that plane is inside the
    /// solid.
    pub fn clip_polygons(&self, polygons: &[Polygon<S>]) -> Vec<Polygon<S>> {
        let mut result = Vec::new();
        let mut stack = vec![(self, polygons.to_vec())];

        while let Some((node, polys)) = stack.pop() {
            let Some(plane) = node.plane.as_ref() else {
                // Empty tree: nothing to clip against.
                result.extend(polys);
                continue;
            };

            let mut front_polys = Vec::with_capacity(polys.len());
            let mut back_polys = Vec::with_capacity(polys.len());

            for polygon in &polys {
                let (coplanar_front, coplanar_back, mut front_parts, mut back_parts) =
                    plane.split_polygon(polygon);

                front_parts.extend(coplanar_front);
                back_parts.extend(coplanar_back);
                front_polys.append(&mut front_parts);
                back_polys.append(&mut back_parts);
            }

            if let Some(front_node) = &node.front {
                if !front_polys.is_empty() {
                    stack.push((front_node.as_ref(), front_polys));
                }
            } else {
                result.extend(front_polys);
            }

            if let Some(back_node) = &node.back {
                if !back_polys.is_empty() {
                    stack.push((back_node.as_ref(), back_polys));
                }
            }
            // No back child: back_polys are inside the solid and are dropped.
        }
        result
    }

    /// Remove all polygons in this BSP tree that are inside the other BSP
    /// tree `bsp`.
    pub fn clip_to(&mut self, bsp: &Node<S>) {
        let mut stack: Vec<&mut Node<S>> = vec![self];
        while let Some(node) = stack.pop() {
            node.polygons = bsp.clip_polygons(&node.polygons);
            if let Some(front) = node.front.as_mut() {
                stack.push(front);
            }
            if let Some(back) = node.back.as_mut() {
                stack.push(back);
            }
        }
    }

    /// Return all polygons in this BSP tree.
    pub fn all_polygons(&self) -> Vec<Polygon<S>> {
        let mut result = Vec::new();
        let mut stack = vec![self];

        while let Some(node) = stack.pop() {
            result.extend_from_slice(&node.polygons);
            stack.extend(
                [&node.front, &node.back]
                    .iter()
                    .filter_map(|child| child.as_ref().map(|boxed| boxed.as_ref())),
            );
        }
        result
    }

    /// Build a BSP tree out of `polygons`. When called on an existing
    /// tree, the new polygons are filtered down to the bottom of the tree
    /// and become new nodes there — this is how an operation grafts the
    /// surviving polygons of one operand onto the other's tree.
    ///
    /// Each node partitions by its *first* polygon's plane; no balancing
    /// heuristic is used.
    pub fn build(&mut self, polygons: &[Polygon<S>]) {
        if polygons.is_empty() {
            return;
        }

        let mut stack: Vec<(&mut Node<S>, Vec<Polygon<S>>)> = vec![(self, polygons.to_vec())];

        while let Some((node, polys)) = stack.pop() {
            if polys.is_empty() {
                continue;
            }

            let plane = node
                .plane
                .get_or_insert_with(|| polys[0].plane.clone())
                .clone();

            let mut front = Vec::with_capacity(polys.len() / 2);
            let mut back = Vec::with_capacity(polys.len() / 2);

            for polygon in &polys {
                let (coplanar_front, coplanar_back, mut front_parts, mut back_parts) =
                    plane.split_polygon(polygon);

                node.polygons.extend(coplanar_front);
                node.polygons.extend(coplanar_back);
                front.append(&mut front_parts);
                back.append(&mut back_parts);
            }

            if !front.is_empty() {
                let front_node = node.front.get_or_insert_with(|| Box::new(Node::new()));
                stack.push((front_node.as_mut(), front));
            }

            if !back.is_empty() {
                let back_node = node.back.get_or_insert_with(|| Box::new(Node::new()));
                stack.push((back_node.as_mut(), back));
            }
        }
    }
}
