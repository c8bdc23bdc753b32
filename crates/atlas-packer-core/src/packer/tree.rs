use crate::model::{Image, PixRect};

/// Index into a `NodeArena`. Nodes are owned exclusively by their arena and
/// freed in bulk with it; the tree is acyclic by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(usize);

/// Child order tried by `insert` at split nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handedness {
    LeftFirst,
    RightFirst,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Internal join used by the multi-atlas grower: "this atlas plus the
    /// next one to its side". Always has exactly two children.
    Container,
    /// Root of one atlas's own placement tree; its rect is the full
    /// candidate atlas area.
    AtlasRoot,
    /// Ordinary split node produced by insertion.
    Regular,
}

struct Node {
    kind: NodeKind,
    rect: PixRect,
    children: Option<(NodeId, NodeId)>,
    image: Option<Image>,
}

/// Vector-backed binary space partition over atlas pixel space.
///
/// Invariant: a node holds either two children or at most one image, never
/// both. Insertion fails rather than overwriting an occupied leaf or a
/// too-small region.
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn alloc(&mut self, kind: NodeKind, rect: PixRect) -> NodeId {
        self.nodes.push(Node {
            kind,
            rect,
            children: None,
            image: None,
        });
        NodeId(self.nodes.len() - 1)
    }

    pub fn rect(&self, id: NodeId) -> PixRect {
        self.nodes[id.0].rect
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.nodes[id.0].kind
    }

    /// Tries to place `img` somewhere under `id`, splitting free space
    /// guillotine-style. Returns the leaf that received the image.
    ///
    /// Split nodes try their children in `handedness` order. An unsplit
    /// leaf fails when occupied or too small, is taken in place on an
    /// exact fit, and otherwise splits along whichever axis has the larger
    /// leftover slack (width wins the strict comparison), recursing into
    /// the first new child.
    pub fn insert(&mut self, id: NodeId, img: &Image, handedness: Handedness) -> Option<NodeId> {
        if let Some((left, right)) = self.nodes[id.0].children {
            let (first, second) = match handedness {
                Handedness::LeftFirst => (left, right),
                Handedness::RightFirst => (right, left),
            };
            return self
                .insert(first, img, handedness)
                .or_else(|| self.insert(second, img, handedness));
        }
        if self.nodes[id.0].image.is_some() {
            return None;
        }
        let rect = self.nodes[id.0].rect;
        if img.w > rect.w || img.h > rect.h {
            return None;
        }
        if img.w == rect.w && img.h == rect.h {
            let mut placed = *img;
            placed.x = rect.x;
            placed.y = rect.y;
            self.nodes[id.0].image = Some(placed);
            return Some(id);
        }
        let dw = rect.w - img.w;
        let dh = rect.h - img.h;
        let (first_rect, second_rect) = if dw > dh {
            (
                PixRect::new(rect.x, rect.y, img.w, rect.h),
                PixRect::new(rect.x + img.w, rect.y, dw, rect.h),
            )
        } else {
            (
                PixRect::new(rect.x, rect.y, rect.w, img.h),
                PixRect::new(rect.x, rect.y + img.h, rect.w, dh),
            )
        };
        let c0 = self.alloc(NodeKind::Regular, first_rect);
        let c1 = self.alloc(NodeKind::Regular, second_rect);
        self.nodes[id.0].children = Some((c0, c1));
        self.insert(c0, img, handedness)
    }

    /// Tightest box (exclusive max x / max y) enclosing all placed images
    /// under `id`, relative to the arena's global coordinates.
    pub fn extent(&self, id: NodeId) -> (u32, u32) {
        let mut max_x = 0u32;
        let mut max_y = 0u32;
        self.walk_images(id, &mut |img| {
            max_x = max_x.max(img.x + img.w);
            max_y = max_y.max(img.y + img.h);
        });
        (max_x, max_y)
    }

    /// All placed images under `id`, in traversal order.
    pub fn flatten(&self, id: NodeId) -> Vec<Image> {
        let mut out = Vec::new();
        self.walk_images(id, &mut |img| out.push(*img));
        out
    }

    fn walk_images(&self, id: NodeId, f: &mut impl FnMut(&Image)) {
        let node = &self.nodes[id.0];
        if let Some(img) = &node.image {
            f(img);
        }
        if let Some((a, b)) = node.children {
            self.walk_images(a, f);
            self.walk_images(b, f);
        }
    }

    /// Wraps `root` in a new `Container` whose second child is a fresh
    /// `AtlasRoot` of `max_w x max_h`, appended to the right of the
    /// existing area. Returns `(container, new_atlas_root)`.
    pub fn wrap_with_container(&mut self, root: NodeId, max_w: u32, max_h: u32) -> (NodeId, NodeId) {
        let old = self.nodes[root.0].rect;
        let fresh_rect = PixRect::new(old.x + old.w, 0, max_w, max_h);
        let fresh = self.alloc(NodeKind::AtlasRoot, fresh_rect);
        let container_rect = PixRect::new(old.x, 0, old.w + max_w, old.h.max(max_h));
        let container = self.alloc(NodeKind::Container, container_rect);
        self.nodes[container.0].children = Some((root, fresh));
        (container, fresh)
    }

    /// Collects every `AtlasRoot` under `id` by walking the left spine of
    /// container nodes; results come back in append order.
    pub fn atlas_roots(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_roots(id, &mut out);
        out
    }

    fn collect_roots(&self, id: NodeId, out: &mut Vec<NodeId>) {
        match self.nodes[id.0].kind {
            NodeKind::Container => {
                let (left, right) = self.nodes[id.0]
                    .children
                    .expect("container nodes always have two children");
                self.collect_roots(left, out);
                self.collect_roots(right, out);
            }
            NodeKind::AtlasRoot => out.push(id),
            NodeKind::Regular => {}
        }
    }
}
