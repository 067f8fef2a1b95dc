/// Disjoint set union over `0..len`, with path compression and union by size.
pub struct Dsu {
    parent: Vec<usize>,
    size: Vec<usize>,
    num_components: usize,
}

impl Dsu {
    pub fn new(len: usize) -> Self {
        Dsu {
            parent: (0..len).collect(),
            size: vec![1; len],
            num_components: len,
        }
    }

    pub fn find(&mut self, i: usize) -> usize {
        let mut root = i;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut current = i;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }

        root
    }

    /// Returns false when `i` and `j` were already connected.
    pub fn union(&mut self, i: usize, j: usize) -> bool {
        let root_i = self.find(i);
        let root_j = self.find(j);
        if root_i == root_j {
            return false;
        }

        let (small, large) = if self.size[root_i] < self.size[root_j] {
            (root_i, root_j)
        } else {
            (root_j, root_i)
        };
        self.parent[small] = large;
        self.size[large] += self.size[small];
        self.num_components -= 1;

        true
    }

    pub fn num_components(&self) -> usize {
        self.num_components
    }
}
