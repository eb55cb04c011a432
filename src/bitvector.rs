// Shared read/write surface of a fixed-capacity bit set, so the sparse
// encoding and the dense reference can be driven by the same test and
// benchmark code.
pub trait BitVector {
    fn get(&self, index: usize) -> bool;

    fn set(&mut self, index: usize, value: bool);

    // Number of 1-bits.
    fn count(&self) -> usize;

    // Number of addressable bits.
    fn capacity(&self) -> usize;

    fn ones(&self) -> Vec<usize> {
        (0..self.capacity()).filter(|&i| self.get(i)).collect()
    }
}

impl BitVector for crate::SparseBitSet {
    fn get(&self, index: usize) -> bool {
        crate::SparseBitSet::get(self, index)
    }

    fn set(&mut self, index: usize, value: bool) {
        crate::SparseBitSet::set(self, index, value)
    }

    fn count(&self) -> usize {
        crate::SparseBitSet::count(self)
    }

    fn capacity(&self) -> usize {
        crate::SparseBitSet::capacity(self)
    }

    fn ones(&self) -> Vec<usize> {
        self.iter().collect()
    }
}
