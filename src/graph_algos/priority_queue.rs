/// Entry stored in the heap
/// The same id may appear in several entries, only the priority orders them
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeapEntry<P> {
    pub id: usize,
    pub priority: P,
}


/// Binary min-heap over (id, priority) pairs
/// No decrease-key: an improved priority is pushed as a fresh entry and the
/// consumer skips the stale one when it surfaces.
///
/// Laid out as an implicit tree in a vector: children of slot i sit at 2i+1 and 2i+2.
#[derive(Clone, Debug)]
pub struct MinHeap<P> {
    data: Vec<HeapEntry<P>>,
}

impl<P: PartialOrd + Copy> MinHeap<P> {

    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Pre-size the backing storage, it still grows past `capacity` when needed
    pub fn with_capacity(capacity: usize) -> Self {
        Self { data: Vec::with_capacity(capacity) }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Insert at the next free slot and sift up while the parent has a larger priority
    pub fn insert(&mut self, id: usize, priority: P) {
        let entry = HeapEntry { id, priority };
        let mut i = self.data.len();
        self.data.push(entry);

        while i > 0 {
            let parent = (i - 1) / 2;
            if self.data[parent].priority > priority {
                self.data[i] = self.data[parent];
                i = parent;
            } else {
                break;
            }
        }
        self.data[i] = entry;
    }

    /// Remove the entry with the smallest priority, None when empty
    pub fn extract_min(&mut self) -> Option<HeapEntry<P>> {
        let last = self.data.pop()?;
        if self.data.is_empty() {
            return Some(last);
        }

        let min = self.data[0];
        let size = self.data.len();

        // sift the former last entry down from the root
        let mut i = 0;
        loop {
            let left = 2 * i + 1;
            if left >= size {
                break;
            }
            let mut child = left;
            let right = left + 1;
            if right < size && self.data[right].priority < self.data[left].priority {
                child = right;
            }
            // stop on ties, only a strictly smaller child moves up
            if self.data[child].priority < last.priority {
                self.data[i] = self.data[child];
                i = child;
            } else {
                break;
            }
        }
        self.data[i] = last;

        Some(min)
    }

    /// Smallest entry without removing it
    pub fn peek(&self) -> Option<&HeapEntry<P>> {
        self.data.first()
    }
}

impl<P: PartialOrd + Copy> Default for MinHeap<P> {
    fn default() -> Self {
        Self::new()
    }
}
