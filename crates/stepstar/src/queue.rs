//! Binary min-heap over externally scored elements.
//!
//! Unlike [`std::collections::BinaryHeap`], elements do not carry their own
//! ordering: a [`Score`] strategy is consulted on every comparison. Scores may
//! change while an element sits in the queue, as long as the caller follows
//! up with [`PriorityQueue::rescore`].

use crate::traits::Score;

/// A binary min-heap ordered by a caller-supplied [`Score`].
///
/// Every element's score is less than or equal to the scores of its two heap
/// children. Equal scores are allowed and carry no further ordering.
#[derive(Clone, Debug)]
pub struct PriorityQueue<T> {
    elements: Vec<T>,
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PriorityQueue<T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    /// Create an empty queue with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elements: Vec::with_capacity(capacity),
        }
    }

    /// Number of queued elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Drop all elements, keeping the allocation.
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// The minimum element, if any.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.elements.first()
    }

    /// The elements in heap order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }

    /// Insert `element`. O(log n).
    pub fn push<S>(&mut self, element: T, scorer: &S)
    where
        S: Score<T> + ?Sized,
    {
        self.elements.push(element);
        self.sift_up(self.elements.len() - 1, scorer);
    }

    /// Remove and return the minimum element. O(log n).
    pub fn pop<S>(&mut self, scorer: &S) -> Option<T>
    where
        S: Score<T> + ?Sized,
    {
        if self.elements.is_empty() {
            return None;
        }
        let first = self.elements.swap_remove(0);
        if !self.elements.is_empty() {
            self.sift_down(0, scorer);
        }
        Some(first)
    }

    /// Restore heap order around `i` after its score changed in either
    /// direction. Returns the element's final position.
    fn fix<S>(&mut self, i: usize, scorer: &S) -> usize
    where
        S: Score<T> + ?Sized,
    {
        let moved = self.sift_up(i, scorer);
        if moved == i {
            self.sift_down(i, scorer)
        } else {
            moved
        }
    }

    /// Move the element at `n` towards the root while it scores lower than
    /// its parent.
    fn sift_up<S>(&mut self, mut n: usize, scorer: &S) -> usize
    where
        S: Score<T> + ?Sized,
    {
        let score = scorer.score(&self.elements[n]);
        while n > 0 {
            let parent = (n - 1) / 2;
            if score < scorer.score(&self.elements[parent]) {
                self.elements.swap(n, parent);
                n = parent;
            } else {
                break;
            }
        }
        n
    }

    /// Move the element at `n` towards the leaves while one of its children
    /// scores lower, always swapping with the lower child.
    fn sift_down<S>(&mut self, mut n: usize, scorer: &S) -> usize
    where
        S: Score<T> + ?Sized,
    {
        let len = self.elements.len();
        let score = scorer.score(&self.elements[n]);
        loop {
            let left = 2 * n + 1;
            let right = left + 1;
            let mut swap = None;
            let mut best = score;

            if left < len {
                let s = scorer.score(&self.elements[left]);
                if s < best {
                    swap = Some(left);
                    best = s;
                }
            }
            if right < len && scorer.score(&self.elements[right]) < best {
                swap = Some(right);
            }

            match swap {
                Some(child) => {
                    self.elements.swap(n, child);
                    n = child;
                }
                None => return n,
            }
        }
    }
}

impl<T: PartialEq> PriorityQueue<T> {
    fn position(&self, element: &T) -> Option<usize> {
        self.elements.iter().position(|e| e == element)
    }

    /// Whether `element` is queued. O(n).
    pub fn contains(&self, element: &T) -> bool {
        self.position(element).is_some()
    }

    /// Remove `element` from anywhere in the queue.
    ///
    /// Returns `None` if it is not queued. O(n) to locate, O(log n) to
    /// restore order.
    pub fn remove<S>(&mut self, element: &T, scorer: &S) -> Option<T>
    where
        S: Score<T> + ?Sized,
    {
        let i = self.position(element)?;
        let removed = self.elements.swap_remove(i);
        if i < self.elements.len() {
            // The former last element now sits at `i`.
            if scorer.score(&self.elements[i]) < scorer.score(&removed) {
                self.sift_up(i, scorer);
            } else {
                self.sift_down(i, scorer);
            }
        }
        Some(removed)
    }

    /// Reposition `element` after its score changed.
    ///
    /// Returns `false` if it is not queued.
    pub fn rescore<S>(&mut self, element: &T, scorer: &S) -> bool
    where
        S: Score<T> + ?Sized,
    {
        match self.position(element) {
            Some(i) => {
                self.fix(i, scorer);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn by_score(scores: &[f64]) -> impl Fn(&usize) -> f64 + '_ {
        move |i: &usize| scores[*i]
    }

    fn assert_heap_order(q: &PriorityQueue<usize>, scores: &[f64]) {
        let e = q.as_slice();
        for i in 1..e.len() {
            let parent = (i - 1) / 2;
            assert!(
                scores[e[parent]] <= scores[e[i]],
                "heap order broken at {i}: parent {} > child {}",
                scores[e[parent]],
                scores[e[i]]
            );
        }
    }

    #[test]
    fn pops_in_score_order() {
        let scores = [5.0, 1.0, 4.0, 2.0, 3.0];
        let mut q = PriorityQueue::new();
        for i in 0..scores.len() {
            q.push(i, &by_score(&scores));
        }
        let mut out = Vec::new();
        while let Some(i) = q.pop(&by_score(&scores)) {
            out.push(i);
        }
        assert_eq!(out, vec![1, 3, 4, 2, 0]);
        assert_eq!(q.pop(&by_score(&scores)), None);
    }

    #[test]
    fn duplicate_scores() {
        let scores = [1.0, 1.0, 0.5, 1.0];
        let mut q = PriorityQueue::new();
        for i in 0..scores.len() {
            q.push(i, &by_score(&scores));
        }
        assert_eq!(q.pop(&by_score(&scores)), Some(2));
        let mut rest = Vec::new();
        while let Some(i) = q.pop(&by_score(&scores)) {
            rest.push(i);
        }
        rest.sort();
        assert_eq!(rest, vec![0, 1, 3]);
    }

    #[test]
    fn remove_middle_and_last() {
        let scores = [3.0, 1.0, 2.0, 8.0, 9.0, 4.0];
        let mut q = PriorityQueue::new();
        for i in 0..scores.len() {
            q.push(i, &by_score(&scores));
        }
        assert_eq!(q.remove(&3, &by_score(&scores)), Some(3));
        assert_heap_order(&q, &scores);
        let last = *q.as_slice().last().unwrap();
        assert_eq!(q.remove(&last, &by_score(&scores)), Some(last));
        assert_heap_order(&q, &scores);
        assert_eq!(q.remove(&3, &by_score(&scores)), None);
        assert_eq!(q.len(), 4);
        assert!(!q.contains(&3));
    }

    #[test]
    fn remove_fills_hole_with_smaller_element() {
        // Heap layout equals push order: the last element (score 4, left
        // subtree) replaces a hole in the right subtree and must rise.
        let scores = [0.0, 1.0, 10.0, 2.0, 3.0, 11.0, 12.0, 4.0];
        let mut q = PriorityQueue::new();
        for i in 0..scores.len() {
            q.push(i, &by_score(&scores));
        }
        assert_eq!(q.as_slice(), &[0, 1, 2, 3, 4, 5, 6, 7]);

        assert_eq!(q.remove(&5, &by_score(&scores)), Some(5));
        assert_heap_order(&q, &scores);
        assert_eq!(q.as_slice()[2], 7);
    }

    #[test]
    fn rescore_both_directions() {
        let mut scores = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let mut q = PriorityQueue::new();
        for i in 0..scores.len() {
            q.push(i, &by_score(&scores));
        }

        scores[4] = 0.0;
        assert!(q.rescore(&4, &by_score(&scores)));
        assert_eq!(q.peek(), Some(&4));

        scores[4] = 10.0;
        assert!(q.rescore(&4, &by_score(&scores)));
        assert_eq!(q.peek(), Some(&0));
        assert_heap_order(&q, &scores);

        assert!(!q.rescore(&99, &by_score(&scores)));
    }

    #[test]
    fn clear_empties() {
        let scores = [1.0, 2.0];
        let mut q = PriorityQueue::with_capacity(2);
        q.push(0, &by_score(&scores));
        q.push(1, &by_score(&scores));
        q.clear();
        assert!(q.is_empty());
        assert_eq!(q.peek(), None);
    }

    #[test]
    fn randomized_against_sorted_reference() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut scores: Vec<f64> = Vec::new();
        let mut q = PriorityQueue::new();
        let mut reference: Vec<usize> = Vec::new();

        for _ in 0..4000 {
            match rng.random_range(0..4u32) {
                0 => {
                    let id = scores.len();
                    scores.push(f64::from(rng.random_range(0..50u32)));
                    q.push(id, &by_score(&scores));
                    reference.push(id);
                }
                1 => {
                    let popped = q.pop(&by_score(&scores));
                    reference.sort_by(|a, b| scores[*a].total_cmp(&scores[*b]));
                    match popped {
                        Some(id) => {
                            assert_eq!(scores[id], scores[reference[0]]);
                            let at = reference.iter().position(|&r| r == id).unwrap();
                            reference.remove(at);
                        }
                        None => assert!(reference.is_empty()),
                    }
                }
                2 if !reference.is_empty() => {
                    let at = rng.random_range(0..reference.len());
                    let id = reference.swap_remove(at);
                    assert_eq!(q.remove(&id, &by_score(&scores)), Some(id));
                }
                3 if !reference.is_empty() => {
                    let id = reference[rng.random_range(0..reference.len())];
                    scores[id] = f64::from(rng.random_range(0..50u32));
                    assert!(q.rescore(&id, &by_score(&scores)));
                }
                _ => {}
            }

            assert_eq!(q.len(), reference.len());
            assert_heap_order(&q, &scores);
            let min = reference
                .iter()
                .map(|&r| scores[r])
                .fold(f64::INFINITY, f64::min);
            match q.peek() {
                Some(&root) => assert_eq!(scores[root], min),
                None => assert!(reference.is_empty()),
            }
        }
    }
}
