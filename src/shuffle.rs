use rand::Rng;

/// Picks indices for the Fisher–Yates shuffle.
pub trait PermutationSource {
    /// Returns an index in `0..bound`. `bound` is never zero.
    fn pick(&mut self, bound: usize) -> usize;
}

/// Uniform picks from any `rand` generator.
#[derive(Debug)]
pub struct RandomSource<R>(pub R);

impl RandomSource<rand::rngs::ThreadRng> {
    pub fn thread() -> Self {
        RandomSource(rand::rng())
    }
}

impl<R: Rng> PermutationSource for RandomSource<R> {
    fn pick(&mut self, bound: usize) -> usize {
        self.0.random_range(0..bound)
    }
}

/// Shuffles in place: walks from the back, swapping each slot with a picked slot at or before it.
pub fn shuffle<T>(items: &mut [T], source: &mut dyn PermutationSource) {
    for i in (1..items.len()).rev() {
        let j = source.pick(i + 1);
        items.swap(i, j);
    }
}
