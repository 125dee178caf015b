//! Seedable Lehmer generator. Every random choice in the workspace draws from
//! an explicitly passed `Rand` so runs can be replayed from a seed.

const MUL: u64 = 48271;
const MOD: u64 = 2147483647;

#[derive(Debug, Clone)]
pub struct Rand(u32);

impl Rand {
    pub fn new(seed: u32) -> Rand {
        // Zero is a fixed point of the generator.
        match (seed as u64) % MOD {
            0 => Rand(1),
            s => Rand(s as _),
        }
    }

    pub fn gen(&mut self) -> u32 {
        self.0 = next(self.0);
        self.0
    }

    pub fn uniform(&mut self, low: u32, high: u32) -> u32 {
        assert!(low < high);
        let size = high - low;
        let scaling = (MOD as u32 - 1) / size;
        let max = scaling * size;
        loop {
            let val = self.gen();
            if val < max {
                return val / scaling + low;
            }
        }
    }

    pub fn index(&mut self, len: usize) -> usize {
        self.uniform(0, len as u32) as usize
    }

    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            Some(&items[self.index(items.len())])
        }
    }

    /// Removes elements in random order, so the result is a uniform permutation.
    pub fn shuffle<T>(&mut self, mut items: Vec<T>) -> Vec<T> {
        let mut shuffled = Vec::with_capacity(items.len());
        for i in (2..=items.len()).rev() {
            let idx = self.uniform(0, i as u32);
            shuffled.push(items.remove(idx as usize));
        }
        shuffled.extend(items.pop());
        shuffled
    }

    pub fn discard(&mut self, num: usize) {
        (0..num).for_each(|_| {
            self.gen();
        })
    }
}

fn next(s: u32) -> u32 {
    (((s as u64) * MUL) % MOD) as u32
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_next() {
        assert_eq!(next(1), MUL as u32);
    }

    #[test]
    fn test_multiple() {
        let mut rand = Rand::new(18446744071653277558u64 as u32);
        assert_eq!(22, rand.uniform(0, 110));
        assert_eq!(98, rand.uniform(0, 109));
        assert_eq!(19, rand.uniform(0, 108));
        assert_eq!(97, rand.uniform(0, 107));
    }

    #[test]
    fn test_zero_seed_still_moves() {
        let mut rand = Rand::new(0);
        let a = rand.gen();
        let b = rand.gen();
        assert_ne!(a, b);
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rand = Rand::new(99);
        let mut shuffled = rand.shuffle((0..20).collect::<Vec<u32>>());
        shuffled.sort();
        assert_eq!(shuffled, (0..20).collect::<Vec<u32>>());
        assert!(rand.shuffle(Vec::<u32>::new()).is_empty());
    }
}
