use crate::Generator;
use burrow_core::ShortCode;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Replays a fixed list of codes in order, wrapping around at the end.
///
/// Useful for reproducing a known sequence of candidates, including
/// deliberate collisions.
#[derive(Debug)]
pub struct CycleGenerator {
    codes: Vec<ShortCode>,
    cursor: AtomicUsize,
}

impl CycleGenerator {
    /// Creates a generator over `codes`.
    ///
    /// Returns `None` if `codes` is empty.
    pub fn new(codes: impl IntoIterator<Item = ShortCode>) -> Option<Self> {
        let codes: Vec<_> = codes.into_iter().collect();
        if codes.is_empty() {
            return None;
        }
        Some(Self {
            codes,
            cursor: AtomicUsize::new(0),
        })
    }

    /// Number of codes handed out so far.
    pub fn generated(&self) -> usize {
        self.cursor.load(Ordering::SeqCst)
    }
}

impl Generator for CycleGenerator {
    fn generate(&self) -> ShortCode {
        let count = self.cursor.fetch_add(1, Ordering::SeqCst);
        self.codes[count % self.codes.len()].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> ShortCode {
        ShortCode::new(s).unwrap()
    }

    #[test]
    fn replays_in_order_and_wraps() {
        let generator = CycleGenerator::new([code("aaa111"), code("bbb222")]).unwrap();

        assert_eq!(generator.generate().as_str(), "aaa111");
        assert_eq!(generator.generate().as_str(), "bbb222");
        assert_eq!(generator.generate().as_str(), "aaa111");
        assert_eq!(generator.generated(), 3);
    }

    #[test]
    fn empty_list_is_rejected() {
        assert!(CycleGenerator::new(Vec::new()).is_none());
    }
}
