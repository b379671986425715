//! Batcher module for the tender sync.
//!
//! Splits documents into consecutive, fixed-size groups for bulk upload.

use std::num::NonZeroUsize;

/// Default number of documents per bulk request.
pub const DEFAULT_BATCH_SIZE: NonZeroUsize = match NonZeroUsize::new(1000) {
    Some(size) => size,
    None => unreachable!(),
};

/// Partition `documents` into groups of `batch_size`, preserving order.
///
/// Every group holds exactly `batch_size` items except possibly the last.
/// An empty input yields no groups.
pub fn into_batches<T>(documents: &[T], batch_size: NonZeroUsize) -> Vec<&[T]> {
    documents.chunks(batch_size.get()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_partition_laws() {
        for (total, batch) in [(0, 1), (1, 1), (5, 2), (6, 3), (2500, 1000), (1000, 1000), (3, 10)] {
            let documents: Vec<usize> = (0..total).collect();
            let batches = into_batches(&documents, size(batch));

            assert_eq!(batches.len(), total.div_ceil(batch), "{} / {}", total, batch);
            if let Some((last, full)) = batches.split_last() {
                assert!(full.iter().all(|b| b.len() == batch));
                assert!(!last.is_empty() && last.len() <= batch);
            }
            assert_eq!(batches.concat(), documents);
        }
    }

    #[test]
    fn test_empty_input_yields_no_batches() {
        let documents: Vec<u8> = Vec::new();
        assert!(into_batches(&documents, DEFAULT_BATCH_SIZE).is_empty());
    }

    #[test]
    fn test_default_batch_size() {
        assert_eq!(DEFAULT_BATCH_SIZE.get(), 1000);

        let documents: Vec<u32> = (0..2500).collect();
        let lengths: Vec<usize> = into_batches(&documents, DEFAULT_BATCH_SIZE)
            .iter()
            .map(|b| b.len())
            .collect();
        assert_eq!(lengths, vec![1000, 1000, 500]);
    }
}
