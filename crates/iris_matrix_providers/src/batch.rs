use std::ops::Range;

/// A bounded origins x destinations sub-request of the full matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixBlock {
    pub origins: Range<usize>,
    pub destinations: Range<usize>,
}

/// Splits `0..len` into consecutive ranges of at most `batch_size` items.
pub fn split_into_batches(len: usize, batch_size: usize) -> Vec<Range<usize>> {
    debug_assert!(batch_size > 0);
    (0..len)
        .step_by(batch_size)
        .map(|start| start..(start + batch_size).min(len))
        .collect()
}

/// Origin batches major, destination batches minor.
pub fn partition_blocks(len: usize, batch_size: usize) -> Vec<MatrixBlock> {
    let batches = split_into_batches(len, batch_size);

    batches
        .iter()
        .flat_map(|origins| {
            batches.iter().map(move |destinations| MatrixBlock {
                origins: origins.clone(),
                destinations: destinations.clone(),
            })
        })
        .collect()
}
