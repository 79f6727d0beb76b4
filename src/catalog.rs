//! The fixed set of benchmark cases the `lanebench` binary runs.
//!
//! Every entry is a monomorphized function, so selecting a case by
//! `(kind, operation)` never needs the element type at run time.

use log::info;

use crate::bench::{Benchmark, BenchmarkResult, OperationSpec};
use crate::config::BenchConfig;
use crate::error::{BenchError, Result};
use crate::kind::{NumericKind, Operation};
use crate::simd::Element;

/// One `(kind, operation)` benchmark case.
#[derive(Clone, Copy)]
pub struct CatalogEntry {
    pub kind: NumericKind,
    pub operation: Operation,
    execute: fn(Operation, &BenchConfig) -> Result<BenchmarkResult>,
}

impl CatalogEntry {
    /// Runs the case at the host's lane width.
    pub fn run(&self, config: &BenchConfig) -> Result<BenchmarkResult> {
        info!("running {} {}", self.kind, self.operation);
        (self.execute)(self.operation, config)
    }
}

impl std::fmt::Debug for CatalogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogEntry")
            .field("kind", &self.kind)
            .field("operation", &self.operation)
            .finish()
    }
}

fn execute_case<T: Element>(operation: Operation, config: &BenchConfig) -> Result<BenchmarkResult> {
    config.validate()?;
    let spec = OperationSpec::<T>::new(operation)?;
    Benchmark::new(config.count, config.repetitions, spec)?
        .with_seed(config.seed)
        .run()
}

macro_rules! catalog {
    ($($t:ty => [$($op:ident),+]),+ $(,)?) => {
        &[
            $($(
                CatalogEntry {
                    kind: <$t as Element>::KIND,
                    operation: Operation::$op,
                    execute: execute_case::<$t>,
                },
            )+)+
        ]
    };
}

/// Every case, in report order.
pub static CATALOG: &[CatalogEntry] = catalog! {
    i32 => [Add, Subtract, Multiply],
    u8 => [Add, Subtract, Multiply],
    i8 => [Add, Subtract, Multiply],
    i16 => [Add, Subtract, Multiply],
    u16 => [Add, Subtract, Multiply],
    u32 => [Add, Subtract, Multiply],
    i64 => [Add, Subtract, Multiply],
    u64 => [Add, Subtract, Multiply],
    f32 => [Add, Subtract, Multiply, Divide],
    f64 => [Add, Subtract, Multiply, Divide],
};

/// Looks up the case for `kind` and `operation`.
pub fn find(kind: NumericKind, operation: Operation) -> Result<&'static CatalogEntry> {
    CATALOG
        .iter()
        .find(|entry| entry.kind == kind && entry.operation == operation)
        .ok_or(BenchError::Unsupported { kind, operation })
}

/// Cases matching both filters, in catalog order. An empty filter matches
/// everything.
pub fn select<'a>(
    kinds: &'a [NumericKind],
    operations: &'a [Operation],
) -> impl Iterator<Item = &'static CatalogEntry> + 'a {
    CATALOG.iter().filter(move |entry| {
        (kinds.is_empty() || kinds.contains(&entry.kind))
            && (operations.is_empty() || operations.contains(&entry.operation))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order_and_size() {
        assert_eq!(CATALOG.len(), 8 * 3 + 2 * 4);
        assert_eq!(CATALOG[0].kind, NumericKind::I32);
        assert_eq!(CATALOG[0].operation, Operation::Add);

        let last = CATALOG[CATALOG.len() - 1];
        assert_eq!(last.kind, NumericKind::F64);
        assert_eq!(last.operation, Operation::Divide);
    }

    #[test]
    fn test_every_entry_is_supported() {
        for entry in CATALOG {
            assert!(entry.kind.supports(entry.operation), "{entry:?}");
        }
    }

    #[test]
    fn test_find_integer_division() {
        let err = find(NumericKind::I16, Operation::Divide).unwrap_err();
        assert_eq!(
            err,
            BenchError::Unsupported {
                kind: NumericKind::I16,
                operation: Operation::Divide
            }
        );
    }

    #[test]
    fn test_select_filters() {
        let kinds = [NumericKind::F32, NumericKind::U8];
        let operations = [Operation::Multiply];
        let picked: Vec<_> = select(&kinds, &operations)
            .map(|e| (e.kind, e.operation))
            .collect();
        assert_eq!(
            picked,
            vec![
                (NumericKind::U8, Operation::Multiply),
                (NumericKind::F32, Operation::Multiply)
            ]
        );

        assert_eq!(select(&[], &[]).count(), CATALOG.len());
    }
}
