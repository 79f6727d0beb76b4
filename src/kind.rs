//! Element kinds and arithmetic operations covered by the benchmark.

use std::fmt;
use std::str::FromStr;

use crate::error::{configuration_error, BenchError};

/// Supported element kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NumericKind {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
}

/// Static description of one [`NumericKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindInfo {
    pub kind: NumericKind,
    /// Rust primitive name, used in tables and on the command line.
    pub name: &'static str,
    /// Other accepted spellings on the command line.
    pub aliases: &'static [&'static str],
    pub byte_width: usize,
    pub is_float: bool,
    pub is_signed: bool,
}

/// Per-kind lookup table, indexed by `NumericKind as usize`.
pub const KIND_TABLE: [KindInfo; 10] = [
    KindInfo {
        kind: NumericKind::I8,
        name: "i8",
        aliases: &["sbyte", "int8"],
        byte_width: 1,
        is_float: false,
        is_signed: true,
    },
    KindInfo {
        kind: NumericKind::U8,
        name: "u8",
        aliases: &["byte", "uint8"],
        byte_width: 1,
        is_float: false,
        is_signed: false,
    },
    KindInfo {
        kind: NumericKind::I16,
        name: "i16",
        aliases: &["short", "int16"],
        byte_width: 2,
        is_float: false,
        is_signed: true,
    },
    KindInfo {
        kind: NumericKind::U16,
        name: "u16",
        aliases: &["ushort", "uint16"],
        byte_width: 2,
        is_float: false,
        is_signed: false,
    },
    KindInfo {
        kind: NumericKind::I32,
        name: "i32",
        aliases: &["int", "int32"],
        byte_width: 4,
        is_float: false,
        is_signed: true,
    },
    KindInfo {
        kind: NumericKind::U32,
        name: "u32",
        aliases: &["uint", "uint32"],
        byte_width: 4,
        is_float: false,
        is_signed: false,
    },
    KindInfo {
        kind: NumericKind::I64,
        name: "i64",
        aliases: &["long", "int64"],
        byte_width: 8,
        is_float: false,
        is_signed: true,
    },
    KindInfo {
        kind: NumericKind::U64,
        name: "u64",
        aliases: &["ulong", "uint64"],
        byte_width: 8,
        is_float: false,
        is_signed: false,
    },
    KindInfo {
        kind: NumericKind::F32,
        name: "f32",
        aliases: &["float", "single"],
        byte_width: 4,
        is_float: true,
        is_signed: true,
    },
    KindInfo {
        kind: NumericKind::F64,
        name: "f64",
        aliases: &["double"],
        byte_width: 8,
        is_float: true,
        is_signed: true,
    },
];

impl NumericKind {
    /// Every kind, in table order.
    pub const ALL: [NumericKind; 10] = [
        NumericKind::I8,
        NumericKind::U8,
        NumericKind::I16,
        NumericKind::U16,
        NumericKind::I32,
        NumericKind::U32,
        NumericKind::I64,
        NumericKind::U64,
        NumericKind::F32,
        NumericKind::F64,
    ];

    #[inline]
    pub fn info(self) -> &'static KindInfo {
        &KIND_TABLE[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    pub fn byte_width(self) -> usize {
        self.info().byte_width
    }

    pub fn is_float(self) -> bool {
        self.info().is_float
    }

    /// Division is only benchmarked for float kinds.
    pub fn supports(self, operation: Operation) -> bool {
        operation != Operation::Divide || self.is_float()
    }
}

impl fmt::Display for NumericKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NumericKind {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        KIND_TABLE
            .iter()
            .find(|info| info.name == wanted || info.aliases.contains(&wanted.as_str()))
            .map(|info| info.kind)
            .ok_or_else(|| configuration_error(format!("unknown numeric kind '{s}'")))
    }
}

/// The four benchmarked arithmetic operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
    ];

    /// Display name used in the report table.
    pub fn name(self) -> &'static str {
        match self {
            Operation::Add => "Add",
            Operation::Subtract => "Subtract",
            Operation::Multiply => "Multiply",
            Operation::Divide => "Divide",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "add" | "+" => Ok(Operation::Add),
            "subtract" | "sub" | "-" => Ok(Operation::Subtract),
            "multiply" | "mul" | "*" => Ok(Operation::Multiply),
            "divide" | "div" | "/" => Ok(Operation::Divide),
            _ => Err(configuration_error(format!("unknown operation '{s}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_indexed_by_kind() {
        for kind in NumericKind::ALL {
            assert_eq!(kind.info().kind, kind);
        }
    }

    #[test]
    fn test_byte_widths_match_primitives() {
        assert_eq!(NumericKind::I8.byte_width(), std::mem::size_of::<i8>());
        assert_eq!(NumericKind::U16.byte_width(), std::mem::size_of::<u16>());
        assert_eq!(NumericKind::F32.byte_width(), std::mem::size_of::<f32>());
        assert_eq!(NumericKind::U64.byte_width(), std::mem::size_of::<u64>());
    }

    #[test]
    fn test_parse_names_and_aliases() {
        assert_eq!("i32".parse::<NumericKind>().unwrap(), NumericKind::I32);
        assert_eq!("Double".parse::<NumericKind>().unwrap(), NumericKind::F64);
        assert_eq!("sbyte".parse::<NumericKind>().unwrap(), NumericKind::I8);
        assert!("i128".parse::<NumericKind>().is_err());

        assert_eq!("sub".parse::<Operation>().unwrap(), Operation::Subtract);
        assert_eq!("Divide".parse::<Operation>().unwrap(), Operation::Divide);
        assert!("modulo".parse::<Operation>().is_err());
    }

    #[test]
    fn test_division_only_for_floats() {
        for kind in NumericKind::ALL {
            assert_eq!(kind.supports(Operation::Divide), kind.is_float());
            assert!(kind.supports(Operation::Add));
        }
    }
}
