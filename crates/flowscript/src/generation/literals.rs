//! Constant-to-literal formatting.
//!
//! Single-precision floats carry the `f` suffix; double-precision values
//! render as plain numeric literals. Strings are double-quoted without
//! escaping: constants containing quotes or backslashes produce broken
//! text, a documented limitation of the generated-code contract.

use flowgraph::{ConstantValue, DataType};

pub fn format_constant(value: &ConstantValue) -> String {
    match value {
        ConstantValue::Boolean(b) => b.to_string(),
        ConstantValue::Integer(i) => i.to_string(),
        ConstantValue::Float(v) => format!("{}f", v),
        ConstantValue::Double(v) => format!("{}", v),
        ConstantValue::String(s) => format!("\"{}\"", s),
        ConstantValue::Null => "null".to_string(),
    }
}

/// Target-language type name for a pin's data type. Used for generated
/// function parameters.
pub fn csharp_type(data_type: DataType) -> &'static str {
    match data_type {
        DataType::Boolean => "bool",
        DataType::Integer => "int",
        DataType::Float => "float",
        DataType::Double => "double",
        DataType::String => "string",
        DataType::Object | DataType::Any => "object",
        DataType::Sequence => "void",
    }
}
