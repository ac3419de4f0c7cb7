//! Parsing of type names such as `uint256`, `bytes32[]` or `(address,uint256)[3]` into
//! [`AbiType`] descriptors.

use std::fmt;

use tracing::trace;

use crate::{error::Error, layout::layout_fits};

/// Bit widths accepted for `uintN` and `intN`.
pub const SUPPORTED_INT_WIDTHS: [usize; 5] = [8, 16, 32, 64, 256];

/// Deepest nesting of tuples and array suffixes a type name may have.
pub const MAX_NESTING_DEPTH: usize = 64;

/// A parsed ABI type.
///
/// Descriptors form a tree: arrays and slices own their element type, tuples own their
/// components. The grammar is acyclic, so no descriptor can contain itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AbiType {
    /// `bool`
    Bool,
    /// `uintN`, holding the bit width.
    Uint(usize),
    /// `intN`, holding the bit width.
    Int(usize),
    /// `address`, 20 bytes.
    Address,
    /// `hash`, a 32 byte word. Encoded exactly like `bytes32`.
    Hash,
    /// `bytesN`, holding the byte width (1..=32).
    FixedBytes(usize),
    /// `bytes`, a dynamic byte string.
    Bytes,
    /// `string`, a dynamic UTF-8 string.
    String,
    /// `T[]`
    Slice(Box<AbiType>),
    /// `T[N]`
    Array(Box<AbiType>, usize),
    /// `(T1,...,Tk)`
    Tuple(Vec<AbiType>),
    /// `function`, a 20 byte address followed by a 4 byte selector.
    Function,
}

impl fmt::Display for AbiType {
    /// Writes the canonical name used in signatures. `hash` is written as `bytes32`, since that is
    /// how contracts declare it.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbiType::Bool => write!(f, "bool"),
            AbiType::Uint(bits) => write!(f, "uint{bits}"),
            AbiType::Int(bits) => write!(f, "int{bits}"),
            AbiType::Address => write!(f, "address"),
            AbiType::Hash => write!(f, "bytes32"),
            AbiType::FixedBytes(len) => write!(f, "bytes{len}"),
            AbiType::Bytes => write!(f, "bytes"),
            AbiType::String => write!(f, "string"),
            AbiType::Slice(inner) => write!(f, "{inner}[]"),
            AbiType::Array(inner, len) => write!(f, "{inner}[{len}]"),
            AbiType::Tuple(components) => {
                write!(f, "(")?;
                for (i, component) in components.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{component}")?;
                }
                write!(f, ")")
            }
            AbiType::Function => write!(f, "function"),
        }
    }
}

impl std::str::FromStr for AbiType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_type(s)
    }
}

/// Parse a single type name into an [`AbiType`].
///
/// ```
/// use jeth_abi::{parse_type, AbiType};
///
/// let ty = parse_type("(uint256,bool)[3]").expect("failed to parse type");
/// assert_eq!(
///     ty,
///     AbiType::Array(Box::new(AbiType::Tuple(vec![AbiType::Uint(256), AbiType::Bool])), 3)
/// );
/// ```
pub fn parse_type(name: &str) -> Result<AbiType, Error> {
    parse_type_at(name, 0)
}

fn parse_type_at(name: &str, depth: usize) -> Result<AbiType, Error> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::InvalidType("empty type name".to_string()));
    }

    // (1) peel off the array suffixes, outermost last. `uint256[2][3]` is an array of 3
    // `uint256[2]`s, so the suffixes are applied left to right.
    let (base, suffixes) = split_array_suffixes(name)?;
    let depth = nested_depth(name, depth, suffixes.len())?;

    // (2) parse the base, which is either a tuple or a primitive
    let ty = if base.starts_with('(') { parse_tuple(base, depth)? } else { parse_primitive(base)? };

    // (3) wrap the base in each suffix
    let ty = wrap_suffixes(name, ty, suffixes)?;

    trace!("parsed type '{}' as {}", name, ty);
    Ok(ty)
}

/// Parse a comma separated list of type names, splitting only at top-level commas. Empty
/// entries are skipped, so `"uint256,,bool"` and `"uint256,bool,"` both yield two types.
///
/// ```
/// use jeth_abi::{parse_type_list, AbiType};
///
/// let types = parse_type_list("address,(uint256,bool)").expect("failed to parse types");
/// assert_eq!(types, vec![AbiType::Address, AbiType::Tuple(vec![AbiType::Uint(256), AbiType::Bool])]);
/// ```
pub fn parse_type_list(names: &str) -> Result<Vec<AbiType>, Error> {
    split_top_level(names)?
        .into_iter()
        .filter(|name| !name.trim().is_empty())
        .map(parse_type)
        .collect()
}

/// Parse a tuple type whose components are supplied separately, as JSON ABI descriptions do
/// (`"type": "tuple[]", "components": [...]`).
///
/// The base name must be `tuple` or a parenthesised tuple, optionally followed by array
/// suffixes. When the base is parenthesised and components are also given, their arity must
/// agree.
pub fn parse_type_with_components<S: AsRef<str>>(
    name: &str,
    components: &[S],
) -> Result<AbiType, Error> {
    let name = name.trim();
    let (base, suffixes) = split_array_suffixes(name)?;
    let depth = nested_depth(name, 0, suffixes.len())?;

    let tuple = match base {
        "tuple" => {
            if components.is_empty() {
                return Err(Error::InvalidType(format!("'{name}' requires components")));
            }
            AbiType::Tuple(
                components
                    .iter()
                    .map(|component| parse_type_at(component.as_ref(), depth))
                    .collect::<Result<Vec<_>, _>>()?,
            )
        }
        _ if base.starts_with('(') => {
            let tuple = parse_tuple(base, depth)?;
            if let AbiType::Tuple(elems) = &tuple {
                if !components.is_empty() && elems.len() != components.len() {
                    return Err(Error::InvalidType(format!(
                        "'{name}' has {} components, but {} were supplied",
                        elems.len(),
                        components.len()
                    )));
                }
            }
            tuple
        }
        _ => {
            return Err(Error::InvalidType(format!("'{name}' is not a tuple type")));
        }
    };

    wrap_suffixes(name, tuple, suffixes)
}

/// Depth of the components inside `name`, failing once it exceeds [`MAX_NESTING_DEPTH`].
fn nested_depth(name: &str, depth: usize, suffixes: usize) -> Result<usize, Error> {
    let depth = depth + suffixes + 1;
    if depth > MAX_NESTING_DEPTH {
        return Err(Error::InvalidType(format!(
            "'{name}' nests deeper than {MAX_NESTING_DEPTH} levels"
        )));
    }
    Ok(depth)
}

/// Wraps `base` in each array suffix and rejects types whose encoded head would not fit in
/// memory.
fn wrap_suffixes(
    name: &str,
    base: AbiType,
    suffixes: Vec<Option<usize>>,
) -> Result<AbiType, Error> {
    let ty = suffixes.into_iter().fold(base, |ty, suffix| match suffix {
        Some(len) => AbiType::Array(Box::new(ty), len),
        None => AbiType::Slice(Box::new(ty)),
    });

    if !layout_fits(&ty) {
        return Err(Error::InvalidType(format!("array sizes in '{name}' are too large")));
    }
    Ok(ty)
}

/// Splits `name` into its base and its array suffixes, in declaration order. `None` marks a
/// `[]` suffix.
fn split_array_suffixes(name: &str) -> Result<(&str, Vec<Option<usize>>), Error> {
    let mut base = name;
    let mut suffixes = Vec::new();

    while let Some(stripped) = base.strip_suffix(']') {
        let open = stripped
            .rfind('[')
            .ok_or_else(|| Error::InvalidType(format!("unbalanced brackets in '{name}'")))?;

        // the suffix must come after any tuple, e.g. `(uint256[2])` has no suffix of its own
        if stripped.rfind(')').is_some_and(|close| close > open) {
            return Err(Error::InvalidType(format!("unbalanced brackets in '{name}'")));
        }

        let size = &stripped[open + 1..];
        if size.is_empty() {
            suffixes.push(None);
        } else {
            if !size.bytes().all(|b| b.is_ascii_digit()) {
                return Err(Error::InvalidType(format!("invalid array size '{size}' in '{name}'")));
            }
            let len = size
                .parse::<usize>()
                .map_err(|_| Error::InvalidType(format!("invalid array size '{size}'")))?;
            if len == 0 {
                return Err(Error::InvalidType(format!("zero-length array in '{name}'")));
            }
            suffixes.push(Some(len));
        }

        base = stripped[..open].trim_end();
    }

    suffixes.reverse();
    Ok((base, suffixes))
}

/// Parses `(T1,...,Tk)`. The closing parenthesis must be the last character and must close the
/// opening one.
fn parse_tuple(base: &str, depth: usize) -> Result<AbiType, Error> {
    let inner = base
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .ok_or_else(|| Error::InvalidType(format!("malformed tuple '{base}'")))?;

    let components = split_top_level(inner)?;
    if components.iter().any(|c| c.trim().is_empty()) {
        return Err(Error::InvalidType(format!("empty tuple component in '{base}'")));
    }

    Ok(AbiType::Tuple(
        components
            .into_iter()
            .map(|component| parse_type_at(component, depth))
            .collect::<Result<Vec<_>, _>>()?,
    ))
}

/// Splits a string at commas that are not nested inside parentheses or brackets.
fn split_top_level(s: &str) -> Result<Vec<&str>, Error> {
    let mut parts = Vec::new();
    let mut depth: i32 = 0;
    let mut start = 0;

    for (i, c) in s.char_indices() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => {
                depth -= 1;
                if depth < 0 {
                    return Err(Error::InvalidType(format!("unbalanced nesting in '{s}'")));
                }
            }
            ',' if depth == 0 => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }

    if depth != 0 {
        return Err(Error::InvalidType(format!("unbalanced nesting in '{s}'")));
    }
    parts.push(&s[start..]);

    Ok(parts)
}

fn parse_primitive(base: &str) -> Result<AbiType, Error> {
    let ty = match base {
        "bool" => AbiType::Bool,
        "address" => AbiType::Address,
        "hash" => AbiType::Hash,
        "string" => AbiType::String,
        "bytes" => AbiType::Bytes,
        "function" => AbiType::Function,
        "uint" => AbiType::Uint(256),
        "int" => AbiType::Int(256),
        _ => {
            if let Some(bits) = base.strip_prefix("uint") {
                AbiType::Uint(parse_int_width(base, bits)?)
            } else if let Some(bits) = base.strip_prefix("int") {
                AbiType::Int(parse_int_width(base, bits)?)
            } else if let Some(len) = base.strip_prefix("bytes") {
                let len = parse_digits(base, len)?;
                if !(1..=32).contains(&len) {
                    return Err(Error::InvalidType(format!("'{base}' must be bytes1..bytes32")));
                }
                AbiType::FixedBytes(len)
            } else {
                return Err(Error::InvalidType(format!("unknown type '{base}'")));
            }
        }
    };

    Ok(ty)
}

fn parse_int_width(base: &str, bits: &str) -> Result<usize, Error> {
    let bits = parse_digits(base, bits)?;
    if !SUPPORTED_INT_WIDTHS.contains(&bits) {
        return Err(Error::UnsupportedWidth(bits));
    }
    Ok(bits)
}

fn parse_digits(base: &str, digits: &str) -> Result<usize, Error> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidType(format!("unknown type '{base}'")));
    }
    digits.parse::<usize>().map_err(|_| Error::InvalidType(format!("unknown type '{base}'")))
}
