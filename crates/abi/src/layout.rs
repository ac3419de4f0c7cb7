//! Head/tail layout rules shared by the encoder, the decoder and string coercion.

use crate::types::AbiType;

/// Size of an ABI word in bytes.
pub const WORD_SIZE: usize = 32;

/// Whether values of this type live in the tail of their enclosing block.
///
/// `string`, `bytes` and slices are always dynamic. Arrays and tuples are dynamic if any of their
/// elements are.
pub fn is_dynamic(ty: &AbiType) -> bool {
    match ty {
        AbiType::String | AbiType::Bytes | AbiType::Slice(_) => true,
        AbiType::Array(inner, _) => is_dynamic(inner),
        AbiType::Tuple(elems) => elems.iter().any(is_dynamic),
        _ => false,
    }
}

/// Number of head words a value of this type occupies.
///
/// Dynamic types take a single offset word. Static arrays and tuples are inlined, so they take
/// the sum of their elements' words. Saturates at `usize::MAX`; parsed types never get there.
pub fn static_word_size(ty: &AbiType) -> usize {
    checked_word_size(ty).unwrap_or(usize::MAX)
}

/// Number of extra head words a type occupies beyond its first one.
pub fn virtual_slots(ty: &AbiType) -> usize {
    static_word_size(ty).saturating_sub(1)
}

/// Size in bytes of the head of a block holding `types`.
pub fn head_size<'a>(types: impl IntoIterator<Item = &'a AbiType>) -> usize {
    types
        .into_iter()
        .fold(0usize, |size, ty| size.saturating_add(static_word_size(ty)))
        .saturating_mul(WORD_SIZE)
}

fn checked_word_size(ty: &AbiType) -> Option<usize> {
    if is_dynamic(ty) {
        return Some(1);
    }

    match ty {
        AbiType::Array(inner, len) => len.checked_mul(checked_word_size(inner)?),
        AbiType::Tuple(elems) => elems
            .iter()
            .try_fold(0usize, |size, elem| size.checked_add(checked_word_size(elem)?)),
        _ => Some(1),
    }
}

/// Whether every block inside `ty` has a head whose size in bytes fits in a `usize`.
pub(crate) fn layout_fits(ty: &AbiType) -> bool {
    let fits = |words: Option<usize>| words.and_then(|w| w.checked_mul(WORD_SIZE)).is_some();

    match ty {
        AbiType::Slice(inner) => layout_fits(inner),
        AbiType::Array(inner, len) => {
            layout_fits(inner) && fits(checked_word_size(inner).and_then(|w| w.checked_mul(*len)))
        }
        AbiType::Tuple(elems) => {
            let words = elems
                .iter()
                .try_fold(0usize, |size, elem| size.checked_add(checked_word_size(elem)?));
            elems.iter().all(layout_fits) && fits(words)
        }
        _ => true,
    }
}
