//! Numpy Arrays
//!
//! serde-pickle swaps a reconstructed object for the state handed to `BUILD`, so a pickled
//! `ndarray` decodes to `(version, shape, dtype, fortran_order, raw_bytes)`. With
//! `keep_restore_state` a numpy scalar decodes to its constructor arguments `(dtype, raw_bytes)`.
//!
//! The dtype comes in one of two forms. The first time it is pickled it is its own `BUILD` state
//! `(3, byteorder, subarray, names, fields, elsize, alignment, flags)`. Later references go through
//! the memo, which holds the constructor arguments `(name, align, copy)` instead.
use serde_pickle::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ByteOrder {
    Little,
    Big,
}

/// Element layout of a floating point array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FloatLayout {
    width: usize,
    order: ByteOrder,
}

/// Floating point array restored from its pickled state, values in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FloatArray {
    shape: Vec<usize>,
    values: Vec<f64>,
}

impl FloatArray {
    /// Recognises a pickled `ndarray` or numpy scalar.
    ///
    /// `None` when `value` has neither shape, `Some(Err(_))` when it does but cannot be read
    /// as floats.
    pub(crate) fn from_pickled(value: &Value) -> Option<Result<Self, String>> {
        let Value::Tuple(items) = value else {
            return None;
        };
        match items.as_slice() {
            [Value::I64(_), Value::Tuple(dims), dtype, Value::Bool(fortran), Value::Bytes(raw)] => {
                let shape = dims
                    .iter()
                    .map(|dim| match dim {
                        Value::I64(n) => usize::try_from(*n).ok(),
                        _ => None,
                    })
                    .collect::<Option<Vec<usize>>>()?;
                Some(Self::decode(shape, dtype, *fortran, raw))
            }
            [dtype @ Value::Tuple(_), Value::Bytes(raw)] => {
                Some(Self::decode(vec![], dtype, false, raw))
            }
            _ => None,
        }
    }

    fn decode(
        shape: Vec<usize>,
        dtype: &Value,
        fortran: bool,
        raw: &[u8],
    ) -> Result<Self, String> {
        let count = shape
            .iter()
            .try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
            .ok_or("array shape overflows")?;
        if count == 0 {
            return Ok(Self {
                shape,
                values: vec![],
            });
        }
        if raw.len() % count != 0 {
            return Err(format!(
                "array of {count} elements cannot hold {} bytes",
                raw.len()
            ));
        }

        let layout = float_layout(dtype, raw.len() / count)?;
        let values = read_floats(raw, layout);
        let values = if fortran {
            to_row_major(&values, &shape)
        } else {
            values
        };
        Ok(Self { shape, values })
    }

    /// Plain pickle value: a float for 0-d arrays and scalars, nested lists otherwise.
    pub(crate) fn into_value(self) -> Value {
        nest(&self.values, &self.shape)
    }
}

fn float_layout(dtype: &Value, item_bytes: usize) -> Result<FloatLayout, String> {
    let (order, width) = match dtype {
        // BUILD state
        Value::Tuple(state) if state.len() >= 8 => match state.get(1) {
            Some(Value::String(order)) => (byte_order(order), item_bytes),
            _ => (ByteOrder::Little, item_bytes),
        },
        // constructor arguments, e.g. ("f8", False, True)
        Value::Tuple(args) => match args.first() {
            Some(Value::String(name)) => parse_dtype_name(name)?,
            _ => (ByteOrder::Little, item_bytes),
        },
        _ => (ByteOrder::Little, item_bytes),
    };

    if width != item_bytes {
        return Err(format!(
            "dtype of {width} bytes does not match {item_bytes}-byte elements"
        ));
    }
    match width {
        4 | 8 => Ok(FloatLayout { width, order }),
        other => Err(format!("unsupported {other}-byte numpy elements")),
    }
}

fn byte_order(code: &str) -> ByteOrder {
    match code {
        ">" => ByteOrder::Big,
        _ => ByteOrder::Little,
    }
}

/// `"f8"`, `"<f4"`, `">f8"` and friends. Only floating point kinds are accepted.
fn parse_dtype_name(name: &str) -> Result<(ByteOrder, usize), String> {
    let (order, rest) = match name.chars().next() {
        Some('>') => (ByteOrder::Big, &name[1..]),
        Some('<' | '=' | '|') => (ByteOrder::Little, &name[1..]),
        _ => (ByteOrder::Little, name),
    };
    rest.strip_prefix('f')
        .and_then(|digits| digits.parse::<usize>().ok())
        .map(|width| (order, width))
        .ok_or_else(|| format!("unsupported numpy dtype `{name}`"))
}

fn read_floats(raw: &[u8], layout: FloatLayout) -> Vec<f64> {
    match (layout.width, layout.order) {
        (4, ByteOrder::Little) => raw
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]) as f64)
            .collect(),
        (4, ByteOrder::Big) => raw
            .chunks_exact(4)
            .map(|c| f32::from_be_bytes([c[0], c[1], c[2], c[3]]) as f64)
            .collect(),
        (_, ByteOrder::Little) => raw
            .chunks_exact(8)
            .map(|c| f64::from_le_bytes([c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]]))
            .collect(),
        (_, ByteOrder::Big) => raw
            .chunks_exact(8)
            .map(|c| f64::from_be_bytes([c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]]))
            .collect(),
    }
}

fn to_row_major(values: &[f64], shape: &[usize]) -> Vec<f64> {
    if shape.len() < 2 {
        return values.to_vec();
    }
    let mut strides = vec![1usize; shape.len()];
    for axis in 1..shape.len() {
        strides[axis] = strides[axis - 1] * shape[axis - 1];
    }
    (0..values.len())
        .map(|flat| {
            let mut rest = flat;
            let mut offset = 0;
            for axis in (0..shape.len()).rev() {
                offset += (rest % shape[axis]) * strides[axis];
                rest /= shape[axis];
            }
            values[offset]
        })
        .collect()
}

fn nest(values: &[f64], shape: &[usize]) -> Value {
    match shape {
        [] => values.first().copied().map_or(Value::None, Value::F64),
        [_] => Value::List(values.iter().copied().map(Value::F64).collect()),
        [rows, inner @ ..] => {
            let stride: usize = inner.iter().product();
            Value::List(
                (0..*rows)
                    .map(|row| nest(&values[row * stride..(row + 1) * stride], inner))
                    .collect(),
            )
        }
    }
}
