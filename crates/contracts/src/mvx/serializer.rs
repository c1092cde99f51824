use mvxabi::types::validate_sequence;
use mvxabi::{BinaryCodec, EncodingMode, TypeDescriptor, TypedValue, Value};
use crate::mvx::ParameterDefinition;
use crate::Error;

const SEPARATOR: &str = "@";

/// Converts typed arguments to and from the `@`-joined hex form used in
/// call data and query results. Every wire token is one top-level encoded
/// value; multi-value and variadic arguments spread over several tokens.
#[derive(Copy, Clone, Debug, Default)]
pub struct ArgSerializer {
    codec: BinaryCodec,
}

impl ArgSerializer {
    pub fn new() -> Self {
        Self { codec: BinaryCodec::new() }
    }

    pub fn values_to_string(&self, values: &[TypedValue]) -> Result<String, Error> {
        let buffers = self.values_to_buffers(values)?;
        Ok(buffers.iter().map(hex::encode).collect::<Vec<_>>().join(SEPARATOR))
    }

    pub fn values_to_buffers(&self, values: &[TypedValue]) -> Result<Vec<Vec<u8>>, Error> {
        let mut buffers = Vec::new();
        for value in values {
            self.flatten(value.ty(), value.value(), &mut buffers)?;
        }
        Ok(buffers)
    }

    pub fn string_to_values(&self, joined: &str, parameters: &[ParameterDefinition]) -> Result<Vec<TypedValue>, Error> {
        let buffers = split_tokens(joined, parameters)
            .into_iter()
            .enumerate()
            .map(|(index, token)| {
                hex::decode(token).map_err(|err| Error::ArgumentDecode { index, cause: err.into() })
            })
            .collect::<Result<Vec<_>, Error>>()?;

        self.buffers_to_values(&buffers, parameters)
    }

    pub fn buffers_to_values(&self, buffers: &[Vec<u8>], parameters: &[ParameterDefinition]) -> Result<Vec<TypedValue>, Error> {
        validate_sequence(parameters.iter().map(|parameter| &parameter.ty))?;

        let mut reader = TokenReader {
            buffers,
            position: 0,
            expected: fixed_token_count(parameters),
        };

        let mut values = Vec::with_capacity(parameters.len());
        for parameter in parameters {
            let value = self.read(&parameter.ty, &mut reader)?;
            values.push(TypedValue::new(parameter.ty.clone(), value)?);
        }

        if reader.remaining() > 0 {
            return Err(Error::ArgumentCount { expected: reader.position, actual: buffers.len() });
        }
        Ok(values)
    }

    fn flatten(&self, ty: &TypeDescriptor, value: &Value, buffers: &mut Vec<Vec<u8>>) -> Result<(), Error> {
        match ty {
            TypeDescriptor::MultiValue(items) => {
                let values = value.as_multi()?;
                if values.len() != items.len() {
                    return Err(mvxabi::Error::Arity { expected: items.len(), actual: values.len() }.into());
                }
                for (item, value) in items.iter().zip(values) {
                    self.flatten(item, value, buffers)?;
                }
            }
            TypeDescriptor::Variadic(inner) => {
                for value in value.as_variadic()? {
                    self.flatten(inner, value, buffers)?;
                }
            }
            TypeDescriptor::Optional(inner) => {
                if let Some(value) = value.as_option()? {
                    self.flatten(inner, value, buffers)?;
                }
            }
            _ => {
                let encoded = self.codec.encode(ty, value, EncodingMode::TopLevel)?;
                buffers.push(encoded.bytes);
            }
        }
        Ok(())
    }

    fn read(&self, ty: &TypeDescriptor, reader: &mut TokenReader) -> Result<Value, Error> {
        match ty {
            TypeDescriptor::MultiValue(items) => {
                let values = items.iter()
                    .map(|item| self.read(item, reader))
                    .collect::<Result<Vec<_>, Error>>()?;
                Ok(Value::Multi(values))
            }
            TypeDescriptor::Variadic(inner) => {
                let width = inner.token_count().max(1);
                let remaining = reader.remaining();
                if remaining % width != 0 {
                    return Err(Error::ArgumentCount {
                        expected: reader.position + (remaining / width + 1) * width,
                        actual: reader.buffers.len(),
                    });
                }

                log::debug!("{} absorbs {} remaining tokens", ty, remaining);
                let mut values = Vec::with_capacity(remaining / width);
                while reader.remaining() > 0 {
                    let start = reader.position;
                    values.push(self.read(inner, reader)?);
                    if reader.position == start {
                        return Err(mvxabi::Error::InvalidSchema(format!("{} consumes no tokens", inner)).into());
                    }
                }
                Ok(Value::Variadic(values))
            }
            TypeDescriptor::Optional(inner) => {
                if reader.remaining() == 0 {
                    log::trace!("{} left out", ty);
                    return Ok(Value::Option(None));
                }
                Ok(Value::Option(Some(Box::new(self.read(inner, reader)?))))
            }
            _ => {
                let (index, buffer) = reader.next()?;
                self.codec.decode(buffer, ty, EncodingMode::TopLevel)
                    .map_err(|cause| Error::ArgumentDecode { index, cause })
            }
        }
    }
}

struct TokenReader<'b> {
    buffers: &'b [Vec<u8>],
    position: usize,
    expected: usize,
}

impl<'b> TokenReader<'b> {
    fn remaining(&self) -> usize {
        self.buffers.len() - self.position
    }

    fn next(&mut self) -> Result<(usize, &'b [u8]), Error> {
        let buffer = self.buffers.get(self.position).ok_or(Error::ArgumentCount {
            expected: self.expected,
            actual: self.buffers.len(),
        })?;
        let index = self.position;
        self.position += 1;
        Ok((index, buffer.as_slice()))
    }
}

fn fixed_token_count(parameters: &[ParameterDefinition]) -> usize {
    parameters.iter().map(|parameter| parameter.ty.token_count()).sum()
}

/// An empty string carries zero tokens only when nothing is required;
/// otherwise it is a single empty token, the top-level form of zero values.
fn split_tokens<'s>(joined: &'s str, parameters: &[ParameterDefinition]) -> Vec<&'s str> {
    if joined.is_empty() {
        return match fixed_token_count(parameters) {
            0 => Vec::new(),
            _ => vec![""],
        };
    }
    joined.split(SEPARATOR).collect()
}
